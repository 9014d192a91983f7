//! JSON document codec.
//!
//! A database file is a single JSON object of string keys to string values:
//!
//! ```text
//! {"user:1":"alice","user:2":"bob"}
//! ```
//!
//! A zero-length file and the document `""` both decode to an empty map.
//! Every other non-object root, whitespace-only content included, is
//! corruption.

use ezdb_core::{Error, OrderedIndexedMap, Result};
use serde_json::Value;

/// Converts a map to and from its on-disk representation.
pub trait PersistenceCodec {
    /// Encode the map, preserving every key/value pair
    fn encode(&self, map: &OrderedIndexedMap) -> Result<Vec<u8>>;

    /// Decode a document into a map.
    ///
    /// Malformed documents yield [`Error::Corrupted`]. Nothing is partially
    /// loaded: either the whole document decodes or an error is returned.
    fn decode(&self, bytes: &[u8]) -> Result<OrderedIndexedMap>;
}

/// Compact JSON codec
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

impl PersistenceCodec for JsonCodec {
    fn encode(&self, map: &OrderedIndexedMap) -> Result<Vec<u8>> {
        serde_json::to_vec(map).map_err(|e| Error::Serialization(e.to_string()))
    }

    fn decode(&self, bytes: &[u8]) -> Result<OrderedIndexedMap> {
        if bytes.is_empty() {
            return Ok(OrderedIndexedMap::new());
        }

        let root: Value =
            serde_json::from_slice(bytes).map_err(|e| Error::Corrupted(e.to_string()))?;

        let object = match root {
            Value::Object(object) => object,
            Value::String(s) if s.is_empty() => return Ok(OrderedIndexedMap::new()),
            other => {
                return Err(Error::Corrupted(format!(
                    "expected a JSON object at the root, found {}",
                    kind_of(&other)
                )))
            }
        };

        let mut map = OrderedIndexedMap::with_capacity(object.len());
        for (key, value) in object {
            match value {
                Value::String(s) => map.set(key, s),
                other => {
                    return Err(Error::Corrupted(format!(
                        "value for key {:?} is {}, expected a string",
                        key,
                        kind_of(&other)
                    )))
                }
            }
        }
        Ok(map)
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
