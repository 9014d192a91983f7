#![no_main]

use arbitrary::Arbitrary;
use ezdb_core::{OrderedIndexedMap, SortOrder};
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
enum MapOp {
    Set { key: String, value: String },
    Delete { key: String },
    Rename { old: String, new: String },
    Sort { order: u8 },
    Clear,
}

fuzz_target!(|ops: Vec<MapOp>| {
    let mut map = OrderedIndexedMap::new();

    for op in ops.iter().take(256) {
        match op {
            MapOp::Set { key, value } => map.set(key.as_str(), value.as_str()),
            MapOp::Delete { key } => {
                map.delete(key);
            }
            MapOp::Rename { old, new } => {
                map.rename_key(old, new.as_str());
            }
            MapOp::Sort { order } => {
                map.sort(SortOrder::ALL[*order as usize % SortOrder::ALL.len()])
            }
            MapOp::Clear => map.clear(),
        }

        // Every key resolves to its own position and value
        for (pos, (key, value)) in map.iter().enumerate() {
            assert_eq!(map.position(key), Some(pos));
            assert_eq!(map.get(key), Some(value));
        }
    }
});
