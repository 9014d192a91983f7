#![no_main]

use ezdb_storage::{JsonCodec, PersistenceCodec};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Arbitrary bytes must decode or fail cleanly, never panic
    if let Ok(map) = JsonCodec.decode(data) {
        let encoded = JsonCodec.encode(&map).expect("decoded map must re-encode");
        let decoded = JsonCodec.decode(&encoded).expect("encoded map must decode");

        assert_eq!(decoded.len(), map.len());
        for (key, value) in map.iter() {
            assert_eq!(decoded.get(key), Some(value));
        }
    }
});
