#![no_main]

use arbitrary::Arbitrary;
use ezdb::{Database, SortOrder};
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
enum DbOp {
    Set { key: String, value: String },
    Get { key: String },
    Delete { key: String },
    Prefix { prefix: String },
    UpdateKeyName { old: String, new: String },
    Sort { order: u8 },
    Clear,
    Save,
}

fuzz_target!(|ops: Vec<DbOp>| {
    let dir = match tempfile::tempdir() {
        Ok(dir) => dir,
        Err(_) => return,
    };
    let path = dir.path().join("fuzz.ezdb");

    let mut db = match Database::open(&path) {
        Ok(db) => db,
        Err(_) => return,
    };

    for op in ops.iter().take(100) { // Limit operations to prevent timeout
        match op {
            DbOp::Set { key, value } => {
                let _ = db.set(key.as_str(), value.as_str());
            }
            DbOp::Get { key } => {
                let _ = db.get(key);
            }
            DbOp::Delete { key } => {
                let _ = db.delete(key);
            }
            DbOp::Prefix { prefix } => {
                let _ = db.prefix(prefix);
            }
            DbOp::UpdateKeyName { old, new } => {
                let _ = db.update_key_name(old, new.as_str());
            }
            DbOp::Sort { order } => {
                let _ = db.sort(SortOrder::ALL[*order as usize % SortOrder::ALL.len()]);
            }
            DbOp::Clear => {
                let _ = db.clear();
            }
            DbOp::Save => {
                let _ = db.save();
            }
        }
    }

    // Whatever was closed must reopen with the same content
    let entries = db.entries().expect("handle is still open");
    db.close().expect("close must succeed");

    let reopened = Database::open(&path).expect("reopen must succeed");
    assert_eq!(reopened.count().unwrap(), entries.len());
    for (key, value) in &entries {
        assert_eq!(reopened.get(key).unwrap().as_deref(), Some(value.as_str()));
    }
});
