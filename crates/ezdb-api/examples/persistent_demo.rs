//! Demonstrates EzDB's single-file persistence.
//!
//! Run with: cargo run -p ezdb --example persistent_demo

use ezdb::Database;
use std::path::Path;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let db_path = "./demo_database.ezdb";

    println!("=== EzDB Persistent Database Demo ===\n");

    // Clean up any previous demo data
    if Path::new(db_path).exists() {
        std::fs::remove_file(db_path)?;
        println!("🧹 Cleaned up previous demo data\n");
    }

    // PART 1: Write data
    println!("📝 PART 1: Writing data to database...");
    {
        let mut db = Database::open(db_path)?;

        db.set("user:2:name", "Bob")?;
        db.set("user:2:email", "bob@example.com")?;
        db.set("user:1:name", "Alice")?;
        db.set("user:1:email", "alice@example.com")?;
        db.set("stats:total_users", "2")?;

        println!("   ✅ Stored 2 users and 1 counter");
        db.close()?;
        println!("   📁 Data written to: {}", db_path);
    }
    println!("   🔒 Database closed\n");

    // PART 2: Reopen and verify data persisted
    println!("🔓 PART 2: Reopening database and verifying data...");
    {
        let mut db = Database::open(db_path)?;

        // Keys come back sorted alphabetically
        for (key, value) in db.entries()? {
            println!("   {} = {}", key, value);
        }

        println!("\n   Users only:");
        for (key, value) in db.prefix("user:1:")? {
            println!("   {} = {}", key, value);
        }

        db.update_key_name("stats:total_users", "stats:users")?;
        db.delete("user:2:email")?;
        db.save()?;
        println!("\n   ✅ Renamed a key, deleted another, saved ({} entries)", db.count()?);
    }

    println!("\n📄 On disk: {}", std::fs::read_to_string(db_path)?);

    std::fs::remove_file(db_path)?;
    println!("\n=== Demo Complete ===");
    Ok(())
}
