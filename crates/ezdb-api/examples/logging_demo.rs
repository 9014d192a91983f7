use ezdb::logging::LogConfig;
use ezdb::{Database, SortOrder};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Debug level so save/sort/rename events are visible
    let _guard = LogConfig::debug().init();

    println!("=== EzDB Logging Demo ===\n");

    let dir = std::env::temp_dir().join("ezdb-logging-demo");
    std::fs::create_dir_all(&dir)?;
    let path = dir.join("demo.ezdb");

    // Logs "Opened database" (and "Created database file" on first run)
    let mut db = Database::open(&path)?;

    println!("\n1. Inserting data...");
    db.set("10", "ten")?;
    db.set("9", "nine")?;
    db.set("100", "hundred")?;

    println!("\n2. Sorting numerically...");
    db.sort(SortOrder::NumericAsc)?;
    println!("Keys: {:?}", db.keys()?);

    println!("\n3. Renaming a key...");
    db.update_key_name("9", "nine")?;

    println!("\n4. Saving and closing...");
    db.save()?;
    db.close()?;

    println!("\n5. Using a closed handle...");
    if let Err(e) = db.get("10") {
        println!("Expected error: {}", e);
    }

    std::fs::remove_dir_all(&dir)?;
    println!("\n=== Demo Complete ===");
    Ok(())
}
