use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use rusqlite::Connection;

/// Ensure the database file exists, run lazy migrations, and return a live
/// connection.
pub fn ensure_schema(db_path: &Path) -> Result<Connection> {
    if let Some(parent) = db_path.parent() {
        fs::create_dir_all(parent).context("failed to create data directory")?;
    }

    let conn = Connection::open(db_path).context("failed to open SQLite database")?;
    migrate(&conn)?;
    Ok(conn)
}

/// Open a private in-memory database with the same schema. Used by tests and
/// by the `--db :memory:` escape hatch.
pub fn open_in_memory() -> Result<Connection> {
    let conn = Connection::open_in_memory().context("failed to open in-memory database")?;
    migrate(&conn)?;
    Ok(conn)
}

fn migrate(conn: &Connection) -> Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS capacity (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            facility_id INTEGER NOT NULL,
            category_id INTEGER NOT NULL,
            total_capacity INTEGER NOT NULL,
            current_occupancy INTEGER NOT NULL,
            UNIQUE (facility_id, category_id)
        )",
        [],
    )
    .context("failed to create capacity table")?;

    Ok(())
}
