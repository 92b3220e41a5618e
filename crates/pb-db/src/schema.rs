use rusqlite::{Connection, Result};
use std::path::Path;

pub const TABLE: &str = "postbacks";

pub fn open(path: impl AsRef<Path>) -> Result<Connection> {
    let conn = Connection::open(path)?;
    conn.pragma_update(None, "busy_timeout", 5000)?;
    Ok(conn)
}

/// Journal mode is stored in the database file, so this only needs to run
/// once per file.
pub fn enable_wal(conn: &Connection) -> Result<()> {
    conn.pragma_update(None, "journal_mode", "WAL")
}

pub fn migrate(conn: &Connection) -> Result<()> {
    let sql = include_str!("../migrations/0001_init.sql");
    conn.execute_batch(sql)?;
    Ok(())
}

pub fn open_and_migrate(path: impl AsRef<Path>) -> Result<Connection> {
    let conn = open(path)?;
    enable_wal(&conn)?;
    migrate(&conn)?;
    Ok(conn)
}

pub fn table_exists(conn: &Connection) -> Result<bool> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1",
        [TABLE],
        |row| row.get(0),
    )?;
    Ok(count > 0)
}
