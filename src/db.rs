use anyhow::Result;
use rusqlite::{Connection, ErrorCode};

const DB_PATH: &str = "data/policies.sqlite";

pub fn connect() -> Result<Connection> {
    let conn = Connection::open(DB_PATH)?;
    conn.execute_batch("PRAGMA journal_mode=WAL;")?;
    Ok(conn)
}

pub fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS policies (
            id         INTEGER PRIMARY KEY,
            title      TEXT NOT NULL,
            url        TEXT NOT NULL UNIQUE,
            created_at TEXT NOT NULL DEFAULT (datetime('now'))
        );
        ",
    )?;
    Ok(())
}

/// Outcome of persisting one policy row. A uniqueness violation is an
/// expected duplicate, not an error; any other driver failure is reported
/// as a non-fatal `Failed` for the caller to log.
#[derive(Debug, PartialEq, Eq)]
pub enum InsertOutcome {
    Inserted,
    DuplicateSkipped,
    Failed(String),
}

pub fn insert_policy(conn: &Connection, title: &str, url: &str) -> InsertOutcome {
    match conn.execute(
        "INSERT INTO policies (title, url) VALUES (?1, ?2)",
        rusqlite::params![title, url],
    ) {
        Ok(_) => InsertOutcome::Inserted,
        Err(rusqlite::Error::SqliteFailure(e, _))
            if e.code == ErrorCode::ConstraintViolation =>
        {
            InsertOutcome::DuplicateSkipped
        }
        Err(e) => InsertOutcome::Failed(e.to_string()),
    }
}

pub fn count_policies(conn: &Connection) -> Result<usize> {
    let count = conn.query_row("SELECT COUNT(*) FROM policies", [], |r| r.get(0))?;
    Ok(count)
}

// ── Tests ──
