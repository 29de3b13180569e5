use crate::errors::AppResult;
use rusqlite::types::Type;
use rusqlite::{Connection, Row};
use serde::Serialize;
use serde::de::DeserializeOwned;

/// Read a JSON-encoded TEXT column into `T`.
pub fn json_column<T: DeserializeOwned>(row: &Row, idx: usize) -> rusqlite::Result<T> {
    let raw: String = row.get(idx)?;
    serde_json::from_str(&raw)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

/// Encode `value` for storage in a TEXT column.
pub fn to_json_text<T: Serialize>(value: &T) -> AppResult<String> {
    Ok(serde_json::to_string(value)?)
}

pub fn checkpoint(conn: &Connection) -> AppResult<()> {
    // busy, log frames, checkpointed frames
    let (busy, _, _): (i64, i64, i64) = conn.query_row(
        "PRAGMA wal_checkpoint(TRUNCATE);",
        [],
        |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
    )?;
    if busy != 0 {
        tracing::warn!("wal checkpoint could not complete, readers still active");
    }
    Ok(())
}
