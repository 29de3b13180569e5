use crate::db::migrate::run_pending_migrations;
use crate::errors::AppResult;
use rusqlite::Connection;

/// Create every table if absent, then bring older files up to date.
/// Safe to call on every start.
pub fn init_db(conn: &Connection) -> AppResult<()> {
    let mode: String = conn.query_row("PRAGMA journal_mode=WAL;", [], |row| row.get(0))?;
    tracing::debug!(journal_mode = %mode, "journal mode set");

    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS properties (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            fullName  TEXT NOT NULL,
            address   TEXT NOT NULL UNIQUE,
            services  TEXT NOT NULL DEFAULT '{}'
        );

        CREATE TABLE IF NOT EXISTS employees (
            id     INTEGER PRIMARY KEY AUTOINCREMENT,
            name   TEXT NOT NULL UNIQUE,
            phone  TEXT,
            email  TEXT
        );

        CREATE TABLE IF NOT EXISTS entries (
            id               INTEGER PRIMARY KEY AUTOINCREMENT,
            date             TEXT NOT NULL,
            client           TEXT NOT NULL,
            propertyAddress  TEXT NOT NULL,
            service          TEXT NOT NULL,
            timeIn           TEXT NOT NULL,
            timeOut          TEXT NOT NULL,
            totalHours       TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS entry_employees (
            entry_id       INTEGER NOT NULL REFERENCES entries(id) ON DELETE CASCADE,
            employee_name  TEXT NOT NULL,
            PRIMARY KEY (entry_id, employee_name)
        );

        CREATE TABLE IF NOT EXISTS activeTimers (
            id               TEXT PRIMARY KEY,
            startTime        TEXT NOT NULL,
            date             TEXT NOT NULL,
            client           TEXT NOT NULL,
            propertyAddress  TEXT NOT NULL,
            service          TEXT NOT NULL,
            employees        TEXT NOT NULL DEFAULT '[]'
        );

        CREATE INDEX IF NOT EXISTS idx_entries_date ON entries(date, id);
        CREATE INDEX IF NOT EXISTS idx_entries_property ON entries(propertyAddress);
        CREATE INDEX IF NOT EXISTS idx_entry_employees_name ON entry_employees(employee_name);
        "#,
    )?;

    run_pending_migrations(conn)?;
    Ok(())
}
