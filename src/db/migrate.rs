use crate::errors::{AppError, AppResult};
use rusqlite::{Connection, OptionalExtension};

/// Check if a table exists.
fn table_exists(conn: &Connection, table: &str) -> rusqlite::Result<bool> {
    let mut stmt = conn.prepare("SELECT name FROM sqlite_master WHERE type='table' AND name=?1")?;
    let exists: Option<String> = stmt.query_row([table], |row| row.get(0)).optional()?;
    Ok(exists.is_some())
}

/// Check if `table` has a column named `column`.
fn has_column(conn: &Connection, table: &str, column: &str) -> rusqlite::Result<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info('{}')", table))?;
    let cols = stmt.query_map([], |row| row.get::<_, String>(1))?;

    for c in cols {
        if c? == column {
            return Ok(true);
        }
    }
    Ok(false)
}

/// Files created before contact details existed have `employees(id, name)` only.
fn migrate_add_employee_contact(conn: &Connection) -> rusqlite::Result<bool> {
    if !table_exists(conn, "employees")? {
        return Ok(false);
    }

    let mut changed = false;
    for column in ["phone", "email"] {
        if !has_column(conn, "employees", column)? {
            conn.execute_batch(&format!("ALTER TABLE employees ADD COLUMN {} TEXT;", column))?;
            changed = true;
        }
    }
    Ok(changed)
}

/// Apply every migration that has not run yet. Each one is a no-op when
/// its change is already present.
pub fn run_pending_migrations(conn: &Connection) -> AppResult<()> {
    let changed = migrate_add_employee_contact(conn)
        .map_err(|e| AppError::Migration(format!("employees contact columns: {}", e)))?;

    if changed {
        tracing::info!("added contact columns to employees table");
    }

    Ok(())
}
