use crate::errors::{AppError, AppResult};
use crate::models::{Entry, EntryInput};
use rusqlite::{Connection, Result, Row, Transaction, params};
use std::collections::HashMap;

fn map_row(row: &Row) -> Result<Entry> {
    Ok(Entry {
        id: row.get("id")?,
        date: row.get("date")?,
        client: row.get("client")?,
        property_address: row.get("propertyAddress")?,
        service: row.get("service")?,
        time_in: row.get("timeIn")?,
        time_out: row.get("timeOut")?,
        total_hours: row.get("totalHours")?,
        employees: Vec::new(),
    })
}

/// All entries, newest first, each carrying its linked employee names.
pub fn load_entries(conn: &Connection) -> AppResult<Vec<Entry>> {
    let mut links: HashMap<i64, Vec<String>> = HashMap::new();
    {
        let mut stmt = conn.prepare(
            "SELECT entry_id, employee_name FROM entry_employees
             ORDER BY entry_id, rowid",
        )?;
        let rows = stmt.query_map([], |row| Ok((row.get::<_, i64>(0)?, row.get::<_, String>(1)?)))?;
        for r in rows {
            let (entry_id, name) = r?;
            links.entry(entry_id).or_default().push(name);
        }
    }

    let mut stmt = conn.prepare(
        "SELECT id, date, client, propertyAddress, service, timeIn, timeOut, totalHours
         FROM entries
         ORDER BY date DESC, id DESC",
    )?;
    let rows = stmt.query_map([], map_row)?;

    let mut out = Vec::new();
    for r in rows {
        let mut entry = r?;
        entry.employees = links.remove(&entry.id).unwrap_or_default();
        out.push(entry);
    }
    Ok(out)
}

/// Employee names linked to one entry, in insertion order. Writes return
/// this list so callers see the stored, de-duplicated set.
pub fn load_entry_employees(conn: &Connection, entry_id: i64) -> AppResult<Vec<String>> {
    let mut stmt = conn.prepare(
        "SELECT employee_name FROM entry_employees
         WHERE entry_id = ?1
         ORDER BY rowid",
    )?;
    let rows = stmt.query_map([entry_id], |row| row.get::<_, String>(0))?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub(crate) fn insert_links(tx: &Transaction, entry_id: i64, names: &[&str]) -> AppResult<()> {
    let mut stmt = tx.prepare_cached(
        "INSERT OR IGNORE INTO entry_employees (entry_id, employee_name) VALUES (?1, ?2)",
    )?;
    for name in names {
        stmt.execute(params![entry_id, name])?;
    }
    Ok(())
}

/// Insert the entry and its employee links as one unit.
pub fn create_entry(conn: &mut Connection, input: EntryInput) -> AppResult<Entry> {
    let tx = conn.transaction()?;

    tx.execute(
        "INSERT INTO entries (date, client, propertyAddress, service, timeIn, timeOut, totalHours)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            input.date,
            input.client,
            input.property_address,
            input.service,
            input.time_in,
            input.time_out,
            input.total_hours,
        ],
    )?;
    let id = tx.last_insert_rowid();
    insert_links(&tx, id, &input.unique_employees())?;
    let employees = load_entry_employees(&tx, id)?;

    tx.commit()?;
    Ok(Entry {
        employees,
        ..input.with_id(id)
    })
}

/// Replace the entry's fields and its whole employee set.
pub fn update_entry(conn: &mut Connection, id: i64, input: EntryInput) -> AppResult<Entry> {
    let tx = conn.transaction()?;

    let changed = tx.execute(
        "UPDATE entries
         SET date = ?1, client = ?2, propertyAddress = ?3, service = ?4,
             timeIn = ?5, timeOut = ?6, totalHours = ?7
         WHERE id = ?8",
        params![
            input.date,
            input.client,
            input.property_address,
            input.service,
            input.time_in,
            input.time_out,
            input.total_hours,
            id,
        ],
    )?;
    if changed == 0 {
        return Err(AppError::NotFound(format!("entry {}", id)));
    }

    tx.execute("DELETE FROM entry_employees WHERE entry_id = ?1", [id])?;
    insert_links(&tx, id, &input.unique_employees())?;
    let employees = load_entry_employees(&tx, id)?;

    tx.commit()?;
    Ok(Entry {
        employees,
        ..input.with_id(id)
    })
}

pub fn delete_entry(conn: &mut Connection, id: i64) -> AppResult<()> {
    let tx = conn.transaction()?;

    tx.execute("DELETE FROM entry_employees WHERE entry_id = ?1", [id])?;
    let deleted = tx.execute("DELETE FROM entries WHERE id = ?1", [id])?;
    if deleted == 0 {
        return Err(AppError::NotFound(format!("entry {}", id)));
    }

    tx.commit()?;
    Ok(())
}
