use crate::db::db_utils::{json_column, to_json_text};
use crate::errors::{AppError, AppResult};
use crate::models::{Property, PropertyInput};
use rusqlite::{Connection, Result, Row, params};

fn map_row(row: &Row) -> Result<Property> {
    Ok(Property {
        id: row.get(0)?,
        full_name: row.get(1)?,
        address: row.get(2)?,
        services: json_column(row, 3)?,
    })
}

pub fn load_properties(conn: &Connection) -> AppResult<Vec<Property>> {
    let mut stmt =
        conn.prepare("SELECT id, fullName, address, services FROM properties ORDER BY id ASC")?;
    let rows = stmt.query_map([], map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn create_property(conn: &Connection, input: PropertyInput) -> AppResult<Property> {
    conn.execute(
        "INSERT INTO properties (fullName, address, services) VALUES (?1, ?2, ?3)",
        params![input.full_name, input.address, to_json_text(&input.services)?],
    )?;
    Ok(input.with_id(conn.last_insert_rowid()))
}

pub fn update_property(conn: &Connection, id: i64, input: PropertyInput) -> AppResult<Property> {
    let changed = conn.execute(
        "UPDATE properties SET fullName = ?1, address = ?2, services = ?3 WHERE id = ?4",
        params![
            input.full_name,
            input.address,
            to_json_text(&input.services)?,
            id
        ],
    )?;
    if changed == 0 {
        return Err(AppError::NotFound(format!("property {}", id)));
    }
    Ok(input.with_id(id))
}

/// Remove the property at `address` together with every entry recorded there.
pub fn delete_property(conn: &mut Connection, address: &str) -> AppResult<()> {
    let tx = conn.transaction()?;

    tx.execute(
        "DELETE FROM entry_employees
         WHERE entry_id IN (SELECT id FROM entries WHERE propertyAddress = ?1)",
        [address],
    )?;
    let entries = tx.execute("DELETE FROM entries WHERE propertyAddress = ?1", [address])?;
    let deleted = tx.execute("DELETE FROM properties WHERE address = ?1", [address])?;
    if deleted == 0 {
        return Err(AppError::NotFound(format!("property at {}", address)));
    }

    tx.commit()?;
    tracing::debug!(address, entries, "property deleted");
    Ok(())
}
