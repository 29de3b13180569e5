use crate::db::db_utils::{json_column, to_json_text};
use crate::errors::{AppError, AppResult};
use crate::models::{ActiveTimer, TimerInput};
use rusqlite::{Connection, Result, Row, params};
use uuid::Uuid;

fn map_row(row: &Row) -> Result<ActiveTimer> {
    Ok(ActiveTimer {
        id: row.get(0)?,
        start_time: row.get(1)?,
        date: row.get(2)?,
        client: row.get(3)?,
        property_address: row.get(4)?,
        service: row.get(5)?,
        employees: json_column(row, 6)?,
    })
}

pub fn load_timers(conn: &Connection) -> AppResult<Vec<ActiveTimer>> {
    let mut stmt = conn.prepare(
        "SELECT id, startTime, date, client, propertyAddress, service, employees
         FROM activeTimers
         ORDER BY date ASC, startTime ASC",
    )?;
    let rows = stmt.query_map([], map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn create_timer(conn: &Connection, input: TimerInput) -> AppResult<ActiveTimer> {
    let id = Uuid::new_v4().to_string();

    conn.execute(
        "INSERT INTO activeTimers (id, startTime, date, client, propertyAddress, service, employees)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            id,
            input.start_time,
            input.date,
            input.client,
            input.property_address,
            input.service,
            to_json_text(&input.employees)?,
        ],
    )?;
    Ok(input.with_id(id))
}

pub fn delete_timer(conn: &Connection, id: &str) -> AppResult<()> {
    let deleted = conn.execute("DELETE FROM activeTimers WHERE id = ?1", [id])?;
    if deleted == 0 {
        return Err(AppError::NotFound(format!("timer {}", id)));
    }
    Ok(())
}
