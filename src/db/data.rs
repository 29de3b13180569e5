use crate::db::{employees, entries, properties, timers};
use crate::errors::AppResult;
use crate::models::AllData;
use rusqlite::Connection;

/// Read all five tables inside one read transaction so the result is a
/// consistent snapshot.
pub fn load_all(conn: &mut Connection) -> AppResult<AllData> {
    let tx = conn.transaction()?;

    let data = AllData {
        entries: entries::load_entries(&tx)?,
        properties: properties::load_properties(&tx)?,
        employees: employees::load_employees(&tx)?,
        active_timers: timers::load_timers(&tx)?,
    };

    tx.commit()?;
    Ok(data)
}
