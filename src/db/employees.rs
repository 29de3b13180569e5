use crate::errors::{AppError, AppResult};
use crate::models::{Employee, EmployeeContact};
use rusqlite::{Connection, OptionalExtension, Result, Row, params};

fn map_row(row: &Row) -> Result<Employee> {
    Ok(Employee {
        id: row.get("id")?,
        name: row.get("name")?,
        phone: row.get("phone")?,
        email: row.get("email")?,
    })
}

pub fn load_employees(conn: &Connection) -> AppResult<Vec<Employee>> {
    let mut stmt = conn.prepare("SELECT id, name, phone, email FROM employees ORDER BY name ASC")?;
    let rows = stmt.query_map([], map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn find_employee(conn: &Connection, name: &str) -> AppResult<Option<Employee>> {
    let employee = conn
        .query_row(
            "SELECT id, name, phone, email FROM employees WHERE name = ?1",
            [name],
            map_row,
        )
        .optional()?;
    Ok(employee)
}

/// Insert `name` unless it is already present. Returns whether a row was added.
pub fn create_employee(conn: &Connection, name: &str) -> AppResult<bool> {
    let inserted = conn.execute("INSERT OR IGNORE INTO employees (name) VALUES (?1)", [name])?;
    Ok(inserted > 0)
}

pub fn update_employee(
    conn: &Connection,
    name: &str,
    contact: &EmployeeContact,
) -> AppResult<Employee> {
    let changed = conn.execute(
        "UPDATE employees SET phone = ?1, email = ?2 WHERE name = ?3",
        params![contact.phone, contact.email, name],
    )?;
    if changed == 0 {
        return Err(AppError::NotFound(format!("employee {}", name)));
    }

    find_employee(conn, name)?.ok_or_else(|| AppError::NotFound(format!("employee {}", name)))
}

/// Remove the employee and every entry link naming them.
///
/// Entries may name people who were never registered, so the links go even
/// when there is no employee row; 404 only when neither existed.
pub fn delete_employee(conn: &mut Connection, name: &str) -> AppResult<()> {
    let tx = conn.transaction()?;

    let links = tx.execute("DELETE FROM entry_employees WHERE employee_name = ?1", [name])?;
    let deleted = tx.execute("DELETE FROM employees WHERE name = ?1", [name])?;
    if links == 0 && deleted == 0 {
        return Err(AppError::NotFound(format!("employee {}", name)));
    }

    tx.commit()?;
    tracing::debug!(name, links, "employee deleted");
    Ok(())
}
