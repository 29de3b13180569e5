//! One-shot import of the legacy JSON document into the relational schema.

use crate::db::Store;
use crate::db::db_utils::to_json_text;
use crate::errors::{AppError, AppResult};
use crate::models::{Services, text_or_number};
use rusqlite::{Connection, params};
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Default, Deserialize)]
pub struct LegacyData {
    #[serde(default)]
    pub properties: Vec<LegacyProperty>,
    #[serde(default)]
    pub employees: Vec<LegacyEmployee>,
    #[serde(default)]
    pub entries: Vec<LegacyEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyProperty {
    pub id: i64,
    pub full_name: String,
    pub address: String,
    #[serde(default)]
    pub services: Option<Services>,
}

/// Employees were plain names; some exports wrap them as `{"name": ..}`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum LegacyEmployee {
    Name(String),
    Record { name: String },
}

impl LegacyEmployee {
    pub fn name(&self) -> &str {
        match self {
            LegacyEmployee::Name(n) => n,
            LegacyEmployee::Record { name } => name,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyEntry {
    pub id: i64,
    pub date: String,
    pub client: String,
    pub property_address: String,
    pub service: String,
    #[serde(alias = "TimeIn")]
    pub time_in: String,
    #[serde(alias = "TimeOut")]
    pub time_out: String,
    #[serde(deserialize_with = "text_or_number")]
    pub total_hours: String,
    #[serde(default)]
    pub employees: Vec<String>,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ImportReport {
    pub properties: usize,
    pub employees: usize,
    pub entries: usize,
    pub links: usize,
    /// Links naming someone absent from the employees table.
    pub unknown_employee_links: usize,
}

pub fn parse_legacy(content: &str) -> AppResult<LegacyData> {
    serde_json::from_str(content).map_err(|e| AppError::Import(format!("invalid legacy JSON: {}", e)))
}

/// Insert everything in one transaction, keeping the original ids of
/// properties and entries. Nothing is written if any row fails.
pub fn import_legacy(conn: &mut Connection, data: &LegacyData) -> AppResult<ImportReport> {
    let tx = conn.transaction()?;
    let mut report = ImportReport::default();

    {
        let mut stmt = tx.prepare(
            "INSERT INTO properties (id, fullName, address, services) VALUES (?1, ?2, ?3, ?4)",
        )?;
        for p in &data.properties {
            let services = p.services.clone().unwrap_or_default();
            stmt.execute(params![p.id, p.full_name, p.address, to_json_text(&services)?])
                .map_err(|e| AppError::Import(format!("property {}: {}", p.id, e)))?;
            report.properties += 1;
        }
    }

    {
        let mut stmt = tx.prepare("INSERT OR IGNORE INTO employees (name) VALUES (?1)")?;
        for e in &data.employees {
            report.employees += stmt.execute([e.name()])?;
        }
    }

    {
        let mut entry_stmt = tx.prepare(
            "INSERT INTO entries (id, date, client, propertyAddress, service, timeIn, timeOut, totalHours)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        )?;
        let mut link_stmt = tx.prepare(
            "INSERT OR IGNORE INTO entry_employees (entry_id, employee_name) VALUES (?1, ?2)",
        )?;

        for e in &data.entries {
            entry_stmt
                .execute(params![
                    e.id,
                    e.date,
                    e.client,
                    e.property_address,
                    e.service,
                    e.time_in,
                    e.time_out,
                    e.total_hours,
                ])
                .map_err(|err| AppError::Import(format!("entry {}: {}", e.id, err)))?;
            report.entries += 1;

            for name in &e.employees {
                report.links += link_stmt.execute(params![e.id, name])?;
            }
        }
    }

    report.unknown_employee_links = tx.query_row(
        "SELECT COUNT(*) FROM entry_employees
         WHERE employee_name NOT IN (SELECT name FROM employees)",
        [],
        |row| row.get::<_, i64>(0),
    )? as usize;

    tx.commit()?;
    Ok(report)
}

/// Read `path`, make sure the schema exists, and import it.
pub fn import_file(store: &Store, path: &Path) -> AppResult<ImportReport> {
    let content = fs::read_to_string(path)
        .map_err(|e| AppError::Import(format!("{}: {}", path.display(), e)))?;
    let data = parse_legacy(&content)?;

    store.init()?;
    let mut pool = store.connect()?;
    pool.with_conn(|conn| import_legacy(conn, &data))
}
