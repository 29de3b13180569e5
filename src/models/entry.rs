use super::text_or_number;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    pub id: i64,
    pub date: String,
    pub client: String,
    pub property_address: String, // copy of the address, not a foreign key
    pub service: String,
    pub time_in: String,
    pub time_out: String,
    pub total_hours: String,
    pub employees: Vec<String>, // ⇔ entry_employees rows
}

/// Body of `POST /api/entries` and `PUT /api/entries/:id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryInput {
    pub date: String,
    pub client: String,
    pub property_address: String,
    pub service: String,
    #[serde(default)]
    pub employees: Vec<String>,
    pub time_in: String,
    pub time_out: String,
    #[serde(deserialize_with = "text_or_number")]
    pub total_hours: String,
}

impl EntryInput {
    pub fn with_id(self, id: i64) -> Entry {
        Entry {
            id,
            date: self.date,
            client: self.client,
            property_address: self.property_address,
            service: self.service,
            time_in: self.time_in,
            time_out: self.time_out,
            total_hours: self.total_hours,
            employees: self.employees,
        }
    }

    /// Employee names with duplicates removed, first occurrence wins.
    pub fn unique_employees(&self) -> Vec<&str> {
        let mut seen = Vec::with_capacity(self.employees.len());
        for name in &self.employees {
            if !seen.contains(&name.as_str()) {
                seen.push(name.as_str());
            }
        }
        seen
    }
}
