//! Domain records exchanged over the HTTP API and stored in SQLite.

pub mod data;
pub mod employee;
pub mod entry;
pub mod property;
pub mod timer;

pub use data::AllData;
pub use employee::{Employee, EmployeeContact, NewEmployee};
pub use entry::{Entry, EntryInput};
pub use property::{Property, PropertyInput, Services};
pub use timer::{ActiveTimer, TimerInput};

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Accept `"7.5"` as well as `7.5` and keep the value as text.
pub(crate) fn text_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        Value::Null => Ok(String::new()),
        other => Err(serde::de::Error::custom(format!(
            "expected string or number, got {}",
            other
        ))),
    }
}
