use serde::{Deserialize, Serialize};

/// A work session that has been started but not yet turned into an [`Entry`](super::Entry).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActiveTimer {
    pub id: String, // UUID v4
    pub start_time: String,
    pub date: String,
    pub client: String,
    pub property_address: String,
    pub service: String,
    pub employees: Vec<String>, // ⇔ activeTimers.employees (JSON text)
}

/// Body of `POST /api/timers`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimerInput {
    pub start_time: String,
    pub date: String,
    pub client: String,
    pub property_address: String,
    pub service: String,
    #[serde(default)]
    pub employees: Vec<String>,
}

impl TimerInput {
    pub fn with_id(self, id: String) -> ActiveTimer {
        ActiveTimer {
            id,
            start_time: self.start_time,
            date: self.date,
            client: self.client,
            property_address: self.property_address,
            service: self.service,
            employees: self.employees,
        }
    }
}
