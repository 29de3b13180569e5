use super::{ActiveTimer, Employee, Entry, Property};
use serde::{Deserialize, Serialize};

/// Response of `GET /api/data`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllData {
    pub entries: Vec<Entry>,
    pub properties: Vec<Property>,
    pub employees: Vec<Employee>,
    pub active_timers: Vec<ActiveTimer>,
}
