use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Service name → free-form attributes, e.g. `{"mowing": true}`.
pub type Services = Map<String, Value>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    pub id: i64,
    pub full_name: String,
    pub address: String, // ⇔ properties.address (UNIQUE)
    pub services: Services,
}

/// Body of `POST /api/properties` and `PUT /api/properties/:id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyInput {
    pub full_name: String,
    pub address: String,
    #[serde(default)]
    pub services: Services,
}

impl PropertyInput {
    pub fn with_id(self, id: i64) -> Property {
        Property {
            id,
            full_name: self.full_name,
            address: self.address,
            services: self.services,
        }
    }
}
