use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::fixture::FixtureRow;

/// The `data` payload of an object, keyed the way the objects API expects.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct ObjectData {
    #[serde(rename = "Price", default, skip_serializing_if = "Option::is_none")]
    pub price: Option<Value>,
    #[serde(rename = "CPUModel", default, skip_serializing_if = "Option::is_none")]
    pub cpu_model: Option<Value>,
    #[serde(rename = "Capacity", default, skip_serializing_if = "Option::is_none")]
    pub capacity: Option<Value>,
    #[serde(rename = "Year", default, skip_serializing_if = "Option::is_none")]
    pub year: Option<Value>,
}

/// Request body for `POST /objects` and `PUT /objects/{id}`.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct ObjectBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<Value>,
    pub data: ObjectData,
}

impl ObjectBody {
    pub fn from_fixture(row: &FixtureRow) -> Self {
        Self {
            name: row.name.clone(),
            data: ObjectData {
                price: row.price.clone(),
                cpu_model: row.cpu_model.clone(),
                capacity: row.capacity.clone(),
                year: row.year.clone(),
            },
        }
    }
}

impl From<&FixtureRow> for ObjectBody {
    fn from(row: &FixtureRow) -> Self {
        Self::from_fixture(row)
    }
}

/// An object as returned by the API. `data` is free-form on the server side.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct RemoteObject {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(rename = "createdAt", default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(rename = "updatedAt", default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

/// Body of a successful `DELETE /objects/{id}`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct DeleteResponse {
    pub message: String,
}

/// Error body returned for unknown objects and unknown routes.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ErrorResponse {
    pub error: String,
}
