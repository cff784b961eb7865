use std::fmt::Display;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One worksheet row keyed by column header. Empty cells are absent.
pub type Row = Map<String, Value>;

/// Input values for one test case, as read from the `Add_data` sheet.
///
/// Every field is optional: a blank cell leaves the field undefined and it is
/// left out of any request body built from the row.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct FixtureRow {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<Value>,
    #[serde(rename = "cPUModel", default, skip_serializing_if = "Option::is_none")]
    pub cpu_model: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capacity: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<Value>,
}

impl FixtureRow {
    /// Build a typed row from a raw sheet row. Unknown columns are ignored.
    pub fn from_row(row: &Row) -> Result<Self, serde_json::Error> {
        serde_json::from_value(Value::Object(row.clone()))
    }

    /// Copy of this row with `price` replaced.
    pub fn with_price(&self, price: impl Into<Value>) -> Self {
        Self {
            price: Some(price.into()),
            ..self.clone()
        }
    }
}

impl Display for FixtureRow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let json = serde_json::to_string(self).map_err(|_| std::fmt::Error)?;
        write!(f, "{}", json)
    }
}
