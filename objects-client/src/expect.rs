//! Field-level assertions on JSON response bodies.
//!
//! Fields are addressed with dotted paths (`data.Price`). A path that does not
//! resolve is *undefined*; an explicit JSON `null` is defined.

use serde_json::Value;

use crate::api::ApiResponse;

#[derive(Debug, thiserror::Error)]
pub enum AssertionError {
    #[error("expected status {expected}, received {actual}")]
    Status { expected: u16, actual: u16 },

    #[error("expected {field} to be {expected}, received {actual}")]
    NotEqual {
        field: String,
        expected: String,
        actual: String,
    },

    #[error("expected {field} to be defined")]
    Undefined { field: String },

    #[error("expected {field} to contain {needle:?}, received {actual}")]
    NotContained {
        field: String,
        needle: String,
        actual: String,
    },
}

fn show(value: Option<&Value>) -> String {
    match value {
        Some(v) => v.to_string(),
        None => "undefined".to_string(),
    }
}

/// Resolve a dotted path inside `body`.
pub fn field<'a>(body: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.').try_fold(body, |node, key| node.get(key))
}

pub fn status_to_be(res: &ApiResponse, expected: u16) -> Result<(), AssertionError> {
    let actual = res.status();
    if actual == expected {
        Ok(())
    } else {
        Err(AssertionError::Status { expected, actual })
    }
}

// JSON numbers compare by value, so `2019` matches an echoed `2019.0`.
fn same_value(actual: Option<&Value>, expected: Option<&Value>) -> bool {
    match (actual, expected) {
        (Some(Value::Number(a)), Some(Value::Number(b))) => a.as_f64() == b.as_f64(),
        _ => actual == expected,
    }
}

/// Strict equality, with undefined only equal to undefined and numbers
/// compared by value.
pub fn to_be(body: &Value, path: &str, expected: Option<&Value>) -> Result<(), AssertionError> {
    value_to_be(path, field(body, path), expected)
}

pub fn value_to_be(
    name: &str,
    actual: Option<&Value>,
    expected: Option<&Value>,
) -> Result<(), AssertionError> {
    if same_value(actual, expected) {
        Ok(())
    } else {
        Err(AssertionError::NotEqual {
            field: name.to_string(),
            expected: show(expected),
            actual: show(actual),
        })
    }
}

pub fn to_be_defined(name: &str, actual: Option<&Value>) -> Result<(), AssertionError> {
    match actual {
        Some(_) => Ok(()),
        None => Err(AssertionError::Undefined {
            field: name.to_string(),
        }),
    }
}

/// Substring match on a string field.
pub fn to_contain(body: &Value, path: &str, needle: &str) -> Result<(), AssertionError> {
    let actual = field(body, path);
    match actual.and_then(Value::as_str) {
        Some(s) if s.contains(needle) => Ok(()),
        _ => Err(AssertionError::NotContained {
            field: path.to_string(),
            needle: needle.to_string(),
            actual: show(actual),
        }),
    }
}
