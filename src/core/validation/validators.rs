//! Reusable field validators
//!
//! Each validator is a closure taking the field name and its JSON value and
//! producing a human-readable message on violation. A field absent from the
//! payload is validated as `null`.

use serde_json::Value;

/// Validator: field must be a non-empty string.
///
/// Missing, null and empty values all read as "not filled in" to the user,
/// so they share the required-field message.
pub fn non_empty_string() -> impl Fn(&str, &Value) -> Result<(), String> + Send + Sync + Clone {
    |field: &str, value: &Value| match value {
        Value::Null => Err(format!("'{}' is a required field", field)),
        Value::String(s) if s.is_empty() => Err(format!("'{}' is a required field", field)),
        Value::String(_) => Ok(()),
        _ => Err(format!("'{}' must be a string", field)),
    }
}

/// Validator: field must be an integer-valued number.
///
/// A float with no fractional part counts as an integer; `2024.5` does not.
pub fn integer() -> impl Fn(&str, &Value) -> Result<(), String> + Send + Sync + Clone {
    |field: &str, value: &Value| {
        if value.is_null() {
            return Err(format!("'{}' is a required field", field));
        }
        let Some(num) = value.as_f64() else {
            return Err(format!("'{}' must be a number", field));
        };
        if num.fract() != 0.0 {
            return Err(format!("'{}' must be an integer", field));
        }
        Ok(())
    }
}

/// Validator: field is optional (always valid)
pub fn optional() -> impl Fn(&str, &Value) -> Result<(), String> + Send + Sync + Clone {
    |_: &str, _: &Value| Ok(())
}
