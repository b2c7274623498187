//! Raw parameter conversion shared by the REST and JSON-RPC adapters.
//!
//! Services validate raw strings, so adapters only flatten JSON values into
//! their textual form and leave range and enum checks to the domain.

use serde_json::Value;

/// Convert a JSON value into the raw string handed to domain validation.
///
/// - `null` counts as absent.
/// - Strings are used as-is.
/// - Numbers use their JSON text, so `7` and `"7"` validate identically.
/// - Booleans, arrays, and objects become their JSON text and are then
///   rejected by field validation.
///
/// # Examples
/// ```
/// use serde_json::json;
/// use service_desk::inbound::http::validation::raw_from_value;
///
/// assert_eq!(raw_from_value(&json!(42)), Some("42".to_owned()));
/// assert_eq!(raw_from_value(&json!(null)), None);
/// ```
pub fn raw_from_value(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        other => Some(other.to_string()),
    }
}

/// [`raw_from_value`] over an optional value.
pub fn raw_from_optional(value: Option<&Value>) -> Option<String> {
    value.and_then(raw_from_value)
}
