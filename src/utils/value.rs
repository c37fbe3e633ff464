use serde_json::Value;

/// Render a scalar JSON value as the plain string used for label values.
///
/// Strings are passed through unchanged; escaping is left to the exposition layer.
pub fn value_to_string(value: Value) -> String {
    match value {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
