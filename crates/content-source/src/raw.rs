use serde_json::{Map, Value};

use crate::UpstreamError;

/// A parsed upstream JSON object, before any discrimination has happened.
///
/// Accessors that start with `require_` treat a missing or mistyped field as
/// [`UpstreamError::Malformed`]; the `_field` accessors are for fields the
/// caller is prepared to see absent.
#[derive(Debug, Clone)]
pub struct RawContent(Map<String, Value>);

impl RawContent {
    pub fn from_value(value: Value) -> Result<RawContent, UpstreamError> {
        match value {
            Value::Object(map) => Ok(RawContent(map)),
            other => Err(UpstreamError::Malformed(format!(
                "expected a JSON object, got {}",
                type_name(&other)
            ))),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    pub fn str_field(&self, name: &str) -> Option<&str> {
        self.0.get(name).and_then(Value::as_str)
    }

    pub fn require_i64(&self, name: &str) -> Result<i64, UpstreamError> {
        self.0
            .get(name)
            .and_then(Value::as_i64)
            .ok_or_else(|| missing(name, "integer"))
    }

    pub fn require_str(&self, name: &str) -> Result<&str, UpstreamError> {
        self.0
            .get(name)
            .and_then(Value::as_str)
            .ok_or_else(|| missing(name, "string"))
    }

    pub fn require_bool(&self, name: &str) -> Result<bool, UpstreamError> {
        self.0
            .get(name)
            .and_then(Value::as_bool)
            .ok_or_else(|| missing(name, "boolean"))
    }

    pub fn require_object(&self, name: &str) -> Result<RawContent, UpstreamError> {
        self.0
            .get(name)
            .and_then(Value::as_object)
            .map(|map| RawContent(map.clone()))
            .ok_or_else(|| missing(name, "object"))
    }
}

fn missing(name: &str, expected: &str) -> UpstreamError {
    UpstreamError::Malformed(format!("missing or mistyped field `{name}` (expected {expected})"))
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn rejects_non_objects() {
        let err = RawContent::from_value(json!([1, 2])).unwrap_err();
        assert!(matches!(err, UpstreamError::Malformed(_)));
    }

    #[test]
    fn required_accessors_report_the_field() {
        let raw = RawContent::from_value(json!({ "id": "not a number" })).unwrap();
        let err = raw.require_i64("id").unwrap_err();
        assert_eq!(
            err.to_string(),
            "unexpected upstream payload: missing or mistyped field `id` (expected integer)"
        );
    }

    #[test]
    fn optional_accessors_return_none() {
        let raw = RawContent::from_value(json!({ "discriminator": 42 })).unwrap();
        assert_eq!(raw.str_field("discriminator"), None);
        assert_eq!(raw.str_field("type"), None);
    }
}
