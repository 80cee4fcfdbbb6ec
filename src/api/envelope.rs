//! The API's response wrapper: `{ "status": 200, "result": ... }` on success,
//! `{ "status": 404, "error": "..." }` otherwise.

use serde_json::Value;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Envelope {
    pub status: Option<i64>,
    /// `null` results are treated as absent.
    pub result: Option<Value>,
    pub error: Option<String>,
}

impl Envelope {
    pub fn from_value(v: &Value) -> Self {
        Self {
            status: v.get("status").and_then(Value::as_i64),
            result: v.get("result").filter(|r| !r.is_null()).cloned(),
            error: v.get("error").and_then(Value::as_str).map(str::to_string),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.status == Some(200)
    }

    /// Non-empty array result, if that is what came back.
    pub fn items(&self) -> Option<&Vec<Value>> {
        self.result
            .as_ref()
            .and_then(Value::as_array)
            .filter(|items| !items.is_empty())
    }

    /// The API's own message, or the caller's fallback.
    pub fn error_or(&self, fallback: impl Into<String>) -> String {
        self.error.clone().unwrap_or_else(|| fallback.into())
    }
}
