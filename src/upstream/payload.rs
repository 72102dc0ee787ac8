//! Outbound payload construction
//!
//! The inbound body is treated as opaque JSON: only `model`, `max_tokens`
//! and `messages` are picked out, and none of them is validated.

use serde::Serialize;
use serde_json::Value;

/// Body sent to the upstream messages endpoint
///
/// Field order is the wire order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MessagesPayload {
    pub model: Value,
    pub max_tokens: Value,
    pub messages: Value,
}

impl MessagesPayload {
    /// Build the payload from an inbound request, substituting defaults for
    /// fields that are absent or hold a falsy value (`null`, `false`, `0`, `""`).
    /// A non-object request yields all defaults.
    pub fn from_request(request: &Value, default_model: &str, default_max_tokens: u64) -> Self {
        Self {
            model: field_or(request, "model", || Value::from(default_model)),
            max_tokens: field_or(request, "max_tokens", || Value::from(default_max_tokens)),
            messages: field_or(request, "messages", || Value::Array(Vec::new())),
        }
    }

    pub fn to_bytes(&self) -> serde_json::Result<Vec<u8>> {
        serde_json::to_vec(self)
    }
}

fn field_or(request: &Value, key: &str, default: impl FnOnce() -> Value) -> Value {
    request
        .get(key)
        .filter(|v| is_truthy(v))
        .map(integral_numbers)
        .unwrap_or_else(default)
}

/// Copy `value`, rewriting floats with no fractional part as integers.
///
/// `1e3` and `1000.0` parse as floats but go out as `1000`.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::float_cmp
)]
fn integral_numbers(value: &Value) -> Value {
    const U64_END: f64 = 18_446_744_073_709_551_616.0;
    const I64_MIN: f64 = -9_223_372_036_854_775_808.0;

    match value {
        Value::Number(n) if n.is_f64() => match n.as_f64() {
            Some(f) if f.fract() == 0.0 && (0.0..U64_END).contains(&f) => Value::from(f as u64),
            Some(f) if f.fract() == 0.0 && (I64_MIN..0.0).contains(&f) => Value::from(f as i64),
            _ => value.clone(),
        },
        Value::Array(items) => Value::Array(items.iter().map(integral_numbers).collect()),
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(k, v)| (k.clone(), integral_numbers(v)))
                .collect(),
        ),
        _ => value.clone(),
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const MODEL: &str = "claude-sonnet-4-20250514";

    fn shape(request: &Value) -> Value {
        serde_json::to_value(MessagesPayload::from_request(request, MODEL, 1024)).unwrap()
    }

    #[test]
    fn test_defaults_for_missing_fields() {
        let request = json!({"messages": [{"role": "user", "content": "hi"}]});
        let bytes = MessagesPayload::from_request(&request, MODEL, 1024)
            .to_bytes()
            .unwrap();
        assert_eq!(
            String::from_utf8(bytes).unwrap(),
            r#"{"model":"claude-sonnet-4-20250514","max_tokens":1024,"messages":[{"role":"user","content":"hi"}]}"#
        );
    }

    #[test]
    fn test_explicit_fields_pass_through() {
        let request = json!({
            "model": "claude-3-haiku",
            "max_tokens": 64,
            "messages": [{"role": "user", "content": [{"type": "text", "text": "x"}]}],
            "temperature": 0.2
        });
        assert_eq!(
            shape(&request),
            json!({
                "model": "claude-3-haiku",
                "max_tokens": 64,
                "messages": [{"role": "user", "content": [{"type": "text", "text": "x"}]}]
            })
        );
    }

    #[test]
    fn test_falsy_values_replaced() {
        let request = json!({"model": "", "max_tokens": 0, "messages": null});
        assert_eq!(
            shape(&request),
            json!({"model": MODEL, "max_tokens": 1024, "messages": []})
        );
    }

    #[test]
    fn test_unexpected_types_not_validated() {
        let request = json!({"model": 7, "max_tokens": "lots", "messages": {"role": "user"}});
        assert_eq!(shape(&request), request);
    }

    #[test]
    fn test_integral_floats_sent_as_integers() {
        let request: Value =
            serde_json::from_str(r#"{"max_tokens":1e3,"messages":[{"n":2.0,"t":1.5,"z":-0.0}]}"#)
                .unwrap();
        let bytes = MessagesPayload::from_request(&request, MODEL, 1024)
            .to_bytes()
            .unwrap();
        assert_eq!(
            String::from_utf8(bytes).unwrap(),
            r#"{"model":"claude-sonnet-4-20250514","max_tokens":1000,"messages":[{"n":2,"t":1.5,"z":0}]}"#
        );
    }

    #[test]
    fn test_non_object_request_uses_defaults() {
        let expected = json!({"model": MODEL, "max_tokens": 1024, "messages": []});
        assert_eq!(shape(&json!([1, 2])), expected);
        assert_eq!(shape(&json!("text")), expected);
        assert_eq!(shape(&Value::Null), expected);
    }
}
