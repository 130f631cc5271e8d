//! Raw inbound payload and checked field access.

use serde_json::{Map, Value};

use crate::event::error::{EventError, EventResult};

/// Untyped key/value mapping decoded straight from the request body.
pub type RawPayload = Map<String, Value>;

/// Decode a request body into a [`RawPayload`].
///
/// Anything other than a JSON object (arrays, scalars, `null`) is rejected.
pub fn decode_payload(body: &[u8]) -> EventResult<RawPayload> {
    Ok(serde_json::from_slice(body)?)
}

/// Read `key` from the payload, requiring a string value.
pub fn lookup_str<'a>(payload: &'a RawPayload, key: &str) -> EventResult<&'a str> {
    match payload.get(key) {
        Some(Value::String(s)) => Ok(s.as_str()),
        Some(other) => Err(EventError::NotAString {
            field: key.to_string(),
            found: json_type_name(other),
        }),
        None => Err(EventError::MissingField(key.to_string())),
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
