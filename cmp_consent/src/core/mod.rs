use crate::vendors::MalformedPayload;
use percent_encoding::percent_decode_str;
use log::trace;
use serde_json::{Map, Value};

mod base64;

pub(crate) trait DecodeExt {
    /// Decodes percent-encoded sequences, rejecting malformed escapes and invalid UTF-8.
    fn decode_uri_component(&self) -> Result<String, MalformedPayload>;

    /// Decodes Base64 in either the standard or the URL-safe alphabet, padding optional.
    fn decode_base64(&self) -> Result<Vec<u8>, MalformedPayload>;
}

impl DecodeExt for str {
    fn decode_uri_component(&self) -> Result<String, MalformedPayload> {
        if let Some(offset) = invalid_escape_offset(self) {
            return Err(MalformedPayload::InvalidPercentEncoding { offset });
        }

        Ok(percent_decode_str(self).decode_utf8()?.into_owned())
    }

    fn decode_base64(&self) -> Result<Vec<u8>, MalformedPayload> {
        Ok(base64::decode(self)?)
    }
}

// every '%' must be followed by two hex digits
fn invalid_escape_offset(s: &str) -> Option<usize> {
    let bytes = s.as_bytes();
    bytes
        .iter()
        .enumerate()
        .filter(|&(_, &b)| b == b'%')
        .map(|(i, _)| i)
        .find(|&i| {
            !matches!(
                bytes.get(i + 1..i + 3),
                Some([hi, lo]) if hi.is_ascii_hexdigit() && lo.is_ascii_hexdigit()
            )
        })
}

/// A JSON object, as found in the payload of most vendor cookies.
///
/// Fields are read one by one with an explicit expected type. A field which is `null` or
/// holds a value of another type is treated as absent, without affecting the other fields.
#[derive(Debug, Default, PartialEq)]
pub(crate) struct JsonObject(Map<String, Value>);

impl JsonObject {
    /// Parses a JSON document which must be an object.
    ///
    /// Duplicate keys are resolved by keeping the last one.
    pub(crate) fn parse(bytes: &[u8]) -> Result<Self, MalformedPayload> {
        match serde_json::from_slice::<Value>(bytes)? {
            Value::Object(map) => Ok(Self(map)),
            value => Err(MalformedPayload::NotAnObject {
                found: json_kind(&value),
            }),
        }
    }

    pub(crate) fn bool_field(&self, key: &str) -> Option<bool> {
        match self.field(key, "boolean")? {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub(crate) fn object_field(&self, key: &str) -> Option<JsonObject> {
        match self.field(key, "object")? {
            Value::Object(map) => Some(Self(map.clone())),
            _ => None,
        }
    }

    // non-null value of key, logging those of an unexpected type
    fn field(&self, key: &str, expected: &str) -> Option<&Value> {
        let value = self.0.get(key).filter(|v| !v.is_null())?;
        let found = json_kind(value);
        if found != expected {
            trace!("ignoring field {key:?}: expected {expected}, found {found}");
            return None;
        }

        Some(value)
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
