//! JSON interop for inspecting and authoring dictionary blobs.
//!
//! JSON and dictionary values line up closely, with two gaps: JSON booleans
//! have no dictionary kind, and unsigned integers above `i64::MAX` cannot be
//! stored as an Integer. Both are rejected rather than coerced.

use std::collections::BTreeMap;

use serde::ser::{Serialize, Serializer};

use crate::decoder::decode;
use crate::encoder::encode;
use crate::error::{DictError, Result};
use crate::format::IndexWidth;
use crate::types::Value;

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Dictionary(map) => serializer.collect_map(map),
            Value::Array(items) => serializer.collect_seq(items),
            Value::String(s) => serializer.serialize_str(s),
            Value::Integer(n) => serializer.serialize_i64(*n),
            Value::Float(f) => serializer.serialize_f64(*f),
        }
    }
}

impl TryFrom<serde_json::Value> for Value {
    type Error = DictError;

    fn try_from(json: serde_json::Value) -> Result<Self> {
        match json {
            serde_json::Value::Null => Ok(Value::Null),
            serde_json::Value::Bool(b) => Err(DictError::UnsupportedJson(format!(
                "boolean {} has no dictionary kind",
                b
            ))),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Ok(Value::Integer(i))
                } else if n.is_u64() {
                    Err(DictError::UnsupportedJson(format!(
                        "integer {} exceeds the signed 64-bit range",
                        n
                    )))
                } else {
                    n.as_f64().map(Value::Float).ok_or_else(|| {
                        DictError::UnsupportedJson(format!("number {} is not representable", n))
                    })
                }
            }
            serde_json::Value::String(s) => Ok(Value::String(s)),
            serde_json::Value::Array(items) => items
                .into_iter()
                .map(Value::try_from)
                .collect::<Result<Vec<_>>>()
                .map(Value::Array),
            serde_json::Value::Object(map) => map
                .into_iter()
                .map(|(k, v)| Value::try_from(v).map(|v| (k, v)))
                .collect::<Result<BTreeMap<_, _>>>()
                .map(Value::Dictionary),
        }
    }
}

/// Parse a JSON document and encode it as a dictionary blob.
pub fn encode_json(json: &str, width: IndexWidth) -> Result<Vec<u8>> {
    let parsed: serde_json::Value = serde_json::from_str(json)?;
    let value = Value::try_from(parsed)?;
    encode(&value, width)
}

/// Decode a dictionary blob and render it as compact JSON.
///
/// Non-finite floats render as `null`, since JSON has no spelling for them.
pub fn decode_to_json(bytes: &[u8], width: IndexWidth) -> Result<String> {
    let value = decode(bytes, width)?;
    Ok(serde_json::to_string(&value)?)
}
