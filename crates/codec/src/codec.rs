//! Value encoding and decoding
//!
//! ## Formats
//!
//! - **Json**: `serde_json` text. Rejects raw bytes and non-finite floats
//!   anywhere in the value graph rather than silently rewriting them.
//! - **Native**: MessagePack of the full [`Value`] model via `rmp-serde`.
//!   Accepts every value and round-trips it exactly.
//! - **Bytes**: `Value::Bytes` stored verbatim.
//! - **Utf8**: `Value::String` stored as its UTF-8 bytes.
//!
//! Validation happens inside `encode`, so a value that cannot be
//! represented is rejected before anything is handed to a provider.

use crate::error::{CodecError, CodecResult};
use stratakv_core::{Format, Value};

/// Encode a value in the given format
///
/// # Errors
///
/// Returns [`CodecError::Unrepresentable`] when the value's shape cannot be
/// represented in `format`, and [`CodecError::Encode`] if the serializer
/// itself fails.
pub fn encode(value: &Value, format: Format) -> CodecResult<Vec<u8>> {
    match format {
        Format::Json => {
            let json = to_json(value)?;
            serde_json::to_vec(&json).map_err(|e| CodecError::Encode {
                format,
                reason: e.to_string(),
            })
        }
        Format::Native => rmp_serde::to_vec(value).map_err(|e| CodecError::Encode {
            format,
            reason: e.to_string(),
        }),
        Format::Bytes => match value {
            Value::Bytes(bytes) => Ok(bytes.clone()),
            other => Err(CodecError::unrepresentable(
                format,
                format!("expected Bytes, got {}", other.type_name()),
            )),
        },
        Format::Utf8 => match value {
            Value::String(s) => Ok(s.as_bytes().to_vec()),
            other => Err(CodecError::unrepresentable(
                format,
                format!("expected String, got {}", other.type_name()),
            )),
        },
    }
}

/// Decode bytes stored in the given format
///
/// Exact inverse of [`encode`] for `Json`, `Native` and `Bytes`; `Utf8`
/// requires the bytes to be valid UTF-8.
pub fn decode(bytes: &[u8], format: Format) -> CodecResult<Value> {
    match format {
        Format::Json => serde_json::from_slice::<serde_json::Value>(bytes)
            .map(from_json)
            .map_err(|e| CodecError::Decode {
                format,
                reason: e.to_string(),
            }),
        Format::Native => rmp_serde::from_slice(bytes).map_err(|e| CodecError::Decode {
            format,
            reason: e.to_string(),
        }),
        Format::Bytes => Ok(Value::Bytes(bytes.to_vec())),
        Format::Utf8 => std::str::from_utf8(bytes)
            .map(|s| Value::String(s.to_string()))
            .map_err(|e| CodecError::Decode {
                format,
                reason: e.to_string(),
            }),
    }
}

/// Decode bytes tagged with a provider flag word
///
/// Returns the decoded value together with the format the flags named.
pub fn decode_flags(bytes: &[u8], flags: u32) -> CodecResult<(Value, Format)> {
    let format = Format::from_flags(flags).ok_or(CodecError::UnknownFlags(flags))?;
    decode(bytes, format).map(|value| (value, format))
}

/// Check that a value is representable in a format without encoding it
pub fn validate(value: &Value, format: Format) -> CodecResult<()> {
    match format {
        Format::Json => check_json(value),
        Format::Native => Ok(()),
        Format::Bytes | Format::Utf8 => encode(value, format).map(|_| ()),
    }
}

fn check_json(value: &Value) -> CodecResult<()> {
    match value {
        Value::Bytes(_) => Err(CodecError::unrepresentable(
            Format::Json,
            "raw bytes have no JSON representation",
        )),
        Value::Float(f) if !f.is_finite() => Err(CodecError::unrepresentable(
            Format::Json,
            format!("non-finite float {} has no JSON representation", f),
        )),
        Value::Array(items) => items.iter().try_for_each(check_json),
        Value::Object(fields) => fields.values().try_for_each(check_json),
        _ => Ok(()),
    }
}

fn to_json(value: &Value) -> CodecResult<serde_json::Value> {
    Ok(match value {
        Value::Null => serde_json::Value::Null,
        Value::Bool(b) => serde_json::Value::Bool(*b),
        Value::Int(i) => serde_json::Value::Number((*i).into()),
        Value::Float(f) => serde_json::Number::from_f64(*f)
            .map(serde_json::Value::Number)
            .ok_or_else(|| {
                CodecError::unrepresentable(
                    Format::Json,
                    format!("non-finite float {} has no JSON representation", f),
                )
            })?,
        Value::String(s) => serde_json::Value::String(s.clone()),
        Value::Bytes(_) => {
            return Err(CodecError::unrepresentable(
                Format::Json,
                "raw bytes have no JSON representation",
            ))
        }
        Value::Array(items) => {
            serde_json::Value::Array(items.iter().map(to_json).collect::<CodecResult<_>>()?)
        }
        Value::Object(fields) => serde_json::Value::Object(
            fields
                .iter()
                .map(|(k, v)| -> CodecResult<(String, serde_json::Value)> {
                    Ok((k.clone(), to_json(v)?))
                })
                .collect::<CodecResult<_>>()?,
        ),
    })
}

fn from_json(json: serde_json::Value) -> Value {
    match json {
        serde_json::Value::Null => Value::Null,
        serde_json::Value::Bool(b) => Value::Bool(b),
        serde_json::Value::Number(n) => match n.as_i64() {
            Some(i) => Value::Int(i),
            // u64 above i64::MAX and true floats
            None => Value::Float(n.as_f64().unwrap_or(f64::NAN)),
        },
        serde_json::Value::String(s) => Value::String(s),
        serde_json::Value::Array(items) => Value::Array(items.into_iter().map(from_json).collect()),
        serde_json::Value::Object(fields) => {
            Value::Object(fields.into_iter().map(|(k, v)| (k, from_json(v))).collect())
        }
    }
}
