//! Typed value encoding and decoding
//!
//! Integers are range-checked against the requested width and signedness
//! before transmission; wrapping is never silent. Floats are IEEE-754
//! single/double with no rounding beyond native precision loss. String
//! length caps pass through unmodified.

use super::WirePayload;
use crate::core::types::{BridgeError, BridgeResult, IntWidth, Locality, TypedValue, ValueKind};
use serde_json::{json, Value};

/// Parses a signed/unsigned integer literal, accepting decimal and
/// `0x`-prefixed hex with an optional leading minus.
fn parse_int_literal(kind: &ValueKind, raw: &str) -> BridgeResult<i128> {
    let t = raw.trim();
    let (negative, body) = match t.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, t),
    };
    let parsed = if let Some(hex) = body.strip_prefix("0x").or_else(|| body.strip_prefix("0X")) {
        i128::from_str_radix(hex, 16)
    } else {
        body.parse::<i128>()
    };
    let magnitude = parsed.map_err(|_| BridgeError::bad_literal(kind.describe(), raw))?;
    Ok(if negative { -magnitude } else { magnitude })
}

/// Inclusive representable range for an integer width/signedness.
fn int_bounds(width: IntWidth, signed: bool) -> (i128, i128) {
    match (width, signed) {
        (IntWidth::W16, true) => (i16::MIN as i128, i16::MAX as i128),
        (IntWidth::W16, false) => (0, u16::MAX as i128),
        (IntWidth::W32, true) => (i32::MIN as i128, i32::MAX as i128),
        (IntWidth::W32, false) => (0, u32::MAX as i128),
        (IntWidth::W64, true) => (i64::MIN as i128, i64::MAX as i128),
        (IntWidth::W64, false) => (0, u64::MAX as i128),
    }
}

fn check_int_range(kind: &ValueKind, width: IntWidth, signed: bool, v: i128) -> BridgeResult<i128> {
    let (min, max) = int_bounds(width, signed);
    if v < min || v > max {
        return Err(BridgeError::out_of_range(kind.describe(), v));
    }
    Ok(v)
}

fn int_to_json(v: i128) -> Value {
    if v >= 0 {
        json!(v as u64)
    } else {
        json!(v as i64)
    }
}

/// Parses a byte-sequence literal: hex digits, optionally whitespace or
/// comma separated, whose decoded length must match the declared count.
fn parse_byte_literal(raw: &str, count: usize) -> BridgeResult<Vec<u8>> {
    let compact: String = raw
        .chars()
        .filter(|c| !c.is_whitespace() && *c != ',')
        .collect();
    let bytes =
        hex::decode(&compact).map_err(|e| BridgeError::InvalidPattern(format!("{}: {}", raw, e)))?;
    if bytes.len() != count {
        return Err(BridgeError::InvalidPattern(format!(
            "expected {} bytes, literal has {}",
            count,
            bytes.len()
        )));
    }
    Ok(bytes)
}

/// Encodes a write request payload: wire tag, value, and the modifiers the
/// kind accepts. The locality is explicit and selects the wire tag.
pub fn encode_write_request(
    kind: &ValueKind,
    raw_value: &str,
    locality: Locality,
) -> BridgeResult<WirePayload> {
    let mut payload = WirePayload::new();
    payload.insert("dataType".into(), json!(kind.wire_tag(locality)));

    match kind {
        ValueKind::Int { width, signed } => {
            let v = parse_int_literal(kind, raw_value)?;
            let v = check_int_range(kind, *width, *signed, v)?;
            payload.insert("value".into(), int_to_json(v));
            payload.insert("signed".into(), json!(*signed));
        }
        ValueKind::Pointer => {
            let v = parse_int_literal(kind, raw_value)?;
            let v = check_int_range(kind, IntWidth::W64, false, v)?;
            payload.insert("value".into(), int_to_json(v));
        }
        ValueKind::F32 => {
            let v: f32 = raw_value
                .trim()
                .parse()
                .map_err(|_| BridgeError::bad_literal("f32", raw_value))?;
            payload.insert("value".into(), json!(v));
        }
        ValueKind::F64 => {
            let v: f64 = raw_value
                .trim()
                .parse()
                .map_err(|_| BridgeError::bad_literal("f64", raw_value))?;
            payload.insert("value".into(), json!(v));
        }
        ValueKind::Bytes { count, .. } => {
            let bytes = parse_byte_literal(raw_value, *count)?;
            payload.insert("byteValues".into(), json!(bytes));
            payload.insert("byteCount".into(), json!(count));
        }
        ValueKind::Str { max_length, wide } => {
            payload.insert("value".into(), json!(raw_value));
            payload.insert("maxLength".into(), json!(max_length));
            payload.insert("wideChar".into(), json!(*wide));
        }
    }

    Ok(payload)
}

/// Encodes a read request payload: wire tag plus the shape parameters the
/// kind demands (byte count, string length cap, table hint).
pub fn encode_read_request(kind: &ValueKind, locality: Locality) -> BridgeResult<WirePayload> {
    let mut payload = WirePayload::new();
    payload.insert("dataType".into(), json!(kind.wire_tag(locality)));

    match kind {
        ValueKind::Int { signed, .. } => {
            payload.insert("signed".into(), json!(*signed));
        }
        ValueKind::Pointer | ValueKind::F32 | ValueKind::F64 => {}
        ValueKind::Bytes { count, as_table } => {
            if *count == 0 {
                return Err(BridgeError::MissingParameter {
                    parameter: "byteCount",
                    context: "bytes read",
                });
            }
            payload.insert("byteCount".into(), json!(count));
            payload.insert("returnAsTable".into(), json!(*as_table));
        }
        ValueKind::Str { max_length, wide } => {
            if *max_length == 0 {
                return Err(BridgeError::MissingParameter {
                    parameter: "maxLength",
                    context: "string read",
                });
            }
            payload.insert("maxLength".into(), json!(max_length));
            payload.insert("wideChar".into(), json!(*wide));
        }
    }

    Ok(payload)
}

fn decode_int(kind: &ValueKind, width: IntWidth, signed: bool, value: &Value) -> BridgeResult<i128> {
    let v = match value {
        Value::Number(n) => {
            if let Some(u) = n.as_u64() {
                u as i128
            } else if let Some(i) = n.as_i64() {
                i as i128
            } else {
                return Err(BridgeError::bad_literal(kind.describe(), n));
            }
        }
        Value::String(s) => parse_int_literal(kind, s)?,
        other => return Err(BridgeError::bad_literal(kind.describe(), other)),
    };
    // The value came from a response, not the caller: a width mismatch is
    // the remote breaking its contract.
    check_int_range(kind, width, signed, v).map_err(|_| {
        BridgeError::ProtocolInvariant(format!(
            "remote returned {} which does not fit {}",
            v,
            kind.describe()
        ))
    })
}

fn decode_f64(kind: &ValueKind, value: &Value) -> BridgeResult<f64> {
    match value {
        Value::Number(n) => n
            .as_f64()
            .ok_or_else(|| BridgeError::bad_literal(kind.describe(), n)),
        Value::String(s) => s
            .trim()
            .parse()
            .map_err(|_| BridgeError::bad_literal(kind.describe(), s)),
        other => Err(BridgeError::bad_literal(kind.describe(), other)),
    }
}

fn decode_bytes(value: &Value) -> BridgeResult<Vec<u8>> {
    match value {
        Value::Array(items) => items
            .iter()
            .map(|item| {
                item.as_u64()
                    .filter(|b| *b <= u8::MAX as u64)
                    .map(|b| b as u8)
                    .ok_or_else(|| {
                        BridgeError::ProtocolInvariant(format!(
                            "remote returned invalid byte {}",
                            item
                        ))
                    })
            })
            .collect(),
        Value::String(s) => {
            let compact: String = s.chars().filter(|c| !c.is_whitespace()).collect();
            hex::decode(&compact).map_err(|e| BridgeError::InvalidPattern(format!("{}: {}", s, e)))
        }
        other => Err(BridgeError::bad_literal("bytes", other)),
    }
}

/// Decodes a read result into a [`TypedValue`] of the requested kind.
pub fn decode_typed_value(kind: &ValueKind, value: &Value) -> BridgeResult<TypedValue> {
    match kind {
        ValueKind::Int { width, signed } => {
            let v = decode_int(kind, *width, *signed, value)?;
            Ok(match (width, signed) {
                (IntWidth::W16, true) => TypedValue::I16(v as i16),
                (IntWidth::W16, false) => TypedValue::U16(v as u16),
                (IntWidth::W32, true) => TypedValue::I32(v as i32),
                (IntWidth::W32, false) => TypedValue::U32(v as u32),
                (IntWidth::W64, true) => TypedValue::I64(v as i64),
                (IntWidth::W64, false) => TypedValue::U64(v as u64),
            })
        }
        ValueKind::Pointer => {
            let v = match value {
                Value::String(s) => s
                    .parse::<crate::core::types::Address>()?
                    .canonical()
                    .ok_or_else(|| BridgeError::bad_literal("pointer", s))?
                    as i128,
                other => decode_int(kind, IntWidth::W64, false, other)?,
            };
            Ok(TypedValue::Pointer(v as u64))
        }
        ValueKind::F32 => Ok(TypedValue::F32(decode_f64(kind, value)? as f32)),
        ValueKind::F64 => Ok(TypedValue::F64(decode_f64(kind, value)?)),
        ValueKind::Bytes { .. } => Ok(TypedValue::Bytes(decode_bytes(value)?)),
        ValueKind::Str { .. } => match value {
            Value::String(s) => Ok(TypedValue::Str(s.clone())),
            other => Err(BridgeError::bad_literal("string", other)),
        },
    }
}
