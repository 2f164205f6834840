//! Address/value codec
//!
//! Converts between human-supplied notations and the canonical wire
//! representation. Encoding failures are validation errors raised before
//! any request is sent; decoding failures mean the remote broke its
//! contract and surface as protocol violations.

mod pattern;
mod value;

pub use pattern::AobPattern;
pub use value::{decode_typed_value, encode_read_request, encode_write_request};

use crate::core::types::{Address, BridgeError, BridgeResult};

/// Wire payload fragment: a set of JSON fields merged into a request body.
pub type WirePayload = serde_json::Map<String, serde_json::Value>;

/// Encodes an address into its wire form.
///
/// Literals are rendered as prefixed hex; symbolic expressions pass through
/// verbatim for remote resolution.
pub fn encode_address(address: &Address) -> serde_json::Value {
    serde_json::Value::String(address.to_string())
}

/// Decodes an address from a wire value (hex string, decimal string, or
/// JSON number).
pub fn decode_address(value: &serde_json::Value) -> BridgeResult<Address> {
    match value {
        serde_json::Value::String(s) => s.parse(),
        serde_json::Value::Number(n) => n
            .as_u64()
            .map(Address::Literal)
            .ok_or_else(|| BridgeError::InvalidAddress(n.to_string())),
        other => Err(BridgeError::InvalidAddress(other.to_string())),
    }
}
