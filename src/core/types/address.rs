//! Memory address type with hex, decimal, and symbolic notations
//!
//! The canonical form of an address is an unsigned 64-bit offset. Symbolic
//! expressions such as `kernel32.dll+1A0` are carried verbatim and resolved
//! by the remote service; this crate never interprets them.

use super::error::{BridgeError, BridgeResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A logical reference to a memory location.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Address {
    /// Canonical unsigned 64-bit offset.
    Literal(u64),
    /// Symbolic expression resolved by the remote service, passed through
    /// verbatim.
    Symbolic(String),
}

impl Address {
    /// Creates a literal address from a canonical 64-bit value
    pub const fn new(value: u64) -> Self {
        Address::Literal(value)
    }

    /// Creates a null address (0x0)
    pub const fn null() -> Self {
        Address::Literal(0)
    }

    /// Returns the canonical 64-bit value, or `None` for symbolic addresses
    pub fn canonical(&self) -> Option<u64> {
        match self {
            Address::Literal(v) => Some(*v),
            Address::Symbolic(_) => None,
        }
    }

    /// Checks if the address is the literal null address
    pub fn is_null(&self) -> bool {
        matches!(self, Address::Literal(0))
    }

    /// Checks if the address is symbolic
    pub fn is_symbolic(&self) -> bool {
        matches!(self, Address::Symbolic(_))
    }
}

fn is_symbolic_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '+' | '-' | '[' | ']' | ' ' | '"')
}

impl FromStr for Address {
    type Err = BridgeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(BridgeError::InvalidAddress("<empty>".to_string()));
        }

        // Prefixed hex is always a literal; from_str_radix rejects overflow.
        if let Some(hex) = s
            .strip_prefix("0x")
            .or_else(|| s.strip_prefix("0X"))
            .or_else(|| s.strip_prefix('$'))
        {
            return u64::from_str_radix(hex, 16)
                .map(Address::Literal)
                .map_err(|_| BridgeError::InvalidAddress(s.to_string()));
        }

        // Plain decimal.
        if s.bytes().all(|b| b.is_ascii_digit()) {
            return s
                .parse::<u64>()
                .map(Address::Literal)
                .map_err(|_| BridgeError::InvalidAddress(s.to_string()));
        }

        // Bare hex digits (e.g. DEADBEEF).
        if s.bytes().all(|b| b.is_ascii_hexdigit()) {
            return u64::from_str_radix(s, 16)
                .map(Address::Literal)
                .map_err(|_| BridgeError::InvalidAddress(s.to_string()));
        }

        // Anything else is a symbolic expression, as long as it stays within
        // the character set the remote resolver understands.
        if s.chars().any(|c| c.is_ascii_alphanumeric()) && s.chars().all(is_symbolic_char) {
            return Ok(Address::Symbolic(s.to_string()));
        }

        Err(BridgeError::InvalidAddress(s.to_string()))
    }
}

/// Parses an external address notation into its canonical form.
pub fn parse_address(input: &str) -> BridgeResult<Address> {
    input.parse()
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Address::Literal(v) => write!(f, "0x{:X}", v),
            Address::Symbolic(s) => f.write_str(s),
        }
    }
}

impl From<u64> for Address {
    fn from(value: u64) -> Self {
        Address::Literal(value)
    }
}

/// Half-open scan range over target memory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressRange {
    pub start: u64,
    pub stop: u64,
}

impl AddressRange {
    /// Creates a new scan range
    pub const fn new(start: u64, stop: u64) -> Self {
        AddressRange { start, stop }
    }
}

impl Default for AddressRange {
    // The remote scanner's default span: zero through the top of the
    // positive 64-bit address space.
    fn default() -> Self {
        AddressRange {
            start: 0,
            stop: i64::MAX as u64,
        }
    }
}
