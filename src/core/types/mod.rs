//! Core type definitions for CE-Bridge
//!
//! This module contains the fundamental types used throughout the crate:
//! address notations, the typed value model, scan enumerations, and the
//! error taxonomy.

mod address;
mod error;
mod scan;
mod value;

// Re-export all public types
pub use address::{parse_address, Address, AddressRange};
pub use error::{BridgeError, BridgeResult, ErrorKind};
pub use scan::{
    Alignment, ResultPage, RoundingType, ScanHit, ScanOption, ScanSummary, VarType,
};
pub use value::{IntWidth, Locality, TypedValue, ValueKind};

/// Memory protection filter in the remote scanner's notation, e.g. `+W-C`
/// (writable, not copy-on-write).
pub type ProtectionFlags = String;
