//! Core module containing fundamental types for CE-Bridge
//!
//! This module provides the foundational building blocks used throughout
//! the crate: address handling, typed values, scan enumerations, and error
//! types.

pub mod types;

// Re-export commonly used types for convenience
pub use types::{
    Address, BridgeError, BridgeResult, ErrorKind, Locality, ResultPage, ScanOption, TypedValue,
    ValueKind, VarType,
};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const AUTHORS: &str = env!("CARGO_PKG_AUTHORS");
