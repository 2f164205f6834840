//! CE-Bridge: typed memory inspection client for Cheat-Engine-style
//! remote scan services
//!
//! The crate mediates typed reads and writes of a running process's memory
//! through a remote REST service and drives the service's multi-stage scan
//! session protocol: establish a search space (first scan), narrow it
//! (next scan), page through results, and reset. Stateless one-shots
//! (process listing, disassembly, conversions, Lua execution) share the
//! same request gateway.

pub mod client;
pub mod codec;
pub mod config;
pub mod core;
pub mod gateway;
pub mod scan;

// Re-export main types
pub use client::{CeClient, Conversion, ProcessEntry, ProcessStatus};
pub use config::Config;
pub use core::types::{
    Address, AddressRange, Alignment, BridgeError, BridgeResult, ErrorKind, IntWidth, Locality,
    ProtectionFlags, ResultPage, RoundingType, ScanHit, ScanOption, ScanSummary, TypedValue,
    ValueKind, VarType,
};
pub use gateway::{Gateway, Operation};
pub use scan::{FirstScanParams, ScanPhase, ScanPredicate, ScanSession, SessionState};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_module_accessible() {
        assert_eq!(core::VERSION, env!("CARGO_PKG_VERSION"));
    }

    #[test]
    fn test_address_reexport() {
        let addr = Address::new(0x1000);
        assert_eq!(addr.canonical(), Some(0x1000));
        assert!(Address::null().is_null());
    }

    #[test]
    fn test_value_kind_reexport() {
        let kind = ValueKind::int(IntWidth::W32, false);
        assert_eq!(kind.wire_tag(Locality::Target), "dword");
        assert_eq!(kind.wire_tag(Locality::Host), "dwordLocal");
    }

    #[test]
    fn test_predicate_reexport() {
        let predicate = ScanPredicate::exact("42");
        assert!(predicate.validate_for(ScanPhase::First).is_ok());
        assert_eq!(predicate.option, ScanOption::ExactValue);
    }

    #[test]
    fn test_error_reexport() {
        let err = BridgeError::InvalidAddress("bad".to_string());
        assert_eq!(err.kind(), ErrorKind::Validation);
    }
}
