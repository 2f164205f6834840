//! Scan session management
//!
//! Owns the state machine for an in-progress remote memory scan: creation
//! (first scan), refinement (next scan), paginated retrieval (results),
//! and reset (new scan), built entirely on top of the request gateway.

mod predicate;
mod session;

pub use predicate::{ScanPhase, ScanPredicate};
pub use session::{FirstScanParams, ScanSession, SessionState};
