//! Scan session state machine
//!
//! A session's lifecycle is `Uninitialized` (no identifier yet) →
//! `Active` (identifier minted by the remote's first scan) → `Reset`
//! (identifier retained, result set cleared). Illegal transitions are
//! rejected locally and deterministically, before any remote call.
//!
//! The session does not serialize concurrent calls on one identifier;
//! callers must treat first scan, next scan, results, and reset against
//! the same identifier as a strictly ordered sequence. Dropping a scan
//! future cancels the local wait but leaves the remote in an indeterminate
//! state; subsequent calls may legitimately surface a remote rejection.

use super::predicate::{ScanPhase, ScanPredicate};
use crate::core::types::{
    AddressRange, Alignment, BridgeError, BridgeResult, ProtectionFlags, ResultPage, ScanHit,
    ScanSummary, VarType,
};
use crate::gateway::{expect_array, expect_bool, expect_str, expect_u64, Gateway, Operation};
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{debug, info};

/// Typed session state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    /// No identifier has been issued yet
    Uninitialized,
    /// A scan has completed; the result set narrows with each next scan
    Active { scan_id: String, result_count: u64 },
    /// Identifier retained, result set cleared, ready for a fresh first scan
    Reset { scan_id: String },
}

impl SessionState {
    const fn describe(&self) -> &'static str {
        match self {
            SessionState::Uninitialized => "Uninitialized",
            SessionState::Active { .. } => "Active",
            SessionState::Reset { .. } => "Reset",
        }
    }
}

/// Parameters for establishing a fresh search space
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FirstScanParams {
    pub range: AddressRange,
    pub protection_flags: ProtectionFlags,
    pub alignment: Alignment,
}

impl Default for FirstScanParams {
    fn default() -> Self {
        FirstScanParams {
            range: AddressRange::default(),
            // Writable, not copy-on-write: the remote scanner's default.
            protection_flags: "+W-C".to_string(),
            alignment: Alignment::default(),
        }
    }
}

/// Manager for one remote scan session.
///
/// Bound to a single variable type for its whole lineage; the remote
/// narrowing semantics are undefined if an identifier is replayed against
/// an incompatible type, so the binding is fixed at construction.
#[derive(Debug)]
pub struct ScanSession {
    gateway: Arc<Gateway>,
    var_type: VarType,
    state: SessionState,
}

impl ScanSession {
    /// Creates a new, uninitialized session
    pub fn new(gateway: Arc<Gateway>, var_type: VarType) -> Self {
        ScanSession {
            gateway,
            var_type,
            state: SessionState::Uninitialized,
        }
    }

    /// The variable type this session's lineage is bound to
    pub fn var_type(&self) -> VarType {
        self.var_type
    }

    /// The current session state
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// The session identifier, once one has been issued
    pub fn scan_id(&self) -> Option<&str> {
        match &self.state {
            SessionState::Uninitialized => None,
            SessionState::Active { scan_id, .. } | SessionState::Reset { scan_id } => Some(scan_id),
        }
    }

    /// The current result count (zero when reset or uninitialized)
    pub fn result_count(&self) -> u64 {
        match &self.state {
            SessionState::Active { result_count, .. } => *result_count,
            _ => 0,
        }
    }

    /// Establishes a fresh search space. Valid from `Uninitialized` or
    /// `Reset`; blocks until the remote scan completes.
    pub async fn first_scan(
        &mut self,
        predicate: &ScanPredicate,
        params: &FirstScanParams,
    ) -> BridgeResult<ScanSummary> {
        let retained_id = match &self.state {
            SessionState::Uninitialized => None,
            SessionState::Reset { scan_id } => Some(scan_id.clone()),
            SessionState::Active { .. } => {
                return Err(BridgeError::InvalidSessionState {
                    operation: "first scan",
                    required: "Uninitialized or Reset",
                    actual: self.state.describe(),
                })
            }
        };
        predicate.validate_for(ScanPhase::First)?;

        let mut payload = predicate.to_wire(self.var_type);
        payload.insert("startAddress".into(), json!(params.range.start));
        payload.insert("stopAddress".into(), json!(params.range.stop));
        payload.insert("protectionFlags".into(), json!(params.protection_flags));
        payload.insert("alignmentType".into(), json!(params.alignment.wire_type()));
        payload.insert("alignmentParam".into(), json!(params.alignment.wire_param()));
        if let Some(id) = retained_id {
            // A reset session reuses its identifier for the new lineage.
            payload.insert("scanId".into(), json!(id));
        }

        let envelope = self
            .gateway
            .invoke(Operation::FirstScan, Some(&Value::Object(payload)))
            .await?;

        let scan_id = expect_str(&envelope, "scanId", Operation::FirstScan)?;
        let result_count = expect_u64(&envelope, "resultCount", Operation::FirstScan)?;
        info!(%scan_id, result_count, option = %predicate.option, "first scan completed");

        self.state = SessionState::Active {
            scan_id: scan_id.clone(),
            result_count,
        };
        Ok(ScanSummary {
            scan_id,
            result_count,
        })
    }

    /// Narrows the result set. Valid from `Active` only; the new result
    /// count may never exceed the previous one.
    pub async fn next_scan(&mut self, predicate: &ScanPredicate) -> BridgeResult<ScanSummary> {
        let (scan_id, previous_count) = match &self.state {
            SessionState::Active {
                scan_id,
                result_count,
            } => (scan_id.clone(), *result_count),
            other => {
                return Err(BridgeError::InvalidSessionState {
                    operation: "next scan",
                    required: "Active",
                    actual: other.describe(),
                })
            }
        };
        predicate.validate_for(ScanPhase::Next)?;

        let mut payload = predicate.to_wire(self.var_type);
        payload.insert("scanId".into(), json!(scan_id));

        let envelope = self
            .gateway
            .invoke(Operation::NextScan, Some(&Value::Object(payload)))
            .await?;

        let returned_id = expect_str(&envelope, "scanId", Operation::NextScan)?;
        let result_count = expect_u64(&envelope, "resultCount", Operation::NextScan)?;

        if returned_id != scan_id {
            return Err(BridgeError::ProtocolInvariant(format!(
                "next scan answered for session '{}', expected '{}'",
                returned_id, scan_id
            )));
        }
        if result_count > previous_count {
            // Narrowing can only reduce or preserve the result set. The
            // session state is left untouched; the caller decides whether
            // to reset.
            return Err(BridgeError::ProtocolInvariant(format!(
                "next scan widened the result set: {} -> {}",
                previous_count, result_count
            )));
        }

        info!(%scan_id, previous_count, result_count, option = %predicate.option, "next scan narrowed results");
        self.state = SessionState::Active {
            scan_id: scan_id.clone(),
            result_count,
        };
        Ok(ScanSummary {
            scan_id,
            result_count,
        })
    }

    /// Retrieves one page of results without mutating the session. Valid
    /// from `Active` or `Reset`; a reset session answers locally with an
    /// empty page.
    pub async fn results(&self, start_index: u64, count: u64) -> BridgeResult<ResultPage> {
        let scan_id = match &self.state {
            SessionState::Active { scan_id, .. } => scan_id.clone(),
            SessionState::Reset { .. } => return Ok(ResultPage::empty()),
            SessionState::Uninitialized => {
                return Err(BridgeError::InvalidSessionState {
                    operation: "fetch results",
                    required: "Active or Reset",
                    actual: "Uninitialized",
                })
            }
        };

        let payload = json!({
            "scanId": scan_id,
            "startIndex": start_index,
            "count": count,
        });
        let envelope = self
            .gateway
            .invoke(Operation::ScanResults, Some(&payload))
            .await?;

        let total_count = expect_u64(&envelope, "totalCount", Operation::ScanResults)?;
        let has_more = expect_bool(&envelope, "hasMore", Operation::ScanResults)?;
        let raw = expect_array(&envelope, "results", Operation::ScanResults)?;

        let mut entries = Vec::with_capacity(raw.len());
        for item in raw {
            let address = item
                .get("address")
                .ok_or_else(|| {
                    BridgeError::ProtocolInvariant(
                        "scan-results: entry missing 'address'".to_string(),
                    )
                })
                .and_then(crate::codec::decode_address)?;
            let value = match item.get("value") {
                Some(Value::String(s)) => s.clone(),
                Some(other) => other.to_string(),
                None => {
                    return Err(BridgeError::ProtocolInvariant(
                        "scan-results: entry missing 'value'".to_string(),
                    ))
                }
            };
            entries.push(ScanHit { address, value });
        }

        debug!(%scan_id, start_index, returned = entries.len(), total_count, has_more, "fetched result page");
        Ok(ResultPage {
            entries,
            total_count,
            has_more,
        })
    }

    /// Clears the session back to a pre-scan empty state, retaining the
    /// identifier. Idempotent: resetting an already-reset session succeeds
    /// without a remote call.
    pub async fn new_scan(&mut self) -> BridgeResult<()> {
        let scan_id = match &self.state {
            SessionState::Active { scan_id, .. } => scan_id.clone(),
            SessionState::Reset { .. } => return Ok(()),
            SessionState::Uninitialized => {
                return Err(BridgeError::InvalidSessionState {
                    operation: "reset scan",
                    required: "Active or Reset",
                    actual: "Uninitialized",
                })
            }
        };

        let payload = json!({ "scanId": scan_id });
        self.gateway
            .invoke(Operation::NewScan, Some(&payload))
            .await?;

        info!(%scan_id, "scan session reset");
        self.state = SessionState::Reset { scan_id };
        Ok(())
    }
}
