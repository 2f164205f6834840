//! Scan enumerations and result page types
//!
//! Wire names mirror the remote scanner's own vocabulary (`soExactValue`,
//! `vtDword`, `rtRounded`, `fsmAligned`) so payloads read the same on both
//! ends of the connection.

use super::address::Address;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Comparison applied by a scan step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ScanOption {
    UnknownValue,
    ExactValue,
    ValueBetween,
    BiggerThan,
    SmallerThan,
    IncreasedValue,
    IncreasedValueBy,
    DecreasedValue,
    DecreasedValueBy,
    Changed,
    Unchanged,
}

impl ScanOption {
    /// The remote scanner's name for this option
    pub const fn wire_name(&self) -> &'static str {
        match self {
            ScanOption::UnknownValue => "soUnknownValue",
            ScanOption::ExactValue => "soExactValue",
            ScanOption::ValueBetween => "soValueBetween",
            ScanOption::BiggerThan => "soBiggerThan",
            ScanOption::SmallerThan => "soSmallerThan",
            ScanOption::IncreasedValue => "soIncreasedValue",
            ScanOption::IncreasedValueBy => "soIncreasedValueBy",
            ScanOption::DecreasedValue => "soDecreasedValue",
            ScanOption::DecreasedValueBy => "soDecreasedValueBy",
            ScanOption::Changed => "soChanged",
            ScanOption::Unchanged => "soUnchanged",
        }
    }

    /// Whether this option establishes a fresh search space (first scan)
    pub const fn valid_for_first_scan(&self) -> bool {
        matches!(
            self,
            ScanOption::UnknownValue
                | ScanOption::ExactValue
                | ScanOption::ValueBetween
                | ScanOption::BiggerThan
                | ScanOption::SmallerThan
        )
    }

    /// Whether this option narrows an existing result set (next scan)
    pub const fn valid_for_next_scan(&self) -> bool {
        !matches!(self, ScanOption::UnknownValue | ScanOption::ValueBetween)
    }

    /// Whether this option compares against the previous scan's values
    pub const fn compares_previous(&self) -> bool {
        matches!(
            self,
            ScanOption::IncreasedValue
                | ScanOption::IncreasedValueBy
                | ScanOption::DecreasedValue
                | ScanOption::DecreasedValueBy
                | ScanOption::Changed
                | ScanOption::Unchanged
        )
    }

    /// Whether `input1` is required
    pub const fn requires_input1(&self) -> bool {
        matches!(
            self,
            ScanOption::ExactValue
                | ScanOption::ValueBetween
                | ScanOption::BiggerThan
                | ScanOption::SmallerThan
                | ScanOption::IncreasedValueBy
                | ScanOption::DecreasedValueBy
        )
    }

    /// Whether `input2` is required
    pub const fn requires_input2(&self) -> bool {
        matches!(self, ScanOption::ValueBetween)
    }

    /// Whether the percentage-relative modifier is meaningful
    pub const fn supports_percentage(&self) -> bool {
        self.compares_previous()
    }
}

impl fmt::Display for ScanOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

/// Variable type a scan session is created with. A session's lineage is
/// bound to one of these; mixing types within a lineage is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum VarType {
    Byte,
    Word,
    Dword,
    Qword,
    Float,
    Double,
    Str,
    ByteArray,
}

impl VarType {
    /// The remote scanner's name for this variable type
    pub const fn wire_name(&self) -> &'static str {
        match self {
            VarType::Byte => "vtByte",
            VarType::Word => "vtWord",
            VarType::Dword => "vtDword",
            VarType::Qword => "vtQword",
            VarType::Float => "vtSingle",
            VarType::Double => "vtDouble",
            VarType::Str => "vtString",
            VarType::ByteArray => "vtByteArray",
        }
    }

    /// Whether the string-scan modifiers (unicode, case sensitivity) apply
    pub const fn is_string_like(&self) -> bool {
        matches!(self, VarType::Str | VarType::ByteArray)
    }
}

impl fmt::Display for VarType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

/// Float rounding mode used by the remote comparator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RoundingType {
    Rounded,
    ExtremeRounded,
    Truncated,
}

impl RoundingType {
    /// The remote scanner's name for this rounding mode
    pub const fn wire_name(&self) -> &'static str {
        match self {
            RoundingType::Rounded => "rtRounded",
            RoundingType::ExtremeRounded => "rtExtremerounded",
            RoundingType::Truncated => "rtTruncated",
        }
    }
}

impl Default for RoundingType {
    fn default() -> Self {
        RoundingType::ExtremeRounded
    }
}

/// Address alignment constraint for a first scan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Alignment {
    /// Every byte offset is considered
    NotAligned,
    /// Only offsets divisible by the parameter
    Aligned { param: String },
    /// Only offsets whose hex form ends in the given digits
    LastDigits { digits: String },
}

impl Alignment {
    /// The remote scanner's name for this alignment mode
    pub const fn wire_type(&self) -> &'static str {
        match self {
            Alignment::NotAligned => "fsmNotAligned",
            Alignment::Aligned { .. } => "fsmAligned",
            Alignment::LastDigits { .. } => "fsmLastDigits",
        }
    }

    /// The alignment parameter string, if the mode carries one
    pub fn wire_param(&self) -> &str {
        match self {
            Alignment::NotAligned => "",
            Alignment::Aligned { param } => param,
            Alignment::LastDigits { digits } => digits,
        }
    }
}

impl Default for Alignment {
    fn default() -> Self {
        Alignment::Aligned {
            param: "4".to_string(),
        }
    }
}

/// One (address, value) entry from a result page. The value is the remote
/// scanner's display rendering for the session's variable type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanHit {
    pub address: Address,
    pub value: String,
}

/// A page of scan results. Ordering is whatever the remote produced; it is
/// stable for an immutable result set but not contractually sorted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultPage {
    pub entries: Vec<ScanHit>,
    pub total_count: u64,
    pub has_more: bool,
}

impl ResultPage {
    /// An empty page over a result set of size zero
    pub fn empty() -> Self {
        ResultPage {
            entries: Vec::new(),
            total_count: 0,
            has_more: false,
        }
    }
}

/// Outcome of a first or next scan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanSummary {
    pub scan_id: String,
    pub result_count: u64,
}
