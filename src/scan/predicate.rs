//! Scan predicate construction and validation
//!
//! A predicate is validated against its scan option's input table before
//! any request is sent: an unknown-value scan with an input, or a
//! value-between scan without its second input, is a caller error caught
//! here.

use crate::codec::WirePayload;
use crate::core::types::{BridgeError, BridgeResult, RoundingType, ScanOption, VarType};
use serde_json::json;

/// Which scan step a predicate is validated for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanPhase {
    First,
    Next,
}

impl ScanPhase {
    const fn describe(&self) -> &'static str {
        match self {
            ScanPhase::First => "first scan",
            ScanPhase::Next => "next scan",
        }
    }
}

/// A (scanOption, input1, input2, roundingType, flags) tuple describing one
/// scan step's comparison.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanPredicate {
    pub option: ScanOption,
    pub input1: Option<String>,
    pub input2: Option<String>,
    pub rounding: RoundingType,
    /// Numeric inputs are hexadecimal
    pub hexadecimal_input: bool,
    /// String inputs are UTF-16
    pub unicode: bool,
    /// String comparison is case sensitive
    pub case_sensitive: bool,
    /// Relative comparison is a percentage delta
    pub percentage: bool,
}

impl ScanPredicate {
    fn with_option(option: ScanOption, input1: Option<String>, input2: Option<String>) -> Self {
        ScanPredicate {
            option,
            input1,
            input2,
            rounding: RoundingType::default(),
            hexadecimal_input: false,
            unicode: false,
            case_sensitive: false,
            percentage: false,
        }
    }

    /// Scan for any value (establishes the full search space)
    pub fn unknown() -> Self {
        Self::with_option(ScanOption::UnknownValue, None, None)
    }

    /// Scan for an exact value
    pub fn exact(value: impl Into<String>) -> Self {
        Self::with_option(ScanOption::ExactValue, Some(value.into()), None)
    }

    /// Scan for values within `[low, high]`
    pub fn between(low: impl Into<String>, high: impl Into<String>) -> Self {
        Self::with_option(
            ScanOption::ValueBetween,
            Some(low.into()),
            Some(high.into()),
        )
    }

    /// Scan for values greater than the given one
    pub fn bigger_than(value: impl Into<String>) -> Self {
        Self::with_option(ScanOption::BiggerThan, Some(value.into()), None)
    }

    /// Scan for values smaller than the given one
    pub fn smaller_than(value: impl Into<String>) -> Self {
        Self::with_option(ScanOption::SmallerThan, Some(value.into()), None)
    }

    /// Narrow to values that increased since the previous scan
    pub fn increased() -> Self {
        Self::with_option(ScanOption::IncreasedValue, None, None)
    }

    /// Narrow to values that increased by the given amount
    pub fn increased_by(amount: impl Into<String>) -> Self {
        Self::with_option(ScanOption::IncreasedValueBy, Some(amount.into()), None)
    }

    /// Narrow to values that decreased since the previous scan
    pub fn decreased() -> Self {
        Self::with_option(ScanOption::DecreasedValue, None, None)
    }

    /// Narrow to values that decreased by the given amount
    pub fn decreased_by(amount: impl Into<String>) -> Self {
        Self::with_option(ScanOption::DecreasedValueBy, Some(amount.into()), None)
    }

    /// Narrow to values that changed since the previous scan
    pub fn changed() -> Self {
        Self::with_option(ScanOption::Changed, None, None)
    }

    /// Narrow to values that did not change since the previous scan
    pub fn unchanged() -> Self {
        Self::with_option(ScanOption::Unchanged, None, None)
    }

    /// Marks numeric inputs as hexadecimal
    pub fn hexadecimal(mut self) -> Self {
        self.hexadecimal_input = true;
        self
    }

    /// Marks string inputs as UTF-16
    pub fn unicode(mut self) -> Self {
        self.unicode = true;
        self
    }

    /// Makes string comparison case sensitive
    pub fn case_sensitive(mut self) -> Self {
        self.case_sensitive = true;
        self
    }

    /// Interprets the relative comparison as a percentage delta
    pub fn percentage(mut self) -> Self {
        self.percentage = true;
        self
    }

    /// Sets the float rounding mode
    pub fn rounding(mut self, rounding: RoundingType) -> Self {
        self.rounding = rounding;
        self
    }

    fn has_input1(&self) -> bool {
        self.input1.as_deref().is_some_and(|s| !s.is_empty())
    }

    fn has_input2(&self) -> bool {
        self.input2.as_deref().is_some_and(|s| !s.is_empty())
    }

    /// Validates that the option is legal for the given phase and that the
    /// supplied inputs match the option's requirements.
    pub fn validate_for(&self, phase: ScanPhase) -> BridgeResult<()> {
        let phase_ok = match phase {
            ScanPhase::First => self.option.valid_for_first_scan(),
            ScanPhase::Next => self.option.valid_for_next_scan(),
        };
        if !phase_ok {
            return Err(BridgeError::InvalidScanOption {
                option: self.option.wire_name().to_string(),
                phase: phase.describe(),
            });
        }

        if self.option.requires_input1() && !self.has_input1() {
            return Err(BridgeError::MissingScanInput {
                option: self.option.wire_name().to_string(),
                what: "input1".to_string(),
            });
        }
        if !self.option.requires_input1() && self.has_input1() {
            return Err(BridgeError::UnexpectedScanInput {
                option: self.option.wire_name().to_string(),
                what: "input1".to_string(),
            });
        }

        if self.option.requires_input2() && !self.has_input2() {
            return Err(BridgeError::MissingScanInput {
                option: self.option.wire_name().to_string(),
                what: "input2".to_string(),
            });
        }
        if !self.option.requires_input2() && self.has_input2() {
            return Err(BridgeError::UnexpectedScanInput {
                option: self.option.wire_name().to_string(),
                what: "input2".to_string(),
            });
        }

        if self.percentage && !self.option.supports_percentage() {
            return Err(BridgeError::UnexpectedScanInput {
                option: self.option.wire_name().to_string(),
                what: "percentage modifier".to_string(),
            });
        }

        Ok(())
    }

    /// Encodes the predicate's fields into a request payload fragment
    pub(crate) fn to_wire(&self, var_type: VarType) -> WirePayload {
        let mut payload = WirePayload::new();
        payload.insert("scanOption".into(), json!(self.option.wire_name()));
        payload.insert("varType".into(), json!(var_type.wire_name()));
        payload.insert(
            "input1".into(),
            json!(self.input1.clone().unwrap_or_default()),
        );
        payload.insert(
            "input2".into(),
            json!(self.input2.clone().unwrap_or_default()),
        );
        payload.insert("roundingType".into(), json!(self.rounding.wire_name()));
        payload.insert("isHexadecimalInput".into(), json!(self.hexadecimal_input));
        payload.insert("isUnicodeScan".into(), json!(self.unicode));
        payload.insert("isCaseSensitive".into(), json!(self.case_sensitive));
        payload.insert("isPercentageScan".into(), json!(self.percentage));
        payload
    }
}
