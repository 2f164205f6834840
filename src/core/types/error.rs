//! Error types for CE-Bridge
//!
//! Every failure the crate can report falls into one of four kinds:
//! validation (caught locally before any remote call), transport failure
//! (no response obtained), remote rejection (response obtained, failure
//! status), and protocol invariant violation (response obtained but it
//! contradicts the remote contract). Callers branch on [`ErrorKind`]
//! rather than message strings.

use thiserror::Error;

/// Coarse classification of a [`BridgeError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Malformed or incompatible input caught before any remote call.
    Validation,
    /// The remote endpoint was unreachable or the connection failed.
    Transport,
    /// A response was obtained but indicated failure.
    RemoteRejection,
    /// A response was obtained but violates an expected invariant.
    ProtocolInvariant,
}

/// Main error type for remote memory operations
#[derive(Error, Debug)]
pub enum BridgeError {
    #[error("Invalid memory address: {0}")]
    InvalidAddress(String),

    #[error("Value '{value}' is not a valid {kind} literal")]
    InvalidValueLiteral { kind: String, value: String },

    #[error("Value {value} is out of range for {kind}")]
    ValueOutOfRange { kind: String, value: String },

    #[error("Invalid byte pattern: {0}")]
    InvalidPattern(String),

    #[error("Scan option {option} requires {what}")]
    MissingScanInput { option: String, what: String },

    #[error("Scan option {option} does not accept {what}")]
    UnexpectedScanInput { option: String, what: String },

    #[error("Scan option {option} is not valid for a {phase}")]
    InvalidScanOption { option: String, phase: &'static str },

    #[error("Cannot {operation}: session is {actual}, expected {required}")]
    InvalidSessionState {
        operation: &'static str,
        required: &'static str,
        actual: &'static str,
    },

    #[error("Missing required parameter {parameter} for {context}")]
    MissingParameter {
        parameter: &'static str,
        context: &'static str,
    },

    #[error("Transport failure during {operation}: {reason}")]
    Transport { operation: String, reason: String },

    #[error("Remote rejected {operation} (status {status}): {message}")]
    RemoteRejected {
        operation: String,
        status: u16,
        message: String,
    },

    #[error("Protocol invariant violated: {0}")]
    ProtocolInvariant(String),
}

/// Result type alias for remote memory operations
pub type BridgeResult<T> = Result<T, BridgeError>;

impl BridgeError {
    /// Returns the coarse kind of this error for branching.
    pub fn kind(&self) -> ErrorKind {
        match self {
            BridgeError::InvalidAddress(_)
            | BridgeError::InvalidValueLiteral { .. }
            | BridgeError::ValueOutOfRange { .. }
            | BridgeError::InvalidPattern(_)
            | BridgeError::MissingScanInput { .. }
            | BridgeError::UnexpectedScanInput { .. }
            | BridgeError::InvalidScanOption { .. }
            | BridgeError::InvalidSessionState { .. }
            | BridgeError::MissingParameter { .. } => ErrorKind::Validation,
            BridgeError::Transport { .. } => ErrorKind::Transport,
            BridgeError::RemoteRejected { .. } => ErrorKind::RemoteRejection,
            BridgeError::ProtocolInvariant(_) => ErrorKind::ProtocolInvariant,
        }
    }

    /// Creates a transport failure error
    pub fn transport(operation: impl Into<String>, reason: impl Into<String>) -> Self {
        BridgeError::Transport {
            operation: operation.into(),
            reason: reason.into(),
        }
    }

    /// Creates a remote rejection error
    pub fn rejected(operation: impl Into<String>, status: u16, message: impl Into<String>) -> Self {
        BridgeError::RemoteRejected {
            operation: operation.into(),
            status,
            message: message.into(),
        }
    }

    /// Creates an out-of-range error
    pub fn out_of_range(kind: impl Into<String>, value: impl std::fmt::Display) -> Self {
        BridgeError::ValueOutOfRange {
            kind: kind.into(),
            value: value.to_string(),
        }
    }

    /// Creates an invalid-literal error
    pub fn bad_literal(kind: impl Into<String>, value: impl std::fmt::Display) -> Self {
        BridgeError::InvalidValueLiteral {
            kind: kind.into(),
            value: value.to_string(),
        }
    }
}
