//! Typed value model for remote memory operations
//!
//! [`ValueKind`] describes what to read or write (tag, width, signedness,
//! length caps); [`TypedValue`] holds a decoded result. Both are closed sum
//! types so that invalid modifier combinations are unrepresentable: a
//! signedness flag only exists on integers, a wide-character flag only on
//! strings.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Whether an operation targets the opened process's memory or the remote
/// service's own host memory. The two must never be conflated: every data
/// type has one wire tag per locality and the codec selects on this value
/// explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locality {
    /// The externally opened process.
    Target,
    /// The service's own host process.
    Host,
}

/// Integer bit width for typed reads and writes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IntWidth {
    W16,
    W32,
    W64,
}

impl IntWidth {
    /// Size in bytes
    pub const fn size(&self) -> usize {
        match self {
            IntWidth::W16 => 2,
            IntWidth::W32 => 4,
            IntWidth::W64 => 8,
        }
    }
}

/// Describes the shape of a value to read or write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueKind {
    /// Raw byte sequence of an explicit length. `as_table` is a presentation
    /// hint for reads only: return one array rather than scalar values.
    Bytes { count: usize, as_table: bool },
    /// Fixed-width integer.
    Int { width: IntWidth, signed: bool },
    /// Pointer-width integer (64-bit on the wire).
    Pointer,
    /// IEEE-754 single precision.
    F32,
    /// IEEE-754 double precision.
    F64,
    /// Narrow or wide string with a caller-supplied maximum length. The cap
    /// passes through unmodified; truncation is the remote's business.
    Str { max_length: usize, wide: bool },
}

impl ValueKind {
    /// Convenience constructor for integers
    pub const fn int(width: IntWidth, signed: bool) -> Self {
        ValueKind::Int { width, signed }
    }

    /// The wire tag for this kind under the given locality.
    ///
    /// Tags follow the remote service's `word`/`dword`/`qword` vocabulary;
    /// the host-local variant appends `Local`, mirroring the service's
    /// `readInteger`/`readIntegerLocal` split.
    pub fn wire_tag(&self, locality: Locality) -> String {
        let base = match self {
            ValueKind::Bytes { .. } => "bytes",
            ValueKind::Int { width, .. } => match width {
                IntWidth::W16 => "word",
                IntWidth::W32 => "dword",
                IntWidth::W64 => "qword",
            },
            ValueKind::Pointer => "pointer",
            ValueKind::F32 => "float",
            ValueKind::F64 => "double",
            ValueKind::Str { .. } => "string",
        };
        match locality {
            Locality::Target => base.to_string(),
            Locality::Host => format!("{}Local", base),
        }
    }

    /// Human-readable name used in error messages
    pub fn describe(&self) -> String {
        match self {
            ValueKind::Bytes { count, .. } => format!("bytes[{}]", count),
            ValueKind::Int { width, signed } => {
                format!("{}{}", if *signed { "i" } else { "u" }, width.size() * 8)
            }
            ValueKind::Pointer => "pointer".to_string(),
            ValueKind::F32 => "f32".to_string(),
            ValueKind::F64 => "f64".to_string(),
            ValueKind::Str { wide: true, .. } => "wide string".to_string(),
            ValueKind::Str { wide: false, .. } => "string".to_string(),
        }
    }
}

/// A decoded value read from remote memory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum TypedValue {
    Bytes(Vec<u8>),
    I16(i16),
    U16(u16),
    I32(i32),
    U32(u32),
    I64(i64),
    U64(u64),
    Pointer(u64),
    F32(f32),
    F64(f64),
    Str(String),
}

impl TypedValue {
    /// Returns the size in bytes of the value
    pub fn size(&self) -> usize {
        match self {
            TypedValue::Bytes(b) => b.len(),
            TypedValue::I16(_) | TypedValue::U16(_) => 2,
            TypedValue::I32(_) | TypedValue::U32(_) | TypedValue::F32(_) => 4,
            TypedValue::I64(_)
            | TypedValue::U64(_)
            | TypedValue::Pointer(_)
            | TypedValue::F64(_) => 8,
            TypedValue::Str(s) => s.len(),
        }
    }
}

impl fmt::Display for TypedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypedValue::Bytes(b) => write!(f, "{}", hex::encode_upper(b)),
            TypedValue::I16(v) => write!(f, "{}", v),
            TypedValue::U16(v) => write!(f, "{}", v),
            TypedValue::I32(v) => write!(f, "{}", v),
            TypedValue::U32(v) => write!(f, "{}", v),
            TypedValue::I64(v) => write!(f, "{}", v),
            TypedValue::U64(v) => write!(f, "{}", v),
            TypedValue::Pointer(v) => write!(f, "0x{:X}", v),
            TypedValue::F32(v) => write!(f, "{}", v),
            TypedValue::F64(v) => write!(f, "{}", v),
            TypedValue::Str(s) => f.write_str(s),
        }
    }
}
