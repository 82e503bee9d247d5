//! Error types for node access and type conversion.
//!
//! Conversion failures are classified by [`ConvertErrorKind`] so callers can
//! tell "wrong kind of node" apart from "right kind, value too large". The
//! throwing-style API surface collapses those kinds into the two umbrella
//! variants of [`NodeError`].

use std::fmt;

use thiserror::Error;

use crate::kind::ValueKind;

/// Errors raised by the throwing-style API: typed conversion, required-value
/// getters, indexed access and parsing.
#[derive(Error, Debug)]
pub enum NodeError {
    /// Shape or nullness mismatch: the node is not the kind the caller asked
    /// for, or it is null/undefined where a value is required.
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    /// The requested target is not supported for this node: numeric overflow,
    /// unknown target type, or a failed object deserialization.
    #[error("Not supported: {0}")]
    NotSupported(String),

    /// An array position outside `0..len`.
    #[error("Index out of range: {index} (length {len})")]
    IndexOutOfRange { index: i64, len: usize },

    /// The input text was not valid JSON.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience alias used throughout json-node.
pub type Result<T> = std::result::Result<T, NodeError>;

/// Classification of a conversion failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConvertErrorKind {
    /// The node's kind does not match what the target requires.
    WrongKind,
    /// The kind matched but the magnitude does not fit the target width.
    Overflow,
    /// The node is null or undefined and the target cannot represent that.
    NotNullExpected,
    /// The target is not recognized by any conversion rule.
    Unsupported,
    /// The generic deserializer rejected the node.
    DeserializationFailed,
}

/// A classified conversion failure with a human-readable message.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct ConvertError {
    kind: ConvertErrorKind,
    message: String,
}

impl ConvertError {
    pub fn new(kind: ConvertErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// "expect {expected} but it is {actual}".
    pub fn wrong_kind(expected: &str, actual: ValueKind) -> Self {
        Self::new(
            ConvertErrorKind::WrongKind,
            format!("expect {expected} but it is {}", actual.name()),
        )
    }

    pub fn overflow(value: impl fmt::Display, target: &str) -> Self {
        Self::new(
            ConvertErrorKind::Overflow,
            format!("the value {value} is out of range of {target}"),
        )
    }

    pub fn not_null_expected(target: &str, actual: ValueKind) -> Self {
        Self::new(
            ConvertErrorKind::NotNullExpected,
            format!("expect a non-null value for {target} but it is {}", actual.name()),
        )
    }

    pub fn unsupported(message: impl Into<String>) -> Self {
        Self::new(ConvertErrorKind::Unsupported, message)
    }

    pub fn deserialization(source: &serde_json::Error) -> Self {
        Self::new(
            ConvertErrorKind::DeserializationFailed,
            format!("deserialize failed: {source}"),
        )
    }

    pub fn kind(&self) -> ConvertErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<ConvertError> for NodeError {
    fn from(err: ConvertError) -> Self {
        match err.kind {
            ConvertErrorKind::WrongKind | ConvertErrorKind::NotNullExpected => {
                NodeError::InvalidOperation(err.message)
            }
            ConvertErrorKind::Overflow
            | ConvertErrorKind::Unsupported
            | ConvertErrorKind::DeserializationFailed => NodeError::NotSupported(err.message),
        }
    }
}

/// The single failure raised by [`JsonNode::cast`](crate::JsonNode::cast),
/// used behind explicit narrowing conversions.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid cast: {0}")]
pub struct CastError(pub String);

impl From<ConvertError> for CastError {
    fn from(err: ConvertError) -> Self {
        CastError(err.message)
    }
}
