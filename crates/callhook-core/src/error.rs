//! Error types for webhook decoding and validation.
//!
//! Failures split into two classes. Structural decode errors describe input
//! that never produced a record and surface as-is from the parsing layer.
//! Semantic validation errors mean the record decoded cleanly but violated a
//! domain rule, and always carry the `decoded error: ` prefix so callers can
//! tell the classes apart from the message alone.

use thiserror::Error;

/// Result type alias using `DecodeError`.
pub type Result<T> = std::result::Result<T, DecodeError>;

/// Semantic validation failure for a webhook record or enumeration token.
///
/// Message templates are stable; callers and tests match on substrings.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Token is not a member of the enumeration's allowed set.
    #[error("unknown {kind} value: {value}")]
    UnknownToken {
        /// Name of the enumeration that rejected the token.
        kind: &'static str,
        /// The offending token as received.
        value: String,
    },

    /// A conference-end callback arrived without its end reason.
    #[error("event ReasonConferenceEnded empty")]
    MissingEndReason,
}

/// Failure while decoding a webhook payload.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// Malformed JSON, a missing required field, or a token or timestamp
    /// rejected during deserialization. Raised by both channels, since the
    /// form channel feeds coerced values through the same serde path.
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// A form value that cannot be coerced to its field's kind.
    #[error("form field {field} expects {expected}, got '{value}'")]
    Form {
        /// Canonical wire name of the field.
        field: &'static str,
        /// Kind the field expects.
        expected: &'static str,
        /// The value as received.
        value: String,
    },

    /// Record decoded cleanly but failed post-decode validation.
    #[error("decoded error: {0}")]
    Validation(#[from] ValidationError),
}
