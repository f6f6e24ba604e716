//! Post-decode validation capability.
//!
//! Records implement [`Validate`] to express rules that span multiple
//! fields, such as a reason code required only for one callback type.
//! Field-level constraints (enum membership, timestamp layout) are enforced
//! during deserialization and never reach this layer. The decode entry
//! points run validation automatically; hand-built records can be checked
//! through [`is_valid`].

use crate::error::ValidationError;

/// Semantic validation for webhook records and tokens.
pub trait Validate {
    /// Checks rules the field types alone cannot capture.
    fn validate(&self) -> Result<(), ValidationError>;
}

/// Returns whether a value passes validation.
pub fn is_valid<T: Validate>(value: &T) -> bool {
    value.validate().is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    struct AlwaysInvalid;

    impl Validate for AlwaysInvalid {
        fn validate(&self) -> Result<(), ValidationError> {
            Err(ValidationError::MissingEndReason)
        }
    }

    struct AlwaysValid;

    impl Validate for AlwaysValid {
        fn validate(&self) -> Result<(), ValidationError> {
            Ok(())
        }
    }

    #[test]
    fn is_valid_reflects_validation_outcome() {
        assert!(is_valid(&AlwaysValid));
        assert!(!is_valid(&AlwaysInvalid));
    }
}
