//! # Error Types
//!
//! Errors raised while importing a decoded tree into the [`Value`] model.
//! Validation and recovery never fail on a well-formed tree, so this is the
//! only fallible boundary in the core crate.
//!
//! [`Value`]: crate::Value

use thiserror::Error;

/// Error converting an external tree into a [`crate::Value`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RecordError {
    /// `null` appeared where a value is mandatory (inside a sequence).
    #[error("null is not allowed at {path}")]
    NullInSequence {
        /// Path of the offending element.
        path: String,
    },

    /// Integer does not fit the signed 64-bit range used by fixed-point fields.
    #[error("integer {value} at {path} is outside the i64 range")]
    IntegerOutOfRange {
        /// Path of the offending value.
        path: String,
        /// Textual rendering of the number.
        value: String,
    },

    /// Number could not be represented as a finite float.
    #[error("number at {path} is not representable: {value}")]
    UnrepresentableNumber {
        /// Path of the offending value.
        path: String,
        /// Textual rendering of the number.
        value: String,
    },
}

/// Result type alias for record operations.
pub type RecordResult<T> = Result<T, RecordError>;
