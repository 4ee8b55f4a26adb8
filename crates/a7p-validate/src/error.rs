//! # Error Types
//!
//! Validation itself is total and reports through [`Violations`]. Errors
//! exist for two cases only:
//!
//! - a rule table built with the same key twice (programming error, raised
//!   at registration time);
//! - a caller asking for a hard failure instead of inspecting the result.

use thiserror::Error;

use crate::violation::Violations;

/// Errors raised by the validation crate.
#[derive(Error, Debug)]
pub enum ValidateError {
    /// A criterion is already registered under this key.
    #[error("criterion for {key} already exists")]
    DuplicateCriterion {
        /// Bare field name or full path the criterion was registered under.
        key: String,
    },

    /// The record did not pass validation.
    #[error("validation failed with {} violation(s):\n{violations}", .violations.len())]
    ValidationFailed {
        /// Every violation found, in discovery order.
        violations: Violations,
    },
}

impl ValidateError {
    /// Violations carried by a [`ValidateError::ValidationFailed`].
    pub fn violations(&self) -> Option<&Violations> {
        match self {
            ValidateError::ValidationFailed { violations } => Some(violations),
            ValidateError::DuplicateCriterion { .. } => None,
        }
    }
}

/// Result type alias for validation operations.
pub type ValidateResult<T> = Result<T, ValidateError>;
