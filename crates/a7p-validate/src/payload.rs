//! # Payload Rule Set
//!
//! The assembled rule table for a decoded profile payload, and the two entry
//! points callers use:
//!
//! - [`check_payload`] returns every violation and lets the caller decide.
//! - [`validate_payload`] turns a non-empty result into
//!   [`ValidateError::ValidationFailed`](crate::ValidateError::ValidationFailed).
//!
//! Leaf rules are keyed by bare field name, so they apply wherever the field
//! occurs. The profile composite is keyed by its full path `~/profile`.

use a7p_core::fields::{self, scale};
use a7p_core::{RecordPath, Value};

use crate::error::ValidateResult;
use crate::registry::CriterionRegistry;
use crate::rules::{MaxLength, OneOf, ProfileCriterion, ScaledRange};
use crate::validator::TreeValidator;
use crate::violation::Violations;

/// Physical ranges of the scaled numeric fields.
pub const SCALED_FIELDS: [(&str, ScaledRange); 15] = [
    (fields::ZERO_X, ScaledRange::new(-200.0, 200.0, scale::ZERO_X)),
    (fields::ZERO_Y, ScaledRange::new(-200.0, 200.0, scale::ZERO_Y)),
    (fields::SC_HEIGHT, ScaledRange::new(-5000.0, 5000.0, scale::SC_HEIGHT)),
    (fields::R_TWIST, ScaledRange::new(0.0, 100.0, scale::R_TWIST)),
    (
        fields::C_MUZZLE_VELOCITY,
        ScaledRange::new(10.0, 3000.0, scale::C_MUZZLE_VELOCITY),
    ),
    (fields::C_ZERO_TEMPERATURE, ScaledRange::new(-100.0, 100.0, scale::UNIT)),
    (fields::C_T_COEFF, ScaledRange::new(0.0, 5.0, scale::C_T_COEFF)),
    (
        fields::C_ZERO_AIR_TEMPERATURE,
        ScaledRange::new(-100.0, 100.0, scale::UNIT),
    ),
    (
        fields::C_ZERO_AIR_PRESSURE,
        ScaledRange::new(300.0, 1500.0, scale::C_ZERO_AIR_PRESSURE),
    ),
    (fields::C_ZERO_AIR_HUMIDITY, ScaledRange::new(0.0, 100.0, scale::UNIT)),
    (fields::C_ZERO_P_TEMPERATURE, ScaledRange::new(-100.0, 100.0, scale::UNIT)),
    (fields::C_ZERO_W_PITCH, ScaledRange::new(-90.0, 90.0, scale::UNIT)),
    (fields::B_LENGTH, ScaledRange::new(0.01, 200.0, scale::B_LENGTH)),
    (fields::B_WEIGHT, ScaledRange::new(1.0, 6553.5, scale::B_WEIGHT)),
    (fields::B_DIAMETER, ScaledRange::new(0.001, 50.0, scale::B_DIAMETER)),
];

/// Build the full payload rule table.
///
/// # Errors
///
/// Returns [`ValidateError::DuplicateCriterion`](crate::ValidateError::DuplicateCriterion)
/// if two rules claim the same key.
pub fn payload_registry() -> ValidateResult<CriterionRegistry> {
    let mut registry = CriterionRegistry::new();

    for (name, limit) in fields::STRING_FIELDS {
        registry.register(name, MaxLength::new(limit))?;
    }
    for (name, range) in SCALED_FIELDS {
        registry.register(name, range)?;
    }
    registry.register(fields::BC_TYPE, OneOf::new(fields::BC_TYPE_SYMBOLS))?;
    registry.register(fields::TWIST_DIR, OneOf::new(fields::TWIST_DIR_SYMBOLS))?;

    let profile_path = RecordPath::root().join(fields::PROFILE);
    registry.register(profile_path.as_str(), ProfileCriterion::new()?)?;

    Ok(registry)
}

/// A [`TreeValidator`] over [`payload_registry`].
///
/// # Errors
///
/// Same as [`payload_registry`].
pub fn payload_validator() -> ValidateResult<TreeValidator> {
    payload_registry().map(TreeValidator::new)
}

/// Validate a decoded payload and return every violation found.
///
/// # Errors
///
/// Only if the rule table cannot be built; see [`payload_registry`].
pub fn check_payload(payload: &Value) -> ValidateResult<Violations> {
    let validator = payload_validator()?;
    let violations = validator.validate(payload);
    tracing::debug!(violations = violations.len(), "payload validation complete");
    Ok(violations)
}

/// Validate a decoded payload, failing if anything is wrong.
///
/// # Errors
///
/// Returns [`ValidateError::ValidationFailed`](crate::ValidateError::ValidationFailed)
/// carrying every violation when the payload is invalid.
pub fn validate_payload(payload: &Value) -> ValidateResult<()> {
    check_payload(payload)?.into_result()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ValidateError;
    use serde_json::json;

    #[test]
    fn test_payload_registry_builds() {
        let registry = payload_registry().unwrap();
        // root + 8 strings + 15 ranges + 2 enums + profile
        assert_eq!(registry.len(), 27);
        assert!(registry.contains("~/profile"));
        assert!(registry.contains("b_length"));
    }

    #[test]
    fn test_check_payload_reports_leaf_failure() {
        let payload = Value::from_json(&json!({
            "profile": {
                "profile_name": "ok",
                "zero_x": 250_000,
                "distances": [10000],
                "c_zero_distance_idx": 0
            }
        }))
        .unwrap();

        let violations = check_payload(&payload).unwrap();
        assert_eq!(violations.len(), 1);
        let v = &violations.as_slice()[0];
        assert_eq!(v.path().as_str(), "~/profile/zero_x");
        assert_eq!(v.reason(), "expected value in range [-200.0, 200.0]");
    }

    #[test]
    fn test_validate_payload_hard_failure_carries_all() {
        let payload = Value::from_json(&json!({
            "profile": {
                "short_name_top": "far too long",
                "bc_type": "G9",
                "distances": [10000],
                "c_zero_distance_idx": 0
            }
        }))
        .unwrap();

        match validate_payload(&payload) {
            Err(ValidateError::ValidationFailed { violations }) => {
                assert_eq!(violations.len(), 2);
            }
            other => panic!("Expected ValidationFailed, got: {other:?}"),
        }
    }
}
