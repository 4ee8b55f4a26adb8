//! # Profile Rules
//!
//! Composite criteria attached to the `profile` sub-record and its sequence
//! fields.
//!
//! [`ProfileCriterion`] runs a nested [`TreeValidator`] over the profile for
//! the sequence rules, then checks relationships between sibling fields that
//! no single-path rule can see. Violations found by the nested walk land in
//! the shared list under their own paths. A failed dependency check is
//! reported once, against the profile itself.

use a7p_core::fields::{self, scale};
use a7p_core::{Record, RecordPath, Value};

use crate::criterion::{Criterion, Verdict};
use crate::error::ValidateResult;
use crate::registry::CriterionRegistry;
use crate::rules::{IntRange, ScaledRange};
use crate::validator::TreeValidator;
use crate::violation::Violations;

/// Exclusive bounds on the number of distance entries.
pub const DISTANCES_COUNT_RANGE: (usize, usize) = (0, 200);

/// Physical range of each distance entry, in metres.
pub const DISTANCE_RANGE: ScaledRange = ScaledRange::new(1.0, 3000.0, scale::DISTANCE);

/// Inclusive range of the zero distance index field on its own.
pub const ZERO_DISTANCE_IDX_RANGE: IntRange = IntRange::new(0, 200);

fn bracketed(reasons: &[String]) -> String {
    format!("[ {} ]", reasons.join(", "))
}

// ---------------------------------------------------------------------------
// DistancesCriterion
// ---------------------------------------------------------------------------

/// The distance ladder: entry count and per-entry range.
#[derive(Debug, Clone, Copy, Default)]
pub struct DistancesCriterion;

impl Criterion for DistancesCriterion {
    fn check(&self, value: &Value, _path: &RecordPath, _violations: &mut Violations) -> Verdict {
        let Some(distances) = value.as_seq() else {
            return Verdict::fail(format!("expected a sequence of distances, got {}", value.kind()));
        };

        let mut reasons = Vec::new();
        let (lo, hi) = DISTANCES_COUNT_RANGE;
        if !(lo < distances.len() && distances.len() < hi) {
            reasons.push(format!(
                "distances count must be between {lo} and {hi} (exclusive), got {}",
                distances.len()
            ));
        }

        let invalid: Vec<String> = distances
            .iter()
            .filter(|d| !d.as_f64().is_some_and(|n| DISTANCE_RANGE.contains(n)))
            .map(ToString::to_string)
            .collect();
        if !invalid.is_empty() {
            reasons.push(format!("invalid distances: [{}]", invalid.join(", ")));
        }

        if reasons.is_empty() {
            Verdict::pass()
        } else {
            Verdict::fail(bracketed(&reasons))
        }
    }
}

// ---------------------------------------------------------------------------
// PendingCriterion
// ---------------------------------------------------------------------------

/// Extension point for fields whose rules are not written yet.
///
/// Always passes with the note `"not yet implemented"`. Registered for
/// `switches` and `coef_rows` so a real rule can replace it by
/// unregistering the key and registering its own.
#[derive(Debug, Clone, Copy, Default)]
pub struct PendingCriterion;

impl PendingCriterion {
    pub const NOTE: &'static str = "not yet implemented";
}

impl Criterion for PendingCriterion {
    fn check(&self, _value: &Value, path: &RecordPath, _violations: &mut Violations) -> Verdict {
        tracing::trace!(path = %path, "pass-through criterion evaluated");
        Verdict::pass_with(Self::NOTE)
    }
}

// ---------------------------------------------------------------------------
// ZeroDistanceIndex
// ---------------------------------------------------------------------------

/// The zero distance index must address an entry of the distance ladder.
///
/// Valid when `0 <= c_zero_distance_idx < distances.len()`. Absent fields
/// take their wire defaults: index `0`, no distances.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZeroDistanceIndex;

impl ZeroDistanceIndex {
    /// Check the relationship inside one profile record.
    pub fn check_record(&self, profile: &Record) -> Verdict {
        let idx = match profile.get(fields::C_ZERO_DISTANCE_IDX) {
            None => 0,
            Some(Value::Int(n)) => *n,
            Some(other) => {
                return Verdict::fail(format!(
                    "zero distance index must be an integer, got {}",
                    other.kind()
                ))
            }
        };
        let len = match profile.get(fields::DISTANCES) {
            None => 0,
            Some(Value::Seq(items)) => items.len(),
            Some(other) => {
                return Verdict::fail(format!(
                    "distances must be a sequence, got {}",
                    other.kind()
                ))
            }
        };

        let in_range = usize::try_from(idx).is_ok_and(|i| i < len);
        Verdict::check(
            in_range,
            format!("zero distance index {idx} out of range for {len} distances"),
        )
    }
}

impl Criterion for ZeroDistanceIndex {
    fn check(&self, value: &Value, _path: &RecordPath, _violations: &mut Violations) -> Verdict {
        match value.as_record() {
            Some(profile) => self.check_record(profile),
            None => Verdict::fail(format!("expected a profile record, got {}", value.kind())),
        }
    }
}

// ---------------------------------------------------------------------------
// ProfileCriterion
// ---------------------------------------------------------------------------

/// Composite rule for the whole `profile` sub-record.
#[derive(Debug)]
pub struct ProfileCriterion {
    nested: TreeValidator,
    zero_distance_index: ZeroDistanceIndex,
}

impl ProfileCriterion {
    /// Build the nested rule set for the profile's sequence fields.
    ///
    /// # Errors
    ///
    /// Only fails if the nested rule table itself has a duplicate key.
    pub fn new() -> ValidateResult<Self> {
        let mut registry = CriterionRegistry::new();
        registry.register(fields::DISTANCES, DistancesCriterion)?;
        registry.register(fields::C_ZERO_DISTANCE_IDX, ZERO_DISTANCE_IDX_RANGE)?;
        registry.register(fields::SWITCHES, PendingCriterion)?;
        registry.register(fields::COEF_ROWS, PendingCriterion)?;
        Ok(Self {
            nested: TreeValidator::new(registry),
            zero_distance_index: ZeroDistanceIndex,
        })
    }

    /// The validator used for the profile's own subtree.
    pub fn nested(&self) -> &TreeValidator {
        &self.nested
    }
}

impl Criterion for ProfileCriterion {
    fn check(&self, value: &Value, path: &RecordPath, violations: &mut Violations) -> Verdict {
        let Some(profile) = value.as_record() else {
            return Verdict::fail(format!("expected a profile record, got {}", value.kind()));
        };

        self.nested.validate_at(value, path, violations);

        let mut problems = Vec::new();
        let dependency = self.zero_distance_index.check_record(profile);
        if !dependency.is_valid() {
            problems.push(dependency.into_reason());
        }

        if problems.is_empty() {
            Verdict::pass()
        } else {
            Verdict::fail(format!("found problems in profile: {}", bracketed(&problems)))
        }
    }
}
