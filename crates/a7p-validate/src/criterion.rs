//! # Criteria
//!
//! A [`Criterion`] judges one node of a record tree. It receives the node,
//! its path, and the violations collected so far in the current run.
//!
//! Most criteria only look at the value. Composite criteria may also append
//! violations of their own for things only they can see (see
//! [`rules::profile`](crate::rules::profile)); those land in the same list
//! the walker is filling.

use a7p_core::{RecordPath, Value};

use crate::violation::Violations;

/// Outcome of a single criterion check.
///
/// A passing verdict may still carry a note (for example, the pass-through
/// rules report "not yet implemented"); it is never surfaced as a violation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    valid: bool,
    reason: String,
}

impl Verdict {
    pub fn pass() -> Self {
        Self {
            valid: true,
            reason: String::new(),
        }
    }

    /// Passing verdict with an informational note.
    pub fn pass_with(note: impl Into<String>) -> Self {
        Self {
            valid: true,
            reason: note.into(),
        }
    }

    pub fn fail(reason: impl Into<String>) -> Self {
        Self {
            valid: false,
            reason: reason.into(),
        }
    }

    /// Passing when `valid`, failing otherwise; `reason` is kept either way.
    pub fn check(valid: bool, reason: impl Into<String>) -> Self {
        Self {
            valid,
            reason: reason.into(),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }

    pub fn into_reason(self) -> String {
        self.reason
    }
}

/// A validation rule bound to a registry key.
///
/// Implementations must be `Send + Sync` so a fully built registry can be
/// shared read-only across threads.
pub trait Criterion: Send + Sync {
    /// Judge `value` found at `path`.
    ///
    /// `violations` holds everything reported so far in this run, including
    /// the violations of `value`'s own descendants.
    fn check(&self, value: &Value, path: &RecordPath, violations: &mut Violations) -> Verdict;
}

impl<F> Criterion for F
where
    F: Fn(&Value, &RecordPath, &mut Violations) -> Verdict + Send + Sync,
{
    fn check(&self, value: &Value, path: &RecordPath, violations: &mut Violations) -> Verdict {
        self(value, path, violations)
    }
}

/// Criterion registered under `~`. Always passes.
#[derive(Debug, Clone, Copy, Default)]
pub struct RootCriterion;

impl Criterion for RootCriterion {
    fn check(&self, _value: &Value, _path: &RecordPath, _violations: &mut Violations) -> Verdict {
        Verdict::pass()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use a7p_core::Record;

    #[test]
    fn test_verdict_constructors() {
        assert!(Verdict::pass().is_valid());
        assert!(Verdict::pass_with("not yet implemented").is_valid());
        assert_eq!(Verdict::pass_with("note").reason(), "note");

        let fail = Verdict::fail("too long");
        assert!(!fail.is_valid());
        assert_eq!(fail.into_reason(), "too long");

        assert!(Verdict::check(true, "r").is_valid());
        assert!(!Verdict::check(false, "r").is_valid());
    }

    #[test]
    fn test_closure_is_a_criterion() {
        let positive = |value: &Value, _: &RecordPath, _: &mut Violations| {
            Verdict::check(value.as_i64().is_some_and(|n| n > 0), "expected positive")
        };
        let mut violations = Violations::new();
        let path = RecordPath::root().join("n");
        assert!(positive.check(&Value::Int(3), &path, &mut violations).is_valid());
        assert!(!positive.check(&Value::Int(-3), &path, &mut violations).is_valid());
    }

    #[test]
    fn test_root_criterion_always_passes() {
        let mut violations = Violations::new();
        let verdict = RootCriterion.check(
            &Value::Record(Record::new()),
            &RecordPath::root(),
            &mut violations,
        );
        assert!(verdict.is_valid());
        assert!(violations.is_empty());
    }
}
