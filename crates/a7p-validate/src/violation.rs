//! # Violations
//!
//! A [`Violation`] records one failed rule: where, on what value, and why.
//! A validation run produces a [`Violations`] list in discovery order, which
//! for the post-order walker means children before their enclosing node.

use std::fmt;

use a7p_core::{RecordPath, Value};
use serde::Serialize;

use crate::error::{ValidateError, ValidateResult};

/// A single rule failure.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Violation {
    path: RecordPath,
    value: Value,
    reason: String,
}

impl Violation {
    pub fn new(path: RecordPath, value: Value, reason: impl Into<String>) -> Self {
        Self {
            path,
            value,
            reason: reason.into(),
        }
    }

    /// Path of the node that failed.
    pub fn path(&self) -> &RecordPath {
        &self.path
    }

    /// The offending value.
    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }
}

/// Renders as:
///
/// ```text
/// Violation:
///     Path: ~/profile/zero_x
///     Value: 250000
///     Reason: expected value in range [-200.0, 200.0]
/// ```
///
/// (tab-indented). Records and sequences render as `<object>`.
impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Violation:\n\tPath: {}\n\tValue: ", self.path)?;
        if self.value.is_scalar() {
            write!(f, "{}", self.value)?;
        } else {
            f.write_str("<object>")?;
        }
        write!(f, "\n\tReason: {}", self.reason)
    }
}

/// Ordered collection of violations from one validation run.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Violations {
    violations: Vec<Violation>,
}

impl Violations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a violation.
    pub fn push(&mut self, violation: Violation) {
        self.violations.push(violation);
    }

    /// Returns the number of violations.
    pub fn len(&self) -> usize {
        self.violations.len()
    }

    /// Returns true if there are no violations.
    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    /// Alias of [`is_empty`](Self::is_empty): the run found nothing wrong.
    pub fn is_valid(&self) -> bool {
        self.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Violation> {
        self.violations.iter()
    }

    pub fn as_slice(&self) -> &[Violation] {
        &self.violations
    }

    /// Consumes self and returns the inner Vec.
    pub fn into_inner(self) -> Vec<Violation> {
        self.violations
    }

    /// Turn a non-empty list into the aggregate failure error.
    ///
    /// # Errors
    ///
    /// Returns [`ValidateError::ValidationFailed`] carrying every violation
    /// when the list is not empty.
    pub fn into_result(self) -> ValidateResult<()> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(ValidateError::ValidationFailed { violations: self })
        }
    }
}

impl fmt::Display for Violations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, v) in self.violations.iter().enumerate() {
            if i > 0 {
                f.write_str("\n\n")?;
            }
            write!(f, "{v}")?;
        }
        Ok(())
    }
}

impl From<Vec<Violation>> for Violations {
    fn from(violations: Vec<Violation>) -> Self {
        Self { violations }
    }
}

impl IntoIterator for Violations {
    type Item = Violation;
    type IntoIter = std::vec::IntoIter<Violation>;

    fn into_iter(self) -> Self::IntoIter {
        self.violations.into_iter()
    }
}

impl<'a> IntoIterator for &'a Violations {
    type Item = &'a Violation;
    type IntoIter = std::slice::Iter<'a, Violation>;

    fn into_iter(self) -> Self::IntoIter {
        self.violations.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use a7p_core::Record;

    fn zero_x_violation() -> Violation {
        Violation::new(
            RecordPath::root().join("profile").join("zero_x"),
            Value::Int(250_000),
            "expected value in range [-200.0, 200.0]",
        )
    }

    #[test]
    fn test_violation_display_scalar() {
        assert_eq!(
            zero_x_violation().to_string(),
            "Violation:\n\tPath: ~/profile/zero_x\n\tValue: 250000\n\tReason: expected value in range [-200.0, 200.0]"
        );
    }

    #[test]
    fn test_violation_display_object() {
        let v = Violation::new(
            RecordPath::root().join("profile"),
            Value::Record(Record::new()),
            "found problems in profile",
        );
        let display = v.to_string();
        assert!(display.contains("\tValue: <object>\n"));
        assert!(display.ends_with("Reason: found problems in profile"));
    }

    #[test]
    fn test_violation_display_sequence_is_object() {
        let v = Violation::new(
            RecordPath::root().join("distances"),
            Value::Seq(vec![Value::Int(1)]),
            "bad",
        );
        assert!(v.to_string().contains("Value: <object>"));
    }

    #[test]
    fn test_violations_into_result() {
        assert!(Violations::new().into_result().is_ok());

        let mut violations = Violations::new();
        violations.push(zero_x_violation());
        match violations.into_result() {
            Err(ValidateError::ValidationFailed { violations }) => {
                assert_eq!(violations.len(), 1);
            }
            other => panic!("Expected ValidationFailed, got: {other:?}"),
        }
    }

    #[test]
    fn test_violations_display_separates_entries() {
        let violations = Violations::from(vec![zero_x_violation(), zero_x_violation()]);
        let display = violations.to_string();
        assert_eq!(display.matches("Violation:").count(), 2);
        assert!(display.contains("]\n\nViolation:"));
    }

    #[test]
    fn test_violations_serialize_as_list() {
        let violations = Violations::from(vec![zero_x_violation()]);
        let json = serde_json::to_value(&violations).unwrap();
        assert_eq!(json[0]["path"], "~/profile/zero_x");
        assert_eq!(json[0]["value"], 250_000);
    }
}
