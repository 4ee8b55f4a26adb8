//! # Tree Validator
//!
//! Walks a decoded record and applies the registry's criteria to every node.
//!
//! ## Traversal
//!
//! Post-order: a node's children are visited before the node's own criterion
//! runs. Record fields are visited in insertion order and sequence elements
//! in index order. One [`Violations`] list is threaded through the whole walk,
//! so a composite criterion sees the violations of its own subtree and the
//! result is a single flat list, children before parents.
//!
//! The walk never stops early and never fails. Whether the input is valid is
//! exactly whether the returned list is empty.

use a7p_core::{RecordPath, Value};

use crate::registry::CriterionRegistry;
use crate::violation::{Violation, Violations};

/// Validator bound to one criterion registry.
#[derive(Debug, Default)]
pub struct TreeValidator {
    registry: CriterionRegistry,
}

impl TreeValidator {
    pub fn new(registry: CriterionRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &CriterionRegistry {
        &self.registry
    }

    /// Validate `value` as the root of a record tree.
    pub fn validate(&self, value: &Value) -> Violations {
        let mut violations = Violations::new();
        self.validate_at(value, &RecordPath::root(), &mut violations);
        violations
    }

    /// Validate the subtree `value` found at `path`, appending to `violations`.
    ///
    /// Returns `violations.is_empty()` after the walk, which includes anything
    /// the caller had already collected.
    pub fn validate_at(
        &self,
        value: &Value,
        path: &RecordPath,
        violations: &mut Violations,
    ) -> bool {
        self.walk(value, path, violations);
        violations.is_empty()
    }

    fn walk(&self, value: &Value, path: &RecordPath, violations: &mut Violations) {
        match value {
            Value::Record(record) => {
                for (key, child) in record.iter() {
                    self.walk(child, &path.join(key), violations);
                }
            }
            Value::Seq(items) => {
                for (i, child) in items.iter().enumerate() {
                    self.walk(child, &path.index(i), violations);
                }
            }
            _ => {}
        }

        if let Some(criterion) = self.registry.resolve(path) {
            let verdict = criterion.check(value, path, violations);
            if !verdict.is_valid() {
                violations.push(Violation::new(
                    path.clone(),
                    value.clone(),
                    verdict.into_reason(),
                ));
            }
        }
    }
}

impl From<CriterionRegistry> for TreeValidator {
    fn from(registry: CriterionRegistry) -> Self {
        Self::new(registry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::criterion::Verdict;
    use a7p_core::Record;
    use serde_json::json;

    fn tree(json: serde_json::Value) -> Value {
        Value::from_json(&json).unwrap()
    }

    fn non_negative(value: &Value, _: &RecordPath, _: &mut Violations) -> Verdict {
        match value.as_i64() {
            Some(n) => Verdict::check(n >= 0, "expected non-negative value"),
            None => Verdict::fail("expected integer value"),
        }
    }

    #[test]
    fn test_empty_record_at_root_is_valid() {
        let validator = TreeValidator::default();
        let violations = validator.validate(&Value::Record(Record::new()));
        assert!(violations.is_empty());
    }

    #[test]
    fn test_unknown_fields_pass() {
        let validator = TreeValidator::default();
        let value = tree(json!({"anything": [1, {"nested": "x"}], "else": 2.5}));
        assert!(validator.validate(&value).is_valid());
    }

    #[test]
    fn test_all_failures_are_collected() {
        let mut registry = CriterionRegistry::new();
        registry.register("n", non_negative).unwrap();
        let validator = TreeValidator::new(registry);

        let value = tree(json!({"a": {"n": -1}, "b": [{"n": 3}, {"n": -2}], "n": -5}));
        let paths: Vec<String> = validator
            .validate(&value)
            .iter()
            .map(|v| v.path().to_string())
            .collect();
        assert_eq!(paths, vec!["~/a/n", "~/b/[1]/n", "~/n"]);
    }

    #[test]
    fn test_children_reported_before_parent() {
        let mut registry = CriterionRegistry::new();
        registry.register("n", non_negative).unwrap();
        registry
            .register("~/group", |_: &Value, _: &RecordPath, _: &mut Violations| {
                Verdict::fail("group rejected")
            })
            .unwrap();
        let validator = TreeValidator::new(registry);

        let violations = validator.validate(&tree(json!({"group": {"n": -1}})));
        assert_eq!(violations.len(), 2);
        assert_eq!(violations.as_slice()[0].path().as_str(), "~/group/n");
        assert_eq!(violations.as_slice()[1].path().as_str(), "~/group");
        assert_eq!(violations.as_slice()[1].reason(), "group rejected");
    }

    #[test]
    fn test_parent_sees_descendant_violations() {
        let mut registry = CriterionRegistry::new();
        registry.register("n", non_negative).unwrap();
        registry
            .register(
                "~/group",
                |_: &Value, _: &RecordPath, so_far: &mut Violations| {
                    Verdict::check(so_far.is_empty(), format!("{} below", so_far.len()))
                },
            )
            .unwrap();
        let validator = TreeValidator::new(registry);

        let violations = validator.validate(&tree(json!({"group": {"n": -1, "m": {"n": -1}}})));
        assert_eq!(violations.len(), 3);
        assert_eq!(violations.as_slice()[2].reason(), "2 below");
    }

    #[test]
    fn test_validate_at_threads_existing_violations() {
        let mut registry = CriterionRegistry::new();
        registry.register("n", non_negative).unwrap();
        let validator = TreeValidator::new(registry);

        let mut violations = Violations::new();
        let path = RecordPath::root().join("outer");
        assert!(validator.validate_at(&tree(json!({"n": 1})), &path, &mut violations));
        assert!(!validator.validate_at(&tree(json!({"n": -1})), &path, &mut violations));
        assert_eq!(violations.as_slice()[0].path().as_str(), "~/outer/n");
    }

    #[test]
    fn test_sequence_elements_addressed_by_index() {
        let mut registry = CriterionRegistry::new();
        registry
            .register("[2]", |_: &Value, _: &RecordPath, _: &mut Violations| {
                Verdict::fail("third element")
            })
            .unwrap();
        let validator = TreeValidator::new(registry);

        let violations = validator.validate(&tree(json!({"xs": [0, 0, 0, 0]})));
        assert_eq!(violations.len(), 1);
        assert_eq!(violations.as_slice()[0].path().as_str(), "~/xs/[2]");
    }
}
