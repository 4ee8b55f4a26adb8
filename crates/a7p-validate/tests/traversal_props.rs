//! Property tests for the tree walker over arbitrary records.

use a7p_core::fields;
use a7p_core::{Record, RecordPath, Value};
use a7p_validate::rules::{MaxLength, OneOf, ScaledRange};
use a7p_validate::{payload_validator, CriterionRegistry, TreeValidator, Violations};
use proptest::prelude::*;

const KEYS: [&str; 9] = [
    fields::PROFILE,
    fields::C_ZERO_DISTANCE_IDX,
    fields::ZERO_X,
    fields::B_WEIGHT,
    fields::PROFILE_NAME,
    fields::SHORT_NAME_TOP,
    fields::BC_TYPE,
    fields::DISTANCES,
    "misc",
];

fn leaf() -> impl Strategy<Value = Value> {
    prop_oneof![
        (-500_000i64..500_000).prop_map(Value::Int),
        "[a-z]{0,12}".prop_map(Value::Str),
        prop::sample::select(vec!["G1", "G7", "G8", "CUSTOM"]).prop_map(Value::symbol),
        any::<bool>().prop_map(Value::Bool),
    ]
}

fn tree() -> impl Strategy<Value = Value> {
    leaf().prop_recursive(4, 48, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..6).prop_map(Value::Seq),
            prop::collection::vec((prop::sample::select(KEYS.to_vec()), inner), 0..6).prop_map(
                |entries| {
                    let mut record = Record::new();
                    for (k, v) in entries {
                        record.insert(k, v);
                    }
                    Value::Record(record)
                }
            ),
        ]
    })
}

/// Registry of independent leaf rules only.
fn leaf_registry() -> CriterionRegistry {
    let mut registry = CriterionRegistry::new();
    registry
        .register(fields::ZERO_X, ScaledRange::new(-200.0, 200.0, 1000.0))
        .unwrap();
    registry
        .register(fields::B_WEIGHT, ScaledRange::new(1.0, 6553.5, 10.0))
        .unwrap();
    registry.register(fields::PROFILE_NAME, MaxLength::new(10)).unwrap();
    registry.register(fields::SHORT_NAME_TOP, MaxLength::new(4)).unwrap();
    registry
        .register(fields::BC_TYPE, OneOf::new(fields::BC_TYPE_SYMBOLS))
        .unwrap();
    registry
}

/// Count nodes whose criterion fails when checked on its own.
fn count_failing(registry: &CriterionRegistry, value: &Value, path: &RecordPath) -> usize {
    let below: usize = match value {
        Value::Record(record) => record
            .iter()
            .map(|(k, child)| count_failing(registry, child, &path.join(k)))
            .sum(),
        Value::Seq(items) => items
            .iter()
            .enumerate()
            .map(|(i, child)| count_failing(registry, child, &path.index(i)))
            .sum(),
        _ => 0,
    };
    let here = registry
        .resolve(path)
        .map(|c| !c.check(value, path, &mut Violations::new()).is_valid())
        .unwrap_or(false);
    below + usize::from(here)
}

proptest! {
    /// Re-running on the same input yields the same ordered violations.
    #[test]
    fn validation_is_deterministic(value in tree()) {
        let validator = payload_validator().unwrap();
        let first = validator.validate(&value);
        let second = validator.validate(&value);
        prop_assert_eq!(first, second);
    }

    /// One violation per failing node, however deep it sits.
    #[test]
    fn violation_count_is_additive(value in tree()) {
        let registry = leaf_registry();
        let expected = count_failing(&registry, &value, &RecordPath::root());
        let validator = TreeValidator::new(registry);
        prop_assert_eq!(validator.validate(&value).len(), expected);
    }

    /// Burying a tree under an unknown field changes no verdicts.
    #[test]
    fn nesting_does_not_change_count(value in tree()) {
        let validator = TreeValidator::new(leaf_registry());
        let mut wrapper = Record::new();
        wrapper.insert("misc", value.clone());
        prop_assert_eq!(
            validator.validate(&Value::Record(wrapper)).len(),
            validator.validate(&value).len()
        );
    }

    /// The boolean result is exactly "no violations".
    #[test]
    fn validate_at_reports_emptiness(value in tree()) {
        let validator = payload_validator().unwrap();
        let mut violations = Violations::new();
        let valid = validator.validate_at(&value, &RecordPath::root(), &mut violations);
        prop_assert_eq!(valid, violations.is_empty());
    }

    /// Violations come out children-first: nothing reported later lies
    /// below something reported earlier.
    #[test]
    fn parents_follow_children(value in tree()) {
        let validator = TreeValidator::new(leaf_registry());
        let violations = validator.validate(&value);
        let paths: Vec<&str> = violations.iter().map(|v| v.path().as_str()).collect();
        for (i, later) in paths.iter().enumerate() {
            for earlier in &paths[..i] {
                let prefix = format!("{}/", earlier);
                prop_assert!(!later.starts_with(&prefix));
            }
        }
    }
}
