//! # Recovery
//!
//! Rebuilds a payload field by field from a [`RecoverySchema`].
//!
//! For every field the schema names:
//!
//! - a literal default replaces the actual value unless the actual value
//!   conforms to it (see below) and meets the literal's constraint;
//! - a repair is applied to the actual value, absent or not;
//! - a nested template recurses into the actual sub-record.
//!
//! Fields the schema does not name are dropped. The output always has
//! exactly the schema's shape, so recovering it again changes nothing.
//!
//! ## Conformance
//!
//! | default | accepts | kept as |
//! |---|---|---|
//! | `Int` | `Int` | as is |
//! | `Float` | `Int`, `Float` | `Float` |
//! | `Enum` | `Enum`, `Str` | `Enum` |
//! | `Str`, `Bool` | same kind | as is |
//! | `Record` | a record holding every template key, each conforming | projected onto the template keys |
//! | `Seq` | a sequence whose elements all conform to the template's first element | conformed elements |
//!
//! An empty template sequence accepts any sequence.

use a7p_core::{Record, RecordPath, Value};
use serde::Serialize;

use crate::schema::{RecoverySchema, SchemaNode, SchemaRecord};

/// What a recovery pass changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RecoveryStats {
    /// Fields replaced by their literal default.
    pub defaulted: usize,
    /// Fields whose repair produced a different value.
    pub repaired: usize,
    /// Fields present in the input but not in the schema.
    pub dropped: usize,
}

impl RecoveryStats {
    /// Whether the input already matched the schema.
    pub fn is_clean(&self) -> bool {
        self.defaulted == 0 && self.repaired == 0 && self.dropped == 0
    }
}

/// Recover `value` against `schema`. Never fails.
///
/// A `value` that is not a record is treated as an empty one.
pub fn recover(value: &Value, schema: &RecoverySchema) -> Record {
    recover_with_stats(value, schema).0
}

/// [`recover`], also reporting what changed.
pub fn recover_with_stats(value: &Value, schema: &RecoverySchema) -> (Record, RecoveryStats) {
    let mut stats = RecoveryStats::default();
    let record = recover_record(
        value.as_record(),
        schema.root(),
        &RecordPath::root(),
        &mut stats,
    );
    tracing::debug!(
        version = schema.version(),
        defaulted = stats.defaulted,
        repaired = stats.repaired,
        dropped = stats.dropped,
        "recovery pass complete"
    );
    (record, stats)
}

fn recover_record(
    actual: Option<&Record>,
    template: &SchemaRecord,
    path: &RecordPath,
    stats: &mut RecoveryStats,
) -> Record {
    let mut out = Record::with_capacity(template.len());

    for (key, node) in template.iter() {
        let field_path = path.join(key);
        let current = actual.and_then(|r| r.get(key));

        let value = match node {
            SchemaNode::Default(literal) => match current
                .and_then(|v| conform(v, literal.value()))
                .filter(|kept| literal.admits(kept))
            {
                Some(kept) => kept,
                None => {
                    stats.defaulted += 1;
                    tracing::trace!(
                        path = %field_path,
                        found = current.map_or("nothing", |v| v.kind().as_str()),
                        "field replaced by default"
                    );
                    literal.value().clone()
                }
            },
            SchemaNode::Repair(repair) => {
                let repaired = repair.apply(current);
                if current != Some(&repaired) {
                    stats.repaired += 1;
                    tracing::trace!(path = %field_path, "field repaired");
                }
                repaired
            }
            SchemaNode::Record(nested) => Value::Record(recover_record(
                current.and_then(Value::as_record),
                nested,
                &field_path,
                stats,
            )),
        };
        out.insert(key, value);
    }

    if let Some(actual) = actual {
        for key in actual.keys().filter(|k| !template.contains_key(k)) {
            stats.dropped += 1;
            tracing::trace!(path = %path.join(key), "unknown field dropped");
        }
    }

    out
}

/// The form of `actual` kept under `default`, or `None` if it does not
/// conform.
pub fn conform(actual: &Value, default: &Value) -> Option<Value> {
    match (default, actual) {
        (Value::Int(_), Value::Int(_))
        | (Value::Str(_), Value::Str(_))
        | (Value::Bool(_), Value::Bool(_))
        | (Value::Float(_), Value::Float(_))
        | (Value::Enum(_), Value::Enum(_)) => Some(actual.clone()),
        (Value::Float(_), Value::Int(n)) => Some(Value::Float(*n as f64)),
        (Value::Enum(_), Value::Str(s)) => Some(Value::Enum(s.clone())),
        (Value::Record(template), Value::Record(record)) => {
            let mut projected = Record::with_capacity(template.len());
            for (key, expected) in template.iter() {
                let kept = conform(record.get(key)?, expected)?;
                projected.insert(key, kept);
            }
            Some(Value::Record(projected))
        }
        (Value::Seq(template), Value::Seq(items)) => match template.first() {
            None => Some(actual.clone()),
            Some(element) => items
                .iter()
                .map(|item| conform(item, element))
                .collect::<Option<Vec<_>>>()
                .map(Value::Seq),
        },
        _ => None,
    }
}
