//! # Recovery Schema
//!
//! A template with the same shape as a valid payload. Each field holds one
//! [`SchemaNode`]:
//!
//! - [`SchemaNode::Default`]: a [`Literal`] used when the actual value is
//!   absent, of the wrong shape, or outside the literal's [`Constraint`],
//! - [`SchemaNode::Repair`]: a transform of whatever the record holds,
//! - [`SchemaNode::Record`]: a nested template for a sub-record.
//!
//! Schemas are immutable once built and may be shared across threads.

use a7p_core::{Record, Value};

use crate::constraint::Constraint;
use crate::repair::Repair;

/// One field of a recovery template.
#[derive(Debug, Clone)]
pub enum SchemaNode {
    Default(Literal),
    Repair(Repair),
    Record(SchemaRecord),
}

/// A literal default, optionally constrained.
#[derive(Debug, Clone, PartialEq)]
pub struct Literal {
    value: Value,
    constraint: Option<Constraint>,
}

impl Literal {
    pub fn new(value: Value) -> Self {
        Self {
            value,
            constraint: None,
        }
    }

    /// Builder form of [`constrain`](Self::constrain).
    pub fn with_constraint(mut self, constraint: Constraint) -> Self {
        self.constrain(constraint);
        self
    }

    pub fn constrain(&mut self, constraint: Constraint) {
        self.constraint = Some(constraint);
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn constraint(&self) -> Option<&Constraint> {
        self.constraint.as_ref()
    }

    /// Whether a value already conformed to this literal's kind also meets
    /// its constraint.
    pub fn admits(&self, value: &Value) -> bool {
        self.constraint.as_ref().map_or(true, |c| c.admits(value))
    }
}

impl From<Value> for Literal {
    fn from(value: Value) -> Self {
        Literal::new(value)
    }
}

impl From<Value> for SchemaNode {
    fn from(value: Value) -> Self {
        SchemaNode::Default(Literal::new(value))
    }
}

impl From<Literal> for SchemaNode {
    fn from(literal: Literal) -> Self {
        SchemaNode::Default(literal)
    }
}

impl From<Repair> for SchemaNode {
    fn from(repair: Repair) -> Self {
        SchemaNode::Repair(repair)
    }
}

impl From<SchemaRecord> for SchemaNode {
    fn from(record: SchemaRecord) -> Self {
        SchemaNode::Record(record)
    }
}

/// Ordered template for a record. Recovered records list their fields in
/// this order.
#[derive(Debug, Clone, Default)]
pub struct SchemaRecord {
    fields: Vec<(String, SchemaNode)>,
}

impl SchemaRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`insert`](Self::insert).
    pub fn with(mut self, key: impl Into<String>, node: impl Into<SchemaNode>) -> Self {
        self.insert(key, node);
        self
    }

    /// Set the node for `key`, replacing any previous one in place.
    pub fn insert(&mut self, key: impl Into<String>, node: impl Into<SchemaNode>) {
        let key = key.into();
        let node = node.into();
        match self.fields.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => *slot = node,
            None => self.fields.push((key, node)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&SchemaNode> {
        self.fields.iter().find(|(k, _)| k == key).map(|(_, n)| n)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut SchemaNode> {
        self.fields.iter_mut().find(|(k, _)| k == key).map(|(_, n)| n)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &SchemaNode)> {
        self.fields.iter().map(|(k, n)| (k.as_str(), n))
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// A versioned recovery template for a whole payload.
#[derive(Debug, Clone)]
pub struct RecoverySchema {
    version: u32,
    root: SchemaRecord,
}

impl RecoverySchema {
    pub fn new(version: u32, root: SchemaRecord) -> Self {
        Self { version, root }
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    pub fn root(&self) -> &SchemaRecord {
        &self.root
    }

    /// Recover `value` against this schema. See [`crate::recover`].
    pub fn recover(&self, value: &Value) -> Record {
        crate::recover::recover(value, self)
    }
}
