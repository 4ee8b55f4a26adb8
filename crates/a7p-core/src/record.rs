//! # Decoded Record Tree
//!
//! [`Value`] is the in-memory form of a decoded profile payload: scalars,
//! nested [`Record`]s, and sequences. The external codec produces it (usually
//! through [`Value::from_json`] on a protobuf-to-JSON dump) and the validation
//! and recovery crates consume it.
//!
//! ## Ordering
//!
//! - [`Record`] fields keep insertion order. Order is not significant for
//!   validity, but it fixes traversal order and therefore the order in which
//!   violations are reported.
//! - Sequence order is significant: the element index is part of its path.

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{RecordError, RecordResult};
use crate::path::RecordPath;

// ---------------------------------------------------------------------------
// Value
// ---------------------------------------------------------------------------

/// A node of a decoded record tree.
///
/// Serializes untagged: enum symbols become plain strings, records become
/// maps, sequences become arrays. Deserializing never yields [`Value::Enum`];
/// strings always come back as [`Value::Str`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Boolean flag.
    Bool(bool),
    /// Integer, including fixed-point fields stored in scaled units.
    Int(i64),
    /// Floating-point number.
    Float(f64),
    /// UTF-8 string.
    Str(String),
    /// Enumerated symbol (e.g. `G7`, `RIGHT`).
    Enum(String),
    /// Sequence of values; index order is significant.
    Seq(Vec<Value>),
    /// Nested record.
    Record(Record),
}

/// Discriminant of a [`Value`], used in diagnostics and conformance checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    Bool,
    Int,
    Float,
    Str,
    Enum,
    Seq,
    Record,
}

impl ValueKind {
    /// Lowercase name of the kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            ValueKind::Bool => "bool",
            ValueKind::Int => "int",
            ValueKind::Float => "float",
            ValueKind::Str => "string",
            ValueKind::Enum => "enum",
            ValueKind::Seq => "sequence",
            ValueKind::Record => "record",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Value {
    /// Convenience constructor for a string scalar.
    pub fn str(s: impl Into<String>) -> Self {
        Value::Str(s.into())
    }

    /// Convenience constructor for an enum symbol.
    pub fn symbol(s: impl Into<String>) -> Self {
        Value::Enum(s.into())
    }

    /// The kind of this value.
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Bool(_) => ValueKind::Bool,
            Value::Int(_) => ValueKind::Int,
            Value::Float(_) => ValueKind::Float,
            Value::Str(_) => ValueKind::Str,
            Value::Enum(_) => ValueKind::Enum,
            Value::Seq(_) => ValueKind::Seq,
            Value::Record(_) => ValueKind::Record,
        }
    }

    /// Whether this value is a leaf (neither a record nor a sequence).
    pub fn is_scalar(&self) -> bool {
        !matches!(self, Value::Seq(_) | Value::Record(_))
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Numeric view: integers are widened to `f64`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(n) => Some(*n as f64),
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// String contents of a [`Value::Str`].
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Symbol text of an enum field.
    ///
    /// Codecs that go through JSON hand enum symbols over as strings, so
    /// both [`Value::Enum`] and [`Value::Str`] are accepted here.
    pub fn as_symbol(&self) -> Option<&str> {
        match self {
            Value::Enum(s) | Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_seq(&self) -> Option<&[Value]> {
        match self {
            Value::Seq(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_record(&self) -> Option<&Record> {
        match self {
            Value::Record(record) => Some(record),
            _ => None,
        }
    }

    /// Import a decoded tree from its JSON form.
    ///
    /// Objects become records in document order (the workspace builds
    /// `serde_json` with `preserve_order`), arrays become sequences,
    /// integral numbers become [`Value::Int`], other numbers
    /// [`Value::Float`]. A `null` object member is an absent field and is
    /// skipped.
    ///
    /// # Errors
    ///
    /// - [`RecordError::NullInSequence`] for `null` array elements.
    /// - [`RecordError::IntegerOutOfRange`] for integers above `i64::MAX`.
    /// - [`RecordError::UnrepresentableNumber`] for numbers with no `f64` form.
    pub fn from_json(json: &serde_json::Value) -> RecordResult<Self> {
        convert_json(json, &RecordPath::root())
    }
}

fn convert_json(json: &serde_json::Value, path: &RecordPath) -> RecordResult<Value> {
    use serde_json::Value as Json;

    match json {
        Json::Bool(b) => Ok(Value::Bool(*b)),
        Json::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(Value::Int(i))
            } else if n.is_u64() {
                Err(RecordError::IntegerOutOfRange {
                    path: path.to_string(),
                    value: n.to_string(),
                })
            } else {
                n.as_f64()
                    .filter(|f| f.is_finite())
                    .map(Value::Float)
                    .ok_or_else(|| RecordError::UnrepresentableNumber {
                        path: path.to_string(),
                        value: n.to_string(),
                    })
            }
        }
        Json::String(s) => Ok(Value::Str(s.clone())),
        Json::Array(items) => {
            let mut out = Vec::with_capacity(items.len());
            for (i, item) in items.iter().enumerate() {
                let item_path = path.index(i);
                if item.is_null() {
                    return Err(RecordError::NullInSequence {
                        path: item_path.to_string(),
                    });
                }
                out.push(convert_json(item, &item_path)?);
            }
            Ok(Value::Seq(out))
        }
        Json::Object(map) => {
            let mut record = Record::with_capacity(map.len());
            for (key, child) in map {
                if child.is_null() {
                    continue;
                }
                record.insert(key.clone(), convert_json(child, &path.join(key))?);
            }
            Ok(Value::Record(record))
        }
        // Only reachable at the root; an all-absent payload.
        Json::Null => Ok(Value::Record(Record::new())),
    }
}

impl TryFrom<serde_json::Value> for Value {
    type Error = RecordError;

    fn try_from(json: serde_json::Value) -> RecordResult<Self> {
        Value::from_json(&json)
    }
}

impl From<Record> for Value {
    fn from(record: Record) -> Self {
        Value::Record(record)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Seq(items)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(n) => write!(f, "{n}"),
            // Debug keeps the fractional part: 200.0 rather than 200.
            Value::Float(x) => write!(f, "{x:?}"),
            Value::Str(s) | Value::Enum(s) => f.write_str(s),
            Value::Seq(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Value::Record(record) => write!(f, "{record}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Record
// ---------------------------------------------------------------------------

/// Insertion-ordered mapping from field name to [`Value`].
///
/// Keys are unique. Re-inserting an existing key replaces the value in place
/// and keeps the field's original position.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    entries: Vec<(String, Value)>,
}

impl Record {
    /// Create an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
        }
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn position(&self, key: &str) -> Option<usize> {
        self.entries.iter().position(|(k, _)| k == key)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.position(key).map(|i| &self.entries[i].1)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        match self.position(key) {
            Some(i) => Some(&mut self.entries[i].1),
            None => None,
        }
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.position(key).is_some()
    }

    /// Insert or replace a field, returning the previous value if any.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        let key = key.into();
        let value = value.into();
        match self.position(&key) {
            Some(i) => Some(std::mem::replace(&mut self.entries[i].1, value)),
            None => {
                self.entries.push((key, value));
                None
            }
        }
    }

    /// Remove a field, preserving the order of the remaining ones.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.position(key).map(|i| self.entries.remove(i).1)
    }

    /// Iterate over `(key, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }
}

impl FromIterator<(String, Value)> for Record {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        let mut record = Record::new();
        for (key, value) in iter {
            record.insert(key, value);
        }
        record
    }
}

impl IntoIterator for Record {
    type Item = (String, Value);
    type IntoIter = std::vec::IntoIter<(String, Value)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (key, value)) in self.entries.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{key}: {value}")?;
        }
        f.write_str("}")
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Record {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct RecordVisitor;

        impl<'de> Visitor<'de> for RecordVisitor {
            type Value = Record;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of field names to values")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Record, A::Error> {
                let mut record = Record::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((key, value)) = access.next_entry::<String, Value>()? {
                    record.insert(key, value);
                }
                Ok(record)
            }
        }

        deserializer.deserialize_map(RecordVisitor)
    }
}
