//! # Field Constraints
//!
//! A [`Constraint`] narrows what a literal default accepts beyond its kind.
//! A value of the right kind that breaks the constraint is replaced by the
//! default just like a value of the wrong kind.

use a7p_core::Value;

/// Extra condition on a value kept under a literal default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Constraint {
    /// String strictly shorter than this many characters.
    MaxChars(usize),
    /// Symbol drawn from a closed set.
    OneOf(Vec<String>),
    /// Per-member constraints of a record, or of every record in a
    /// sequence. Members that are absent are not checked.
    Members(Vec<(String, Constraint)>),
}

impl Constraint {
    pub fn one_of<I, S>(symbols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Constraint::OneOf(symbols.into_iter().map(Into::into).collect())
    }

    /// Single-member [`Constraint::Members`].
    pub fn member(key: impl Into<String>, constraint: Constraint) -> Self {
        Constraint::Members(vec![(key.into(), constraint)])
    }

    /// Whether `value` satisfies the constraint.
    pub fn admits(&self, value: &Value) -> bool {
        match (self, value) {
            (Constraint::MaxChars(limit), Value::Str(s)) => s.chars().count() < *limit,
            (Constraint::OneOf(symbols), Value::Enum(s) | Value::Str(s)) => {
                symbols.iter().any(|sym| sym == s)
            }
            (Constraint::Members(members), Value::Record(record)) => {
                members.iter().all(|(key, constraint)| {
                    record.get(key).map_or(true, |v| constraint.admits(v))
                })
            }
            (Constraint::Members(_), Value::Seq(items)) => {
                items.iter().all(|item| self.admits(item))
            }
            _ => false,
        }
    }
}
