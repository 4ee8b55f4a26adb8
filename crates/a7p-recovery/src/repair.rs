//! # Repairs
//!
//! A [`Repair`] computes a field's recovered value from whatever the damaged
//! record holds there, instead of discarding it for a literal default.

use std::fmt;
use std::sync::Arc;

use a7p_core::Value;

/// Fallback text used when a repaired string field holds no string.
pub const DEFAULT_FALLBACK: &str = "nil";

/// Signature of a user-supplied repair. Receives `None` for an absent field.
pub type RepairFn = dyn Fn(Option<&Value>) -> Value + Send + Sync;

/// Transform of a field's current value.
#[derive(Clone)]
pub enum Repair {
    /// Keep a string, cut to at most `max_chars` characters. Anything that
    /// is not a string becomes `fallback`, cut the same way.
    TruncateString { max_chars: usize, fallback: String },
    /// Arbitrary transform.
    Custom(Arc<RepairFn>),
}

impl Repair {
    /// Truncation to `max_chars` with the `"nil"` fallback.
    pub fn truncate(max_chars: usize) -> Self {
        Self::truncate_or(max_chars, DEFAULT_FALLBACK)
    }

    pub fn truncate_or(max_chars: usize, fallback: impl Into<String>) -> Self {
        Self::TruncateString {
            max_chars,
            fallback: fallback.into(),
        }
    }

    pub fn custom<F>(f: F) -> Self
    where
        F: Fn(Option<&Value>) -> Value + Send + Sync + 'static,
    {
        Self::Custom(Arc::new(f))
    }

    /// Compute the repaired value.
    pub fn apply(&self, current: Option<&Value>) -> Value {
        match self {
            Repair::TruncateString {
                max_chars,
                fallback,
            } => {
                let source = current.and_then(Value::as_str).unwrap_or(fallback);
                Value::Str(truncate_chars(source, *max_chars).to_string())
            }
            Repair::Custom(f) => f(current),
        }
    }
}

impl fmt::Debug for Repair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Repair::TruncateString {
                max_chars,
                fallback,
            } => f
                .debug_struct("TruncateString")
                .field("max_chars", max_chars)
                .field("fallback", fallback)
                .finish(),
            Repair::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// Longest prefix of `s` holding at most `max_chars` characters.
fn truncate_chars(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((end, _)) => &s[..end],
        None => s,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_keeps_short_strings() {
        let repair = Repair::truncate(8);
        assert_eq!(repair.apply(Some(&Value::str("308W"))), Value::str("308W"));
    }

    #[test]
    fn test_truncate_cuts_long_strings_by_chars() {
        let repair = Repair::truncate(3);
        assert_eq!(repair.apply(Some(&Value::str("abcdef"))), Value::str("abc"));
        assert_eq!(repair.apply(Some(&Value::str("ααααα"))), Value::str("ααα"));
    }

    #[test]
    fn test_truncate_falls_back_on_non_string() {
        let repair = Repair::truncate_or(49, "Warning: Restored profile");
        assert_eq!(
            repair.apply(Some(&Value::Int(7))),
            Value::str("Warning: Restored profile")
        );
        assert_eq!(repair.apply(None), Value::str("Warning: Restored profile"));
    }

    #[test]
    fn test_fallback_is_truncated_too() {
        let repair = Repair::truncate_or(4, "Warning");
        assert_eq!(repair.apply(None), Value::str("Warn"));
    }

    #[test]
    fn test_custom_repair() {
        let double = Repair::custom(|v| match v.and_then(Value::as_i64) {
            Some(n) => Value::Int(n * 2),
            None => Value::Int(0),
        });
        assert_eq!(double.apply(Some(&Value::Int(21))), Value::Int(42));
        assert_eq!(double.apply(None), Value::Int(0));
        assert_eq!(format!("{double:?}"), "Custom(..)");
    }

    #[test]
    fn test_truncate_chars_boundaries() {
        assert_eq!(truncate_chars("", 3), "");
        assert_eq!(truncate_chars("abc", 3), "abc");
        assert_eq!(truncate_chars("abc", 0), "");
    }
}
