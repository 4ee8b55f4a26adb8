//! # Rules
//!
//! Concrete criteria for the profile payload.
//!
//! Leaf rules judge one scalar and live here. Composite rules that look at a
//! whole sub-record live in [`profile`].
//!
//! Numeric payload fields are fixed-point integers. [`ScaledRange`] divides
//! the stored value by its scale factor before comparing against bounds in
//! physical units, so `zero_x = -200000` with scale `1000` is `-200.0`.

pub mod profile;

use std::fmt;

use a7p_core::{RecordPath, Value};

use crate::criterion::{Criterion, Verdict};
use crate::violation::Violations;

pub use profile::{DistancesCriterion, PendingCriterion, ProfileCriterion, ZeroDistanceIndex};

// ---------------------------------------------------------------------------
// ScaledRange
// ---------------------------------------------------------------------------

/// Inclusive range over a descaled numeric value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaledRange {
    min: f64,
    max: f64,
    scale: f64,
}

impl ScaledRange {
    /// Range `[min, max]` in physical units over values stored times `scale`.
    pub const fn new(min: f64, max: f64, scale: f64) -> Self {
        Self { min, max, scale }
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Whether a stored value falls inside the range once descaled.
    pub fn contains(&self, stored: f64) -> bool {
        let physical = stored / self.scale;
        self.min <= physical && physical <= self.max
    }

    fn reason(&self) -> String {
        format!("expected value in range [{:?}, {:?}]", self.min, self.max)
    }
}

impl Criterion for ScaledRange {
    fn check(&self, value: &Value, _path: &RecordPath, _violations: &mut Violations) -> Verdict {
        match value.as_f64() {
            Some(stored) => Verdict::check(self.contains(stored), self.reason()),
            None => Verdict::fail(format!("{}, got {}", self.reason(), value.kind())),
        }
    }
}

// ---------------------------------------------------------------------------
// IntRange
// ---------------------------------------------------------------------------

/// Inclusive range over an unscaled integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntRange {
    min: i64,
    max: i64,
}

impl IntRange {
    pub const fn new(min: i64, max: i64) -> Self {
        Self { min, max }
    }

    fn reason(&self) -> String {
        format!("expected integer value in range [{}, {}]", self.min, self.max)
    }
}

impl Criterion for IntRange {
    fn check(&self, value: &Value, _path: &RecordPath, _violations: &mut Violations) -> Verdict {
        match value.as_i64() {
            Some(n) => Verdict::check((self.min..=self.max).contains(&n), self.reason()),
            None => Verdict::fail(format!("{}, got {}", self.reason(), value.kind())),
        }
    }
}

// ---------------------------------------------------------------------------
// MaxLength
// ---------------------------------------------------------------------------

/// String strictly shorter than `limit` characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaxLength {
    limit: usize,
}

impl MaxLength {
    pub const fn new(limit: usize) -> Self {
        Self { limit }
    }

    pub fn limit(&self) -> usize {
        self.limit
    }
}

impl Criterion for MaxLength {
    fn check(&self, value: &Value, _path: &RecordPath, _violations: &mut Violations) -> Verdict {
        let reason = format!("expected string shorter than {} characters", self.limit);
        match value.as_str() {
            Some(s) => Verdict::check(s.chars().count() < self.limit, reason),
            None => Verdict::fail(format!("{reason}, got {}", value.kind())),
        }
    }
}

// ---------------------------------------------------------------------------
// OneOf
// ---------------------------------------------------------------------------

/// Enumerated symbol drawn from a closed set.
///
/// Accepts both enum symbols and plain strings, since a decoder may hand
/// either back for an enum field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OneOf {
    symbols: Vec<String>,
}

impl OneOf {
    pub fn new<I, S>(symbols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            symbols: symbols.into_iter().map(Into::into).collect(),
        }
    }

    pub fn symbols(&self) -> &[String] {
        &self.symbols
    }
}

impl fmt::Display for OneOf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, s) in self.symbols.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "'{s}'")?;
        }
        f.write_str("]")
    }
}

impl Criterion for OneOf {
    fn check(&self, value: &Value, _path: &RecordPath, _violations: &mut Violations) -> Verdict {
        let reason = format!("expected one of {self}");
        match value.as_symbol() {
            Some(sym) => Verdict::check(self.symbols.iter().any(|s| s == sym), reason),
            None => Verdict::fail(format!("{reason}, got {}", value.kind())),
        }
    }
}
