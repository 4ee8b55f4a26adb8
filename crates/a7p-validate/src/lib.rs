//! # a7p-validate: Path-Addressed Validation
//!
//! Validates a decoded profile payload against per-field and cross-field
//! rules, collecting every failure instead of stopping at the first.
//!
//! ## Moving Parts
//!
//! - [`Criterion`]: one rule. Judges a node and returns a [`Verdict`].
//! - [`CriterionRegistry`]: rules keyed by bare field name or full path.
//!   Lookup tries the path's final segment first, then the full path.
//! - [`TreeValidator`]: walks a [`Value`](a7p_core::Value) tree post-order,
//!   applying the resolved rule at each node after its children.
//! - [`Violations`]: the ordered, flat result of a run.
//! - [`rules`]: leaf rules (ranges, lengths, symbol sets) and the composite
//!   profile rules that see relationships between sibling fields.
//! - [`payload`]: the assembled rule table for a full payload.
//!
//! ## Failure Model
//!
//! Validation is total. A run always yields a [`Violations`] list; turning
//! it into a hard [`ValidateError::ValidationFailed`] is opt-in via
//! [`Violations::into_result`]. The only error raised eagerly is a duplicate
//! registration, which is a programming error.

pub mod criterion;
pub mod error;
pub mod payload;
pub mod registry;
pub mod rules;
pub mod validator;
pub mod violation;

pub use criterion::{Criterion, RootCriterion, Verdict};
pub use error::{ValidateError, ValidateResult};
pub use payload::{check_payload, payload_registry, payload_validator, validate_payload};
pub use registry::CriterionRegistry;
pub use validator::TreeValidator;
pub use violation::{Violation, Violations};
