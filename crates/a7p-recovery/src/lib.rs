//! # a7p-recovery: Schema-Driven Profile Recovery
//!
//! Rebuilds a damaged or partial profile payload from a template of known
//! good values.
//!
//! ## Moving Parts
//!
//! - [`RecoverySchema`]: a versioned template of [`SchemaNode`]s, each a
//!   [`Literal`] default (optionally narrowed by a [`Constraint`]), a
//!   [`Repair`] transform, or a nested [`SchemaRecord`].
//! - [`recover`] / [`recover_with_stats`]: the total, field-by-field pass.
//! - [`payload_schema`]: the shared v1 payload template, built once.
//! - [`RecoveryConfig`]: whether string repairs replace literal defaults.
//!
//! ## Failure Model
//!
//! Recovery has no error type. Any input, including a non-record, yields a
//! record of the schema's shape. Only loading a [`RecoveryConfig`] can fail.
//!
//! ## Example
//!
//! ```
//! use a7p_core::Value;
//! use a7p_recovery::{payload_schema, recover};
//!
//! let damaged = Value::Int(0);
//! let record = recover(&damaged, payload_schema());
//! assert!(record.contains_key("profile"));
//! ```

pub mod config;
pub mod constraint;
pub mod defaults;
pub mod recover;
pub mod repair;
pub mod schema;

pub use config::{RecoveryConfig, RecoveryConfigError};
pub use constraint::Constraint;
pub use defaults::{payload_schema, payload_schema_with_repairs, PAYLOAD_SCHEMA_VERSION};
pub use recover::{recover, recover_with_stats, RecoveryStats};
pub use repair::Repair;
pub use schema::{Literal, RecoverySchema, SchemaNode, SchemaRecord};
