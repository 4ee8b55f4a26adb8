//! # a7p-core: Foundational Types for a7p Profiles
//!
//! This crate defines the in-memory shape of a decoded ballistic-profile
//! payload. The binary wire codec lives outside this workspace; it hands us
//! a tree of [`Value`]s and everything downstream (validation, recovery)
//! works on that tree.
//!
//! ## Key Design Principles
//!
//! 1. **One sum type for the decoded tree.** [`Value`] is a closed enum of
//!    scalars, nested [`Record`]s and sequences. Walkers pattern-match on it
//!    instead of probing shapes at runtime.
//!
//! 2. **Insertion order is preserved.** [`Record`] keeps fields in the order
//!    the codec produced them, so traversal order (and therefore violation
//!    order) is reproducible.
//!
//! 3. **Paths are structural addresses.** [`RecordPath`] is built by
//!    descending through keys and sequence indices from the `~` root.
//!
//! 4. **Field names live in one place.** [`fields`] holds every field name
//!    and fixed-point scale factor shared by the rule table and the
//!    recovery schema.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `a7p-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod error;
pub mod fields;
pub mod path;
pub mod record;

pub use error::{RecordError, RecordResult};
pub use path::RecordPath;
pub use record::{Record, Value, ValueKind};
