//! # Criterion Registry
//!
//! Maps keys to criteria. A key is either a bare field name (`zero_x`),
//! which matches that field wherever it occurs, or a full path
//! (`~/profile`), which matches one structural position.
//!
//! ## Lookup
//!
//! [`CriterionRegistry::resolve`] tries the path's final segment first and
//! falls back to the full path. A path nothing resolves for is accepted:
//! unknown fields pass through.
//!
//! ## Invariants
//!
//! - At most one criterion per key. A second registration under the same
//!   key is rejected with [`ValidateError::DuplicateCriterion`].
//! - A fresh registry holds the always-passing [`RootCriterion`] under `~`.

use std::collections::HashMap;
use std::fmt;

use a7p_core::path::ROOT;
use a7p_core::RecordPath;

use crate::criterion::{Criterion, RootCriterion};
use crate::error::{ValidateError, ValidateResult};

/// Keyed table of criteria.
pub struct CriterionRegistry {
    criteria: HashMap<String, Box<dyn Criterion>>,
}

impl CriterionRegistry {
    /// Create a registry holding only the root criterion.
    pub fn new() -> Self {
        let mut criteria: HashMap<String, Box<dyn Criterion>> = HashMap::new();
        criteria.insert(ROOT.to_string(), Box::new(RootCriterion));
        Self { criteria }
    }

    /// Register `criterion` under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`ValidateError::DuplicateCriterion`] if `key` is taken.
    pub fn register(
        &mut self,
        key: impl Into<String>,
        criterion: impl Criterion + 'static,
    ) -> ValidateResult<()> {
        let key = key.into();
        if self.criteria.contains_key(&key) {
            return Err(ValidateError::DuplicateCriterion { key });
        }
        self.criteria.insert(key, Box::new(criterion));
        Ok(())
    }

    /// Remove the criterion under `key`. Returns whether one was present.
    pub fn unregister(&mut self, key: &str) -> bool {
        self.criteria.remove(key).is_some()
    }

    /// Find the criterion for `path`: by final segment, then by full path.
    pub fn resolve(&self, path: &RecordPath) -> Option<&dyn Criterion> {
        self.criteria
            .get(path.name())
            .or_else(|| self.criteria.get(path.as_str()))
            .map(|c| c.as_ref())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.criteria.contains_key(key)
    }

    /// Number of registered criteria, root included.
    pub fn len(&self) -> usize {
        self.criteria.len()
    }

    pub fn is_empty(&self) -> bool {
        self.criteria.is_empty()
    }

    /// Registered keys, sorted.
    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.criteria.keys().map(|k| k.as_str()).collect();
        keys.sort_unstable();
        keys
    }
}

impl Default for CriterionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for CriterionRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CriterionRegistry")
            .field("keys", &self.keys())
            .finish()
    }
}
