//! # Record Paths
//!
//! A [`RecordPath`] is the structural address of a node in a decoded record.
//! It starts at the `~` root and grows one segment per map key or sequence
//! index, rendered slash-separated:
//!
//! ```text
//! ~                          the whole payload
//! ~/profile                  a nested record
//! ~/profile/distances/[3]    the fourth element of a sequence
//! ```
//!
//! Rules are looked up either by the final segment ([`RecordPath::name`]) or
//! by the full rendering ([`RecordPath::as_str`]).

use std::fmt;

use serde::{Serialize, Serializer};

/// Rendering of the root path.
pub const ROOT: &str = "~";

/// Structural address of a node within a record tree.
///
/// Paths are immutable; [`join`](Self::join) and [`index`](Self::index)
/// return new paths.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RecordPath {
    rendered: String,
    name_start: usize,
}

impl RecordPath {
    /// The `~` root path.
    pub fn root() -> Self {
        Self {
            rendered: ROOT.to_string(),
            name_start: 0,
        }
    }

    /// Descend into a map field.
    pub fn join(&self, key: &str) -> Self {
        let mut rendered = String::with_capacity(self.rendered.len() + key.len() + 1);
        rendered.push_str(&self.rendered);
        rendered.push('/');
        let name_start = rendered.len();
        rendered.push_str(key);
        Self {
            rendered,
            name_start,
        }
    }

    /// Descend into a sequence element; the segment renders as `[index]`.
    pub fn index(&self, index: usize) -> Self {
        self.join(&format!("[{index}]"))
    }

    /// Final segment of the path (`~` for the root).
    pub fn name(&self) -> &str {
        &self.rendered[self.name_start..]
    }

    /// Full slash-separated rendering.
    pub fn as_str(&self) -> &str {
        &self.rendered
    }

    /// Whether this is the `~` root.
    pub fn is_root(&self) -> bool {
        self.name_start == 0
    }
}

impl Default for RecordPath {
    fn default() -> Self {
        Self::root()
    }
}

impl fmt::Display for RecordPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.rendered)
    }
}

impl AsRef<str> for RecordPath {
    fn as_ref(&self) -> &str {
        &self.rendered
    }
}

impl Serialize for RecordPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.rendered)
    }
}
