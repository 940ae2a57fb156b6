//! Newtype identifiers for remote board objects.
//!
//! GitHub Projects hands out opaque node IDs for projects, items, and fields.
//! Each kind is wrapped in its own newtype so a [`FieldId`] can never be passed
//! where an [`ItemId`] is expected, even though all three are strings on the wire.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Macro for String-wrapped newtypes.
// Generates: struct, new() returning Option<Self>, as_str(), Display.
// ---------------------------------------------------------------------------
macro_rules! string_id {
    (
        $(#[$attr:meta])*
        $name:ident
    ) => {
        $(#[$attr])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(String);

        impl $name {
            /// Creates a new identifier, returning `None` if the value is empty.
            pub fn new(value: impl Into<String>) -> Option<Self> {
                let v = value.into();
                if v.is_empty() { None } else { Some(Self(v)) }
            }

            /// Returns the identifier as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

// ---------------------------------------------------------------------------
// Identifiers — GitHub node IDs
// ---------------------------------------------------------------------------

string_id! {
    /// Node ID of a GitHub Projects (v2) board, e.g. `"PVT_kwDOABCD"`.
    ProjectId
}

string_id! {
    /// Node ID of one item on a project board (draft issue, issue, or pull request).
    ItemId
}

string_id! {
    /// Node ID of a custom field defined on a project board.
    FieldId
}

// ---------------------------------------------------------------------------
// Identifiers — user-facing numbers
// ---------------------------------------------------------------------------

/// The project number shown in the board URL (`/orgs/acme/projects/7` → `7`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProjectNumber(u64);

impl ProjectNumber {
    /// Creates a project number from a raw integer.
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    /// Returns the underlying integer value.
    pub fn as_u64(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for ProjectNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Identifiers — UUID-backed (internally generated)
// ---------------------------------------------------------------------------

/// Identifies a single reconciliation run.
///
/// Generated fresh for every invocation and attached to the run's tracing
/// span so all activity from one run can be correlated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RunId(Uuid);

impl RunId {
    /// Generates a new random run identifier.
    pub fn new_random() -> Self {
        Self(Uuid::new_v4())
    }
}

impl std::fmt::Display for RunId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
