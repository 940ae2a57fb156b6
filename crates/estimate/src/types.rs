//! Shared value types for the days-estimate domain.
//!
//! Unlike the newtype identifiers in [`crate::identifiers`], these types carry
//! meaningful values: the estimate itself, the board items read from the
//! remote, the run target, and the counters accumulated during a run.

use serde::{Deserialize, Serialize};

use crate::{EstimatorError, FieldId, ItemId, ProjectId, ProjectNumber};

// ---------------------------------------------------------------------------
// Estimate value
// ---------------------------------------------------------------------------

/// An effort estimate, expressed in working days.
///
/// Values produced by the cost table are exact decimal constants and are
/// compared with `==` against what the board reports.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Days(f64);

impl Days {
    // Only the cost table creates values, so every `Days` is a table constant.
    pub(crate) const fn from_table(value: f64) -> Self {
        Self(value)
    }

    /// Returns the underlying `f64` value.
    pub fn as_f64(self) -> f64 {
        self.0
    }

    /// Returns `true` if `current` holds exactly this value.
    pub fn matches(self, current: Option<f64>) -> bool {
        current == Some(self.0)
    }
}

impl std::fmt::Display for Days {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}d", self.0)
    }
}

// ---------------------------------------------------------------------------
// Run target
// ---------------------------------------------------------------------------

/// The kind of account that owns a project board.
///
/// Selects whether the resolution query goes through `organization(login:)`
/// or `user(login:)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OwnerKind {
    Organization,
    User,
}

impl OwnerKind {
    /// Returns the lower-case name used in configuration and GraphQL.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Organization => "organization",
            Self::User => "user",
        }
    }
}

impl std::str::FromStr for OwnerKind {
    type Err = EstimatorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "organization" => Ok(Self::Organization),
            "user" => Ok(Self::User),
            other => Err(EstimatorError::Configuration {
                message: format!("owner type must be 'organization' or 'user', got '{other}'"),
            }),
        }
    }
}

impl std::fmt::Display for OwnerKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------

/// The default name of the numeric field the engine writes.
pub const DEFAULT_ESTIMATE_FIELD: &str = "Days Estimate";

/// Identifies the board and field a run reconciles.
///
/// Built once by the runner from validated configuration and passed by
/// reference into the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardTarget {
    /// Whether the owner is an organization or a user.
    pub owner_kind: OwnerKind,
    /// Login of the owning account.
    pub owner: String,
    /// Project number within the owner's account.
    pub project_number: ProjectNumber,
    /// Name of the numeric field to keep in sync. Matched case-insensitively.
    pub estimate_field: String,
}

impl BoardTarget {
    /// Creates a target, rejecting empty owner or field names.
    pub fn new(
        owner_kind: OwnerKind,
        owner: impl Into<String>,
        project_number: ProjectNumber,
        estimate_field: impl Into<String>,
    ) -> Result<Self, EstimatorError> {
        let owner = owner.into().trim().to_string();
        if owner.is_empty() {
            return Err(EstimatorError::Configuration {
                message: "project owner must not be empty".to_string(),
            });
        }
        let estimate_field = estimate_field.into().trim().to_string();
        if estimate_field.is_empty() {
            return Err(EstimatorError::Configuration {
                message: "estimate field name must not be empty".to_string(),
            });
        }
        Ok(Self {
            owner_kind,
            owner,
            project_number,
            estimate_field,
        })
    }
}

// ---------------------------------------------------------------------------
// Remote descriptors
// ---------------------------------------------------------------------------

/// A custom field defined on the project board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    pub id: FieldId,
    pub name: String,
}

/// Identifiers resolved once at the start of every run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedFields {
    pub project_id: ProjectId,
    pub estimate_field: FieldDescriptor,
}

// ---------------------------------------------------------------------------
// Work items
// ---------------------------------------------------------------------------

/// Title used for items whose content exposes no title.
pub const UNTITLED: &str = "<no title>";

/// One item on the board, as read at the start of a run.
///
/// Every extracted field is optional; "absent" is a real state that the engine
/// reports separately from "present but invalid".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkItem {
    id: ItemId,
    title: String,
    size_label: Option<String>,
    risk_label: Option<String>,
    current_estimate: Option<f64>,
}

impl WorkItem {
    /// Creates an item with no labels and no stored estimate.
    ///
    /// A missing or blank title is replaced by [`UNTITLED`].
    pub fn new(id: ItemId, title: Option<String>) -> Self {
        let title = title
            .filter(|t| !t.trim().is_empty())
            .unwrap_or_else(|| UNTITLED.to_string());
        Self {
            id,
            title,
            size_label: None,
            risk_label: None,
            current_estimate: None,
        }
    }

    /// Sets the raw "Size" label.
    #[must_use]
    pub fn with_size_label(mut self, label: impl Into<String>) -> Self {
        self.size_label = Some(label.into());
        self
    }

    /// Sets the raw "Risk" label.
    #[must_use]
    pub fn with_risk_label(mut self, label: impl Into<String>) -> Self {
        self.risk_label = Some(label.into());
        self
    }

    /// Sets the value currently stored in the estimate field.
    #[must_use]
    pub fn with_current_estimate(mut self, value: f64) -> Self {
        self.current_estimate = Some(value);
        self
    }

    pub fn id(&self) -> &ItemId {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// The raw "Size" label, or `None` if the item has no size set.
    pub fn size_label(&self) -> Option<&str> {
        self.size_label.as_deref()
    }

    /// The raw "Risk" label, or `None` if the item has no risk set.
    pub fn risk_label(&self) -> Option<&str> {
        self.risk_label.as_deref()
    }

    /// The estimate stored on the board when the item was fetched.
    ///
    /// May be stale by the time an update is issued; writes do not check it.
    pub fn current_estimate(&self) -> Option<f64> {
        self.current_estimate
    }
}

// ---------------------------------------------------------------------------
// Run statistics
// ---------------------------------------------------------------------------

/// Counters accumulated over one run. Never persisted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunStatistics {
    /// Items fetched from the board.
    pub total: u64,
    /// Items whose estimate was written (or would be, in a dry run).
    pub changed: u64,
    /// Items that already held the computed estimate.
    pub unchanged: u64,
    /// Items skipped because Size or Risk was not set.
    pub skipped_missing: u64,
    /// Items with an invalid label or a failed update.
    pub errored: u64,
}

impl std::fmt::Display for RunStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} items: {} changed, {} unchanged, {} skipped (missing size/risk), {} errored",
            self.total, self.changed, self.unchanged, self.skipped_missing, self.errored
        )
    }
}
