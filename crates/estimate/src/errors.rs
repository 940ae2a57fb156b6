//! Error types for the days-estimate domain.
//!
//! Errors are split by how far they travel:
//!
//! - [`EstimatorError`] aborts a run. It is returned from the engine to the
//!   runner, which maps it to a non-zero exit status.
//! - [`EvaluationError`] and [`GatewayError`] raised while handling a single
//!   item are captured in that item's outcome and never escape the item loop.
//!   [`GatewayError`] raised while resolving identifiers or fetching items is
//!   wrapped into an [`EstimatorError`] instead.

use thiserror::Error;

use crate::{OwnerKind, ProjectNumber};

// ---------------------------------------------------------------------------
// Run-level errors
// ---------------------------------------------------------------------------

/// Errors that end a run before or during the fetch phase.
#[derive(Debug, Error)]
pub enum EstimatorError {
    /// A required setting is missing or malformed.
    ///
    /// Produced before the engine starts; the engine never runs with an
    /// invalid configuration.
    #[error("Configuration error: {message}")]
    Configuration {
        /// Description of the configuration problem.
        message: String,
    },

    /// The project or the target estimate field could not be resolved.
    #[error("Remote lookup failed: {0}")]
    Lookup(#[source] GatewayError),

    /// Paginated item retrieval failed part-way.
    ///
    /// No items are processed: the cursor position is lost with the failed page.
    #[error("Fetching project items failed: {0}")]
    Fetch(#[source] GatewayError),
}

// ---------------------------------------------------------------------------
// Remote access errors
// ---------------------------------------------------------------------------

/// Failures reported by a [`crate::BoardGateway`] implementation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    /// The owner or the project number did not resolve to a project.
    #[error("Project {number} not found for {owner_kind} '{owner}'")]
    ProjectNotFound {
        owner_kind: OwnerKind,
        owner: String,
        number: ProjectNumber,
    },

    /// The project exists but has no field with the configured name.
    #[error("Field '{field}' not found in project")]
    FieldNotFound {
        /// The configured field name that was searched for.
        field: String,
    },

    /// The request could not be delivered or the response could not be read.
    #[error("Remote request failed: {message}")]
    Transport { message: String },

    /// The remote answered, but with errors or an unexpected shape.
    #[error("Remote returned an invalid response: {message}")]
    Protocol { message: String },
}

// ---------------------------------------------------------------------------
// Per-item evaluation errors
// ---------------------------------------------------------------------------

/// A Size or Risk label that does not name a known code.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvaluationError {
    #[error("Invalid size '{label}' (parsed as '{key}')")]
    InvalidSize {
        /// The label as stored on the board.
        label: String,
        /// The upper-cased key derived from the label.
        key: String,
    },

    #[error("Invalid risk '{label}' (parsed as '{key}')")]
    InvalidRisk { label: String, key: String },
}
