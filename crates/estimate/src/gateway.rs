//! Port trait for the remote project board.
//!
//! The engine only ever talks to the board through [`BoardGateway`]. The
//! GitHub GraphQL implementation lives in the `github` crate; tests supply
//! in-memory fakes.

use async_trait::async_trait;

use crate::{BoardTarget, FieldId, GatewayError, ItemId, ProjectId, ResolvedFields, WorkItem};

/// Read/write access to a single project board.
///
/// Every method issues its requests sequentially and returns only once they
/// have completed. Implementations do not retry.
#[async_trait]
pub trait BoardGateway: Send + Sync {
    /// Resolves the project node ID and the estimate field for `target`.
    ///
    /// # Errors
    ///
    /// - [`GatewayError::ProjectNotFound`] if the owner/project pair does not
    ///   yield a project.
    /// - [`GatewayError::FieldNotFound`] if no field matches
    ///   `target.estimate_field` case-insensitively.
    async fn resolve_field_ids(&self, target: &BoardTarget)
        -> Result<ResolvedFields, GatewayError>;

    /// Returns every item on the project, in the order the remote lists them.
    ///
    /// Either all pages are read or an error is returned; partial results are
    /// never surfaced.
    async fn fetch_all_items(
        &self,
        project_id: &ProjectId,
        estimate_field: &str,
    ) -> Result<Vec<WorkItem>, GatewayError>;

    /// Writes `value` into the numeric field `field_id` of one item.
    async fn update_estimate(
        &self,
        project_id: &ProjectId,
        item_id: &ItemId,
        field_id: &FieldId,
        value: f64,
    ) -> Result<(), GatewayError>;
}
