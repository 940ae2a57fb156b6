//! Core domain for days-estimate.
//!
//! Board items carry a "Size" and a "Risk" label. This crate turns the pair
//! into a number of days using a fixed table and defines everything the
//! reconciliation engine and its infrastructure adapters share: identifiers,
//! value types, the error taxonomy, and the [`BoardGateway`] port.
//!
//! ## Architectural Layer
//!
//! **Business logic + port definitions.** This crate has no I/O dependencies.
//! It defines *what* is needed; infrastructure crates define *how* to supply it.
//!
//! ## Module Layout
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`identifiers`] | Newtype identifiers (`ProjectId`, `ItemId`, `FieldId`, `RunId`) |
//! | [`types`] | Value types (`Days`, `WorkItem`, `BoardTarget`, `RunStatistics`) |
//! | [`cost`] | `SizeCode`, `RiskCode`, and the fixed `CostTable` |
//! | [`errors`] | Run-level, gateway, and per-item error types |
//! | [`gateway`] | The `BoardGateway` port trait |

pub mod cost;
pub mod errors;
pub mod gateway;
pub mod identifiers;
pub mod types;

// Re-export everything at the crate root for ergonomic usage by downstream crates.
pub use cost::{CostTable, RiskCode, SizeCode, STANDARD_COST_TABLE};
pub use errors::{EstimatorError, EvaluationError, GatewayError};
pub use gateway::BoardGateway;
pub use identifiers::{FieldId, ItemId, ProjectId, ProjectNumber, RunId};
pub use types::{
    BoardTarget, Days, FieldDescriptor, OwnerKind, ResolvedFields, RunStatistics, WorkItem,
    DEFAULT_ESTIMATE_FIELD, UNTITLED,
};
