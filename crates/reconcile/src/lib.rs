//! Days-estimate reconciliation engine.
//!
//! [`ReconciliationEngine`] resolves the board's identifiers, reads every
//! item, computes each item's estimate from its Size and Risk labels, and
//! writes the estimate back only where it differs from what is stored.
//!
//! ## Architectural Layer
//!
//! **Orchestration layer.** The engine sequences calls between the cost model
//! in the [`estimate`] crate and the [`estimate::BoardGateway`] port. It holds
//! no GitHub-specific knowledge.
//!
//! ## Failure isolation
//!
//! Resolution and fetch failures end the run with an
//! [`estimate::EstimatorError`]. Anything that goes wrong with a single item
//! becomes an [`ItemOutcome`], is logged, counted, and the loop continues.

pub mod engine;
pub mod outcome;

pub use engine::{EngineOptions, ReconciliationEngine};
pub use outcome::ItemOutcome;
