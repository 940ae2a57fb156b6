//! Terminal states of a single item within a run.

use estimate::{Days, EvaluationError, GatewayError, RunStatistics};

/// What happened to one board item.
///
/// Every item reaches exactly one of these states in a single attempt:
///
/// ```text
/// Fetched ─┬─► MissingSize | MissingRisk                         (skip)
///          └─► Evaluated ─┬─► InvalidCode                        (error)
///                         ├─► Unchanged                          (skip)
///                         ├─► Updated | WouldUpdate              (changed)
///                         └─► UpdateFailed                       (error)
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum ItemOutcome {
    /// The item has no Size value.
    MissingSize,
    /// The item has a Size value but no Risk value.
    MissingRisk,
    /// Size or Risk did not parse to a known code. No write was attempted.
    InvalidCode(EvaluationError),
    /// The stored estimate already equals the computed one.
    Unchanged(Days),
    /// The estimate was written.
    Updated {
        previous: Option<f64>,
        days: Days,
    },
    /// Dry run: the estimate differs and would have been written.
    WouldUpdate {
        previous: Option<f64>,
        days: Days,
    },
    /// The write was attempted and rejected.
    UpdateFailed { days: Days, error: GatewayError },
}

impl ItemOutcome {
    /// Adds this outcome to the run counters. Does not touch `total`.
    pub fn record(&self, stats: &mut RunStatistics) {
        match self {
            Self::MissingSize | Self::MissingRisk => stats.skipped_missing += 1,
            Self::InvalidCode(_) | Self::UpdateFailed { .. } => stats.errored += 1,
            Self::Unchanged(_) => stats.unchanged += 1,
            Self::Updated { .. } | Self::WouldUpdate { .. } => stats.changed += 1,
        }
    }
}
