//! Process exit codes. Scheduled jobs rely on these.
//!
//! | Code | Meaning |
//! |------|---------|
//! | 0 | Run completed; per-item errors are reported but do not fail the run |
//! | 1 | Run aborted: project/field lookup or item fetch failed |
//! | 2 | Invalid configuration |

use estimate::EstimatorError;

pub const EXIT_SUCCESS: u8 = 0;

/// A fatal remote error ended the run.
pub const EXIT_ERROR: u8 = 1;

/// A setting was missing or malformed; nothing was contacted.
pub const EXIT_CONFIG: u8 = 2;

/// Maps a top-level error to its exit code.
pub fn for_error(error: &anyhow::Error) -> u8 {
    match error.downcast_ref::<EstimatorError>() {
        Some(EstimatorError::Configuration { .. }) => EXIT_CONFIG,
        _ => EXIT_ERROR,
    }
}
