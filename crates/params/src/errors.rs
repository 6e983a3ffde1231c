//! Errors for the challenge parameters.

use thiserror::Error;

/// Error while validating a set of challenge parameters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParamsError {
    /// The maximum degree would not allow a segment to be split.
    #[error("max challenge degree must be at least {min}, got {got}")]
    DegreeTooSmall {
        /// The smallest allowed degree.
        min: u64,

        /// The configured degree.
        got: u64,
    },

    /// An execution challenge could never cover a single step.
    #[error("max steps must be non-zero")]
    ZeroMaxSteps,
}
