//! Parameters of the bisection game.

use serde::{Deserialize, Serialize};

use crate::{
    default::{MAX_CHALLENGE_DEGREE, MAX_STEPS, MIN_CHALLENGE_DEGREE},
    errors::ParamsError,
};

/// The parameters that bound every challenge.
///
/// These are protocol-critical: both parties and the challenge manager must use the same values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChallengeParams {
    /// Maximum number of sub-segments a bisection may produce.
    pub max_challenge_degree: u64,

    /// Maximum number of machine steps an execution challenge may span.
    pub max_steps: u64,
}

impl ChallengeParams {
    /// Checks that the parameters describe a game that can make progress.
    pub const fn validate(&self) -> Result<(), ParamsError> {
        if self.max_challenge_degree < MIN_CHALLENGE_DEGREE {
            return Err(ParamsError::DegreeTooSmall {
                min: MIN_CHALLENGE_DEGREE,
                got: self.max_challenge_degree,
            });
        }

        if self.max_steps == 0 {
            return Err(ParamsError::ZeroMaxSteps);
        }

        Ok(())
    }
}

impl Default for ChallengeParams {
    fn default() -> Self {
        Self {
            max_challenge_degree: MAX_CHALLENGE_DEGREE,
            max_steps: MAX_STEPS,
        }
    }
}
