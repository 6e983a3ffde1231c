//! Re-exports of the most commonly used parameter types.

pub use crate::{
    challenge::ChallengeParams,
    default::{MAX_CHALLENGE_DEGREE, MAX_STEPS},
    errors::ParamsError,
};
