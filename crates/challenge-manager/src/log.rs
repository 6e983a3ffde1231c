//! The record of everything that happened to the hosted challenges.

use std::fmt;

use challenge_primitives::types::ChallengeIndex;
use challenge_sm::challenge::signals::ChallengeSignal;

/// A signal emitted by one of the hosted challenges.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChallengeLog {
    /// The challenge that emitted the signal.
    pub challenge_index: ChallengeIndex,
    /// What happened.
    pub signal: ChallengeSignal,
}

impl fmt::Display for ChallengeLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "challenge {}: {}", self.challenge_index, self.signal)
    }
}
