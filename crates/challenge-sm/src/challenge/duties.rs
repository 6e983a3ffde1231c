//! The duties that need to be performed in response to the state transitions of a challenge.

use challenge_primitives::types::Address;

/// The duties that need to be performed outside of the state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChallengeDuty {
    /// Report the outcome of the challenge to the result receiver.
    CompleteChallenge {
        /// The participant that won.
        winner: Address,
        /// The participant that lost.
        loser: Address,
    },
}
