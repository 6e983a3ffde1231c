//! Notifications about accepted transitions of a challenge.

use std::fmt;

use challenge_primitives::{global_state::GlobalState, types::Bytes32};

/// Why a challenge ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChallengeTerminationKind {
    /// The participant on the clock ran out of time.
    Timeout,
    /// The mover showed that a machine halted before the contested block cannot change.
    BlockProof,
    /// The mover settled the contested step with a one-step proof.
    ExecutionProof,
    /// The result receiver cleared the challenge.
    Cleared,
}

impl fmt::Display for ChallengeTerminationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind_str = match self {
            ChallengeTerminationKind::Timeout => "Timeout",
            ChallengeTerminationKind::BlockProof => "BlockProof",
            ChallengeTerminationKind::ExecutionProof => "ExecutionProof",
            ChallengeTerminationKind::Cleared => "Cleared",
        };
        write!(f, "{}", kind_str)
    }
}

/// The signals a challenge emits.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ChallengeSignal {
    /// A challenge was created over the range between the two global states.
    InitiatedChallenge {
        /// The global state both parties agree on.
        start_state: GlobalState,
        /// The global state the asserter claims.
        end_state: GlobalState,
    },

    /// A new bisection round was committed.
    Bisected {
        /// Commitment to the new round.
        challenge_state_hash: Bytes32,
        /// Start of the bisected range.
        segments_start: u64,
        /// Length of the bisected range.
        segments_length: u64,
        /// The state hashes at the split points.
        segments: Vec<Bytes32>,
    },

    /// A single contested block was escalated to a challenge over its machine steps.
    ExecutionChallengeBegun {
        /// The contested block.
        block: u64,
        /// The number of machine steps in the block.
        num_steps: u64,
    },

    /// A one-step proof settled the contested step.
    OneStepProofCompleted,

    /// The challenge ended.
    ///
    /// For proof endings this is emitted when the mover proves itself right. The result is
    /// reported once the loser's clock runs out.
    ChallengeEnded {
        /// Why the challenge ended.
        kind: ChallengeTerminationKind,
    },
}

impl fmt::Display for ChallengeSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChallengeSignal::InitiatedChallenge { .. } => write!(f, "InitiatedChallenge"),
            ChallengeSignal::Bisected {
                challenge_state_hash,
                segments_start,
                segments_length,
                segments,
            } => write!(
                f,
                "Bisected [{segments_start}, +{segments_length}) into {} parts ({challenge_state_hash})",
                segments.len().saturating_sub(1)
            ),
            ChallengeSignal::ExecutionChallengeBegun { block, num_steps } => {
                write!(f, "ExecutionChallengeBegun at block {block} over {num_steps} steps")
            }
            ChallengeSignal::OneStepProofCompleted => write!(f, "OneStepProofCompleted"),
            ChallengeSignal::ChallengeEnded { kind } => write!(f, "ChallengeEnded by {kind}"),
        }
    }
}
