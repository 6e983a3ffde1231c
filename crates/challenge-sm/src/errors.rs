//! Errors related to the moves of a challenge.
//!
//! Every error rejects the move as a whole: the challenge is left exactly as it was before the
//! move was submitted.

use challenge_primitives::{
    errors::MachineHashError,
    types::{Address, Bytes32, Timestamp},
};
use thiserror::Error;

use crate::challenge::state::ChallengeMode;

/// Errors that can occur while processing a move in a challenge.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChallengeError {
    /// The move was submitted by someone other than the party whose turn it is.
    #[error("{sender} is not allowed to move, expected {expected}")]
    AccessViolation {
        /// The address that submitted the move.
        sender: Address,
        /// The address whose turn it is.
        expected: Address,
    },

    /// The supplied segment selection does not hash to the committed challenge state.
    #[error("selection hashes to {actual} but the committed state is {expected}")]
    StateMismatch {
        /// The committed challenge state hash.
        expected: Bytes32,
        /// The hash of the supplied selection.
        actual: Bytes32,
    },

    /// The move is not allowed in the current mode of the challenge.
    #[error("cannot process {event} in mode {mode}")]
    InvalidTransition {
        /// The mode the challenge is in.
        mode: ChallengeMode,
        /// The kind of move that was rejected.
        event: &'static str,
    },

    /// The segment selection is malformed or cannot be used for the requested move.
    #[error("degenerate segment selection: {reason}")]
    DegenerateSelection {
        /// What is wrong with the selection.
        reason: &'static str,
    },

    /// A bisection supplied the wrong number of segments.
    #[error("expected {expected} segments, got {actual}")]
    BadDegree {
        /// The required number of segments.
        expected: usize,
        /// The supplied number of segments.
        actual: usize,
    },

    /// The mover's clock ran out before the move was submitted.
    #[error("clock expired: {elapsed}s elapsed with {time_left}s left")]
    TimedOut {
        /// Seconds since the last accepted move.
        elapsed: Timestamp,
        /// Seconds the mover had left.
        time_left: Timestamp,
    },

    /// A timeout was claimed while the mover still had time.
    #[error("deadline not reached: {elapsed}s elapsed with {time_left}s left")]
    DeadlineNotReached {
        /// Seconds since the last accepted move.
        elapsed: Timestamp,
        /// Seconds the mover has left.
        time_left: Timestamp,
    },

    /// The first new segment does not match the start of the contested segment.
    #[error("new segments do not start at the contested segment's start")]
    WrongStart,

    /// The last new segment matches the end of the contested segment, so nothing is disputed.
    #[error("new segments end at the contested segment's end")]
    SameEndpoint,

    /// The one-step proof reached the same state that is being disputed.
    #[error("one-step proof ends at the disputed state")]
    SameProofEnd,

    /// A machine that was already halted at the start of a block claims to have changed.
    #[error("halted machine changed its status or global state")]
    HaltedMachineChanged,

    /// A machine that errored claims to have modified its global state.
    #[error("errored machine changed its global state")]
    ErroredStateChanged,

    /// The number of steps of an execution challenge is out of bounds.
    #[error("step count {num_steps} outside of [1, {max_steps}]")]
    StepsOutOfRange {
        /// The supplied number of steps.
        num_steps: u64,
        /// The maximum number of steps.
        max_steps: u64,
    },

    /// A challenge was requested over an empty range of blocks.
    #[error("a challenge must span at least one block")]
    EmptyBlockRange,

    /// A supplied machine status has no commitment in the required context.
    #[error(transparent)]
    InvalidStatus(#[from] MachineHashError),
}

/// The result type for moves in a challenge.
pub type ChallengeResult<T> = Result<T, ChallengeError>;
