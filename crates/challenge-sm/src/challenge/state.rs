//! The persisted record of a challenge.

use std::fmt;

use challenge_primitives::types::{Address, Bytes32, Timestamp};
use serde::{Deserialize, Serialize};

/// The phase a challenge is in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChallengeMode {
    /// The challenge does not exist or has been deleted.
    #[default]
    None,
    /// The parties are disputing a range of blocks.
    Block,
    /// The parties are disputing the machine steps of a single block.
    Execution,
}

impl fmt::Display for ChallengeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mode_str = match self {
            ChallengeMode::None => "None",
            ChallengeMode::Block => "Block",
            ChallengeMode::Execution => "Execution",
        };
        write!(f, "{}", mode_str)
    }
}

/// One side of a challenge together with the time it has left to move.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Participant {
    /// The participant's address.
    pub addr: Address,
    /// Seconds the participant may still spend on its moves.
    pub time_left: Timestamp,
}

impl Participant {
    /// Creates a new participant.
    pub const fn new(addr: Address, time_left: Timestamp) -> Self {
        Self { addr, time_left }
    }
}

/// The state of a single challenge.
///
/// The [`Default`] value is the empty record with [`ChallengeMode::None`]: it stands for both a
/// challenge that was never created and one that has been deleted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Challenge {
    /// The participant whose turn it is.
    pub current: Participant,
    /// The participant waiting for its turn.
    pub next: Participant,
    /// When the last move was accepted.
    pub last_move_timestamp: Timestamp,
    /// The machine binary both parties execute.
    pub wasm_module_root: Bytes32,
    /// Commitment to the current bisection round.
    ///
    /// Zero once a mover has proven itself right. No selection hashes to zero so no further move
    /// can be made and the challenge can only end by timeout.
    pub challenge_state_hash: Bytes32,
    /// Upper bound on the inbox messages the contested execution may read.
    pub max_inbox_messages: u64,
    /// The phase of the challenge.
    pub mode: ChallengeMode,
}

impl Challenge {
    /// Returns `true` if the challenge exists.
    pub fn is_active(&self) -> bool {
        self.mode != ChallengeMode::None
    }

    /// Seconds that elapsed since the last accepted move at time `now`.
    pub const fn elapsed(&self, now: Timestamp) -> Timestamp {
        now.saturating_sub(self.last_move_timestamp)
    }

    /// Returns `true` if the participant on the clock has exhausted its time at `now`.
    pub const fn is_timed_out(&self, now: Timestamp) -> bool {
        self.elapsed(now) > self.current.time_left
    }

    /// The address expected to make the next move.
    pub const fn current_responder(&self) -> Address {
        self.current.addr
    }

    /// The time the participant on the clock had left at its last turn change.
    pub const fn current_responder_time_left(&self) -> Timestamp {
        self.current.time_left
    }

    /// Returns `true` if a mover has already proven itself right and only the timeout remains.
    pub fn is_resolved(&self) -> bool {
        self.is_active() && self.challenge_state_hash.is_zero()
    }
}

impl fmt::Display for Challenge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} challenge (current: {}, next: {}, state: {})",
            self.mode, self.current.addr, self.next.addr, self.challenge_state_hash
        )
    }
}
