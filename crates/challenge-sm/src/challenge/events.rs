//! The events that are relevant to a challenge.
//!
//! Every move carries the [`CallContext`] it was submitted in so that the state machine can check
//! whose turn it is and charge the elapsed time to the mover.

use std::fmt;

use challenge_primitives::{
    global_state::GlobalState,
    machine::MachineStatus,
    types::{Address, Bytes32, CallContext, Timestamp},
};
use serde::{Deserialize, Serialize};

use crate::segments::SegmentSelection;

/// The arguments needed to open a new challenge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateChallenge {
    /// The machine binary both parties execute.
    pub wasm_module_root: Bytes32,
    /// Machine status at the start and at the end of the disputed range.
    pub start_and_end_machine_statuses: [MachineStatus; 2],
    /// Global state at the start and at the end of the disputed range.
    pub start_and_end_global_states: [GlobalState; 2],
    /// Number of blocks in the disputed range.
    pub num_blocks: u64,
    /// The party defending the end state.
    pub asserter: Address,
    /// The party disputing the end state.
    pub challenger: Address,
    /// Total time the asserter may spend on its moves.
    pub asserter_time_left: Timestamp,
    /// Total time the challenger may spend on its moves.
    pub challenger_time_left: Timestamp,
}

/// A bisection of the contested segment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BisectEvent {
    /// Who moves and when.
    pub ctx: CallContext,
    /// The mover's claim about the committed round and the contested segment.
    pub selection: SegmentSelection,
    /// The state hashes at the split points of the contested segment.
    pub new_segments: Vec<Bytes32>,
}

/// The escalation of a single contested block to a challenge over its machine steps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChallengeExecutionEvent {
    /// Who moves and when.
    pub ctx: CallContext,
    /// The mover's claim about the committed round and the contested block.
    pub selection: SegmentSelection,
    /// Machine status before and after the contested block.
    pub machine_statuses: [MachineStatus; 2],
    /// Global state hashes before and after the contested block.
    pub global_state_hashes: [Bytes32; 2],
    /// Number of machine steps the mover claims the block takes.
    pub num_steps: u64,
}

/// The outcome of executing the contested step with a one-step proof.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OneStepProvedEvent {
    /// Who moves and when.
    pub ctx: CallContext,
    /// The mover's claim about the committed round and the contested step.
    pub selection: SegmentSelection,
    /// The machine hash the prover computed after executing the step.
    pub after_hash: Bytes32,
}

/// A claim that the participant on the clock ran out of time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeoutEvent {
    /// Who claims the timeout and when.
    pub ctx: CallContext,
}

/// A request to delete the challenge without a winner.
///
/// The state machine does not know the result receiver, so whoever feeds this event must have
/// checked that it comes from the receiver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClearEvent {
    /// Who clears and when.
    pub ctx: CallContext,
}

/// The external events that affect a challenge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChallengeEvent {
    /// The mover splits the contested segment.
    Bisect(BisectEvent),
    /// The mover escalates a single block to an execution challenge.
    ChallengeExecution(ChallengeExecutionEvent),
    /// The mover settled the contested step with a one-step proof.
    OneStepProved(OneStepProvedEvent),
    /// Anyone claims that the participant on the clock ran out of time.
    Timeout(TimeoutEvent),
    /// The result receiver deletes the challenge.
    Clear(ClearEvent),
}

impl ChallengeEvent {
    /// The name of the kind of event.
    pub const fn kind(&self) -> &'static str {
        match self {
            ChallengeEvent::Bisect(_) => "Bisect",
            ChallengeEvent::ChallengeExecution(_) => "ChallengeExecution",
            ChallengeEvent::OneStepProved(_) => "OneStepProved",
            ChallengeEvent::Timeout(_) => "Timeout",
            ChallengeEvent::Clear(_) => "Clear",
        }
    }

    /// The context the event was submitted in.
    pub const fn ctx(&self) -> &CallContext {
        match self {
            ChallengeEvent::Bisect(e) => &e.ctx,
            ChallengeEvent::ChallengeExecution(e) => &e.ctx,
            ChallengeEvent::OneStepProved(e) => &e.ctx,
            ChallengeEvent::Timeout(e) => &e.ctx,
            ChallengeEvent::Clear(e) => &e.ctx,
        }
    }
}

impl fmt::Display for ChallengeEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ctx = self.ctx();
        match self {
            ChallengeEvent::Bisect(e) => write!(
                f,
                "Bisect at position {} into {} segments from {} at {}",
                e.selection.challenge_position,
                e.new_segments.len(),
                ctx.sender,
                ctx.timestamp
            ),
            ChallengeEvent::ChallengeExecution(e) => write!(
                f,
                "ChallengeExecution over {} steps ({} -> {}) from {} at {}",
                e.num_steps,
                e.machine_statuses[0],
                e.machine_statuses[1],
                ctx.sender,
                ctx.timestamp
            ),
            ChallengeEvent::OneStepProved(e) => write!(
                f,
                "OneStepProved to {} from {} at {}",
                e.after_hash, ctx.sender, ctx.timestamp
            ),
            ChallengeEvent::Timeout(_) | ChallengeEvent::Clear(_) => {
                write!(f, "{} from {} at {}", self.kind(), ctx.sender, ctx.timestamp)
            }
        }
    }
}

impl From<BisectEvent> for ChallengeEvent {
    fn from(event: BisectEvent) -> Self {
        ChallengeEvent::Bisect(event)
    }
}

impl From<ChallengeExecutionEvent> for ChallengeEvent {
    fn from(event: ChallengeExecutionEvent) -> Self {
        ChallengeEvent::ChallengeExecution(event)
    }
}

impl From<OneStepProvedEvent> for ChallengeEvent {
    fn from(event: OneStepProvedEvent) -> Self {
        ChallengeEvent::OneStepProved(event)
    }
}

impl From<TimeoutEvent> for ChallengeEvent {
    fn from(event: TimeoutEvent) -> Self {
        ChallengeEvent::Timeout(event)
    }
}

impl From<ClearEvent> for ChallengeEvent {
    fn from(event: ClearEvent) -> Self {
        ChallengeEvent::Clear(event)
    }
}
