//! The Challenge State Machine.
//!
//! Responsible for creating challenges and advancing them in response to the moves of the two
//! participants, producing the signals that describe each move and the duty to report the winner.

use challenge_params::prelude::ChallengeParams;
use challenge_primitives::{
    machine::MachineStatus,
    state_hash::hash_block_state,
    types::{Bytes32, CallContext},
};
use tracing::{info, warn};

use crate::{
    challenge::{
        duties::ChallengeDuty,
        events::{ChallengeEvent, CreateChallenge},
        signals::ChallengeSignal,
        state::{Challenge, ChallengeMode, Participant},
    },
    errors::{ChallengeError, ChallengeResult},
    segments::SegmentSelection,
    state_machine::{SMOutput, StateMachine},
};

/// The output of the Challenge State Machine after processing an event.
pub type ChallengeOutput = SMOutput<ChallengeDuty, ChallengeSignal>;

/// The step a one-step proof has to execute, as committed in the challenge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OneStepClaim {
    /// Index of the contested machine step.
    pub step: u64,
    /// The committed machine hash before the step.
    pub before_hash: Bytes32,
}

impl StateMachine for Challenge {
    type Config = ChallengeParams;
    type Duty = ChallengeDuty;
    type OutgoingSignal = ChallengeSignal;
    type Event = ChallengeEvent;
    type Error = ChallengeError;

    fn process_event(
        &mut self,
        cfg: &Self::Config,
        event: Self::Event,
    ) -> Result<SMOutput<Self::Duty, Self::OutgoingSignal>, Self::Error> {
        let kind = event.kind();
        let sender = event.ctx().sender;

        let result = match event {
            ChallengeEvent::Bisect(bisect) => self.process_bisect(cfg, bisect),
            ChallengeEvent::ChallengeExecution(execution) => {
                self.process_challenge_execution(cfg, execution)
            }
            ChallengeEvent::OneStepProved(proved) => self.process_one_step_proved(proved),
            ChallengeEvent::Timeout(timeout) => self.process_timeout(timeout),
            ChallengeEvent::Clear(clear) => self.process_clear(clear),
        };

        if let Err(err) = &result {
            warn!(event = kind, %sender, mode = %self.mode, %err, "rejected challenge event");
        }

        result
    }
}

impl Challenge {
    /// Opens a new block challenge.
    ///
    /// The challenger moves first. The initial round commits to the block states at both ends of
    /// the disputed range as a single segment over `[0, num_blocks)`.
    pub fn create(
        ctx: &CallContext,
        args: CreateChallenge,
    ) -> ChallengeResult<(Self, ChallengeOutput)> {
        if args.num_blocks == 0 {
            return Err(ChallengeError::EmptyBlockRange);
        }

        let [start_status, end_status] = args.start_and_end_machine_statuses;
        let [start_state, end_state] = args.start_and_end_global_states;

        let segments = vec![
            hash_block_state(start_status, start_state.hash())?,
            hash_block_state(end_status, end_state.hash())?,
        ];

        let mut max_inbox_messages = end_state.inbox_position();
        if end_status == MachineStatus::Errored || end_state.position_in_message() > 0 {
            max_inbox_messages = max_inbox_messages.saturating_add(1);
        }

        let mut challenge = Challenge {
            current: Participant::new(args.challenger, args.challenger_time_left),
            next: Participant::new(args.asserter, args.asserter_time_left),
            last_move_timestamp: ctx.timestamp,
            wasm_module_root: args.wasm_module_root,
            challenge_state_hash: Bytes32::ZERO,
            max_inbox_messages,
            mode: ChallengeMode::Block,
        };

        let initiated = ChallengeSignal::InitiatedChallenge {
            start_state,
            end_state,
        };
        let bisected = challenge.complete_bisection(0, args.num_blocks, segments);

        info!(
            asserter = %args.asserter,
            challenger = %args.challenger,
            num_blocks = args.num_blocks,
            %start_status,
            %end_status,
            "created block challenge"
        );

        Ok((
            challenge,
            ChallengeOutput::with_signals(vec![initiated, bisected]),
        ))
    }

    /// Validates a one-step proof move and returns the step the prover has to execute.
    ///
    /// This does not change the challenge. The prover's result is fed back as
    /// [`ChallengeEvent::OneStepProved`].
    pub fn one_step_claim(
        &self,
        ctx: &CallContext,
        selection: &SegmentSelection,
    ) -> ChallengeResult<OneStepClaim> {
        let segment = self.check_move(
            ctx,
            selection,
            Some(ChallengeMode::Execution),
            "OneStepProve",
        )?;

        if segment.length != 1 {
            return Err(ChallengeError::DegenerateSelection {
                reason: "one-step proofs require a single step",
            });
        }

        Ok(OneStepClaim {
            step: segment.start,
            before_hash: selection.start_hash()?,
        })
    }
}
