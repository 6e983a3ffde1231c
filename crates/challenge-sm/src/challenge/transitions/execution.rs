use challenge_params::prelude::ChallengeParams;
use challenge_primitives::{
    machine::MachineStatus,
    state_hash::{hash_block_state, hash_end_machine, hash_start_machine},
};
use tracing::info;

use crate::{
    challenge::{
        events::{ChallengeExecutionEvent, OneStepProvedEvent},
        machine::ChallengeOutput,
        signals::{ChallengeSignal, ChallengeTerminationKind},
        state::{Challenge, ChallengeMode},
    },
    errors::{ChallengeError, ChallengeResult},
    segments::validate_bisection,
};

impl Challenge {
    /// Processes the escalation of a single contested block to an execution challenge.
    ///
    /// If the machine was already halted when the block started, the mover wins outright as long
    /// as it claims the machine stayed exactly as it was. Otherwise the block is re-opened as a
    /// bisection over `num_steps` machine steps.
    pub(crate) fn process_challenge_execution(
        &mut self,
        cfg: &ChallengeParams,
        execution: ChallengeExecutionEvent,
    ) -> ChallengeResult<ChallengeOutput> {
        let ChallengeExecutionEvent {
            ctx,
            selection,
            machine_statuses: [start_status, end_status],
            global_state_hashes: [start_hash, end_hash],
            num_steps,
        } = execution;

        let segment = self.check_move(
            &ctx,
            &selection,
            Some(ChallengeMode::Block),
            "ChallengeExecution",
        )?;

        if num_steps == 0 || num_steps > cfg.max_steps {
            return Err(ChallengeError::StepsOutOfRange {
                num_steps,
                max_steps: cfg.max_steps,
            });
        }

        validate_bisection(
            &selection,
            hash_block_state(start_status, start_hash)?,
            hash_block_state(end_status, end_hash)?,
        )?;

        if segment.length != 1 {
            return Err(ChallengeError::DegenerateSelection {
                reason: "execution challenges require a single block",
            });
        }

        if start_status != MachineStatus::Finished {
            if start_status != end_status || start_hash != end_hash {
                return Err(ChallengeError::HaltedMachineChanged);
            }

            let ended = self.current_wins(ChallengeTerminationKind::BlockProof);
            self.take_turn(ctx.timestamp);

            return Ok(ChallengeOutput::with_signals(vec![ended]));
        }

        if end_status == MachineStatus::Errored && start_hash != end_hash {
            return Err(ChallengeError::ErroredStateChanged);
        }

        let segments = vec![
            hash_start_machine(start_hash, self.wasm_module_root),
            hash_end_machine(end_status, end_hash)?,
        ];

        self.mode = ChallengeMode::Execution;
        let bisected = self.complete_bisection(0, num_steps, segments);
        self.take_turn(ctx.timestamp);

        info!(block = segment.start, num_steps, "escalated to execution challenge");

        Ok(ChallengeOutput::with_signals(vec![
            bisected,
            ChallengeSignal::ExecutionChallengeBegun {
                block: segment.start,
                num_steps,
            },
        ]))
    }

    /// Processes the result of a one-step proof of the contested step.
    ///
    /// The proof must reach a different state than the one being disputed. The mover then wins and
    /// the challenge waits for the other party's clock to run out.
    pub(crate) fn process_one_step_proved(
        &mut self,
        proved: OneStepProvedEvent,
    ) -> ChallengeResult<ChallengeOutput> {
        let OneStepProvedEvent {
            ctx,
            selection,
            after_hash,
        } = proved;

        self.one_step_claim(&ctx, &selection)?;

        if selection.end_hash()? == after_hash {
            return Err(ChallengeError::SameProofEnd);
        }

        let ended = self.current_wins(ChallengeTerminationKind::ExecutionProof);
        self.take_turn(ctx.timestamp);

        Ok(ChallengeOutput::with_signals(vec![
            ChallengeSignal::OneStepProofCompleted,
            ended,
        ]))
    }
}
