//! The challenge manager: the arena of challenges and the operations on them.

use challenge_params::prelude::ChallengeParams;
use challenge_primitives::types::{Address, Bytes32, CallContext, ChallengeIndex, Timestamp};
use challenge_sm::{
    challenge::{
        duties::ChallengeDuty,
        events::{
            BisectEvent, ChallengeEvent, ChallengeExecutionEvent, ClearEvent, CreateChallenge,
            OneStepProvedEvent, TimeoutEvent,
        },
        signals::ChallengeSignal,
        state::{Challenge, ChallengeMode, Participant},
    },
    errors::ChallengeError,
    segments::SegmentSelection,
    state_machine::StateMachine,
};
use tracing::{debug, info, warn};

use crate::{
    errors::{ManagerError, ManagerResult},
    log::ChallengeLog,
    traits::{ChallengeResultReceiver, ExecutionContext, OneStepProver},
};


/// What every index that does not hold a live challenge reads as.
static DELETED: Challenge = Challenge {
    current: Participant::new(Address::ZERO, 0),
    next: Participant::new(Address::ZERO, 0),
    last_move_timestamp: 0,
    wasm_module_root: Bytes32::ZERO,
    challenge_state_hash: Bytes32::ZERO,
    max_inbox_messages: 0,
    mode: ChallengeMode::None,
};

/// The collaborators set by [`ChallengeManager::initialize`].
#[derive(Debug)]
struct Collaborators<R, P> {
    result_receiver: R,
    sequencer_inbox: Address,
    bridge: Address,
    prover: P,
}

/// Hosts every challenge and drives them through the [`Challenge`] state machine.
///
/// Challenges are kept in an arena indexed by [`ChallengeIndex`]. Index 0 never holds a
/// challenge, indices are handed out in increasing order and never reused. A deleted challenge
/// stays in its slot as the empty record.
#[derive(Debug)]
pub struct ChallengeManager<R, P> {
    cfg: ChallengeParams,
    collaborators: Option<Collaborators<R, P>>,
    challenges: Vec<Challenge>,
    events: Vec<ChallengeLog>,
}

impl<R, P> ChallengeManager<R, P>
where
    R: ChallengeResultReceiver,
    P: OneStepProver,
{
    /// Creates a manager without collaborators.
    ///
    /// Every operation that changes a challenge fails until [`Self::initialize`] is called.
    pub fn new(cfg: ChallengeParams) -> ManagerResult<Self> {
        cfg.validate()?;

        Ok(Self {
            cfg,
            collaborators: None,
            challenges: vec![Challenge::default()],
            events: Vec::new(),
        })
    }

    /// Sets the collaborators of the manager. Can only be called once.
    pub fn initialize(
        &mut self,
        result_receiver: R,
        sequencer_inbox: Address,
        bridge: Address,
        prover: P,
    ) -> ManagerResult<()> {
        if self.collaborators.is_some() {
            return Err(ManagerError::AlreadyInitialized);
        }

        let receiver = result_receiver.address();
        if receiver.is_zero() {
            return Err(ManagerError::NoResultReceiver);
        }

        info!(%receiver, %sequencer_inbox, %bridge, "initialized challenge manager");

        self.collaborators = Some(Collaborators {
            result_receiver,
            sequencer_inbox,
            bridge,
            prover,
        });

        Ok(())
    }

    /// Opens a new block challenge and returns its index.
    ///
    /// Only the result receiver may create challenges.
    pub fn create_challenge(
        &mut self,
        ctx: CallContext,
        args: CreateChallenge,
    ) -> ManagerResult<ChallengeIndex> {
        let collaborators = self.collaborators()?;
        check_result_receiver(collaborators, &ctx)?;

        let (challenge, output) = Challenge::create(&ctx, args)?;

        let challenge_index = self.challenges.len() as ChallengeIndex;
        info!(%challenge_index, current = %challenge.current.addr, next = %challenge.next.addr, "opened challenge");

        self.challenges.push(challenge);
        self.record(challenge_index, output.signals);

        Ok(challenge_index)
    }

    /// Splits the contested segment of a challenge.
    pub fn bisect_execution(
        &mut self,
        challenge_index: ChallengeIndex,
        event: BisectEvent,
    ) -> ManagerResult<()> {
        self.apply(challenge_index, event.into())
    }

    /// Escalates the single contested block of a challenge to a challenge over its machine steps.
    pub fn challenge_execution(
        &mut self,
        challenge_index: ChallengeIndex,
        event: ChallengeExecutionEvent,
    ) -> ManagerResult<()> {
        self.apply(challenge_index, event.into())
    }

    /// Settles the single contested step of a challenge by executing it with `proof`.
    ///
    /// The challenge is checked before the prover runs. The mover wins if the prover ends at a
    /// different machine than the one the opponent committed to.
    pub fn one_step_prove_execution(
        &mut self,
        challenge_index: ChallengeIndex,
        ctx: CallContext,
        selection: SegmentSelection,
        proof: &[u8],
    ) -> ManagerResult<()> {
        let collaborators = self.collaborators()?;
        let challenge = self.challenge_info(challenge_index);

        let claim = challenge.one_step_claim(&ctx, &selection)?;
        let exec_ctx = ExecutionContext {
            max_inbox_messages_read: challenge.max_inbox_messages,
            bridge: collaborators.bridge,
        };

        let after_hash = collaborators.prover.prove_one_step(
            &exec_ctx,
            claim.step,
            claim.before_hash,
            proof,
        )?;
        debug!(%challenge_index, step = claim.step, before = %claim.before_hash, after = %after_hash, "executed one-step proof");

        let proved = OneStepProvedEvent {
            ctx,
            selection,
            after_hash,
        };
        self.apply(challenge_index, proved.into())
    }

    /// Ends a challenge whose participant on the clock ran out of time. Anyone may call this.
    ///
    /// The result receiver is told that the waiting participant won.
    pub fn timeout(&mut self, challenge_index: ChallengeIndex, ctx: CallContext) -> ManagerResult<()> {
        self.apply(challenge_index, TimeoutEvent { ctx }.into())
    }

    /// Deletes a challenge without a winner.
    ///
    /// Only the result receiver may clear challenges.
    pub fn clear_challenge(
        &mut self,
        challenge_index: ChallengeIndex,
        ctx: CallContext,
    ) -> ManagerResult<()> {
        check_result_receiver(self.collaborators()?, &ctx)?;

        self.apply(challenge_index, ClearEvent { ctx }.into())
    }

    /// Feeds an event to the challenge at `challenge_index` and carries out what it produces.
    fn apply(&mut self, challenge_index: ChallengeIndex, event: ChallengeEvent) -> ManagerResult<()> {
        let collaborators = self
            .collaborators
            .as_mut()
            .ok_or(ManagerError::NotInitialized)?;

        let Some(challenge) = usize::try_from(challenge_index)
            .ok()
            .and_then(|slot| self.challenges.get_mut(slot))
        else {
            return Err(ChallengeError::InvalidTransition {
                mode: ChallengeMode::None,
                event: event.kind(),
            }
            .into());
        };

        let output = challenge.process_event(&self.cfg, event)?;

        for duty in output.duties {
            match duty {
                ChallengeDuty::CompleteChallenge { winner, loser } => {
                    info!(%challenge_index, %winner, %loser, "challenge completed");
                    collaborators
                        .result_receiver
                        .complete_challenge(challenge_index, winner, loser);
                }
            }
        }

        self.record(challenge_index, output.signals);

        Ok(())
    }

    fn collaborators(&self) -> ManagerResult<&Collaborators<R, P>> {
        self.collaborators.as_ref().ok_or(ManagerError::NotInitialized)
    }
}

impl<R, P> ChallengeManager<R, P> {
    /// The challenge at `challenge_index`.
    ///
    /// Indices that were never handed out and deleted challenges read as the empty record.
    pub fn challenge_info(&self, challenge_index: ChallengeIndex) -> &Challenge {
        usize::try_from(challenge_index)
            .ok()
            .and_then(|slot| self.challenges.get(slot))
            .unwrap_or(&DELETED)
    }

    /// The participant expected to move next in the challenge at `challenge_index`.
    pub fn current_responder(&self, challenge_index: ChallengeIndex) -> Address {
        self.challenge_info(challenge_index).current_responder()
    }

    /// The time the participant on the clock had left at its last turn change.
    pub fn current_responder_time_left(&self, challenge_index: ChallengeIndex) -> Timestamp {
        self.challenge_info(challenge_index).current_responder_time_left()
    }

    /// Returns `true` if the challenge at `challenge_index` exists and can be ended by timeout at
    /// `now`.
    pub fn is_timed_out(&self, challenge_index: ChallengeIndex, now: Timestamp) -> bool {
        let challenge = self.challenge_info(challenge_index);
        challenge.is_active() && challenge.is_timed_out(now)
    }

    /// The number of challenges created so far, including deleted ones.
    pub fn total_challenges_created(&self) -> u64 {
        self.challenges.len().saturating_sub(1) as u64
    }

    /// The parameters the challenges are played under.
    pub const fn params(&self) -> &ChallengeParams {
        &self.cfg
    }

    /// Returns `true` once the collaborators are set.
    pub const fn is_initialized(&self) -> bool {
        self.collaborators.is_some()
    }

    /// The result receiver, if initialized.
    pub fn result_receiver(&self) -> Option<&R> {
        self.collaborators.as_ref().map(|c| &c.result_receiver)
    }

    /// The sequencer inbox, if initialized.
    pub fn sequencer_inbox(&self) -> Option<Address> {
        self.collaborators.as_ref().map(|c| c.sequencer_inbox)
    }

    /// The bridge, if initialized.
    pub fn bridge(&self) -> Option<Address> {
        self.collaborators.as_ref().map(|c| c.bridge)
    }

    /// The one-step prover, if initialized.
    pub fn prover(&self) -> Option<&P> {
        self.collaborators.as_ref().map(|c| &c.prover)
    }

    /// Takes the signals emitted since the last call, in the order they were emitted.
    pub fn drain_events(&mut self) -> Vec<ChallengeLog> {
        std::mem::take(&mut self.events)
    }

    fn record(&mut self, challenge_index: ChallengeIndex, signals: Vec<ChallengeSignal>) {
        self.events
            .extend(signals.into_iter().map(|signal| ChallengeLog {
                challenge_index,
                signal,
            }));
    }
}

fn check_result_receiver<R, P>(
    collaborators: &Collaborators<R, P>,
    ctx: &CallContext,
) -> ManagerResult<()>
where
    R: ChallengeResultReceiver,
{
    let receiver = collaborators.result_receiver.address();
    if ctx.sender != receiver {
        warn!(sender = %ctx.sender, %receiver, "call restricted to the result receiver");
        return Err(ManagerError::NotResultReceiver { sender: ctx.sender });
    }

    Ok(())
}
