//! The transitions of the Challenge State Machine and the bookkeeping they share.

mod bisection;
mod execution;
mod termination;

use challenge_primitives::types::{Bytes32, CallContext, Timestamp};
use tracing::{debug, info};

use crate::{
    challenge::{
        signals::{ChallengeSignal, ChallengeTerminationKind},
        state::{Challenge, ChallengeMode},
    },
    errors::{ChallengeError, ChallengeResult},
    segments::{extract_segment, hash_state, Segment, SegmentSelection},
};

impl Challenge {
    /// Checks the conditions that every move shares and returns the contested segment.
    ///
    /// The checks run in a fixed order: the challenge must exist, the sender must be on the clock
    /// and within its time, the selection must match the committed round, the challenge must be
    /// in the `required` mode, if any, and the selection must point at a valid segment.
    pub(crate) fn check_move(
        &self,
        ctx: &CallContext,
        selection: &SegmentSelection,
        required: Option<ChallengeMode>,
        event: &'static str,
    ) -> ChallengeResult<Segment> {
        self.check_turn(ctx, event)?;

        let actual = selection.state_hash();
        if actual != self.challenge_state_hash {
            return Err(ChallengeError::StateMismatch {
                expected: self.challenge_state_hash,
                actual,
            });
        }

        if required.is_some_and(|mode| mode != self.mode) {
            return Err(ChallengeError::InvalidTransition {
                mode: self.mode,
                event,
            });
        }

        extract_segment(selection)
    }

    /// Checks that the challenge exists and that `ctx.sender` may move now.
    fn check_turn(&self, ctx: &CallContext, event: &'static str) -> ChallengeResult<()> {
        self.check_active(event)?;

        if ctx.sender != self.current.addr {
            return Err(ChallengeError::AccessViolation {
                sender: ctx.sender,
                expected: self.current.addr,
            });
        }

        if self.is_timed_out(ctx.timestamp) {
            return Err(ChallengeError::TimedOut {
                elapsed: self.elapsed(ctx.timestamp),
                time_left: self.current.time_left,
            });
        }

        Ok(())
    }

    pub(super) fn check_active(&self, event: &'static str) -> ChallengeResult<()> {
        if self.is_active() {
            Ok(())
        } else {
            Err(ChallengeError::InvalidTransition {
                mode: self.mode,
                event,
            })
        }
    }

    /// Commits a new bisection round.
    pub(crate) fn complete_bisection(
        &mut self,
        segments_start: u64,
        segments_length: u64,
        segments: Vec<Bytes32>,
    ) -> ChallengeSignal {
        let challenge_state_hash = hash_state(segments_start, segments_length, &segments);
        self.challenge_state_hash = challenge_state_hash;

        debug!(
            %challenge_state_hash,
            segments_start,
            segments_length,
            degree = segments.len().saturating_sub(1),
            "committed bisection round"
        );

        ChallengeSignal::Bisected {
            challenge_state_hash,
            segments_start,
            segments_length,
            segments,
        }
    }

    /// Charges the time since the last move to the mover and hands the turn to the other party.
    pub(super) fn take_turn(&mut self, now: Timestamp) {
        let elapsed = self.elapsed(now);
        self.current.time_left = self.current.time_left.saturating_sub(elapsed);

        std::mem::swap(&mut self.current, &mut self.next);
        self.last_move_timestamp = now;
    }

    /// Records that the mover proved itself right.
    ///
    /// No payout happens here. The committed state becomes unsatisfiable so the other party can no
    /// longer move, and the challenge is decided when its clock runs out.
    pub(super) fn current_wins(&mut self, kind: ChallengeTerminationKind) -> ChallengeSignal {
        info!(winner = %self.current.addr, loser = %self.next.addr, %kind, "mover proved itself right");

        self.challenge_state_hash = Bytes32::ZERO;

        ChallengeSignal::ChallengeEnded { kind }
    }
}
