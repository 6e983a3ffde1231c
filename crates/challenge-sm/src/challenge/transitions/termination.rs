use tracing::info;

use crate::{
    challenge::{
        duties::ChallengeDuty,
        events::{ClearEvent, TimeoutEvent},
        machine::ChallengeOutput,
        signals::{ChallengeSignal, ChallengeTerminationKind},
        state::Challenge,
    },
    errors::{ChallengeError, ChallengeResult},
};

impl Challenge {
    /// Processes a timeout claim.
    ///
    /// Anyone may claim the timeout once the participant on the clock has exhausted its time. The
    /// waiting participant wins and the challenge is deleted.
    pub(crate) fn process_timeout(
        &mut self,
        timeout: TimeoutEvent,
    ) -> ChallengeResult<ChallengeOutput> {
        self.check_active("Timeout")?;

        let now = timeout.ctx.timestamp;
        if !self.is_timed_out(now) {
            return Err(ChallengeError::DeadlineNotReached {
                elapsed: self.elapsed(now),
                time_left: self.current.time_left,
            });
        }

        let winner = self.next.addr;
        let loser = self.current.addr;
        *self = Challenge::default();

        info!(%winner, %loser, claimed_by = %timeout.ctx.sender, "challenge timed out");

        Ok(ChallengeOutput::with_duties_and_signals(
            vec![ChallengeDuty::CompleteChallenge { winner, loser }],
            vec![ChallengeSignal::ChallengeEnded {
                kind: ChallengeTerminationKind::Timeout,
            }],
        ))
    }

    /// Processes the deletion of the challenge without a winner.
    pub(crate) fn process_clear(&mut self, clear: ClearEvent) -> ChallengeResult<ChallengeOutput> {
        self.check_active("Clear")?;

        *self = Challenge::default();

        info!(cleared_by = %clear.ctx.sender, "challenge cleared");

        Ok(ChallengeOutput::with_signals(vec![
            ChallengeSignal::ChallengeEnded {
                kind: ChallengeTerminationKind::Cleared,
            },
        ]))
    }
}
