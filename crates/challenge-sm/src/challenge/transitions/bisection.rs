use challenge_params::prelude::ChallengeParams;

use crate::{
    challenge::{events::BisectEvent, machine::ChallengeOutput, state::Challenge},
    errors::{ChallengeError, ChallengeResult},
    segments::validate_bisection,
};

impl Challenge {
    /// Processes a bisection of the contested segment.
    ///
    /// Allowed in both block and execution mode. The contested segment must span more than one
    /// unit and is split into `min(length, max_challenge_degree)` parts.
    pub(crate) fn process_bisect(
        &mut self,
        cfg: &ChallengeParams,
        bisect: BisectEvent,
    ) -> ChallengeResult<ChallengeOutput> {
        let BisectEvent {
            ctx,
            selection,
            new_segments,
        } = bisect;

        let segment = self.check_move(&ctx, &selection, None, "Bisect")?;
        if segment.length <= 1 {
            return Err(ChallengeError::DegenerateSelection {
                reason: "a single unit cannot be bisected",
            });
        }

        let degree = segment.length.min(cfg.max_challenge_degree);
        let expected = usize::try_from(degree)
            .ok()
            .and_then(|degree| degree.checked_add(1))
            .unwrap_or(usize::MAX);
        if new_segments.len() != expected {
            return Err(ChallengeError::BadDegree {
                expected,
                actual: new_segments.len(),
            });
        }

        // the length check above guarantees at least two segments
        let (Some(first), Some(last)) = (new_segments.first(), new_segments.last()) else {
            return Err(ChallengeError::BadDegree {
                expected,
                actual: new_segments.len(),
            });
        };
        validate_bisection(&selection, *first, *last)?;

        let bisected = self.complete_bisection(segment.start, segment.length, new_segments);
        self.take_turn(ctx.timestamp);

        Ok(ChallengeOutput::with_signals(vec![bisected]))
    }
}
