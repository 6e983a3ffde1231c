//! Bisection arithmetic.
//!
//! A bisection round commits to a range `[start, start + length)` and to the state hash at each of
//! `degree + 1` evenly spaced points of that range. The functions here are pure and independent of
//! any challenge: they compute which sub-range a selection points at, commit to a round and check
//! that a proposed split actually disputes the selected sub-range.

use challenge_primitives::{hash::keccak256_packed, types::Bytes32};
use serde::{Deserialize, Serialize};

use crate::errors::{ChallengeError, ChallengeResult};

/// A mover's claim about the round committed in the challenge, together with the sub-range they
/// want to contest.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SegmentSelection {
    /// Start of the committed range.
    pub old_segments_start: u64,

    /// Length of the committed range.
    pub old_segments_length: u64,

    /// State hashes at the split points of the committed range.
    pub old_segments: Vec<Bytes32>,

    /// Index of the contested sub-range, i.e. the one between `old_segments[challenge_position]`
    /// and `old_segments[challenge_position + 1]`.
    pub challenge_position: u64,
}

impl SegmentSelection {
    /// Hash of the round this selection claims is committed.
    pub fn state_hash(&self) -> Bytes32 {
        hash_state(
            self.old_segments_start,
            self.old_segments_length,
            &self.old_segments,
        )
    }

    /// The committed hash at the start of the contested sub-range.
    pub fn start_hash(&self) -> ChallengeResult<Bytes32> {
        self.segment_at(self.challenge_position)
    }

    /// The committed hash at the end of the contested sub-range.
    pub fn end_hash(&self) -> ChallengeResult<Bytes32> {
        self.segment_at(self.challenge_position.saturating_add(1))
    }

    fn segment_at(&self, position: u64) -> ChallengeResult<Bytes32> {
        usize::try_from(position)
            .ok()
            .and_then(|pos| self.old_segments.get(pos))
            .copied()
            .ok_or(ChallengeError::DegenerateSelection {
                reason: "challenge position out of range",
            })
    }
}

/// A contiguous range of blocks or machine steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Segment {
    /// First block or step of the range.
    pub start: u64,

    /// Number of blocks or steps in the range.
    pub length: u64,
}

/// Computes the sub-range contested by `selection`.
///
/// The committed range is split into `degree = old_segments.len() - 1` equal parts, and the last
/// part absorbs the remainder so that the parts exactly cover the committed range.
pub fn extract_segment(selection: &SegmentSelection) -> ChallengeResult<Segment> {
    let num_segments = selection.old_segments.len() as u64;
    if num_segments < 2 {
        return Err(ChallengeError::DegenerateSelection {
            reason: "fewer than two segments",
        });
    }

    let degree = num_segments - 1;
    let position = selection.challenge_position;
    if position >= degree {
        return Err(ChallengeError::DegenerateSelection {
            reason: "challenge position out of range",
        });
    }

    let mut length = selection.old_segments_length / degree;
    // position < degree so the offset never exceeds old_segments_length
    let start = selection
        .old_segments_start
        .checked_add(length * position)
        .ok_or(ChallengeError::DegenerateSelection {
            reason: "segment start overflows",
        })?;

    if position == degree - 1 {
        length += selection.old_segments_length % degree;
    }

    Ok(Segment { start, length })
}

/// Commitment to a bisection round: `keccak(be256(start) ‖ be256(length) ‖ segments...)`.
pub fn hash_state(segments_start: u64, segments_length: u64, segments: &[Bytes32]) -> Bytes32 {
    let start = Bytes32::from_u64_be(segments_start);
    let length = Bytes32::from_u64_be(segments_length);

    let mut parts: Vec<&[u8]> = Vec::with_capacity(segments.len() + 2);
    parts.push(start.as_ref());
    parts.push(length.as_ref());
    parts.extend(segments.iter().map(AsRef::as_ref));

    keccak256_packed(&parts)
}

/// Checks that a proposal from `start_hash` to `end_hash` disputes the contested sub-range.
///
/// The mover must agree with the committed start and disagree with the committed end.
pub fn validate_bisection(
    selection: &SegmentSelection,
    start_hash: Bytes32,
    end_hash: Bytes32,
) -> ChallengeResult<()> {
    if selection.start_hash()? != start_hash {
        return Err(ChallengeError::WrongStart);
    }

    if selection.end_hash()? == end_hash {
        return Err(ChallengeError::SameEndpoint);
    }

    Ok(())
}
