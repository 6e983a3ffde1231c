//! Default values for the challenge protocol.

/// Default upper bound on the number of sub-segments a single bisection may split a segment into.
///
/// Bounds the size of a single move regardless of how large the contested range is.
pub const MAX_CHALLENGE_DEGREE: u64 = 40;

/// Default upper bound on the number of machine steps a single execution challenge may span.
pub const MAX_STEPS: u64 = 1 << 43;

/// Smallest degree that still makes progress: a segment split in fewer than two parts is not
/// split at all.
pub(crate) const MIN_CHALLENGE_DEGREE: u64 = 2;
