//! This crate implements the state machine that drives a single bisection challenge.
//!
//! Two parties, an asserter and a challenger, disagree about the outcome of executing a range of
//! blocks. The state machine narrows that disagreement round by round: first over whole blocks,
//! then over the machine steps of the one contested block, until a single step remains that a
//! one-step proof can settle. Every accepted move emits signals describing what happened and,
//! when the challenge is decided, a duty to report the winner.

pub mod challenge;
pub mod errors;
pub mod segments;
pub mod state_machine;

#[cfg(test)]
pub(crate) mod testing;
