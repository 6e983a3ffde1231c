//! The state machine for a single challenge between an asserter and a challenger.
//!
//! This state machine handles the following:
//!
//! - The block-level bisection over the disputed range of blocks.
//! - The escalation of a single contested block to an execution challenge.
//! - The step-level bisection over the machine steps of that block.
//! - The resolution through a one-step proof, a timeout or an explicit clear.

pub mod duties;
pub mod events;
pub mod machine;
pub mod signals;
pub mod state;
#[cfg(test)]
mod tests;
mod transitions;
