//! The service that hosts every challenge between an asserter and a challenger.
//!
//! The [`ChallengeManager`](manager::ChallengeManager) owns the challenges, allocates their
//! indices and checks who may create and clear them. It drives each challenge through the
//! [`Challenge`](challenge_sm::challenge::state::Challenge) state machine, hands the winner of a
//! finished challenge to the result receiver and calls the one-step prover when a challenge has
//! been narrowed down to a single machine step.

pub mod errors;
pub mod log;
pub mod manager;
pub mod traits;
