//! Interfaces of the collaborators the challenge manager relies on.

use challenge_primitives::types::{Address, Bytes32, ChallengeIndex};
use thiserror::Error;

/// The party that owns the challenges and acts on their outcome.
///
/// Only the receiver may create and clear challenges. It is told the winner of every challenge
/// that ends by timeout.
pub trait ChallengeResultReceiver {
    /// The address the receiver submits its calls from.
    fn address(&self) -> Address;

    /// Reports the outcome of the challenge at `challenge_index`.
    ///
    /// Called exactly once per challenge, after the challenge has been deleted.
    fn complete_challenge(&mut self, challenge_index: ChallengeIndex, winner: Address, loser: Address);
}

/// The environment a one-step proof is executed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExecutionContext {
    /// Upper bound on the inbox messages the contested execution may read.
    pub max_inbox_messages_read: u64,
    /// The bridge the contested execution reads its messages from.
    pub bridge: Address,
}

/// Errors a [`OneStepProver`] can reject a proof with.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProverError {
    /// The proof could not be decoded.
    #[error("malformed proof: {0}")]
    MalformedProof(String),

    /// The proof decodes but does not execute the claimed step.
    #[error("cannot prove step {step}: {reason}")]
    Unprovable {
        /// The contested step.
        step: u64,
        /// Why the step cannot be executed.
        reason: String,
    },
}

/// Executes a single machine step.
///
/// Implementations must be deterministic: the same inputs always give the same result.
pub trait OneStepProver {
    /// Executes `step` starting from the machine committed by `before_hash` using the witness in
    /// `proof` and returns the hash of the machine after the step.
    fn prove_one_step(
        &self,
        ctx: &ExecutionContext,
        step: u64,
        before_hash: Bytes32,
        proof: &[u8],
    ) -> Result<Bytes32, ProverError>;
}
