//! Error types for the challenge manager.

use challenge_params::prelude::ParamsError;
use challenge_primitives::types::Address;
use challenge_sm::errors::ChallengeError;
use thiserror::Error;

use crate::traits::ProverError;

/// Errors returned by the operations of the [`ChallengeManager`](crate::manager::ChallengeManager).
///
/// A rejected operation never changes any challenge.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ManagerError {
    /// The manager was configured with parameters that cannot drive a challenge.
    #[error("invalid challenge parameters: {0}")]
    InvalidParams(#[from] ParamsError),

    /// The operation requires the collaborators to be set first.
    #[error("challenge manager is not initialized")]
    NotInitialized,

    /// The collaborators can only be set once.
    #[error("challenge manager is already initialized")]
    AlreadyInitialized,

    /// The result receiver must be a real address.
    #[error("no result receiver given")]
    NoResultReceiver,

    /// Only the result receiver may create and clear challenges.
    #[error("{sender} is not the result receiver")]
    NotResultReceiver {
        /// The address that submitted the call.
        sender: Address,
    },

    /// The one-step prover did not accept the proof.
    #[error("one-step proof rejected: {0}")]
    ProofRejected(#[from] ProverError),

    /// The challenge rejected the move.
    #[error(transparent)]
    Challenge(#[from] ChallengeError),
}

/// Result type alias for the challenge manager.
pub type ManagerResult<T> = Result<T, ManagerError>;
