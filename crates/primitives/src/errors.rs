//! Errors for the hashing primitives.

use thiserror::Error;

use crate::machine::MachineStatus;

/// Error while computing a commitment over a machine or block state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MachineHashError {
    /// The status has no commitment in the requested domain.
    #[error("machine status {0} cannot be committed to in this context")]
    InvalidStatus(MachineStatus),
}
