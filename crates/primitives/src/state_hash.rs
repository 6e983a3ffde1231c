//! Commitments to the endpoints of block-level and step-level bisections.
//!
//! Each commitment purpose uses its own label prefix so that, for example, a block-state hash can
//! never be replayed as a machine hash even when both commit to the same global state.

use crate::{
    errors::MachineHashError,
    hash::{keccak256, keccak256_packed},
    machine::{Machine, MachineStatus},
    types::Bytes32,
};

/// Commitment to a freshly started machine that executes `wasm_module_root` over the global state
/// committed to by `global_state_hash`.
pub fn hash_start_machine(global_state_hash: Bytes32, wasm_module_root: Bytes32) -> Bytes32 {
    Machine::start(global_state_hash, wasm_module_root).running_hash()
}

/// Commitment to a machine that halted with `status`.
///
/// Only finished machines embed the global state. Errored and too-far machines are status-only
/// commitments.
pub fn hash_end_machine(
    status: MachineStatus,
    global_state_hash: Bytes32,
) -> Result<Bytes32, MachineHashError> {
    match status {
        MachineStatus::Finished => Ok(keccak256_packed(&[
            b"Machine finished:",
            global_state_hash.as_ref(),
        ])),
        MachineStatus::Errored => Ok(keccak256(b"Machine errored:")),
        MachineStatus::TooFar => Ok(keccak256(b"Machine too far:")),
        MachineStatus::Running | MachineStatus::Blocked => {
            Err(MachineHashError::InvalidStatus(status))
        }
    }
}

/// Commitment to the state at a block boundary, used for the segments of block-level bisection.
pub fn hash_block_state(
    status: MachineStatus,
    global_state_hash: Bytes32,
) -> Result<Bytes32, MachineHashError> {
    match status {
        MachineStatus::Finished => Ok(keccak256_packed(&[
            b"Block state:",
            global_state_hash.as_ref(),
        ])),
        MachineStatus::Errored => Ok(keccak256_packed(&[
            b"Block state, errored:",
            global_state_hash.as_ref(),
        ])),
        MachineStatus::TooFar => Ok(keccak256(b"Block state, too far:")),
        MachineStatus::Running | MachineStatus::Blocked => {
            Err(MachineHashError::InvalidStatus(status))
        }
    }
}
