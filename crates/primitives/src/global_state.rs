//! The global state a machine claims to have reached at a block boundary.

use serde::{Deserialize, Serialize};

use crate::{hash::keccak256_packed, types::Bytes32};

/// Domain label for global state commitments.
const GLOBAL_STATE_LABEL: &[u8] = b"Global state:";

/// The externally observable checkpoint of the rollup machine.
///
/// The layout keeps the two hash-valued fields and the two integer fields in separate arrays so
/// that the packed encoding is fixed-width.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GlobalState {
    /// `[block_hash, send_root]`.
    pub bytes32_vals: [Bytes32; 2],
    /// `[inbox_position, position_in_message]`.
    pub u64_vals: [u64; 2],
}

impl GlobalState {
    /// Creates a new global state from its four components.
    pub const fn new(
        block_hash: Bytes32,
        send_root: Bytes32,
        inbox_position: u64,
        position_in_message: u64,
    ) -> Self {
        Self {
            bytes32_vals: [block_hash, send_root],
            u64_vals: [inbox_position, position_in_message],
        }
    }

    /// Hash of the last produced block.
    pub const fn block_hash(&self) -> Bytes32 {
        self.bytes32_vals[0]
    }

    /// Merkle root of the outgoing messages.
    pub const fn send_root(&self) -> Bytes32 {
        self.bytes32_vals[1]
    }

    /// Number of inbox messages fully consumed.
    pub const fn inbox_position(&self) -> u64 {
        self.u64_vals[0]
    }

    /// Read offset inside the message at [`Self::inbox_position`].
    pub const fn position_in_message(&self) -> u64 {
        self.u64_vals[1]
    }

    /// Commitment to this global state.
    pub fn hash(&self) -> Bytes32 {
        keccak256_packed(&[
            GLOBAL_STATE_LABEL,
            self.bytes32_vals[0].as_ref(),
            self.bytes32_vals[1].as_ref(),
            &self.u64_vals[0].to_be_bytes(),
            &self.u64_vals[1].to_be_bytes(),
        ])
    }
}
