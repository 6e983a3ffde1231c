//! Keccak-256 over packed encodings.
//!
//! All commitments in the protocol are computed as Keccak-256 over the concatenation of their
//! fields, with integers encoded big-endian at their natural width. This is the same layout an
//! EVM-side one-step prover uses, so both sides agree on every commitment.

use tiny_keccak::{Hasher, Keccak};

use crate::types::Bytes32;

/// Hashes the concatenation of `parts`.
pub fn keccak256_packed(parts: &[&[u8]]) -> Bytes32 {
    let mut hasher = Keccak::v256();
    for part in parts {
        hasher.update(part);
    }

    let mut out = [0u8; 32];
    hasher.finalize(&mut out);

    Bytes32::new(out)
}

/// Hashes a single byte string.
pub fn keccak256(data: &[u8]) -> Bytes32 {
    keccak256_packed(&[data])
}
