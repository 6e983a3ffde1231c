//! Fixed-size byte types and aliases used throughout the challenge protocol.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Index handle of a challenge inside the challenge manager.
pub type ChallengeIndex = u64;

/// Wall-clock timestamp in seconds.
pub type Timestamp = u64;

/// A 32-byte commitment.
///
/// The all-zero value is never produced by hashing in practice and is used as the "unsatisfiable"
/// commitment.
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Bytes32(#[serde(with = "hex::serde")] [u8; 32]);

impl Bytes32 {
    /// The all-zero value.
    pub const ZERO: Self = Self([0u8; 32]);

    /// Wraps the given bytes.
    pub const fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Returns the underlying bytes.
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Returns `true` if every byte is zero.
    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 32]
    }

    /// Encodes an integer as a 32-byte big-endian word, left-padded with zeroes.
    pub fn from_u64_be(value: u64) -> Self {
        let mut buf = [0u8; 32];
        buf[24..].copy_from_slice(&value.to_be_bytes());
        Self(buf)
    }
}

impl From<[u8; 32]> for Bytes32 {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

impl AsRef<[u8]> for Bytes32 {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for Bytes32 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for Bytes32 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Bytes32({self})")
    }
}

/// A 20-byte account address identifying a participant or a collaborator.
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Address(#[serde(with = "hex::serde")] [u8; 20]);

impl Address {
    /// The zero address, used wherever "no address" is meant.
    pub const ZERO: Self = Self([0u8; 20]);

    /// Wraps the given bytes.
    pub const fn new(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }

    /// Returns the underlying bytes.
    pub const fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    /// Returns `true` if this is the zero address.
    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 20]
    }
}

impl From<[u8; 20]> for Address {
    fn from(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({self})")
    }
}

/// The environment of a single external invocation: who is calling and when.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CallContext {
    /// The address that submitted the call.
    pub sender: Address,
    /// The time at which the call is executed.
    pub timestamp: Timestamp,
}

impl CallContext {
    /// Creates a new call context.
    pub const fn new(sender: Address, timestamp: Timestamp) -> Self {
        Self { sender, timestamp }
    }
}
