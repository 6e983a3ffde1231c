//! This crate contains general types and pure functions that need to be shared across the
//! challenge protocol crates.
//!
//! It is not intended to be used directly by end users, but rather to be used as a dependency by
//! other crates. Also note that this crate lies at the bottom of the crate-hierarchy in this
//! workspace i.e., it does not depend on any other crate in this workspace.

pub mod errors;
pub mod global_state;
pub mod hash;
pub mod machine;
pub mod state_hash;
pub mod types;
