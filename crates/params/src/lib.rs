//! This crate contains the protocol parameters that bound the interactive challenge game. Every
//! participant must agree on these values, otherwise their commitments to a bisection round will
//! not line up.

pub mod challenge;
mod default;
pub mod errors;
pub mod prelude;
