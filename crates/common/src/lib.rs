//! Utilities shared by the services that embed the challenge manager, such as initializing the
//! tracing framework.

pub mod logging;

// Re-export tracing crate for convenience.
pub use tracing;
