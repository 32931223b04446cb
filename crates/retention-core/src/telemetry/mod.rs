//! Structured logging: `tracing` with `EnvFilter`, span helpers per channel.

pub mod setup;
pub mod spans;

pub use setup::init_tracing;
