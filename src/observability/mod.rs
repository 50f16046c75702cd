//! Observability: tracing subscriber setup.

pub mod init;

pub use init::init_tracing;
