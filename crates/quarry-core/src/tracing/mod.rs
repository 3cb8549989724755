//! Observability for Quarry.
//! `tracing` with `EnvFilter`, per-module log levels via `QUARRY_LOG`.

pub mod setup;

pub use setup::{init_tracing, init_tracing_json};
