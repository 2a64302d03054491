//! Observability setup for docflow binaries.

pub mod tracing_setup;
