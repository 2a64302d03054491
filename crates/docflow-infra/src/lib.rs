//! Infrastructure layer for docflow.
//!
//! Filesystem adapters around `docflow-core`: the `config.toml` loader,
//! template directory discovery, existing-workflow discovery for conflict
//! checks, and draft file loading.

pub mod config;
pub mod files;
pub mod templates;
pub mod workflows;
