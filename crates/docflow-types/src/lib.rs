//! Shared domain types for Docflow.
//!
//! This crate contains the core domain types used across the workflow
//! builder: the workflow draft, its trigger and action unions, reviewers,
//! wizard step identifiers, builder configuration and error types.
//!
//! Zero infrastructure dependencies -- only serde, uuid, chrono, thiserror.

pub mod action;
pub mod config;
pub mod draft;
pub mod error;
pub mod trigger;
pub mod wizard;
