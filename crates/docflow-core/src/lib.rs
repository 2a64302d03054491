//! Workflow authoring logic for docflow.
//!
//! Pure draft operations, the step catalog and validators, conflict
//! detection, summaries, and the wizard controller. Depends only on
//! `docflow-types`; file discovery and config loading live in
//! `docflow-infra`.

pub mod draft;
pub mod sink;
pub mod wizard;
