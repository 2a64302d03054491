//! The authoring wizard.
//!
//! `catalog` fixes the step lists per mode, `validator` and `conflict` gate
//! forward navigation, `summary` renders the live preview, `hint` schedules
//! hint auto-hide, and `controller` ties them into one session state machine.

pub mod catalog;
pub mod conflict;
pub mod controller;
pub mod hint;
pub mod summary;
pub mod validator;
