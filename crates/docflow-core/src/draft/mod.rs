//! Draft editing: structural mutations and templates.

pub mod ops;
pub mod template;
