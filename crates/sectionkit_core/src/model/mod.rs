//! Declarative schema model for editable page sections and dashboard chrome.
//!
//! # Responsibility
//! - Define the wire shapes of section, sidebar card and workflow schemas.
//! - Keep field attributes that core does not interpret intact.
//!
//! # Invariants
//! - Field order in `SectionSchema::fields` is render order.
//! - Unknown field attributes round-trip through serde unchanged.

pub mod field;
pub mod section;
pub mod sidebar;
pub mod workflow;
