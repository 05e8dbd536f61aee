//! Flat string-keyed registries of schema configuration.
//!
//! # Responsibility
//! - Hold section schemas, sidebar cards and workflows by stable key.
//! - Provide a lookup that reports absence as `None` instead of failing.
//!
//! # Invariants
//! - Any string is a valid key; the lowercase convention is a lint concern.
//! - Lookups use the exact key; no trimming or case folding.

mod keyed;

pub use keyed::{is_canonical_registry_key, lookup_or_none, Registry, RegistryError};

use crate::model::section::SectionSchema;
use crate::model::sidebar::SidebarCardSchema;
use crate::model::workflow::WorkflowSchema;

/// Section key -> section schema.
pub type SectionSchemaRegistry = Registry<SectionSchema>;
/// Card id -> sidebar card schema.
pub type SidebarCardRegistry = Registry<SidebarCardSchema>;
/// Workflow id -> workflow schema.
pub type WorkflowRegistry = Registry<WorkflowSchema>;
