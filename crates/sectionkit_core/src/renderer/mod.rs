//! Renderer-ready descriptors derived from declarative schemas.
//!
//! # Responsibility
//! - Classify each schema field into a rendering kind.
//! - Resolve named sections, sidebar cards and workflows out of registries.
//!
//! # Invariants
//! - Descriptor building is pure and never fails.
//! - Unrecognized field types fall back to `input`; see `crate::lint` for
//!   surfacing them.

pub mod descriptor;

pub use descriptor::{
    build_section_descriptor, get_sidebar_card, get_workflow, resolve_section_descriptor,
    FieldDescriptor, FieldKind, SectionDescriptor, SelectOption,
};
