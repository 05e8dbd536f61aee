//! Core domain logic for sectionkit.
//! This crate turns declarative section schemas into renderer-ready
//! descriptors and owns the registry/lookup contracts around them.

pub mod capability;
pub mod catalog;
pub mod diff;
pub mod lint;
pub mod logging;
pub mod metrics;
pub mod model;
pub mod registry;
pub mod renderer;

pub use capability::CapabilitySet;
pub use catalog::{Catalog, CatalogError, CatalogResult};
pub use diff::{
    create_section_diff, create_snapshot_envelope, diff_snapshot_sets, DiffEnvelope, DiffOptions,
    PageSection, SnapshotEnvelope, SnapshotOptions,
};
pub use lint::{
    lint_catalog, lint_registry_key, lint_section_schema, lint_workflow, SchemaWarning,
    WarningCode,
};
pub use logging::{default_log_level, init_logging, init_stderr_logging, logging_status, LogSink};
pub use metrics::{
    build_sidebar_card_view, format_metric_value, MetricContext, MetricRegistry,
    MetricRegistryError, MetricResolver, MetricResult, SidebarCardView,
};
pub use model::field::FieldSchema;
pub use model::section::SectionSchema;
pub use model::sidebar::SidebarCardSchema;
pub use model::workflow::WorkflowSchema;
pub use registry::{
    lookup_or_none, Registry, RegistryError, SectionSchemaRegistry, SidebarCardRegistry,
    WorkflowRegistry,
};
pub use renderer::{
    build_section_descriptor, get_sidebar_card, get_workflow, resolve_section_descriptor,
    FieldDescriptor, FieldKind, SectionDescriptor, SelectOption,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
