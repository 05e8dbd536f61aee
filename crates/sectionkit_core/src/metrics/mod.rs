//! Sidebar metric resolution and display formatting.
//!
//! # Responsibility
//! - Register metric resolvers keyed by metric id.
//! - Resolve metric values under capability gates.
//! - Format raw values for sidebar card tiles.
//!
//! # Invariants
//! - Resolution of an unknown, gated or empty metric yields `None`, never an error.

pub mod format;
pub mod registry;

pub use format::{build_sidebar_card_view, format_metric_value, MetricTileView, SidebarCardView};
pub use registry::{
    default_format, MetricContext, MetricRegistry, MetricRegistryError, MetricResolver,
    MetricResult,
};
