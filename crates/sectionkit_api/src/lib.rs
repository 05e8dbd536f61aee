//! Host-facing use-case API for rendering shells.
//!
//! # Responsibility
//! - Expose catalog lookups and section diffs as stable response envelopes
//!   with JSON payloads.
//! - Keep error semantics simple: `ok` plus a human-readable `message`.
//!
//! # Invariants
//! - Exported functions never panic.
//! - The catalog is loaded at most once per process.

pub mod api;

pub use api::{
    core_version, describe_section, diff_sections, init_logging, lint_catalog_report,
    list_section_keys, sidebar_card, workflow, ApiResponse,
};
