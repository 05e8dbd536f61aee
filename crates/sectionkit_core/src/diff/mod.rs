//! Section snapshot diffing.
//!
//! # Responsibility
//! - Capture page sections as hashed snapshots.
//! - Classify changes between snapshots and annotate risky edits.
//!
//! # Invariants
//! - Pure: no I/O; only snapshot creation reads the clock, and only when
//!   the caller supplies no timestamp.
//! - Equal content hashes mean `unchanged`.

mod compare;
mod snapshot;

pub use compare::{
    create_section_diff, diff_snapshot_sets, AnnotationSeverity, DiffAnnotation, DiffChangeType,
    DiffEnvelope, DiffOptions, ANNOTATION_CONTENT_CONFLICT, ANNOTATION_CONTENT_DELTA_LARGE,
    ANNOTATION_CONTENT_EMPTY, ANNOTATION_CONTENT_REMOVAL, ANNOTATION_MEDIA_ALT_MISSING,
    ANNOTATION_MEDIA_PATH_CHANGED, LARGE_CONTENT_DELTA,
};
pub use snapshot::{
    content_hash, create_snapshot_envelope, PageSection, SnapshotEnvelope, SnapshotOptions,
};
