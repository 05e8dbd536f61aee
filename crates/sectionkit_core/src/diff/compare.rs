//! Snapshot comparison and change annotations.

use super::snapshot::SnapshotEnvelope;
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Content grew or shrank by more than this many UTF-16 units.
pub const LARGE_CONTENT_DELTA: usize = 1024;

pub const ANNOTATION_CONTENT_DELTA_LARGE: &str = "content.delta.large";
pub const ANNOTATION_MEDIA_PATH_CHANGED: &str = "media.path.changed";
pub const ANNOTATION_MEDIA_ALT_MISSING: &str = "media.alt.missing";
pub const ANNOTATION_CONTENT_EMPTY: &str = "content.empty";
pub const ANNOTATION_CONTENT_REMOVAL: &str = "content.removal";
pub const ANNOTATION_CONTENT_CONFLICT: &str = "content.conflict";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiffChangeType {
    Added,
    Removed,
    Modified,
    Unchanged,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnnotationSeverity {
    Info,
    Warning,
    Error,
}

/// Reviewer-facing note attached to a diff.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffAnnotation {
    pub code: String,
    pub message: String,
    pub severity: AnnotationSeverity,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl DiffAnnotation {
    fn new(code: &str, message: &str, severity: AnnotationSeverity, field: &str) -> Self {
        Self {
            code: code.to_string(),
            message: message.to_string(),
            severity,
            field: Some(field.to_string()),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DiffOptions {
    /// Flag remote edits that did not start from the local baseline.
    pub detect_conflicts: bool,
}

/// Outcome of comparing two snapshots of one section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiffEnvelope {
    pub page_id: String,
    pub section_id: String,
    pub change_type: DiffChangeType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub before: Option<SnapshotEnvelope>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub after: Option<SnapshotEnvelope>,
    #[serde(default)]
    pub conflict: bool,
    pub annotations: Vec<DiffAnnotation>,
}

/// Compares two snapshots of one section.
///
/// Returns `None` only when both sides are absent. Snapshots with equal
/// content hashes are `unchanged`.
pub fn create_section_diff(
    before: Option<&SnapshotEnvelope>,
    after: Option<&SnapshotEnvelope>,
    options: DiffOptions,
) -> Option<DiffEnvelope> {
    let (anchor, change_type) = match (before, after) {
        (None, None) => return None,
        (None, Some(after)) => (after, DiffChangeType::Added),
        (Some(before), None) => (before, DiffChangeType::Removed),
        (Some(before), Some(after)) if before.content_hash == after.content_hash => {
            (after, DiffChangeType::Unchanged)
        }
        (Some(_), Some(after)) => (after, DiffChangeType::Modified),
    };

    let mut annotations = annotate(change_type, before, after);
    let conflict = options.detect_conflicts
        && change_type == DiffChangeType::Modified
        && before.zip(after).is_some_and(|(before, after)| {
            after
                .payload
                .previous_content_value
                .as_deref()
                .is_some_and(|previous| Some(previous) != before.payload.content_value.as_deref())
        });
    if conflict {
        annotations.push(DiffAnnotation::new(
            ANNOTATION_CONTENT_CONFLICT,
            "Remote update differs from local baseline.",
            AnnotationSeverity::Error,
            "contentValue",
        ));
    }

    Some(DiffEnvelope {
        page_id: anchor.page_id.clone(),
        section_id: anchor.section_id.clone(),
        change_type,
        before: before.cloned(),
        after: after.cloned(),
        conflict,
        annotations,
    })
}

/// Diffs two snapshot sets matched by section id.
///
/// Result order: changes in `after` order, then removals in `before` order.
/// Unchanged sections are left out.
pub fn diff_snapshot_sets(
    before: &[SnapshotEnvelope],
    after: &[SnapshotEnvelope],
    options: DiffOptions,
) -> Vec<DiffEnvelope> {
    let mut removal_order = Vec::new();
    let mut previous_by_id = HashMap::<&str, &SnapshotEnvelope>::new();
    for snapshot in before {
        if previous_by_id
            .insert(snapshot.section_id.as_str(), snapshot)
            .is_none()
        {
            removal_order.push(snapshot.section_id.as_str());
        }
    }

    let mut diffs = Vec::new();
    for snapshot in after {
        let prior = previous_by_id.remove(snapshot.section_id.as_str());
        if let Some(diff) = create_section_diff(prior, Some(snapshot), options) {
            if diff.change_type != DiffChangeType::Unchanged {
                diffs.push(diff);
            }
        }
    }
    for section_id in removal_order {
        if let Some(snapshot) = previous_by_id.remove(section_id) {
            diffs.extend(create_section_diff(Some(snapshot), None, options));
        }
    }

    debug!(
        "event=snapshot_diff module=diff status=ok before={} after={} changes={}",
        before.len(),
        after.len(),
        diffs.len()
    );
    diffs
}

fn annotate(
    change_type: DiffChangeType,
    before: Option<&SnapshotEnvelope>,
    after: Option<&SnapshotEnvelope>,
) -> Vec<DiffAnnotation> {
    let mut annotations = Vec::new();
    let before = before.map(|snapshot| &snapshot.payload);
    let after = after.map(|snapshot| &snapshot.payload);
    let before_content = before
        .and_then(|section| section.content_value.as_deref())
        .unwrap_or_default();
    let after_content = after
        .and_then(|section| section.content_value.as_deref())
        .unwrap_or_default();

    match change_type {
        DiffChangeType::Unchanged => {}
        DiffChangeType::Modified => {
            let before_len = before_content.encode_utf16().count();
            let after_len = after_content.encode_utf16().count();
            if before_len.abs_diff(after_len) > LARGE_CONTENT_DELTA {
                annotations.push(DiffAnnotation::new(
                    ANNOTATION_CONTENT_DELTA_LARGE,
                    "Section content changed by more than 1KB.",
                    AnnotationSeverity::Info,
                    "contentValue",
                ));
            }

            let before_media = before.and_then(|section| section.media_path.as_deref());
            let after_media = after.and_then(|section| section.media_path.as_deref());
            if before_media != after_media && (is_filled(before_media) || is_filled(after_media)) {
                annotations.push(DiffAnnotation::new(
                    ANNOTATION_MEDIA_PATH_CHANGED,
                    "Primary media asset replaced.",
                    AnnotationSeverity::Warning,
                    "mediaPath",
                ));
            }

            let before_alt = before.and_then(|section| section.media_alt_text.as_deref());
            let after_alt = after.and_then(|section| section.media_alt_text.as_deref());
            if before_alt != after_alt && after_alt == Some("") {
                annotations.push(DiffAnnotation::new(
                    ANNOTATION_MEDIA_ALT_MISSING,
                    "Media alt text cleared during the update.",
                    AnnotationSeverity::Warning,
                    "mediaAltText",
                ));
            }
        }
        DiffChangeType::Added => {
            if after_content.is_empty() {
                annotations.push(DiffAnnotation::new(
                    ANNOTATION_CONTENT_EMPTY,
                    "New section was introduced without content.",
                    AnnotationSeverity::Warning,
                    "contentValue",
                ));
            }
        }
        DiffChangeType::Removed => {
            if !before_content.is_empty() {
                annotations.push(DiffAnnotation::new(
                    ANNOTATION_CONTENT_REMOVAL,
                    "Section with content was removed.",
                    AnnotationSeverity::Warning,
                    "contentValue",
                ));
            }
        }
    }

    annotations
}

fn is_filled(value: Option<&str>) -> bool {
    value.is_some_and(|value| !value.is_empty())
}
