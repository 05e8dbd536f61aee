//! Section snapshots and their content hash.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

const FNV_OFFSET_BASIS: u32 = 0x811c_9dc5;
const FNV_PRIME: u32 = 0x0100_0193;

/// Persisted state of one page section, with its edit history hints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageSection {
    pub id: String,
    pub section_key: String,
    pub content_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default)]
    pub content_value: Option<String>,
    #[serde(default)]
    pub css_selector: Option<String>,
    #[serde(default)]
    pub media_path: Option<String>,
    #[serde(default)]
    pub media_alt_text: Option<String>,
    pub display_order: i64,
    pub is_locked: bool,
    /// RFC 3339 timestamp of the last edit.
    pub updated_at_utc: String,
    #[serde(default)]
    pub last_published_at_utc: Option<String>,
    /// Content the remote editor started from, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous_content_value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub etag: Option<String>,
}

/// Overrides for [`create_snapshot_envelope`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SnapshotOptions {
    pub change_version: Option<i64>,
    pub captured_at_utc: Option<String>,
    pub etag: Option<String>,
}

/// Point-in-time capture of one section on one page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotEnvelope {
    pub page_id: String,
    pub section_id: String,
    pub selector: Option<String>,
    /// Milliseconds since the Unix epoch.
    pub change_version: i64,
    pub captured_at_utc: String,
    /// `h:` followed by eight hex digits.
    pub content_hash: String,
    pub etag: Option<String>,
    pub payload: PageSection,
}

/// Captures `section` for diffing.
///
/// `change_version` defaults to the section's `updatedAtUtc` in epoch
/// milliseconds, or the current time when that does not parse.
pub fn create_snapshot_envelope(
    page_id: &str,
    section: &PageSection,
    options: SnapshotOptions,
) -> SnapshotEnvelope {
    let change_version = options.change_version.unwrap_or_else(|| {
        DateTime::parse_from_rfc3339(&section.updated_at_utc)
            .map(|parsed| parsed.timestamp_millis())
            .unwrap_or_else(|_| Utc::now().timestamp_millis())
    });
    let captured_at_utc = options
        .captured_at_utc
        .unwrap_or_else(|| Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true));

    SnapshotEnvelope {
        page_id: page_id.to_string(),
        section_id: section.id.clone(),
        selector: section.css_selector.clone(),
        change_version,
        captured_at_utc,
        content_hash: content_hash(section),
        etag: options.etag.or_else(|| section.etag.clone()),
        payload: section.clone(),
    }
}

/// Hashes the fields that define a section's visible state.
///
/// Title, selector and history hints are excluded.
pub fn content_hash(section: &PageSection) -> String {
    let payload = json!({
        "id": section.id,
        "sectionKey": section.section_key,
        "contentType": section.content_type,
        "contentValue": section.content_value,
        "mediaPath": section.media_path,
        "mediaAltText": section.media_alt_text,
        "displayOrder": section.display_order,
        "isLocked": section.is_locked,
        "updatedAtUtc": section.updated_at_utc,
        "lastPublishedAtUtc": section.last_published_at_utc,
    });
    format!("h:{:08x}", fnv1a_utf16(&stable_json(&payload)))
}

/// Compact JSON with object keys sorted at every depth.
fn stable_json(value: &Value) -> String {
    match value {
        Value::Array(items) => {
            let items: Vec<String> = items.iter().map(stable_json).collect();
            format!("[{}]", items.join(","))
        }
        Value::Object(map) => {
            let mut entries: Vec<_> = map.iter().collect();
            entries.sort_by(|(a, _), (b, _)| a.cmp(b));
            let entries: Vec<String> = entries
                .into_iter()
                .map(|(key, entry)| format!("{}:{}", Value::from(key.as_str()), stable_json(entry)))
                .collect();
            format!("{{{}}}", entries.join(","))
        }
        scalar => scalar.to_string(),
    }
}

// Hashes UTF-16 code units so digests match hosts that hash JS strings.
fn fnv1a_utf16(input: &str) -> u32 {
    input.encode_utf16().fold(FNV_OFFSET_BASIS, |hash, unit| {
        (hash ^ u32::from(unit)).wrapping_mul(FNV_PRIME)
    })
}
