//! Use-case functions backed by the process-wide catalog.
//!
//! # Contract
//! - Sync calls; the first call may read catalog files.
//! - Never panic; failures come back as `ApiResponse { ok: false, .. }`.
//! - Payloads are compact JSON strings.

use log::{error, info};
use sectionkit_core::{
    core_version as core_version_inner, create_snapshot_envelope, diff_snapshot_sets,
    get_sidebar_card, get_workflow, init_logging as init_logging_inner, lint_catalog,
    resolve_section_descriptor, Catalog, DiffOptions, PageSection, SnapshotEnvelope,
    SnapshotOptions,
};
use serde::Serialize;
use std::sync::OnceLock;

/// Environment variable naming a catalog directory to load instead of the builtin one.
pub const CATALOG_DIR_ENV: &str = "SECTIONKIT_CATALOG_DIR";

static CATALOG: OnceLock<Result<Catalog, String>> = OnceLock::new();

/// Response envelope shared by every lookup call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    /// Whether a payload was produced.
    pub ok: bool,
    /// JSON payload on success.
    pub payload_json: Option<String>,
    /// Human-readable message for diagnostics/UI.
    pub message: String,
}

impl ApiResponse {
    fn success(message: impl Into<String>, payload_json: String) -> Self {
        Self {
            ok: true,
            payload_json: Some(payload_json),
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            payload_json: None,
            message: message.into(),
        }
    }
}

/// Returns the core crate version.
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes core file logging once per process.
///
/// Returns an empty string on success and the error message on failure.
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Builds the render descriptor of one section.
pub fn describe_section(section_key: String) -> ApiResponse {
    with_catalog("describe_section", |catalog| {
        match resolve_section_descriptor(&catalog.sections, section_key.as_str()) {
            Some(descriptor) => to_payload("Section resolved.", &descriptor),
            None => ApiResponse::failure(format!("Section not found: {section_key}")),
        }
    })
}

/// Returns one sidebar card schema.
pub fn sidebar_card(card_id: String) -> ApiResponse {
    with_catalog("sidebar_card", |catalog| {
        match get_sidebar_card(&catalog.sidebar_cards, card_id.as_str()) {
            Some(card) => to_payload("Sidebar card resolved.", card),
            None => ApiResponse::failure(format!("Sidebar card not found: {card_id}")),
        }
    })
}

/// Returns one workflow schema.
pub fn workflow(workflow_id: String) -> ApiResponse {
    with_catalog("workflow", |catalog| {
        match get_workflow(&catalog.workflows, workflow_id.as_str()) {
            Some(workflow) => to_payload("Workflow resolved.", workflow),
            None => ApiResponse::failure(format!("Workflow not found: {workflow_id}")),
        }
    })
}

/// Returns sorted section keys as a JSON array.
pub fn list_section_keys() -> ApiResponse {
    with_catalog("list_section_keys", |catalog| {
        let keys = catalog.sections.keys().collect::<Vec<_>>();
        to_payload(format!("Found {} section(s).", keys.len()), &keys)
    })
}

/// Lints the catalog and returns warnings as a JSON array.
pub fn lint_catalog_report() -> ApiResponse {
    with_catalog("lint_catalog_report", |catalog| {
        let warnings = lint_catalog(catalog);
        let message = if warnings.is_empty() {
            "No warnings.".to_string()
        } else {
            format!("Found {} warning(s).", warnings.len())
        };
        to_payload(message, &warnings)
    })
}

/// Diffs two JSON arrays of page sections captured from the same page.
///
/// The payload lists changed sections only; unchanged ones are left out.
pub fn diff_sections(
    page_id: String,
    before_sections_json: String,
    after_sections_json: String,
    detect_conflicts: bool,
) -> ApiResponse {
    let before = match snapshot_sections(page_id.as_str(), before_sections_json.as_str()) {
        Ok(snapshots) => snapshots,
        Err(err) => return ApiResponse::failure(format!("Invalid `before` sections: {err}")),
    };
    let after = match snapshot_sections(page_id.as_str(), after_sections_json.as_str()) {
        Ok(snapshots) => snapshots,
        Err(err) => return ApiResponse::failure(format!("Invalid `after` sections: {err}")),
    };

    let diffs = diff_snapshot_sets(&before, &after, DiffOptions { detect_conflicts });
    to_payload(format!("Found {} changed section(s).", diffs.len()), &diffs)
}

fn snapshot_sections(page_id: &str, raw: &str) -> Result<Vec<SnapshotEnvelope>, String> {
    let sections: Vec<PageSection> = serde_json::from_str(raw).map_err(|err| err.to_string())?;
    Ok(sections
        .iter()
        .map(|section| create_snapshot_envelope(page_id, section, SnapshotOptions::default()))
        .collect())
}

fn with_catalog(operation: &str, f: impl FnOnce(&Catalog) -> ApiResponse) -> ApiResponse {
    match catalog() {
        Ok(catalog) => f(catalog),
        Err(err) => ApiResponse::failure(format!("{operation} failed: {err}")),
    }
}

fn catalog() -> Result<&'static Catalog, &'static str> {
    CATALOG
        .get_or_init(load_catalog)
        .as_ref()
        .map_err(String::as_str)
}

fn load_catalog() -> Result<Catalog, String> {
    let result = match configured_catalog_dir() {
        Some(dir) => Catalog::load_dir(&dir),
        None => Catalog::builtin(),
    };
    match result {
        Ok(catalog) => {
            info!(
                "event=catalog_ready module=api status=ok sections={}",
                catalog.sections.len()
            );
            Ok(catalog)
        }
        Err(err) => {
            error!("event=catalog_ready module=api status=error error={err}");
            Err(err.to_string())
        }
    }
}

fn configured_catalog_dir() -> Option<String> {
    let raw = std::env::var(CATALOG_DIR_ENV).ok()?;
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn to_payload<T: Serialize + ?Sized>(message: impl Into<String>, value: &T) -> ApiResponse {
    match serde_json::to_string(value) {
        Ok(json) => ApiResponse::success(message, json),
        Err(err) => ApiResponse::failure(format!("payload encoding failed: {err}")),
    }
}

#[cfg(test)]
mod tests {
    use super::{
        core_version, describe_section, diff_sections, init_logging, lint_catalog_report,
        list_section_keys, sidebar_card, workflow,
    };
    use serde_json::Value;

    fn payload(response: &super::ApiResponse) -> Value {
        let raw = response
            .payload_json
            .as_deref()
            .expect("successful response carries payload");
        serde_json::from_str(raw).expect("payload is valid JSON")
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }

    #[test]
    fn init_logging_rejects_bad_input() {
        assert!(!init_logging("info".to_string(), String::new()).is_empty());
        assert!(!init_logging("verbose".to_string(), "/tmp/logs".to_string()).is_empty());
    }

    #[test]
    fn describe_section_returns_descriptor_payload() {
        let response = describe_section("hero_story".to_string());
        assert!(response.ok, "{}", response.message);
        let value = payload(&response);
        assert_eq!(value["fields"][0]["kind"], "richtext");
        assert_eq!(value["schema"]["id"], "hero_story");
    }

    #[test]
    fn lookups_report_not_found() {
        for response in [
            describe_section("missing".to_string()),
            sidebar_card("missing".to_string()),
            workflow("missing".to_string()),
        ] {
            assert!(!response.ok);
            assert!(response.payload_json.is_none());
            assert!(response.message.contains("not found"), "{}", response.message);
        }
    }

    #[test]
    fn sidebar_card_and_workflow_payloads_use_camel_case() {
        let card = sidebar_card("publishing_overview".to_string());
        assert!(card.ok, "{}", card.message);
        assert!(payload(&card)["footerHint"].is_string());

        let flow = workflow("default_content_flow".to_string());
        assert!(flow.ok, "{}", flow.message);
        assert_eq!(payload(&flow)["defaultStepId"], "draft");
    }

    #[test]
    fn list_and_lint_report_builtin_catalog() {
        let keys = list_section_keys();
        assert!(keys.ok, "{}", keys.message);
        assert_eq!(payload(&keys).as_array().map(Vec::len), Some(6));

        let lint = lint_catalog_report();
        assert!(lint.ok, "{}", lint.message);
        assert_eq!(lint.message, "No warnings.");
    }

    fn section_json(id: &str, content: &str) -> Value {
        serde_json::json!({
            "id": id,
            "sectionKey": "hero",
            "contentType": "Text",
            "contentValue": content,
            "displayOrder": 1,
            "isLocked": false,
            "updatedAtUtc": "2024-01-01T00:00:00.000Z"
        })
    }

    #[test]
    fn diff_sections_reports_changes_only() {
        let before = Value::Array(vec![section_json("a", "alpha"), section_json("b", "bravo")]);
        let after = Value::Array(vec![section_json("a", "alpha"), section_json("c", "charlie")]);

        let response = diff_sections(
            "page-1".to_string(),
            before.to_string(),
            after.to_string(),
            false,
        );
        assert!(response.ok, "{}", response.message);
        let diffs = payload(&response);
        assert_eq!(diffs.as_array().map(Vec::len), Some(2));
        assert_eq!(diffs[0]["sectionId"], "c");
        assert_eq!(diffs[0]["changeType"], "added");
        assert_eq!(diffs[1]["changeType"], "removed");
        assert_eq!(diffs[1]["annotations"][0]["code"], "content.removal");
    }

    #[test]
    fn diff_sections_rejects_malformed_input() {
        let response = diff_sections(
            "page-1".to_string(),
            "not json".to_string(),
            "[]".to_string(),
            true,
        );
        assert!(!response.ok);
        assert!(response.message.contains("before"), "{}", response.message);
    }
}
