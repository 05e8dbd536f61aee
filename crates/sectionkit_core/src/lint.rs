//! Schema lint: surfaces authoring mistakes the permissive builder masks.
//!
//! # Responsibility
//! - Report missing/unknown field types, missing and duplicate field ids.
//! - Report dangling default steps and duplicate step ids in workflows.
//! - Report registry keys outside the lowercase catalog convention.
//!
//! # Invariants
//! - Lint never changes descriptor output; it only reports.
//! - Warning order is deterministic (registry key order, then field order).

use crate::catalog::Catalog;
use crate::model::field::known_field_types;
use crate::model::section::SectionSchema;
use crate::model::workflow::WorkflowSchema;
use crate::registry::is_canonical_registry_key;
use log::warn;
use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt::{Display, Formatter};

/// Stable warning classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningCode {
    MissingType,
    UnknownType,
    MissingFieldId,
    DuplicateFieldId,
    UnknownDefaultStep,
    DuplicateStepId,
    NonCanonicalKey,
}

impl WarningCode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::MissingType => "missing_type",
            Self::UnknownType => "unknown_type",
            Self::MissingFieldId => "missing_field_id",
            Self::DuplicateFieldId => "duplicate_field_id",
            Self::UnknownDefaultStep => "unknown_default_step",
            Self::DuplicateStepId => "duplicate_step_id",
            Self::NonCanonicalKey => "non_canonical_key",
        }
    }
}

/// One lint finding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SchemaWarning {
    pub code: WarningCode,
    /// Registry key of the offending schema.
    pub registry_key: String,
    /// Field index (sections) or step id (workflows), when applicable.
    pub field: Option<String>,
    pub message: String,
}

impl SchemaWarning {
    fn new(
        code: WarningCode,
        registry_key: &str,
        field: Option<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            code,
            registry_key: registry_key.to_string(),
            field,
            message: message.into(),
        }
    }
}

impl Display for SchemaWarning {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match &self.field {
            Some(field) => write!(
                f,
                "[{}] {} ({}): {}",
                self.code.as_str(),
                self.registry_key,
                field,
                self.message
            ),
            None => write!(
                f,
                "[{}] {}: {}",
                self.code.as_str(),
                self.registry_key,
                self.message
            ),
        }
    }
}

/// Lints one section schema stored under `registry_key`.
pub fn lint_section_schema(registry_key: &str, schema: &SectionSchema) -> Vec<SchemaWarning> {
    let mut warnings = Vec::new();
    let mut seen_ids = BTreeSet::<&str>::new();

    for (index, field) in schema.fields.iter().enumerate() {
        let locator = Some(match field.id() {
            Some(id) => format!("#{index} `{id}`"),
            None => format!("#{index}"),
        });

        match (field.raw_type(), field.declared_type()) {
            (None, _) => warnings.push(SchemaWarning::new(
                WarningCode::MissingType,
                registry_key,
                locator.clone(),
                "field has no `type`; it will render as `input`",
            )),
            (Some(raw), None) => warnings.push(SchemaWarning::new(
                WarningCode::UnknownType,
                registry_key,
                locator.clone(),
                format!("field type {raw} is not a string; it will render as `input`"),
            )),
            (Some(_), Some(declared)) if !known_field_types().contains(&declared) => {
                warnings.push(SchemaWarning::new(
                    WarningCode::UnknownType,
                    registry_key,
                    locator.clone(),
                    format!("field type `{declared}` is not recognized; it will render as `input`"),
                ))
            }
            (Some(_), Some(_)) => {}
        }

        match field.id() {
            None => warnings.push(SchemaWarning::new(
                WarningCode::MissingFieldId,
                registry_key,
                locator,
                "field has no string `id`",
            )),
            Some(id) => {
                if !seen_ids.insert(id) {
                    warnings.push(SchemaWarning::new(
                        WarningCode::DuplicateFieldId,
                        registry_key,
                        locator,
                        format!("field id `{id}` appears more than once"),
                    ));
                }
            }
        }
    }

    warnings
}

/// Lints one workflow stored under `registry_key`.
pub fn lint_workflow(registry_key: &str, workflow: &WorkflowSchema) -> Vec<SchemaWarning> {
    let mut warnings = Vec::new();
    let mut seen_ids = BTreeSet::<&str>::new();

    for step in &workflow.steps {
        if !seen_ids.insert(step.id.as_str()) {
            warnings.push(SchemaWarning::new(
                WarningCode::DuplicateStepId,
                registry_key,
                Some(step.id.clone()),
                format!("step id `{}` appears more than once", step.id),
            ));
        }
    }

    if workflow.default_step().is_none() {
        warnings.push(SchemaWarning::new(
            WarningCode::UnknownDefaultStep,
            registry_key,
            None,
            format!(
                "defaultStepId `{}` does not name any step",
                workflow.default_step_id
            ),
        ));
    }

    warnings
}

/// Reports `registry_key` when it is outside the lowercase catalog convention.
pub fn lint_registry_key(registry_key: &str) -> Option<SchemaWarning> {
    if is_canonical_registry_key(registry_key) {
        return None;
    }
    Some(SchemaWarning::new(
        WarningCode::NonCanonicalKey,
        registry_key,
        None,
        "registry key is not a lowercase identifier (`[a-z0-9][a-z0-9_.-]*`)",
    ))
}

/// Lints every registry key, section and workflow in `catalog`.
///
/// Each finding is also emitted as a `warn` log line.
pub fn lint_catalog(catalog: &Catalog) -> Vec<SchemaWarning> {
    let mut warnings = Vec::new();
    for (key, schema) in catalog.sections.iter() {
        warnings.extend(lint_registry_key(key));
        warnings.extend(lint_section_schema(key, schema));
    }
    for key in catalog.sidebar_cards.keys() {
        warnings.extend(lint_registry_key(key));
    }
    for (key, workflow) in catalog.workflows.iter() {
        warnings.extend(lint_registry_key(key));
        warnings.extend(lint_workflow(key, workflow));
    }

    for warning in &warnings {
        warn!(
            "event=schema_lint module=lint status=warning code={} key={}",
            warning.code.as_str(),
            warning.registry_key
        );
    }
    warnings
}

#[cfg(test)]
mod tests {
    use super::{lint_registry_key, lint_section_schema, lint_workflow, WarningCode};
    use crate::model::field::FieldSchema;
    use crate::model::section::SectionSchema;
    use crate::model::workflow::{WorkflowSchema, WorkflowStatus, WorkflowStepSchema};

    fn step(id: &str) -> WorkflowStepSchema {
        WorkflowStepSchema {
            id: id.to_string(),
            label: id.to_string(),
            description: None,
            icon: None,
            status: WorkflowStatus::Draft,
            blockers: vec![],
            actions: vec![],
        }
    }

    #[test]
    fn clean_section_has_no_warnings() {
        let schema = SectionSchema::new(vec![
            FieldSchema::new("text").with_attribute("id", "contentValue"),
            FieldSchema::new("media").with_attribute("id", "image"),
        ]);
        assert!(lint_section_schema("hero_title", &schema).is_empty());
    }

    #[test]
    fn reports_unknown_and_missing_types() {
        let schema = SectionSchema::new(vec![
            FieldSchema::new("txet").with_attribute("id", "a"),
            FieldSchema::untyped().with_attribute("id", "b"),
        ]);
        let codes: Vec<_> = lint_section_schema("hero", &schema)
            .into_iter()
            .map(|warning| warning.code)
            .collect();
        assert_eq!(codes, vec![WarningCode::UnknownType, WarningCode::MissingType]);
    }

    #[test]
    fn non_string_type_is_reported_as_unknown() {
        let schema: SectionSchema = serde_json::from_value(serde_json::json!({
            "fields": [{ "id": "n", "type": 5 }, { "id": "flag", "type": true }]
        }))
        .expect("decode section");
        let warnings = lint_section_schema("promo", &schema);
        assert_eq!(warnings.len(), 2);
        assert!(warnings
            .iter()
            .all(|warning| warning.code == WarningCode::UnknownType));
        assert!(warnings[0].message.contains("5"), "{}", warnings[0].message);
    }

    #[test]
    fn reports_non_canonical_registry_keys() {
        assert!(lint_registry_key("hero_title").is_none());
        let warning = lint_registry_key("heroTitle").expect("camelCase key is flagged");
        assert_eq!(warning.code, WarningCode::NonCanonicalKey);
        assert!(warning.to_string().starts_with("[non_canonical_key] heroTitle:"));
    }

    #[test]
    fn reports_missing_and_duplicate_ids() {
        let schema = SectionSchema::new(vec![
            FieldSchema::new("text").with_attribute("id", "dup"),
            FieldSchema::new("text").with_attribute("id", "dup"),
            FieldSchema::new("text"),
        ]);
        let warnings = lint_section_schema("hero", &schema);
        assert_eq!(warnings.len(), 2);
        assert_eq!(warnings[0].code, WarningCode::DuplicateFieldId);
        assert_eq!(warnings[0].field.as_deref(), Some("#1 `dup`"));
        assert_eq!(warnings[1].code, WarningCode::MissingFieldId);
        assert!(warnings[1].to_string().starts_with("[missing_field_id] hero (#2)"));
    }

    #[test]
    fn reports_workflow_structure_problems() {
        let workflow = WorkflowSchema {
            id: "flow".to_string(),
            title: "Flow".to_string(),
            steps: vec![step("draft"), step("draft")],
            default_step_id: "publish".to_string(),
        };
        let codes: Vec<_> = lint_workflow("flow", &workflow)
            .into_iter()
            .map(|warning| warning.code)
            .collect();
        assert_eq!(
            codes,
            vec![WarningCode::DuplicateStepId, WarningCode::UnknownDefaultStep]
        );
    }
}
