//! Section descriptor builder.
//!
//! # Responsibility
//! - Map declared field types onto a closed set of rendering kinds.
//! - Attach an empty option list to `select` fields for later population.
//!
//! # Invariants
//! - `build_section_descriptor(s).fields.len() == s.fields.len()`.
//! - Field order and field data are preserved unchanged.
//! - Only `FieldDescriptor::Select` carries `options`.

use crate::model::field::{
    FieldSchema, FIELD_TYPE_HTML, FIELD_TYPE_IMAGE, FIELD_TYPE_MEDIA, FIELD_TYPE_RICHTEXT,
    FIELD_TYPE_SELECT, FIELD_TYPE_TOGGLE,
};
use crate::model::section::SectionSchema;
use crate::model::sidebar::SidebarCardSchema;
use crate::model::workflow::WorkflowSchema;
use crate::registry::{
    lookup_or_none, SectionSchemaRegistry, SidebarCardRegistry, WorkflowRegistry,
};
use log::debug;
use serde::{Deserialize, Serialize};

/// Rendering kind a field is classified into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Input,
    Richtext,
    Html,
    Image,
    Select,
    Toggle,
}

impl FieldKind {
    /// Classifies a declared type. Missing or unknown types map to `Input`.
    pub fn classify(declared_type: Option<&str>) -> Self {
        match declared_type {
            Some(FIELD_TYPE_RICHTEXT) => Self::Richtext,
            Some(FIELD_TYPE_HTML) => Self::Html,
            Some(FIELD_TYPE_IMAGE) | Some(FIELD_TYPE_MEDIA) => Self::Image,
            Some(FIELD_TYPE_SELECT) => Self::Select,
            Some(FIELD_TYPE_TOGGLE) => Self::Toggle,
            _ => Self::Input,
        }
    }

    /// Stable wire name of this kind.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Input => "input",
            Self::Richtext => "richtext",
            Self::Html => "html",
            Self::Image => "image",
            Self::Select => "select",
            Self::Toggle => "toggle",
        }
    }
}

/// One choice of a `select` field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

/// Render-ready view of one field, tagged by `kind` on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FieldDescriptor {
    Input {
        field: FieldSchema,
    },
    Richtext {
        field: FieldSchema,
    },
    Html {
        field: FieldSchema,
    },
    Image {
        field: FieldSchema,
    },
    Select {
        field: FieldSchema,
        /// Starts empty; filled by whoever owns the option source.
        options: Vec<SelectOption>,
    },
    Toggle {
        field: FieldSchema,
    },
}

impl FieldDescriptor {
    /// Classifies `field` by its declared type.
    pub fn from_field(field: FieldSchema) -> Self {
        match FieldKind::classify(field.declared_type()) {
            FieldKind::Input => Self::Input { field },
            FieldKind::Richtext => Self::Richtext { field },
            FieldKind::Html => Self::Html { field },
            FieldKind::Image => Self::Image { field },
            FieldKind::Select => Self::Select {
                field,
                options: Vec::new(),
            },
            FieldKind::Toggle => Self::Toggle { field },
        }
    }

    pub fn kind(&self) -> FieldKind {
        match self {
            Self::Input { .. } => FieldKind::Input,
            Self::Richtext { .. } => FieldKind::Richtext,
            Self::Html { .. } => FieldKind::Html,
            Self::Image { .. } => FieldKind::Image,
            Self::Select { .. } => FieldKind::Select,
            Self::Toggle { .. } => FieldKind::Toggle,
        }
    }

    /// Returns the original field data.
    pub fn field(&self) -> &FieldSchema {
        match self {
            Self::Input { field }
            | Self::Richtext { field }
            | Self::Html { field }
            | Self::Image { field }
            | Self::Select { field, .. }
            | Self::Toggle { field } => field,
        }
    }

    /// Returns select options; `None` for every non-select kind.
    pub fn options(&self) -> Option<&[SelectOption]> {
        match self {
            Self::Select { options, .. } => Some(options.as_slice()),
            _ => None,
        }
    }

    /// Mutable access for populating select options after the build.
    pub fn options_mut(&mut self) -> Option<&mut Vec<SelectOption>> {
        match self {
            Self::Select { options, .. } => Some(options),
            _ => None,
        }
    }
}

/// Render-ready view of one section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionDescriptor {
    /// Source schema, unmodified.
    pub schema: SectionSchema,
    /// One descriptor per schema field, in schema order.
    pub fields: Vec<FieldDescriptor>,
}

/// Builds a descriptor for `schema`.
///
/// Pure: no validation is performed and unknown types become `input`.
pub fn build_section_descriptor(schema: &SectionSchema) -> SectionDescriptor {
    let fields = schema
        .fields
        .iter()
        .cloned()
        .map(FieldDescriptor::from_field)
        .collect();

    SectionDescriptor {
        schema: schema.clone(),
        fields,
    }
}

/// Looks up `section_key` and builds its descriptor.
///
/// Returns `None` when the key is absent; never fails.
pub fn resolve_section_descriptor(
    registry: &SectionSchemaRegistry,
    section_key: &str,
) -> Option<SectionDescriptor> {
    match lookup_or_none(registry, section_key) {
        Some(schema) => Some(build_section_descriptor(schema)),
        None => {
            debug!("event=section_resolve module=renderer status=miss key={section_key}");
            None
        }
    }
}

/// Returns the sidebar card stored under `card_id`.
pub fn get_sidebar_card<'a>(
    registry: &'a SidebarCardRegistry,
    card_id: &str,
) -> Option<&'a SidebarCardSchema> {
    lookup_or_none(registry, card_id)
}

/// Returns the workflow stored under `workflow_id`.
pub fn get_workflow<'a>(
    registry: &'a WorkflowRegistry,
    workflow_id: &str,
) -> Option<&'a WorkflowSchema> {
    lookup_or_none(registry, workflow_id)
}
