//! Field schema model.
//!
//! # Responsibility
//! - Carry the declared `type` tag of one editable field.
//! - Preserve every other attribute as opaque JSON.
//!
//! # Invariants
//! - A missing `type` is valid and serializes back as missing.
//! - A non-string `type` decodes and round-trips untouched; it has no declared type.
//! - `attributes` never contains the `type` key.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Declared type for single-line text inputs.
pub const FIELD_TYPE_TEXT: &str = "text";
/// Declared type for rich text editors.
pub const FIELD_TYPE_RICHTEXT: &str = "richtext";
/// Declared type for raw HTML snippets.
pub const FIELD_TYPE_HTML: &str = "html";
/// Declared type for image uploads.
pub const FIELD_TYPE_IMAGE: &str = "image";
/// Legacy alias of `image`.
pub const FIELD_TYPE_MEDIA: &str = "media";
/// Declared type for option pickers.
pub const FIELD_TYPE_SELECT: &str = "select";
/// Declared type for boolean switches.
pub const FIELD_TYPE_TOGGLE: &str = "toggle";

const KNOWN_FIELD_TYPES: &[&str] = &[
    FIELD_TYPE_TEXT,
    FIELD_TYPE_RICHTEXT,
    FIELD_TYPE_HTML,
    FIELD_TYPE_IMAGE,
    FIELD_TYPE_MEDIA,
    FIELD_TYPE_SELECT,
    FIELD_TYPE_TOGGLE,
];

/// Returns declared type strings that schema authors are expected to use.
pub fn known_field_types() -> &'static [&'static str] {
    KNOWN_FIELD_TYPES
}

/// One configurable input unit within a section schema.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldSchema {
    /// Raw `type` value as authored. Usually a string; anything else is kept as-is.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub field_type: Option<Value>,
    /// Label, key, validation and any other attribute, untouched by core.
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

impl FieldSchema {
    /// Creates a field with the given declared type and no attributes.
    pub fn new(field_type: impl Into<String>) -> Self {
        Self {
            field_type: Some(Value::String(field_type.into())),
            attributes: Map::new(),
        }
    }

    /// Creates a field without a declared type.
    pub fn untyped() -> Self {
        Self::default()
    }

    /// Builder-style attribute setter. A `type` key is routed to `field_type`.
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        let key = key.into();
        let value = value.into();
        if key == "type" {
            self.field_type = (!value.is_null()).then_some(value);
        } else {
            self.attributes.insert(key, value);
        }
        self
    }

    /// Returns the declared type tag when it is a string.
    pub fn declared_type(&self) -> Option<&str> {
        self.field_type.as_ref().and_then(Value::as_str)
    }

    /// Returns the raw `type` value, string or not.
    pub fn raw_type(&self) -> Option<&Value> {
        self.field_type.as_ref()
    }

    /// Returns one pass-through attribute.
    pub fn attribute(&self, key: &str) -> Option<&Value> {
        self.attributes.get(key)
    }

    /// Returns the `id` attribute when it is a string.
    pub fn id(&self) -> Option<&str> {
        self.attribute("id").and_then(Value::as_str)
    }

    /// Returns the `label` attribute when it is a string.
    pub fn label(&self) -> Option<&str> {
        self.attribute("label").and_then(Value::as_str)
    }
}
