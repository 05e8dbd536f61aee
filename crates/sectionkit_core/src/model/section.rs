//! Section schema model.

use crate::model::field::FieldSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Declarative description of one editable page section.
///
/// Only `fields` is interpreted by core. `id`, `title`, `contentType`,
/// `preview`, `defaults` and anything else are kept as pass-through
/// attributes for the rendering layer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SectionSchema {
    /// Ordered field list; order is render order.
    pub fields: Vec<FieldSchema>,
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

impl SectionSchema {
    pub fn new(fields: Vec<FieldSchema>) -> Self {
        Self {
            fields,
            attributes: Map::new(),
        }
    }

    /// Builder-style attribute setter.
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    pub fn id(&self) -> Option<&str> {
        self.attributes.get("id").and_then(Value::as_str)
    }

    pub fn title(&self) -> Option<&str> {
        self.attributes.get("title").and_then(Value::as_str)
    }

    /// Storage content type (`Text|Html|Image|RichText`), when declared.
    pub fn content_type(&self) -> Option<&str> {
        self.attributes.get("contentType").and_then(Value::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::SectionSchema;
    use serde_json::json;

    #[test]
    fn decodes_fields_and_keeps_other_attributes() {
        let schema: SectionSchema = serde_json::from_value(json!({
            "id": "hero_title",
            "title": "Hero Headline",
            "contentType": "Text",
            "preview": { "visualType": "text" },
            "fields": [{ "id": "contentValue", "type": "text", "maxLength": 120 }]
        }))
        .expect("decode section schema");

        assert_eq!(schema.id(), Some("hero_title"));
        assert_eq!(schema.title(), Some("Hero Headline"));
        assert_eq!(schema.content_type(), Some("Text"));
        assert_eq!(schema.fields.len(), 1);
        assert_eq!(schema.fields[0].attribute("maxLength"), Some(&json!(120)));
        assert_eq!(schema.attributes["preview"], json!({ "visualType": "text" }));
    }

    #[test]
    fn rejects_schema_without_fields() {
        let err = serde_json::from_value::<SectionSchema>(json!({ "id": "broken" }))
            .expect_err("fields is required");
        assert!(err.to_string().contains("fields"), "unexpected error: {err}");
    }
}
