//! Sidebar card schema model.
//!
//! # Responsibility
//! - Describe dashboard sidebar cards: headline metrics and quick actions.
//!
//! # Invariants
//! - Empty `metrics`/`actions` lists are omitted on the wire.

use serde::{Deserialize, Serialize};

/// How a metric value is obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricCompute {
    /// Value is fixed by the schema author.
    Static,
    /// Value is read from runtime data via `value_field`.
    Dynamic,
}

/// Display formatter for one sidebar metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricFormatter {
    Number,
    Percentage,
    Datetime,
    String,
}

/// Visual emphasis for one sidebar metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricEmphasis {
    #[default]
    Default,
    Positive,
    Warning,
}

/// Button intent for one action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionIntent {
    Primary,
    Secondary,
    Danger,
}

/// Surface an action opens or triggers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionTarget {
    Modal,
    Drawer,
    Link,
    Command,
}

/// One metric tile on a sidebar card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SidebarMetricSchema {
    pub id: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    pub compute: MetricCompute,
    /// Key into runtime metric data for `dynamic` metrics.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_field: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub formatter: Option<MetricFormatter>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emphasis: Option<MetricEmphasis>,
}

/// One action button; shared by sidebar cards and workflow steps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SidebarActionSchema {
    pub id: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intent: Option<ActionIntent>,
    pub target: ActionTarget,
    /// Command id dispatched when `target == command`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
}

/// Dashboard sidebar card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SidebarCardSchema {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub metrics: Vec<SidebarMetricSchema>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub actions: Vec<SidebarActionSchema>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub footer_hint: Option<String>,
}

impl SidebarCardSchema {
    /// Returns `value_field` keys of dynamic metrics, in card order.
    pub fn dynamic_value_fields(&self) -> Vec<&str> {
        self.metrics
            .iter()
            .filter(|metric| metric.compute == MetricCompute::Dynamic)
            .filter_map(|metric| metric.value_field.as_deref())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::{ActionTarget, MetricFormatter, SidebarCardSchema};
    use serde_json::json;

    #[test]
    fn decodes_camel_case_card() {
        let card: SidebarCardSchema = serde_json::from_value(json!({
            "id": "publishing_overview",
            "title": "Publishing Overview",
            "metrics": [{
                "id": "draft-count",
                "label": "Draft sections",
                "compute": "dynamic",
                "valueField": "draftCount",
                "formatter": "number",
                "emphasis": "warning"
            }],
            "actions": [{
                "id": "open-publish-dialog",
                "label": "Publish updates",
                "intent": "primary",
                "target": "command",
                "command": "canvas.publish"
            }],
            "footerHint": "Publishing requires review of all draft sections."
        }))
        .expect("decode card");

        assert_eq!(card.metrics[0].formatter, Some(MetricFormatter::Number));
        assert_eq!(card.actions[0].target, ActionTarget::Command);
        assert_eq!(card.dynamic_value_fields(), vec!["draftCount"]);
        assert!(card.footer_hint.is_some());
    }

    #[test]
    fn omits_empty_lists_on_the_wire() {
        let card = SidebarCardSchema {
            id: "empty".to_string(),
            title: "Empty".to_string(),
            description: None,
            metrics: vec![],
            actions: vec![],
            footer_hint: None,
        };
        let value = serde_json::to_value(&card).expect("serialize card");
        assert_eq!(value, json!({ "id": "empty", "title": "Empty" }));
    }
}
