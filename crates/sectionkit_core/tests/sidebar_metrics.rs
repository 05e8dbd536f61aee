use sectionkit_core::metrics::MetricTileView;
use sectionkit_core::model::sidebar::MetricEmphasis;
use sectionkit_core::{
    build_sidebar_card_view, get_sidebar_card, CapabilitySet, Catalog, MetricContext,
    MetricRegistry, MetricResolver, MetricResult,
};
use serde_json::{json, Map, Value};
use std::sync::Arc;

struct LastPublished;

impl MetricResolver for LastPublished {
    fn id(&self) -> &str {
        "lastPublishedAtUtc"
    }

    fn title(&self) -> &str {
        "Last publish"
    }

    fn resolve(&self, context: &MetricContext) -> Option<MetricResult> {
        let raw = context.data_value("lastPublishedAtUtc").cloned();
        Some(MetricResult::new("", raw.unwrap_or(Value::Null)))
    }

    fn format(&self, mut result: MetricResult, _context: &MetricContext) -> MetricResult {
        if result.value.is_null() {
            result.formatted = Some("Not yet published".to_string());
        }
        result
    }
}

fn raw_values() -> Map<String, Value> {
    let value = json!({ "draftCount": 1200, "accessibilityScore": 0.87 });
    value.as_object().cloned().expect("object literal")
}

#[test]
fn publishing_card_view_formats_raw_and_resolved_values() {
    let catalog = Catalog::builtin().expect("builtin catalog");
    let card = get_sidebar_card(&catalog.sidebar_cards, "publishing_overview").expect("card");

    let mut registry = MetricRegistry::new();
    registry
        .register(Arc::new(LastPublished))
        .expect("register metric");
    let context = MetricContext {
        source: Some("dashboard".to_string()),
        data: raw_values(),
        ..MetricContext::default()
    };
    let resolved = registry.resolve_many(
        &card.dynamic_value_fields(),
        &context,
        &CapabilitySet::new(),
    );

    let view = build_sidebar_card_view(card, &context.data, &resolved);
    assert_eq!(view.title, "Publishing Overview");
    assert_eq!(
        view.metrics,
        vec![
            MetricTileView {
                id: "draft-count".to_string(),
                label: "Draft sections".to_string(),
                display_value: "1,200".to_string(),
                description: Some("Blocks updated since last publish.".to_string()),
                icon: Some("fa-solid fa-pen-to-square".to_string()),
                emphasis: MetricEmphasis::Warning,
            },
            MetricTileView {
                id: "last-published".to_string(),
                label: "Last publish".to_string(),
                display_value: "Not yet published".to_string(),
                description: Some("Most recent publish timestamp.".to_string()),
                icon: Some("fa-solid fa-rocket".to_string()),
                emphasis: MetricEmphasis::Default,
            },
        ]
    );
}

#[test]
fn quality_card_uses_percentage_and_placeholder() {
    let catalog = Catalog::builtin().expect("builtin catalog");
    let card = get_sidebar_card(&catalog.sidebar_cards, "quality_checks").expect("card");

    let view = build_sidebar_card_view(card, &raw_values(), &Default::default());
    let displays: Vec<&str> = view
        .metrics
        .iter()
        .map(|metric| metric.display_value.as_str())
        .collect();
    assert_eq!(displays, vec!["87%", "--"]);
}

#[test]
fn capability_gate_falls_back_to_raw_formatting() {
    struct GatedDraftCount {
        capabilities: Vec<String>,
    }

    impl MetricResolver for GatedDraftCount {
        fn id(&self) -> &str {
            "draftCount"
        }

        fn title(&self) -> &str {
            "Draft sections"
        }

        fn required_capabilities(&self) -> &[String] {
            &self.capabilities
        }

        fn resolve(&self, _context: &MetricContext) -> Option<MetricResult> {
            let mut result = MetricResult::new("draftCount", 1);
            result.formatted = Some("one".to_string());
            Some(result)
        }
    }

    let catalog = Catalog::builtin().expect("builtin catalog");
    let card = get_sidebar_card(&catalog.sidebar_cards, "publishing_overview").expect("card");

    let mut registry = MetricRegistry::new();
    registry
        .register(Arc::new(GatedDraftCount {
            capabilities: vec!["dashboard.metrics.draftCount".to_string()],
        }))
        .expect("register metric");

    let mut capabilities = CapabilitySet::new();
    capabilities.disable("*");
    let context = MetricContext {
        data: raw_values(),
        ..MetricContext::default()
    };
    let resolved = registry.resolve_many(&["draftCount"], &context, &capabilities);
    assert!(resolved.is_empty());

    let view = build_sidebar_card_view(card, &context.data, &resolved);
    assert_eq!(view.metrics[0].display_value, "1,200");

    capabilities.enable("dashboard.metrics.draftcount");
    let resolved = registry.resolve_many(&["draftCount"], &context, &capabilities);
    let view = build_sidebar_card_view(card, &context.data, &resolved);
    assert_eq!(view.metrics[0].display_value, "one");
}
