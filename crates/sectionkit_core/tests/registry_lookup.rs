use sectionkit_core::{
    build_section_descriptor, get_sidebar_card, get_workflow, lookup_or_none,
    resolve_section_descriptor, FieldSchema, Registry, SectionSchema, SectionSchemaRegistry,
    SidebarCardRegistry, WorkflowRegistry,
};
use serde_json::json;

fn section_registry() -> SectionSchemaRegistry {
    let mut registry = SectionSchemaRegistry::new();
    registry
        .insert(
            "booking_cta",
            SectionSchema::new(vec![
                FieldSchema::new("text").with_attribute("id", "contentValue"),
                FieldSchema::new("toggle").with_attribute("id", "visible"),
            ]),
        )
        .expect("insert section");
    registry
}

#[test]
fn resolve_returns_none_for_missing_key() {
    assert!(resolve_section_descriptor(&section_registry(), "hero_title").is_none());
    assert!(resolve_section_descriptor(&SectionSchemaRegistry::new(), "").is_none());
}

#[test]
fn resolve_matches_direct_build_for_present_key() {
    let registry = section_registry();
    let resolved =
        resolve_section_descriptor(&registry, "booking_cta").expect("section should resolve");
    let schema = registry.get("booking_cta").expect("stored schema");
    assert_eq!(resolved, build_section_descriptor(schema));
}

#[test]
fn sidebar_card_and_workflow_lookups_miss_on_empty_registries() {
    assert!(get_sidebar_card(&SidebarCardRegistry::new(), "x").is_none());
    assert!(get_workflow(&WorkflowRegistry::new(), "x").is_none());
}

#[test]
fn sidebar_card_lookup_returns_stored_value_unchanged() {
    let registry: SidebarCardRegistry = serde_json::from_value(json!({
        "quick_actions": {
            "id": "quick_actions",
            "title": "Quick Actions",
            "actions": [{
                "id": "open-history",
                "label": "View history",
                "target": "drawer",
                "command": "dashboard.openHistory"
            }]
        }
    }))
    .expect("decode cards");

    let card = get_sidebar_card(&registry, "quick_actions").expect("card exists");
    assert!(std::ptr::eq(card, registry.get("quick_actions").expect("stored")));
    assert_eq!(card.actions.len(), 1);
}

#[test]
fn workflow_lookup_returns_stored_value() {
    let registry: WorkflowRegistry = serde_json::from_value(json!({
        "default_content_flow": {
            "id": "default_content_flow",
            "title": "Content Workflow",
            "defaultStepId": "draft",
            "steps": [{ "id": "draft", "label": "Draft", "status": "draft" }]
        }
    }))
    .expect("decode workflows");

    let workflow = get_workflow(&registry, "default_content_flow").expect("workflow exists");
    assert_eq!(workflow.title, "Content Workflow");
    assert!(get_workflow(&registry, "Default_Content_Flow").is_none());
}

#[test]
fn generic_lookup_works_for_any_value_type() {
    let mut registry = Registry::new();
    registry.insert("answer", 42_u32).expect("insert");
    assert_eq!(lookup_or_none(&registry, "answer"), Some(&42));
    assert_eq!(lookup_or_none(&registry, "question"), None);
}
