use sectionkit_core::diff::{
    content_hash, create_section_diff, create_snapshot_envelope, diff_snapshot_sets,
    DiffChangeType, DiffOptions, PageSection, SnapshotOptions,
};
use serde_json::json;

fn sections(value: serde_json::Value) -> Vec<PageSection> {
    serde_json::from_value(value).expect("decode page sections")
}

#[test]
fn decodes_camel_case_sections_and_keeps_hash_stable() {
    let decoded = sections(json!([{
        "id": "s1",
        "sectionKey": "hero",
        "contentType": "Image",
        "mediaPath": "/media/hero.png",
        "mediaAltText": "Hero",
        "displayOrder": 2,
        "isLocked": true,
        "updatedAtUtc": "2024-01-01T00:00:00.000Z"
    }]));
    let section = &decoded[0];
    assert_eq!(section.content_value, None);
    assert_eq!(section.media_path.as_deref(), Some("/media/hero.png"));

    let first = create_snapshot_envelope("page", section, SnapshotOptions::default());
    let second = create_snapshot_envelope("page", section, SnapshotOptions::default());
    assert_eq!(first.content_hash, second.content_hash);
    assert_eq!(first.content_hash, content_hash(section));

    let value = serde_json::to_value(&first).expect("serialize snapshot");
    assert_eq!(value["sectionId"], "s1");
    assert_eq!(value["payload"]["sectionKey"], "hero");
}

#[test]
fn snapshot_sets_round_trip_through_json() {
    let before = sections(json!([
        { "id": "a", "sectionKey": "hero", "contentType": "Text", "contentValue": "alpha",
          "displayOrder": 1, "isLocked": false, "updatedAtUtc": "2024-01-01T00:00:00.000Z" }
    ]));
    let after = sections(json!([
        { "id": "a", "sectionKey": "hero", "contentType": "Text", "contentValue": "",
          "mediaAltText": "", "displayOrder": 1, "isLocked": false,
          "updatedAtUtc": "2024-01-01T00:05:00.000Z" }
    ]));
    let snap = |items: &[PageSection]| -> Vec<_> {
        items
            .iter()
            .map(|section| create_snapshot_envelope("page", section, SnapshotOptions::default()))
            .collect()
    };

    let diffs = diff_snapshot_sets(&snap(&before), &snap(&after), DiffOptions::default());
    assert_eq!(diffs.len(), 1);
    assert_eq!(diffs[0].change_type, DiffChangeType::Modified);
    let codes: Vec<_> = diffs[0]
        .annotations
        .iter()
        .map(|annotation| annotation.code.as_str())
        .collect();
    assert_eq!(codes, vec!["media.alt.missing"]);

    let encoded = serde_json::to_string(&diffs).expect("encode diffs");
    let decoded: Vec<sectionkit_core::DiffEnvelope> =
        serde_json::from_str(&encoded).expect("decode diffs");
    assert_eq!(decoded, diffs);
}

#[test]
fn no_snapshots_yield_no_diff() {
    assert!(create_section_diff(None, None, DiffOptions { detect_conflicts: true }).is_none());
}
