use cosmogram_core::registry::validator::UNKNOWN_NODE_ID;
use cosmogram_core::{validate_nodes, NodeSchema, Planet};
use serde_json::{json, Value};

fn node(id: &str, arcana: &str, hour: &str) -> Value {
    json!({
        "id": id,
        "title": "The High Priestess",
        "arcanaKey": arcana,
        "lineages": ["kabbalistic", "tarot"],
        "ndSafe": true,
        "correspondences": { "planetaryHour": hour, "element": "Water" },
        "lattice": { "pillar": 3 },
        "geometry": { "layer": "tree", "angle": 45.0, "radiusRatio": 0.75 }
    })
}

#[test]
fn well_formed_registry_is_fully_valid() {
    let schema = NodeSchema::builtin();
    let records = vec![
        node("ARC-002", "high-priestess", "Moon"),
        node("ARC-000", "fool", "Mercury"),
    ];
    let report = validate_nodes(&schema, &records);

    assert!(report.is_fully_valid(), "issues: {:?}", report.issues);
    assert_eq!(report.valid_nodes.len(), 2);
    assert_eq!(report.valid_nodes[0].correspondences.planetary_hour, Planet::Moon);
    assert_eq!(
        report.valid_nodes[1].correspondences.extra.get("element"),
        Some(&json!("Water"))
    );
}

#[test]
fn bad_id_is_rejected_with_a_pattern_issue() {
    let schema = NodeSchema::builtin();
    let report = validate_nodes(&schema, &[node("bad id", "fool", "Sun")]);

    assert!(report.valid_nodes.is_empty());
    let id_issue = report
        .issues
        .iter()
        .find(|issue| issue.field == "id")
        .expect("id issue reported");
    assert_eq!(id_issue.node_id, "bad id");
    assert!(id_issue.message.contains("does not match pattern"));
}

#[test]
fn every_violation_is_collected_per_node() {
    let schema = NodeSchema::builtin();
    let mut broken = node("ARC-005", "hierophant", "Pluto");
    broken["ndSafe"] = json!(false);
    broken["lineages"] = json!(["hermetic", "druidic"]);
    broken["lattice"]["pillar"] = json!(40);

    let report = validate_nodes(&schema, &[broken, node("ARC-001", "magician", "Mercury")]);

    assert_eq!(report.valid_nodes.len(), 1);
    let fields: Vec<&str> = report
        .issues
        .iter()
        .map(|issue| issue.field.as_str())
        .collect();
    assert!(fields.contains(&"ndSafe"));
    assert!(fields.contains(&"lineages"));
    assert!(fields.contains(&"lattice.pillar"));
    assert!(fields.contains(&"correspondences.planetaryHour"));
    assert!(report.issues.iter().all(|issue| issue.node_id == "ARC-005"));
}

#[test]
fn arcana_key_must_match_its_mapped_id() {
    let schema = NodeSchema::builtin();
    let report = validate_nodes(&schema, &[node("ARC-009", "fool", "Saturn")]);
    let issue = report
        .issues
        .iter()
        .find(|issue| issue.field == "arcanaKey")
        .expect("arcana mismatch reported");
    assert!(issue.message.contains("ARC-000"));
}

#[test]
fn missing_id_is_tagged_unknown() {
    let schema = NodeSchema::builtin();
    let mut record = node("ARC-000", "fool", "Sun");
    record
        .as_object_mut()
        .expect("record is an object")
        .remove("id");
    let report = validate_nodes(&schema, &[record]);
    assert!(report
        .issues
        .iter()
        .any(|issue| issue.node_id == UNKNOWN_NODE_ID && issue.field == "id"));
}

#[test]
fn external_schema_can_widen_lineages() {
    let schema = NodeSchema::from_json(&json!({
        "lineages": ["druidic", "hermetic"]
    }))
    .expect("schema parses");
    let mut record = node("ARC-000", "fool", "Sun");
    record["lineages"] = json!(["druidic"]);
    let report = validate_nodes(&schema, &[record]);
    assert!(report.is_fully_valid(), "issues: {:?}", report.issues);
}
