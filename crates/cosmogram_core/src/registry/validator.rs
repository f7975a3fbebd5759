//! Declarative node registry validation.
//!
//! # Responsibility
//! - Evaluate one uniform rule list against every raw registry record.
//! - Split records into typed valid nodes and tagged issues.
//!
//! # Invariants
//! - Never fails: malformed input only produces issues.
//! - `valid_nodes` preserves input order.
//! - A record is valid only when it yields zero issues.

use super::node::NodeRecord;
use super::schema::NodeSchema;
use crate::config::value::lookup;
use crate::planetary::planet::Planet;
use log::{debug, info};
use serde::Serialize;
use serde_json::Value;
use std::fmt::{Display, Formatter};

/// Tag used when a record carries no usable id.
pub const UNKNOWN_NODE_ID: &str = "unknown";

type RuleCheck = fn(&Value, &Value, &NodeSchema) -> Result<(), String>;

/// One `(field, predicate, message)` rule.
///
/// `check` receives the field value, the whole record and the schema; it is
/// only evaluated when the field is present, absence being covered by the
/// required-field pass.
#[derive(Clone, Copy)]
pub struct NodeRule {
    pub field: &'static str,
    check: RuleCheck,
}

/// Semantic rules applied after presence checks, in evaluation order.
pub const NODE_RULES: &[NodeRule] = &[
    NodeRule {
        field: "id",
        check: check_id,
    },
    NodeRule {
        field: "title",
        check: check_title,
    },
    NodeRule {
        field: "lineages",
        check: check_lineages,
    },
    NodeRule {
        field: "ndSafe",
        check: check_nd_safe,
    },
    NodeRule {
        field: "arcanaKey",
        check: check_arcana_key,
    },
    NodeRule {
        field: "correspondences.planetaryHour",
        check: check_planetary_hour,
    },
    NodeRule {
        field: "lattice.pillar",
        check: check_pillar,
    },
    NodeRule {
        field: "lattice.gate",
        check: check_gate,
    },
    NodeRule {
        field: "lattice.intensity",
        check: check_intensity,
    },
    NodeRule {
        field: "geometry.layer",
        check: check_layer,
    },
    NodeRule {
        field: "geometry.angle",
        check: check_angle,
    },
    NodeRule {
        field: "geometry.radiusRatio",
        check: check_radius_ratio,
    },
];

/// One schema violation, tagged by node id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationIssue {
    pub node_id: String,
    pub field: String,
    pub message: String,
}

impl Display for ValidationIssue {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.node_id, self.message)
    }
}

/// Outcome of validating one registry load.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationReport {
    pub valid_nodes: Vec<NodeRecord>,
    pub issues: Vec<ValidationIssue>,
}

impl ValidationReport {
    pub fn is_fully_valid(&self) -> bool {
        self.issues.is_empty()
    }
}

/// Validates raw registry records against `schema`.
pub fn validate_nodes(schema: &NodeSchema, records: &[Value]) -> ValidationReport {
    let required = schema.required_fields();
    let mut report = ValidationReport::default();

    for record in records {
        let node_id = node_tag(record);
        let mut issues = Vec::new();

        for field in &required {
            if lookup(record, field).map_or(true, Value::is_null) {
                issues.push(issue(&node_id, field, format!("missing required field `{field}`")));
            }
        }
        for rule in NODE_RULES {
            let Some(value) = lookup(record, rule.field).filter(|value| !value.is_null()) else {
                continue;
            };
            if let Err(message) = (rule.check)(value, record, schema) {
                issues.push(issue(&node_id, rule.field, message));
            }
        }

        if issues.is_empty() {
            match serde_json::from_value::<NodeRecord>(record.clone()) {
                Ok(node) => {
                    report.valid_nodes.push(node);
                    continue;
                }
                Err(err) => issues.push(issue(
                    &node_id,
                    "record",
                    format!("record shape is invalid: {err}"),
                )),
            }
        }

        debug!(
            "event=node_rejected module=registry node_id={} issue_count={}",
            node_id,
            issues.len()
        );
        report.issues.extend(issues);
    }

    info!(
        "event=registry_validate module=registry status=ok records={} valid={} issues={}",
        records.len(),
        report.valid_nodes.len(),
        report.issues.len()
    );
    report
}

fn issue(node_id: &str, field: &str, message: String) -> ValidationIssue {
    ValidationIssue {
        node_id: node_id.to_string(),
        field: field.to_string(),
        message,
    }
}

fn node_tag(record: &Value) -> String {
    record
        .get("id")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .unwrap_or(UNKNOWN_NODE_ID)
        .to_string()
}

fn check_id(value: &Value, _: &Value, schema: &NodeSchema) -> Result<(), String> {
    let Some(id) = value.as_str() else {
        return Err("id must be a string".to_string());
    };
    if schema.id_pattern.is_match(id) {
        Ok(())
    } else {
        Err(format!(
            "id `{id}` does not match pattern `{}`",
            schema.id_pattern.as_str()
        ))
    }
}

fn check_title(value: &Value, _: &Value, _: &NodeSchema) -> Result<(), String> {
    match value.as_str() {
        Some(title) if !title.trim().is_empty() => Ok(()),
        _ => Err("title must be a non-empty string".to_string()),
    }
}

fn check_lineages(value: &Value, _: &Value, schema: &NodeSchema) -> Result<(), String> {
    let Some(entries) = value.as_array() else {
        return Err("lineages must be a list".to_string());
    };
    if entries.is_empty() {
        return Err("lineages must not be empty".to_string());
    }
    let unknown: Vec<String> = entries
        .iter()
        .filter(|entry| {
            entry
                .as_str()
                .map_or(true, |lineage| !schema.lineages.contains(lineage))
        })
        .map(|entry| entry.as_str().map_or_else(|| entry.to_string(), str::to_string))
        .collect();
    if unknown.is_empty() {
        Ok(())
    } else {
        Err(format!(
            "lineages outside the lineage enumeration: {}",
            unknown.join(", ")
        ))
    }
}

fn check_nd_safe(value: &Value, _: &Value, _: &NodeSchema) -> Result<(), String> {
    if value.as_bool() == Some(true) {
        Ok(())
    } else {
        Err("ndSafe must be true".to_string())
    }
}

fn check_arcana_key(value: &Value, record: &Value, schema: &NodeSchema) -> Result<(), String> {
    let Some(key) = value.as_str() else {
        return Err("arcanaKey must be a string".to_string());
    };
    let Some(mapped) = schema.arcana.get(key) else {
        return Err(format!("arcanaKey `{key}` is not in the arcana table"));
    };
    match record.get("id").and_then(Value::as_str) {
        Some(id) if id == mapped => Ok(()),
        Some(id) => Err(format!(
            "arcanaKey `{key}` maps to `{mapped}`, not `{id}`"
        )),
        // A missing id is already reported by the presence pass.
        None => Ok(()),
    }
}

fn check_planetary_hour(value: &Value, _: &Value, schema: &NodeSchema) -> Result<(), String> {
    let planet = value.as_str().and_then(|name| name.parse::<Planet>().ok());
    match planet {
        Some(planet) if schema.planetary_hours.contains(&planet) => Ok(()),
        _ => Err(format!(
            "correspondences.planetaryHour {value} is not an enumerated planetary hour"
        )),
    }
}

fn check_pillar(value: &Value, _: &Value, _: &NodeSchema) -> Result<(), String> {
    check_integer_range(value, "lattice.pillar", 1, 21)
}

fn check_gate(value: &Value, _: &Value, _: &NodeSchema) -> Result<(), String> {
    check_integer_range(value, "lattice.gate", 1, 99)
}

fn check_layer(value: &Value, _: &Value, _: &NodeSchema) -> Result<(), String> {
    if value.is_string() {
        Ok(())
    } else {
        Err("geometry.layer must be a string".to_string())
    }
}

fn check_angle(value: &Value, _: &Value, _: &NodeSchema) -> Result<(), String> {
    check_finite(value, "geometry.angle")
}

fn check_radius_ratio(value: &Value, _: &Value, _: &NodeSchema) -> Result<(), String> {
    check_finite(value, "geometry.radiusRatio")
}

fn check_integer_range(value: &Value, field: &str, min: i64, max: i64) -> Result<(), String> {
    match value.as_i64() {
        Some(number) if (min..=max).contains(&number) => Ok(()),
        _ => Err(format!("{field} must be an integer in [{min}, {max}]")),
    }
}

fn check_intensity(value: &Value, _: &Value, _: &NodeSchema) -> Result<(), String> {
    match value.as_f64() {
        Some(number) if (0.0..=1.0).contains(&number) => Ok(()),
        _ => Err("lattice.intensity must be a number in [0, 1]".to_string()),
    }
}

fn check_finite(value: &Value, field: &str) -> Result<(), String> {
    match value.as_f64() {
        Some(number) if number.is_finite() => Ok(()),
        _ => Err(format!("{field} must be a finite number")),
    }
}
