//! Node registry schema: built-in fallback plus external documents.
//!
//! # Responsibility
//! - Hold required fields, the id pattern and the fixed enumerations used by
//!   `validator`.
//! - Parse an external schema document, inheriting any absent section from
//!   the built-in schema.
//!
//! # Invariants
//! - `id_pattern` always compiles.
//! - `planetary_hours` only ever contains the seven planet names.

use crate::planetary::planet::{Planet, CHALDEAN_ORDER};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Default id pattern: uppercase prefix, dash, three digits.
pub const DEFAULT_ID_PATTERN: &str = r"^[A-Z0-9]+-[0-9]{3}$";

/// Fields whose validity is checked for every record, whatever the schema
/// document declares.
pub const INTRINSIC_REQUIRED_FIELDS: &[&str] =
    &["id", "lineages", "ndSafe", "arcanaKey", "lattice.pillar"];

const BUILTIN_REQUIRED_FIELDS: &[&str] = &[
    "id",
    "title",
    "arcanaKey",
    "lineages",
    "ndSafe",
    "correspondences.planetaryHour",
    "lattice.pillar",
    "geometry",
];

const BUILTIN_LINEAGES: &[&str] = &[
    "hermetic",
    "kabbalistic",
    "alchemical",
    "enochian",
    "tarot",
    "gnostic",
    "thelemic",
    "angelic",
];

const MAJOR_ARCANA: [&str; 22] = [
    "fool",
    "magician",
    "high-priestess",
    "empress",
    "emperor",
    "hierophant",
    "lovers",
    "chariot",
    "strength",
    "hermit",
    "wheel",
    "justice",
    "hanged-man",
    "death",
    "temperance",
    "devil",
    "tower",
    "star",
    "moon",
    "sun",
    "judgement",
    "world",
];

static BUILTIN_ID_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(DEFAULT_ID_PATTERN).expect("built-in id pattern compiles"));

/// Validation schema for node registries.
#[derive(Debug, Clone)]
pub struct NodeSchema {
    /// Dotted field paths that must be present.
    pub required: Vec<String>,
    pub id_pattern: Regex,
    pub lineages: BTreeSet<String>,
    pub planetary_hours: BTreeSet<Planet>,
    /// Arcana key -> expected node id.
    pub arcana: BTreeMap<String, String>,
}

impl NodeSchema {
    /// Schema used whenever no external schema document resolves.
    pub fn builtin() -> Self {
        Self {
            required: BUILTIN_REQUIRED_FIELDS
                .iter()
                .map(|field| field.to_string())
                .collect(),
            id_pattern: BUILTIN_ID_PATTERN.clone(),
            lineages: BUILTIN_LINEAGES
                .iter()
                .map(|lineage| lineage.to_string())
                .collect(),
            planetary_hours: CHALDEAN_ORDER.iter().copied().collect(),
            arcana: MAJOR_ARCANA
                .iter()
                .enumerate()
                .map(|(index, key)| (key.to_string(), format!("ARC-{index:03}")))
                .collect(),
        }
    }

    /// Parses an external schema document.
    ///
    /// Recognized sections: `required`, `idPattern`, `lineages`,
    /// `planetaryHours`, `arcana`. Absent sections inherit the built-in ones;
    /// present but malformed sections are errors so a resolver can fall
    /// through to its next source.
    pub fn from_json(value: &Value) -> Result<Self, SchemaError> {
        if !value.is_object() {
            return Err(SchemaError::NotAnObject);
        }
        let mut schema = Self::builtin();

        if let Some(section) = value.get("required") {
            schema.required = string_list(section, "required")?;
        }
        if let Some(section) = value.get("idPattern") {
            let pattern = section
                .as_str()
                .ok_or(SchemaError::InvalidSection("idPattern"))?;
            schema.id_pattern = Regex::new(pattern)
                .map_err(|err| SchemaError::InvalidPattern(format!("{pattern}: {err}")))?;
        }
        if let Some(section) = value.get("lineages") {
            let lineages = string_list(section, "lineages")?;
            if lineages.is_empty() {
                return Err(SchemaError::InvalidSection("lineages"));
            }
            schema.lineages = lineages.into_iter().collect();
        }
        if let Some(section) = value.get("planetaryHours") {
            let names = string_list(section, "planetaryHours")?;
            let planets = names
                .iter()
                .map(|name| name.parse::<Planet>())
                .collect::<Result<BTreeSet<_>, _>>()
                .map_err(|_| SchemaError::InvalidSection("planetaryHours"))?;
            if planets.is_empty() {
                return Err(SchemaError::InvalidSection("planetaryHours"));
            }
            schema.planetary_hours = planets;
        }
        if let Some(section) = value.get("arcana") {
            let object = section
                .as_object()
                .ok_or(SchemaError::InvalidSection("arcana"))?;
            schema.arcana = object
                .iter()
                .map(|(key, node_key)| {
                    node_key
                        .as_str()
                        .map(|node_key| (key.clone(), node_key.to_string()))
                        .ok_or(SchemaError::InvalidSection("arcana"))
                })
                .collect::<Result<_, _>>()?;
        }
        Ok(schema)
    }

    /// Schema-declared fields followed by any intrinsic field it omitted.
    pub fn required_fields(&self) -> Vec<String> {
        let mut fields = self.required.clone();
        for field in INTRINSIC_REQUIRED_FIELDS {
            if !fields.iter().any(|existing| existing == field) {
                fields.push(field.to_string());
            }
        }
        fields
    }
}

impl Default for NodeSchema {
    fn default() -> Self {
        Self::builtin()
    }
}

fn string_list(value: &Value, section: &'static str) -> Result<Vec<String>, SchemaError> {
    value
        .as_array()
        .ok_or(SchemaError::InvalidSection(section))?
        .iter()
        .map(|item| {
            item.as_str()
                .map(str::to_string)
                .ok_or(SchemaError::InvalidSection(section))
        })
        .collect()
}

/// External schema document errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    NotAnObject,
    InvalidPattern(String),
    InvalidSection(&'static str),
}

impl Display for SchemaError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotAnObject => write!(f, "schema document must be a JSON object"),
            Self::InvalidPattern(value) => write!(f, "schema id pattern is invalid: {value}"),
            Self::InvalidSection(name) => write!(f, "schema section is malformed: {name}"),
        }
    }
}

impl Error for SchemaError {}

#[cfg(test)]
mod tests {
    use super::{NodeSchema, SchemaError};
    use crate::planetary::planet::Planet;
    use serde_json::json;

    #[test]
    fn builtin_schema_maps_twenty_two_arcana() {
        let schema = NodeSchema::builtin();
        assert_eq!(schema.arcana.len(), 22);
        assert_eq!(schema.arcana.get("fool").map(String::as_str), Some("ARC-000"));
        assert_eq!(schema.arcana.get("world").map(String::as_str), Some("ARC-021"));
        assert_eq!(schema.planetary_hours.len(), 7);
    }

    #[test]
    fn external_schema_inherits_absent_sections() {
        let schema = NodeSchema::from_json(&json!({
            "lineages": ["hermetic"],
            "planetaryHours": ["Sun", "Moon"]
        }))
        .expect("schema parses");
        assert_eq!(schema.lineages.len(), 1);
        assert!(schema.planetary_hours.contains(&Planet::Moon));
        assert!(!schema.planetary_hours.contains(&Planet::Mars));
        assert_eq!(schema.arcana.len(), 22);
    }

    #[test]
    fn rejects_invalid_pattern_and_planet_names() {
        assert!(matches!(
            NodeSchema::from_json(&json!({ "idPattern": "([" })),
            Err(SchemaError::InvalidPattern(_))
        ));
        assert_eq!(
            NodeSchema::from_json(&json!({ "planetaryHours": ["Pluto"] })).unwrap_err(),
            SchemaError::InvalidSection("planetaryHours")
        );
        assert_eq!(
            NodeSchema::from_json(&json!([])).unwrap_err(),
            SchemaError::NotAnObject
        );
    }

    #[test]
    fn required_fields_always_include_intrinsic_fields() {
        let schema = NodeSchema::from_json(&json!({ "required": ["title"] })).expect("schema");
        let fields = schema.required_fields();
        assert_eq!(fields[0], "title");
        assert!(fields.iter().any(|f| f == "ndSafe"));
        assert!(fields.iter().any(|f| f == "lattice.pillar"));
    }
}
