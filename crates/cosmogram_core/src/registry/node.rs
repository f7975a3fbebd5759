//! Typed node registry records.
//!
//! Records only reach this shape after `validator::validate_nodes` accepted
//! them; raw registry entries stay `serde_json::Value` until then.

use crate::planetary::planet::Planet;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};

/// One validated symbolic node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeRecord {
    /// `<PREFIX>-<3 digits>`, e.g. `ARC-007`.
    pub id: String,
    pub title: String,
    pub arcana_key: String,
    pub lineages: BTreeSet<String>,
    /// Always `true` for validated records.
    pub nd_safe: bool,
    pub correspondences: Correspondences,
    pub lattice: LatticePlacement,
    pub geometry: NodeGeometry,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Correspondences {
    pub planetary_hour: Planet,
    /// Remaining correspondence fields, kept verbatim.
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LatticePlacement {
    /// In `1..=21`.
    pub pillar: u8,
    /// In `1..=99` when present.
    #[serde(default)]
    pub gate: Option<u8>,
    /// In `[0, 1]` when present.
    #[serde(default)]
    pub intensity: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeGeometry {
    #[serde(default)]
    pub layer: Option<String>,
    /// Degrees, clockwise from twelve o'clock.
    pub angle: f64,
    /// Fraction of the overlay radius; clamped into `[0, 1]` when drawn.
    pub radius_ratio: f64,
}
