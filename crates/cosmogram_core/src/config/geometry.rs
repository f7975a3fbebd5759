//! Per-layer geometry configuration.
//!
//! # Responsibility
//! - Derive default layer geometry from `NumerologyConstants`.
//! - Merge optional per-layer overrides using positive-or-default rules.
//!
//! # Invariants
//! - Counts are positive integers; sampled curves carry at least two points.
//! - The vesica grid never holds more than `MAX_LAYOUT_COUNT` pairs.
//! - Divisors are finite and positive; alpha fields lie in `[0, 1]`.
//! - Every tree path references ids present in the effective node set.
//! - The config is immutable once built for a render call.

use super::numerology::NumerologyConstants;
use super::value::{count_or, positive_or, unit_or, MAX_LAYOUT_COUNT};
use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeSet;
use std::f64::consts::PI;

/// Number of points of the lattice star.
pub const LATTICE_POINTS: usize = 8;

const SEPHIROT: [(&str, &str, f64, f64); 10] = [
    ("kether", "Kether", 0.0, 0.5),
    ("chokmah", "Chokmah", 1.0, 0.75),
    ("binah", "Binah", 1.0, 0.25),
    ("chesed", "Chesed", 2.0, 0.75),
    ("geburah", "Geburah", 2.0, 0.25),
    ("tiphareth", "Tiphareth", 3.0, 0.5),
    ("netzach", "Netzach", 4.0, 0.75),
    ("hod", "Hod", 4.0, 0.25),
    ("yesod", "Yesod", 5.0, 0.5),
    ("malkuth", "Malkuth", 6.0, 0.5),
];

const PATHS: [(&str, &str); 22] = [
    ("kether", "chokmah"),
    ("kether", "binah"),
    ("kether", "tiphareth"),
    ("chokmah", "binah"),
    ("chokmah", "chesed"),
    ("chokmah", "tiphareth"),
    ("binah", "geburah"),
    ("binah", "tiphareth"),
    ("chesed", "geburah"),
    ("chesed", "tiphareth"),
    ("chesed", "netzach"),
    ("geburah", "tiphareth"),
    ("geburah", "hod"),
    ("tiphareth", "netzach"),
    ("tiphareth", "hod"),
    ("tiphareth", "yesod"),
    ("netzach", "hod"),
    ("netzach", "yesod"),
    ("netzach", "malkuth"),
    ("hod", "yesod"),
    ("hod", "malkuth"),
    ("yesod", "malkuth"),
];

/// One Tree-of-Life node descriptor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SephiraNode {
    pub id: String,
    pub label: String,
    /// Vertical rank, 0 at the top.
    pub level: f64,
    /// Horizontal position inside the margin, in `[0, 1]`.
    pub x_factor: f64,
}

/// Undirected connection between two node ids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreePath {
    pub from: String,
    pub to: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VesicaGeometry {
    pub rows: usize,
    pub columns: usize,
    /// Shared margin for every layer: `min(width, height) / padding_divisor`.
    pub padding_divisor: f64,
    /// Circle radius is `grid step / radius_divisor`.
    pub radius_divisor: f64,
    pub alpha: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TreeGeometry {
    pub nodes: Vec<SephiraNode>,
    pub paths: Vec<TreePath>,
    pub node_radius_divisor: f64,
    pub path_alpha: f64,
    pub node_alpha: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FibonacciGeometry {
    /// Upper bound of the Fibonacci sequence; its last term is the sample count.
    pub sample_bound: usize,
    pub turns: f64,
    pub marker_interval: usize,
    pub radius_divisor: f64,
    pub alpha: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HelixGeometry {
    pub lattice_radius_divisor: f64,
    /// Points per strand.
    pub sample_count: usize,
    /// Never larger than `sample_count`.
    pub cross_tie_count: usize,
    pub wave_turns: f64,
    pub amplitude_divisor: f64,
    /// Phase shift of the second strand, in radians.
    pub phase_offset: f64,
    pub alpha: f64,
}

/// Complete geometry for one render call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeometryConfig {
    pub vesica: VesicaGeometry,
    pub tree: TreeGeometry,
    pub fibonacci: FibonacciGeometry,
    pub helix: HelixGeometry,
}

impl GeometryConfig {
    /// Default geometry derived from `constants`.
    pub fn defaults(constants: &NumerologyConstants) -> Self {
        let c = constants;
        Self {
            vesica: VesicaGeometry {
                rows: count_from(c.seven),
                columns: grid_columns(count_from(c.seven), count_from(c.eleven)),
                padding_divisor: c.eleven,
                radius_divisor: c.three,
                alpha: (c.three / c.eleven).clamp(0.0, 1.0),
            },
            tree: TreeGeometry {
                nodes: default_nodes(),
                paths: default_paths(),
                node_radius_divisor: c.thirty_three,
                path_alpha: (c.seven / c.nine).clamp(0.0, 1.0),
                node_alpha: (c.nine / c.eleven).clamp(0.0, 1.0),
            },
            fibonacci: FibonacciGeometry {
                sample_bound: count_from(c.one_forty_four).max(2),
                turns: c.three,
                marker_interval: count_from(c.eleven),
                radius_divisor: c.three,
                alpha: (c.seven / c.nine).clamp(0.0, 1.0),
            },
            helix: HelixGeometry {
                lattice_radius_divisor: c.three,
                sample_count: count_from(c.ninety_nine).max(2),
                cross_tie_count: count_from(c.twenty_two).min(count_from(c.ninety_nine).max(2)),
                wave_turns: c.three,
                amplitude_divisor: c.eleven,
                phase_offset: PI,
                alpha: (c.seven / c.nine).clamp(0.0, 1.0),
            },
        }
    }
}

/// Builds the complete geometry from constants plus optional overrides.
///
/// `overrides` may hold `vesica`, `tree`, `fibonacci` and `helix` objects
/// with camelCase field names; anything else is ignored.
pub fn normalize_geometry(constants: &NumerologyConstants, overrides: &Value) -> GeometryConfig {
    let defaults = GeometryConfig::defaults(constants);
    let empty = Value::Null;
    let section = |name: &str| overrides.get(name).unwrap_or(&empty);

    let vesica = {
        let o = section("vesica");
        let d = &defaults.vesica;
        let rows = count_or(o.get("rows"), d.rows, 1);
        VesicaGeometry {
            rows,
            columns: grid_columns(rows, count_or(o.get("columns"), d.columns, 1)),
            padding_divisor: positive_or(o.get("paddingDivisor"), d.padding_divisor),
            radius_divisor: positive_or(o.get("radiusDivisor"), d.radius_divisor),
            alpha: unit_or(o.get("alpha"), d.alpha),
        }
    };

    let tree = {
        let o = section("tree");
        let d = &defaults.tree;
        let nodes = replacement_nodes(o.get("nodes")).unwrap_or_else(|| d.nodes.clone());
        let candidate_paths =
            replacement_paths(o.get("paths")).unwrap_or_else(|| d.paths.clone());
        TreeGeometry {
            paths: retain_known_paths(&nodes, candidate_paths),
            nodes,
            node_radius_divisor: positive_or(o.get("nodeRadiusDivisor"), d.node_radius_divisor),
            path_alpha: unit_or(o.get("pathAlpha"), d.path_alpha),
            node_alpha: unit_or(o.get("nodeAlpha"), d.node_alpha),
        }
    };

    let fibonacci = {
        let o = section("fibonacci");
        let d = &defaults.fibonacci;
        FibonacciGeometry {
            sample_bound: count_or(o.get("sampleBound"), d.sample_bound, 2),
            turns: positive_or(o.get("turns"), d.turns),
            marker_interval: count_or(o.get("markerInterval"), d.marker_interval, 1),
            radius_divisor: positive_or(o.get("radiusDivisor"), d.radius_divisor),
            alpha: unit_or(o.get("alpha"), d.alpha),
        }
    };

    let helix = {
        let o = section("helix");
        let d = &defaults.helix;
        let sample_count = count_or(o.get("sampleCount"), d.sample_count, 2);
        let cross_tie_count = count_or(o.get("crossTieCount"), d.cross_tie_count, 1);
        HelixGeometry {
            lattice_radius_divisor: positive_or(
                o.get("latticeRadiusDivisor"),
                d.lattice_radius_divisor,
            ),
            sample_count,
            cross_tie_count: cross_tie_count.min(sample_count),
            wave_turns: positive_or(o.get("waveTurns"), d.wave_turns),
            amplitude_divisor: positive_or(o.get("amplitudeDivisor"), d.amplitude_divisor),
            phase_offset: positive_or(o.get("phaseOffset"), d.phase_offset),
            alpha: unit_or(o.get("alpha"), d.alpha),
        }
    };

    GeometryConfig {
        vesica,
        tree,
        fibonacci,
        helix,
    }
}

fn count_from(value: f64) -> usize {
    value.floor().clamp(1.0, MAX_LAYOUT_COUNT as f64) as usize
}

/// Narrows `columns` so the vesica grid holds at most `MAX_LAYOUT_COUNT` pairs.
fn grid_columns(rows: usize, columns: usize) -> usize {
    columns.min(MAX_LAYOUT_COUNT / rows.max(1)).max(1)
}

fn default_nodes() -> Vec<SephiraNode> {
    SEPHIROT
        .iter()
        .map(|(id, label, level, x_factor)| SephiraNode {
            id: (*id).to_string(),
            label: (*label).to_string(),
            level: *level,
            x_factor: *x_factor,
        })
        .collect()
}

fn default_paths() -> Vec<TreePath> {
    PATHS
        .iter()
        .map(|(from, to)| TreePath {
            from: (*from).to_string(),
            to: (*to).to_string(),
        })
        .collect()
}

/// Parses a non-empty replacement node list; malformed entries are skipped.
fn replacement_nodes(value: Option<&Value>) -> Option<Vec<SephiraNode>> {
    let entries = value?.as_array()?;
    let mut seen = BTreeSet::new();
    let nodes: Vec<SephiraNode> = entries
        .iter()
        .filter_map(|entry| {
            let id = entry.get("id")?.as_str()?.trim();
            let level = entry.get("level")?.as_f64()?;
            if id.is_empty() || !level.is_finite() || level < 0.0 {
                return None;
            }
            if !seen.insert(id.to_string()) {
                return None;
            }
            let label = entry
                .get("label")
                .and_then(Value::as_str)
                .unwrap_or(id)
                .to_string();
            Some(SephiraNode {
                id: id.to_string(),
                label,
                level,
                x_factor: unit_or(entry.get("xFactor"), 0.5),
            })
        })
        .collect();
    (!nodes.is_empty()).then_some(nodes)
}

fn replacement_paths(value: Option<&Value>) -> Option<Vec<TreePath>> {
    let entries = value?.as_array()?;
    let paths: Vec<TreePath> = entries
        .iter()
        .filter_map(|entry| {
            Some(TreePath {
                from: entry.get("from")?.as_str()?.trim().to_string(),
                to: entry.get("to")?.as_str()?.trim().to_string(),
            })
        })
        .collect();
    (!paths.is_empty()).then_some(paths)
}

fn retain_known_paths(nodes: &[SephiraNode], paths: Vec<TreePath>) -> Vec<TreePath> {
    let ids: BTreeSet<&str> = nodes.iter().map(|node| node.id.as_str()).collect();
    paths
        .into_iter()
        .filter(|path| {
            let known = ids.contains(path.from.as_str()) && ids.contains(path.to.as_str());
            if !known {
                debug!(
                    "event=tree_path_dropped module=config from={} to={}",
                    path.from, path.to
                );
            }
            known
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{normalize_geometry, GeometryConfig, MAX_LAYOUT_COUNT};
    use crate::config::numerology::NumerologyConstants;
    use serde_json::json;

    #[test]
    fn defaults_follow_numerology_constants() {
        let config = GeometryConfig::defaults(&NumerologyConstants::default());
        assert_eq!(config.vesica.rows, 7);
        assert_eq!(config.vesica.columns, 11);
        assert_eq!(config.tree.nodes.len(), 10);
        assert_eq!(config.tree.paths.len(), 22);
        assert_eq!(config.fibonacci.sample_bound, 144);
        assert_eq!(config.helix.sample_count, 99);
        assert_eq!(config.helix.cross_tie_count, 22);
    }

    #[test]
    fn default_paths_reference_default_nodes() {
        let config = GeometryConfig::defaults(&NumerologyConstants::default());
        for path in &config.tree.paths {
            assert!(config.tree.nodes.iter().any(|n| n.id == path.from));
            assert!(config.tree.nodes.iter().any(|n| n.id == path.to));
        }
    }

    #[test]
    fn overrides_apply_positive_or_default_and_clamp_alpha() {
        let constants = NumerologyConstants::default();
        let config = normalize_geometry(
            &constants,
            &json!({
                "vesica": { "rows": 3, "columns": -1, "alpha": 4.0 },
                "helix": { "sampleCount": 10, "crossTieCount": 40, "phaseOffset": 0 }
            }),
        );
        assert_eq!(config.vesica.rows, 3);
        assert_eq!(config.vesica.columns, 11);
        assert_eq!(config.vesica.alpha, 1.0);
        assert_eq!(config.helix.sample_count, 10);
        assert_eq!(config.helix.cross_tie_count, 10);
        assert_eq!(config.helix.phase_offset, std::f64::consts::PI);
    }

    #[test]
    fn vesica_grid_is_capped_as_a_whole() {
        let constants = NumerologyConstants {
            seven: 1e9,
            eleven: 1e9,
            ..NumerologyConstants::default()
        };
        let config = normalize_geometry(&constants, &json!(null));
        assert_eq!(config.vesica.rows, MAX_LAYOUT_COUNT);
        assert!(config.vesica.rows * config.vesica.columns <= MAX_LAYOUT_COUNT);

        let config = normalize_geometry(
            &NumerologyConstants::default(),
            &json!({ "vesica": { "rows": 100, "columns": 100 } }),
        );
        assert_eq!(config.vesica.rows, 100);
        assert_eq!(config.vesica.columns, 40);
    }

    #[test]
    fn empty_replacement_lists_keep_defaults() {
        let constants = NumerologyConstants::default();
        let config = normalize_geometry(&constants, &json!({ "tree": { "nodes": [], "paths": [] } }));
        assert_eq!(config.tree.nodes.len(), 10);
        assert_eq!(config.tree.paths.len(), 22);
    }

    #[test]
    fn replacement_paths_to_unknown_ids_are_dropped() {
        let constants = NumerologyConstants::default();
        let config = normalize_geometry(
            &constants,
            &json!({
                "tree": {
                    "nodes": [
                        { "id": "a", "level": 0, "xFactor": 0.5 },
                        { "id": "b", "level": 1, "xFactor": 2.0 },
                        { "id": "", "level": 1 }
                    ],
                    "paths": [
                        { "from": "a", "to": "b" },
                        { "from": "a", "to": "ghost" }
                    ]
                }
            }),
        );
        assert_eq!(config.tree.nodes.len(), 2);
        assert_eq!(config.tree.nodes[1].x_factor, 1.0);
        assert_eq!(config.tree.paths.len(), 1);
        assert_eq!(config.tree.paths[0].to, "b");
    }

    #[test]
    fn replacing_nodes_only_filters_default_paths() {
        let constants = NumerologyConstants::default();
        let config = normalize_geometry(
            &constants,
            &json!({ "tree": { "nodes": [
                { "id": "kether", "level": 0 },
                { "id": "tiphareth", "level": 3 }
            ] } }),
        );
        assert_eq!(config.tree.paths.len(), 1);
    }
}
