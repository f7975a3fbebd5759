//! Hourly activation cycle.
//!
//! # Responsibility
//! - Select the valid nodes ruled by the current planetary hour.
//! - Activate each of them and hand the merged result to the renderer.
//!
//! # Invariants
//! - Only validated nodes are ever candidates.
//! - Every activation passes the explicit ND-safe guard.

use super::store::{ActivationGuard, ActivationRecord, ActivationStore};
use crate::planetary::planet::Planet;
use crate::registry::node::NodeRecord;
use log::info;
use serde::Serialize;

/// Valid node merged with its fresh activation record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActiveNode {
    pub node: NodeRecord,
    pub activation: ActivationRecord,
}

/// Result of one activation cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct ActivationOutcome {
    pub active_nodes: Vec<ActiveNode>,
    /// One-line description, e.g. `hour=Mars active=2/10`.
    pub summary: String,
}

/// Runs one activation cycle against `store`.
///
/// Nodes whose `correspondences.planetary_hour` equals `current_hour` are
/// activated in input order.
pub fn determine_active_nodes(
    store: &ActivationStore,
    valid_nodes: &[NodeRecord],
    current_hour: Planet,
) -> ActivationOutcome {
    let active_nodes: Vec<ActiveNode> = valid_nodes
        .iter()
        .filter(|node| node.correspondences.planetary_hour == current_hour)
        .filter_map(|node| {
            let guard = ActivationGuard {
                nd_safe: Some(node.nd_safe),
            };
            store
                .activate(&node.id, guard)
                .map(|activation| ActiveNode {
                    node: node.clone(),
                    activation,
                })
        })
        .collect();

    let summary = format!(
        "hour={} active={}/{}",
        current_hour,
        active_nodes.len(),
        valid_nodes.len()
    );
    info!(
        "event=activation_cycle module=activation status=ok hour={} active={} candidates={}",
        current_hour,
        active_nodes.len(),
        valid_nodes.len()
    );

    ActivationOutcome {
        active_nodes,
        summary,
    }
}
