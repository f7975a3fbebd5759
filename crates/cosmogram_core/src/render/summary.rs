//! Human-readable account of what a render call drew.

use serde::Serialize;
use std::fmt::{Display, Formatter};

use super::layers::fibonacci::FibonacciStats;
use super::layers::helix::HelixStats;
use super::layers::overlay::OverlayStats;
use super::layers::tree::TreeStats;
use super::layers::vesica::VesicaStats;

/// Counts per layer. The `Display` form is stable and is used by tests and
/// the CLI smoke check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RenderSummary {
    pub vesica_pairs: usize,
    pub tree_nodes: usize,
    pub tree_paths: usize,
    pub fibonacci_samples: usize,
    pub fibonacci_markers: usize,
    pub lattice_points: usize,
    pub strands: usize,
    pub strand_samples: usize,
    pub rungs: usize,
    pub active_nodes: usize,
}

impl RenderSummary {
    pub(crate) fn from_layers(
        vesica: VesicaStats,
        tree: TreeStats,
        fibonacci: FibonacciStats,
        helix: HelixStats,
        overlay: OverlayStats,
    ) -> Self {
        Self {
            vesica_pairs: vesica.pairs,
            tree_nodes: tree.nodes,
            tree_paths: tree.paths,
            fibonacci_samples: fibonacci.samples,
            fibonacci_markers: fibonacci.markers,
            lattice_points: helix.lattice_points,
            strands: helix.strands,
            strand_samples: helix.samples_per_strand,
            rungs: helix.rungs,
            active_nodes: overlay.markers,
        }
    }
}

impl Display for RenderSummary {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "vesica pairs={}; tree nodes={} paths={}; fibonacci samples={} markers={}; \
             lattice points={} strands={}x{} rungs={}",
            self.vesica_pairs,
            self.tree_nodes,
            self.tree_paths,
            self.fibonacci_samples,
            self.fibonacci_markers,
            self.lattice_points,
            self.strands,
            self.strand_samples,
            self.rungs,
        )?;
        if self.active_nodes > 0 {
            write!(f, "; active nodes={}", self.active_nodes)?;
        }
        Ok(())
    }
}
