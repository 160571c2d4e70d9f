//! Nearest-node lookup for arbitrary query points.
//!
//! A plain linear scan over the node positions.  It runs at most twice per query
//! (start and end), so no spatial index is kept; the scan order doubles as
//! the tie-break rule.

use tracing::trace;

use gp_core::{LonLat, NodeId, quantize};

use crate::network::SegmentGraph;

impl SegmentGraph {
    /// The node closest to `pos` by haversine distance, with that distance
    /// in metres.
    ///
    /// `pos` is used as given; see [`snap`](Self::snap) for the variant that
    /// first moves it onto the graph's grid.  Among equally distant nodes the
    /// lowest `NodeId` (first created) wins.  Returns `None` only if the
    /// graph has no nodes.
    pub fn nearest_node(&self, pos: LonLat) -> Option<(NodeId, f64)> {
        let mut best: Option<(NodeId, f64)> = None;
        for (i, &node) in self.node_positions().iter().enumerate() {
            let d = node.distance_m(pos);
            match best {
                Some((_, best_d)) if d >= best_d => {}
                _ => best = Some((NodeId(i as u32), d)),
            }
        }
        best
    }

    /// Snap `pos` to the graph's precision grid, then find the nearest node.
    ///
    /// The returned distance is measured from the snapped point.
    pub fn snap(&self, pos: LonLat) -> Option<(NodeId, f64)> {
        let snapped = quantize(self.precision(), pos);
        let found = self.nearest_node(snapped);
        if let Some((node, d)) = found {
            trace!(%pos, %snapped, %node, distance_m = d, "snapped query point");
        }
        found
    }
}
