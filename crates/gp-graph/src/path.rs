//! Point-to-point queries: snap, route, and stitch the result together.

use tracing::debug;

use gp_core::{LonLat, RouteConfig, Segment, try_quantize};

use crate::network::SegmentGraph;
use crate::router::{DijkstraRouter, Router};
use crate::{RouteError, RouteResult};

/// A routed path between two arbitrary coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct GeoPath {
    /// Caller's start point, the graph nodes from the start node through the
    /// end node, then the caller's end point.  A query point bit-identical
    /// to its node appears once.
    pub points: Vec<LonLat>,
    /// Start gap + along-graph distance + end gap, in metres.
    pub distance_m: f64,
}

impl GeoPath {
    /// Points as `[lon, lat]` pairs, the GeoJSON position layout.
    pub fn coordinates(&self) -> Vec<[f64; 2]> {
        self.points.iter().map(|&p| p.into()).collect()
    }
}

impl SegmentGraph {
    /// Shortest path from `start` to `end` using [`DijkstraRouter`].
    pub fn shortest_path(&self, start: LonLat, end: LonLat) -> RouteResult<GeoPath> {
        self.shortest_path_with(&DijkstraRouter::new(), start, end)
    }

    /// Shortest path from `start` to `end` using any [`Router`].
    ///
    /// Both query points are snapped to the graph's grid and matched to their
    /// nearest node.  The first and last returned points are `start` and
    /// `end` exactly as passed in, whatever the precision.
    ///
    /// # Errors
    ///
    /// [`RouteError::Core`] for non-finite query points or ones the grid
    /// cannot snap,
    /// [`RouteError::NoPath`] for an empty graph or disconnected nodes.
    pub fn shortest_path_with<R: Router + ?Sized>(
        &self,
        router: &R,
        start: LonLat,
        end: LonLat,
    ) -> RouteResult<GeoPath> {
        try_quantize(self.precision(), start)?;
        try_quantize(self.precision(), end)?;

        let (start_node, start_gap) = self.snap(start).ok_or(RouteError::NoPath)?;
        let (end_node, end_gap) = self.snap(end).ok_or(RouteError::NoPath)?;

        let route = router.route(self, start_node, end_node)?;

        let mut points = Vec::with_capacity(route.nodes.len() + 2);
        points.push(start);
        points.extend(route.nodes.iter().map(|n| self.node_positions()[n.index()]));
        points.push(end);

        // A query point sitting exactly on its node would repeat it.
        let last = points.len() - 1;
        if same_bits(points[last - 1], end) {
            points.pop();
        }
        if same_bits(points[1], start) {
            points.remove(0);
        }

        let distance_m = start_gap + route.distance_m + end_gap;
        debug!(
            %start,
            %end,
            hops = route.hop_count(),
            distance_m,
            "found shortest path"
        );
        Ok(GeoPath { points, distance_m })
    }

    /// Answer a batch of `(start, end)` queries against this graph.
    ///
    /// Results line up with `queries`.  With the `parallel` feature the batch
    /// runs on the Rayon pool; every query gets its own search state.
    pub fn shortest_paths(&self, queries: &[(LonLat, LonLat)]) -> Vec<RouteResult<GeoPath>> {
        #[cfg(not(feature = "parallel"))]
        {
            queries
                .iter()
                .map(|&(start, end)| self.shortest_path(start, end))
                .collect()
        }

        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;

            queries
                .par_iter()
                .map(|&(start, end)| self.shortest_path(start, end))
                .collect()
        }
    }
}

#[inline]
fn same_bits(a: LonLat, b: LonLat) -> bool {
    a.lon.to_bits() == b.lon.to_bits() && a.lat.to_bits() == b.lat.to_bits()
}

/// One-shot query: build a graph from `segments` and route across it.
///
/// `precision` is the snapping grid (`0.0` disables snapping).  `segments`
/// is only read; snapping happens on a private copy.  To answer many queries
/// over the same network, build a [`SegmentGraph`] once instead.
pub fn find_shortest_path(
    segments: &[Segment],
    start: LonLat,
    end: LonLat,
    precision: f64,
) -> RouteResult<GeoPath> {
    let config = RouteConfig::new(precision)?;
    SegmentGraph::from_segments(segments, &config)?.shortest_path(start, end)
}
