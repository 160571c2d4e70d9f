//! Segment graph representation and builder.
//!
//! # Data layout
//!
//! Adjacency uses **Compressed Sparse Row (CSR)** format.  Given a
//! `NodeId n`, its outgoing half-edges occupy the slice:
//!
//! ```text
//! edge_to[ node_out_start[n] .. node_out_start[n+1] ]
//! ```
//!
//! `edge_to` and `edge_length_m` are sorted by source node and indexed by
//! `EdgeId`.  Every input segment contributes one half-edge in each
//! direction, so the relation is symmetric.  Within a node's slice,
//! half-edges keep the order in which their segments were added.
//!
//! # Node identity
//!
//! A node is a distinct (post-quantization) endpoint coordinate.  Ids are
//! handed out densely from 0 in first-seen order, and an
//! `FxHashMap<CoordKey, NodeId>` maps coordinates back to ids.

use rustc_hash::FxHashMap;
use tracing::debug;

use gp_core::{CoordKey, CoreError, EdgeId, LonLat, NodeId, RouteConfig, Segment, quantize, try_quantize};

use crate::{RouteError, RouteResult};

// ── SegmentGraph ──────────────────────────────────────────────────────────────

/// Undirected segment graph in CSR format.
///
/// Immutable once built: share it by reference across threads and run any
/// number of queries against it.  Construct with
/// [`SegmentGraph::from_segments`] or [`SegmentGraphBuilder`].  The arrays
/// are read through slice accessors only, so they always agree.
pub struct SegmentGraph {
    // ── Node data ─────────────────────────────────────────────────────────
    /// Coordinate of each node (quantized when `precision > 0`).
    node_pos: Vec<LonLat>,

    // ── CSR edge adjacency ────────────────────────────────────────────────
    /// CSR row pointer.  Length = `node_count + 1`.
    node_out_start: Vec<u32>,
    edge_to:        Vec<NodeId>,
    /// Dijkstra edge cost.
    edge_length_m:  Vec<f64>,

    node_index: FxHashMap<CoordKey, NodeId>,
    precision:  f64,
}

impl SegmentGraph {
    /// A graph with no nodes.  Every query against it fails with
    /// [`RouteError::NoPath`].
    pub fn empty() -> Self {
        SegmentGraphBuilder::new().build()
    }

    /// Build a graph from raw segments.
    ///
    /// Steps, in order:
    ///
    /// 1. Reject non-finite coordinates and snap every endpoint to the
    ///    `config.precision` grid.  `segments` itself is not modified.
    /// 2. Canonicalize each segment (smaller endpoint first), sort the list
    ///    lexicographically on `(a.lon, a.lat, b.lon, b.lat)` and drop
    ///    consecutive duplicates.  Two segments are duplicates when they join
    ///    the same two endpoints, in either direction.
    /// 3. Walk the deduplicated list and intern endpoints `a` then `b`,
    ///    assigning `NodeId`s in first-seen order.
    /// 4. Add a half-edge each way, weighted by haversine length.
    pub fn from_segments(segments: &[Segment], config: &RouteConfig) -> RouteResult<SegmentGraph> {
        config.validate()?;
        let precision = config.precision;

        let mut canon: Vec<Segment> = segments
            .iter()
            .map(|s| -> RouteResult<Segment> { Ok(s.try_quantize(precision)?.canonical()) })
            .collect::<RouteResult<_>>()?;

        canon.sort_by(Segment::total_cmp);
        canon.dedup();

        let mut b = SegmentGraphBuilder::with_capacity(canon.len() * 2, canon.len() * 2)
            .precision(precision);
        for s in &canon {
            b.add_segment_snapped(*s)?;
        }
        let graph = b.build();

        debug!(
            input_segments = segments.len(),
            unique_segments = canon.len(),
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            precision,
            "built segment graph"
        );
        Ok(graph)
    }

    // ── Graph dimensions ──────────────────────────────────────────────────

    pub fn node_count(&self) -> usize {
        self.node_pos.len()
    }

    /// Number of directed half-edges (two per non-loop segment).
    pub fn edge_count(&self) -> usize {
        self.edge_to.len()
    }

    pub fn is_empty(&self) -> bool {
        self.node_pos.is_empty()
    }

    /// Grid size the graph was built with.  Query points are snapped to the
    /// same grid.
    pub fn precision(&self) -> f64 {
        self.precision
    }

    // ── Raw arrays ────────────────────────────────────────────────────────

    /// Coordinate of every node, indexed by `NodeId`.
    pub fn node_positions(&self) -> &[LonLat] {
        &self.node_pos
    }

    /// CSR row pointer: the half-edges of node `n` are
    /// `row_offsets()[n] .. row_offsets()[n + 1]`.
    pub fn row_offsets(&self) -> &[u32] {
        &self.node_out_start
    }

    /// Destination node of each half-edge, indexed by `EdgeId`.
    pub fn edge_targets(&self) -> &[NodeId] {
        &self.edge_to
    }

    /// Great-circle length in metres of each half-edge, indexed by `EdgeId`.
    pub fn edge_lengths(&self) -> &[f64] {
        &self.edge_length_m
    }

    // ── Graph traversal ───────────────────────────────────────────────────

    /// Iterator over the `EdgeId`s of all half-edges leaving `node`.
    #[inline]
    pub fn out_edges(&self, node: NodeId) -> impl Iterator<Item = EdgeId> + '_ {
        let start = self.node_out_start[node.index()] as usize;
        let end   = self.node_out_start[node.index() + 1] as usize;
        (start..end).map(|i| EdgeId(i as u32))
    }

    /// `(neighbor, weight)` pairs of `node`, in insertion order.
    #[inline]
    pub fn neighbors(&self, node: NodeId) -> impl Iterator<Item = (NodeId, f64)> + '_ {
        self.out_edges(node)
            .map(|e| (self.edge_to[e.index()], self.edge_length_m[e.index()]))
    }

    #[inline]
    pub fn out_degree(&self, node: NodeId) -> usize {
        let start = self.node_out_start[node.index()] as usize;
        let end   = self.node_out_start[node.index() + 1] as usize;
        end - start
    }

    // ── Node lookup ───────────────────────────────────────────────────────

    /// Coordinate of `node`, or [`RouteError::NodeNotFound`] for an id that
    /// does not belong to this graph.
    pub fn position(&self, node: NodeId) -> RouteResult<LonLat> {
        self.node_pos
            .get(node.index())
            .copied()
            .ok_or(RouteError::NodeNotFound(node))
    }

    /// Exact lookup: the node at `pos` after snapping it to this graph's grid.
    pub fn node_at(&self, pos: LonLat) -> Option<NodeId> {
        self.node_index.get(&quantize(self.precision, pos).key()).copied()
    }
}

// ── SegmentGraphBuilder ───────────────────────────────────────────────────────

/// Construct a [`SegmentGraph`] incrementally, then call [`build`](Self::build).
///
/// Nodes are interned: adding a coordinate that is already present returns
/// the existing id.  Edges must join nodes already added and carry a finite,
/// non-negative length, so `build()` cannot fail.  It sorts half-edges by
/// source node (stable, so per-node order follows insertion) and lays out
/// the CSR arrays.
///
/// # Example
///
/// ```
/// use gp_core::LonLat;
/// use gp_graph::SegmentGraphBuilder;
///
/// # fn main() -> gp_graph::RouteResult<()> {
/// let mut b = SegmentGraphBuilder::new();
/// let a = b.add_node(LonLat::new(0.0, 0.0))?;
/// let c = b.add_node(LonLat::new(0.0, 1.0))?;
/// b.add_road(a, c, 111_195.08)?;
/// let graph = b.build();
/// assert_eq!(graph.node_count(), 2);
/// assert_eq!(graph.edge_count(), 2); // both directions
/// # Ok(())
/// # }
/// ```
pub struct SegmentGraphBuilder {
    nodes:      Vec<LonLat>,
    node_index: FxHashMap<CoordKey, NodeId>,
    raw_edges:  Vec<RawEdge>,
    precision:  f64,
}

struct RawEdge {
    from:     NodeId,
    to:       NodeId,
    length_m: f64,
}

impl SegmentGraphBuilder {
    pub fn new() -> Self {
        Self::with_capacity(0, 0)
    }

    /// Pre-allocate for the expected number of nodes and half-edges.
    pub fn with_capacity(nodes: usize, edges: usize) -> Self {
        Self {
            nodes:      Vec::with_capacity(nodes),
            node_index: FxHashMap::with_capacity_and_hasher(nodes, Default::default()),
            raw_edges:  Vec::with_capacity(edges),
            precision:  0.0,
        }
    }

    /// Snap every node added from now on to a grid of this size.  The value
    /// is also stored on the built graph for query-point snapping.
    pub fn precision(mut self, precision: f64) -> Self {
        self.precision = precision;
        self
    }

    /// Intern `pos` (after snapping) and return its `NodeId`.
    ///
    /// # Errors
    ///
    /// [`RouteError::Core`] if `pos` is not finite or does not fit the grid.
    pub fn add_node(&mut self, pos: LonLat) -> RouteResult<NodeId> {
        let snapped = try_quantize(self.precision, pos)?;
        Ok(self.intern(snapped))
    }

    fn intern(&mut self, pos: LonLat) -> NodeId {
        let next = NodeId(self.nodes.len() as u32);
        let id = *self.node_index.entry(pos.key()).or_insert(next);
        if id == next {
            self.nodes.push(pos);
        }
        id
    }

    /// Add a **directed** half-edge from `from` to `to`.
    ///
    /// # Errors
    ///
    /// [`RouteError::NodeNotFound`] if either id was not returned by this
    /// builder; [`CoreError::InvalidLength`] for a negative or non-finite
    /// length.  Nothing is added on error.
    pub fn add_directed_edge(&mut self, from: NodeId, to: NodeId, length_m: f64) -> RouteResult<()> {
        self.check_node(from)?;
        self.check_node(to)?;
        if !(length_m.is_finite() && length_m >= 0.0) {
            return Err(CoreError::InvalidLength(length_m).into());
        }
        self.raw_edges.push(RawEdge { from, to, length_m });
        Ok(())
    }

    /// Add half-edges in both directions.  A self-loop gets a single one.
    /// Fails like [`add_directed_edge`](Self::add_directed_edge), before
    /// either half-edge is added.
    pub fn add_road(&mut self, a: NodeId, b: NodeId, length_m: f64) -> RouteResult<()> {
        self.add_directed_edge(a, b, length_m)?;
        if a != b {
            self.add_directed_edge(b, a, length_m)?;
        }
        Ok(())
    }

    /// Intern both endpoints of `segment` and connect them, weighted by
    /// haversine length.
    pub fn add_segment(&mut self, segment: Segment) -> RouteResult<(NodeId, NodeId)> {
        let snapped = segment.try_quantize(self.precision)?;
        self.add_segment_snapped(snapped)
    }

    /// Like [`add_segment`](Self::add_segment) for endpoints that are already
    /// on the grid.
    fn add_segment_snapped(&mut self, segment: Segment) -> RouteResult<(NodeId, NodeId)> {
        let a = self.intern(segment.a);
        let b = self.intern(segment.b);
        self.add_road(a, b, segment.length_m())?;
        Ok((a, b))
    }

    fn check_node(&self, id: NodeId) -> RouteResult<()> {
        if id.index() < self.nodes.len() {
            Ok(())
        } else {
            Err(RouteError::NodeNotFound(id))
        }
    }

    /// Position of a node added earlier, `None` for a foreign id.
    pub fn node_pos(&self, id: NodeId) -> Option<LonLat> {
        self.nodes.get(id.index()).copied()
    }

    pub fn node_count(&self) -> usize { self.nodes.len() }
    pub fn edge_count(&self) -> usize { self.raw_edges.len() }

    /// Consume the builder and produce a [`SegmentGraph`].
    ///
    /// Time complexity: O(E log E) for the edge sort.
    pub fn build(self) -> SegmentGraph {
        let node_count = self.nodes.len();
        let edge_count = self.raw_edges.len();

        let mut raw = self.raw_edges;
        raw.sort_by_key(|e| e.from.0);

        let edge_to:       Vec<NodeId> = raw.iter().map(|e| e.to).collect();
        let edge_length_m: Vec<f64>    = raw.iter().map(|e| e.length_m).collect();

        let mut node_out_start = vec![0u32; node_count + 1];
        for e in &raw {
            node_out_start[e.from.index() + 1] += 1;
        }
        for i in 1..=node_count {
            node_out_start[i] += node_out_start[i - 1];
        }
        debug_assert_eq!(node_out_start[node_count] as usize, edge_count);

        SegmentGraph {
            node_pos: self.nodes,
            node_out_start,
            edge_to,
            edge_length_m,
            node_index: self.node_index,
            precision: self.precision,
        }
    }
}

impl Default for SegmentGraphBuilder {
    fn default() -> Self {
        Self::new()
    }
}
