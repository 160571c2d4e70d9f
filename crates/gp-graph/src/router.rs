//! Routing trait and default Dijkstra implementation.
//!
//! # Pluggability
//!
//! Path assembly calls routing via the [`Router`] trait, so callers can swap
//! in another search (A*, bidirectional Dijkstra) without touching the
//! graph.  The default [`DijkstraRouter`] is itself generic over the
//! frontier container through [`MinQueue`].
//!
//! # Cost units
//!
//! Costs are great-circle metres (`f64`), summed edge by edge from the start
//! node.

use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::marker::PhantomData;

use ordered_float::OrderedFloat;

use gp_core::NodeId;

use crate::network::SegmentGraph;
use crate::{RouteError, RouteResult};

// ── NodeRoute ─────────────────────────────────────────────────────────────────

/// The result of a node-to-node query: visited nodes in order (both ends
/// included) and the summed edge length.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeRoute {
    pub nodes: Vec<NodeId>,
    pub distance_m: f64,
}

impl NodeRoute {
    /// `true` if the source and destination are the same node.
    pub fn is_trivial(&self) -> bool {
        self.nodes.len() <= 1
    }

    /// Number of edges traversed.
    pub fn hop_count(&self) -> usize {
        self.nodes.len().saturating_sub(1)
    }
}

// ── Router trait ──────────────────────────────────────────────────────────────

/// Pluggable routing engine.
///
/// # Thread safety
///
/// Implementations must be `Send + Sync` so one router and one graph can
/// serve queries from many threads.
pub trait Router: Send + Sync {
    /// Compute the shortest route from `from` to `to`.
    ///
    /// `from == to` yields a single-node route of length zero.  Returns
    /// [`RouteError::NoPath`] when `to` is unreachable.
    fn route(&self, graph: &SegmentGraph, from: NodeId, to: NodeId) -> RouteResult<NodeRoute>;
}

// ── Frontier ──────────────────────────────────────────────────────────────────

/// A candidate relaxation: reach `to` through `from` at cumulative cost
/// `dist`.  Several entries for one `to` may be queued at once; all but the
/// cheapest go stale.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FrontierEntry {
    pub from: NodeId,
    pub to:   NodeId,
    pub dist: f64,
}

/// Min-priority queue of [`FrontierEntry`] ordered by `dist`.
///
/// The order among entries of equal `dist` is up to the implementation.  It
/// can change which of several equally short paths comes back, never the
/// distance.
pub trait MinQueue: Default {
    fn push(&mut self, entry: FrontierEntry);

    /// Remove and return the entry with the smallest `dist`.
    fn pop_min(&mut self) -> Option<FrontierEntry>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// [`MinQueue`] over `std`'s `BinaryHeap`.
///
/// Ties on distance fall back to `(to, from)` so pop order is deterministic.
#[derive(Default)]
pub struct BinaryHeapQueue {
    heap: BinaryHeap<Reverse<(OrderedFloat<f64>, NodeId, NodeId)>>,
}

impl MinQueue for BinaryHeapQueue {
    #[inline]
    fn push(&mut self, entry: FrontierEntry) {
        self.heap.push(Reverse((OrderedFloat(entry.dist), entry.to, entry.from)));
    }

    #[inline]
    fn pop_min(&mut self) -> Option<FrontierEntry> {
        self.heap
            .pop()
            .map(|Reverse((dist, to, from))| FrontierEntry { from, to, dist: dist.into_inner() })
    }

    fn len(&self) -> usize {
        self.heap.len()
    }
}

// ── DijkstraRouter ────────────────────────────────────────────────────────────

/// Dijkstra's algorithm with lazy deletion and early exit, over the CSR
/// segment graph.
pub struct DijkstraRouter<Q: MinQueue = BinaryHeapQueue> {
    _queue: PhantomData<fn() -> Q>,
}

impl DijkstraRouter {
    /// Router backed by [`BinaryHeapQueue`].
    pub fn new() -> Self {
        Self::with_queue()
    }
}

impl<Q: MinQueue> DijkstraRouter<Q> {
    /// Router backed by a caller-chosen frontier container.
    pub fn with_queue() -> Self {
        Self { _queue: PhantomData }
    }
}

impl Default for DijkstraRouter {
    fn default() -> Self {
        Self::new()
    }
}

impl<Q: MinQueue> Router for DijkstraRouter<Q> {
    fn route(&self, graph: &SegmentGraph, from: NodeId, to: NodeId) -> RouteResult<NodeRoute> {
        dijkstra::<Q>(graph, from, to)
    }
}

// ── Dijkstra internals ────────────────────────────────────────────────────────

fn dijkstra<Q: MinQueue>(graph: &SegmentGraph, from: NodeId, to: NodeId) -> RouteResult<NodeRoute> {
    let n = graph.node_count();
    for id in [from, to] {
        if id.index() >= n {
            return Err(RouteError::NodeNotFound(id));
        }
    }

    // best[v] = shortest known distance from `from` to v.
    let mut best = vec![f64::INFINITY; n];
    // parent[v] = predecessor of v on that path; self until v is settled.
    let mut parent: Vec<NodeId> = (0..n as u32).map(NodeId).collect();

    best[from.index()] = 0.0;

    let mut frontier = Q::default();
    frontier.push(FrontierEntry { from, to: from, dist: 0.0 });

    let mut reached = false;
    while let Some(FrontierEntry { from: via, to: node, dist }) = frontier.pop_min() {
        // Skip stale entries.
        if dist > best[node.index()] {
            continue;
        }
        parent[node.index()] = via;

        // Non-negative weights: once popped, `to` cannot get any closer.
        if node == to {
            reached = true;
            break;
        }

        for (nei, w) in graph.neighbors(node) {
            let cand = dist + w;
            if cand < best[nei.index()] {
                best[nei.index()] = cand;
                frontier.push(FrontierEntry { from: node, to: nei, dist: cand });
            }
        }
    }

    if !reached {
        return Err(RouteError::NoPath);
    }
    Ok(reconstruct(&parent, from, to, best[to.index()]))
}

fn reconstruct(parent: &[NodeId], from: NodeId, to: NodeId, distance_m: f64) -> NodeRoute {
    let mut nodes = vec![to];
    let mut cur = to;
    while cur != from {
        cur = parent[cur.index()];
        nodes.push(cur);
        debug_assert!(nodes.len() <= parent.len(), "parent chain does not reach the start node");
    }
    nodes.reverse();
    NodeRoute { nodes, distance_m }
}
