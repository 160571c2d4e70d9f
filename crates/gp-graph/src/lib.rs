//! `gp-graph` — segment graph, nearest-node snapping, and routing.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                      |
//! |-------------|---------------------------------------------------------------|
//! | [`network`] | `SegmentGraph` (CSR + coordinate index), `SegmentGraphBuilder` |
//! | [`locate`]  | `SegmentGraph::nearest_node`, `SegmentGraph::snap`            |
//! | [`router`]  | `Router` trait, `NodeRoute`, `DijkstraRouter`, `MinQueue`     |
//! | [`path`]    | `GeoPath`, `SegmentGraph::shortest_path`, `find_shortest_path` |
//! | [`geojson`] | `load_segments` (feature = `"geojson"` only)                  |
//! | [`error`]   | `RouteError`, `RouteResult<T>`                                |
//!
//! # Feature flags
//!
//! | Flag       | Effect                                                     |
//! |------------|------------------------------------------------------------|
//! | `geojson`  | GeoJSON `LineString` loading via `serde_json` (default).    |
//! | `parallel` | `shortest_paths` answers batches on the Rayon pool.         |
//! | `serde`    | Derives `Serialize`/`Deserialize` on `gp-core` types.       |

pub mod error;
pub mod locate;
pub mod network;
pub mod path;
pub mod router;

#[cfg(feature = "geojson")]
pub mod geojson;


pub use error::{RouteError, RouteResult};
pub use network::{SegmentGraph, SegmentGraphBuilder};
pub use path::{GeoPath, find_shortest_path};
pub use router::{BinaryHeapQueue, DijkstraRouter, FrontierEntry, MinQueue, NodeRoute, Router};
