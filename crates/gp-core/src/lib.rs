//! `gp-core` — foundational types for the `geopath` segment router.
//!
//! This crate is a dependency of every other `gp-*` crate and has no `gp-*`
//! dependencies of its own (only `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module       | Contents                                                   |
//! |--------------|------------------------------------------------------------|
//! | [`ids`]      | `NodeId`, `EdgeId`                                         |
//! | [`geo`]      | `LonLat`, `Segment`, haversine distance, quantization      |
//! | [`config`]   | `RouteConfig`                                              |
//! | [`error`]    | `CoreError`, `CoreResult`                                  |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod config;
pub mod error;
pub mod geo;
pub mod ids;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::RouteConfig;
pub use error::{CoreError, CoreResult};
pub use geo::{EARTH_RADIUS_M, CoordKey, LonLat, Segment, quantize, quantize_segments, try_quantize, validate_precision};
pub use ids::{EdgeId, NodeId};
