//! Routing-subsystem error type.

use thiserror::Error;

use gp_core::{CoreError, NodeId};

/// Errors produced by `gp-graph`.
#[derive(Debug, Error)]
pub enum RouteError {
    /// The nodes nearest the query points are not connected, or the graph is
    /// empty.  No partial path is returned.
    #[error("no path")]
    NoPath,

    #[error("node {0} not found in graph")]
    NodeNotFound(NodeId),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[cfg(feature = "geojson")]
    #[error("GeoJSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[cfg(feature = "geojson")]
    #[error("invalid root geojson type {found:?}, expected \"FeatureCollection\"")]
    InvalidRootType { found: String },

    #[cfg(feature = "geojson")]
    #[error("invalid geojson feature type {found:?} at feature #{feature}, expected \"Feature\"")]
    InvalidFeatureType { feature: usize, found: String },

    #[cfg(feature = "geojson")]
    #[error("LineString geometry for feature #{feature} has {count} coordinates, expected 2")]
    MalformedLineString { feature: usize, count: usize },

    #[cfg(feature = "geojson")]
    #[error("LineString position for feature #{feature} has fewer than 2 values")]
    MalformedPosition { feature: usize },
}

pub type RouteResult<T> = Result<T, RouteError>;
