//! GeoJSON segment loader — enabled with the `geojson` Cargo feature.
//!
//! # Usage
//!
//! ```ignore
//! use std::path::Path;
//! use gp_graph::geojson::load_segments;
//!
//! let segments = load_segments(Path::new("campus.geojson"))?;
//! ```
//!
//! # What is loaded
//!
//! The document root must be a `FeatureCollection` and every feature must be
//! of type `Feature`.  Each `LineString` geometry must hold exactly two
//! positions (a missing `coordinates` member counts as none) and becomes one
//! [`Segment`].  Other geometry types and
//! features with a `null` geometry are skipped.  Positions carrying an
//! altitude keep only their first two values.
//!
//! A failure anywhere aborts the whole load; no partial list is returned.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use gp_core::{LonLat, Segment};

use crate::{RouteError, RouteResult};

const FEATURE_COLLECTION: &str = "FeatureCollection";
const FEATURE:            &str = "Feature";
const LINE_STRING:        &str = "LineString";

// ── Document records ──────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct Document {
    #[serde(rename = "type")]
    kind:     String,
    #[serde(default)]
    features: Vec<Feature>,
}

#[derive(Deserialize)]
struct Feature {
    #[serde(rename = "type")]
    kind:     String,
    #[serde(default)]
    geometry: Option<Geometry>,
}

/// `coordinates` stays untyped until the geometry type is known, since its
/// nesting depth differs per type.
#[derive(Deserialize)]
struct Geometry {
    #[serde(rename = "type")]
    kind:        String,
    #[serde(default)]
    coordinates: Value,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load two-point `LineString`s from a GeoJSON file.
pub fn load_segments(path: &Path) -> RouteResult<Vec<Segment>> {
    let file = File::open(path)?;
    load_segments_reader(BufReader::new(file))
}

/// Like [`load_segments`] but accepts any `Read` source.
pub fn load_segments_reader<R: Read>(reader: R) -> RouteResult<Vec<Segment>> {
    let doc: Document = serde_json::from_reader(reader)?;
    segments_from_document(doc)
}

/// Like [`load_segments`] for an in-memory document.
pub fn parse_segments(json: &str) -> RouteResult<Vec<Segment>> {
    let doc: Document = serde_json::from_str(json)?;
    segments_from_document(doc)
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn segments_from_document(doc: Document) -> RouteResult<Vec<Segment>> {
    if doc.kind != FEATURE_COLLECTION {
        return Err(RouteError::InvalidRootType { found: doc.kind });
    }

    let mut segments = Vec::with_capacity(doc.features.len());
    let mut skipped = 0usize;

    for (i, feature) in doc.features.into_iter().enumerate() {
        if feature.kind != FEATURE {
            return Err(RouteError::InvalidFeatureType { feature: i, found: feature.kind });
        }
        let Some(geom) = feature.geometry else {
            skipped += 1;
            continue;
        };
        if geom.kind != LINE_STRING {
            skipped += 1;
            continue;
        }

        let positions: Vec<Vec<f64>> = match geom.coordinates {
            Value::Null => Vec::new(),
            coordinates => serde_json::from_value(coordinates)?,
        };
        if positions.len() != 2 {
            return Err(RouteError::MalformedLineString { feature: i, count: positions.len() });
        }
        let a = position(&positions[0], i)?;
        let b = position(&positions[1], i)?;
        segments.push(Segment::new(a, b));
    }

    debug!(segments = segments.len(), skipped, "parsed GeoJSON segments");
    Ok(segments)
}

fn position(values: &[f64], feature: usize) -> RouteResult<LonLat> {
    match values {
        [lon, lat, ..] => Ok(LonLat::new(*lon, *lat)),
        _ => Err(RouteError::MalformedPosition { feature }),
    }
}
