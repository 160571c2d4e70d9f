//! Result rendering for stdout.

use std::io::Write;

use anyhow::Result;
use clap::ValueEnum;
use serde::Serialize;

use gp_core::LonLat;
use gp_graph::{GeoPath, RouteResult};

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// One JSON document: distance plus `[lon, lat]` coordinates.
    Json,
    /// One CSV row per point (single query) or per query (batch).
    Csv,
}

#[derive(Serialize)]
struct PathDoc {
    distance_m:  f64,
    coordinates: Vec<[f64; 2]>,
}

#[derive(Serialize)]
struct BatchDoc {
    index: usize,
    from:  [f64; 2],
    to:    [f64; 2],
    #[serde(skip_serializing_if = "Option::is_none")]
    distance_m: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    coordinates: Option<Vec<[f64; 2]>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// Flat row for CSV batches; `None` renders as an empty cell.
const BATCH_COLUMNS: [&str; 8] =
    ["index", "from_lon", "from_lat", "to_lon", "to_lat", "distance_m", "points", "error"];

#[derive(Serialize)]
struct BatchRow {
    index:      usize,
    from_lon:   f64,
    from_lat:   f64,
    to_lon:     f64,
    to_lat:     f64,
    distance_m: Option<f64>,
    points:     Option<usize>,
    error:      Option<String>,
}

pub fn write_path<W: Write>(out: &mut W, format: Format, path: &GeoPath) -> Result<()> {
    match format {
        Format::Json => {
            let doc = PathDoc { distance_m: path.distance_m, coordinates: path.coordinates() };
            serde_json::to_writer_pretty(&mut *out, &doc)?;
            writeln!(out)?;
        }
        Format::Csv => {
            let mut w = csv::Writer::from_writer(&mut *out);
            w.write_record(["seq", "lon", "lat"])?;
            for (i, p) in path.points.iter().enumerate() {
                w.serialize((i, p.lon, p.lat))?;
            }
            w.flush()?;
        }
    }
    Ok(())
}

pub fn write_batch<W: Write>(
    out: &mut W,
    format: Format,
    queries: &[(LonLat, LonLat)],
    results: &[RouteResult<GeoPath>],
) -> Result<()> {
    match format {
        Format::Json => {
            let docs: Vec<BatchDoc> = queries
                .iter()
                .zip(results)
                .enumerate()
                .map(|(index, (&(from, to), result))| match result {
                    Ok(path) => BatchDoc {
                        index,
                        from: from.into(),
                        to: to.into(),
                        distance_m: Some(path.distance_m),
                        coordinates: Some(path.coordinates()),
                        error: None,
                    },
                    Err(e) => BatchDoc {
                        index,
                        from: from.into(),
                        to: to.into(),
                        distance_m: None,
                        coordinates: None,
                        error: Some(e.to_string()),
                    },
                })
                .collect();
            serde_json::to_writer_pretty(&mut *out, &docs)?;
            writeln!(out)?;
        }
        Format::Csv => {
            // Header written by hand so an empty batch still gets one.
            let mut w = csv::WriterBuilder::new().has_headers(false).from_writer(&mut *out);
            w.write_record(BATCH_COLUMNS)?;
            for (index, (&(from, to), result)) in queries.iter().zip(results).enumerate() {
                let (distance_m, points, error) = match result {
                    Ok(path) => (Some(path.distance_m), Some(path.points.len()), None),
                    Err(e) => (None, None, Some(e.to_string())),
                };
                w.serialize(BatchRow {
                    index,
                    from_lon: from.lon,
                    from_lat: from.lat,
                    to_lon: to.lon,
                    to_lat: to.lat,
                    distance_m,
                    points,
                    error,
                })?;
            }
            w.flush()?;
        }
    }
    Ok(())
}
