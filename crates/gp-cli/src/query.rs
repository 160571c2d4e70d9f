//! Query input: `LON,LAT` arguments and CSV batches.
//!
//! # CSV format
//!
//! ```csv
//! from_lon,from_lat,to_lon,to_lat
//! -84.396863,33.792908,-84.396535,33.792578
//! -84.397252,33.792997,-84.395111,33.791666
//! ```

use std::fs::File;
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use gp_core::LonLat;

#[derive(Deserialize)]
struct QueryRecord {
    from_lon: f64,
    from_lat: f64,
    to_lon:   f64,
    to_lat:   f64,
}

/// Parse a `LON,LAT` pair for clap.
pub fn parse_lonlat(s: &str) -> Result<LonLat, String> {
    let (lon, lat) = s
        .split_once(',')
        .ok_or_else(|| format!("expected LON,LAT, got {s:?}"))?;
    let lon: f64 = lon
        .trim()
        .parse()
        .map_err(|e| format!("invalid longitude {lon:?}: {e}"))?;
    let lat: f64 = lat
        .trim()
        .parse()
        .map_err(|e| format!("invalid latitude {lat:?}: {e}"))?;
    LonLat::new(lon, lat).validate().map_err(|e| e.to_string())
}

/// Load `(start, end)` pairs from a CSV file.
pub fn load_queries(path: &Path) -> Result<Vec<(LonLat, LonLat)>> {
    let file = File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    read_queries(file)
}

/// Like [`load_queries`] but accepts any `Read` source.
pub fn read_queries<R: Read>(reader: R) -> Result<Vec<(LonLat, LonLat)>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    csv_reader
        .deserialize::<QueryRecord>()
        .enumerate()
        .map(|(i, row)| {
            let r = row.with_context(|| format!("invalid query on data row {}", i + 1))?;
            Ok((LonLat::new(r.from_lon, r.from_lat), LonLat::new(r.to_lon, r.to_lat)))
        })
        .collect()
}
