//! geopath — shortest paths over a GeoJSON line network.
//!
//! Loads every two-point `LineString` from a GeoJSON file, builds the segment
//! graph once, then answers either a single `--from`/`--to` query or a CSV
//! batch passed with `--queries`.
//!
//! ```text
//! geopath campus.geojson --from=-84.396863,33.792908 --to=-84.396535,33.792578 --precision 0.00001
//! geopath campus.geojson --queries trips.csv --format csv
//! ```

mod output;
mod query;

#[cfg(test)]
mod tests;

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use anyhow::{Context, Result, bail};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use gp_core::{LonLat, RouteConfig};
use gp_graph::SegmentGraph;
use gp_graph::geojson::load_segments;

use output::Format;

/// Shortest path between two points along a network of GeoJSON line segments.
#[derive(Parser, Debug)]
#[command(name = "geopath", version, about, long_about = None)]
struct Cli {
    /// GeoJSON FeatureCollection whose LineStrings each hold two positions.
    network: PathBuf,

    /// Start point as `LON,LAT`.
    #[arg(long, value_parser = query::parse_lonlat, allow_hyphen_values = true,
          requires = "to", conflicts_with = "queries")]
    from: Option<LonLat>,

    /// End point as `LON,LAT`.
    #[arg(long, value_parser = query::parse_lonlat, allow_hyphen_values = true,
          requires = "from")]
    to: Option<LonLat>,

    /// CSV batch with a `from_lon,from_lat,to_lon,to_lat` header.
    #[arg(long)]
    queries: Option<PathBuf>,

    /// Snapping grid in degrees.  0 joins only bit-identical endpoints.
    #[arg(long, default_value_t = 0.0)]
    precision: f64,

    /// Output format written to stdout.
    #[arg(long, value_enum, default_value_t = Format::Json)]
    format: Format,

    /// Log more to stderr.  Repeat for more detail (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // RUST_LOG wins over -v.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    match run(&cli, &mut std::io::stdout().lock()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}

fn run<W: Write>(cli: &Cli, out: &mut W) -> Result<()> {
    let config = RouteConfig::new(cli.precision).context("invalid --precision")?;

    let started = Instant::now();
    let segments = load_segments(&cli.network)
        .with_context(|| format!("failed to load {}", cli.network.display()))?;
    let graph = SegmentGraph::from_segments(&segments, &config)
        .context("failed to build segment graph")?;
    info!(
        segments = segments.len(),
        nodes = graph.node_count(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "network ready"
    );

    match (&cli.queries, cli.from, cli.to) {
        (Some(path), _, _) => {
            let queries = query::load_queries(path)?;
            let started = Instant::now();
            let results = graph.shortest_paths(&queries);
            info!(
                queries = queries.len(),
                found = results.iter().filter(|r| r.is_ok()).count(),
                elapsed_ms = started.elapsed().as_millis() as u64,
                "batch answered"
            );
            output::write_batch(out, cli.format, &queries, &results)
        }
        (None, Some(from), Some(to)) => {
            let path = graph
                .shortest_path(from, to)
                .with_context(|| format!("no route from {from} to {to}"))?;
            output::write_path(out, cli.format, &path)
        }
        _ => bail!("pass either --from and --to, or --queries"),
    }
}
