//! Tests for argument parsing, query loading, and output rendering.

#[cfg(test)]
mod query {
    use std::io::Cursor;

    use gp_core::LonLat;

    use crate::query::{parse_lonlat, read_queries};

    #[test]
    fn lonlat_argument() {
        assert_eq!(parse_lonlat("-84.396863,33.792908"), Ok(LonLat::new(-84.396863, 33.792908)));
        assert_eq!(parse_lonlat(" 1.5 , -2 "), Ok(LonLat::new(1.5, -2.0)));
    }

    #[test]
    fn lonlat_argument_errors() {
        assert!(parse_lonlat("1.5").is_err());
        assert!(parse_lonlat("east,2").is_err());
        assert!(parse_lonlat("NaN,2").is_err());
    }

    #[test]
    fn csv_batch() {
        let csv = "from_lon, from_lat, to_lon, to_lat\n0,0,0,2\n-84.39,33.79,-84.38,33.78\n";
        let queries = read_queries(Cursor::new(csv)).unwrap();
        assert_eq!(
            queries,
            vec![
                (LonLat::new(0.0, 0.0), LonLat::new(0.0, 2.0)),
                (LonLat::new(-84.39, 33.79), LonLat::new(-84.38, 33.78)),
            ]
        );
    }

    #[test]
    fn csv_batch_bad_row() {
        let csv = "from_lon,from_lat,to_lon,to_lat\n0,0,0\n";
        let err = read_queries(Cursor::new(csv)).unwrap_err();
        assert!(err.to_string().contains("row 1"), "{err}");
    }
}

#[cfg(test)]
mod output {
    use gp_core::{LonLat, Segment};
    use gp_graph::{RouteError, find_shortest_path};

    use crate::output::{Format, write_batch, write_path};

    fn line() -> Vec<Segment> {
        vec![Segment::from([[0.0, 0.0], [0.0, 1.0]]), Segment::from([[0.0, 1.0], [0.0, 2.0]])]
    }

    #[test]
    fn path_as_json() {
        let path = find_shortest_path(&line(), LonLat::new(0.0, 0.0), LonLat::new(0.0, 2.0), 0.0).unwrap();
        let mut buf = Vec::new();
        write_path(&mut buf, Format::Json, &path).unwrap();

        let doc: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(doc["coordinates"], serde_json::json!([[0.0, 0.0], [0.0, 1.0], [0.0, 2.0]]));
        assert!((doc["distance_m"].as_f64().unwrap() - path.distance_m).abs() < 1e-9);
    }

    #[test]
    fn path_as_csv() {
        let path = find_shortest_path(&line(), LonLat::new(0.0, 0.0), LonLat::new(0.0, 2.0), 0.0).unwrap();
        let mut buf = Vec::new();
        write_path(&mut buf, Format::Csv, &path).unwrap();

        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines, vec!["seq,lon,lat", "0,0.0,0.0", "1,0.0,1.0", "2,0.0,2.0"]);
    }

    #[test]
    fn batch_reports_failures_inline() {
        let queries = vec![
            (LonLat::new(0.0, 0.0), LonLat::new(0.0, 2.0)),
            (LonLat::new(0.0, 0.0), LonLat::new(0.0, 1.0)),
        ];
        let ok = find_shortest_path(&line(), queries[0].0, queries[0].1, 0.0);
        let results = vec![ok, Err(RouteError::NoPath)];

        let mut buf = Vec::new();
        write_batch(&mut buf, Format::Json, &queries, &results).unwrap();
        let docs: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(docs[0]["index"], 0);
        assert!(docs[0]["error"].is_null());
        assert_eq!(docs[1]["error"], "no path");
        assert!(docs[1]["coordinates"].is_null());

        let mut buf = Vec::new();
        write_batch(&mut buf, Format::Csv, &queries, &results).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "index,from_lon,from_lat,to_lon,to_lat,distance_m,points,error");
        assert!(lines[1].ends_with(",3,"), "{}", lines[1]);
        assert_eq!(lines[2], "1,0.0,0.0,0.0,1.0,,,no path");
    }

    #[test]
    fn empty_csv_batch_keeps_header() {
        let mut buf = Vec::new();
        write_batch(&mut buf, Format::Csv, &[], &[]).unwrap();
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "index,from_lon,from_lat,to_lon,to_lat,distance_m,points,error\n"
        );
    }

    #[test]
    fn empty_json_batch_is_empty_array() {
        let mut buf = Vec::new();
        write_batch(&mut buf, Format::Json, &[], &[]).unwrap();
        let docs: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(docs, serde_json::json!([]));
    }
}

#[cfg(test)]
mod cli {
    use std::fs;
    use std::path::PathBuf;

    use clap::Parser;

    use crate::{Cli, run};

    const NETWORK: &str = r#"{ "type": "FeatureCollection", "features": [
        { "type": "Feature", "geometry": { "type": "LineString", "coordinates": [[0, 0], [0, 1]] } },
        { "type": "Feature", "geometry": { "type": "LineString", "coordinates": [[0, 1], [0, 2]] } },
        { "type": "Feature", "geometry": { "type": "LineString", "coordinates": [[5, 5], [5, 6]] } }
    ] }"#;

    fn network_file(tag: &str) -> PathBuf {
        let path = std::env::temp_dir()
            .join(format!("geopath-cli-{}-{tag}.geojson", std::process::id()));
        fs::write(&path, NETWORK).unwrap();
        path
    }

    #[test]
    fn single_query() {
        let net = network_file("single");
        let cli = Cli::try_parse_from([
            "geopath",
            net.to_str().unwrap(),
            "--from=0,0",
            "--to",
            "-0.0001,2.0001",
            "--format",
            "csv",
        ])
        .unwrap();

        let mut out = Vec::new();
        run(&cli, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.lines().count(), 5); // header + A, B, C, end
        fs::remove_file(net).ok();
    }

    #[test]
    fn unreachable_query_fails() {
        let net = network_file("unreachable");
        let cli = Cli::try_parse_from(["geopath", net.to_str().unwrap(), "--from=0,0", "--to=5,6"])
            .unwrap();
        let err = run(&cli, &mut Vec::new()).unwrap_err();
        assert!(format!("{err:#}").contains("no path"), "{err:#}");
        fs::remove_file(net).ok();
    }

    #[test]
    fn from_requires_to() {
        assert!(Cli::try_parse_from(["geopath", "net.geojson", "--from=0,0"]).is_err());
    }

    #[test]
    fn negative_precision_rejected() {
        let net = network_file("precision");
        let cli = Cli::try_parse_from([
            "geopath",
            net.to_str().unwrap(),
            "--from=0,0",
            "--to=0,2",
            "--precision=-1",
        ])
        .unwrap();
        assert!(run(&cli, &mut Vec::new()).is_err());
        fs::remove_file(net).ok();
    }
}
