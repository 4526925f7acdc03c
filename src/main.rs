mod cli;
mod report;

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use anyhow::Context;
use chrono::Local;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;
use trafficlens_core::{EngineConfig, RawRoadGraph, assess};

use crate::cli::Flags;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    run(&Flags::parse())
}

fn run(flags: &Flags) -> anyhow::Result<()> {
    let config = match &flags.config {
        Some(path) => load_config(path)?,
        None => EngineConfig::default(),
    };
    let time = flags.time_context()?;

    let file = File::open(&flags.graph)
        .with_context(|| format!("failed to open road graph {}", flags.graph.display()))?;
    let raw = RawRoadGraph::from_json_reader(BufReader::new(file))
        .with_context(|| format!("failed to parse road graph {}", flags.graph.display()))?;
    info!(
        nodes = raw.nodes.len(),
        edges = raw.edges.len(),
        "road graph loaded"
    );

    let assessment = assess(&raw, time, Some(&config)).context("traffic assessment failed")?;
    info!(
        level = assessment.level.label(),
        score = assessment.modulated_score,
        "assessment finished"
    );

    let text = report::render(&assessment, &flags.city, Local::now())
        .context("failed to render report")?;
    match &flags.report {
        Some(path) => write_file(path, text.as_bytes())?,
        None => print!("{text}"),
    }

    if let Some(path) = &flags.json {
        write_file(path, assessment.to_json_string()?.as_bytes())?;
    }
    if let Some(path) = &flags.geojson {
        write_file(path, assessment.to_geojson_string()?.as_bytes())?;
    }
    if let Some(path) = &flags.hotspots_csv {
        let file = File::create(path)
            .with_context(|| format!("failed to create {}", path.display()))?;
        let mut writer = BufWriter::new(file);
        assessment.write_hotspots_csv(&mut writer)?;
        writer.flush()?;
        info!(path = %path.display(), "hot-spots written");
    }

    Ok(())
}

fn load_config(path: &Path) -> anyhow::Result<EngineConfig> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    let config: EngineConfig =
        toml::from_str(&text).with_context(|| format!("invalid config {}", path.display()))?;
    Ok(config)
}

fn write_file(path: &Path, contents: &[u8]) -> anyhow::Result<()> {
    fs::write(path, contents).with_context(|| format!("failed to write {}", path.display()))?;
    info!(path = %path.display(), "written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsString;

    const GRAPH: &str = r#"{
        "nodes": [
            {"id": 1, "x": 0.0, "y": 0.0, "tags": {"highway": "traffic_signals"}},
            {"id": 2, "x": 0.001, "y": 0.0},
            {"id": 3, "x": 0.0, "y": 0.001},
            {"id": 4, "x": -0.001, "y": 0.0},
            {"id": 5, "x": 0.0, "y": -0.001}
        ],
        "edges": [
            {"id": 1, "u": 1, "v": 2, "tags": {"highway": "primary", "name": "Avenida 6"}},
            {"id": 2, "u": 1, "v": 3, "tags": {"highway": "residential"}},
            {"id": 3, "u": 1, "v": 4, "tags": {"highway": "residential"}},
            {"id": 4, "u": 1, "v": 5}
        ]
    }"#;

    #[test]
    fn writes_every_requested_output() {
        let dir = tempfile::tempdir().unwrap();
        let graph = dir.path().join("graph.json");
        fs::write(&graph, GRAPH).unwrap();
        let config = dir.path().join("engine.toml");
        fs::write(&config, "hotspot_count = 2\n\n[weights]\nw1 = 0.6\n").unwrap();

        let out = |name: &str| dir.path().join(name);
        let mut args: Vec<OsString> = [
            "trafficlens",
            "--hour",
            "8",
            "--weekday",
            "mon",
            "--city",
            "Cali",
        ]
        .into_iter()
        .map(OsString::from)
        .collect();
        for (flag, path) in [
            ("--graph", graph),
            ("--config", config),
            ("--report", out("report.txt")),
            ("--json", out("assessment.json")),
            ("--geojson", out("markers.geojson")),
            ("--hotspots-csv", out("hotspots.csv")),
        ] {
            args.push(flag.into());
            args.push(path.into_os_string());
        }
        let flags = Flags::try_parse_from(args).unwrap();

        run(&flags).unwrap();

        let report = fs::read_to_string(out("report.txt")).unwrap();
        assert!(report.contains("City: CALI"));
        let json: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(out("assessment.json")).unwrap()).unwrap();
        assert_eq!(json["network"]["intersections"], 5);
        assert!(fs::read_to_string(out("markers.geojson")).unwrap().contains("FeatureCollection"));
        let csv = fs::read_to_string(out("hotspots.csv")).unwrap();
        assert_eq!(csv.lines().count(), 2);
    }

    #[test]
    fn partial_config_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("engine.toml");
        fs::write(&path, "estimate_signals = false\n").unwrap();

        let config = load_config(&path).unwrap();
        assert!(!config.estimate_signals);
        assert_eq!(config.hotspot_count, EngineConfig::default().hotspot_count);
        assert_eq!(config.weights, EngineConfig::default().weights);
    }

    #[test]
    fn missing_graph_reports_the_path() {
        let flags =
            Flags::try_parse_from(["trafficlens", "--graph", "/nonexistent/graph.json"]).unwrap();
        let message = format!("{:#}", run(&flags).unwrap_err());
        assert!(message.contains("/nonexistent/graph.json"));
    }
}
