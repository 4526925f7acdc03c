use std::path::PathBuf;

use anyhow::Context;
use chrono::Weekday;
use clap::Parser;
use trafficlens_core::TimeContext;

/// Estimate traffic conditions over a city road network
#[derive(Debug, Parser)]
#[command(name = "trafficlens", version, about)]
pub struct Flags {
    /// Road graph to analyse (JSON with `nodes` and `edges`)
    #[arg(long)]
    pub graph: PathBuf,

    /// Engine configuration (TOML); absent keys keep their defaults
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Hour of day to assess, 0-23
    #[arg(long, requires = "weekday", value_parser = clap::value_parser!(u8).range(0..=23))]
    pub hour: Option<u8>,

    /// Day of week to assess (mon, tue, ... or full names)
    #[arg(long, requires = "hour")]
    pub weekday: Option<Weekday>,

    /// City name shown in the report title
    #[arg(long, default_value = "Unnamed city")]
    pub city: String,

    /// Write the text report here instead of stdout
    #[arg(long)]
    pub report: Option<PathBuf>,

    /// Full assessment as JSON
    #[arg(long)]
    pub json: Option<PathBuf>,

    /// Intersection markers as GeoJSON
    #[arg(long)]
    pub geojson: Option<PathBuf>,

    /// Ranked hot-spots as CSV
    #[arg(long)]
    pub hotspots_csv: Option<PathBuf>,
}

impl Flags {
    /// `None` lets the engine read the local clock.
    pub fn time_context(&self) -> anyhow::Result<Option<TimeContext>> {
        match (self.hour, self.weekday) {
            (Some(hour), Some(weekday)) => TimeContext::new(hour, weekday)
                .map(Some)
                .context("invalid --hour"),
            _ => Ok(None),
        }
    }
}
