//! Aggregation of the analysis stages into a [`TrafficAssessment`], plus the
//! exports the report and map renderers read.

mod assembler;
mod assessment;
mod hotspots_csv;
mod narrative;
mod to_geojson;

pub(crate) use assembler::assemble;
pub use assessment::{
    Hotspot, IntersectionAssessment, NetworkStatistics, SignalSummary, TagKind, TimeSummary,
    TrafficAssessment, UnrecognizedTagWarning,
};
pub use narrative::summarize;
