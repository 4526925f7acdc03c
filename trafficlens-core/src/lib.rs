//! Traffic estimation over city road networks.
//!
//! The crate takes a road-network graph exported from a map source, classifies
//! its intersections and roads, estimates where traffic signals stand and
//! scores how congested the network is likely to be at a given hour and day.

pub mod analysis;
pub mod error;
pub mod loading;
pub mod model;
pub mod prelude;
pub mod report;

pub use analysis::{EngineConfig, ScoreWeights, TimeProfile, assess, assess_network};
pub use error::Error;
pub use loading::{RawEdge, RawNode, RawRoadGraph, create_road_network};
pub use model::{Intersection, RoadNetwork, RoadSegment, TimeContext};
pub use report::TrafficAssessment;

/// Identifier of an intersection as given by the map source (OSM node id)
pub type NodeId = i64;
/// Identifier of a road segment, unique within a graph snapshot
pub type EdgeId = u64;
/// Congestion-potential score
pub type Score = f64;
