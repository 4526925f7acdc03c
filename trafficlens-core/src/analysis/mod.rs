//! Classification and scoring stages of the traffic estimation pipeline
//!
//! Intersections and roads are classified independently, signals are
//! estimated from both, and the scorer turns all three into per-intersection
//! congestion scores and a network-wide level.

mod config;
mod engine;
pub mod intersections;
pub mod road_types;
pub mod scoring;
pub mod signals;
mod time_profile;

pub use config::{EngineConfig, ScoreWeights};
pub use engine::{assess, assess_network};
pub use intersections::{IntersectionProfile, classify_intersections};
pub use road_types::{RoadClassification, classify_roads};
pub use scoring::NetworkScores;
pub use signals::{SignalEstimation, estimate_signals};
pub use time_profile::{DayFactors, HourBucket, MultiplierRange, TimeModulation, TimeProfile};
