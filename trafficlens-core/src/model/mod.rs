//! Data model for road network traffic estimation
//!
//! Contains the adapted road graph and the vocabulary the classifiers speak.

pub mod network;
pub mod tags;
pub mod time;
pub mod types;

pub use network::{Intersection, RoadNetwork, RoadSegment};
pub use tags::Tags;
pub use time::{DayType, TimeContext};
pub use types::{IntersectionClass, RoadClass, SignalStatus, TrafficLevel};
