//! Road network model

pub mod components;
#[allow(clippy::module_inception)]
pub mod network;

pub use components::{Intersection, RoadSegment};
pub use network::RoadNetwork;
