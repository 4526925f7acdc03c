//! This module is responsible for adapting road-network graphs exported by
//! external map sources into the [`RoadNetwork`](crate::RoadNetwork) model.

mod builder;
mod de;
mod raw_types;

pub use builder::create_road_network;
pub use raw_types::{RawEdge, RawNode, RawRoadGraph};
