//! Road network components - intersections and road segments

use geo::{LineString, Point};

use crate::model::Tags;
use crate::model::tags::{HIGHWAY, NAME};
use crate::{EdgeId, NodeId};

/// Road graph node
#[derive(Debug, Clone)]
pub struct Intersection {
    /// Map source ID of the node
    pub id: NodeId,
    /// Node coordinates (x = longitude, y = latitude)
    pub geometry: Point<f64>,
    /// Raw node tags
    pub tags: Tags,
    /// IDs of the road segments touching this node, ascending
    pub incident_edges: Vec<EdgeId>,
}

/// Road graph edge (road segment)
#[derive(Debug, Clone)]
pub struct RoadSegment {
    pub id: EdgeId,
    /// Endpoint intersections in the order the source listed them
    pub endpoints: (NodeId, NodeId),
    /// Raw segment tags
    pub tags: Tags,
    /// Optional polyline, oriented from the first endpoint to the second
    pub geometry: Option<LineString<f64>>,
    /// Length in metres
    pub length: f64,
}

impl RoadSegment {
    pub fn highway(&self) -> Option<&str> {
        self.tags.get(HIGHWAY)
    }

    pub fn name(&self) -> Option<&str> {
        self.tags.get(NAME)
    }

    /// Geometry vertices ordered so that the walk starts at `node`
    pub fn coords_from(&self, node: NodeId) -> Option<Vec<geo::Coord<f64>>> {
        let geometry = self.geometry.as_ref()?;
        let mut coords: Vec<_> = geometry.coords().copied().collect();
        if self.endpoints.0 != node {
            coords.reverse();
        }
        Some(coords)
    }
}
