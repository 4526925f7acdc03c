use geo::{Distance, Haversine, LineString, Point};
use hashbrown::{HashMap, HashSet};
use log::{debug, info};
use petgraph::graph::{NodeIndex, UnGraph};

use super::raw_types::{RawEdge, RawRoadGraph};
use crate::model::{Intersection, RoadNetwork, RoadSegment};
use crate::{EdgeId, Error, NodeId};

/// Adapts an externally supplied road graph into a [`RoadNetwork`]
///
/// # Errors
///
/// Returns [`Error::GraphIntegrity`] if a segment references an intersection
/// that is not part of the graph, and [`Error::DuplicateNode`] /
/// [`Error::DuplicateEdge`] if an identifier is reused.
pub fn create_road_network(raw: &RawRoadGraph) -> Result<RoadNetwork, Error> {
    let mut graph = UnGraph::with_capacity(raw.nodes.len(), raw.edges.len());
    let mut node_lookup: HashMap<NodeId, NodeIndex> = HashMap::with_capacity(raw.nodes.len());

    for node in &raw.nodes {
        if node_lookup.contains_key(&node.id) {
            return Err(Error::DuplicateNode(node.id));
        }
        let idx = graph.add_node(Intersection {
            id: node.id,
            geometry: Point::new(node.x, node.y),
            tags: node.tags.clone(),
            incident_edges: Vec::new(),
        });
        node_lookup.insert(node.id, idx);
    }

    let mut seen_edges: HashSet<EdgeId> = HashSet::with_capacity(raw.edges.len());
    let mut incident: HashMap<NodeIndex, Vec<EdgeId>> = HashMap::with_capacity(raw.nodes.len());

    for edge in &raw.edges {
        if !seen_edges.insert(edge.id) {
            return Err(Error::DuplicateEdge(edge.id));
        }

        let resolve = |id: NodeId| {
            node_lookup
                .get(&id)
                .copied()
                .ok_or(Error::GraphIntegrity {
                    edge: edge.id,
                    missing: id,
                })
        };
        let source = resolve(edge.u)?;
        let target = resolve(edge.v)?;

        let segment = create_segment(edge, graph[source].geometry, graph[target].geometry);
        graph.add_edge(source, target, segment);

        incident.entry(source).or_default().push(edge.id);
        if target != source {
            incident.entry(target).or_default().push(edge.id);
        }
    }

    for (idx, mut edges) in incident {
        edges.sort_unstable();
        graph[idx].incident_edges = edges;
    }

    info!(
        "Road network adapted: {} intersections, {} road segments",
        graph.node_count(),
        graph.edge_count()
    );

    Ok(RoadNetwork::new(graph, node_lookup))
}

fn create_segment(edge: &RawEdge, from: Point<f64>, to: Point<f64>) -> RoadSegment {
    let geometry = edge
        .geometry
        .as_ref()
        .filter(|coords| coords.len() >= 2)
        .map(|coords| {
            coords
                .iter()
                .map(|&[x, y]| (x, y))
                .collect::<LineString<f64>>()
        });

    let length = match edge.length {
        Some(length) if length.is_finite() && length >= 0.0 => length,
        Some(length) => {
            debug!(
                "Segment {} has unusable length {length}, measuring geometry instead",
                edge.id
            );
            measured_length(geometry.as_ref(), from, to)
        }
        None => measured_length(geometry.as_ref(), from, to),
    };

    RoadSegment {
        id: edge.id,
        endpoints: (edge.u, edge.v),
        tags: edge.tags.clone(),
        geometry,
        length,
    }
}

/// Great-circle length of the polyline, or of the straight line between the
/// endpoints when there is no polyline
fn measured_length(geometry: Option<&LineString<f64>>, from: Point<f64>, to: Point<f64>) -> f64 {
    match geometry {
        Some(line) => line
            .lines()
            .map(|segment| Haversine.distance(Point::from(segment.start), Point::from(segment.end)))
            .sum(),
        None => Haversine.distance(from, to),
    }
}
