//! Road network graph

use hashbrown::HashMap;
use petgraph::graph::{EdgeIndex, NodeIndex, UnGraph};
use petgraph::visit::EdgeRef;

use super::{Intersection, RoadSegment};
use crate::NodeId;

/// Undirected road graph as handed to the classifiers.
///
/// Built once by [`crate::loading::create_road_network`], which guarantees
/// that every segment connects two intersections of the same graph.
#[derive(Debug, Clone)]
pub struct RoadNetwork {
    pub graph: UnGraph<Intersection, RoadSegment>,
    node_lookup: HashMap<NodeId, NodeIndex>,
}

impl RoadNetwork {
    pub(crate) fn new(
        graph: UnGraph<Intersection, RoadSegment>,
        node_lookup: HashMap<NodeId, NodeIndex>,
    ) -> Self {
        Self { graph, node_lookup }
    }

    pub fn intersection_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn segment_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// A network without intersections or without segments has nothing to assess
    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0 || self.graph.edge_count() == 0
    }

    pub fn node_index(&self, id: NodeId) -> Option<NodeIndex> {
        self.node_lookup.get(&id).copied()
    }

    pub fn intersection(&self, id: NodeId) -> Option<&Intersection> {
        self.node_index(id).map(|idx| &self.graph[idx])
    }

    pub fn intersections(&self) -> impl Iterator<Item = &Intersection> {
        self.graph.node_weights()
    }

    pub fn segments(&self) -> impl Iterator<Item = &RoadSegment> {
        self.graph.edge_weights()
    }

    /// Roads leaving `node`, one per distinct neighbouring intersection.
    ///
    /// Parallel segments between the same pair collapse into the one with the
    /// lowest segment ID; loops back to `node` are skipped. Output is sorted by
    /// neighbour ID.
    pub fn distinct_roads(&self, node: NodeIndex) -> Vec<(NodeIndex, EdgeIndex)> {
        let mut by_neighbour: HashMap<NodeIndex, EdgeIndex> = HashMap::new();

        for edge in self.graph.edges(node) {
            let neighbour = if edge.source() == node {
                edge.target()
            } else {
                edge.source()
            };
            if neighbour == node {
                continue;
            }

            by_neighbour
                .entry(neighbour)
                .and_modify(|kept| {
                    if self.graph[edge.id()].id < self.graph[*kept].id {
                        *kept = edge.id();
                    }
                })
                .or_insert(edge.id());
        }

        let mut roads: Vec<_> = by_neighbour.into_iter().collect();
        roads.sort_unstable_by_key(|(neighbour, _)| self.graph[*neighbour].id);
        roads
    }

    /// Every segment touching `node`, loops and parallel segments included
    pub fn incident_segments(&self, node: NodeIndex) -> impl Iterator<Item = EdgeIndex> + '_ {
        self.graph.edges(node).map(|edge| edge.id())
    }
}
