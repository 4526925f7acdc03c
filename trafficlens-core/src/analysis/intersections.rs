//! Intersection complexity from degree and road geometry

use geo::{Bearing, Haversine, Point};
use itertools::Itertools;
use petgraph::graph::{EdgeIndex, NodeIndex};
use rayon::prelude::*;

use crate::model::{IntersectionClass, RoadNetwork};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntersectionProfile {
    /// Distinct roads meeting at the node
    pub degree: usize,
    pub class: IntersectionClass,
}

/// Classifies every intersection, in node index order
pub fn classify_intersections(
    network: &RoadNetwork,
    colinearity_threshold_deg: f64,
) -> Vec<IntersectionProfile> {
    (0..network.intersection_count())
        .into_par_iter()
        .map(|idx| classify_intersection(network, NodeIndex::new(idx), colinearity_threshold_deg))
        .collect()
}

pub fn classify_intersection(
    network: &RoadNetwork,
    node: NodeIndex,
    colinearity_threshold_deg: f64,
) -> IntersectionProfile {
    let roads = network.distinct_roads(node);
    let degree = roads.len();
    let mut class = IntersectionClass::from_degree(degree);

    // Map sources leave three-way slivers where a road kinks; those carry
    // through traffic only.
    if class == IntersectionClass::TJunction {
        let bearings: Option<Vec<f64>> = roads
            .iter()
            .map(|&(neighbour, edge)| road_bearing(network, node, neighbour, edge))
            .collect();

        if bearings.is_some_and(|b| mutually_colinear(&b, colinearity_threshold_deg)) {
            class = IntersectionClass::PassThrough;
        }
    }

    IntersectionProfile { degree, class }
}

/// Bearing in degrees from `node` along the road `edge`, towards the first
/// geometry vertex that is not the node itself, or towards `neighbour` if the
/// segment has no usable geometry. `None` when every candidate coincides with
/// the node.
fn road_bearing(
    network: &RoadNetwork,
    node: NodeIndex,
    neighbour: NodeIndex,
    edge: EdgeIndex,
) -> Option<f64> {
    let here = network.graph[node].geometry;
    let segment = &network.graph[edge];

    let towards = segment
        .coords_from(network.graph[node].id)
        .and_then(|coords| coords.into_iter().map(Point::from).find(|p| *p != here))
        .or_else(|| {
            let there = network.graph[neighbour].geometry;
            (there != here).then_some(there)
        })?;

    Some(Haversine.bearing(here, towards))
}

/// Smallest angle between the lines carrying two bearings, in [0, 90]
fn colinearity_deviation(a: f64, b: f64) -> f64 {
    let diff = (a - b).rem_euclid(360.0);
    let diff = if diff > 180.0 { 360.0 - diff } else { diff };
    diff.min(180.0 - diff)
}

fn mutually_colinear(bearings: &[f64], threshold_deg: f64) -> bool {
    bearings
        .iter()
        .tuple_combinations()
        .all(|(a, b)| colinearity_deviation(*a, *b) <= threshold_deg)
}
