//! Traffic signal presence, observed from tags or estimated from the
//! junction's shape and the roads feeding it

use std::collections::BTreeMap;

use petgraph::graph::NodeIndex;

use super::intersections::IntersectionProfile;
use super::road_types::RoadClassification;
use crate::model::tags::{CROSSING, HIGHWAY, TRAFFIC_SIGNALS};
use crate::model::{IntersectionClass, RoadClass, RoadNetwork, SignalStatus, Tags};

/// Node `highway` values the estimator understands
const KNOWN_NODE_HIGHWAY: [&str; 19] = [
    "traffic_signals",
    "stop",
    "give_way",
    "crossing",
    "mini_roundabout",
    "turning_circle",
    "turning_loop",
    "motorway_junction",
    "bus_stop",
    "street_lamp",
    "speed_camera",
    "elevator",
    "passing_place",
    "milestone",
    "traffic_mirror",
    "priority",
    "ford",
    "toll_gantry",
    "emergency_access_point",
];

/// Least severe road that makes a busy junction a signal candidate
const SIGNAL_ROAD_THRESHOLD: RoadClass = RoadClass::Primary;

#[derive(Debug, Clone, Default)]
pub struct SignalEstimation {
    /// Indexed by node index
    pub statuses: Vec<SignalStatus>,
    /// Node `highway` values outside the known vocabulary and their counts
    pub unrecognized: BTreeMap<String, usize>,
}

impl SignalEstimation {
    pub fn status_of(&self, node: NodeIndex) -> SignalStatus {
        self.statuses[node.index()]
    }

    pub fn count(&self, status: SignalStatus) -> usize {
        self.statuses.iter().filter(|s| **s == status).count()
    }
}

/// True when the map source marks the node as signalised
pub fn is_tagged_signal(tags: &Tags) -> bool {
    tags.is(HIGHWAY, TRAFFIC_SIGNALS) || tags.is(CROSSING, TRAFFIC_SIGNALS)
}

/// The inference rule for untagged intersections: a cross or complex
/// junction touching at least one primary-or-above road gets a signal.
/// Dead-ends and pass-throughs never do.
pub fn estimate_signal(
    class: IntersectionClass,
    max_incident_road: Option<RoadClass>,
) -> SignalStatus {
    let busy_junction = matches!(
        class,
        IntersectionClass::CrossJunction | IntersectionClass::ComplexJunction
    );
    let major_road = max_incident_road.is_some_and(|road| road >= SIGNAL_ROAD_THRESHOLD);

    if busy_junction && major_road {
        SignalStatus::EstimatedPresent
    } else {
        SignalStatus::EstimatedAbsent
    }
}

/// Resolves the signal status of every intersection, in node index order
pub fn estimate_signals(
    network: &RoadNetwork,
    profiles: &[IntersectionProfile],
    roads: &RoadClassification,
    estimate: bool,
) -> SignalEstimation {
    let mut estimation = SignalEstimation {
        statuses: Vec::with_capacity(profiles.len()),
        unrecognized: BTreeMap::new(),
    };

    for idx in network.graph.node_indices() {
        let intersection = &network.graph[idx];

        if let Some(highway) = intersection.tags.get(HIGHWAY)
            && !KNOWN_NODE_HIGHWAY.contains(&highway)
        {
            *estimation
                .unrecognized
                .entry(highway.to_string())
                .or_default() += 1;
        }

        let class = profiles[idx.index()].class;
        let status = if is_tagged_signal(&intersection.tags) {
            SignalStatus::Observed
        } else if !class.is_junction() {
            SignalStatus::EstimatedAbsent
        } else if !estimate {
            SignalStatus::Unknown
        } else {
            estimate_signal(class, roads.max_incident(network, idx))
        };
        estimation.statuses.push(status);
    }

    log::debug!(
        "Signals: {} observed, {} estimated present",
        estimation.count(SignalStatus::Observed),
        estimation.count(SignalStatus::EstimatedPresent)
    );
    estimation
}
