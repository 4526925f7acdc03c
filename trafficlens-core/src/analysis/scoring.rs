//! Congestion-potential scores, time modulation and hot-spot ranking

use std::cmp::Ordering;

use petgraph::graph::NodeIndex;

use super::config::{EngineConfig, ScoreWeights};
use super::intersections::IntersectionProfile;
use super::road_types::RoadClassification;
use super::signals::SignalEstimation;
use super::time_profile::TimeModulation;
use crate::model::{
    IntersectionClass, RoadClass, RoadNetwork, SignalStatus, TimeContext, TrafficLevel,
};
use crate::{NodeId, Score};

/// Scores of one network at one point in time
#[derive(Debug, Clone)]
pub struct NetworkScores {
    /// Raw score of every intersection, indexed by node index
    pub scores: Vec<Score>,
    /// Most severe road at every intersection, indexed by node index
    pub max_roads: Vec<Option<RoadClass>>,
    /// Mean raw score over every intersection that is not a dead-end
    pub raw_average: Score,
    pub modulation: TimeModulation,
    pub modulated_average: Score,
    pub level: TrafficLevel,
    /// Best ranked first
    pub hotspots: Vec<NodeIndex>,
}

pub fn congestion_score(
    weights: &ScoreWeights,
    class: IntersectionClass,
    signal: SignalStatus,
    max_road: Option<RoadClass>,
) -> Score {
    let signal_bonus = if signal.has_signal() { 1.0 } else { 0.0 };
    let road_severity = max_road.map_or(0.0, RoadClass::severity);

    weights.w1 * class.complexity_weight() + weights.w2 * signal_bonus + weights.w3 * road_severity
}

/// Descending score, then ascending ID. `total_cmp` keeps the order total.
fn hotspot_order(a: (NodeId, Score), b: (NodeId, Score)) -> Ordering {
    b.1.total_cmp(&a.1).then(a.0.cmp(&b.0))
}

/// Top `count` candidates by score
pub fn rank_hotspots(mut candidates: Vec<(NodeId, Score)>, count: usize) -> Vec<(NodeId, Score)> {
    candidates.sort_unstable_by(|a, b| hotspot_order(*a, *b));
    candidates.truncate(count);
    candidates
}

pub fn score_network(
    network: &RoadNetwork,
    profiles: &[IntersectionProfile],
    roads: &RoadClassification,
    signals: &SignalEstimation,
    time: &TimeContext,
    config: &EngineConfig,
) -> NetworkScores {
    let max_roads: Vec<Option<RoadClass>> = network
        .graph
        .node_indices()
        .map(|idx| roads.max_incident(network, idx))
        .collect();

    let scores: Vec<Score> = network
        .graph
        .node_indices()
        .map(|idx| {
            congestion_score(
                &config.weights,
                profiles[idx.index()].class,
                signals.status_of(idx),
                max_roads[idx.index()],
            )
        })
        .collect();

    let scored: Vec<NodeIndex> = network
        .graph
        .node_indices()
        .filter(|idx| profiles[idx.index()].class.is_scored())
        .collect();

    #[allow(clippy::cast_precision_loss)]
    let raw_average = if scored.is_empty() {
        0.0
    } else {
        scored.iter().map(|idx| scores[idx.index()]).sum::<Score>() / scored.len() as Score
    };

    let modulation = config.time_profile.modulation(time);
    let modulated_average = raw_average * modulation.multiplier;
    let level = TrafficLevel::from_score(modulated_average);

    let ranked = rank_hotspots(
        scored
            .iter()
            .map(|idx| (network.graph[*idx].id, scores[idx.index()]))
            .collect(),
        config.hotspot_count,
    );
    let hotspots = ranked
        .into_iter()
        .filter_map(|(id, _)| network.node_index(id))
        .collect();

    log::info!(
        "Network score {raw_average:.3} x {:.2} ({}, {}) = {modulated_average:.3}: {level}",
        modulation.multiplier,
        modulation.period,
        modulation.day_type.label()
    );

    NetworkScores {
        scores,
        max_roads,
        raw_average,
        modulation,
        modulated_average,
        level,
        hotspots,
    }
}
