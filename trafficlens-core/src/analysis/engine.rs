use log::info;

use super::config::EngineConfig;
use super::intersections::classify_intersections;
use super::road_types::classify_roads;
use super::scoring::score_network;
use super::signals::estimate_signals;
use crate::Error;
use crate::loading::{RawRoadGraph, create_road_network};
use crate::model::{RoadNetwork, TimeContext};
use crate::report::{TrafficAssessment, assemble};

/// Runs the whole estimation pipeline on an externally supplied graph.
///
/// `time` defaults to the local clock and `config` to
/// [`EngineConfig::default`]. Given the same graph, time and configuration the
/// result is always the same.
///
/// # Errors
///
/// - [`Error::InvalidConfig`] before the graph is touched
/// - [`Error::GraphIntegrity`], [`Error::DuplicateNode`],
///   [`Error::DuplicateEdge`] from adapting the graph
/// - [`Error::EmptyNetwork`] if there is nothing to assess
pub fn assess(
    graph: &RawRoadGraph,
    time: Option<TimeContext>,
    config: Option<&EngineConfig>,
) -> Result<TrafficAssessment, Error> {
    let config = config.cloned().unwrap_or_default();
    config.validate()?;

    let time = time.unwrap_or_else(TimeContext::now);
    let network = create_road_network(graph)?;

    run_pipeline(&network, time, &config)
}

/// Same as [`assess`] for a network that was adapted already
///
/// # Errors
///
/// [`Error::InvalidConfig`] or [`Error::EmptyNetwork`]
pub fn assess_network(
    network: &RoadNetwork,
    time: TimeContext,
    config: &EngineConfig,
) -> Result<TrafficAssessment, Error> {
    config.validate()?;
    run_pipeline(network, time, config)
}

fn run_pipeline(
    network: &RoadNetwork,
    time: TimeContext,
    config: &EngineConfig,
) -> Result<TrafficAssessment, Error> {
    if network.is_empty() {
        return Err(Error::EmptyNetwork);
    }

    info!(
        "Assessing {} intersections and {} road segments for {time}",
        network.intersection_count(),
        network.segment_count()
    );

    // Intersections and roads are classified independently of each other
    let (profiles, roads) = rayon::join(
        || classify_intersections(network, config.angle_colinearity_threshold_deg),
        || classify_roads(network),
    );

    let signals = estimate_signals(network, &profiles, &roads, config.estimate_signals);
    let scores = score_network(network, &profiles, &roads, &signals, &time, config);

    assemble(network, &profiles, &roads, &signals, &scores, time)
}
