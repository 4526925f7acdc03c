use std::collections::BTreeMap;

use hashbrown::HashMap;
use itertools::Itertools;
use log::{info, warn};

use super::assessment::{
    Hotspot, IntersectionAssessment, NetworkStatistics, SignalSummary, TagKind, TimeSummary,
    TrafficAssessment, UnrecognizedTagWarning,
};
use super::narrative::summarize;
use crate::Error;
use crate::analysis::road_types::highway_label;
use crate::analysis::{IntersectionProfile, NetworkScores, RoadClassification, SignalEstimation};
use crate::model::{IntersectionClass, RoadNetwork, SignalStatus, TimeContext};

const TOP_HIGHWAY_TYPES: usize = 10;

/// Collects the stage outputs into the final result. Counting and formatting
/// only.
pub(crate) fn assemble(
    network: &RoadNetwork,
    profiles: &[IntersectionProfile],
    roads: &RoadClassification,
    signals: &SignalEstimation,
    scores: &NetworkScores,
    time: TimeContext,
) -> Result<TrafficAssessment, Error> {
    if network.is_empty() {
        return Err(Error::EmptyNetwork);
    }

    let intersections: Vec<IntersectionAssessment> = network
        .graph
        .node_indices()
        .map(|idx| {
            let node = &network.graph[idx];
            IntersectionAssessment {
                id: node.id,
                coordinate: [node.geometry.x(), node.geometry.y()],
                incident_edges: node.incident_edges.clone(),
                degree: profiles[idx.index()].degree,
                class: profiles[idx.index()].class,
                signal: signals.status_of(idx),
                max_road_class: scores.max_roads[idx.index()],
                score: scores.scores[idx.index()],
            }
        })
        .collect();

    let hotspots: Vec<Hotspot> = scores
        .hotspots
        .iter()
        .enumerate()
        .map(|(position, idx)| {
            let record = &intersections[idx.index()];
            Hotspot {
                rank: position + 1,
                id: record.id,
                coordinate: record.coordinate,
                class: record.class,
                signal: record.signal,
                max_road_class: record.max_road_class,
                score: record.score,
            }
        })
        .collect();

    let mut intersection_classes: BTreeMap<IntersectionClass, usize> = IntersectionClass::ALL
        .iter()
        .map(|class| (*class, 0))
        .collect();
    for profile in profiles {
        *intersection_classes.entry(profile.class).or_default() += 1;
    }

    let signal_summary = SignalSummary {
        observed: signals.count(SignalStatus::Observed),
        estimated_present: signals.count(SignalStatus::EstimatedPresent),
        estimated_absent: signals.count(SignalStatus::EstimatedAbsent),
        unknown: signals.count(SignalStatus::Unknown),
    };

    let warnings = collect_warnings(roads, signals);
    for warning in &warnings {
        warn!(
            "Unrecognized {:?} tag '{}' on {} elements, default applied",
            warning.kind, warning.value, warning.count
        );
    }

    let time = TimeSummary {
        context: time,
        period: scores.modulation.period.clone(),
        day_type: scores.modulation.day_type,
        multiplier: scores.modulation.multiplier,
    };

    let mut assessment = TrafficAssessment {
        level: scores.level,
        time,
        raw_score: scores.raw_average,
        modulated_score: scores.modulated_average,
        road_classes: roads.distribution(),
        intersection_classes,
        signals: signal_summary,
        hotspots,
        intersections,
        network: network_statistics(network),
        warnings,
        summary: Vec::new(),
    };
    assessment.summary = summarize(&assessment);

    info!(
        "Assessment ready: level {}, {} hot-spots, {} signals ({} observed)",
        assessment.level,
        assessment.hotspots.len(),
        assessment.signals.total_present(),
        assessment.signals.observed
    );
    Ok(assessment)
}

/// Road warnings first, then signal warnings; each by count descending
fn collect_warnings(
    roads: &RoadClassification,
    signals: &SignalEstimation,
) -> Vec<UnrecognizedTagWarning> {
    let road = roads.unrecognized.iter().map(|(value, count)| (TagKind::Road, value, *count));
    let signal = signals
        .unrecognized
        .iter()
        .map(|(value, count)| (TagKind::Signal, value, *count));

    road.chain(signal)
        .sorted_by(|a, b| a.0.cmp(&b.0).then(b.2.cmp(&a.2)).then(a.1.cmp(b.1)))
        .map(|(kind, value, count)| UnrecognizedTagWarning {
            kind,
            value: value.clone(),
            count,
        })
        .collect()
}

fn network_statistics(network: &RoadNetwork) -> NetworkStatistics {
    let mut highway_counts: HashMap<String, usize> = HashMap::new();
    let mut named_segments = 0;
    let mut total_length = 0.0;

    for segment in network.segments() {
        let label = highway_label(segment.highway().unwrap_or("unknown"));
        *highway_counts.entry(label).or_default() += 1;

        if segment.name().is_some() {
            named_segments += 1;
        }
        total_length += segment.length;
    }

    let highway_types = highway_counts
        .into_iter()
        .sorted_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)))
        .take(TOP_HIGHWAY_TYPES)
        .collect();

    NetworkStatistics {
        intersections: network.intersection_count(),
        segments: network.segment_count(),
        named_segments,
        total_length_km: (total_length / 100.0).round() / 10.0,
        highway_types,
    }
}
