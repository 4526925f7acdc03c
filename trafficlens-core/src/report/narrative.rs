//! Template rules turning an assessment into readable conclusions

use std::collections::BTreeMap;

use super::assessment::{TagKind, TrafficAssessment};
use crate::model::{IntersectionClass, RoadClass, TrafficLevel};

/// Class with the highest count. Ties go to the class that sorts last, which
/// for both class enums is the more severe one.
fn dominant<K: Copy + Ord>(counts: &BTreeMap<K, usize>) -> Option<K> {
    counts
        .iter()
        .filter(|(_, count)| **count > 0)
        .max_by(|a, b| a.1.cmp(b.1).then(a.0.cmp(b.0)))
        .map(|(class, _)| *class)
}

fn plural(label: &str) -> String {
    format!("{}s", label.to_lowercase())
}

fn level_sentence(assessment: &TrafficAssessment) -> String {
    let when = format!(
        "{}, {}",
        assessment.time.period.to_lowercase(),
        assessment.time.day_type.label().to_lowercase()
    );
    match assessment.level {
        TrafficLevel::Severe => format!(
            "Severe congestion expected ({when}): queues are likely at most major junctions."
        ),
        TrafficLevel::High => format!(
            "High traffic expected ({when}): congestion is likely along arterial corridors."
        ),
        TrafficLevel::Moderate => format!(
            "Moderate traffic expected ({when}): steady flow with occasional delays at busy junctions."
        ),
        TrafficLevel::Low => {
            format!("Low traffic expected ({when}): free flow across most of the network.")
        }
    }
}

fn composition_sentence(road: RoadClass, junction: Option<IntersectionClass>) -> String {
    let road_label = road.label().to_lowercase();
    let Some(junction) = junction else {
        return format!(
            "No true junctions found: the network is made of {road_label} roads joined by dead-ends and pass-through nodes."
        );
    };
    let junctions = plural(junction.label());
    let crossing = junction >= IntersectionClass::CrossJunction;

    match road {
        RoadClass::Motorway | RoadClass::Primary if crossing => format!(
            "Arterial grid: {road_label} roads meeting at {junctions} concentrate flow, so signal timing drives delay."
        ),
        RoadClass::Motorway | RoadClass::Primary => format!(
            "{} corridors dominate, fed mostly through {junctions}; merges are the likely pinch points.",
            road.label()
        ),
        RoadClass::Secondary | RoadClass::Tertiary if crossing => format!(
            "Collector network of {road_label} roads with frequent {junctions}: expect stop-and-go flow."
        ),
        RoadClass::Secondary | RoadClass::Tertiary => format!(
            "Collector network of {road_label} roads where most junctions are {junctions}."
        ),
        _ if crossing => format!(
            "Mostly {road_label} streets laid out as a grid of {junctions}: local traffic spreads over many routes."
        ),
        _ => format!(
            "Mostly {road_label} streets with {junctions}: traffic concentrates on the few through roads."
        ),
    }
}

fn signal_sentence(assessment: &TrafficAssessment) -> String {
    let signals = &assessment.signals;
    if signals.unknown > 0 {
        format!(
            "{} traffic signals are mapped; signal presence at the other {} intersections was not estimated.",
            signals.observed, signals.unknown
        )
    } else {
        format!(
            "{} traffic signals are mapped and {} more are estimated at busy junctions ({} in total); estimated signals should be verified on site.",
            signals.observed,
            signals.estimated_present,
            signals.total_present()
        )
    }
}

/// Conclusions keyed on the level and the dominant road and junction classes
pub fn summarize(assessment: &TrafficAssessment) -> Vec<String> {
    let mut summary = vec![level_sentence(assessment)];

    let junction_counts: BTreeMap<IntersectionClass, usize> = assessment
        .intersection_classes
        .iter()
        .filter(|(class, _)| class.is_junction())
        .map(|(class, count)| (*class, *count))
        .collect();
    if let Some(road) = dominant(&assessment.road_classes) {
        summary.push(composition_sentence(road, dominant(&junction_counts)));
    }

    summary.push(signal_sentence(assessment));

    if let Some(top) = assessment.hotspots.first() {
        let road = top
            .max_road_class
            .map_or_else(|| "no".to_string(), |road| road.label().to_lowercase());
        summary.push(format!(
            "Top hot-spot: intersection {} ({}, {road} road, score {:.2}).",
            top.id,
            top.class.label().to_lowercase(),
            top.score
        ));
    }

    let road_fallbacks = assessment.warning_count(TagKind::Road);
    if road_fallbacks > 0 {
        summary.push(format!(
            "{road_fallbacks} road segments had a missing or unrecognized highway tag and were treated as residential."
        ));
    }
    let signal_tags = assessment.warning_count(TagKind::Signal);
    if signal_tags > 0 {
        summary.push(format!(
            "{signal_tags} intersections carried unrecognized node highway tags; they were ignored for signal detection."
        ));
    }

    summary
}
