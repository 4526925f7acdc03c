//! Plain-text rendering of an assessment.

use std::fmt::Write;

use chrono::{DateTime, Local};
use trafficlens_core::prelude::*;

const RULE_WIDTH: usize = 80;

/// # Errors
///
/// Returns an error if a section fails to format.
pub fn render(
    assessment: &TrafficAssessment,
    city: &str,
    generated: DateTime<Local>,
) -> Result<String, std::fmt::Error> {
    let mut out = String::new();
    write_report(&mut out, assessment, city, generated)?;
    Ok(out)
}

fn write_report(
    out: &mut String,
    assessment: &TrafficAssessment,
    city: &str,
    generated: DateTime<Local>,
) -> std::fmt::Result {
    let rule = "=".repeat(RULE_WIDTH);
    let stamp = generated.format("%Y-%m-%d %H:%M:%S");
    let network = &assessment.network;
    let classes = &assessment.intersection_classes;
    let count = |class: IntersectionClass| classes.get(&class).copied().unwrap_or_default();

    writeln!(out, "{rule}")?;
    writeln!(out, "    TRAFFIC ANALYSIS REPORT")?;
    writeln!(out, "    City: {}", city.to_uppercase())?;
    writeln!(out, "    Date: {stamp}")?;
    writeln!(out, "{rule}")?;

    writeln!(out)?;
    writeln!(out, "GENERAL INFORMATION")?;
    writeln!(out, "- Intersections: {}", network.intersections)?;
    writeln!(out, "- Street segments: {}", network.segments)?;
    writeln!(out, "- Named street segments: {}", network.named_segments)?;
    writeln!(out, "- Total network length: {:.1} km", network.total_length_km)?;

    writeln!(out)?;
    writeln!(out, "INTERSECTIONS")?;
    writeln!(
        out,
        "- Simple (2 or fewer roads): {}",
        count(IntersectionClass::DeadEnd) + count(IntersectionClass::PassThrough)
    )?;
    writeln!(out, "- T-junctions (3 roads): {}", count(IntersectionClass::TJunction))?;
    writeln!(
        out,
        "- Complex (4 or more roads): {}",
        count(IntersectionClass::CrossJunction) + count(IntersectionClass::ComplexJunction)
    )?;

    writeln!(out)?;
    writeln!(out, "ROAD TYPES")?;
    for (label, segments) in &network.highway_types {
        writeln!(out, "- {label}: {segments} segments")?;
    }
    for class in RoadClass::ALL {
        let segments = assessment.road_classes.get(&class).copied().unwrap_or_default();
        writeln!(out, "  {:<22} {segments}", class.label())?;
    }

    let signals = &assessment.signals;
    writeln!(out)?;
    writeln!(out, "TRAFFIC SIGNALS")?;
    writeln!(out, "- Mapped signals: {}", signals.observed)?;
    writeln!(out, "- Additional estimated signals: {}", signals.estimated_present)?;
    writeln!(out, "- Estimated total: {}", signals.total_present())?;
    if signals.unknown > 0 {
        writeln!(out, "- Unknown: {}", signals.unknown)?;
    }

    let time = &assessment.time;
    writeln!(out)?;
    writeln!(out, "TRAFFIC")?;
    writeln!(out, "- Assessed at: {}", time.context)?;
    writeln!(out, "- Period: {}", time.period)?;
    writeln!(out, "- Day type: {}", time.day_type.label())?;
    writeln!(
        out,
        "- Traffic level: {} ({})",
        assessment.level.label(),
        assessment.level.description()
    )?;
    writeln!(
        out,
        "- Score: {:.3} (structural {:.3}, time multiplier {:.2})",
        assessment.modulated_score, assessment.raw_score, time.multiplier
    )?;

    if !assessment.hotspots.is_empty() {
        writeln!(out)?;
        writeln!(out, "HOT-SPOTS")?;
        for hotspot in &assessment.hotspots {
            let road = hotspot.max_road_class.map_or("-", RoadClass::label);
            writeln!(
                out,
                "{:>3}. node {} ({:.5}, {:.5}) {}, {}, {}: {:.3}",
                hotspot.rank,
                hotspot.id,
                hotspot.coordinate[1],
                hotspot.coordinate[0],
                hotspot.class.label(),
                road,
                hotspot.signal.label(),
                hotspot.score
            )?;
        }
    }

    writeln!(out)?;
    writeln!(out, "SUMMARY")?;
    for line in &assessment.summary {
        writeln!(out, "{line}")?;
    }

    writeln!(out)?;
    writeln!(out, "METHODOLOGY")?;
    writeln!(out, "- Road network taken from OpenStreetMap data")?;
    writeln!(out, "- Intersections classified by the number of distinct roads they join")?;
    writeln!(out, "- Signals read from OSM tags and estimated at busy crossings")?;
    writeln!(out, "- Traffic estimated from road hierarchy and hourly patterns")?;

    writeln!(out)?;
    writeln!(out, "LIMITATIONS")?;
    writeln!(out, "- Traffic is estimated, not measured in real time")?;
    writeln!(out, "- OSM data quality varies between regions")?;
    writeln!(out, "- Part of the signals are estimated")?;
    writeln!(out, "- Events and incidents are not included")?;

    writeln!(out)?;
    writeln!(out, "RECOMMENDATIONS")?;
    writeln!(out, "- Results are most reliable in well-mapped urban areas")?;
    writeln!(out, "- For live traffic use an official traffic feed")?;
    writeln!(out, "- Check estimated signals on the ground")?;
    writeln!(out, "- Re-run the analysis periodically")?;

    writeln!(out)?;
    writeln!(out, "{rule}")?;
    writeln!(out, "Generated: {stamp}")?;
    writeln!(out, "{rule}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Weekday};
    use trafficlens_core::{RawEdge, RawNode};

    fn sample() -> TrafficAssessment {
        let raw = RawRoadGraph {
            nodes: vec![
                RawNode::new(1, 0.0, 0.0).with_tag("highway", "traffic_signals"),
                RawNode::new(2, 0.001, 0.0),
                RawNode::new(3, 0.0, 0.001),
                RawNode::new(4, -0.001, 0.0),
            ],
            edges: vec![
                RawEdge::new(1, 1, 2).with_tag("highway", "primary"),
                RawEdge::new(2, 1, 3).with_tag("highway", "residential"),
                RawEdge::new(3, 1, 4).with_tag("highway", "residential"),
            ],
        };
        assess(&raw, Some(TimeContext::new(18, Weekday::Fri).unwrap()), None).unwrap()
    }

    #[test]
    fn report_has_every_section() {
        let generated = Local.with_ymd_and_hms(2025, 3, 14, 18, 5, 0).unwrap();
        let text = render(&sample(), "Cali", generated).unwrap();

        for heading in [
            "CITY: CALI",
            "GENERAL INFORMATION",
            "INTERSECTIONS",
            "ROAD TYPES",
            "TRAFFIC SIGNALS",
            "HOT-SPOTS",
            "SUMMARY",
            "METHODOLOGY",
            "LIMITATIONS",
            "RECOMMENDATIONS",
        ] {
            assert!(text.to_uppercase().contains(heading), "missing {heading}");
        }
        assert!(text.contains("Date: 2025-03-14 18:05:00"));
        assert!(text.contains("- T-junctions (3 roads): 1"));
        assert!(text.contains("- Mapped signals: 1"));
        assert!(text.contains("- Period: Evening peak"));
    }
}
