use chrono::Weekday;
use trafficlens_core::prelude::*;
use trafficlens_core::report::TagKind;
use trafficlens_core::{RawEdge, RawNode};

fn peak() -> TimeContext {
    TimeContext::new(8, Weekday::Tue).unwrap()
}

/// A-B motorway, B-C / B-D / B-E residential, C-F residential.
/// B carries a signal tag; C is a plain bend.
fn crossroads() -> RawRoadGraph {
    RawRoadGraph {
        nodes: vec![
            RawNode::new(1, 0.001, 0.0),
            RawNode::new(2, 0.0, 0.0).with_tag("highway", "traffic_signals"),
            RawNode::new(3, 0.0, 0.001),
            RawNode::new(4, -0.001, 0.0),
            RawNode::new(5, 0.0, -0.001),
            RawNode::new(6, 0.0, 0.002),
        ],
        edges: vec![
            RawEdge::new(10, 1, 2).with_tag("highway", "motorway"),
            RawEdge::new(11, 2, 3).with_tag("highway", "residential"),
            RawEdge::new(12, 2, 4).with_tag("highway", "residential"),
            RawEdge::new(13, 2, 5).with_tag("highway", "residential"),
            RawEdge::new(14, 3, 6).with_tag("highway", "residential"),
        ],
    }
}

/// `size` x `size` lattice; row 0 is a primary road, everything else residential
fn grid(size: i64) -> RawRoadGraph {
    let id = |row: i64, col: i64| row * size + col + 1;
    let mut raw = RawRoadGraph::default();
    let mut edge_id = 0;

    for row in 0..size {
        for col in 0..size {
            #[allow(clippy::cast_precision_loss)]
            raw.nodes
                .push(RawNode::new(id(row, col), col as f64 * 0.001, row as f64 * 0.001));
        }
    }
    for row in 0..size {
        for col in 0..size {
            let highway = if row == 0 { "primary" } else { "residential" };
            if col + 1 < size {
                edge_id += 1;
                raw.edges.push(
                    RawEdge::new(edge_id, id(row, col), id(row, col + 1))
                        .with_tag("highway", highway),
                );
            }
            if row + 1 < size {
                edge_id += 1;
                raw.edges.push(
                    RawEdge::new(edge_id, id(row, col), id(row + 1, col))
                        .with_tag("highway", "residential"),
                );
            }
        }
    }
    raw
}

#[test]
fn signalised_crossroads_outranks_a_bend() {
    let assessment = assess(&crossroads(), Some(peak()), None).unwrap();

    let b = assessment.intersection(2).unwrap();
    assert_eq!(b.degree, 4);
    assert_eq!(b.class, IntersectionClass::CrossJunction);
    assert_eq!(b.signal, SignalStatus::Observed);
    assert_eq!(b.max_road_class, Some(RoadClass::Motorway));

    let c = assessment.intersection(3).unwrap();
    assert_eq!(c.class, IntersectionClass::PassThrough);
    assert!(b.score > c.score);

    assert_eq!(assessment.hotspots[0].id, 2);
    assert_eq!(assessment.hotspots[0].rank, 1);
    assert_eq!(assessment.signals.observed, 1);
    assert_eq!(assessment.intersection_classes[&IntersectionClass::DeadEnd], 4);
}

#[test]
fn empty_graph_has_no_assessment() {
    let result = assess(&RawRoadGraph::default(), Some(peak()), None);
    assert!(matches!(result, Err(Error::EmptyNetwork)));

    let nodes_only = RawRoadGraph {
        nodes: vec![RawNode::new(1, 0.0, 0.0)],
        edges: Vec::new(),
    };
    assert!(matches!(
        assess(&nodes_only, Some(peak()), None),
        Err(Error::EmptyNetwork)
    ));
}

#[test]
fn missing_highway_tag_falls_back_and_is_counted() {
    let raw = RawRoadGraph {
        nodes: vec![
            RawNode::new(1, 0.0, 0.0),
            RawNode::new(2, 0.001, 0.0),
            RawNode::new(3, 0.002, 0.0),
        ],
        edges: vec![
            RawEdge::new(1, 1, 2).with_tag("highway", "motorway"),
            RawEdge::new(2, 2, 3),
        ],
    };
    let assessment = assess(&raw, Some(peak()), None).unwrap();

    assert_eq!(assessment.road_classes[&RoadClass::Motorway], 1);
    assert_eq!(assessment.road_classes[&RoadClass::Residential], 1);
    assert_eq!(assessment.warning_count(TagKind::Road), 1);
    assert_eq!(assessment.warnings[0].value, "<missing>");
    assert!(
        assessment
            .summary
            .iter()
            .any(|line| line.contains("treated as residential"))
    );
}

#[test]
fn dangling_segment_is_fatal() {
    let mut raw = crossroads();
    raw.edges.push(RawEdge::new(99, 6, 404));

    match assess(&raw, Some(peak()), None) {
        Err(Error::GraphIntegrity { edge, missing }) => {
            assert_eq!(edge, 99);
            assert_eq!(missing, 404);
        }
        other => panic!("expected integrity error, got {other:?}"),
    }
}

#[test]
fn configuration_is_checked_before_the_graph() {
    let mut raw = crossroads();
    raw.edges.push(RawEdge::new(99, 6, 404));
    let config = EngineConfig {
        hotspot_count: 0,
        ..EngineConfig::default()
    };

    assert!(matches!(
        assess(&raw, Some(peak()), Some(&config)),
        Err(Error::InvalidConfig(_))
    ));
}

#[test]
fn repeated_runs_are_identical() {
    let raw = grid(6);
    let first = assess(&raw, Some(peak()), None).unwrap();
    let second = assess(&raw, Some(peak()), None).unwrap();
    assert_eq!(first, second);
}

#[test]
fn hotspots_form_a_total_order() {
    let config = EngineConfig {
        hotspot_count: 7,
        ..EngineConfig::default()
    };
    let assessment = assess(&grid(5), Some(peak()), Some(&config)).unwrap();

    assert_eq!(assessment.hotspots.len(), 7);
    for (position, pair) in assessment.hotspots.windows(2).enumerate() {
        assert_eq!(pair[0].rank, position + 1);
        assert!(
            pair[0].score > pair[1].score
                || (pair[0].score == pair[1].score && pair[0].id < pair[1].id)
        );
    }
    assert!(
        assessment
            .hotspots
            .iter()
            .all(|h| h.class != IntersectionClass::DeadEnd)
    );
}

#[test]
fn only_busy_junctions_are_estimated_signalised() {
    let assessment = assess(&grid(5), Some(peak()), None).unwrap();

    for record in &assessment.intersections {
        if matches!(
            record.class,
            IntersectionClass::DeadEnd | IntersectionClass::PassThrough
        ) {
            assert_ne!(record.signal, SignalStatus::EstimatedPresent, "{}", record.id);
        }
    }
    // Row 0 T-junctions touch the primary road but are not crossings
    assert_eq!(assessment.signals.estimated_present, 0);
    assert_eq!(assessment.signals.observed, 0);

    // Second row crossings touch no primary road either; move the primary to row 1
    let mut raw = grid(5);
    for edge in &mut raw.edges {
        if (6..=10).contains(&edge.u) && (6..=10).contains(&edge.v) {
            edge.tags.insert("highway", "primary");
        }
    }
    let assessment = assess(&raw, Some(peak()), None).unwrap();
    assert_eq!(assessment.signals.estimated_present, 3);
}

#[test]
fn peak_hours_score_above_sunday_night() {
    let raw = grid(4);
    let peak = assess(&raw, Some(peak()), None).unwrap();
    let night = assess(
        &raw,
        Some(TimeContext::new(3, Weekday::Sun).unwrap()),
        None,
    )
    .unwrap();

    assert!((peak.raw_score - night.raw_score).abs() < 1e-12);
    assert!(peak.modulated_score > night.modulated_score);
    assert!(peak.level >= night.level);
    assert_eq!(peak.time.period, "Morning peak");
    assert_eq!(night.time.day_type, DayType::Sunday);
    assert_eq!(peak.hotspots, night.hotspots);
}

#[test]
fn duplicate_segments_do_not_inflate_degree() {
    let mut raw = crossroads();
    raw.edges.push(RawEdge::new(20, 4, 2).with_tag("highway", "residential"));
    raw.edges.push(RawEdge::new(21, 2, 5).with_tag("highway", "residential"));

    let assessment = assess(&raw, Some(peak()), None).unwrap();
    let b = assessment.intersection(2).unwrap();
    assert_eq!(b.degree, 4);
    assert_eq!(b.class, IntersectionClass::CrossJunction);
    assert_eq!(b.incident_edges, vec![10, 11, 12, 13, 20, 21]);
}

#[test]
fn exports_cover_every_intersection_and_hotspot() {
    let assessment = assess(&grid(3), Some(peak()), None).unwrap();

    let collection = assessment.to_geojson().unwrap();
    assert_eq!(collection.features.len(), 9);

    let mut csv = Vec::new();
    assessment.write_hotspots_csv(&mut csv).unwrap();
    let csv = String::from_utf8(csv).unwrap();
    assert!(csv.starts_with("rank,id,lon,lat,class,signal,max_road_class,score"));
    assert_eq!(csv.lines().count(), assessment.hotspots.len() + 1);

    let json: serde_json::Value =
        serde_json::from_str(&assessment.to_json_string().unwrap()).unwrap();
    assert_eq!(json["network"]["intersections"], 9);
    assert!(json["road_classes"]["primary"].is_number());
}

#[test]
fn graph_document_round_trip() {
    let json = r#"{
        "nodes": [
            {"id": 1, "x": 0.0, "y": 0.0, "tags": {"highway": "traffic_signals"}},
            {"id": 2, "x": 0.001, "y": 0.0},
            {"id": 3, "x": 0.0, "y": 0.001, "tags": {"highway": null}}
        ],
        "edges": [
            {"id": 1, "u": 1, "v": 2, "tags": {"highway": ["primary", "secondary"], "name": "Calle 5"}, "length": 111.0},
            {"id": 2, "u": 1, "v": 3, "tags": {"highway": "residential", "name": "nan"},
             "geometry": [[0.0, 0.0], [0.0, 0.0005], [0.0, 0.001]]}
        ]
    }"#;
    let raw = RawRoadGraph::from_json_str(json).unwrap();
    let assessment = assess(&raw, Some(peak()), None).unwrap();

    assert_eq!(assessment.network.named_segments, 1);
    assert_eq!(assessment.road_classes[&RoadClass::Primary], 1);
    assert_eq!(assessment.signals.observed, 1);
    assert!((assessment.network.total_length_km - 0.2).abs() < 1e-9);
}

#[test]
fn disabled_estimation_keeps_minor_nodes_absent() {
    let mut raw = crossroads();
    raw.nodes[1].tags = Default::default();
    raw.nodes[3] = RawNode::new(4, -0.001, 0.0).with_tag("highway", "weird_thing");
    let config = EngineConfig {
        estimate_signals: false,
        ..EngineConfig::default()
    };
    let assessment = assess(&raw, Some(peak()), Some(&config)).unwrap();

    let b = assessment.intersection(2).unwrap();
    assert_eq!(b.class, IntersectionClass::CrossJunction);
    assert_eq!(b.signal, SignalStatus::Unknown);

    let c = assessment.intersection(3).unwrap();
    assert_eq!(c.class, IntersectionClass::PassThrough);
    assert_eq!(c.signal, SignalStatus::EstimatedAbsent);

    for dead_end in [1, 4, 5, 6] {
        let record = assessment.intersection(dead_end).unwrap();
        assert_eq!(record.class, IntersectionClass::DeadEnd);
        assert_eq!(record.signal, SignalStatus::EstimatedAbsent);
    }
    assert_eq!(assessment.signals.unknown, 1);
    assert_eq!(assessment.signals.estimated_absent, 5);

    assert_eq!(assessment.warning_count(TagKind::Signal), 1);
    assert!(
        assessment
            .summary
            .iter()
            .any(|line| line.contains("ignored for signal detection"))
    );
    assert!(!assessment.summary.iter().any(|line| line.contains("was estimated")));
}
