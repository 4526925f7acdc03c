//! Functional road class from the `highway` tag

use std::collections::BTreeMap;

use petgraph::graph::{EdgeIndex, NodeIndex};
use rayon::prelude::*;

use crate::model::{RoadClass, RoadNetwork};

/// Class given to segments whose highway tag is missing or not in the table
pub const FALLBACK_CLASS: RoadClass = RoadClass::Residential;
/// Warning key for segments without a highway tag
pub const MISSING_TAG: &str = "<missing>";

/// Looks up a highway value. `None` for values outside the table.
pub fn lookup_highway(highway: &str) -> Option<RoadClass> {
    let class = match highway {
        "motorway" | "motorway_link" | "trunk" | "trunk_link" => RoadClass::Motorway,
        "primary" | "primary_link" => RoadClass::Primary,
        "secondary" | "secondary_link" => RoadClass::Secondary,
        "tertiary" | "tertiary_link" => RoadClass::Tertiary,
        "residential" | "living_street" => RoadClass::Residential,
        "service" | "unclassified" | "track" | "busway" | "pedestrian" | "footway"
        | "cycleway" | "path" | "steps" | "bridleway" | "corridor" => {
            RoadClass::ServiceUnclassified
        }
        _ => return None,
    };
    Some(class)
}

/// Human-readable name of a highway value, used for the road type listing
pub fn highway_label(highway: &str) -> String {
    let label = match highway {
        "motorway" => "Motorway",
        "motorway_link" => "Motorway link",
        "trunk" => "Trunk",
        "trunk_link" => "Trunk link",
        "primary" => "Primary",
        "primary_link" => "Primary link",
        "secondary" => "Secondary",
        "secondary_link" => "Secondary link",
        "tertiary" => "Tertiary",
        "tertiary_link" => "Tertiary link",
        "residential" => "Residential",
        "living_street" => "Living street",
        "service" => "Service",
        "unclassified" => "Unclassified",
        "pedestrian" => "Pedestrian",
        "footway" => "Footway",
        "cycleway" => "Cycleway",
        "track" => "Track",
        "path" => "Path",
        "steps" => "Steps",
        _ => return title_case(highway),
    };
    label.to_string()
}

fn title_case(text: &str) -> String {
    text.split(['_', ' '])
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect()
            })
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Road class of every segment plus the tally of fallbacks
#[derive(Debug, Clone, Default)]
pub struct RoadClassification {
    /// Indexed by edge index
    pub classes: Vec<RoadClass>,
    /// Unrecognized highway values (or [`MISSING_TAG`]) and how many
    /// segments carried them
    pub unrecognized: BTreeMap<String, usize>,
}

impl RoadClassification {
    pub fn class_of(&self, edge: EdgeIndex) -> RoadClass {
        self.classes[edge.index()]
    }

    /// Segments that fell back to [`FALLBACK_CLASS`]
    pub fn fallback_count(&self) -> usize {
        self.unrecognized.values().sum()
    }

    /// Most severe class among the segments touching `node`
    pub fn max_incident(&self, network: &RoadNetwork, node: NodeIndex) -> Option<RoadClass> {
        network
            .incident_segments(node)
            .map(|edge| self.class_of(edge))
            .max()
    }

    pub fn distribution(&self) -> BTreeMap<RoadClass, usize> {
        let mut counts: BTreeMap<RoadClass, usize> =
            RoadClass::ALL.iter().map(|class| (*class, 0)).collect();
        for class in &self.classes {
            *counts.entry(*class).or_default() += 1;
        }
        counts
    }
}

/// Classifies every road segment, in edge index order
pub fn classify_roads(network: &RoadNetwork) -> RoadClassification {
    let resolved: Vec<(RoadClass, Option<&str>)> = network
        .graph
        .raw_edges()
        .par_iter()
        .map(|edge| match edge.weight.highway() {
            Some(highway) => match lookup_highway(highway) {
                Some(class) => (class, None),
                None => (FALLBACK_CLASS, Some(highway)),
            },
            None => (FALLBACK_CLASS, Some(MISSING_TAG)),
        })
        .collect();

    let mut classification = RoadClassification {
        classes: Vec::with_capacity(resolved.len()),
        unrecognized: BTreeMap::new(),
    };
    for (class, unrecognized) in resolved {
        classification.classes.push(class);
        if let Some(value) = unrecognized {
            *classification
                .unrecognized
                .entry(value.to_string())
                .or_default() += 1;
        }
    }

    if classification.fallback_count() > 0 {
        log::debug!(
            "{} road segments fell back to {}",
            classification.fallback_count(),
            FALLBACK_CLASS
        );
    }
    classification
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loading::{RawEdge, RawNode, RawRoadGraph, create_road_network};

    #[test]
    fn table_covers_the_severity_scale() {
        assert_eq!(lookup_highway("motorway"), Some(RoadClass::Motorway));
        assert_eq!(lookup_highway("trunk_link"), Some(RoadClass::Motorway));
        assert_eq!(lookup_highway("primary"), Some(RoadClass::Primary));
        assert_eq!(lookup_highway("secondary_link"), Some(RoadClass::Secondary));
        assert_eq!(lookup_highway("tertiary"), Some(RoadClass::Tertiary));
        assert_eq!(lookup_highway("living_street"), Some(RoadClass::Residential));
        assert_eq!(lookup_highway("service"), Some(RoadClass::ServiceUnclassified));
        assert_eq!(lookup_highway("unclassified"), Some(RoadClass::ServiceUnclassified));
        assert_eq!(lookup_highway("raceway"), None);
        assert_eq!(lookup_highway("Primary"), None);
    }

    #[test]
    fn labels() {
        assert_eq!(highway_label("motorway_link"), "Motorway link");
        assert_eq!(highway_label("bus_guideway"), "Bus Guideway");
        assert_eq!(highway_label("unknown"), "Unknown");
    }

    #[test]
    fn fallbacks_are_counted() {
        let raw = RawRoadGraph {
            nodes: vec![
                RawNode::new(1, 0.0, 0.0),
                RawNode::new(2, 0.001, 0.0),
                RawNode::new(3, 0.002, 0.0),
            ],
            edges: vec![
                RawEdge::new(1, 1, 2).with_tag("highway", "motorway"),
                RawEdge::new(2, 2, 3),
                RawEdge::new(3, 1, 3).with_tag("highway", "raceway"),
                RawEdge::new(4, 3, 1).with_tag("highway", "raceway"),
            ],
        };
        let network = create_road_network(&raw).unwrap();
        let roads = classify_roads(&network);

        assert_eq!(
            roads.classes,
            vec![
                RoadClass::Motorway,
                RoadClass::Residential,
                RoadClass::Residential,
                RoadClass::Residential
            ]
        );
        assert_eq!(roads.unrecognized.get(MISSING_TAG), Some(&1));
        assert_eq!(roads.unrecognized.get("raceway"), Some(&2));
        assert_eq!(roads.fallback_count(), 3);

        let node = network.node_index(2).unwrap();
        assert_eq!(roads.max_incident(&network, node), Some(RoadClass::Motorway));

        let distribution = roads.distribution();
        assert_eq!(distribution[&RoadClass::Residential], 3);
        assert_eq!(distribution[&RoadClass::Primary], 0);
    }
}
