use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::model::{
    DayType, IntersectionClass, RoadClass, SignalStatus, TimeContext, TrafficLevel,
};
use crate::{EdgeId, Error, NodeId, Score};

/// Result of one engine run. Built once by the assembler and never modified.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrafficAssessment {
    pub level: TrafficLevel,
    pub time: TimeSummary,
    /// Mean raw score of all intersections that are not dead-ends
    pub raw_score: Score,
    /// `raw_score` scaled by the time multiplier, the input of `level`
    pub modulated_score: Score,
    pub road_classes: BTreeMap<RoadClass, usize>,
    pub intersection_classes: BTreeMap<IntersectionClass, usize>,
    pub signals: SignalSummary,
    /// Ranked, best first
    pub hotspots: Vec<Hotspot>,
    /// Every intersection, in input order
    pub intersections: Vec<IntersectionAssessment>,
    pub network: NetworkStatistics,
    pub warnings: Vec<UnrecognizedTagWarning>,
    pub summary: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSummary {
    pub context: TimeContext,
    /// Label of the hour bucket
    pub period: String,
    pub day_type: DayType,
    pub multiplier: Score,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignalSummary {
    pub observed: usize,
    pub estimated_present: usize,
    pub estimated_absent: usize,
    pub unknown: usize,
}

impl SignalSummary {
    /// Observed plus estimated signals
    pub fn total_present(&self) -> usize {
        self.observed + self.estimated_present
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntersectionAssessment {
    pub id: NodeId,
    /// `[lon, lat]`
    pub coordinate: [f64; 2],
    pub incident_edges: Vec<EdgeId>,
    pub degree: usize,
    pub class: IntersectionClass,
    pub signal: SignalStatus,
    pub max_road_class: Option<RoadClass>,
    pub score: Score,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hotspot {
    /// 1-based
    pub rank: usize,
    pub id: NodeId,
    pub coordinate: [f64; 2],
    pub class: IntersectionClass,
    pub signal: SignalStatus,
    pub max_road_class: Option<RoadClass>,
    pub score: Score,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkStatistics {
    pub intersections: usize,
    pub segments: usize,
    pub named_segments: usize,
    pub total_length_km: f64,
    /// Most common highway types by label, at most ten, most frequent first
    pub highway_types: Vec<(String, usize)>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TagKind {
    /// Segment `highway` tag missing or outside the road table
    Road,
    /// Node `highway` tag outside the signal vocabulary
    Signal,
}

/// Non-fatal: the value fell back to a documented default
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnrecognizedTagWarning {
    pub kind: TagKind,
    pub value: String,
    pub count: usize,
}

impl TrafficAssessment {
    /// Total number of elements behind warnings of `kind`
    pub fn warning_count(&self, kind: TagKind) -> usize {
        self.warnings
            .iter()
            .filter(|warning| warning.kind == kind)
            .map(|warning| warning.count)
            .sum()
    }

    pub fn intersection(&self, id: NodeId) -> Option<&IntersectionAssessment> {
        self.intersections.iter().find(|record| record.id == id)
    }

    /// Hot-spot rank of an intersection
    pub fn hotspot_rank(&self, id: NodeId) -> Option<usize> {
        self.hotspots
            .iter()
            .find(|hotspot| hotspot.id == id)
            .map(|hotspot| hotspot.rank)
    }

    /// # Errors
    ///
    /// Returns [`Error::Serialization`] if encoding fails
    pub fn to_json_string(&self) -> Result<String, Error> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
