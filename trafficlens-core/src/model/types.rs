//! Classification vocabulary shared by the analysis stages

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::Score;

/// Functional road class, declared from least to most severe so that the
/// derived ordering is the severity ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoadClass {
    ServiceUnclassified,
    Residential,
    Tertiary,
    Secondary,
    Primary,
    Motorway,
}

impl RoadClass {
    /// Most severe first
    pub const ALL: [RoadClass; 6] = [
        RoadClass::Motorway,
        RoadClass::Primary,
        RoadClass::Secondary,
        RoadClass::Tertiary,
        RoadClass::Residential,
        RoadClass::ServiceUnclassified,
    ];

    /// Contribution of the road to the congestion score, in [0, 1]
    pub fn severity(self) -> Score {
        match self {
            RoadClass::Motorway => 1.0,
            RoadClass::Primary => 0.8,
            RoadClass::Secondary => 0.6,
            RoadClass::Tertiary => 0.4,
            RoadClass::Residential => 0.2,
            RoadClass::ServiceUnclassified => 0.1,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            RoadClass::Motorway => "Motorway",
            RoadClass::Primary => "Primary",
            RoadClass::Secondary => "Secondary",
            RoadClass::Tertiary => "Tertiary",
            RoadClass::Residential => "Residential",
            RoadClass::ServiceUnclassified => "Service/Unclassified",
        }
    }
}

impl fmt::Display for RoadClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Complexity of an intersection, least complex first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntersectionClass {
    DeadEnd,
    PassThrough,
    TJunction,
    CrossJunction,
    ComplexJunction,
}

impl IntersectionClass {
    /// Most complex first
    pub const ALL: [IntersectionClass; 5] = [
        IntersectionClass::ComplexJunction,
        IntersectionClass::CrossJunction,
        IntersectionClass::TJunction,
        IntersectionClass::PassThrough,
        IntersectionClass::DeadEnd,
    ];

    pub fn from_degree(degree: usize) -> Self {
        match degree {
            0 | 1 => IntersectionClass::DeadEnd,
            2 => IntersectionClass::PassThrough,
            3 => IntersectionClass::TJunction,
            4 => IntersectionClass::CrossJunction,
            _ => IntersectionClass::ComplexJunction,
        }
    }

    pub fn complexity_weight(self) -> Score {
        match self {
            IntersectionClass::DeadEnd => 0.0,
            IntersectionClass::PassThrough => 0.25,
            IntersectionClass::TJunction => 0.5,
            IntersectionClass::CrossJunction => 0.75,
            IntersectionClass::ComplexJunction => 1.0,
        }
    }

    /// Three or more distinct roads meet here
    pub fn is_junction(self) -> bool {
        self >= IntersectionClass::TJunction
    }

    /// Dead ends carry no traffic weight and are left out of averages and rankings
    pub fn is_scored(self) -> bool {
        self != IntersectionClass::DeadEnd
    }

    pub fn label(self) -> &'static str {
        match self {
            IntersectionClass::DeadEnd => "Dead-end",
            IntersectionClass::PassThrough => "Pass-through",
            IntersectionClass::TJunction => "T-junction",
            IntersectionClass::CrossJunction => "Cross-junction",
            IntersectionClass::ComplexJunction => "Complex-junction",
        }
    }
}

impl fmt::Display for IntersectionClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalStatus {
    /// Tagged as signalised by the map source
    Observed,
    EstimatedPresent,
    EstimatedAbsent,
    /// Untagged junction and estimation was switched off
    Unknown,
}

impl SignalStatus {
    pub fn has_signal(self) -> bool {
        matches!(self, SignalStatus::Observed | SignalStatus::EstimatedPresent)
    }

    pub fn label(self) -> &'static str {
        match self {
            SignalStatus::Observed => "Observed",
            SignalStatus::EstimatedPresent => "Estimated present",
            SignalStatus::EstimatedAbsent => "Estimated absent",
            SignalStatus::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for SignalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Network-wide traffic level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrafficLevel {
    Low,
    Moderate,
    High,
    Severe,
}

impl TrafficLevel {
    pub const MODERATE_FROM: Score = 0.20;
    pub const HIGH_FROM: Score = 0.35;
    pub const SEVERE_FROM: Score = 0.50;

    /// Thresholds the time-modulated network score. Monotonic: a higher score
    /// never yields a lower level. NaN maps to `Low`.
    pub fn from_score(score: Score) -> Self {
        if score >= Self::SEVERE_FROM {
            TrafficLevel::Severe
        } else if score >= Self::HIGH_FROM {
            TrafficLevel::High
        } else if score >= Self::MODERATE_FROM {
            TrafficLevel::Moderate
        } else {
            TrafficLevel::Low
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TrafficLevel::Low => "Low",
            TrafficLevel::Moderate => "Moderate",
            TrafficLevel::High => "High",
            TrafficLevel::Severe => "Severe",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            TrafficLevel::Low => "Low - free flow",
            TrafficLevel::Moderate => "Moderate - steady flow",
            TrafficLevel::High => "High - congestion expected",
            TrafficLevel::Severe => "Severe - heavy congestion expected",
        }
    }
}

impl fmt::Display for TrafficLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
