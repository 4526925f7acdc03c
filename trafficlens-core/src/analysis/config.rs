use serde::{Deserialize, Serialize};

use super::time_profile::TimeProfile;
use crate::{Error, Score};

/// Tunable parameters of the estimation engine.
///
/// Every field has a default, and deserialization fills in whatever a
/// configuration file leaves out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub weights: ScoreWeights,
    /// Number of intersections reported as hot-spots
    pub hotspot_count: usize,
    /// A three-way node whose roads are all within this many degrees of a
    /// straight line is treated as a pass-through
    pub angle_colinearity_threshold_deg: f64,
    /// Hour and day multipliers applied to the network score
    pub time_profile: TimeProfile,
    /// Infer signals at untagged junctions. When off, untagged junctions
    /// report [`SignalStatus::Unknown`](crate::model::SignalStatus::Unknown);
    /// dead-ends and pass-throughs stay `EstimatedAbsent` either way.
    pub estimate_signals: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            weights: ScoreWeights::default(),
            hotspot_count: 10,
            angle_colinearity_threshold_deg: 30.0,
            time_profile: TimeProfile::default(),
            estimate_signals: true,
        }
    }
}

/// Weights of the congestion-potential score
/// `w1 * complexity + w2 * signal + w3 * road severity`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreWeights {
    /// Intersection complexity
    pub w1: Score,
    /// Signal presence
    pub w2: Score,
    /// Most severe adjacent road
    pub w3: Score,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            w1: 0.5,
            w2: 0.2,
            w3: 0.3,
        }
    }
}

impl EngineConfig {
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] naming the first offending setting
    pub fn validate(&self) -> Result<(), Error> {
        for (name, weight) in [
            ("w1", self.weights.w1),
            ("w2", self.weights.w2),
            ("w3", self.weights.w3),
        ] {
            if !weight.is_finite() || weight < 0.0 {
                return Err(Error::InvalidConfig(format!(
                    "weight {name} must be a non-negative number, got {weight}"
                )));
            }
        }

        if self.hotspot_count == 0 {
            return Err(Error::InvalidConfig(
                "hotspot_count must be at least 1".to_string(),
            ));
        }

        let threshold = self.angle_colinearity_threshold_deg;
        if !(0.0..=90.0).contains(&threshold) {
            return Err(Error::InvalidConfig(format!(
                "angle_colinearity_threshold_deg must be within 0-90, got {threshold}"
            )));
        }

        self.time_profile.validate()
    }
}
