// Re-export key components
pub use crate::analysis::{
    EngineConfig, HourBucket, ScoreWeights, TimeProfile, assess, assess_network,
};
pub use crate::loading::{RawRoadGraph, create_road_network};
pub use crate::model::{
    DayType, IntersectionClass, RoadClass, RoadNetwork, SignalStatus, TimeContext, TrafficLevel,
};
pub use crate::report::{Hotspot, IntersectionAssessment, TrafficAssessment};

// Core identifiers
pub use crate::EdgeId;
pub use crate::Error;
pub use crate::NodeId;
pub use crate::Score;
