use std::io::Read;

use serde::{Deserialize, Serialize};

use super::de::deserialize_tags;
use crate::model::Tags;
use crate::{EdgeId, Error, NodeId};

/// Road graph as exported by the map source (osmnx-style node/edge lists)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RawRoadGraph {
    pub nodes: Vec<RawNode>,
    pub edges: Vec<RawEdge>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawNode {
    pub id: NodeId,
    /// Longitude
    pub x: f64,
    /// Latitude
    pub y: f64,
    #[serde(default, deserialize_with = "deserialize_tags")]
    pub tags: Tags,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawEdge {
    pub id: EdgeId,
    pub u: NodeId,
    pub v: NodeId,
    #[serde(default, deserialize_with = "deserialize_tags")]
    pub tags: Tags,
    /// `[lon, lat]` vertices from `u` to `v`
    #[serde(default)]
    pub geometry: Option<Vec<[f64; 2]>>,
    /// Length in metres, when the source measured it
    #[serde(default)]
    pub length: Option<f64>,
}

impl RawRoadGraph {
    /// # Errors
    ///
    /// Returns [`Error::Serialization`] if the document is not a road graph
    pub fn from_json_str(json: &str) -> Result<Self, Error> {
        Ok(serde_json::from_str(json)?)
    }

    /// # Errors
    ///
    /// Returns [`Error::Serialization`] if the document is not a road graph
    pub fn from_json_reader<R: Read>(reader: R) -> Result<Self, Error> {
        Ok(serde_json::from_reader(reader)?)
    }
}

impl RawNode {
    pub fn new(id: NodeId, x: f64, y: f64) -> Self {
        Self {
            id,
            x,
            y,
            tags: Tags::new(),
        }
    }

    #[must_use]
    pub fn with_tag(mut self, key: &str, value: &str) -> Self {
        self.tags.insert(key, value);
        self
    }
}

impl RawEdge {
    pub fn new(id: EdgeId, u: NodeId, v: NodeId) -> Self {
        Self {
            id,
            u,
            v,
            tags: Tags::new(),
            geometry: None,
            length: None,
        }
    }

    #[must_use]
    pub fn with_tag(mut self, key: &str, value: &str) -> Self {
        self.tags.insert(key, value);
        self
    }

    #[must_use]
    pub fn with_geometry(mut self, geometry: Vec<[f64; 2]>) -> Self {
        self.geometry = Some(geometry);
        self
    }
}
