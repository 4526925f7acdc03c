use thiserror::Error;

use crate::{EdgeId, NodeId};

#[derive(Error, Debug)]
pub enum Error {
    #[error("Road segment {edge} references missing intersection {missing}")]
    GraphIntegrity { edge: EdgeId, missing: NodeId },
    #[error("Intersection {0} appears more than once")]
    DuplicateNode(NodeId),
    #[error("Road segment {0} appears more than once")]
    DuplicateEdge(EdgeId),
    #[error("Road network has no intersections or no road segments")]
    EmptyNetwork,
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("Invalid hour of day: {0} (expected 0-23)")]
    InvalidTime(u8),
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        if err.is_io() {
            Error::Io(err.into())
        } else {
            Error::Serialization(err.to_string())
        }
    }
}

impl From<csv::Error> for Error {
    fn from(err: csv::Error) -> Self {
        if err.is_io_error() {
            Error::Io(err.into())
        } else {
            Error::Serialization(err.to_string())
        }
    }
}
