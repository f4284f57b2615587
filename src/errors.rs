use thiserror::Error;

use crate::model::NodeId;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum RoutePlannerError {
    /// Frontier exhausted before the goal was reached
    #[error("no path found between start and goal")]
    NoPathFound,

    /// Expansion cap hit before the goal was reached
    #[error("search aborted after {expansions} expansions")]
    SearchAborted { expansions: usize },

    /// Query coordinate outside the [0, 1] map space
    #[error("coordinate ({x}, {y}) lies outside the map bounds")]
    OutOfBounds { x: f64, y: f64 },

    /// Unable to find a routable node near the point
    #[error("no routable node found near the requested point")]
    NoValidPointFound,

    #[error("unknown node {0}")]
    UnknownNode(NodeId),

    #[error("invalid road: {0}")]
    InvalidRoad(String),

    #[error("invalid model: {0}")]
    InvalidModel(String),

    #[error("invalid planner configuration: {0}")]
    InvalidConfig(String),

    #[error("kd-tree error: {0}")]
    KdTreeError(String),
}


impl From<kdtree::ErrorKind> for RoutePlannerError {
    fn from(error: kdtree::ErrorKind) -> Self {
        RoutePlannerError::KdTreeError(error.to_string())
    }
}
