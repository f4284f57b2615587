mod route_model;

pub use route_model::{RoadKind, RouteModel};

use crate::errors::RoutePlannerError;
use crate::geometry::Point;

/// Stable index of a node within a graph model
pub type NodeId = usize;


/// Snapshot of a graph node
/// Path results hold copies of these, decoupled from the live model
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Node {
    pub id: NodeId,
    pub point: Point,
}

impl Node {

    /// Straight-line distance to another node in native coordinate units
    pub fn distance(&self, other: &Node) -> f64 {
        self.point.distance(&other.point)
    }
}


/// Map graph consumed by the route planner
///
/// The model owns node data and adjacency. Coordinates are in the model's
/// native space, the unit square [0, 1] x [0, 1].
pub trait GraphModel {

    /// Resolve a normalized coordinate to the nearest routable node
    fn find_closest_node(&self, x: f64, y: f64) -> Result<NodeId, RoutePlannerError>;

    /// Neighbors of a node, computed on first request and cached afterwards
    fn find_neighbors(&mut self, id: NodeId) -> Result<&[NodeId], RoutePlannerError>;

    /// Copy of a node, if it exists
    fn node(&self, id: NodeId) -> Option<Node>;

    /// Euclidean distance between two nodes in native coordinate units
    fn distance(&self, a: NodeId, b: NodeId) -> Result<f64, RoutePlannerError> {
        let a = self.node(a).ok_or(RoutePlannerError::UnknownNode(a))?;
        let b = self.node(b).ok_or(RoutePlannerError::UnknownNode(b))?;
        Ok(a.distance(&b))
    }

    /// Factor converting native coordinate distance into meters
    fn metric_scale(&self) -> f64;

    /// Store the most recent route found over this model
    fn set_path(&mut self, path: Vec<Node>);

    fn path(&self) -> &[Node];
}
