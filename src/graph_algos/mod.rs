pub mod a_star;
mod shortest_path;

use shortest_path::shortest_path;

use crate::collections::FxIndexMap;
use crate::model::{Node, NodeId};


/// Scratch state the planner keeps for a node during one search
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SearchNode {
    pub parent: Option<NodeId>, // predecessor on the best known path, None for the start node
    pub g_value: f64, // cost from the start node
    pub h_value: f64, // straight-line estimate to the goal
    pub closed: bool, // expanded, cost is final
}

impl SearchNode {

    /// Total estimated cost through this node
    pub fn f_value(&self) -> f64 {
        self.g_value + self.h_value
    }
}

/// Type alias for the per-search node map
/// A node is visited once it has an entry, i.e. once it entered the frontier
pub(crate) type SearchNodeMap = FxIndexMap<NodeId, SearchNode>;


/// Route found by the planner
#[derive(Clone, Debug, PartialEq)]
pub struct RoutePath {
    /// Node copies ordered from start to goal
    pub nodes: Vec<Node>,
    /// Total length in meters
    pub distance: f64,
}
