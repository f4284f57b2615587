use std::fmt;

use kdtree::KdTree;
use kdtree::distance::squared_euclidean as kt_squared_euclidean;
use log::debug;

use crate::collections::{FxHashMap, FxHashSet};
use crate::errors::RoutePlannerError;
use crate::geometry::Point;
use super::{GraphModel, Node, NodeId};


/// Road classification of a way
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RoadKind {
    Motorway,
    Trunk,
    Primary,
    Secondary,
    Tertiary,
    Residential,
    Service,
    Unclassified,
    Footway,
}

impl RoadKind {

    /// Footways are kept on the map but never routed over
    pub fn is_routable(self) -> bool {
        !matches!(self, RoadKind::Footway)
    }
}


/// Ordered run of nodes along a single way
#[derive(Clone, Debug)]
struct Road {
    kind: RoadKind,
    nodes: Vec<NodeId>,
}


/// In-memory road network
///
/// Nodes are positioned in the unit square. Adjacency is derived from roads:
/// a node's neighbors are the nodes directly before and after it on every
/// routable road it lies on. Neighbor lists are built on first request.
pub struct RouteModel {
    nodes: Vec<Point>,
    roads: Vec<Road>,
    node_to_road: FxHashMap<NodeId, Vec<usize>>, // routable roads only
    neighbors: FxHashMap<NodeId, Vec<NodeId>>, // discovered adjacency cache
    tree: KdTree<f64, NodeId, [f64; 2]>, // routable node positions -> node id
    indexed: FxHashSet<NodeId>,
    metric_scale: f64,
    path: Vec<Node>,
}

impl RouteModel {

    /// Create a model with no roads
    /// `metric_scale` converts unit-square distances into meters
    pub fn new(points: Vec<Point>, metric_scale: f64) -> Result<Self, RoutePlannerError> {
        if !metric_scale.is_finite() || metric_scale <= 0.0 {
            return Err(RoutePlannerError::InvalidModel(format!(
                "metric scale must be positive and finite, got {metric_scale}"
            )));
        }
        if let Some((id, point)) = points.iter().enumerate().find(|(_, p)| !p.in_unit_square()) {
            return Err(RoutePlannerError::InvalidModel(format!(
                "node {id} at ({}, {}) lies outside the unit square", point.x, point.y
            )));
        }

        Ok(Self {
            nodes: points,
            roads: Vec::new(),
            node_to_road: FxHashMap::default(),
            neighbors: FxHashMap::default(),
            tree: KdTree::new(2),
            indexed: FxHashSet::default(),
            metric_scale,
            path: Vec::new(),
        })
    }

    /// Build a model where every edge is its own two-node residential road
    pub fn from_edges(points: Vec<Point>, edges: &[(NodeId, NodeId)], metric_scale: f64) -> Result<Self, RoutePlannerError> {
        let mut model = Self::new(points, metric_scale)?;
        for &(a, b) in edges {
            model.add_road(RoadKind::Residential, [a, b])?;
        }
        Ok(model)
    }

    /// Register a road running through `nodes` in order
    /// Returns the index of the new road
    pub fn add_road<I>(&mut self, kind: RoadKind, nodes: I) -> Result<usize, RoutePlannerError>
    where
        I: IntoIterator<Item = NodeId>,
    {
        let nodes: Vec<NodeId> = nodes.into_iter().collect();
        if nodes.len() < 2 {
            return Err(RoutePlannerError::InvalidRoad(format!(
                "a road needs at least 2 nodes, got {}", nodes.len()
            )));
        }
        if let Some(&id) = nodes.iter().find(|&&id| id >= self.nodes.len()) {
            return Err(RoutePlannerError::UnknownNode(id));
        }

        let road_idx = self.roads.len();

        if kind.is_routable() {
            for &id in &nodes {
                let roads = self.node_to_road.entry(id).or_default();
                if roads.last() != Some(&road_idx) {
                    roads.push(road_idx);
                }

                // adjacency of this node changed, rediscover on next request
                self.neighbors.remove(&id);

                if self.indexed.insert(id) {
                    let point = self.nodes[id];
                    self.tree.add([point.x, point.y], id)?;
                }
            }
        }

        debug!("added {kind:?} road {road_idx} with {} nodes", nodes.len());
        self.roads.push(Road { kind, nodes });

        Ok(road_idx)
    }

    pub fn road_count(&self) -> usize {
        self.roads.len()
    }

    /// Kind of the road at `road_idx`
    pub fn road_kind(&self, road_idx: usize) -> Option<RoadKind> {
        self.roads.get(road_idx).map(|road| road.kind)
    }
}


/// Walk every routable road through `id` and collect the nodes on either side
fn discover_neighbors(roads: &[Road], node_to_road: &FxHashMap<NodeId, Vec<usize>>, id: NodeId) -> Vec<NodeId> {
    let mut found: Vec<NodeId> = Vec::new();
    let Some(road_idxs) = node_to_road.get(&id) else {
        return found;
    };

    for &road_idx in road_idxs {
        let nodes = &roads[road_idx].nodes;
        for (pos, _) in nodes.iter().enumerate().filter(|&(_, &n)| n == id) {
            let before = pos.checked_sub(1).map(|p| nodes[p]);
            let after = nodes.get(pos + 1).copied();
            for neighbor in before.into_iter().chain(after) {
                if neighbor != id && !found.contains(&neighbor) {
                    found.push(neighbor);
                }
            }
        }
    }

    found
}


impl GraphModel for RouteModel {

    fn find_closest_node(&self, x: f64, y: f64) -> Result<NodeId, RoutePlannerError> {
        if !Point::new(x, y).in_unit_square() {
            return Err(RoutePlannerError::OutOfBounds { x, y });
        }
        if self.indexed.is_empty() {
            return Err(RoutePlannerError::NoValidPointFound);
        }

        let closest: Vec<(f64, &NodeId)> = self.tree.nearest(&[x, y], 1, &kt_squared_euclidean)?;
        match closest.first() {
            Some(&(_, &id)) => Ok(id),
            None => Err(RoutePlannerError::NoValidPointFound),
        }
    }

    fn find_neighbors(&mut self, id: NodeId) -> Result<&[NodeId], RoutePlannerError> {
        if id >= self.nodes.len() {
            return Err(RoutePlannerError::UnknownNode(id));
        }

        let Self { roads, node_to_road, neighbors, .. } = self;
        let found = neighbors
            .entry(id)
            .or_insert_with(|| discover_neighbors(roads, node_to_road, id));

        Ok(found.as_slice())
    }

    fn node(&self, id: NodeId) -> Option<Node> {
        self.nodes.get(id).map(|&point| Node { id, point })
    }

    fn metric_scale(&self) -> f64 {
        self.metric_scale
    }

    fn set_path(&mut self, path: Vec<Node>) {
        self.path = path;
    }

    fn path(&self) -> &[Node] {
        &self.path
    }
}


impl fmt::Debug for RouteModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteModel")
            .field("nodes", &self.nodes.len())
            .field("roads", &self.roads.len())
            .field("routable_nodes", &self.indexed.len())
            .field("metric_scale", &self.metric_scale)
            .field("path", &self.path.len())
            .finish_non_exhaustive()
    }
}
