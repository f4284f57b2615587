use crate::config::PlannerConfig;
use crate::errors::RoutePlannerError;
use crate::model::{GraphModel, NodeId};
use super::{shortest_path, RoutePath, SearchNode, SearchNodeMap};

use std::{
    collections::BinaryHeap,
    cmp::Ordering
};
use indexmap::map::Entry::{Occupied, Vacant};
use log::{debug, trace, warn};



/// Entry on the A* frontier
#[derive(Debug)]
struct FrontierEntry {
    node: NodeId,
    g_value: f64, // cost when pushed, used to spot stale entries
    f_value: f64, // g + h
    order: u64, // push sequence, earlier entries win ties
}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other.f_value
            .total_cmp(&self.f_value)
            .then_with(|| other.order.cmp(&self.order))
    }
}
impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl PartialEq for FrontierEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}
impl Eq for FrontierEntry {}


/// A* route planner between two points of a graph model
/// https://en.wikipedia.org/wiki/A*_search_algorithm
///
/// The planner borrows the model exclusively for its lifetime. Search state
/// (costs, parents, visited flags) is kept on the planner, keyed by node id,
/// and cleared at the start of every search.
///
/// The heuristic is the straight-line distance to the goal, which never
/// overestimates when edge costs are straight-line distances too.
pub struct RoutePlanner<'a, M: GraphModel> {
    model: &'a mut M,
    config: PlannerConfig,
    start: NodeId,
    goal: NodeId,
    open_list: BinaryHeap<FrontierEntry>,
    node_map: SearchNodeMap,
    pushed: u64,
    distance: f64,
}

impl<'a, M: GraphModel> RoutePlanner<'a, M> {

    /// Create a planner between two points given as percentages (0-100) of the map extent
    pub fn new(model: &'a mut M, start_x: f64, start_y: f64, end_x: f64, end_y: f64) -> Result<Self, RoutePlannerError> {
        Self::with_config(model, start_x, start_y, end_x, end_y, PlannerConfig::default())
    }

    pub fn with_config(
        model: &'a mut M,
        start_x: f64,
        start_y: f64,
        end_x: f64,
        end_y: f64,
        config: PlannerConfig,
    ) -> Result<Self, RoutePlannerError> {
        let scale = config.input_scale;
        if !scale.is_finite() || scale <= 0.0 {
            return Err(RoutePlannerError::InvalidConfig(format!(
                "input scale must be positive and finite, got {scale}"
            )));
        }

        // convert inputs from percentages to the model's unit square
        let start = model.find_closest_node(start_x / scale, start_y / scale)?;
        let goal = model.find_closest_node(end_x / scale, end_y / scale)?;
        debug!("resolved endpoints: start node {start}, goal node {goal}");

        Ok(Self {
            model,
            config,
            start,
            goal,
            open_list: BinaryHeap::new(),
            node_map: SearchNodeMap::default(),
            pushed: 0,
            distance: 0.0,
        })
    }

    pub fn start(&self) -> NodeId {
        self.start
    }

    pub fn goal(&self) -> NodeId {
        self.goal
    }

    /// Length in meters of the last route found, 0 before any successful search
    pub fn distance(&self) -> f64 {
        self.distance
    }

    /// Search state of a node, present once the node has been visited
    pub fn search_node(&self, id: NodeId) -> Option<&SearchNode> {
        self.node_map.get(&id)
    }

    pub fn is_visited(&self, id: NodeId) -> bool {
        self.node_map.contains_key(&id)
    }

    /// Heuristic: straight-line distance from `id` to the goal, in native units
    pub fn calculate_h_value(&self, id: NodeId) -> Result<f64, RoutePlannerError> {
        self.model.distance(id, self.goal)
    }

    /// Expand `current`: record or improve the path to each neighbor and push it on the frontier
    /// `current` must already be visited
    pub fn add_neighbors(&mut self, current: NodeId) -> Result<(), RoutePlannerError> {
        let current_g = self.node_map
            .get(&current)
            .map(|state| state.g_value)
            .ok_or(RoutePlannerError::UnknownNode(current))?;

        let neighbors = self.model.find_neighbors(current)?.to_vec();
        let goal = self.goal;

        for neighbor in neighbors {
            // expanded nodes are final
            if self.node_map.get(&neighbor).is_some_and(|state| state.closed) {
                continue;
            }

            let g_value = current_g + self.model.distance(current, neighbor)?;

            let state = match self.node_map.entry(neighbor) {
                Vacant(e) => {
                    // first time we're seeing this neighbor
                    let h_value = self.model.distance(neighbor, goal)?;
                    *e.insert(SearchNode {
                        parent: Some(current),
                        g_value,
                        h_value,
                        closed: false,
                    })
                }
                Occupied(mut e) => {
                    let state = e.get_mut();
                    if state.g_value <= g_value {
                        // existing path is at least as good
                        continue;
                    }
                    state.parent = Some(current);
                    state.g_value = g_value;
                    *state
                }
            };

            self.push_frontier(neighbor, &state);
        }

        Ok(())
    }

    /// Remove and return the frontier node with the lowest f = g + h
    /// Ties go to the node pushed first. Returns None once the frontier is exhausted
    pub fn next_node(&mut self) -> Option<NodeId> {
        while let Some(FrontierEntry { node, g_value, .. }) = self.open_list.pop() {
            let Some(state) = self.node_map.get_mut(&node) else {
                continue;
            };

            // skip entries superseded by a cheaper path or already expanded
            if state.closed || g_value > state.g_value {
                continue;
            }

            state.closed = true;
            return Some(node);
        }
        None
    }

    /// Build the route from the start node to `terminal` out of the recorded parent links
    pub fn construct_final_path(&self, terminal: NodeId) -> Result<RoutePath, RoutePlannerError> {
        shortest_path(&self.node_map, &*self.model, terminal)
    }

    /// Run A* from start to goal
    /// On success the route is also stored on the model and its length on the planner.
    /// On failure the model's path is left empty and the distance is 0
    pub fn a_star_search(&mut self) -> Result<RoutePath, RoutePlannerError> {
        self.reset();

        let start_state = SearchNode {
            parent: None,
            g_value: 0.0,
            h_value: self.calculate_h_value(self.start)?,
            closed: false,
        };
        self.node_map.insert(self.start, start_state);
        self.push_frontier(self.start, &start_state);

        let mut expansions: usize = 0;

        let terminal = loop {
            let Some(current) = self.next_node() else {
                debug!("frontier exhausted after {expansions} expansions, goal {} unreachable", self.goal);
                return Err(RoutePlannerError::NoPathFound);
            };

            if current == self.goal {
                break current;
            }

            if let Some(max_expansions) = self.config.max_expansions {
                if expansions >= max_expansions {
                    warn!("search aborted after {expansions} expansions");
                    return Err(RoutePlannerError::SearchAborted { expansions });
                }
            }

            trace!("expanding node {current}");
            self.add_neighbors(current)?;
            expansions += 1;
        };

        let path = self.construct_final_path(terminal)?;
        debug!(
            "route found: {} nodes, {:.1} m, {expansions} expansions",
            path.nodes.len(),
            path.distance
        );

        self.distance = path.distance;
        self.model.set_path(path.nodes.clone());

        Ok(path)
    }

    fn push_frontier(&mut self, node: NodeId, state: &SearchNode) {
        self.open_list.push(FrontierEntry {
            node,
            g_value: state.g_value,
            f_value: state.f_value(),
            order: self.pushed,
        });
        self.pushed += 1;
    }

    /// Clear search state and any route left on the model by an earlier search
    fn reset(&mut self) {
        self.open_list.clear();
        self.node_map.clear();
        self.pushed = 0;
        self.distance = 0.0;
        self.model.set_path(Vec::new());
    }
}
