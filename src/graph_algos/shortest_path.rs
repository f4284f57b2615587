use crate::errors::RoutePlannerError;
use crate::model::{GraphModel, NodeId};
use super::{RoutePath, SearchNodeMap};

/// Construct the route from the start node to `terminal`
/// Walks parent links back from `terminal`, summing edge lengths, then reverses
/// the nodes and converts the length to meters with the model's metric scale
pub(crate) fn shortest_path<M>(node_map: &SearchNodeMap, model: &M, terminal: NodeId) -> Result<RoutePath, RoutePlannerError>
where
    M: GraphModel + ?Sized,
{

    let mut nodes = Vec::new();
    let mut distance = 0.0;
    let mut current = terminal;

    // Trace back from terminal to start
    loop {
        let state = node_map.get(&current).ok_or(RoutePlannerError::NoPathFound)?;
        let node = model.node(current).ok_or(RoutePlannerError::UnknownNode(current))?;
        nodes.push(node);

        match state.parent {
            Some(parent) => {
                distance += model.distance(current, parent)?;
                current = parent;
            }
            None => break,
        }
    }

    // The path is in reverse order, so reverse it
    nodes.reverse();

    Ok(RoutePath {
        nodes,
        distance: distance * model.metric_scale(),
    })
}
