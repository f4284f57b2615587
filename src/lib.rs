//! A* route planning over road network graphs.
//!
//! A [`RoutePlanner`] resolves two endpoints, given as percentages of the map
//! extent, to their closest routable nodes on a [`GraphModel`] and searches
//! for the shortest route between them with A*. The heuristic is the
//! straight-line distance to the goal.
//!
//! ```
//! use route_planner::{GraphModel, Point, RoutePlanner, RouteModel};
//!
//! let points = vec![
//!     Point::new(0.0, 0.0),
//!     Point::new(1.0, 0.0),
//!     Point::new(1.0, 1.0),
//! ];
//! let mut model = RouteModel::from_edges(points, &[(0, 1), (1, 2)], 250.0).unwrap();
//!
//! let mut planner = RoutePlanner::new(&mut model, 0.0, 0.0, 100.0, 100.0).unwrap();
//! let route = planner.a_star_search().unwrap();
//!
//! assert_eq!(route.nodes.len(), 3);
//! assert!((route.distance - 500.0).abs() < 1e-9);
//! assert_eq!(model.path().len(), 3);
//! ```

mod collections;
mod config;
mod errors;
pub mod geometry;
pub mod graph_algos;
pub mod model;

pub use config::PlannerConfig;
pub use errors::RoutePlannerError;
pub use geometry::Point;
pub use graph_algos::{RoutePath, SearchNode};
pub use graph_algos::a_star::RoutePlanner;
pub use model::{GraphModel, Node, NodeId, RoadKind, RouteModel};
