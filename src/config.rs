/// Options for configuring the [`RoutePlanner`](crate::RoutePlanner)
///
/// Default options:
/// ```
/// # use route_planner::PlannerConfig;
/// assert_eq!(
///     PlannerConfig {
///         input_scale: 100.0,
///         max_expansions: None,
///     },
///     Default::default()
/// );
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlannerConfig {
    /// Divisor applied to endpoint coordinates before the closest-node lookup (defaults to `100.0`)
    ///
    /// Endpoints arrive as percentages of the map extent and the model works in the unit square.
    pub input_scale: f64,
    /// Upper bound on node expansions for a single search (defaults to `None`, unbounded)
    ///
    /// When the bound is hit the search fails with
    /// [`SearchAborted`](crate::RoutePlannerError::SearchAborted) instead of running on.
    pub max_expansions: Option<usize>,
}

impl PlannerConfig {
    /// Default options with a cap on node expansions
    pub fn with_max_expansions(max_expansions: usize) -> PlannerConfig {
        PlannerConfig {
            max_expansions: Some(max_expansions),
            ..Default::default()
        }
    }
}

impl Default for PlannerConfig {
    fn default() -> PlannerConfig {
        PlannerConfig {
            input_scale: 100.0,
            max_expansions: None,
        }
    }
}
