use route_planner::{
    GraphModel, NodeId, Point, PlannerConfig, RoadKind, RouteModel, RoutePath, RoutePlanner,
    RoutePlannerError,
};

use rand::{Rng, SeedableRng, rngs::StdRng};

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn ids(path: &RoutePath) -> Vec<NodeId> {
    path.nodes.iter().map(|node| node.id).collect()
}

// 5 x 5 street grid, one road per row and per column
// node id = row * 5 + col, positioned at (col / 4, row / 4)
fn grid_model() -> RouteModel {
    let mut points = Vec::new();
    for row in 0..5 {
        for col in 0..5 {
            points.push(Point::new(col as f64 / 4.0, row as f64 / 4.0));
        }
    }
    let mut model = RouteModel::new(points, 1000.0).unwrap();
    for i in 0..5 {
        model.add_road(RoadKind::Residential, (0..5).map(|col| i * 5 + col)).unwrap();
        model.add_road(RoadKind::Secondary, (0..5).map(|row| row * 5 + i)).unwrap();
    }
    model
}

#[test]
fn grid_route_follows_streets() {
    init_logger();
    let mut model = grid_model();
    // diagonal footpath is not routable
    model.add_road(RoadKind::Footway, [0, 6, 12, 18, 24]).unwrap();

    let mut planner = RoutePlanner::new(&mut model, 0.0, 0.0, 100.0, 100.0).unwrap();
    let path = planner.a_star_search().unwrap();

    assert_eq!(path.nodes.len(), 9);
    assert_eq!(path.nodes.first().map(|n| n.id), Some(0));
    assert_eq!(path.nodes.last().map(|n| n.id), Some(24));
    assert!((path.distance - 2000.0).abs() < 1e-6);
}

#[test]
fn grid_route_takes_diagonal_road() {
    init_logger();
    let mut model = grid_model();
    model.add_road(RoadKind::Primary, [0, 6, 12, 18, 24]).unwrap();

    let mut planner = RoutePlanner::new(&mut model, 0.0, 0.0, 100.0, 100.0).unwrap();
    let path = planner.a_star_search().unwrap();

    assert_eq!(ids(&path), vec![0, 6, 12, 18, 24]);
    assert!((path.distance - 2f64.sqrt() * 1000.0).abs() < 1e-6);
    assert_eq!(model.path(), path.nodes.as_slice());
}

#[test]
fn endpoints_snap_to_closest_routable_node() {
    init_logger();
    let mut model = grid_model();

    // (30%, 70%) is closest to (0.25, 0.75) = node 16
    let mut planner = RoutePlanner::new(&mut model, 30.0, 70.0, 99.0, 1.0).unwrap();
    assert_eq!(planner.start(), 16);
    assert_eq!(planner.goal(), 4);

    let path = planner.a_star_search().unwrap();
    assert_eq!(path.nodes.first().map(|n| n.id), Some(16));
    assert_eq!(path.nodes.last().map(|n| n.id), Some(4));
    assert!((path.distance - 1500.0).abs() < 1e-6);
}

#[test]
fn expansion_cap_is_distinct_from_no_path() {
    init_logger();
    let mut model = grid_model();

    let config = PlannerConfig::with_max_expansions(3);
    let mut planner = RoutePlanner::with_config(&mut model, 0.0, 0.0, 100.0, 100.0, config).unwrap();

    let result = planner.a_star_search();
    assert_eq!(result, Err(RoutePlannerError::SearchAborted { expansions: 3 }));
}


/// Random road network where every node lies on at least one road
fn random_network(rng: &mut StdRng, n: usize) -> (Vec<Point>, Vec<(NodeId, NodeId)>) {
    let points: Vec<Point> = (0..n)
        .map(|_| Point::new(rng.random::<f64>(), rng.random::<f64>()))
        .collect();

    let mut edges = Vec::new();
    for i in 1..n {
        if rng.random_bool(0.8) {
            edges.push((rng.random_range(0..i), i));
        }
    }
    for _ in 0..n / 2 {
        let a = rng.random_range(0..n);
        let b = rng.random_range(0..n);
        if a != b {
            edges.push((a, b));
        }
    }
    (points, edges)
}

/// All-pairs shortest distances, infinity where unreachable
fn floyd_warshall(points: &[Point], edges: &[(NodeId, NodeId)]) -> Vec<Vec<f64>> {
    let n = points.len();
    let mut dist = vec![vec![f64::INFINITY; n]; n];
    for (i, row) in dist.iter_mut().enumerate() {
        row[i] = 0.0;
    }
    for &(a, b) in edges {
        let d = points[a].distance(&points[b]);
        if d < dist[a][b] {
            dist[a][b] = d;
            dist[b][a] = d;
        }
    }
    for k in 0..n {
        for i in 0..n {
            for j in 0..n {
                let through = dist[i][k] + dist[k][j];
                if through < dist[i][j] {
                    dist[i][j] = through;
                }
            }
        }
    }
    dist
}

#[test]
fn random_networks_match_brute_force() {
    init_logger();
    let mut rng = StdRng::seed_from_u64(7);
    let metric_scale = 1250.0;

    for _ in 0..20 {
        let n = 30;
        let (points, edges) = random_network(&mut rng, n);
        let truth = floyd_warshall(&points, &edges);

        let mut model = RouteModel::new(points.clone(), metric_scale).unwrap();
        for &(a, b) in &edges {
            model.add_road(RoadKind::Unclassified, [a, b]).unwrap();
        }
        // isolated nodes still need to be routable endpoints
        for id in 0..n {
            if !edges.iter().any(|&(a, b)| a == id || b == id) {
                model.add_road(RoadKind::Service, [id, id]).unwrap();
            }
        }

        for _ in 0..5 {
            let start = rng.random_range(0..n);
            let goal = rng.random_range(0..n);
            let (s, g) = (points[start], points[goal]);

            let mut planner = RoutePlanner::new(&mut model, s.x * 100.0, s.y * 100.0, g.x * 100.0, g.y * 100.0).unwrap();
            assert_eq!((planner.start(), planner.goal()), (start, goal));

            let result = planner.a_star_search();

            // heuristic never overestimates for anything the search touched
            for id in 0..n {
                if planner.is_visited(id) {
                    let h = planner.calculate_h_value(id).unwrap();
                    assert!(h <= truth[id][goal] + 1e-9, "h({id}) = {h} > {}", truth[id][goal]);
                }
            }

            if truth[start][goal].is_infinite() {
                assert_eq!(result, Err(RoutePlannerError::NoPathFound));
                continue;
            }

            let path = result.unwrap();
            let expected = truth[start][goal] * metric_scale;
            assert!(
                (path.distance - expected).abs() < 1e-6,
                "route {start} -> {goal}: {} != {expected}", path.distance
            );

            // endpoints and connectivity
            assert_eq!(path.nodes.first().map(|n| n.id), Some(start));
            assert_eq!(path.nodes.last().map(|n| n.id), Some(goal));
            for pair in path.nodes.windows(2) {
                let (a, b) = (pair[0].id, pair[1].id);
                assert!(
                    edges.iter().any(|&e| e == (a, b) || e == (b, a)),
                    "{a} and {b} are not adjacent"
                );
            }
        }
    }
}
