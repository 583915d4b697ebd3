use algoviz::engine::{drive, Recorder};
use algoviz::graph::{generators, GraphInput};
use algoviz::model::NodeState;
use algoviz::{AStar, Dijkstra, Error, PathKind, ShortestPathAlgorithm, UndirectedGraph};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn example_graph() -> UndirectedGraph<f64> {
    let input = GraphInput::default()
        .node("A", 0.0, 0.0)
        .node("B", 4.0, 0.0)
        .node("C", 9.0, 0.0)
        .node("D", 2.0, 1.0)
        .node("E", 6.0, 3.0)
        .edge("A", "B", 4.0)
        .edge("A", "D", 2.0)
        .edge("B", "D", 1.0)
        .edge("D", "E", 4.0)
        .edge("B", "C", 5.0);
    UndirectedGraph::from_input(&input).unwrap()
}

fn path(ids: &[&str]) -> Vec<String> {
    ids.iter().map(|s| s.to_string()).collect()
}

#[test]
fn test_dijkstra_example_route() {
    let graph = example_graph();
    let route = <Dijkstra as ShortestPathAlgorithm<f64>>::find_path(&Dijkstra::new(), &graph, "A", "C").unwrap().unwrap();

    assert_eq!(route.path, path(&["A", "D", "B", "C"]));
    assert_eq!(route.total_weight, 8.0);
}

#[test]
fn test_astar_example_route() {
    let graph = example_graph();
    let route = <AStar as ShortestPathAlgorithm<f64>>::find_path(&AStar::new(), &graph, "A", "C").unwrap().unwrap();

    assert_eq!(route.path, path(&["A", "D", "B", "C"]));
    assert_eq!(route.total_weight, 8.0);
}

#[test]
fn test_bfs_prefers_fewest_edges() {
    let graph = example_graph();
    let route = PathKind::Bfs
        .find_path::<f64, _>(&graph, "A", "C")
        .unwrap()
        .unwrap();

    assert_eq!(route.path, path(&["A", "B", "C"]));
    // total is the sum of the real weights along the path
    assert_eq!(route.total_weight, 9.0);
}

#[test]
fn test_start_equals_end() {
    let graph = example_graph();
    for kind in PathKind::ALL {
        let route = kind.find_path::<f64, _>(&graph, "E", "E").unwrap().unwrap();
        assert_eq!(route.path, path(&["E"]));
        assert_eq!(route.total_weight, 0.0);
    }
}

#[test]
fn test_unreachable_end_yields_none() {
    let input = GraphInput::default()
        .node("A", 0.0, 0.0)
        .node("B", 1.0, 0.0)
        .node("Z", 5.0, 5.0)
        .edge("A", "B", 1.0);
    let graph = UndirectedGraph::<f64>::from_input(&input).unwrap();

    for kind in PathKind::ALL {
        let (route, explored) = kind.explore::<f64, _>(&graph, "A", "Z").unwrap();
        assert!(route.is_none(), "{} found a path to an isolated node", kind);
        assert_eq!(explored, 2);
    }
}

#[test]
fn test_unknown_nodes_are_rejected() {
    let graph = example_graph();
    for kind in PathKind::ALL {
        assert_eq!(
            kind.find_path::<f64, _>(&graph, "A", "Q"),
            Err(Error::UnknownNode("Q".to_string()))
        );
        assert_eq!(
            kind.find_path::<f64, _>(&graph, "Q", "A"),
            Err(Error::UnknownNode("Q".to_string()))
        );
    }
}

#[test]
fn test_negative_weight_is_rejected() {
    let input = GraphInput::default()
        .node("A", 0.0, 0.0)
        .node("B", 1.0, 0.0)
        .edge("A", "B", -3.0);

    assert_eq!(
        UndirectedGraph::<f64>::from_input(&input).unwrap_err(),
        Error::NegativeWeight(-3.0)
    );
}

#[test]
fn test_astar_matches_dijkstra_on_geometric_graphs() {
    let mut rng = StdRng::seed_from_u64(2024);

    for _ in 0..10 {
        let input = generators::random_geometric_graph(60, 100.0, 25.0, &mut rng);
        let graph = UndirectedGraph::<f64>::from_input(&input).unwrap();

        let (dijkstra, dijkstra_explored) =
            PathKind::Dijkstra.explore::<f64, _>(&graph, "n0", "n59").unwrap();
        let (astar, astar_explored) = PathKind::AStar.explore::<f64, _>(&graph, "n0", "n59").unwrap();

        match (dijkstra, astar) {
            (Some(d), Some(a)) => {
                assert!((d.total_weight - a.total_weight).abs() < 1e-9);
                assert!(astar_explored <= dijkstra_explored);
            }
            (None, None) => {}
            (d, a) => panic!("reachability disagrees: {:?} vs {:?}", d, a),
        }
    }
}

#[test]
fn test_sample_maps_route() {
    let graph = UndirectedGraph::<f64>::from_input(&generators::sample_map("kzn").unwrap()).unwrap();
    let route = PathKind::Dijkstra
        .find_path::<f64, _>(&graph, "port_shepstone", "newcastle")
        .unwrap()
        .unwrap();

    assert_eq!(
        route.path,
        path(&["port_shepstone", "durban", "pmb", "newcastle"])
    );
    assert_eq!(route.total_weight, 440.0);

    assert!(generators::sample_map("atlantis").is_err());
}

#[test]
fn test_final_frame_marks_the_path() {
    let graph = example_graph();
    let mut search = <Dijkstra as ShortestPathAlgorithm<f64>>::search(&Dijkstra::new(), &graph, "A", "C").unwrap();
    let mut recorder = Recorder::new();
    drive(&mut search, &mut recorder);

    let last = recorder.last_frame().unwrap();
    for id in ["A", "D", "B", "C"] {
        assert_eq!(last.node(id).map(|n| n.state), Some(NodeState::InPath), "{}", id);
    }
    assert_eq!(last.node("C").and_then(|n| n.distance), Some(8.0));
    assert_eq!(last.node("C").and_then(|n| n.previous.clone()), Some("B".to_string()));
    assert_eq!(last.edges.iter().filter(|e| e.in_path).count(), 3);

    let stats = recorder.last_stats().unwrap();
    assert!(stats.nodes_explored.unwrap() >= 4);
    assert!(stats.edges_relaxed.unwrap() > 0);
}
