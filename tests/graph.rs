use algoviz::graph::{generators, GraphInput, TreeInput};
use algoviz::model::GraphCanvas;
use algoviz::{BinaryTree, Error, Graph, MutableGraph, UndirectedGraph};
use rand::rngs::StdRng;
use rand::SeedableRng;

#[test]
fn test_graph_from_json() {
    let input: GraphInput = serde_json::from_str(
        r#"{
            "nodes": [{"id": "a", "x": 1, "y": 2}, {"id": "b"}, {"id": "c"}],
            "edges": [{"source": "a", "target": "b", "weight": 2.5}, {"source": "b", "target": "c"}]
        }"#,
    )
    .unwrap();
    let graph = UndirectedGraph::<f64>::from_input(&input).unwrap();

    assert_eq!(graph.node_count(), 3);
    assert_eq!(graph.edge_count(), 2);
    assert_eq!(graph.position(0), Some((1.0, 2.0)));
    assert_eq!(graph.edge_weight(1, 0), Some(2.5));
    // weight defaults to 1
    assert_eq!(graph.edge_weight(2, 1), Some(1.0));
}

#[test]
fn test_edge_names_reach_the_canvas() {
    let input: GraphInput = serde_json::from_str(
        r#"{
            "nodes": [{"id": "a"}, {"id": "b"}, {"id": "c"}],
            "edges": [{"source": "a", "target": "b", "name": "N3"}, {"source": "b", "target": "c"}]
        }"#,
    )
    .unwrap();
    let mut graph = UndirectedGraph::<f64>::from_input(&input).unwrap();
    assert_eq!(graph.edge_name(0), Some("N3"));
    assert_eq!(graph.edge_name(1), None);

    // names stay aligned with their records after a removal
    graph.add_named_edge("a", "c", 4.0, Some("R102")).unwrap();
    assert!(graph.remove_edge("b", "a"));
    assert_eq!(graph.edge_name(0), None);
    assert_eq!(graph.edge_name(1), Some("R102"));

    let kzn = UndirectedGraph::<f64>::from_input(&generators::sample_map("kzn").unwrap()).unwrap();
    let canvas = GraphCanvas::from_graph(&kzn);
    let road = canvas
        .edges
        .iter()
        .find(|e| e.source == "durban" && e.target == "empangeni")
        .unwrap();
    assert_eq!(road.name.as_deref(), Some("R102"));
}

#[test]
fn test_edges_are_symmetric() {
    let mut graph = UndirectedGraph::<f64>::new();
    graph.add_node("x", 0.0, 0.0);
    graph.add_node("y", 1.0, 0.0);
    graph.add_edge("x", "y", 3.0).unwrap();

    assert!(graph.has_edge(0, 1));
    assert!(graph.has_edge(1, 0));

    assert!(graph.remove_edge("y", "x"));
    assert!(!graph.has_edge(0, 1));
    assert_eq!(graph.edge_count(), 0);
    assert!(!graph.remove_edge("x", "y"));
}

#[test]
fn test_edge_to_unknown_node_fails() {
    let input = GraphInput::default().node("a", 0.0, 0.0).edge("a", "ghost", 1.0);
    assert_eq!(
        UndirectedGraph::<f64>::from_input(&input).unwrap_err(),
        Error::UnknownNode("ghost".to_string())
    );
}

#[test]
fn test_tree_from_input() {
    let tree = BinaryTree::from_input(&generators::sample_tree()).unwrap();

    assert_eq!(tree.len(), 11);
    assert_eq!(tree.edge_count(), 10);
    let root = tree.root().unwrap();
    assert_eq!(tree.node_id(root), Some("A"));
    assert_eq!(tree.left(root).and_then(|n| tree.node_id(n)), Some("B"));
    assert_eq!(tree.right(root).and_then(|n| tree.node_id(n)), Some("C"));
}

#[test]
fn test_tree_rejects_shared_children() {
    let input: TreeInput = serde_json::from_str(
        r#"{
            "nodes": [
                {"id": "r", "left": "a", "right": "b"},
                {"id": "a", "left": "c"},
                {"id": "b", "right": "c"},
                {"id": "c"}
            ]
        }"#,
    )
    .unwrap();

    assert!(matches!(BinaryTree::from_input(&input), Err(Error::InvalidInput(_))));
}

#[test]
fn test_tree_rejects_cycles_below_the_root() {
    let input: TreeInput = serde_json::from_str(
        r#"{
            "nodes": [
                {"id": "A"},
                {"id": "B", "left": "C"},
                {"id": "C", "left": "B"}
            ],
            "root": "A"
        }"#,
    )
    .unwrap();

    assert!(matches!(BinaryTree::from_input(&input), Err(Error::InvalidInput(_))));
}

#[test]
fn test_generators() {
    let mut rng = StdRng::seed_from_u64(5);

    let values = generators::random_values(30, 10, &mut rng);
    assert_eq!(values.len(), 30);
    assert!(values.iter().all(|v| (1..=10).contains(v)));

    let sorted = generators::sorted_random_values(30, 100, &mut rng);
    assert!(sorted.windows(2).all(|w| w[0] <= w[1]));

    assert_eq!(generators::ascending_values(4, 100), vec![25, 50, 75, 100]);
    assert_eq!(generators::descending_values(4, 100), vec![100, 75, 50, 25]);

    let grid = UndirectedGraph::<f64>::from_input(&generators::grid_graph(3, 2)).unwrap();
    assert_eq!(grid.node_count(), 6);
    assert_eq!(grid.edge_count(), 7);

    let sample = UndirectedGraph::<f64>::from_input(&generators::sample_graph()).unwrap();
    assert_eq!(sample.node_count(), 8);
    assert_eq!(sample.edge_count(), 13);
}
