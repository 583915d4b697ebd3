use algoviz::algorithm::{traverse, Traversal};
use algoviz::engine::{drive, Recorder};
use algoviz::graph::generators;
use algoviz::model::NodeState;
use algoviz::{BinaryTree, Error, Structure, StepAlgorithm, TraversalKind, UndirectedGraph};
use std::collections::HashSet;

fn sample_tree() -> Structure {
    Structure::Tree(BinaryTree::from_input(&generators::sample_tree()).unwrap())
}

fn sample_graph() -> Structure {
    Structure::Graph(UndirectedGraph::from_input(&generators::sample_graph()).unwrap())
}

fn order(kind: TraversalKind, structure: Structure, start: Option<&str>) -> Vec<String> {
    traverse(kind, structure, start).unwrap().order
}

fn ids(s: &str) -> Vec<String> {
    s.split_whitespace().map(str::to_string).collect()
}

#[test]
fn test_tree_orders() {
    assert_eq!(
        order(TraversalKind::Preorder, sample_tree(), None),
        ids("A B D H I E J K C F G")
    );
    assert_eq!(
        order(TraversalKind::Inorder, sample_tree(), None),
        ids("H D I B J E K A F C G")
    );
    assert_eq!(
        order(TraversalKind::Postorder, sample_tree(), None),
        ids("H I D J K E B F G C A")
    );
}

#[test]
fn test_bfs_and_dfs_on_tree() {
    assert_eq!(
        order(TraversalKind::Bfs, sample_tree(), None),
        ids("A B C D E F G H I J K")
    );
    assert_eq!(
        order(TraversalKind::Dfs, sample_tree(), None),
        ids("A B D H I E J K C F G")
    );
}

#[test]
fn test_subtree_from_start_node() {
    assert_eq!(
        order(TraversalKind::Inorder, sample_tree(), Some("E")),
        ids("J E K")
    );
}

#[test]
fn test_graph_traversals_follow_neighbour_order() {
    assert_eq!(
        order(TraversalKind::Bfs, sample_graph(), Some("1")),
        ids("1 2 4 3 5 7 6 8")
    );
    assert_eq!(
        order(TraversalKind::Dfs, sample_graph(), Some("1")),
        ids("1 2 3 5 4 7 8 6")
    );
}

#[test]
fn test_graph_traversal_visits_each_reachable_node_once() {
    for kind in [TraversalKind::Bfs, TraversalKind::Dfs] {
        for start in ["1", "5", "8"] {
            let visited = order(kind, sample_graph(), Some(start));
            let unique: HashSet<&String> = visited.iter().collect();
            assert_eq!(visited.len(), 8, "{} from {}", kind, start);
            assert_eq!(unique.len(), 8, "{} from {} repeated a node", kind, start);
            assert_eq!(visited[0], start);
        }
    }
}

#[test]
fn test_disconnected_nodes_are_not_visited() {
    let input = generators::sample_graph().node("island", 0.0, 0.0);
    let graph = Structure::Graph(UndirectedGraph::from_input(&input).unwrap());

    let visited = order(TraversalKind::Bfs, graph, Some("1"));
    assert_eq!(visited.len(), 8);
    assert!(!visited.contains(&"island".to_string()));
}

#[test]
fn test_tree_only_order_on_graph_is_rejected() {
    let err = Traversal::new(TraversalKind::Inorder, sample_graph(), None).unwrap_err();
    assert!(matches!(err, Error::InvalidInput(_)));
}

#[test]
fn test_unknown_start_is_rejected() {
    let err = Traversal::new(TraversalKind::Bfs, sample_graph(), Some("42")).unwrap_err();
    assert_eq!(err, Error::UnknownNode("42".to_string()));
}

#[test]
fn test_each_visit_takes_two_steps() {
    let mut recorder = Recorder::new();
    let mut run = Traversal::new(TraversalKind::Preorder, sample_tree(), None).unwrap();
    drive(&mut run, &mut recorder);

    // visiting + visited for 11 nodes, then the finishing step
    assert_eq!(recorder.frames.len(), 23);

    let first = &recorder.frames[0];
    assert_eq!(first.node("A").map(|n| n.state), Some(NodeState::Visiting));
    assert!(first.order.is_empty());

    let second = &recorder.frames[1];
    assert_eq!(second.node("A").map(|n| n.state), Some(NodeState::Visited));
    assert_eq!(second.order, ids("A"));

    let last = recorder.last_frame().unwrap();
    assert!(last.nodes.iter().all(|n| n.state == NodeState::Visited));
    assert_eq!(recorder.last_stats().and_then(|s| s.nodes_visited), Some(11));
}

#[test]
fn test_settle_completes_pending_visit() {
    let mut run = Traversal::new(TraversalKind::Bfs, sample_graph(), Some("1")).unwrap();
    run.step();
    run.step();
    run.step();
    run.settle();

    let snapshot = run.snapshot();
    assert_eq!(snapshot.order, ids("1 2"));
    assert!(snapshot.nodes.iter().all(|n| n.state != NodeState::Visiting));
    assert!(snapshot.edges.iter().all(|e| !e.highlighted));
}
