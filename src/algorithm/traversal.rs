//! Breadth-first, depth-first and the three binary-tree orders.
//!
//! Every visit is two steps: the node is shown as `visiting`, then as
//! `visited` and appended to the traversal order. Depth-first and the tree
//! orders keep their position on explicit frame stacks, so a run can stop
//! between any two visits.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;
use std::str::FromStr;

use crate::engine::{drive, Family, NullObserver, Stats, Step, StepAlgorithm};
use crate::graph::{BinaryTree, Graph, UndirectedGraph};
use crate::model::{GraphCanvas, GraphSnapshot, NodeState};
use crate::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraversalResult {
    pub order: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TraversalKind {
    Bfs,
    Dfs,
    Preorder,
    Inorder,
    Postorder,
}

impl TraversalKind {
    pub const ALL: [TraversalKind; 5] = [
        TraversalKind::Bfs,
        TraversalKind::Dfs,
        TraversalKind::Preorder,
        TraversalKind::Inorder,
        TraversalKind::Postorder,
    ];

    pub fn name(self) -> &'static str {
        match self {
            TraversalKind::Bfs => "Breadth-First Search",
            TraversalKind::Dfs => "Depth-First Search",
            TraversalKind::Preorder => "Pre-order Traversal",
            TraversalKind::Inorder => "In-order Traversal",
            TraversalKind::Postorder => "Post-order Traversal",
        }
    }

    pub fn tree_only(self) -> bool {
        matches!(
            self,
            TraversalKind::Preorder | TraversalKind::Inorder | TraversalKind::Postorder
        )
    }

    fn actions(self) -> [Action; 3] {
        match self {
            TraversalKind::Inorder => [Action::Left, Action::Visit, Action::Right],
            TraversalKind::Postorder => [Action::Left, Action::Right, Action::Visit],
            _ => [Action::Visit, Action::Left, Action::Right],
        }
    }
}

impl fmt::Display for TraversalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TraversalKind {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "bfs" => Ok(TraversalKind::Bfs),
            "dfs" => Ok(TraversalKind::Dfs),
            "preorder" => Ok(TraversalKind::Preorder),
            "inorder" => Ok(TraversalKind::Inorder),
            "postorder" => Ok(TraversalKind::Postorder),
            other => Err(Error::UnknownAlgorithm(other.to_string())),
        }
    }
}

/// Which representation a traversal walks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StructureType {
    Tree,
    Graph,
}

#[derive(Debug, Clone)]
pub enum Structure {
    Tree(BinaryTree),
    Graph(UndirectedGraph<f64>),
}

impl Structure {
    pub fn structure_type(&self) -> StructureType {
        match self {
            Structure::Tree(_) => StructureType::Tree,
            Structure::Graph(_) => StructureType::Graph,
        }
    }

    pub fn as_graph(&self) -> &dyn Graph<f64> {
        match self {
            Structure::Tree(tree) => tree,
            Structure::Graph(graph) => graph,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Visit,
    Left,
    Right,
}

#[derive(Debug, Clone)]
struct DepthFrame {
    node: usize,
    neighbors: Vec<usize>,
    next: usize,
}

#[derive(Debug, Clone)]
enum Work {
    /// Queue of `(node, discovered from)`
    Breadth {
        queue: VecDeque<(usize, Option<usize>)>,
        discovered: Vec<bool>,
    },
    Depth {
        frames: Vec<DepthFrame>,
        root: Option<usize>,
        visited: Vec<bool>,
    },
    /// `(node, next action index)` frames for the tree orders
    Ordered {
        frames: Vec<(usize, usize)>,
        actions: [Action; 3],
    },
}

/// A traversal run over a tree or an undirected graph
#[derive(Debug, Clone)]
pub struct Traversal {
    kind: TraversalKind,
    structure: Structure,
    canvas: GraphCanvas<f64>,
    work: Work,
    /// Node shown as visiting whose second step is still due
    settling: Option<usize>,
    visits: u64,
}

impl Traversal {
    /// Prepare a traversal starting at `start`, or at the root/first node.
    ///
    /// Tree-only orders on a graph and unknown start ids are rejected here,
    /// before any step runs.
    pub fn new(kind: TraversalKind, structure: Structure, start: Option<&str>) -> Result<Self> {
        let tree_root = match &structure {
            Structure::Tree(tree) => tree.root(),
            Structure::Graph(_) if kind.tree_only() => {
                return Err(Error::InvalidInput(format!(
                    "{} needs a binary tree",
                    kind.name()
                )))
            }
            Structure::Graph(_) => None,
        };

        let graph = structure.as_graph();
        let n = graph.node_count();
        let start = match start {
            Some(id) => Some(
                graph
                    .index_of(id)
                    .ok_or_else(|| Error::UnknownNode(id.to_string()))?,
            ),
            None if n == 0 => None,
            None => tree_root.or(Some(0)),
        };

        let work = match kind {
            TraversalKind::Bfs => {
                let mut discovered = vec![false; n];
                let mut queue = VecDeque::new();
                if let Some(s) = start {
                    discovered[s] = true;
                    queue.push_back((s, None));
                }
                Work::Breadth { queue, discovered }
            }
            TraversalKind::Dfs => Work::Depth {
                frames: Vec::new(),
                root: start,
                visited: vec![false; n],
            },
            _ => Work::Ordered {
                frames: start.map(|s| (s, 0)).into_iter().collect(),
                actions: kind.actions(),
            },
        };

        let canvas = GraphCanvas::from_graph(graph);
        Ok(Traversal {
            kind,
            structure,
            canvas,
            work,
            settling: None,
            visits: 0,
        })
    }

    pub fn kind(&self) -> TraversalKind {
        self.kind
    }

    pub fn structure_type(&self) -> StructureType {
        self.structure.structure_type()
    }

    pub fn order(&self) -> &[String] {
        &self.canvas.order
    }

    /// Next node to visit and the node it was reached from
    fn next_visit(&mut self) -> Option<(usize, Option<usize>)> {
        match &mut self.work {
            Work::Breadth { queue, .. } => queue.pop_front(),
            Work::Depth {
                frames,
                root,
                visited,
            } => {
                if let Some(r) = root.take() {
                    visited[r] = true;
                    return Some((r, None));
                }
                while let Some(frame) = frames.last_mut() {
                    match frame.neighbors.get(frame.next) {
                        Some(&v) => {
                            frame.next += 1;
                            if !visited[v] {
                                visited[v] = true;
                                return Some((v, Some(frame.node)));
                            }
                        }
                        None => {
                            frames.pop();
                        }
                    }
                }
                None
            }
            Work::Ordered { frames, actions } => {
                let Structure::Tree(tree) = &self.structure else {
                    return None;
                };
                while let Some(frame) = frames.last_mut() {
                    let (node, stage) = *frame;
                    if stage >= actions.len() {
                        frames.pop();
                        continue;
                    }
                    frame.1 += 1;
                    match actions[stage] {
                        Action::Visit => return Some((node, None)),
                        Action::Left => {
                            if let Some(child) = tree.left(node) {
                                frames.push((child, 0));
                            }
                        }
                        Action::Right => {
                            if let Some(child) = tree.right(node) {
                                frames.push((child, 0));
                            }
                        }
                    }
                }
                None
            }
        }
    }

    /// Queue or stack the successors of a node that just finished its visit
    fn expand(&mut self, node: usize) {
        let graph = self.structure.as_graph();
        match &mut self.work {
            Work::Breadth { queue, discovered } => {
                for (v, _) in graph.neighbors(node) {
                    if !discovered[v] {
                        discovered[v] = true;
                        queue.push_back((v, Some(node)));
                    }
                }
            }
            Work::Depth { frames, .. } => frames.push(DepthFrame {
                node,
                neighbors: graph.neighbors(node).map(|(v, _)| v).collect(),
                next: 0,
            }),
            Work::Ordered { .. } => {}
        }
    }

    fn complete_visit(&mut self, node: usize) {
        self.canvas.set_state(node, NodeState::Visited);
        self.canvas.record_visit(node);
        self.visits += 1;
    }
}

impl StepAlgorithm for Traversal {
    type Snapshot = GraphSnapshot<f64>;
    type Output = TraversalResult;

    fn name(&self) -> &'static str {
        self.kind.name()
    }

    fn family(&self) -> Family {
        Family::Traversal
    }

    fn step(&mut self) -> Step<TraversalResult> {
        if let Some(node) = self.settling.take() {
            self.complete_visit(node);
            self.expand(node);
            return Step::next();
        }

        self.canvas.clear_highlights();
        match self.next_visit() {
            Some((node, via)) => {
                self.canvas.set_state(node, NodeState::Visiting);
                if let Some(parent) = via {
                    self.canvas.set_highlight(parent, node, true);
                }
                self.settling = Some(node);
                Step::next()
            }
            None => Step::Finished(TraversalResult {
                order: self.canvas.order.clone(),
            }),
        }
    }

    fn snapshot(&self) -> GraphSnapshot<f64> {
        self.canvas.snapshot()
    }

    fn stats(&self) -> Stats {
        Stats {
            nodes_visited: Some(self.visits),
            ..Stats::default()
        }
    }

    fn settle(&mut self) {
        if let Some(node) = self.settling.take() {
            self.complete_visit(node);
        }
        self.canvas.settle();
    }
}

/// Run a traversal headlessly and return the visit order
pub fn traverse(kind: TraversalKind, structure: Structure, start: Option<&str>) -> Result<TraversalResult> {
    let mut run = Traversal::new(kind, structure, start)?;
    Ok(drive(&mut run, &mut NullObserver))
}
