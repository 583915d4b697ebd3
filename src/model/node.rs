use num_traits::Float;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

use crate::graph::Graph;

/// Rendering tag carried by a graph or tree node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeState {
    #[default]
    Default,
    Visiting,
    Visited,
    InPath,
}

impl NodeState {
    pub fn settled(self) -> Self {
        match self {
            NodeState::Visiting => NodeState::Visited,
            s => s,
        }
    }
}

/// A graph/tree node as seen by the renderer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node<W> {
    pub id: String,
    pub x: f64,
    pub y: f64,
    pub state: NodeState,
    /// Tentative distance; `None` stands for infinity
    pub distance: Option<W>,
    pub previous: Option<String>,
}

/// An edge with its two animation flags
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge<W> {
    pub source: String,
    pub target: String,
    pub weight: W,
    /// Display label, e.g. a road name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub highlighted: bool,
    pub in_path: bool,
    #[serde(skip)]
    ends: (usize, usize),
}

impl<W> Edge<W> {
    /// Internal node indices of the two endpoints
    pub fn ends(&self) -> (usize, usize) {
        self.ends
    }

    fn joins(&self, a: usize, b: usize) -> bool {
        self.ends == (a, b) || self.ends == (b, a)
    }
}

/// Immutable copy of a graph run handed to the renderer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphSnapshot<W> {
    pub nodes: Vec<Node<W>>,
    pub edges: Vec<Edge<W>>,
    /// Traversal order, or visit order for pathfinding runs
    pub order: Vec<String>,
}

impl<W> GraphSnapshot<W> {
    pub fn node(&self, id: &str) -> Option<&Node<W>> {
        self.nodes.iter().find(|n| n.id == id)
    }
}

/// Mutable visual state of a graph owned by the active run.
///
/// Nodes are stored in graph index order so algorithm code can address them
/// by the same `usize` it uses against the [`Graph`] trait.
#[derive(Debug, Clone)]
pub struct GraphCanvas<W> {
    pub nodes: Vec<Node<W>>,
    pub edges: Vec<Edge<W>>,
    pub order: Vec<String>,
}

impl<W> GraphCanvas<W>
where
    W: Float + Debug,
{
    /// Lay out every node and edge record of `graph` in its default state
    pub fn from_graph<G>(graph: &G) -> Self
    where
        G: Graph<W> + ?Sized,
    {
        let nodes = (0..graph.node_count())
            .map(|i| {
                let (x, y) = graph.position(i).unwrap_or((0.0, 0.0));
                Node {
                    id: graph.node_id(i).unwrap_or_default().to_string(),
                    x,
                    y,
                    state: NodeState::Default,
                    distance: None,
                    previous: None,
                }
            })
            .collect::<Vec<_>>();

        let edges = graph
            .edges()
            .enumerate()
            .map(|(record, (a, b, weight))| Edge {
                source: nodes[a].id.clone(),
                target: nodes[b].id.clone(),
                weight,
                name: graph.edge_name(record).map(str::to_string),
                highlighted: false,
                in_path: false,
                ends: (a, b),
            })
            .collect();

        GraphCanvas {
            nodes,
            edges,
            order: Vec::new(),
        }
    }

    /// First edge record joining `a` and `b` in either direction
    pub fn edge_between(&self, a: usize, b: usize) -> Option<usize> {
        self.edges.iter().position(|e| e.joins(a, b))
    }

    pub fn set_highlight(&mut self, a: usize, b: usize, on: bool) {
        if let Some(i) = self.edge_between(a, b) {
            self.edges[i].highlighted = on;
        }
    }

    pub fn mark_in_path(&mut self, a: usize, b: usize) {
        if let Some(i) = self.edge_between(a, b) {
            self.edges[i].in_path = true;
        }
    }

    pub fn clear_highlights(&mut self) {
        for edge in &mut self.edges {
            edge.highlighted = false;
        }
    }

    pub fn set_state(&mut self, node: usize, state: NodeState) {
        self.nodes[node].state = state;
    }

    /// Append a node to the visible visit order
    pub fn record_visit(&mut self, node: usize) {
        let id = self.nodes[node].id.clone();
        self.order.push(id);
    }

    pub fn set_distance(&mut self, node: usize, distance: Option<W>, previous: Option<usize>) {
        let previous = previous.map(|p| self.nodes[p].id.clone());
        let target = &mut self.nodes[node];
        target.distance = distance;
        target.previous = previous;
    }

    /// Resolve leftover transient markers after a cut-short run
    pub fn settle(&mut self) {
        for node in &mut self.nodes {
            node.state = node.state.settled();
        }
        self.clear_highlights();
    }

    pub fn snapshot(&self) -> GraphSnapshot<W> {
        GraphSnapshot {
            nodes: self.nodes.clone(),
            edges: self.edges.clone(),
            order: self.order.clone(),
        }
    }
}
