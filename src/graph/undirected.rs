use num_traits::{Float, NumCast};
use std::collections::HashMap;
use std::fmt::Debug;

use crate::graph::input::GraphInput;
use crate::graph::traits::{Graph, MutableGraph};
use crate::{Error, Result};

/// Layout data for one node
#[derive(Debug, Clone, PartialEq)]
struct NodeInfo {
    id: String,
    x: f64,
    y: f64,
}

/// An undirected weighted graph using adjacency lists.
///
/// Every edge record is kept as given (duplicates included) for rendering,
/// while the adjacency holds one symmetric entry per neighbour pair whose
/// weight is the last one written.
#[derive(Debug, Clone)]
pub struct UndirectedGraph<W>
where
    W: Float + Debug,
{
    nodes: Vec<NodeInfo>,

    /// External id -> node index
    index: HashMap<String, usize>,

    /// node -> [(neighbour, weight)]
    adjacency: Vec<Vec<(usize, W)>>,

    /// Edge records in input order
    records: Vec<(usize, usize, W)>,

    /// Optional label per edge record
    names: Vec<Option<String>>,
}

impl<W> UndirectedGraph<W>
where
    W: Float + Debug,
{
    /// Creates a new empty graph
    pub fn new() -> Self {
        UndirectedGraph {
            nodes: Vec::new(),
            index: HashMap::new(),
            adjacency: Vec::new(),
            records: Vec::new(),
            names: Vec::new(),
        }
    }

    /// Creates a new graph with room for `nodes` nodes
    pub fn with_capacity(nodes: usize) -> Self {
        UndirectedGraph {
            nodes: Vec::with_capacity(nodes),
            index: HashMap::with_capacity(nodes),
            adjacency: Vec::with_capacity(nodes),
            records: Vec::new(),
            names: Vec::new(),
        }
    }

    /// Builds a graph from the `{nodes, edges}` input format
    pub fn from_input(input: &GraphInput) -> Result<Self> {
        let mut graph = UndirectedGraph::with_capacity(input.nodes.len());

        for node in &input.nodes {
            graph.add_node(&node.id, node.x, node.y);
        }

        for edge in &input.edges {
            let weight = <W as NumCast>::from(edge.weight).ok_or_else(|| {
                Error::InvalidInput(format!("unrepresentable weight: {}", edge.weight))
            })?;
            graph.add_named_edge(&edge.source, &edge.target, weight, edge.name.as_deref())?;
        }

        Ok(graph)
    }

    /// Adds an edge record carrying a display label
    pub fn add_named_edge(&mut self, source: &str, target: &str, weight: W, name: Option<&str>) -> Result<()> {
        let from = self.require(source)?;
        let to = self.require(target)?;

        if weight.is_nan() || weight < W::zero() {
            return Err(Error::NegativeWeight(weight.to_f64().unwrap_or(f64::NAN)));
        }

        // Both directions so that adjacency stays symmetric
        self.upsert_adjacent(from, to, weight);
        self.upsert_adjacent(to, from, weight);
        self.records.push((from, to, weight));
        self.names.push(name.map(str::to_string));
        Ok(())
    }

    /// Looks up a node index, failing with `UnknownNode`
    pub fn require(&self, id: &str) -> Result<usize> {
        self.index_of(id)
            .ok_or_else(|| Error::UnknownNode(id.to_string()))
    }

    /// Node ids in insertion order
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.nodes.iter().map(|n| n.id.as_str())
    }

    fn upsert_adjacent(&mut self, from: usize, to: usize, weight: W) {
        let list = &mut self.adjacency[from];
        match list.iter_mut().find(|(target, _)| *target == to) {
            Some(entry) => entry.1 = weight,
            None => list.push((to, weight)),
        }
    }
}

impl<W> Default for UndirectedGraph<W>
where
    W: Float + Debug,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<W> Graph<W> for UndirectedGraph<W>
where
    W: Float + Debug,
{
    fn node_count(&self) -> usize {
        self.nodes.len()
    }

    fn edge_count(&self) -> usize {
        self.records.len()
    }

    fn neighbors(&self, node: usize) -> Box<dyn Iterator<Item = (usize, W)> + '_> {
        match self.adjacency.get(node) {
            Some(list) => Box::new(list.iter().copied()),
            None => Box::new(std::iter::empty()),
        }
    }

    fn edges(&self) -> Box<dyn Iterator<Item = (usize, usize, W)> + '_> {
        Box::new(self.records.iter().copied())
    }

    fn node_id(&self, node: usize) -> Option<&str> {
        self.nodes.get(node).map(|n| n.id.as_str())
    }

    fn index_of(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    fn position(&self, node: usize) -> Option<(f64, f64)> {
        self.nodes.get(node).map(|n| (n.x, n.y))
    }

    fn edge_name(&self, record: usize) -> Option<&str> {
        self.names.get(record).and_then(|n| n.as_deref())
    }
}

impl<W> MutableGraph<W> for UndirectedGraph<W>
where
    W: Float + Debug,
{
    fn add_node(&mut self, id: &str, x: f64, y: f64) -> usize {
        if let Some(&existing) = self.index.get(id) {
            self.nodes[existing].x = x;
            self.nodes[existing].y = y;
            return existing;
        }

        let new_index = self.nodes.len();
        self.nodes.push(NodeInfo {
            id: id.to_string(),
            x,
            y,
        });
        self.index.insert(id.to_string(), new_index);
        self.adjacency.push(Vec::new());
        new_index
    }

    fn add_edge(&mut self, source: &str, target: &str, weight: W) -> Result<()> {
        self.add_named_edge(source, target, weight, None)
    }

    fn remove_edge(&mut self, source: &str, target: &str) -> bool {
        let (Some(from), Some(to)) = (self.index_of(source), self.index_of(target)) else {
            return false;
        };

        let len_before = self.records.len();
        let joins = |&(a, b, _): &(usize, usize, W)| (a == from && b == to) || (a == to && b == from);
        let (records, names): (Vec<_>, Vec<_>) = self
            .records
            .iter()
            .zip(self.names.drain(..))
            .filter(|(record, _)| !joins(*record))
            .map(|(record, name)| (*record, name))
            .unzip();
        self.records = records;
        self.names = names;
        self.adjacency[from].retain(|(t, _)| *t != to);
        self.adjacency[to].retain(|(t, _)| *t != from);

        len_before > self.records.len()
    }
}
