use num_traits::Float;
use std::fmt::Debug;
use std::sync::Arc;

use crate::Result;

/// Trait representing a weighted graph with string-identified, laid-out nodes.
///
/// Nodes are addressed internally by a dense `usize` index assigned in
/// insertion order; that order is also the tie-break order used by the
/// pathfinders.
pub trait Graph<W>: Debug
where
    W: Float + Debug,
{
    /// Returns the number of nodes in the graph
    fn node_count(&self) -> usize;

    /// Returns the number of edge records in the graph
    fn edge_count(&self) -> usize;

    /// Returns an iterator over the edges leaving a node
    fn neighbors(&self, node: usize) -> Box<dyn Iterator<Item = (usize, W)> + '_>;

    /// Returns every edge record once, as `(source, target, weight)`
    fn edges(&self) -> Box<dyn Iterator<Item = (usize, usize, W)> + '_>;

    /// External id of a node
    fn node_id(&self, node: usize) -> Option<&str>;

    /// Internal index of an external id
    fn index_of(&self, id: &str) -> Option<usize>;

    /// Layout coordinates of a node
    fn position(&self, node: usize) -> Option<(f64, f64)>;

    /// Label of the `record`-th entry of [`Graph::edges`], e.g. a road name
    fn edge_name(&self, _record: usize) -> Option<&str> {
        None
    }

    /// Returns true if the node exists in the graph
    fn has_node(&self, node: usize) -> bool {
        node < self.node_count()
    }

    /// Returns true if there's an edge leaving `from` towards `to`
    fn has_edge(&self, from: usize, to: usize) -> bool {
        self.edge_weight(from, to).is_some()
    }

    /// Gets the weight of an edge if it exists
    fn edge_weight(&self, from: usize, to: usize) -> Option<W> {
        self.neighbors(from)
            .find(|(target, _)| *target == to)
            .map(|(_, weight)| weight)
    }
}

/// Trait for mutable graph operations
pub trait MutableGraph<W>: Graph<W>
where
    W: Float + Debug,
{
    /// Adds a node, or moves an existing one, and returns its index
    fn add_node(&mut self, id: &str, x: f64, y: f64) -> usize;

    /// Adds an edge between two existing nodes
    fn add_edge(&mut self, source: &str, target: &str, weight: W) -> Result<()>;

    /// Removes every edge record between two nodes
    fn remove_edge(&mut self, source: &str, target: &str) -> bool;
}

impl<W, G> Graph<W> for &G
where
    W: Float + Debug,
    G: Graph<W> + ?Sized,
{
    fn node_count(&self) -> usize {
        (**self).node_count()
    }

    fn edge_count(&self) -> usize {
        (**self).edge_count()
    }

    fn neighbors(&self, node: usize) -> Box<dyn Iterator<Item = (usize, W)> + '_> {
        (**self).neighbors(node)
    }

    fn edges(&self) -> Box<dyn Iterator<Item = (usize, usize, W)> + '_> {
        (**self).edges()
    }

    fn node_id(&self, node: usize) -> Option<&str> {
        (**self).node_id(node)
    }

    fn index_of(&self, id: &str) -> Option<usize> {
        (**self).index_of(id)
    }

    fn position(&self, node: usize) -> Option<(f64, f64)> {
        (**self).position(node)
    }

    fn edge_name(&self, record: usize) -> Option<&str> {
        (**self).edge_name(record)
    }
}

impl<W, G> Graph<W> for Arc<G>
where
    W: Float + Debug,
    G: Graph<W> + ?Sized,
{
    fn node_count(&self) -> usize {
        (**self).node_count()
    }

    fn edge_count(&self) -> usize {
        (**self).edge_count()
    }

    fn neighbors(&self, node: usize) -> Box<dyn Iterator<Item = (usize, W)> + '_> {
        (**self).neighbors(node)
    }

    fn edges(&self) -> Box<dyn Iterator<Item = (usize, usize, W)> + '_> {
        (**self).edges()
    }

    fn node_id(&self, node: usize) -> Option<&str> {
        (**self).node_id(node)
    }

    fn index_of(&self, id: &str) -> Option<usize> {
        (**self).index_of(id)
    }

    fn position(&self, node: usize) -> Option<(f64, f64)> {
        (**self).position(node)
    }

    fn edge_name(&self, record: usize) -> Option<&str> {
        (**self).edge_name(record)
    }
}
