use num_traits::Float;
use std::fmt::Debug;

use crate::algorithm::pathfinding::frontier::{min_by_key, relax_shorter, Frontier, Relaxation};
use crate::algorithm::pathfinding::{PathSearch, ShortestPathAlgorithm};
use crate::graph::Graph;
use crate::Result;

/// Classic Dijkstra's algorithm with a linear minimum scan
#[derive(Debug, Default, Clone, Copy)]
pub struct Dijkstra;

impl Dijkstra {
    /// Creates a new Dijkstra algorithm instance
    pub fn new() -> Self {
        Dijkstra
    }
}

impl<W> ShortestPathAlgorithm<W> for Dijkstra
where
    W: Float + Debug,
{
    type Frontier = UnvisitedSet;

    fn name(&self) -> &'static str {
        "Dijkstra"
    }

    fn search<G>(&self, graph: G, start: &str, end: &str) -> Result<PathSearch<W, G, UnvisitedSet>>
    where
        G: Graph<W>,
    {
        PathSearch::new("Dijkstra", graph, UnvisitedSet::default(), start, end)
    }
}

/// Frontier of every node not yet selected.
///
/// Only nodes with a finite tentative distance can be selected, and edges
/// into already selected nodes are skipped.
#[derive(Debug, Clone, Default)]
pub struct UnvisitedSet {
    unvisited: Vec<bool>,
}

impl<W> Frontier<W> for UnvisitedSet
where
    W: Float,
{
    fn open(&mut self, _start: usize, node_count: usize) {
        self.unvisited = vec![true; node_count];
    }

    fn select(&mut self, dist: &[Option<W>]) -> Option<usize> {
        let unvisited = &self.unvisited;
        let node = min_by_key(
            dist.iter()
                .enumerate()
                .filter(|&(i, _)| unvisited[i])
                .filter_map(|(i, d)| d.map(|d| (i, d))),
        )?;
        self.unvisited[node] = false;
        Some(node)
    }

    fn relax(
        &mut self,
        from: usize,
        to: usize,
        weight: W,
        dist: &mut [Option<W>],
        prev: &mut [Option<usize>],
    ) -> Relaxation {
        if !self.unvisited[to] {
            return Relaxation::Skipped;
        }
        relax_shorter(from, to, weight, dist, prev)
    }
}
