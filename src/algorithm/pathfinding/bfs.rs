use num_traits::Float;
use std::collections::VecDeque;
use std::fmt::Debug;

use crate::algorithm::pathfinding::frontier::{Frontier, Relaxation};
use crate::algorithm::pathfinding::{PathSearch, ShortestPathAlgorithm};
use crate::graph::Graph;
use crate::Result;

/// Breadth-first routing: fewest edges, weights only summed for the total
#[derive(Debug, Default, Clone, Copy)]
pub struct BreadthFirst;

impl BreadthFirst {
    pub fn new() -> Self {
        BreadthFirst
    }
}

impl<W> ShortestPathAlgorithm<W> for BreadthFirst
where
    W: Float + Debug,
{
    type Frontier = FifoQueue;

    fn name(&self) -> &'static str {
        "BFS"
    }

    fn search<G>(&self, graph: G, start: &str, end: &str) -> Result<PathSearch<W, G, FifoQueue>>
    where
        G: Graph<W>,
    {
        PathSearch::new("BFS", graph, FifoQueue::default(), start, end)
    }
}

/// FIFO queue guarded by a discovered set, so no node is enqueued twice
#[derive(Debug, Clone, Default)]
pub struct FifoQueue {
    queue: VecDeque<usize>,
    discovered: Vec<bool>,
}

impl<W> Frontier<W> for FifoQueue
where
    W: Float,
{
    fn open(&mut self, start: usize, node_count: usize) {
        self.discovered = vec![false; node_count];
        self.discovered[start] = true;
        self.queue.clear();
        self.queue.push_back(start);
    }

    fn select(&mut self, _dist: &[Option<W>]) -> Option<usize> {
        self.queue.pop_front()
    }

    fn relax(
        &mut self,
        from: usize,
        to: usize,
        weight: W,
        dist: &mut [Option<W>],
        prev: &mut [Option<usize>],
    ) -> Relaxation {
        if self.discovered[to] {
            return Relaxation::Skipped;
        }
        self.discovered[to] = true;
        // Distance along the BFS tree, in real edge weights
        dist[to] = dist[from].map(|d| d + weight);
        prev[to] = Some(from);
        self.queue.push_back(to);
        Relaxation::Improved
    }
}
