use num_traits::{Float, NumCast};
use std::fmt::Debug;

use crate::algorithm::pathfinding::frontier::{min_by_key, relax_shorter, Frontier, Relaxation};
use crate::algorithm::pathfinding::{PathSearch, ShortestPathAlgorithm};
use crate::graph::Graph;
use crate::{Error, Result};

/// Scale applied to the straight-line distance between layout coordinates
pub const HEURISTIC_SCALE: f64 = 0.5;

/// A* search keyed on `g + 0.5 × euclidean(node, end)`
#[derive(Debug, Default, Clone, Copy)]
pub struct AStar;

impl AStar {
    pub fn new() -> Self {
        AStar
    }
}

impl<W> ShortestPathAlgorithm<W> for AStar
where
    W: Float + Debug,
{
    type Frontier = OpenSet<W>;

    fn name(&self) -> &'static str {
        "A*"
    }

    fn search<G>(&self, graph: G, start: &str, end: &str) -> Result<PathSearch<W, G, OpenSet<W>>>
    where
        G: Graph<W>,
    {
        let target = graph
            .index_of(end)
            .ok_or_else(|| Error::UnknownNode(end.to_string()))?;
        let frontier = OpenSet::new(heuristics(&graph, target));
        PathSearch::new("A*", graph, frontier, start, end)
    }
}

/// Heuristic estimate from every node to `target`
pub fn heuristics<W, G>(graph: &G, target: usize) -> Vec<W>
where
    W: Float + Debug,
    G: Graph<W> + ?Sized,
{
    let goal = graph.position(target).unwrap_or((0.0, 0.0));
    (0..graph.node_count())
        .map(|i| {
            let (x, y) = graph.position(i).unwrap_or(goal);
            let estimate = HEURISTIC_SCALE * (x - goal.0).hypot(y - goal.1);
            <W as NumCast>::from(estimate).unwrap_or_else(W::zero)
        })
        .collect()
}

/// Open set with precomputed heuristics.
///
/// A node leaves the set when selected and re-enters it whenever a shorter
/// path to it is found.
#[derive(Debug, Clone)]
pub struct OpenSet<W> {
    open: Vec<bool>,
    heuristic: Vec<W>,
}

impl<W> OpenSet<W>
where
    W: Float,
{
    pub fn new(heuristic: Vec<W>) -> Self {
        OpenSet {
            open: Vec::new(),
            heuristic,
        }
    }

    pub fn contains(&self, node: usize) -> bool {
        self.open.get(node).copied().unwrap_or(false)
    }
}

impl<W> Frontier<W> for OpenSet<W>
where
    W: Float,
{
    fn open(&mut self, start: usize, node_count: usize) {
        self.open = vec![false; node_count];
        self.open[start] = true;
    }

    fn select(&mut self, dist: &[Option<W>]) -> Option<usize> {
        let open = &self.open;
        let heuristic = &self.heuristic;
        let node = min_by_key(dist.iter().enumerate().filter(|&(i, _)| open[i]).filter_map(
            |(i, g)| {
                g.map(|g| {
                    let h = heuristic.get(i).copied().unwrap_or_else(W::zero);
                    (i, g + h)
                })
            },
        ))?;
        self.open[node] = false;
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
        let outcome = relax_shorter(from, to, weight, dist, prev);
        if outcome == Relaxation::Improved {
            self.open[to] = true;
        }
        outcome
    }
}
