use num_traits::Float;
use std::fmt::Debug;

use crate::algorithm::pathfinding::frontier::{Frontier, Relaxation};
use crate::algorithm::pathfinding::PathResult;
use crate::engine::{Family, Stats, Step, StepAlgorithm};
use crate::graph::Graph;
use crate::model::{GraphCanvas, GraphSnapshot, NodeState};
use crate::{Error, Result};

/// Pause after a node is selected, in milliseconds at the default speed
pub const NODE_VISIT_MS: u64 = 100;
/// Pause after an edge is relaxed
pub const EDGE_RELAX_MS: u64 = 50;
/// Pause after each edge of the final path is drawn
pub const PATH_EDGE_MS: u64 = 200;

#[derive(Debug, Clone)]
enum Phase<W> {
    Select,
    Relax {
        current: usize,
        neighbors: Vec<(usize, W)>,
        next: usize,
    },
    Trace {
        path: Vec<usize>,
        next: usize,
    },
    Done,
}

/// Step machine shared by Dijkstra, A* and BFS.
///
/// Each iteration is one node-selection step followed by one step per
/// considered edge. Once the end node is selected the predecessor chain is
/// drawn edge by edge.
#[derive(Debug, Clone)]
pub struct PathSearch<W, G, F>
where
    W: Float + Debug,
{
    name: &'static str,
    graph: G,
    frontier: F,
    canvas: GraphCanvas<W>,
    start: usize,
    end: usize,
    dist: Vec<Option<W>>,
    prev: Vec<Option<usize>>,
    phase: Phase<W>,
    current: Option<usize>,
    explored: u64,
    relaxed: u64,
}

impl<W, G, F> PathSearch<W, G, F>
where
    W: Float + Debug,
    G: Graph<W>,
    F: Frontier<W>,
{
    /// Validate the endpoints and weights and open the frontier at `start`
    pub fn new(name: &'static str, graph: G, mut frontier: F, start: &str, end: &str) -> Result<Self> {
        let start_idx = graph
            .index_of(start)
            .ok_or_else(|| Error::UnknownNode(start.to_string()))?;
        let end_idx = graph
            .index_of(end)
            .ok_or_else(|| Error::UnknownNode(end.to_string()))?;

        if let Some((_, _, w)) = graph.edges().find(|&(_, _, w)| w.is_nan() || w < W::zero()) {
            return Err(Error::NegativeWeight(w.to_f64().unwrap_or(f64::NAN)));
        }

        let n = graph.node_count();
        let mut dist = vec![None; n];
        dist[start_idx] = Some(W::zero());
        frontier.open(start_idx, n);

        let mut canvas = GraphCanvas::from_graph(&graph);
        canvas.set_distance(start_idx, Some(W::zero()), None);

        Ok(PathSearch {
            name,
            graph,
            frontier,
            canvas,
            start: start_idx,
            end: end_idx,
            dist,
            prev: vec![None; n],
            phase: Phase::Select,
            current: None,
            explored: 0,
            relaxed: 0,
        })
    }

    pub fn graph(&self) -> &G {
        &self.graph
    }

    /// Tentative distance of a node; `None` is infinity
    pub fn distance(&self, node: usize) -> Option<W> {
        self.dist.get(node).copied().flatten()
    }

    pub fn nodes_explored(&self) -> u64 {
        self.explored
    }

    fn select(&mut self) -> Step<Option<PathResult<W>>> {
        if let Some(last) = self.current.take() {
            self.canvas.set_state(last, NodeState::Visited);
        }

        let Some(node) = self.frontier.select(&self.dist) else {
            self.phase = Phase::Done;
            return Step::Finished(None);
        };

        self.explored += 1;
        self.current = Some(node);
        self.canvas.set_state(node, NodeState::Visiting);
        self.canvas.record_visit(node);

        if node == self.end {
            return match self.trace() {
                Some(path) => {
                    self.phase = Phase::Trace { path, next: 0 };
                    Step::hinted(NODE_VISIT_MS)
                }
                None => {
                    self.phase = Phase::Done;
                    Step::Finished(None)
                }
            };
        }

        let neighbors = self.graph.neighbors(node).collect();
        self.phase = Phase::Relax {
            current: node,
            neighbors,
            next: 0,
        };
        Step::hinted(NODE_VISIT_MS)
    }

    /// Walk predecessor links back from the end; `None` if the start is never reached
    fn trace(&self) -> Option<Vec<usize>> {
        let mut path = vec![self.end];
        let mut node = self.end;
        while node != self.start {
            node = self.prev[node]?;
            if path.len() > self.prev.len() {
                return None;
            }
            path.push(node);
        }
        path.reverse();
        Some(path)
    }

    fn draw_path(&mut self, path: Vec<usize>, next: usize) -> Step<Option<PathResult<W>>> {
        if next == 0 {
            self.canvas.set_state(path[0], NodeState::InPath);
        }

        if next + 1 < path.len() {
            let (a, b) = (path[next], path[next + 1]);
            self.canvas.mark_in_path(a, b);
            self.canvas.set_state(b, NodeState::InPath);
            if next + 2 < path.len() {
                self.phase = Phase::Trace {
                    path,
                    next: next + 1,
                };
                return Step::hinted(PATH_EDGE_MS);
            }
        }

        // Last edge drawn (or a single-node path): the run is complete
        let total = self.path_weight(&path);
        let ids = path
            .iter()
            .filter_map(|&i| self.graph.node_id(i).map(str::to_string))
            .collect();
        self.current = None;
        self.phase = Phase::Done;
        Step::Finished(Some(PathResult {
            path: ids,
            total_weight: total,
        }))
    }

    fn path_weight(&self, path: &[usize]) -> W {
        path.windows(2)
            .filter_map(|pair| self.graph.edge_weight(pair[0], pair[1]))
            .fold(W::zero(), |acc, w| acc + w)
    }
}

impl<W, G, F> StepAlgorithm for PathSearch<W, G, F>
where
    W: Float + Debug,
    G: Graph<W>,
    F: Frontier<W>,
{
    type Snapshot = GraphSnapshot<W>;
    type Output = Option<PathResult<W>>;

    fn name(&self) -> &'static str {
        self.name
    }

    fn family(&self) -> Family {
        Family::Pathfinding
    }

    fn step(&mut self) -> Step<Self::Output> {
        self.canvas.clear_highlights();

        loop {
            match std::mem::replace(&mut self.phase, Phase::Done) {
                Phase::Select => return self.select(),
                Phase::Relax {
                    current,
                    neighbors,
                    next,
                } => {
                    let Some(&(v, weight)) = neighbors.get(next) else {
                        self.phase = Phase::Select;
                        continue;
                    };
                    self.phase = Phase::Relax {
                        current,
                        neighbors,
                        next: next + 1,
                    };

                    let outcome = self
                        .frontier
                        .relax(current, v, weight, &mut self.dist, &mut self.prev);
                    if outcome == Relaxation::Skipped {
                        continue;
                    }
                    self.relaxed += 1;
                    self.canvas.set_highlight(current, v, true);
                    if outcome == Relaxation::Improved {
                        self.canvas.set_distance(v, self.dist[v], self.prev[v]);
                    }
                    return Step::hinted(EDGE_RELAX_MS);
                }
                Phase::Trace { path, next } => return self.draw_path(path, next),
                Phase::Done => return Step::Finished(None),
            }
        }
    }

    fn snapshot(&self) -> GraphSnapshot<W> {
        self.canvas.snapshot()
    }

    fn stats(&self) -> Stats {
        Stats {
            nodes_explored: Some(self.explored),
            edges_relaxed: Some(self.relaxed),
            ..Stats::default()
        }
    }

    fn settle(&mut self) {
        self.canvas.settle();
    }
}
