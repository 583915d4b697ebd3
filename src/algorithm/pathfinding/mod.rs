//! Shortest-path routing over weighted undirected graphs.
//!
//! Dijkstra, A* and BFS share one step machine, [`PathSearch`], and differ
//! only in their [`Frontier`]: which node is expanded next and whether an
//! edge into a node is still considered.

pub mod astar;
pub mod bfs;
pub mod dijkstra;
pub mod frontier;
pub mod search;

use num_traits::Float;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Debug};
use std::str::FromStr;

use crate::engine::{drive, NullObserver, StepAlgorithm};
use crate::graph::Graph;
use crate::model::GraphSnapshot;
use crate::{Error, Result};

pub use astar::AStar;
pub use bfs::BreadthFirst;
pub use dijkstra::Dijkstra;
pub use frontier::{Frontier, Relaxation};
pub use search::PathSearch;

/// A route from start to end
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathResult<W> {
    /// Node ids from start to end, both included
    pub path: Vec<String>,
    /// Sum of the actual edge weights along `path`
    pub total_weight: W,
}

/// Trait for the routing algorithms
pub trait ShortestPathAlgorithm<W>
where
    W: Float + Debug,
{
    type Frontier: Frontier<W>;

    /// Get the name of the algorithm
    fn name(&self) -> &'static str;

    /// Prepare a stepwise search; fails on unknown ids or negative weights
    fn search<G>(&self, graph: G, start: &str, end: &str) -> Result<PathSearch<W, G, Self::Frontier>>
    where
        G: Graph<W>;

    /// Run the search headlessly. `Ok(None)` means the end is unreachable.
    fn find_path<G>(&self, graph: G, start: &str, end: &str) -> Result<Option<PathResult<W>>>
    where
        G: Graph<W>,
    {
        let mut search = self.search(graph, start, end)?;
        Ok(drive(&mut search, &mut NullObserver))
    }
}

/// Boxed pathfinding run, as produced by [`PathKind::build`]
pub type BoxedPath<W> =
    Box<dyn StepAlgorithm<Snapshot = GraphSnapshot<W>, Output = Option<PathResult<W>>> + Send>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PathKind {
    Dijkstra,
    #[serde(rename = "astar")]
    AStar,
    Bfs,
}

impl PathKind {
    pub const ALL: [PathKind; 3] = [PathKind::Dijkstra, PathKind::AStar, PathKind::Bfs];

    pub fn name(self) -> &'static str {
        match self {
            PathKind::Dijkstra => "Dijkstra",
            PathKind::AStar => "A*",
            PathKind::Bfs => "BFS",
        }
    }

    /// Prepare a boxed stepwise search over an owned graph
    pub fn build<W, G>(self, graph: G, start: &str, end: &str) -> Result<BoxedPath<W>>
    where
        W: Float + Debug + Send + 'static,
        G: Graph<W> + Send + 'static,
    {
        Ok(match self {
            PathKind::Dijkstra => {
                Box::new(<Dijkstra as ShortestPathAlgorithm<W>>::search(&Dijkstra, graph, start, end)?)
            }
            PathKind::AStar => {
                Box::new(<AStar as ShortestPathAlgorithm<W>>::search(&AStar, graph, start, end)?)
            }
            PathKind::Bfs => Box::new(<BreadthFirst as ShortestPathAlgorithm<W>>::search(
                &BreadthFirst,
                graph,
                start,
                end,
            )?),
        })
    }

    /// Headless search that also reports how many nodes were expanded
    pub fn explore<W, G>(self, graph: G, start: &str, end: &str) -> Result<(Option<PathResult<W>>, u64)>
    where
        W: Float + Debug,
        G: Graph<W>,
    {
        fn run<W, G, A>(algorithm: A, graph: G, start: &str, end: &str) -> Result<(Option<PathResult<W>>, u64)>
        where
            W: Float + Debug,
            G: Graph<W>,
            A: ShortestPathAlgorithm<W>,
        {
            let mut search = algorithm.search(graph, start, end)?;
            let route = drive(&mut search, &mut NullObserver);
            Ok((route, search.nodes_explored()))
        }

        match self {
            PathKind::Dijkstra => run(Dijkstra, graph, start, end),
            PathKind::AStar => run(AStar, graph, start, end),
            PathKind::Bfs => run(BreadthFirst, graph, start, end),
        }
    }

    pub fn find_path<W, G>(self, graph: G, start: &str, end: &str) -> Result<Option<PathResult<W>>>
    where
        W: Float + Debug,
        G: Graph<W>,
    {
        Ok(self.explore(graph, start, end)?.0)
    }
}

impl fmt::Display for PathKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PathKind {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "dijkstra" => Ok(PathKind::Dijkstra),
            "astar" | "a*" => Ok(PathKind::AStar),
            "bfs" => Ok(PathKind::Bfs),
            other => Err(Error::UnknownAlgorithm(other.to_string())),
        }
    }
}
