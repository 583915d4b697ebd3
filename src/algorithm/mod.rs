mod board;
pub mod pathfinding;
pub mod searching;
pub mod sorting;
pub mod traversal;

pub use pathfinding::{AStar, BreadthFirst, Dijkstra, PathKind, PathResult, PathSearch, ShortestPathAlgorithm};
pub use searching::{search, ArraySearch, SearchKind, SearchResult};
pub use sorting::{sort, SortKind, SortResult};
pub use traversal::{traverse, Structure, StructureType, Traversal, TraversalKind, TraversalResult};
