//! algoviz - step-by-step execution engine for algorithm animations
//!
//! Sorting, searching, traversal and shortest-path algorithms are written as
//! resumable step machines. A [`Scheduler`] drives one step at a time,
//! checking its [`RunController`] between steps so that pause, resume, stop
//! and speed changes take effect at the next step boundary. After every
//! step the renderer receives its own snapshot of the model and a stats
//! report.

pub mod algorithm;
pub mod engine;
pub mod graph;
pub mod model;
pub mod visualizer;
pub mod web;

pub use algorithm::{
    AStar, BreadthFirst, Dijkstra, PathKind, PathResult, SearchKind, SearchResult,
    ShortestPathAlgorithm, SortKind, SortResult, Structure, StructureType, TraversalKind,
    TraversalResult,
};
/// Re-export main types for convenient use
pub use engine::{
    drive, Family, Observer, Outcome, Recorder, RunController, RunState, Scheduler, SpeedProfile,
    Stats, Step, StepAlgorithm,
};
pub use graph::{BinaryTree, Graph, GraphInput, MutableGraph, TreeInput, UndirectedGraph};
pub use visualizer::{AlgorithmId, RunParams, RunReport, RunRequest, Snapshot, Visualizer};

/// Error types for the library
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Unknown node: {0}")]
    UnknownNode(String),

    #[error("Negative edge weight: {0}")]
    NegativeWeight(f64),

    #[error("Unknown algorithm: {0}")]
    UnknownAlgorithm(String),

    #[error("A run is already in progress; stop it first")]
    RunInProgress,
}

impl Error {
    /// True for every error caused by the caller's input rather than by state
    pub fn is_invalid_input(&self) -> bool {
        !matches!(self, Error::RunInProgress)
    }
}

/// Result type for the library
pub type Result<T> = std::result::Result<T, Error>;
