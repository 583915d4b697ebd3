use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::Error;

/// Result of advancing an algorithm by one step
#[derive(Debug, Clone, PartialEq)]
pub enum Step<T> {
    /// One renderable unit of progress was applied. A `Some` delay hint
    /// replaces the controller's per-step delay (it is still speed-scaled).
    Continue(Option<Duration>),
    /// The algorithm finished; its last mutation is already applied.
    Finished(T),
}

impl<T> Step<T> {
    /// A step that uses the controller's configured delay
    pub fn next() -> Self {
        Step::Continue(None)
    }

    /// A step with an explicit delay hint in milliseconds
    pub fn hinted(ms: u64) -> Self {
        Step::Continue(Some(Duration::from_millis(ms)))
    }

    /// A step rendered without any pause after it
    pub fn immediate() -> Self {
        Step::Continue(Some(Duration::ZERO))
    }

    pub fn is_finished(&self) -> bool {
        matches!(self, Step::Finished(_))
    }
}

/// Algorithm family; each has its own speed curve
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Family {
    Sorting,
    Searching,
    Traversal,
    Pathfinding,
}

impl Family {
    pub const ALL: [Family; 4] = [
        Family::Sorting,
        Family::Searching,
        Family::Traversal,
        Family::Pathfinding,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Family::Sorting => "sorting",
            Family::Searching => "searching",
            Family::Traversal => "traversal",
            Family::Pathfinding => "pathfinding",
        }
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Family {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Family::ALL
            .into_iter()
            .find(|family| family.as_str() == s)
            .ok_or_else(|| Error::InvalidInput(format!("unknown algorithm family: {}", s)))
    }
}

/// Scalar counters forwarded to the stat callback.
///
/// Only the fields meaningful for the running family are set; the others
/// stay `None` and are left out of the serialized form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comparisons: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub swaps: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elements_visited: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_index: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nodes_visited: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nodes_explored: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edges_relaxed: Option<u64>,
}

/// An algorithm expressed as a resumable sequence of steps.
///
/// Implementations keep all of their progress (loop indices, work stacks,
/// frontiers) in `self`, so a run can be suspended or abandoned between any
/// two calls to [`step`](StepAlgorithm::step) without leaving native call
/// frames behind.
pub trait StepAlgorithm {
    /// Immutable copy handed to the render callback
    type Snapshot: Clone;

    /// Terminal value of a completed run
    type Output;

    /// Get the name of the algorithm
    fn name(&self) -> &'static str;

    fn family(&self) -> Family;

    /// Apply exactly one step of mutation to the owned model
    fn step(&mut self) -> Step<Self::Output>;

    fn snapshot(&self) -> Self::Snapshot;

    fn stats(&self) -> Stats;

    /// Resolve transient markers after the run was cut short
    fn settle(&mut self);
}

impl<A> StepAlgorithm for Box<A>
where
    A: StepAlgorithm + ?Sized,
{
    type Snapshot = A::Snapshot;
    type Output = A::Output;

    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn family(&self) -> Family {
        (**self).family()
    }

    fn step(&mut self) -> Step<Self::Output> {
        (**self).step()
    }

    fn snapshot(&self) -> Self::Snapshot {
        (**self).snapshot()
    }

    fn stats(&self) -> Stats {
        (**self).stats()
    }

    fn settle(&mut self) {
        (**self).settle()
    }
}
