//! One visualizer instance: a run controller, its scheduler and the request
//! builder that turns `(algorithm, params)` into a ready-to-drive run.
//!
//! Every input problem (unknown algorithm, missing data, unknown start or
//! end node, negative weights) is reported by [`Visualizer::prepare`] before
//! the first step.

use log::info;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use crate::algorithm::pathfinding::BoxedPath;
use crate::algorithm::sorting::BoxedSort;
use crate::algorithm::{
    ArraySearch, PathKind, PathResult, SearchKind, SearchResult, SortKind, SortResult, Structure,
    StructureType, Traversal, TraversalKind, TraversalResult,
};
use crate::engine::{
    ActiveRun, EngineConfig, Family, Observer, Outcome, RunController, RunState, Scheduler,
    SpeedProfile, Stats, Step, StepAlgorithm,
};
use crate::graph::{BinaryTree, GraphInput, TreeInput, UndirectedGraph};
use crate::model::{ArraySnapshot, GraphSnapshot};
use crate::{Error, Result};

/// A concrete algorithm within its family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AlgorithmId {
    Sort(SortKind),
    Search(SearchKind),
    Traverse(TraversalKind),
    Path(PathKind),
}

impl AlgorithmId {
    /// Parse an algorithm name scoped to `family`, e.g. `(Pathfinding, "bfs")`
    pub fn parse(family: Family, name: &str) -> Result<Self> {
        Ok(match family {
            Family::Sorting => AlgorithmId::Sort(name.parse()?),
            Family::Searching => AlgorithmId::Search(name.parse()?),
            Family::Traversal => AlgorithmId::Traverse(name.parse()?),
            Family::Pathfinding => AlgorithmId::Path(name.parse()?),
        })
    }

    pub fn family(self) -> Family {
        match self {
            AlgorithmId::Sort(_) => Family::Sorting,
            AlgorithmId::Search(_) => Family::Searching,
            AlgorithmId::Traverse(_) => Family::Traversal,
            AlgorithmId::Path(_) => Family::Pathfinding,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            AlgorithmId::Sort(kind) => kind.name(),
            AlgorithmId::Search(kind) => kind.name(),
            AlgorithmId::Traverse(kind) => kind.name(),
            AlgorithmId::Path(kind) => kind.name(),
        }
    }
}

impl fmt::Display for AlgorithmId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Accepts `family:name`, e.g. `sorting:quick` or `pathfinding:astar`
impl FromStr for AlgorithmId {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let (family, name) = s
            .split_once(':')
            .ok_or_else(|| Error::UnknownAlgorithm(s.to_string()))?;
        AlgorithmId::parse(family.parse()?, name)
    }
}

/// Source data for a run; which fields are needed depends on the family
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub values: Option<Vec<i64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub graph: Option<GraphInput>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tree: Option<TreeInput>,
    /// Defaults to `tree` when a tree is given, `graph` otherwise
    #[serde(default, alias = "structureType", skip_serializing_if = "Option::is_none")]
    pub structure: Option<StructureType>,
    #[serde(default, alias = "startId", skip_serializing_if = "Option::is_none")]
    pub start_id: Option<String>,
    #[serde(default, alias = "endId", skip_serializing_if = "Option::is_none")]
    pub end_id: Option<String>,
}

impl RunParams {
    pub fn array(values: Vec<i64>) -> Self {
        RunParams {
            values: Some(values),
            ..Self::default()
        }
    }

    pub fn search(values: Vec<i64>, target: i64) -> Self {
        RunParams {
            values: Some(values),
            target: Some(target),
            ..Self::default()
        }
    }

    pub fn tree(tree: TreeInput) -> Self {
        RunParams {
            tree: Some(tree),
            structure: Some(StructureType::Tree),
            ..Self::default()
        }
    }

    pub fn graph(graph: GraphInput) -> Self {
        RunParams {
            graph: Some(graph),
            structure: Some(StructureType::Graph),
            ..Self::default()
        }
    }

    pub fn route(graph: GraphInput, start_id: &str, end_id: &str) -> Self {
        RunParams {
            graph: Some(graph),
            start_id: Some(start_id.to_string()),
            end_id: Some(end_id.to_string()),
            ..Self::default()
        }
    }

    fn require_values(&self) -> Result<&[i64]> {
        self.values
            .as_deref()
            .ok_or_else(|| Error::InvalidInput("values are required".to_string()))
    }

    fn require_graph(&self) -> Result<UndirectedGraph<f64>> {
        let input = self
            .graph
            .as_ref()
            .ok_or_else(|| Error::InvalidInput("graph is required".to_string()))?;
        UndirectedGraph::from_input(input)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RunRequest {
    pub algorithm: AlgorithmId,
    pub params: RunParams,
}

impl RunRequest {
    pub fn new(algorithm: AlgorithmId, params: RunParams) -> Self {
        RunRequest { algorithm, params }
    }
}

/// Snapshot of any family, as handed to a type-erased renderer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Snapshot {
    Array(ArraySnapshot),
    Graph(GraphSnapshot<f64>),
}

/// Terminal value of any family
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "result", rename_all = "snake_case")]
pub enum RunReport {
    Sorted(SortResult),
    Search(SearchResult),
    Traversal(TraversalResult),
    /// `None` when the end node was unreachable
    Path(Option<PathResult<f64>>),
}

/// A validated run, ready to be driven
pub enum PreparedRun {
    Sort(BoxedSort),
    Search(ArraySearch),
    Traversal(Traversal),
    Path(BoxedPath<f64>),
}

impl fmt::Debug for PreparedRun {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("PreparedRun").field(&self.name()).finish()
    }
}

impl PreparedRun {
    /// Validate `request` and build the matching step machine
    pub fn build(request: &RunRequest) -> Result<Self> {
        let params = &request.params;
        Ok(match request.algorithm {
            AlgorithmId::Sort(kind) => PreparedRun::Sort(kind.build(params.require_values()?)),
            AlgorithmId::Search(kind) => {
                let values = params.require_values()?;
                let target = params
                    .target
                    .ok_or_else(|| Error::InvalidInput("target is required".to_string()))?;
                if kind.requires_sorted() && values.windows(2).any(|w| w[0] > w[1]) {
                    return Err(Error::InvalidInput(format!(
                        "{} needs values sorted ascending",
                        kind.name()
                    )));
                }
                PreparedRun::Search(kind.build(values, target))
            }
            AlgorithmId::Traverse(kind) => {
                let structure_type = params.structure.unwrap_or(if params.tree.is_some() {
                    StructureType::Tree
                } else {
                    StructureType::Graph
                });
                let structure = match structure_type {
                    StructureType::Tree => {
                        let input = params
                            .tree
                            .as_ref()
                            .ok_or_else(|| Error::InvalidInput("tree is required".to_string()))?;
                        Structure::Tree(BinaryTree::from_input(input)?)
                    }
                    StructureType::Graph => Structure::Graph(params.require_graph()?),
                };
                PreparedRun::Traversal(Traversal::new(kind, structure, params.start_id.as_deref())?)
            }
            AlgorithmId::Path(kind) => {
                let start = params
                    .start_id
                    .as_deref()
                    .ok_or_else(|| Error::InvalidInput("start node is required".to_string()))?;
                let end = params
                    .end_id
                    .as_deref()
                    .ok_or_else(|| Error::InvalidInput("end node is required".to_string()))?;
                PreparedRun::Path(kind.build(params.require_graph()?, start, end)?)
            }
        })
    }
}

fn wrap<T>(step: Step<T>, report: impl FnOnce(T) -> RunReport) -> Step<RunReport> {
    match step {
        Step::Continue(hint) => Step::Continue(hint),
        Step::Finished(output) => Step::Finished(report(output)),
    }
}

impl StepAlgorithm for PreparedRun {
    type Snapshot = Snapshot;
    type Output = RunReport;

    fn name(&self) -> &'static str {
        match self {
            PreparedRun::Sort(run) => run.name(),
            PreparedRun::Search(run) => run.name(),
            PreparedRun::Traversal(run) => run.name(),
            PreparedRun::Path(run) => run.name(),
        }
    }

    fn family(&self) -> Family {
        match self {
            PreparedRun::Sort(_) => Family::Sorting,
            PreparedRun::Search(_) => Family::Searching,
            PreparedRun::Traversal(_) => Family::Traversal,
            PreparedRun::Path(_) => Family::Pathfinding,
        }
    }

    fn step(&mut self) -> Step<RunReport> {
        match self {
            PreparedRun::Sort(run) => wrap(run.step(), RunReport::Sorted),
            PreparedRun::Search(run) => wrap(run.step(), RunReport::Search),
            PreparedRun::Traversal(run) => wrap(run.step(), RunReport::Traversal),
            PreparedRun::Path(run) => wrap(run.step(), RunReport::Path),
        }
    }

    fn snapshot(&self) -> Snapshot {
        match self {
            PreparedRun::Sort(run) => Snapshot::Array(run.snapshot()),
            PreparedRun::Search(run) => Snapshot::Array(run.snapshot()),
            PreparedRun::Traversal(run) => Snapshot::Graph(run.snapshot()),
            PreparedRun::Path(run) => Snapshot::Graph(run.snapshot()),
        }
    }

    fn stats(&self) -> Stats {
        match self {
            PreparedRun::Sort(run) => run.stats(),
            PreparedRun::Search(run) => run.stats(),
            PreparedRun::Traversal(run) => run.stats(),
            PreparedRun::Path(run) => run.stats(),
        }
    }

    fn settle(&mut self) {
        match self {
            PreparedRun::Sort(run) => run.settle(),
            PreparedRun::Search(run) => run.settle(),
            PreparedRun::Traversal(run) => run.settle(),
            PreparedRun::Path(run) => run.settle(),
        }
    }
}

/// The control surface of one visualization instance
#[derive(Debug, Clone)]
pub struct Visualizer {
    family: Family,
    scheduler: Scheduler,
}

impl Visualizer {
    pub fn new(family: Family) -> Self {
        Self::with_config(family, EngineConfig::default())
    }

    pub fn with_config(family: Family, config: EngineConfig) -> Self {
        let controller = RunController::with_config(SpeedProfile::for_family(family), config);
        Visualizer {
            family,
            scheduler: Scheduler::new(Arc::new(controller)),
        }
    }

    pub fn family(&self) -> Family {
        self.family
    }

    pub fn controller(&self) -> &Arc<RunController> {
        self.scheduler.controller()
    }

    pub fn state(&self) -> RunState {
        self.controller().state()
    }

    /// Validate a request without claiming the controller
    pub fn prepare(&self, request: &RunRequest) -> Result<PreparedRun> {
        if request.algorithm.family() != self.family {
            return Err(Error::InvalidInput(format!(
                "{} is not a {} algorithm",
                request.algorithm,
                self.family
            )));
        }
        PreparedRun::build(request)
    }

    /// Validate a request and claim the controller; the run is driven later.
    ///
    /// All failures surface here, synchronously, before any step.
    pub fn begin(&self, request: &RunRequest) -> Result<(ActiveRun, PreparedRun)> {
        let prepared = self.prepare(request)?;
        let run = self.scheduler.begin()?;
        info!("starting {} on a {} visualizer", prepared.name(), self.family);
        Ok((run, prepared))
    }

    /// Validate, claim and drive a run to completion or cancellation
    pub async fn start<O>(&self, request: &RunRequest, observer: &mut O) -> Result<Outcome<RunReport>>
    where
        O: Observer<Snapshot>,
    {
        let (run, mut prepared) = self.begin(request)?;
        Ok(run.drive(&mut prepared, observer).await)
    }

    pub fn pause(&self) -> bool {
        self.controller().pause()
    }

    pub fn resume(&self) -> bool {
        self.controller().resume()
    }

    pub fn toggle_pause(&self) -> bool {
        self.controller().toggle_pause()
    }

    pub fn stop(&self) {
        self.controller().stop()
    }

    pub fn set_speed(&self, percent: u8) -> Duration {
        self.controller().set_speed(percent)
    }
}
