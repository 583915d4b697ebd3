use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use uuid::Uuid;

use crate::engine::{Family, Outcome, RunState, Stats};
use crate::graph::GraphInput;
use crate::visualizer::{RunParams, RunReport, Snapshot};

/// Request body for creating a visualizer
#[derive(Debug, Deserialize)]
pub struct CreateVisualizerRequest {
    pub family: Family,
}

/// Request body for starting a run
#[derive(Debug, Deserialize)]
pub struct StartRequest {
    /// Algorithm name within the visualizer's family, e.g. `quick` or `astar`
    pub algorithm: String,
    #[serde(default)]
    pub params: RunParams,
}

#[derive(Debug, Deserialize)]
pub struct SpeedRequest {
    pub speed: u8,
}

#[derive(Debug, Default, Deserialize)]
pub struct FramesQuery {
    #[serde(default)]
    pub since: Option<usize>,
}

/// Lifecycle of the latest run of a visualizer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    Idle,
    Running,
    Completed,
    Cancelled,
}

/// One rendered step
#[derive(Debug, Clone, Serialize)]
pub struct FrameRecord {
    pub index: usize,
    pub snapshot: Snapshot,
    pub stats: Stats,
}

#[derive(Debug, Serialize)]
pub struct FramesResponse {
    pub frames: Vec<FrameRecord>,
    /// Index to pass as `since` on the next poll
    pub next: usize,
    /// Frames evicted from the bounded log before they were read
    pub dropped: usize,
}

/// Frames and outcome of the latest run, bounded to `max_frames` entries
#[derive(Debug)]
pub struct RunLog {
    pub frames: VecDeque<FrameRecord>,
    pub next_index: usize,
    pub max_frames: usize,
    pub algorithm: Option<String>,
    pub status: RunStatus,
    pub report: Option<RunReport>,
    pub started_at: Option<DateTime<Utc>>,
    pub finished_at: Option<DateTime<Utc>>,
    /// Bumped by every reset; writes tagged with an older run are dropped
    pub run: u64,
}

impl RunLog {
    pub fn new(max_frames: usize) -> Self {
        RunLog {
            frames: VecDeque::new(),
            next_index: 0,
            max_frames: max_frames.max(1),
            algorithm: None,
            status: RunStatus::Idle,
            report: None,
            started_at: None,
            finished_at: None,
            run: 0,
        }
    }

    /// Forget the previous run and mark a new one as running.
    /// Returns the token the new run must present on every write.
    pub fn reset(&mut self, algorithm: &str) -> u64 {
        self.frames.clear();
        self.next_index = 0;
        self.algorithm = Some(algorithm.to_string());
        self.status = RunStatus::Running;
        self.report = None;
        self.started_at = Some(Utc::now());
        self.finished_at = None;
        self.run += 1;
        self.run
    }

    pub fn push(&mut self, run: u64, snapshot: Snapshot) {
        if run != self.run {
            return;
        }
        if self.frames.len() == self.max_frames {
            self.frames.pop_front();
        }
        self.frames.push_back(FrameRecord {
            index: self.next_index,
            snapshot,
            stats: Stats::default(),
        });
        self.next_index += 1;
    }

    /// Attach stats to the most recent frame
    pub fn attach_stats(&mut self, run: u64, stats: &Stats) {
        if run != self.run {
            return;
        }
        if let Some(frame) = self.frames.back_mut() {
            frame.stats = stats.clone();
        }
    }

    pub fn finish(&mut self, run: u64, outcome: Outcome<RunReport>) {
        if run != self.run {
            return;
        }
        self.finished_at = Some(Utc::now());
        match outcome {
            Outcome::Completed(report) => {
                self.status = RunStatus::Completed;
                self.report = Some(report);
            }
            Outcome::Cancelled => self.status = RunStatus::Cancelled,
        }
    }

    pub fn since(&self, since: usize) -> FramesResponse {
        let oldest = self.frames.front().map(|f| f.index).unwrap_or(self.next_index);
        FramesResponse {
            frames: self
                .frames
                .iter()
                .filter(|f| f.index >= since)
                .cloned()
                .collect(),
            next: self.next_index,
            dropped: oldest.saturating_sub(since),
        }
    }
}

/// Public view of a visualizer
#[derive(Debug, Clone, Serialize)]
pub struct VisualizerView {
    pub id: Uuid,
    pub family: Family,
    pub state: RunState,
    pub status: RunStatus,
    pub algorithm: Option<String>,
    pub frame_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report: Option<RunReport>,
    /// Search runs only: index of the target, or -1 when it was not found
    #[serde(skip_serializing_if = "Option::is_none")]
    pub found_index: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub started_at: Option<DateTime<Utc>>,
    pub finished_at: Option<DateTime<Utc>>,
}

/// Request body for a synchronous route query
#[derive(Debug, Deserialize)]
pub struct FindPathRequest {
    #[serde(default = "default_route_algorithm")]
    pub algorithm: String,
    pub graph: GraphInput,
    #[serde(alias = "startId")]
    pub start_id: String,
    #[serde(alias = "endId")]
    pub end_id: String,
}

fn default_route_algorithm() -> String {
    "dijkstra".to_string()
}

#[derive(Debug, Deserialize)]
pub struct CompareRequest {
    pub graph: GraphInput,
    #[serde(alias = "startId")]
    pub start_id: String,
    #[serde(alias = "endId")]
    pub end_id: String,
    /// Defaults to every routing algorithm
    #[serde(default)]
    pub algorithms: Vec<String>,
}

/// Outcome of one headless route query
#[derive(Debug, Clone, Serialize)]
pub struct RouteResponse {
    pub algorithm: String,
    pub found: bool,
    pub path: Vec<String>,
    pub total_weight: Option<f64>,
    pub nodes_explored: u64,
    pub execution_time_ms: f64,
}

#[derive(Debug, Serialize)]
pub struct CompareResponse {
    pub comparison_id: Uuid,
    pub routes: Vec<RouteResponse>,
}

/// Error response for API
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub details: Option<serde_json::Value>,
}
