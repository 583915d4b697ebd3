use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use chrono::{DateTime, Utc};
use log::{info, warn};
use rand::thread_rng;
use rayon::prelude::*;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Instant;
use uuid::Uuid;

use crate::algorithm::PathKind;
use crate::engine::{Family, Observer, Stats};
use crate::graph::generators;
use crate::graph::UndirectedGraph;
use crate::visualizer::{AlgorithmId, RunReport, RunRequest, Snapshot, Visualizer};
use crate::web::models::*;
use crate::web::server::ServerConfig;
use crate::Error;

pub type ApiError = (StatusCode, Json<ErrorResponse>);
pub type ApiResult<T> = Result<Json<T>, ApiError>;

/// One visualizer and the log its runs write into
#[derive(Debug, Clone)]
pub struct Session {
    pub id: Uuid,
    pub visualizer: Visualizer,
    pub log: Arc<Mutex<RunLog>>,
    pub created_at: DateTime<Utc>,
}

impl Session {
    pub fn new(family: Family, max_frames: usize) -> Self {
        Self {
            id: Uuid::new_v4(),
            visualizer: Visualizer::new(family),
            log: Arc::new(Mutex::new(RunLog::new(max_frames))),
            created_at: Utc::now(),
        }
    }

    pub fn view(&self) -> VisualizerView {
        let log = lock(&self.log);
        let found_index = match &log.report {
            Some(RunReport::Search(result)) => {
                Some(result.found.map(|i| i as i64).unwrap_or(-1))
            }
            _ => None,
        };
        VisualizerView {
            id: self.id,
            family: self.visualizer.family(),
            state: self.visualizer.state(),
            status: log.status,
            algorithm: log.algorithm.clone(),
            frame_count: log.next_index,
            report: log.report.clone(),
            found_index,
            created_at: self.created_at,
            started_at: log.started_at,
            finished_at: log.finished_at,
        }
    }
}

/// Shared application state
#[derive(Debug, Clone)]
pub struct AppState {
    pub sessions: Arc<Mutex<HashMap<Uuid, Session>>>,
    pub max_sessions: usize,
    pub max_frames: usize,
}

impl AppState {
    pub fn new() -> Self {
        Self::from_config(&ServerConfig::default())
    }

    pub fn from_config(config: &ServerConfig) -> Self {
        Self {
            sessions: Arc::new(Mutex::new(HashMap::new())),
            max_sessions: config.max_sessions,
            max_frames: config.max_frames,
        }
    }

    fn session(&self, id: Uuid) -> Result<Session, ApiError> {
        lock(&self.sessions)
            .get(&id)
            .cloned()
            .ok_or_else(|| not_found("visualizer_not_found", "Visualizer not found"))
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

/// Renderer that appends every snapshot of one run to a run log
struct LogObserver {
    log: Arc<Mutex<RunLog>>,
    run: u64,
}

impl Observer<Snapshot> for LogObserver {
    fn render(&mut self, snapshot: Snapshot) {
        lock(&self.log).push(self.run, snapshot);
    }

    fn on_stats(&mut self, stats: &Stats) {
        lock(&self.log).attach_stats(self.run, stats);
    }
}

/// Create the API router
pub fn create_router() -> Router<AppState> {
    Router::new()
        .route("/api/visualizers", post(create_visualizer).get(list_visualizers))
        .route("/api/visualizers/:id", get(get_visualizer).delete(delete_visualizer))
        .route("/api/visualizers/:id/start", post(start_run))
        .route("/api/visualizers/:id/pause", post(pause_run))
        .route("/api/visualizers/:id/resume", post(resume_run))
        .route("/api/visualizers/:id/toggle", post(toggle_run))
        .route("/api/visualizers/:id/stop", post(stop_run))
        .route("/api/visualizers/:id/speed", post(set_speed))
        .route("/api/visualizers/:id/frames", get(get_frames))
        .route("/api/pathfinding/find", post(find_path))
        .route("/api/pathfinding/compare", post(compare_paths))
        .route("/api/samples/:name", get(get_sample))
        .route("/api/health", get(health_check))
}

/// Create a visualizer for one algorithm family
pub async fn create_visualizer(
    State(state): State<AppState>,
    Json(request): Json<CreateVisualizerRequest>,
) -> Result<(StatusCode, Json<VisualizerView>), ApiError> {
    let session = Session::new(request.family, state.max_frames);
    {
        let mut sessions = lock(&state.sessions);
        if sessions.len() >= state.max_sessions {
            return Err((
                StatusCode::TOO_MANY_REQUESTS,
                Json(ErrorResponse {
                    error: "too_many_visualizers".to_string(),
                    message: format!("At most {} visualizers may exist", state.max_sessions),
                    details: None,
                }),
            ));
        }
        sessions.insert(session.id, session.clone());
    }

    info!("created {} visualizer {}", request.family, session.id);
    Ok((StatusCode::CREATED, Json(session.view())))
}

pub async fn list_visualizers(State(state): State<AppState>) -> ApiResult<Vec<VisualizerView>> {
    let sessions: Vec<Session> = lock(&state.sessions).values().cloned().collect();
    Ok(Json(sessions.iter().map(Session::view).collect()))
}

pub async fn get_visualizer(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<VisualizerView> {
    Ok(Json(state.session(id)?.view()))
}

/// Stop any active run and forget the visualizer
pub async fn delete_visualizer(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let session = lock(&state.sessions)
        .remove(&id)
        .ok_or_else(|| not_found("visualizer_not_found", "Visualizer not found"))?;
    session.visualizer.stop();
    Ok(StatusCode::NO_CONTENT)
}

/// Validate and start a run; the run itself proceeds in the background.
///
/// Input errors answer 400 and a second start while a run is active answers
/// 409, both before any step is taken.
pub async fn start_run(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<StartRequest>,
) -> Result<(StatusCode, Json<VisualizerView>), ApiError> {
    let session = state.session(id)?;
    let visualizer = &session.visualizer;

    let algorithm = AlgorithmId::parse(visualizer.family(), &request.algorithm).map_err(error_response)?;
    let run_request = RunRequest::new(algorithm, request.params);
    let (run, mut prepared) = visualizer.begin(&run_request).map_err(error_response)?;

    let token = lock(&session.log).reset(algorithm.name());

    let log = Arc::clone(&session.log);
    tokio::spawn(async move {
        let mut observer = LogObserver {
            log: Arc::clone(&log),
            run: token,
        };
        let outcome = run.drive(&mut prepared, &mut observer).await;
        lock(&log).finish(token, outcome);
    });

    Ok((StatusCode::ACCEPTED, Json(session.view())))
}

pub async fn pause_run(State(state): State<AppState>, Path(id): Path<Uuid>) -> ApiResult<VisualizerView> {
    let session = state.session(id)?;
    session.visualizer.pause();
    Ok(Json(session.view()))
}

pub async fn resume_run(State(state): State<AppState>, Path(id): Path<Uuid>) -> ApiResult<VisualizerView> {
    let session = state.session(id)?;
    session.visualizer.resume();
    Ok(Json(session.view()))
}

pub async fn toggle_run(State(state): State<AppState>, Path(id): Path<Uuid>) -> ApiResult<VisualizerView> {
    let session = state.session(id)?;
    session.visualizer.toggle_pause();
    Ok(Json(session.view()))
}

pub async fn stop_run(State(state): State<AppState>, Path(id): Path<Uuid>) -> ApiResult<VisualizerView> {
    let session = state.session(id)?;
    session.visualizer.stop();
    Ok(Json(session.view()))
}

pub async fn set_speed(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<SpeedRequest>,
) -> ApiResult<VisualizerView> {
    if request.speed > 100 {
        return Err(bad_request("invalid_speed", "Speed must be between 0 and 100"));
    }
    let session = state.session(id)?;
    session.visualizer.set_speed(request.speed);
    Ok(Json(session.view()))
}

/// Frames of the latest run with index `>= since`
pub async fn get_frames(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<FramesQuery>,
) -> ApiResult<FramesResponse> {
    let session = state.session(id)?;
    let log = lock(&session.log);
    Ok(Json(log.since(query.since.unwrap_or(0))))
}

/// Route query without animation
pub async fn find_path(Json(request): Json<FindPathRequest>) -> ApiResult<RouteResponse> {
    let kind: PathKind = request.algorithm.parse().map_err(error_response)?;
    let graph = UndirectedGraph::<f64>::from_input(&request.graph).map_err(error_response)?;
    let route = run_route(kind, &graph, &request.start_id, &request.end_id).map_err(error_response)?;
    Ok(Json(route))
}

/// Run several routing algorithms on the same query in parallel
pub async fn compare_paths(Json(request): Json<CompareRequest>) -> ApiResult<CompareResponse> {
    let kinds = if request.algorithms.is_empty() {
        PathKind::ALL.to_vec()
    } else {
        request
            .algorithms
            .iter()
            .map(|name| name.parse::<PathKind>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(error_response)?
    };
    let graph = UndirectedGraph::<f64>::from_input(&request.graph).map_err(error_response)?;

    let routes = tokio::task::spawn_blocking(move || {
        kinds
            .par_iter()
            .map(|&kind| run_route(kind, &graph, &request.start_id, &request.end_id))
            .collect::<Result<Vec<_>, Error>>()
    })
    .await
    .map_err(|err| {
        warn!("route comparison task failed: {}", err);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: "comparison_failed".to_string(),
                message: format!("Comparison failed: {}", err),
                details: None,
            }),
        )
    })?
    .map_err(error_response)?;

    Ok(Json(CompareResponse {
        comparison_id: Uuid::new_v4(),
        routes,
    }))
}

/// Sample inputs: `tree`, `graph`, `kzn`, `gauteng`, `array`, `sorted`
pub async fn get_sample(Path(name): Path<String>) -> ApiResult<serde_json::Value> {
    let value = match name.as_str() {
        "tree" => serde_json::to_value(generators::sample_tree()),
        "graph" => serde_json::to_value(generators::sample_graph()),
        "array" => serde_json::to_value(generators::random_values(20, 100, &mut thread_rng())),
        "sorted" => serde_json::to_value(generators::sorted_random_values(20, 100, &mut thread_rng())),
        region => serde_json::to_value(generators::sample_map(region).map_err(|_| {
            not_found("sample_not_found", &format!("Unknown sample: {}", region))
        })?),
    };

    value.map(Json).map_err(|err| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: "serialization_failed".to_string(),
                message: err.to_string(),
                details: None,
            }),
        )
    })
}

/// Health check endpoint
pub async fn health_check() -> ApiResult<serde_json::Value> {
    Ok(Json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "version": env!("CARGO_PKG_VERSION")
    })))
}

// Helper functions

/// Lock a mutex, recovering the data if a panicking thread poisoned it
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

fn run_route(kind: PathKind, graph: &UndirectedGraph<f64>, start: &str, end: &str) -> Result<RouteResponse, Error> {
    let started = Instant::now();
    let (route, nodes_explored) = kind.explore::<f64, _>(graph, start, end)?;
    let execution_time_ms = started.elapsed().as_secs_f64() * 1000.0;

    Ok(match route {
        Some(route) => RouteResponse {
            algorithm: kind.name().to_string(),
            found: true,
            path: route.path,
            total_weight: Some(route.total_weight),
            nodes_explored,
            execution_time_ms,
        },
        None => RouteResponse {
            algorithm: kind.name().to_string(),
            found: false,
            path: Vec::new(),
            total_weight: None,
            nodes_explored,
            execution_time_ms,
        },
    })
}

fn error_response(err: Error) -> ApiError {
    let (status, code) = match &err {
        Error::RunInProgress => (StatusCode::CONFLICT, "run_in_progress"),
        Error::UnknownAlgorithm(_) => (StatusCode::BAD_REQUEST, "invalid_algorithm"),
        Error::UnknownNode(_) => (StatusCode::BAD_REQUEST, "unknown_node"),
        Error::NegativeWeight(_) => (StatusCode::BAD_REQUEST, "negative_weight"),
        Error::InvalidInput(_) => (StatusCode::BAD_REQUEST, "invalid_input"),
    };
    (
        status,
        Json(ErrorResponse {
            error: code.to_string(),
            message: err.to_string(),
            details: None,
        }),
    )
}

fn bad_request(code: &str, message: &str) -> ApiError {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            error: code.to_string(),
            message: message.to_string(),
            details: None,
        }),
    )
}

fn not_found(code: &str, message: &str) -> ApiError {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse {
            error: code.to_string(),
            message: message.to_string(),
            details: None,
        }),
    )
}
