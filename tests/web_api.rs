use algoviz::graph::generators;
use algoviz::visualizer::{RunParams, RunReport, Snapshot};
use algoviz::web::api::{self, AppState};
use algoviz::web::models::{
    CompareRequest, CreateVisualizerRequest, FindPathRequest, FramesQuery, RunStatus, SpeedRequest,
    StartRequest,
};
use algoviz::web::server::ServerConfig;
use algoviz::Family;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use std::time::Duration;
use uuid::Uuid;

async fn create(state: &AppState, family: Family) -> Uuid {
    let (status, Json(view)) = api::create_visualizer(
        State(state.clone()),
        Json(CreateVisualizerRequest { family }),
    )
    .await
    .unwrap();
    assert_eq!(status, StatusCode::CREATED);
    view.id
}

fn start_request(algorithm: &str, params: RunParams) -> Json<StartRequest> {
    Json(StartRequest {
        algorithm: algorithm.to_string(),
        params,
    })
}

#[tokio::test]
async fn test_visualizer_lifecycle() {
    let state = AppState::new();
    let id = create(&state, Family::Traversal).await;

    let Json(view) = api::get_visualizer(State(state.clone()), Path(id)).await.unwrap();
    assert_eq!(view.family, Family::Traversal);
    assert_eq!(view.status, RunStatus::Idle);
    assert!(!view.state.is_running);

    let Json(all) = api::list_visualizers(State(state.clone())).await.unwrap();
    assert_eq!(all.len(), 1);

    let status = api::delete_visualizer(State(state.clone()), Path(id)).await.unwrap();
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, Json(error)) = api::get_visualizer(State(state), Path(id)).await.unwrap_err();
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error.error, "visualizer_not_found");
}

#[tokio::test]
async fn test_visualizer_limit() {
    let state = AppState::from_config(&ServerConfig {
        max_sessions: 1,
        ..ServerConfig::default()
    });
    create(&state, Family::Sorting).await;

    let (status, _) = api::create_visualizer(
        State(state.clone()),
        Json(CreateVisualizerRequest {
            family: Family::Sorting,
        }),
    )
    .await
    .unwrap_err();
    assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
}

#[tokio::test(start_paused = true)]
async fn test_search_run_reports_found_index() {
    let state = AppState::new();
    let id = create(&state, Family::Searching).await;

    let (status, Json(view)) = api::start_run(
        State(state.clone()),
        Path(id),
        start_request("binary", RunParams::search(vec![1, 3, 5, 7, 9, 11], 7)),
    )
    .await
    .unwrap();
    assert_eq!(status, StatusCode::ACCEPTED);
    assert_eq!(view.status, RunStatus::Running);

    // a second start while the first is active conflicts
    let (status, Json(error)) = api::start_run(
        State(state.clone()),
        Path(id),
        start_request("linear", RunParams::search(vec![1, 2], 2)),
    )
    .await
    .unwrap_err();
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(error.error, "run_in_progress");

    tokio::time::sleep(Duration::from_secs(30)).await;

    let Json(view) = api::get_visualizer(State(state.clone()), Path(id)).await.unwrap();
    assert_eq!(view.status, RunStatus::Completed);
    assert_eq!(view.found_index, Some(3));
    assert!(matches!(view.report, Some(RunReport::Search(_))));

    let Json(frames) = api::get_frames(State(state.clone()), Path(id), Query(FramesQuery { since: Some(1) }))
        .await
        .unwrap();
    assert_eq!(frames.next, view.frame_count);
    assert_eq!(frames.dropped, 0);
    assert!(frames.frames.iter().all(|f| f.index >= 1));
}

#[tokio::test(start_paused = true)]
async fn test_missing_target_reports_minus_one() {
    let state = AppState::new();
    let id = create(&state, Family::Searching).await;

    api::start_run(
        State(state.clone()),
        Path(id),
        start_request("linear", RunParams::search(vec![2, 4, 6], 5)),
    )
    .await
    .unwrap();
    tokio::time::sleep(Duration::from_secs(30)).await;

    let Json(view) = api::get_visualizer(State(state), Path(id)).await.unwrap();
    assert_eq!(view.found_index, Some(-1));
}

#[tokio::test(start_paused = true)]
async fn test_stop_marks_run_cancelled() {
    let state = AppState::new();
    let id = create(&state, Family::Sorting).await;
    let values: Vec<i64> = (1..=20).rev().collect();

    api::start_run(State(state.clone()), Path(id), start_request("bubble", RunParams::array(values)))
        .await
        .unwrap();
    tokio::time::sleep(Duration::from_secs(2)).await;

    let Json(view) = api::pause_run(State(state.clone()), Path(id)).await.unwrap();
    assert!(view.state.is_paused);

    let Json(view) = api::stop_run(State(state.clone()), Path(id)).await.unwrap();
    assert!(!view.state.is_running);

    tokio::time::sleep(Duration::from_secs(1)).await;
    let Json(view) = api::get_visualizer(State(state), Path(id)).await.unwrap();
    assert_eq!(view.status, RunStatus::Cancelled);
    assert!(view.report.is_none());
}

#[tokio::test(start_paused = true)]
async fn test_restart_after_stop_keeps_runs_apart() {
    let state = AppState::new();
    let id = create(&state, Family::Sorting).await;
    let first: Vec<i64> = (1..=20).rev().collect();
    let second: Vec<i64> = (1..=30).rev().collect();

    api::start_run(State(state.clone()), Path(id), start_request("bubble", RunParams::array(first)))
        .await
        .unwrap();
    tokio::time::sleep(Duration::from_millis(1200)).await;

    // the first run is still asleep when the second one starts
    api::stop_run(State(state.clone()), Path(id)).await.unwrap();
    api::start_run(State(state.clone()), Path(id), start_request("bubble", RunParams::array(second)))
        .await
        .unwrap();
    tokio::time::sleep(Duration::from_millis(700)).await;

    let Json(view) = api::get_visualizer(State(state.clone()), Path(id)).await.unwrap();
    assert!(view.state.is_running);
    assert_eq!(view.status, RunStatus::Running);

    let Json(frames) = api::get_frames(State(state), Path(id), Query(FramesQuery { since: None }))
        .await
        .unwrap();
    assert!(!frames.frames.is_empty());
    for frame in &frames.frames {
        match &frame.snapshot {
            Snapshot::Array(array) => assert_eq!(array.elements.len(), 30),
            other => panic!("unexpected frame: {:?}", other),
        }
    }
}

#[tokio::test]
async fn test_start_rejects_bad_input() {
    let state = AppState::new();
    let id = create(&state, Family::Pathfinding).await;

    let (status, Json(error)) = api::start_run(
        State(state.clone()),
        Path(id),
        start_request("teleport", RunParams::default()),
    )
    .await
    .unwrap_err();
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error.error, "invalid_algorithm");

    let (status, Json(error)) = api::start_run(
        State(state.clone()),
        Path(id),
        start_request(
            "dijkstra",
            RunParams::route(generators::sample_map("kzn").unwrap(), "durban", "cape_town"),
        ),
    )
    .await
    .unwrap_err();
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error.error, "unknown_node");

    let Json(view) = api::get_visualizer(State(state), Path(id)).await.unwrap();
    assert_eq!(view.status, RunStatus::Idle);
    assert!(!view.state.is_running);
}

#[tokio::test]
async fn test_speed_endpoint() {
    let state = AppState::new();
    let id = create(&state, Family::Traversal).await;

    let Json(view) = api::set_speed(State(state.clone()), Path(id), Json(SpeedRequest { speed: 100 }))
        .await
        .unwrap();
    assert_eq!(view.state.speed, 100);
    assert_eq!(view.state.step_delay_ms, 100);

    let (status, _) = api::set_speed(State(state), Path(id), Json(SpeedRequest { speed: 101 }))
        .await
        .unwrap_err();
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_find_path_endpoint() {
    let Json(route) = api::find_path(Json(FindPathRequest {
        algorithm: "dijkstra".to_string(),
        graph: generators::sample_map("gauteng").unwrap(),
        start_id: "soweto".to_string(),
        end_id: "pta".to_string(),
    }))
    .await
    .unwrap();

    assert!(route.found);
    assert_eq!(route.path.first().map(String::as_str), Some("soweto"));
    assert_eq!(route.path.last().map(String::as_str), Some("pta"));
    // soweto -> jhb -> pta
    assert_eq!(route.total_weight, Some(80.0));
}

#[tokio::test]
async fn test_compare_endpoint() {
    let Json(response) = api::compare_paths(Json(CompareRequest {
        graph: generators::sample_map("kzn").unwrap(),
        start_id: "port_shepstone".to_string(),
        end_id: "newcastle".to_string(),
        algorithms: Vec::new(),
    }))
    .await
    .unwrap();

    assert_eq!(response.routes.len(), 3);
    assert!(response.routes.iter().all(|r| r.found));
    let dijkstra = response
        .routes
        .iter()
        .find(|r| r.algorithm == "Dijkstra")
        .unwrap();
    assert_eq!(dijkstra.total_weight, Some(440.0));

    let (status, Json(error)) = api::compare_paths(Json(CompareRequest {
        graph: generators::sample_map("kzn").unwrap(),
        start_id: "durban".to_string(),
        end_id: "pmb".to_string(),
        algorithms: vec!["warp".to_string()],
    }))
    .await
    .unwrap_err();
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error.error, "invalid_algorithm");
}

#[tokio::test]
async fn test_samples_and_health() {
    let Json(tree) = api::get_sample(Path("tree".to_string())).await.unwrap();
    assert_eq!(tree["nodes"].as_array().map(Vec::len), Some(11));

    let Json(values) = api::get_sample(Path("sorted".to_string())).await.unwrap();
    let values: Vec<i64> = serde_json::from_value(values).unwrap();
    assert!(values.windows(2).all(|w| w[0] <= w[1]));

    let (status, _) = api::get_sample(Path("atlantis".to_string())).await.unwrap_err();
    assert_eq!(status, StatusCode::NOT_FOUND);

    let Json(health) = api::health_check().await.unwrap();
    assert_eq!(health["status"], "healthy");
}
