use std::{net::SocketAddr, sync::Arc};

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use parking_lot::RwLock;
use serde::Serialize;
use serde_json::json;

use crate::schedule::{Schedule, ScheduleSummary, compute_schedule};
use crate::task::Task;
use crate::task_validation;

/// Shared in-memory task list. The lock serializes concurrent edits so the
/// scheduler always sees a consistent snapshot.
#[derive(Clone)]
pub struct AppState {
    tasks: Arc<RwLock<Vec<Task>>>,
}

impl AppState {
    pub fn new(tasks: Vec<Task>) -> Self {
        Self {
            tasks: Arc::new(RwLock::new(tasks)),
        }
    }

    pub fn with_shared(tasks: Arc<RwLock<Vec<Task>>>) -> Self {
        Self { tasks }
    }

    fn tasks(&self) -> Arc<RwLock<Vec<Task>>> {
        self.tasks.clone()
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
    message: String,
}

#[derive(Debug)]
enum ApiError {
    NotFound(String),
    Conflict(String),
    Invalid(String),
}

impl ApiError {
    fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound(message.into())
    }

    fn invalid(message: impl Into<String>) -> Self {
        ApiError::Invalid(message.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::NotFound(message) => {
                let body = Json(ErrorBody {
                    error: "not_found",
                    message,
                });
                (StatusCode::NOT_FOUND, body).into_response()
            }
            ApiError::Conflict(message) => {
                let body = Json(ErrorBody {
                    error: "conflict",
                    message,
                });
                (StatusCode::CONFLICT, body).into_response()
            }
            ApiError::Invalid(message) => {
                let body = Json(ErrorBody {
                    error: "invalid_request",
                    message,
                });
                (StatusCode::BAD_REQUEST, body).into_response()
            }
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/tasks", get(list_tasks).post(create_task))
        .route(
            "/tasks/:id",
            get(get_task).put(update_task).delete(delete_task),
        )
        .route("/schedule", get(get_schedule))
        .route("/schedule/summary", get(get_summary))
        .with_state(state)
}

pub async fn serve(addr: SocketAddr, tasks: Vec<Task>) -> std::io::Result<()> {
    let state = AppState::new(tasks);
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await
}

async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

async fn list_tasks(State(state): State<AppState>) -> Json<Vec<Task>> {
    let tasks = state.tasks();
    let snapshot = tasks.read().clone();
    Json(snapshot)
}

async fn get_task(
    State(state): State<AppState>,
    Path(task_id): Path<String>,
) -> Result<Json<Task>, ApiError> {
    let tasks = state.tasks();
    let found = {
        let guard = tasks.read();
        guard.iter().find(|task| task.id == task_id).cloned()
    };
    match found {
        Some(task) => Ok(Json(task)),
        None => Err(ApiError::not_found(format!("task {task_id} not found"))),
    }
}

async fn create_task(
    State(state): State<AppState>,
    Json(task): Json<Task>,
) -> Result<(StatusCode, Json<Task>), ApiError> {
    task_validation::validate_task(&task).map_err(|err| ApiError::invalid(err.to_string()))?;
    let tasks = state.tasks();
    let mut guard = tasks.write();
    if guard.iter().any(|existing| existing.id == task.id) {
        return Err(ApiError::Conflict(format!(
            "task {} already exists",
            task.id
        )));
    }
    guard.push(task.clone());
    Ok((StatusCode::CREATED, Json(task)))
}

async fn update_task(
    State(state): State<AppState>,
    Path(task_id): Path<String>,
    Json(task): Json<Task>,
) -> Result<Json<Task>, ApiError> {
    if task.id != task_id {
        return Err(ApiError::invalid(
            "task id in payload does not match path parameter",
        ));
    }
    task_validation::validate_task(&task).map_err(|err| ApiError::invalid(err.to_string()))?;
    let tasks = state.tasks();
    let mut guard = tasks.write();
    match guard.iter_mut().find(|existing| existing.id == task_id) {
        Some(existing) => {
            *existing = task.clone();
            Ok(Json(task))
        }
        None => Err(ApiError::not_found(format!("task {task_id} not found"))),
    }
}

async fn delete_task(
    State(state): State<AppState>,
    Path(task_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let tasks = state.tasks();
    let mut guard = tasks.write();
    let before = guard.len();
    guard.retain(|task| task.id != task_id);
    if guard.len() == before {
        return Err(ApiError::not_found(format!("task {task_id} not found")));
    }
    for task in guard.iter_mut() {
        task.predecessors.retain(|pred| *pred != task_id);
    }
    Ok(StatusCode::NO_CONTENT)
}

async fn get_schedule(State(state): State<AppState>) -> Result<Json<Schedule>, ApiError> {
    let tasks = state.tasks();
    let snapshot = tasks.read().clone();
    let schedule =
        compute_schedule(&snapshot).map_err(|err| ApiError::invalid(err.to_string()))?;
    Ok(Json(schedule))
}

async fn get_summary(State(state): State<AppState>) -> Result<Json<ScheduleSummary>, ApiError> {
    let tasks = state.tasks();
    let snapshot = tasks.read().clone();
    let schedule =
        compute_schedule(&snapshot).map_err(|err| ApiError::invalid(err.to_string()))?;
    Ok(Json(schedule.summary()))
}
