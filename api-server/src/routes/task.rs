//! Task API endpoints
//!
//! RESTful surface over the task application service.

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    routing::get,
    Json, Router,
};
use serde::Serialize;

use td_core::session::Session;
use td_core::task::{
    CreateTaskInput, GetTasksInput, GetTasksOutput, PagedTasksResult, TaskCacheItem, TaskDto,
    TaskId, UpdateTaskInput,
};
use td_core::Error;

use crate::state::AppState;

/// Header carrying the caller's user id; the session layer proper lives
/// outside this service.
const USER_ID_HEADER: &str = "x-user-id";

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Serialize)]
pub struct CreateTaskResponse {
    pub id: TaskId,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn error_response(err: Error) -> ApiError {
    let status = match &err {
        Error::NotAuthenticated => StatusCode::UNAUTHORIZED,
        Error::PermissionDenied(_) => StatusCode::FORBIDDEN,
        Error::TaskNotFound(_) | Error::UserNotFound(_) => StatusCode::NOT_FOUND,
        Error::InvalidInput(_) => StatusCode::BAD_REQUEST,
        Error::Io(_) | Error::Serialization(_) | Error::Storage(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    (
        status,
        Json(ErrorResponse {
            error: err.to_string(),
        }),
    )
}

fn session_from_headers(headers: &HeaderMap) -> Session {
    headers
        .get(USER_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.trim().parse().ok())
        .map(Session::authenticated)
        .unwrap_or_else(Session::anonymous)
}

/// GET /api/tasks - List tasks matching the query filters
async fn list_tasks(
    State(state): State<AppState>,
    Query(input): Query<GetTasksInput>,
) -> Result<Json<GetTasksOutput>, ApiError> {
    let output = state
        .tasks()
        .get_tasks(&input)
        .await
        .map_err(error_response)?;
    Ok(Json(output))
}

/// GET /api/tasks/paged - One page of matching tasks plus the total
async fn paged_tasks(
    State(state): State<AppState>,
    Query(input): Query<GetTasksInput>,
) -> Result<Json<PagedTasksResult<TaskDto>>, ApiError> {
    let page = state
        .tasks()
        .get_paged_tasks(&input)
        .await
        .map_err(error_response)?;
    Ok(Json(page))
}

/// GET /api/tasks/:id - Get a single task
async fn get_task(
    State(state): State<AppState>,
    Path(id): Path<TaskId>,
) -> Result<Json<TaskDto>, ApiError> {
    let task = state
        .tasks()
        .get_task_by_id(id)
        .await
        .map_err(error_response)?;
    Ok(Json(task))
}

/// GET /api/tasks/:id/cached - Indexed lookup into the task cache
async fn cached_task(
    State(state): State<AppState>,
    Path(id): Path<TaskId>,
) -> Result<Json<TaskCacheItem>, ApiError> {
    match state.tasks().get_task_from_cache_by_id(id) {
        Some(item) => Ok(Json(item)),
        None => Err((
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: format!("Task {} not cached", id),
            }),
        )),
    }
}

/// POST /api/tasks - Create a new task
async fn create_task(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(input): Json<CreateTaskInput>,
) -> Result<(StatusCode, Json<CreateTaskResponse>), ApiError> {
    if input.title.trim().is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "Title cannot be empty".to_string(),
            }),
        ));
    }

    let session = session_from_headers(&headers);
    let id = state
        .tasks()
        .create_task(&session, input)
        .await
        .map_err(error_response)?;

    Ok((StatusCode::CREATED, Json(CreateTaskResponse { id })))
}

/// PATCH /api/tasks/:id - Update a task
async fn update_task(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<TaskId>,
    Json(mut input): Json<UpdateTaskInput>,
) -> Result<StatusCode, ApiError> {
    input.id = id;
    let session = session_from_headers(&headers);
    state
        .tasks()
        .update_task(&session, input)
        .await
        .map_err(error_response)?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/tasks/:id - Delete a task
async fn delete_task(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<TaskId>,
) -> Result<StatusCode, ApiError> {
    let session = session_from_headers(&headers);
    state
        .tasks()
        .delete_task(&session, id)
        .await
        .map_err(error_response)?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/tasks", get(list_tasks).post(create_task))
        .route("/api/tasks/paged", get(paged_tasks))
        .route(
            "/api/tasks/{id}",
            get(get_task).patch(update_task).delete(delete_task),
        )
        .route("/api/tasks/{id}/cached", get(cached_task))
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::Request;
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use tempfile::TempDir;
    use tower::ServiceExt;

    use super::*;

    async fn test_app(admins: &[i64]) -> (Router, TempDir) {
        let temp = TempDir::new().unwrap();
        let state = AppState::new(temp.path().to_path_buf(), admins)
            .await
            .unwrap();
        let app = Router::new()
            .merge(crate::routes::health::router())
            .merge(router())
            .with_state(state);
        (app, temp)
    }

    async fn json_body(body: Body) -> Value {
        let bytes = body.collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn post_task(body: Value, user_id: Option<i64>) -> Request<Body> {
        let mut builder = Request::builder()
            .method("POST")
            .uri("/api/tasks")
            .header("content-type", "application/json");
        if let Some(user_id) = user_id {
            builder = builder.header("x-user-id", user_id.to_string());
        }
        builder
            .body(Body::from(serde_json::to_string(&body).unwrap()))
            .unwrap()
    }

    #[tokio::test]
    async fn health_endpoint_responds() {
        let (app, _temp) = test_app(&[]).await;
        let response = app
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn create_then_list_tasks() {
        let (app, _temp) = test_app(&[]).await;

        let response = app
            .clone()
            .oneshot(post_task(json!({"title": "Fix bug"}), Some(7)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let created = json_body(response.into_body()).await;
        assert_eq!(created["id"], 1);

        let response = app
            .oneshot(Request::get("/api/tasks").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let listed = json_body(response.into_body()).await;
        assert_eq!(listed["tasks"][0]["title"], "Fix bug");
        assert_eq!(listed["tasks"][0]["state"], "open");
    }

    #[tokio::test]
    async fn assigning_to_someone_else_requires_permission() {
        let (app, _temp) = test_app(&[]).await;

        let response = app
            .oneshot(post_task(
                json!({"title": "Fix bug", "assignedPersonId": 9}),
                Some(7),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn admins_can_assign_to_anyone() {
        let (app, _temp) = test_app(&[7]).await;

        let response = app
            .oneshot(post_task(
                json!({"title": "Fix bug", "assignedPersonId": 9}),
                Some(7),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    #[tokio::test]
    async fn missing_task_is_404() {
        let (app, _temp) = test_app(&[]).await;
        let response = app
            .oneshot(Request::get("/api/tasks/42").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn cached_lookup_misses() {
        let (app, _temp) = test_app(&[]).await;
        let response = app
            .oneshot(
                Request::get("/api/tasks/1/cached")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn delete_without_identity_is_unauthorized() {
        let (app, _temp) = test_app(&[]).await;
        let response = app
            .oneshot(
                Request::delete("/api/tasks/1")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn paged_listing_reports_total() {
        let (app, _temp) = test_app(&[]).await;

        for title in ["a", "b", "c"] {
            let response = app
                .clone()
                .oneshot(post_task(json!({ "title": title }), Some(7)))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::CREATED);
        }

        let response = app
            .oneshot(
                Request::get("/api/tasks/paged?skipCount=0&maxResultCount=2")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let page = json_body(response.into_body()).await;
        assert_eq!(page["totalCount"], 3);
        assert_eq!(page["items"].as_array().unwrap().len(), 2);
    }
}
