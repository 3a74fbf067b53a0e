use std::sync::Arc;

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use serde_json::json;

use super::domain::{IntakeForm, UserId};
use super::leveling::ProgressView;
use super::repository::{RepositoryError, WellnessRepository};
use super::service::{WellnessService, WellnessServiceError};

/// Header the identity layer fills with the authenticated member id.
pub const USER_ID_HEADER: &str = "x-user-id";

/// Router builder exposing plan generation and the member's score and progress views.
pub fn wellness_router<R>(service: Arc<WellnessService<R>>) -> Router
where
    R: WellnessRepository + 'static,
{
    Router::new()
        .route(
            "/api/v1/wellness/plan",
            get(plan_handler::<R>).post(generate_handler::<R>),
        )
        .route("/api/v1/wellness/scores", get(history_handler::<R>))
        .route("/api/v1/wellness/scores/latest", get(latest_handler::<R>))
        .route("/api/v1/wellness/progress", get(progress_handler::<R>))
        .with_state(service)
}

pub(crate) async fn generate_handler<R>(
    State(service): State<Arc<WellnessService<R>>>,
    headers: HeaderMap,
    axum::Json(form): axum::Json<IntakeForm>,
) -> Response
where
    R: WellnessRepository + 'static,
{
    let user = match member_id(&headers) {
        Ok(user) => user,
        Err(response) => return response,
    };

    // Opening the write session can wait on another request for the same member.
    let generated = tokio::task::spawn_blocking(move || service.generate(&user, form)).await;

    match generated {
        Ok(Ok(outcome)) => {
            let payload = json!({
                "plan": outcome.plan,
                "progress": ProgressView::from(outcome.progress),
                "xp_awarded": outcome.xp_awarded,
            });
            (StatusCode::CREATED, axum::Json(payload)).into_response()
        }
        Ok(Err(error)) => error_response(error),
        Err(join_error) => {
            let payload = json!({
                "error": format!("plan generation aborted: {join_error}"),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn plan_handler<R>(
    State(service): State<Arc<WellnessService<R>>>,
    headers: HeaderMap,
) -> Response
where
    R: WellnessRepository + 'static,
{
    let user = match member_id(&headers) {
        Ok(user) => user,
        Err(response) => return response,
    };

    match service.plan(&user) {
        Ok(Some(plan)) => (StatusCode::OK, axum::Json(plan)).into_response(),
        Ok(None) => {
            let payload = json!({
                "error": "no plan generated yet",
            });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn history_handler<R>(
    State(service): State<Arc<WellnessService<R>>>,
    headers: HeaderMap,
) -> Response
where
    R: WellnessRepository + 'static,
{
    let user = match member_id(&headers) {
        Ok(user) => user,
        Err(response) => return response,
    };

    match service.score_history(&user) {
        Ok(history) => (StatusCode::OK, axum::Json(history)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn latest_handler<R>(
    State(service): State<Arc<WellnessService<R>>>,
    headers: HeaderMap,
) -> Response
where
    R: WellnessRepository + 'static,
{
    let user = match member_id(&headers) {
        Ok(user) => user,
        Err(response) => return response,
    };

    match service.latest_scores(&user) {
        Ok(Some(scores)) => (StatusCode::OK, axum::Json(scores)).into_response(),
        Ok(None) => {
            let payload = json!({
                "error": "no scores recorded yet",
            });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn progress_handler<R>(
    State(service): State<Arc<WellnessService<R>>>,
    headers: HeaderMap,
) -> Response
where
    R: WellnessRepository + 'static,
{
    let user = match member_id(&headers) {
        Ok(user) => user,
        Err(response) => return response,
    };

    match service.progress(&user) {
        Ok(progress) => (StatusCode::OK, axum::Json(progress)).into_response(),
        Err(error) => error_response(error),
    }
}

fn member_id(headers: &HeaderMap) -> Result<UserId, Response> {
    headers
        .get(USER_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(|value| UserId(value.to_string()))
        .ok_or_else(|| {
            let payload = json!({
                "error": format!("missing {USER_ID_HEADER} header"),
            });
            (StatusCode::UNAUTHORIZED, axum::Json(payload)).into_response()
        })
}

fn error_response(error: WellnessServiceError) -> Response {
    let status = match &error {
        WellnessServiceError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        WellnessServiceError::Repository(RepositoryError::Conflict(_)) => StatusCode::CONFLICT,
        WellnessServiceError::Repository(RepositoryError::Unavailable(_)) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    let payload = json!({
        "error": error.to_string(),
    });
    (status, axum::Json(payload)).into_response()
}
