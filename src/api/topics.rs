//! Topic API handlers.
//!
//! # Purpose
//! Implements topic CRUD plus the partial-update (reconciliation) endpoint.
//! Handlers translate typed requests to reconciler calls and map the error
//! taxonomy through the shared `ApiError` conversion.
use crate::api::error::ApiError;
use crate::api::types::{TopicCreateRequest, TopicDeleteRequest, TopicListResponse};
use crate::app::AppState;
use crate::model::{TopicCreateOutcome, TopicDeleteOutcome, TopicUpdateOutcome, TopicUpdateRequest, TopicView};
use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

#[utoipa::path(
    post,
    path = "/v1/topics",
    tag = "topics",
    request_body = TopicCreateRequest,
    responses(
        (status = 201, description = "Topic created", body = TopicCreateOutcome),
        (status = 409, description = "Topic already exists", body = crate::api::types::ErrorResponse),
        (status = 503, description = "Backend unavailable", body = crate::api::types::ErrorResponse)
    )
)]
pub(crate) async fn create_topic(
    State(state): State<AppState>,
    Json(body): Json<TopicCreateRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let outcome = state
        .admin
        .create_topic(body.project_id.as_deref(), &body.topic_name, body.labels)
        .await?;
    Ok((StatusCode::CREATED, Json(outcome)))
}

#[utoipa::path(
    get,
    path = "/v1/topics",
    tag = "topics",
    responses(
        (status = 200, description = "List topics with resolved subscriptions", body = TopicListResponse)
    )
)]
pub(crate) async fn list_topics(
    State(state): State<AppState>,
) -> Result<Json<TopicListResponse>, ApiError> {
    let items = state.admin.list_topics().await?;
    Ok(Json(TopicListResponse { items }))
}

#[utoipa::path(
    get,
    path = "/v1/topics/{topic}",
    tag = "topics",
    params(
        ("topic" = String, Path, description = "Topic short name")
    ),
    responses(
        (status = 200, description = "Fetch topic", body = TopicView),
        (status = 404, description = "Topic not found", body = crate::api::types::ErrorResponse)
    )
)]
pub(crate) async fn get_topic(
    Path(topic): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<TopicView>, ApiError> {
    let view = state.admin.get_topic(&topic).await?;
    Ok(Json(view))
}

#[utoipa::path(
    patch,
    path = "/v1/topics/{topic}",
    tag = "topics",
    params(
        ("topic" = String, Path, description = "Topic short name")
    ),
    request_body = TopicUpdateRequest,
    responses(
        (status = 200, description = "Topic reconciled; sub-operation failures are carried in the body", body = TopicUpdateOutcome),
        (status = 400, description = "Invalid duration or missing subscription name", body = crate::api::types::ErrorResponse),
        (status = 404, description = "Topic not found", body = crate::api::types::ErrorResponse)
    )
)]
pub(crate) async fn update_topic(
    Path(topic): Path<String>,
    State(state): State<AppState>,
    Json(body): Json<TopicUpdateRequest>,
) -> Result<Json<TopicUpdateOutcome>, ApiError> {
    let outcome = state.admin.update_topic(&topic, body).await?;
    Ok(Json(outcome))
}

#[utoipa::path(
    delete,
    path = "/v1/topics/{topic}",
    tag = "topics",
    params(
        ("topic" = String, Path, description = "Topic short name")
    ),
    request_body(content = TopicDeleteRequest, description = "Optional cascade list"),
    responses(
        (status = 200, description = "Topic deleted; per-subscription cascade outcomes in the body", body = TopicDeleteOutcome),
        (status = 404, description = "Topic not found", body = crate::api::types::ErrorResponse),
        (status = 500, description = "Topic delete failed after cascade; collected outcomes in the body", body = TopicDeleteOutcome)
    )
)]
pub(crate) async fn delete_topic(
    Path(topic): Path<String>,
    State(state): State<AppState>,
    body: Option<Json<TopicDeleteRequest>>,
) -> Result<impl IntoResponse, ApiError> {
    let request = body.map(|Json(body)| body).unwrap_or_default();
    let outcome = state
        .admin
        .delete_topic(&topic, request.delete_subscriptions)
        .await?;
    // The primary operation's status picks the code; cascade outcomes ride
    // along either way.
    let status = if outcome.status.is_success() {
        StatusCode::OK
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };
    Ok((status, Json(outcome)))
}
