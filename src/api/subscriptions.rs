//! Subscription API handlers.
use crate::api::error::ApiError;
use crate::app::AppState;
use crate::model::SubscriptionDeleteOutcome;
use axum::Json;
use axum::extract::{Path, State};

#[utoipa::path(
    delete,
    path = "/v1/subscriptions/{subscription}",
    tag = "subscriptions",
    params(
        ("subscription" = String, Path, description = "Subscription short name")
    ),
    responses(
        (status = 200, description = "Subscription deleted", body = SubscriptionDeleteOutcome),
        (status = 404, description = "Subscription not found", body = crate::api::types::ErrorResponse)
    )
)]
pub(crate) async fn delete_subscription(
    Path(subscription): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<SubscriptionDeleteOutcome>, ApiError> {
    let outcome = state.admin.delete_subscription(&subscription).await?;
    Ok(Json(outcome))
}
