//! HTTP API request/response types.
//!
//! # Purpose
//! Defines payload shapes owned by the HTTP surface. The reconciliation
//! core's own request/outcome types (`TopicUpdateRequest`,
//! `SubscriptionConfig`, the outcome envelopes) are used directly as bodies;
//! only the shapes with no core counterpart live here.
use crate::model::TopicView;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct SystemInfo {
    pub project_id: String,
    pub api_version: String,
    pub backend: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct HealthStatus {
    pub status: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    pub request_id: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct TopicCreateRequest {
    /// Project scope override; defaults to the service's configured project.
    pub project_id: Option<String>,
    pub topic_name: String,
    #[serde(default)]
    pub labels: HashMap<String, String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, Default)]
pub struct TopicDeleteRequest {
    /// Short names of subscriptions to delete before the topic (cascade).
    pub delete_subscriptions: Option<Vec<String>>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct TopicListResponse {
    pub items: Vec<TopicView>,
}
