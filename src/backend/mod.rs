//! Messaging backend contract and canonical path helpers.
//!
//! # Purpose
//! Defines the remote capability the reconcilers are written against. The
//! real messaging service lives behind this trait; the in-memory emulator in
//! [`memory`] implements the same contract for local development and tests.
//! No local cache or shadow state exists on this side: every read re-queries
//! the backend.
use crate::admin::mask::FieldMask;
use crate::model::{Subscription, SubscriptionPatch, SubscriptionSettings, Topic, TopicPatch};
use async_trait::async_trait;
use std::collections::HashMap;
use thiserror::Error;

pub mod memory;

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("not found: {0}")]
    NotFound(String),
    #[error("already exists: {0}")]
    AlreadyExists(String),
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("backend unavailable: {0}")]
    Unavailable(String),
    #[error(transparent)]
    Unexpected(#[from] anyhow::Error),
}

pub type BackendResult<T> = Result<T, BackendError>;

/// Client handle for the managed pub/sub service. Constructed once at
/// composition-root lifetime and shared by every in-flight request; it holds
/// no request-scoped mutable state.
#[async_trait]
pub trait MessagingBackend: Send + Sync {
    async fn create_topic(
        &self,
        topic_path: &str,
        labels: HashMap<String, String>,
    ) -> BackendResult<Topic>;
    async fn get_topic(&self, topic_path: &str) -> BackendResult<Topic>;
    async fn list_topics(&self, project_path: &str) -> BackendResult<Vec<Topic>>;
    /// Apply `patch` to the topic, touching only the fields named in `mask`.
    async fn update_topic(
        &self,
        topic_path: &str,
        patch: TopicPatch,
        mask: &FieldMask,
    ) -> BackendResult<Topic>;
    async fn delete_topic(&self, topic_path: &str) -> BackendResult<()>;

    async fn create_subscription(
        &self,
        settings: SubscriptionSettings,
    ) -> BackendResult<Subscription>;
    async fn get_subscription(&self, subscription_path: &str) -> BackendResult<Subscription>;
    /// Apply `patch` to the subscription, touching only the fields named in
    /// `mask`.
    async fn update_subscription(
        &self,
        subscription_path: &str,
        patch: SubscriptionPatch,
        mask: &FieldMask,
    ) -> BackendResult<Subscription>;
    async fn delete_subscription(&self, subscription_path: &str) -> BackendResult<()>;
    /// Canonical paths of every subscription attached to the topic.
    async fn list_topic_subscriptions(&self, topic_path: &str) -> BackendResult<Vec<String>>;

    async fn health_check(&self) -> BackendResult<()>;
    fn backend_name(&self) -> &'static str;
}

pub fn project_path(project_id: &str) -> String {
    format!("projects/{project_id}")
}

pub fn topic_path(project_id: &str, topic_name: &str) -> String {
    format!("projects/{project_id}/topics/{topic_name}")
}

pub fn subscription_path(project_id: &str, subscription_name: &str) -> String {
    format!("projects/{project_id}/subscriptions/{subscription_name}")
}

/// Last segment of a canonical path; the short resource name.
pub fn short_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}
