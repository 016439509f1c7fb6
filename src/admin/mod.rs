//! Topic/subscription reconciliation core.
//!
//! # Purpose
//! Houses the decision logic of the service: duration parsing, field-mask
//! construction, and the topic/subscription reconcilers, composed behind
//! [`AdminService`]. Every operation returns an explicit result; no backend
//! failure escapes this boundary as an unhandled fault.
pub mod duration;
pub mod mask;
pub mod subscription;
pub mod topic;

use crate::backend::{BackendError, MessagingBackend};
use crate::model::{
    SubscriptionDeleteOutcome, TopicCreateOutcome, TopicDeleteOutcome, TopicUpdateOutcome,
    TopicUpdateRequest, TopicView,
};
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;
use topic::TopicReconciler;

/// Error taxonomy for every reconciler operation. Validation errors
/// (`InvalidDuration`, `MissingName`) are detected locally and returned
/// without any backend call; the rest are normalized backend failures.
#[derive(Debug, Error)]
pub enum AdminError {
    #[error(transparent)]
    InvalidDuration(#[from] duration::InvalidDuration),
    #[error("Subscription name is required")]
    MissingName,
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

impl From<BackendError> for AdminError {
    fn from(err: BackendError) -> Self {
        match err {
            BackendError::NotFound(resource) => AdminError::NotFound(resource),
            BackendError::AlreadyExists(resource) => AdminError::AlreadyExists(resource),
            BackendError::InvalidArgument(message) => AdminError::InvalidArgument(message),
            BackendError::Unavailable(message) => AdminError::Unavailable(message),
            BackendError::Unexpected(inner) => AdminError::Unexpected(inner),
        }
    }
}

pub type AdminResult<T> = Result<T, AdminError>;

/// Composition root for the reconciliation core: one backend client handle,
/// one project scope, constructed explicitly by the binary (no globals).
#[derive(Clone)]
pub struct AdminService {
    topics: TopicReconciler,
}

impl AdminService {
    pub fn new(backend: Arc<dyn MessagingBackend>, project_id: impl Into<String>) -> Self {
        Self {
            topics: TopicReconciler::new(backend, project_id.into()),
        }
    }

    pub fn project_id(&self) -> &str {
        self.topics.project_id()
    }

    pub fn backend_name(&self) -> &'static str {
        self.topics.backend().backend_name()
    }

    pub async fn health_check(&self) -> AdminResult<()> {
        self.topics.backend().health_check().await?;
        Ok(())
    }

    /// Create a topic. `project_id` defaults to the configured scope when the
    /// caller does not override it.
    pub async fn create_topic(
        &self,
        project_id: Option<&str>,
        topic_name: &str,
        labels: HashMap<String, String>,
    ) -> AdminResult<TopicCreateOutcome> {
        let project_id = project_id.unwrap_or_else(|| self.project_id());
        self.topics.create(project_id, topic_name, labels).await
    }

    pub async fn get_topic(&self, topic_name: &str) -> AdminResult<TopicView> {
        self.topics.get(topic_name).await
    }

    pub async fn list_topics(&self) -> AdminResult<Vec<TopicView>> {
        self.topics.list().await
    }

    pub async fn update_topic(
        &self,
        topic_name: &str,
        request: TopicUpdateRequest,
    ) -> AdminResult<TopicUpdateOutcome> {
        self.topics.update(topic_name, request).await
    }

    pub async fn delete_topic(
        &self,
        topic_name: &str,
        delete_subscriptions: Option<Vec<String>>,
    ) -> AdminResult<TopicDeleteOutcome> {
        self.topics.delete(topic_name, delete_subscriptions).await
    }

    pub async fn delete_subscription(
        &self,
        subscription_name: &str,
    ) -> AdminResult<SubscriptionDeleteOutcome> {
        let path = self.topics.subscriptions().delete(subscription_name).await?;
        Ok(SubscriptionDeleteOutcome::success(
            subscription_name,
            format!("Subscription deleted: {path}"),
        ))
    }
}
