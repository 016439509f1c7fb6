//! Topic reconciliation.
//!
//! # Purpose
//! Creates, fetches, lists, updates, and deletes topics against the remote
//! backend. Update builds a minimal field mask and delegates attached
//! subscription changes to the subscription reconciler; delete orchestrates
//! cascading subscription deletion with per-name outcome tracking. No local
//! state is held; every read re-queries the backend.
use crate::admin::subscription::SubscriptionReconciler;
use crate::admin::{AdminResult, duration, mask};
use crate::backend::{self, BackendError, MessagingBackend};
use crate::model::{
    OutcomeStatus, SubscriptionDeleteOutcome, SubscriptionView, TopicCreateOutcome,
    TopicDeleteOutcome, TopicPatch, TopicUpdateOutcome, TopicUpdateRequest, TopicView,
};
use std::sync::Arc;
use std::time::Duration;

/// Topic creation is the one operation observed to be transiently flaky
/// upstream, so it alone gets a bounded retry with doubling backoff.
const CREATE_RETRY_ATTEMPTS: u32 = 3;
const CREATE_RETRY_BASE_DELAY: Duration = Duration::from_millis(100);

#[derive(Clone)]
pub struct TopicReconciler {
    backend: Arc<dyn MessagingBackend>,
    project_id: String,
    subscriptions: SubscriptionReconciler,
}

impl TopicReconciler {
    pub fn new(backend: Arc<dyn MessagingBackend>, project_id: String) -> Self {
        let subscriptions = SubscriptionReconciler::new(backend.clone(), project_id.clone());
        Self {
            backend,
            project_id,
            subscriptions,
        }
    }

    pub fn subscriptions(&self) -> &SubscriptionReconciler {
        &self.subscriptions
    }

    /// Create a topic in the given project scope. Retries only on
    /// `Unavailable`: a retried create that actually succeeded upstream
    /// surfaces as `AlreadyExists` rather than a silent duplicate.
    pub async fn create(
        &self,
        project_id: &str,
        topic_name: &str,
        labels: std::collections::HashMap<String, String>,
    ) -> AdminResult<TopicCreateOutcome> {
        let topic_path = backend::topic_path(project_id, topic_name);
        let mut attempt = 1;
        let topic = loop {
            match self.backend.create_topic(&topic_path, labels.clone()).await {
                Ok(topic) => break topic,
                Err(BackendError::Unavailable(reason)) if attempt < CREATE_RETRY_ATTEMPTS => {
                    let delay = CREATE_RETRY_BASE_DELAY * 2u32.pow(attempt - 1);
                    tracing::warn!(
                        topic = %topic_path,
                        attempt,
                        %reason,
                        delay_ms = delay.as_millis() as u64,
                        "topic create unavailable, retrying"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(err) => return Err(err.into()),
            }
        };
        tracing::info!(topic = %topic.name, "topic created");
        metrics::counter!("adminplane_topic_ops_total", "op" => "create").increment(1);
        Ok(TopicCreateOutcome {
            status: OutcomeStatus::Success,
            message: format!("Topic created: {}", topic.name),
            topic_path: topic.name,
        })
    }

    /// Fetch one topic with its full subscription list resolved.
    pub async fn get(&self, topic_name: &str) -> AdminResult<TopicView> {
        let topic_path = backend::topic_path(&self.project_id, topic_name);
        let topic = self.backend.get_topic(&topic_path).await?;
        let subscriptions = self.resolve_subscriptions(&topic.name).await;
        Ok(TopicView::from_topic(topic, subscriptions))
    }

    /// List every topic in the project scope, each with resolved
    /// subscriptions. Pagination, if the backend enforces it, is the backend
    /// client's responsibility; this call expects materialized iteration.
    pub async fn list(&self) -> AdminResult<Vec<TopicView>> {
        let project_path = backend::project_path(&self.project_id);
        let topics = self.backend.list_topics(&project_path).await?;
        let mut views = Vec::with_capacity(topics.len());
        for topic in topics {
            let subscriptions = self.resolve_subscriptions(&topic.name).await;
            views.push(TopicView::from_topic(topic, subscriptions));
        }
        Ok(views)
    }

    /// The central reconciliation path. Existence is validated by the backend
    /// update call itself (no check-then-mutate race). A malformed retention
    /// duration fails fast before any backend call; an empty diff set skips
    /// the mutation and reports a no-op success. Subscription sub-operations
    /// are applied after the topic mutation and never roll it back: their
    /// failures are carried as named error fields on the outcome.
    pub async fn update(
        &self,
        topic_name: &str,
        request: TopicUpdateRequest,
    ) -> AdminResult<TopicUpdateOutcome> {
        let topic_path = backend::topic_path(&self.project_id, topic_name);
        let retention = request
            .message_retention_duration
            .as_deref()
            .map(duration::parse)
            .transpose()?;
        let patch = TopicPatch {
            labels: request.labels,
            message_retention_duration_seconds: retention,
        };
        let update_mask = mask::topic_mask(&patch);

        let mut outcome = if update_mask.is_empty() {
            TopicUpdateOutcome::success("No updates were necessary for the topic", &topic_path)
        } else {
            let updated = self
                .backend
                .update_topic(&topic_path, patch, &update_mask)
                .await?;
            tracing::info!(topic = %updated.name, mask = ?update_mask.paths(), "topic updated");
            metrics::counter!("adminplane_topic_ops_total", "op" => "update").increment(1);
            TopicUpdateOutcome::success(format!("Topic updated: {}", updated.name), updated.name)
        };

        if let Some(config) = request.add_subscription {
            match self.subscriptions.add(&topic_path, config).await {
                Ok(view) => outcome.added_subscription = Some(view),
                Err(err) => outcome.add_subscription_error = Some(err.to_string()),
            }
        }
        if let Some(config) = request.update_subscription {
            match self.subscriptions.update(config).await {
                Ok(sub_outcome) => outcome.updated_subscription = sub_outcome.subscription,
                Err(err) => outcome.update_subscription_error = Some(err.to_string()),
            }
        }
        Ok(outcome)
    }

    /// Delete a topic, optionally cascading over the named subscriptions
    /// first. A missing topic returns `NotFound` before any subscription is
    /// touched. Individual cascade failures do not abort the batch, and a
    /// topic-delete failure after the cascade still reports the outcomes
    /// collected so far (nothing is rolled back: the backend offers no
    /// cross-resource transaction).
    pub async fn delete(
        &self,
        topic_name: &str,
        delete_subscriptions: Option<Vec<String>>,
    ) -> AdminResult<TopicDeleteOutcome> {
        let topic_path = backend::topic_path(&self.project_id, topic_name);
        self.backend.get_topic(&topic_path).await?;

        let deleted_subscriptions = match delete_subscriptions {
            Some(names) => {
                let mut outcomes = Vec::with_capacity(names.len());
                for name in names {
                    let outcome = match self.subscriptions.delete(&name).await {
                        Ok(path) => SubscriptionDeleteOutcome::success(
                            name,
                            format!("Subscription deleted: {path}"),
                        ),
                        Err(err) => {
                            tracing::warn!(subscription = %name, error = %err, "cascade delete entry failed");
                            SubscriptionDeleteOutcome::error(name, err.to_string())
                        }
                    };
                    outcomes.push(outcome);
                }
                Some(outcomes)
            }
            None => None,
        };

        match self.backend.delete_topic(&topic_path).await {
            Ok(()) => {
                tracing::info!(topic = %topic_path, "topic deleted");
                metrics::counter!("adminplane_topic_ops_total", "op" => "delete").increment(1);
                Ok(TopicDeleteOutcome {
                    status: OutcomeStatus::Success,
                    message: format!("Topic deleted: {topic_path}"),
                    topic_path,
                    deleted_subscriptions,
                })
            }
            Err(err) => {
                // Cascade outcomes already happened and must be reported even
                // though the primary operation failed.
                tracing::error!(topic = %topic_path, error = %err, "topic delete failed after cascade");
                Ok(TopicDeleteOutcome {
                    status: OutcomeStatus::Error,
                    message: format!("Failed to delete topic: {err}"),
                    topic_path,
                    deleted_subscriptions,
                })
            }
        }
    }

    /// Resolve full subscription detail for everything attached to a topic.
    /// Resolution failures degrade to an empty or shorter list with a logged
    /// warning; a topic read never fails because one subscription read did.
    async fn resolve_subscriptions(&self, topic_path: &str) -> Vec<SubscriptionView> {
        let paths = match self.backend.list_topic_subscriptions(topic_path).await {
            Ok(paths) => paths,
            Err(err) => {
                tracing::warn!(topic = %topic_path, error = %err, "failed to list topic subscriptions");
                return Vec::new();
            }
        };
        let mut views = Vec::with_capacity(paths.len());
        for path in paths {
            match self.backend.get_subscription(&path).await {
                Ok(subscription) => views.push(subscription.into()),
                Err(err) => {
                    tracing::warn!(subscription = %path, error = %err, "failed to resolve subscription");
                }
            }
        }
        views
    }

    pub(crate) fn project_id(&self) -> &str {
        &self.project_id
    }

    pub(crate) fn backend(&self) -> &Arc<dyn MessagingBackend> {
        &self.backend
    }
}
