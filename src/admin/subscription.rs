//! Subscription reconciliation.
//!
//! # Purpose
//! Adds or mutates a single subscription under a topic. Creation is the one
//! place defaults apply; update builds a diff-only mutation and never
//! invents values for omitted fields.
use crate::admin::{AdminError, AdminResult, duration, mask};
use crate::backend::{self, MessagingBackend};
use crate::model::{
    OutcomeStatus, SubscriptionConfig, SubscriptionPatch, SubscriptionSettings,
    SubscriptionUpdateOutcome, SubscriptionView,
};
use std::sync::Arc;

/// Defaults applied when a create request omits the field.
pub const DEFAULT_ACK_DEADLINE_SECONDS: u32 = 10;
pub const DEFAULT_RETENTION_SECONDS: u64 = 604_800; // 7 days

#[derive(Clone)]
pub struct SubscriptionReconciler {
    backend: Arc<dyn MessagingBackend>,
    project_id: String,
}

impl SubscriptionReconciler {
    pub fn new(backend: Arc<dyn MessagingBackend>, project_id: String) -> Self {
        Self {
            backend,
            project_id,
        }
    }

    /// Create a subscription attached to `topic_path`, filling defaults for
    /// every omitted optional field. A push configuration is built only when
    /// an endpoint was supplied; otherwise the subscription is pull-only.
    pub async fn add(
        &self,
        topic_path: &str,
        config: SubscriptionConfig,
    ) -> AdminResult<SubscriptionView> {
        if config.name.is_empty() {
            return Err(AdminError::MissingName);
        }
        let retention = match config.message_retention_duration.as_deref() {
            Some(text) => duration::parse(text)?,
            None => DEFAULT_RETENTION_SECONDS,
        };
        let settings = SubscriptionSettings {
            name: backend::subscription_path(&self.project_id, &config.name),
            topic: topic_path.to_string(),
            push_endpoint: config.push_endpoint.filter(|endpoint| !endpoint.is_empty()),
            ack_deadline_seconds: config
                .ack_deadline_seconds
                .unwrap_or(DEFAULT_ACK_DEADLINE_SECONDS),
            retain_acked_messages: config.retain_acked_messages.unwrap_or(false),
            message_retention_duration_seconds: retention,
            labels: config.labels.unwrap_or_default(),
        };
        let subscription = self.backend.create_subscription(settings).await?;
        tracing::info!(subscription = %subscription.name, topic = %topic_path, "subscription created");
        metrics::counter!("adminplane_subscription_ops_total", "op" => "add").increment(1);
        Ok(subscription.into())
    }

    /// Patch an existing subscription, touching only the fields present in
    /// the request. A malformed duration fails the whole update before any
    /// mutation is sent; an empty diff skips the backend call entirely and
    /// reports a no-op success.
    pub async fn update(
        &self,
        config: SubscriptionConfig,
    ) -> AdminResult<SubscriptionUpdateOutcome> {
        if config.name.is_empty() {
            return Err(AdminError::MissingName);
        }
        let retention = config
            .message_retention_duration
            .as_deref()
            .map(duration::parse)
            .transpose()?;
        let subscription_path = backend::subscription_path(&self.project_id, &config.name);
        let patch = SubscriptionPatch {
            labels: config.labels,
            message_retention_duration_seconds: retention,
            push_endpoint: config.push_endpoint,
            ack_deadline_seconds: config.ack_deadline_seconds,
            retain_acked_messages: config.retain_acked_messages,
        };
        let update_mask = mask::subscription_mask(&patch);
        if update_mask.is_empty() {
            return Ok(SubscriptionUpdateOutcome {
                status: OutcomeStatus::Success,
                message: "No updates were necessary for the subscription".to_string(),
                subscription: None,
            });
        }
        let updated = self
            .backend
            .update_subscription(&subscription_path, patch, &update_mask)
            .await?;
        tracing::info!(
            subscription = %updated.name,
            mask = ?update_mask.paths(),
            "subscription updated"
        );
        metrics::counter!("adminplane_subscription_ops_total", "op" => "update").increment(1);
        Ok(SubscriptionUpdateOutcome {
            status: OutcomeStatus::Success,
            message: format!("Subscription updated: {}", updated.name),
            subscription: Some(updated.into()),
        })
    }

    /// Delete a subscription by short name. `NotFound` is returned as an
    /// error here; cascade deletion converts it into a non-fatal per-name
    /// outcome so the batch can continue past missing subscriptions.
    pub async fn delete(&self, subscription_name: &str) -> AdminResult<String> {
        let subscription_path = backend::subscription_path(&self.project_id, subscription_name);
        self.backend.delete_subscription(&subscription_path).await?;
        tracing::info!(subscription = %subscription_path, "subscription deleted");
        metrics::counter!("adminplane_subscription_ops_total", "op" => "delete").increment(1);
        Ok(subscription_path)
    }
}
