//! In-memory emulation of the managed pub/sub backend.
//!
//! # Purpose
//! Implements [`MessagingBackend`] entirely in memory using `HashMap`s
//! guarded by `tokio::sync::RwLock`. It exists for:
//! - local development and tests (no remote service required)
//! - exercising the reconcilers against a backend that enforces the same
//!   contract the real service does (mask-scoped mutations, retention and
//!   ack-deadline bounds, already-exists/not-found rejections)
//!
//! # Durability and consistency
//! - **Not durable**: all state is lost on process restart.
//! - **Single-process consistency**: mutations take write locks, reads take
//!   read locks. Concurrent updates to the same resource are last-write-wins,
//!   matching the remote service's behavior.
//!
//! # Mask semantics
//! `update_topic`/`update_subscription` apply only the fields named in the
//! mask, even when the patch carries other values. This is what keeps
//! partial updates from silently overwriting untouched attributes, and the
//! tests rely on it.
use super::{BackendError, BackendResult, MessagingBackend};
use crate::admin::mask::{self, FieldMask};
use crate::model::{
    MessageStoragePolicy, Subscription, SubscriptionPatch, SubscriptionSettings, Topic, TopicPatch,
};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Retention bounds the managed service enforces (10 minutes to 31 days).
pub const RETENTION_MIN_SECONDS: u64 = 600;
pub const RETENTION_MAX_SECONDS: u64 = 2_678_400;

/// Ack deadline bounds (10 seconds to 10 minutes).
pub const ACK_DEADLINE_MIN_SECONDS: u32 = 10;
pub const ACK_DEADLINE_MAX_SECONDS: u32 = 600;

/// In-memory pub/sub backend.
///
/// Authoritative state is keyed by canonical path. Subscriptions reference
/// their topic by path only; deleting a topic leaves its subscriptions in
/// place (detached), exactly like the remote service.
#[derive(Default)]
pub struct InMemoryBackend {
    topics: Arc<RwLock<HashMap<String, Topic>>>,
    subscriptions: Arc<RwLock<HashMap<String, Subscription>>>,
}

impl InMemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

fn check_retention(seconds: u64) -> BackendResult<()> {
    if !(RETENTION_MIN_SECONDS..=RETENTION_MAX_SECONDS).contains(&seconds) {
        return Err(BackendError::InvalidArgument(format!(
            "message_retention_duration must be between {RETENTION_MIN_SECONDS}s and {RETENTION_MAX_SECONDS}s, got {seconds}s"
        )));
    }
    Ok(())
}

fn check_ack_deadline(seconds: u32) -> BackendResult<()> {
    if !(ACK_DEADLINE_MIN_SECONDS..=ACK_DEADLINE_MAX_SECONDS).contains(&seconds) {
        return Err(BackendError::InvalidArgument(format!(
            "ack_deadline_seconds must be between {ACK_DEADLINE_MIN_SECONDS} and {ACK_DEADLINE_MAX_SECONDS}, got {seconds}"
        )));
    }
    Ok(())
}

#[async_trait]
impl MessagingBackend for InMemoryBackend {
    async fn create_topic(
        &self,
        topic_path: &str,
        labels: HashMap<String, String>,
    ) -> BackendResult<Topic> {
        let mut topics = self.topics.write().await;
        if topics.contains_key(topic_path) {
            return Err(BackendError::AlreadyExists(topic_path.to_string()));
        }
        let topic = Topic {
            name: topic_path.to_string(),
            labels,
            message_storage_policy: MessageStoragePolicy::default(),
            kms_key_name: None,
            schema_settings: None,
            satisfies_pzs: false,
            // 0 = service default retention applies until explicitly set.
            message_retention_duration_seconds: 0,
        };
        topics.insert(topic_path.to_string(), topic.clone());
        metrics::gauge!("adminplane_backend_topics_total").set(topics.len() as f64);
        Ok(topic)
    }

    async fn get_topic(&self, topic_path: &str) -> BackendResult<Topic> {
        let topics = self.topics.read().await;
        topics
            .get(topic_path)
            .cloned()
            .ok_or_else(|| BackendError::NotFound(topic_path.to_string()))
    }

    async fn list_topics(&self, project_path: &str) -> BackendResult<Vec<Topic>> {
        let prefix = format!("{project_path}/topics/");
        let topics = self.topics.read().await;
        let mut items: Vec<Topic> = topics
            .values()
            .filter(|topic| topic.name.starts_with(&prefix))
            .cloned()
            .collect();
        items.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(items)
    }

    async fn update_topic(
        &self,
        topic_path: &str,
        patch: TopicPatch,
        update_mask: &FieldMask,
    ) -> BackendResult<Topic> {
        if let Some(seconds) = patch.message_retention_duration_seconds {
            if update_mask.contains(mask::MESSAGE_RETENTION_DURATION) {
                check_retention(seconds)?;
            }
        }
        let mut topics = self.topics.write().await;
        let topic = topics
            .get_mut(topic_path)
            .ok_or_else(|| BackendError::NotFound(topic_path.to_string()))?;
        if update_mask.contains(mask::LABELS) {
            topic.labels = patch.labels.unwrap_or_default();
        }
        if update_mask.contains(mask::MESSAGE_RETENTION_DURATION) {
            if let Some(seconds) = patch.message_retention_duration_seconds {
                topic.message_retention_duration_seconds = seconds;
            }
        }
        Ok(topic.clone())
    }

    async fn delete_topic(&self, topic_path: &str) -> BackendResult<()> {
        let mut topics = self.topics.write().await;
        if topics.remove(topic_path).is_none() {
            return Err(BackendError::NotFound(topic_path.to_string()));
        }
        metrics::gauge!("adminplane_backend_topics_total").set(topics.len() as f64);
        Ok(())
    }

    async fn create_subscription(
        &self,
        settings: SubscriptionSettings,
    ) -> BackendResult<Subscription> {
        check_ack_deadline(settings.ack_deadline_seconds)?;
        check_retention(settings.message_retention_duration_seconds)?;
        let topics = self.topics.read().await;
        if !topics.contains_key(&settings.topic) {
            return Err(BackendError::NotFound(settings.topic.clone()));
        }
        drop(topics);
        let mut subscriptions = self.subscriptions.write().await;
        if subscriptions.contains_key(&settings.name) {
            return Err(BackendError::AlreadyExists(settings.name));
        }
        let subscription = Subscription {
            name: settings.name.clone(),
            topic: settings.topic,
            push_endpoint: settings.push_endpoint,
            ack_deadline_seconds: settings.ack_deadline_seconds,
            retain_acked_messages: settings.retain_acked_messages,
            message_retention_duration_seconds: settings.message_retention_duration_seconds,
            labels: settings.labels,
        };
        subscriptions.insert(settings.name, subscription.clone());
        metrics::gauge!("adminplane_backend_subscriptions_total").set(subscriptions.len() as f64);
        Ok(subscription)
    }

    async fn get_subscription(&self, subscription_path: &str) -> BackendResult<Subscription> {
        let subscriptions = self.subscriptions.read().await;
        subscriptions
            .get(subscription_path)
            .cloned()
            .ok_or_else(|| BackendError::NotFound(subscription_path.to_string()))
    }

    async fn update_subscription(
        &self,
        subscription_path: &str,
        patch: SubscriptionPatch,
        update_mask: &FieldMask,
    ) -> BackendResult<Subscription> {
        if update_mask.contains(mask::MESSAGE_RETENTION_DURATION) {
            if let Some(seconds) = patch.message_retention_duration_seconds {
                check_retention(seconds)?;
            }
        }
        if update_mask.contains(mask::ACK_DEADLINE_SECONDS) {
            if let Some(seconds) = patch.ack_deadline_seconds {
                check_ack_deadline(seconds)?;
            }
        }
        let mut subscriptions = self.subscriptions.write().await;
        let subscription = subscriptions
            .get_mut(subscription_path)
            .ok_or_else(|| BackendError::NotFound(subscription_path.to_string()))?;
        if update_mask.contains(mask::LABELS) {
            subscription.labels = patch.labels.unwrap_or_default();
        }
        if update_mask.contains(mask::MESSAGE_RETENTION_DURATION) {
            if let Some(seconds) = patch.message_retention_duration_seconds {
                subscription.message_retention_duration_seconds = seconds;
            }
        }
        if update_mask.contains(mask::PUSH_CONFIG) {
            // An empty endpoint clears the push config (pull-only).
            subscription.push_endpoint =
                patch.push_endpoint.filter(|endpoint| !endpoint.is_empty());
        }
        if update_mask.contains(mask::ACK_DEADLINE_SECONDS) {
            if let Some(seconds) = patch.ack_deadline_seconds {
                subscription.ack_deadline_seconds = seconds;
            }
        }
        if update_mask.contains(mask::RETAIN_ACKED_MESSAGES) {
            if let Some(retain) = patch.retain_acked_messages {
                subscription.retain_acked_messages = retain;
            }
        }
        Ok(subscription.clone())
    }

    async fn delete_subscription(&self, subscription_path: &str) -> BackendResult<()> {
        let mut subscriptions = self.subscriptions.write().await;
        if subscriptions.remove(subscription_path).is_none() {
            return Err(BackendError::NotFound(subscription_path.to_string()));
        }
        metrics::gauge!("adminplane_backend_subscriptions_total").set(subscriptions.len() as f64);
        Ok(())
    }

    async fn list_topic_subscriptions(&self, topic_path: &str) -> BackendResult<Vec<String>> {
        let subscriptions = self.subscriptions.read().await;
        let mut paths: Vec<String> = subscriptions
            .values()
            .filter(|sub| sub.topic == topic_path)
            .map(|sub| sub.name.clone())
            .collect();
        paths.sort();
        Ok(paths)
    }

    async fn health_check(&self) -> BackendResult<()> {
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
