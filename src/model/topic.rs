//! Topic model definitions and update payloads.
//!
//! # Purpose
//! Defines the remote topic shape returned by the messaging backend, the
//! sparse patch applied by partial updates, and the outward topic view with
//! resolved subscriptions.
use crate::model::subscription::{SubscriptionConfig, SubscriptionView};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use utoipa::ToSchema;

/// A topic as the backend stores it. `name` is the canonical path
/// (`projects/{project}/topics/{topic}`) and is immutable after creation.
#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, PartialEq)]
pub struct Topic {
    pub name: String,
    pub labels: HashMap<String, String>,
    pub message_storage_policy: MessageStoragePolicy,
    pub kms_key_name: Option<String>,
    pub schema_settings: Option<SchemaSettings>,
    pub satisfies_pzs: bool,
    /// Whole seconds; `0` means the backend default applies.
    pub message_retention_duration_seconds: u64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, PartialEq, Default)]
pub struct MessageStoragePolicy {
    pub allowed_persistence_regions: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, PartialEq)]
pub struct SchemaSettings {
    pub schema: String,
    pub encoding: String,
}

/// Sparse topic mutation sent to the backend together with a field mask.
/// Fields absent from the mask are ignored by the backend even if set here.
#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, Default)]
pub struct TopicPatch {
    pub labels: Option<HashMap<String, String>>,
    pub message_retention_duration_seconds: Option<u64>,
}

/// Partial topic update request. Every field is optional; absence means
/// "leave unchanged". Subscription sub-operations ride along and are applied
/// independently of the topic-level mutation.
#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, Default)]
pub struct TopicUpdateRequest {
    pub labels: Option<HashMap<String, String>>,
    /// Human-readable duration, `<integer>` followed by `s`, `m`, or `h`.
    pub message_retention_duration: Option<String>,
    pub add_subscription: Option<SubscriptionConfig>,
    pub update_subscription: Option<SubscriptionConfig>,
}

/// Outward topic view: short name plus canonical path, with attached
/// subscriptions resolved to full detail.
#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, PartialEq)]
pub struct TopicView {
    pub name: String,
    pub full_name: String,
    pub labels: HashMap<String, String>,
    pub message_storage_policy: MessageStoragePolicy,
    pub kms_key_name: Option<String>,
    pub schema_settings: Option<SchemaSettings>,
    pub satisfies_pzs: bool,
    pub message_retention_duration_seconds: u64,
    pub subscriptions: Vec<SubscriptionView>,
}

impl TopicView {
    pub fn from_topic(topic: Topic, subscriptions: Vec<SubscriptionView>) -> Self {
        Self {
            name: crate::backend::short_name(&topic.name).to_string(),
            full_name: topic.name,
            labels: topic.labels,
            message_storage_policy: topic.message_storage_policy,
            kms_key_name: topic.kms_key_name,
            schema_settings: topic.schema_settings,
            satisfies_pzs: topic.satisfies_pzs,
            message_retention_duration_seconds: topic.message_retention_duration_seconds,
            subscriptions,
        }
    }
}
