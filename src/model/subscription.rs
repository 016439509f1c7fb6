//! Subscription model definitions and create/update payloads.
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use utoipa::ToSchema;

/// A subscription as the backend stores it. `name` is the canonical path
/// (`projects/{project}/subscriptions/{subscription}`); `topic` references
/// the owning topic by canonical path only and is never traversed for
/// ownership.
#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, PartialEq)]
pub struct Subscription {
    pub name: String,
    pub topic: String,
    /// `None` means the subscription is pull-only.
    pub push_endpoint: Option<String>,
    pub ack_deadline_seconds: u32,
    pub retain_acked_messages: bool,
    pub message_retention_duration_seconds: u64,
    pub labels: HashMap<String, String>,
}

/// Fully-resolved settings handed to the backend on create. Unlike
/// [`SubscriptionConfig`], every field here already has its final value:
/// defaults are applied by the reconciler before this struct is built.
#[derive(Debug, Clone)]
pub struct SubscriptionSettings {
    pub name: String,
    pub topic: String,
    pub push_endpoint: Option<String>,
    pub ack_deadline_seconds: u32,
    pub retain_acked_messages: bool,
    pub message_retention_duration_seconds: u64,
    pub labels: HashMap<String, String>,
}

/// Sparse subscription request used both for attaching a new subscription
/// and for patching an existing one. On create, omitted fields get defaults;
/// on update, omitted fields are left unchanged. An empty `push_endpoint`
/// string on update clears the push configuration (pull-only).
#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, Default)]
pub struct SubscriptionConfig {
    pub name: String,
    pub push_endpoint: Option<String>,
    pub ack_deadline_seconds: Option<u32>,
    pub retain_acked_messages: Option<bool>,
    /// Human-readable duration, `<integer>` followed by `s`, `m`, or `h`.
    pub message_retention_duration: Option<String>,
    pub labels: Option<HashMap<String, String>>,
}

/// Sparse subscription mutation sent to the backend together with a field
/// mask. Duration strings have already been canonicalized to seconds.
#[derive(Debug, Clone, Default)]
pub struct SubscriptionPatch {
    pub labels: Option<HashMap<String, String>>,
    pub message_retention_duration_seconds: Option<u64>,
    pub push_endpoint: Option<String>,
    pub ack_deadline_seconds: Option<u32>,
    pub retain_acked_messages: Option<bool>,
}

/// Outward subscription view: short name plus canonical path.
#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, PartialEq)]
pub struct SubscriptionView {
    pub name: String,
    pub full_name: String,
    pub topic: String,
    pub push_endpoint: Option<String>,
    pub ack_deadline_seconds: u32,
    pub retain_acked_messages: bool,
    pub message_retention_duration_seconds: u64,
    pub labels: HashMap<String, String>,
}

impl From<Subscription> for SubscriptionView {
    fn from(sub: Subscription) -> Self {
        Self {
            name: crate::backend::short_name(&sub.name).to_string(),
            full_name: sub.name,
            topic: sub.topic,
            push_endpoint: sub.push_endpoint,
            ack_deadline_seconds: sub.ack_deadline_seconds,
            retain_acked_messages: sub.retain_acked_messages,
            message_retention_duration_seconds: sub.message_retention_duration_seconds,
            labels: sub.labels,
        }
    }
}
