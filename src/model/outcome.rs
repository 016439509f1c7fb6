//! Operation outcome envelopes.
//!
//! # Purpose
//! Every reconciler operation reports its result through one of these
//! normalized shapes. Partial failures (cascade entries, subscription
//! sub-operations carried by a topic update) live inside a successful
//! envelope rather than aborting it: the top-level status reflects only the
//! primary operation.
use crate::model::subscription::SubscriptionView;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutcomeStatus {
    Success,
    Error,
}

impl OutcomeStatus {
    pub fn is_success(self) -> bool {
        matches!(self, OutcomeStatus::Success)
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, PartialEq)]
pub struct TopicCreateOutcome {
    pub status: OutcomeStatus,
    pub message: String,
    pub topic_path: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct TopicUpdateOutcome {
    pub status: OutcomeStatus,
    pub message: String,
    pub topic_path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub added_subscription: Option<SubscriptionView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub add_subscription_error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_subscription: Option<SubscriptionView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub update_subscription_error: Option<String>,
}

impl TopicUpdateOutcome {
    pub fn success(message: impl Into<String>, topic_path: impl Into<String>) -> Self {
        Self {
            status: OutcomeStatus::Success,
            message: message.into(),
            topic_path: topic_path.into(),
            added_subscription: None,
            add_subscription_error: None,
            updated_subscription: None,
            update_subscription_error: None,
        }
    }
}

/// Result of updating a single subscription. `subscription` is `None` when
/// the diff set was empty and the mutation call was skipped.
#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct SubscriptionUpdateOutcome {
    pub status: OutcomeStatus,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subscription: Option<SubscriptionView>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct TopicDeleteOutcome {
    pub status: OutcomeStatus,
    pub message: String,
    pub topic_path: String,
    /// Present iff subscription names were supplied for cascade deletion;
    /// one entry per requested name, in request order.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted_subscriptions: Option<Vec<SubscriptionDeleteOutcome>>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, PartialEq)]
pub struct SubscriptionDeleteOutcome {
    pub name: String,
    pub status: OutcomeStatus,
    pub message: String,
}

impl SubscriptionDeleteOutcome {
    pub fn success(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: OutcomeStatus::Success,
            message: message.into(),
        }
    }

    pub fn error(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: OutcomeStatus::Error,
            message: message.into(),
        }
    }
}
