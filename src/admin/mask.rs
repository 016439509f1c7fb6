//! Field mask construction for partial updates.
//!
//! # Purpose
//! Turns a sparse patch into the minimal, ordered set of field identifiers
//! the backend mutation is allowed to touch. An attribute enters the mask
//! iff it is present in the patch, so untouched fields are never overwritten.
//! Identifiers are appended in a fixed order (labels, retention, push
//! config, ack deadline, retain-acked flag) so generated masks are
//! deterministic for logging and tests.
use crate::model::{SubscriptionPatch, TopicPatch};

pub const LABELS: &str = "labels";
pub const MESSAGE_RETENTION_DURATION: &str = "message_retention_duration";
pub const PUSH_CONFIG: &str = "push_config";
pub const ACK_DEADLINE_SECONDS: &str = "ack_deadline_seconds";
pub const RETAIN_ACKED_MESSAGES: &str = "retain_acked_messages";

/// Ordered set of field identifiers covered by one backend mutation.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FieldMask {
    paths: Vec<&'static str>,
}

impl FieldMask {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, path: &'static str) {
        self.paths.push(path);
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn contains(&self, path: &str) -> bool {
        self.paths.contains(&path)
    }

    pub fn paths(&self) -> &[&'static str] {
        &self.paths
    }
}

/// Build the mask for a topic mutation over {labels, retention}.
pub fn topic_mask(patch: &TopicPatch) -> FieldMask {
    let mut mask = FieldMask::new();
    if patch.labels.is_some() {
        mask.push(LABELS);
    }
    if patch.message_retention_duration_seconds.is_some() {
        mask.push(MESSAGE_RETENTION_DURATION);
    }
    mask
}

/// Build the mask for a subscription mutation over its full attribute set.
pub fn subscription_mask(patch: &SubscriptionPatch) -> FieldMask {
    let mut mask = FieldMask::new();
    if patch.labels.is_some() {
        mask.push(LABELS);
    }
    if patch.message_retention_duration_seconds.is_some() {
        mask.push(MESSAGE_RETENTION_DURATION);
    }
    if patch.push_endpoint.is_some() {
        mask.push(PUSH_CONFIG);
    }
    if patch.ack_deadline_seconds.is_some() {
        mask.push(ACK_DEADLINE_SECONDS);
    }
    if patch.retain_acked_messages.is_some() {
        mask.push(RETAIN_ACKED_MESSAGES);
    }
    mask
}
