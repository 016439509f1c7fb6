//! Domain models for topics, subscriptions, and operation outcomes.
//!
//! # Purpose
//! Defines the typed request/response shapes exchanged between the HTTP
//! layer, the reconciliation core, and the messaging backend. Requests are
//! sparse: `None` always means "leave unchanged", never "clear".
pub mod outcome;
pub mod subscription;
pub mod topic;

pub use outcome::{
    OutcomeStatus, SubscriptionDeleteOutcome, SubscriptionUpdateOutcome, TopicCreateOutcome,
    TopicDeleteOutcome, TopicUpdateOutcome,
};
pub use subscription::{
    Subscription, SubscriptionConfig, SubscriptionPatch, SubscriptionSettings, SubscriptionView,
};
pub use topic::{MessageStoragePolicy, SchemaSettings, Topic, TopicPatch, TopicUpdateRequest, TopicView};
