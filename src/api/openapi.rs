//! OpenAPI schema aggregation for the admin-plane API.
use crate::api::{
    subscriptions, system, topics,
    types::{
        ErrorResponse, HealthStatus, SystemInfo, TopicCreateRequest, TopicDeleteRequest,
        TopicListResponse,
    },
};
use crate::model::{
    MessageStoragePolicy, OutcomeStatus, SchemaSettings, Subscription, SubscriptionConfig,
    SubscriptionDeleteOutcome, SubscriptionUpdateOutcome, SubscriptionView, Topic,
    TopicCreateOutcome, TopicDeleteOutcome, TopicPatch, TopicUpdateOutcome, TopicUpdateRequest,
    TopicView,
};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "adminplane",
        version = "v1",
        description = "Administrative HTTP plane for a managed pub/sub backend"
    ),
    paths(
        system::system_info,
        system::system_health,
        topics::create_topic,
        topics::list_topics,
        topics::get_topic,
        topics::update_topic,
        topics::delete_topic,
        subscriptions::delete_subscription
    ),
    components(schemas(
        SystemInfo,
        HealthStatus,
        ErrorResponse,
        Topic,
        TopicView,
        TopicPatch,
        MessageStoragePolicy,
        SchemaSettings,
        TopicCreateRequest,
        TopicDeleteRequest,
        TopicListResponse,
        TopicUpdateRequest,
        TopicCreateOutcome,
        TopicUpdateOutcome,
        TopicDeleteOutcome,
        Subscription,
        SubscriptionView,
        SubscriptionConfig,
        SubscriptionUpdateOutcome,
        SubscriptionDeleteOutcome,
        OutcomeStatus
    )),
    tags(
        (name = "system", description = "System and health endpoints"),
        (name = "topics", description = "Topic management and reconciliation"),
        (name = "subscriptions", description = "Subscription management")
    )
)]
pub struct ApiDoc;
