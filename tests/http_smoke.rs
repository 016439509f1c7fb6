mod common;
mod http_helpers;

use adminplane::admin::AdminService;
use adminplane::admin::mask::FieldMask;
use adminplane::app::{AppState, build_router};
use adminplane::backend::memory::InMemoryBackend;
use adminplane::backend::{BackendResult, MessagingBackend};
use adminplane::model::{Subscription, SubscriptionPatch, SubscriptionSettings, Topic, TopicPatch};
use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use common::read_json;
use http_helpers::json_request;
use std::collections::HashMap;
use std::sync::Arc;
use tower::ServiceExt;

fn app_with_project(project_id: &str) -> axum::routing::RouterIntoService<axum::body::Body, ()> {
    let state = AppState {
        admin: AdminService::new(Arc::new(InMemoryBackend::new()), project_id),
        api_version: "v1".to_string(),
    };
    build_router(state).into_service()
}

#[tokio::test]
async fn topics_crud_smoke() {
    let app = app_with_project("p1");

    let create = json_request(
        "POST",
        "/v1/topics",
        serde_json::json!({
            "topic_name": "orders",
            "labels": { "env": "prod" }
        }),
    );
    let response = app.clone().oneshot(create).await.expect("create");
    assert_eq!(response.status(), StatusCode::CREATED);
    let payload = read_json(response).await;
    assert_eq!(payload["status"], "success");
    assert_eq!(payload["topic_path"], "projects/p1/topics/orders");

    let conflict = json_request(
        "POST",
        "/v1/topics",
        serde_json::json!({ "topic_name": "orders" }),
    );
    let response = app.clone().oneshot(conflict).await.expect("conflict");
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let payload = read_json(response).await;
    assert_eq!(payload["code"], "already_exists");

    let list = Request::builder()
        .uri("/v1/topics")
        .body(Body::empty())
        .expect("list");
    let response = app.clone().oneshot(list).await.expect("list");
    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json(response).await;
    assert_eq!(payload["items"].as_array().unwrap().len(), 1);

    let get = Request::builder()
        .uri("/v1/topics/orders")
        .body(Body::empty())
        .expect("get");
    let response = app.clone().oneshot(get).await.expect("get");
    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json(response).await;
    assert_eq!(payload["name"], "orders");
    assert_eq!(payload["full_name"], "projects/p1/topics/orders");
    assert_eq!(payload["labels"]["env"], "prod");
    assert_eq!(payload["message_retention_duration_seconds"], 0);

    let delete = Request::builder()
        .method("DELETE")
        .uri("/v1/topics/orders")
        .body(Body::empty())
        .expect("delete");
    let response = app.clone().oneshot(delete).await.expect("delete");
    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json(response).await;
    assert_eq!(payload["status"], "success");
    assert!(payload.get("deleted_subscriptions").is_none());

    let get_missing = Request::builder()
        .uri("/v1/topics/orders")
        .body(Body::empty())
        .expect("get missing");
    let response = app.clone().oneshot(get_missing).await.expect("get missing");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn patch_updates_only_provided_fields() {
    let app = app_with_project("p1");

    let create = json_request(
        "POST",
        "/v1/topics",
        serde_json::json!({
            "topic_name": "orders",
            "labels": { "env": "prod" }
        }),
    );
    let response = app.clone().oneshot(create).await.expect("create");
    assert_eq!(response.status(), StatusCode::CREATED);

    // Labels only: retention must be left untouched.
    let patch = json_request(
        "PATCH",
        "/v1/topics/orders",
        serde_json::json!({
            "labels": { "env": "staging", "team": "core" }
        }),
    );
    let response = app.clone().oneshot(patch).await.expect("patch labels");
    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json(response).await;
    assert_eq!(payload["status"], "success");

    let get = Request::builder()
        .uri("/v1/topics/orders")
        .body(Body::empty())
        .expect("get");
    let response = app.clone().oneshot(get).await.expect("get");
    let payload = read_json(response).await;
    assert_eq!(payload["labels"]["env"], "staging");
    assert_eq!(payload["labels"]["team"], "core");
    assert_eq!(payload["message_retention_duration_seconds"], 0);

    // Retention only: labels must be left untouched.
    let patch = json_request(
        "PATCH",
        "/v1/topics/orders",
        serde_json::json!({ "message_retention_duration": "2h" }),
    );
    let response = app.clone().oneshot(patch).await.expect("patch retention");
    assert_eq!(response.status(), StatusCode::OK);

    let get = Request::builder()
        .uri("/v1/topics/orders")
        .body(Body::empty())
        .expect("get");
    let response = app.clone().oneshot(get).await.expect("get");
    let payload = read_json(response).await;
    assert_eq!(payload["message_retention_duration_seconds"], 7200);
    assert_eq!(payload["labels"]["env"], "staging");
}

#[tokio::test]
async fn empty_patch_is_a_noop_success() {
    let app = app_with_project("p1");

    let create = json_request(
        "POST",
        "/v1/topics",
        serde_json::json!({ "topic_name": "orders" }),
    );
    let response = app.clone().oneshot(create).await.expect("create");
    assert_eq!(response.status(), StatusCode::CREATED);

    let patch = json_request("PATCH", "/v1/topics/orders", serde_json::json!({}));
    let response = app.clone().oneshot(patch).await.expect("empty patch");
    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json(response).await;
    assert_eq!(payload["status"], "success");
    assert_eq!(payload["message"], "No updates were necessary for the topic");
}

#[tokio::test]
async fn invalid_duration_fails_fast_with_400() {
    let app = app_with_project("p1");

    let create = json_request(
        "POST",
        "/v1/topics",
        serde_json::json!({ "topic_name": "orders" }),
    );
    let response = app.clone().oneshot(create).await.expect("create");
    assert_eq!(response.status(), StatusCode::CREATED);

    let patch = json_request(
        "PATCH",
        "/v1/topics/orders",
        serde_json::json!({
            "labels": { "env": "staging" },
            "message_retention_duration": "10x"
        }),
    );
    let response = app.clone().oneshot(patch).await.expect("invalid duration");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let payload = read_json(response).await;
    assert_eq!(payload["code"], "validation_error");
    assert!(payload["message"].as_str().unwrap().contains("Invalid"));

    // Nothing was mutated: the parse failure happens before any backend call.
    let get = Request::builder()
        .uri("/v1/topics/orders")
        .body(Body::empty())
        .expect("get");
    let response = app.clone().oneshot(get).await.expect("get");
    let payload = read_json(response).await;
    assert!(payload["labels"].as_object().unwrap().is_empty());

    // The failure is detected even when the topic does not exist.
    let patch_missing = json_request(
        "PATCH",
        "/v1/topics/missing",
        serde_json::json!({ "message_retention_duration": "soon" }),
    );
    let response = app
        .clone()
        .oneshot(patch_missing)
        .await
        .expect("invalid duration on missing topic");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn patch_carries_subscription_sub_operations() {
    let app = app_with_project("p1");

    let create = json_request(
        "POST",
        "/v1/topics",
        serde_json::json!({ "topic_name": "orders" }),
    );
    let response = app.clone().oneshot(create).await.expect("create");
    assert_eq!(response.status(), StatusCode::CREATED);

    let add = json_request(
        "PATCH",
        "/v1/topics/orders",
        serde_json::json!({
            "add_subscription": {
                "name": "orders-sub",
                "push_endpoint": "https://example.com/push",
                "message_retention_duration": "1h"
            }
        }),
    );
    let response = app.clone().oneshot(add).await.expect("add subscription");
    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json(response).await;
    let added = &payload["added_subscription"];
    assert_eq!(added["name"], "orders-sub");
    assert_eq!(added["push_endpoint"], "https://example.com/push");
    assert_eq!(added["ack_deadline_seconds"], 10);
    assert_eq!(added["message_retention_duration_seconds"], 3600);
    assert_eq!(added["retain_acked_messages"], false);

    let get = Request::builder()
        .uri("/v1/topics/orders")
        .body(Body::empty())
        .expect("get");
    let response = app.clone().oneshot(get).await.expect("get");
    let payload = read_json(response).await;
    assert_eq!(payload["subscriptions"].as_array().unwrap().len(), 1);

    let update = json_request(
        "PATCH",
        "/v1/topics/orders",
        serde_json::json!({
            "update_subscription": {
                "name": "orders-sub",
                "ack_deadline_seconds": 30,
                "push_endpoint": ""
            }
        }),
    );
    let response = app.clone().oneshot(update).await.expect("update subscription");
    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json(response).await;
    let updated = &payload["updated_subscription"];
    assert_eq!(updated["ack_deadline_seconds"], 30);
    // An empty endpoint clears the push config.
    assert_eq!(updated["push_endpoint"], serde_json::Value::Null);

    // A sub-operation failure rides along without failing the envelope.
    let bad_add = json_request(
        "PATCH",
        "/v1/topics/orders",
        serde_json::json!({
            "add_subscription": { "name": "" }
        }),
    );
    let response = app.clone().oneshot(bad_add).await.expect("bad add");
    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json(response).await;
    assert!(
        payload["add_subscription_error"]
            .as_str()
            .unwrap()
            .contains("required")
    );
    assert!(payload.get("added_subscription").is_none());
}

#[tokio::test]
async fn cascade_delete_reports_per_subscription_outcomes() {
    let app = app_with_project("p1");

    let create = json_request(
        "POST",
        "/v1/topics",
        serde_json::json!({ "topic_name": "orders" }),
    );
    let response = app.clone().oneshot(create).await.expect("create");
    assert_eq!(response.status(), StatusCode::CREATED);

    for name in ["sub-a", "sub-b"] {
        let add = json_request(
            "PATCH",
            "/v1/topics/orders",
            serde_json::json!({ "add_subscription": { "name": name } }),
        );
        let response = app.clone().oneshot(add).await.expect("add");
        assert_eq!(response.status(), StatusCode::OK);
    }

    let delete = json_request(
        "DELETE",
        "/v1/topics/orders",
        serde_json::json!({ "delete_subscriptions": ["sub-a", "sub-missing"] }),
    );
    let response = app.clone().oneshot(delete).await.expect("delete");
    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json(response).await;
    assert_eq!(payload["status"], "success");
    let outcomes = payload["deleted_subscriptions"].as_array().unwrap();
    assert_eq!(outcomes.len(), 2);
    assert_eq!(outcomes[0]["name"], "sub-a");
    assert_eq!(outcomes[0]["status"], "success");
    assert_eq!(outcomes[1]["name"], "sub-missing");
    assert_eq!(outcomes[1]["status"], "error");

    let get_missing = Request::builder()
        .uri("/v1/topics/orders")
        .body(Body::empty())
        .expect("get missing");
    let response = app.clone().oneshot(get_missing).await.expect("get missing");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // sub-b was not named in the cascade and survives the topic.
    let delete_sub = Request::builder()
        .method("DELETE")
        .uri("/v1/subscriptions/sub-b")
        .body(Body::empty())
        .expect("delete sub");
    let response = app.clone().oneshot(delete_sub).await.expect("delete sub");
    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json(response).await;
    assert_eq!(payload["status"], "success");
}

#[tokio::test]
async fn delete_missing_resources_return_404() {
    let app = app_with_project("p1");

    let delete_topic = Request::builder()
        .method("DELETE")
        .uri("/v1/topics/missing")
        .body(Body::empty())
        .expect("delete topic");
    let response = app
        .clone()
        .oneshot(delete_topic)
        .await
        .expect("delete topic");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let payload = read_json(response).await;
    assert_eq!(payload["code"], "not_found");

    let delete_sub = Request::builder()
        .method("DELETE")
        .uri("/v1/subscriptions/missing")
        .body(Body::empty())
        .expect("delete sub");
    let response = app.clone().oneshot(delete_sub).await.expect("delete sub");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn system_endpoints() {
    let app = app_with_project("p1");

    let info = Request::builder()
        .uri("/v1/system/info")
        .body(Body::empty())
        .expect("info");
    let response = app.clone().oneshot(info).await.expect("info");
    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json(response).await;
    assert_eq!(payload["project_id"], "p1");
    assert_eq!(payload["api_version"], "v1");
    assert_eq!(payload["backend"], "memory");

    let health = Request::builder()
        .uri("/v1/system/health")
        .body(Body::empty())
        .expect("health");
    let response = app.clone().oneshot(health).await.expect("health");
    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json(response).await;
    assert_eq!(payload["status"], "ok");

    let openapi = Request::builder()
        .uri("/v1/openapi.json")
        .body(Body::empty())
        .expect("openapi");
    let response = app.clone().oneshot(openapi).await.expect("openapi");
    assert_eq!(response.status(), StatusCode::OK);
}

struct FailingBackend;

#[async_trait]
impl MessagingBackend for FailingBackend {
    async fn create_topic(
        &self,
        _topic_path: &str,
        _labels: HashMap<String, String>,
    ) -> BackendResult<Topic> {
        Err(anyhow::anyhow!("fail").into())
    }

    async fn get_topic(&self, _topic_path: &str) -> BackendResult<Topic> {
        Err(anyhow::anyhow!("fail").into())
    }

    async fn list_topics(&self, _project_path: &str) -> BackendResult<Vec<Topic>> {
        Err(anyhow::anyhow!("fail").into())
    }

    async fn update_topic(
        &self,
        _topic_path: &str,
        _patch: TopicPatch,
        _mask: &FieldMask,
    ) -> BackendResult<Topic> {
        Err(anyhow::anyhow!("fail").into())
    }

    async fn delete_topic(&self, _topic_path: &str) -> BackendResult<()> {
        Err(anyhow::anyhow!("fail").into())
    }

    async fn create_subscription(
        &self,
        _settings: SubscriptionSettings,
    ) -> BackendResult<Subscription> {
        Err(anyhow::anyhow!("fail").into())
    }

    async fn get_subscription(&self, _subscription_path: &str) -> BackendResult<Subscription> {
        Err(anyhow::anyhow!("fail").into())
    }

    async fn update_subscription(
        &self,
        _subscription_path: &str,
        _patch: SubscriptionPatch,
        _mask: &FieldMask,
    ) -> BackendResult<Subscription> {
        Err(anyhow::anyhow!("fail").into())
    }

    async fn delete_subscription(&self, _subscription_path: &str) -> BackendResult<()> {
        Err(anyhow::anyhow!("fail").into())
    }

    async fn list_topic_subscriptions(&self, _topic_path: &str) -> BackendResult<Vec<String>> {
        Err(anyhow::anyhow!("fail").into())
    }

    async fn health_check(&self) -> BackendResult<()> {
        Err(anyhow::anyhow!("fail").into())
    }

    fn backend_name(&self) -> &'static str {
        "fail"
    }
}

#[tokio::test]
async fn backend_failures_surface_as_internal_errors() {
    let state = AppState {
        admin: AdminService::new(Arc::new(FailingBackend), "p1"),
        api_version: "v1".to_string(),
    };
    let app: axum::routing::RouterIntoService<axum::body::Body, ()> =
        build_router(state).into_service();

    let health = Request::builder()
        .uri("/v1/system/health")
        .body(Body::empty())
        .expect("health");
    let response = app.clone().oneshot(health).await.expect("health");
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let list = Request::builder()
        .uri("/v1/topics")
        .body(Body::empty())
        .expect("list");
    let response = app.clone().oneshot(list).await.expect("list");
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let payload = read_json(response).await;
    // Internal detail stays server-side.
    assert_eq!(payload["message"], "backend request failed");
}
