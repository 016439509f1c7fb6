//! Admin-plane HTTP service entry point.
//!
//! # Purpose
//! Wires configuration, the messaging backend, and the HTTP router, then
//! starts the API server and the metrics listener.
//!
//! # Notes
//! The `build_state` helper keeps wiring testable and minimizes main setup logic.
mod admin;
mod api;
mod app;
mod backend;
mod config;
mod model;
mod observability;

use admin::AdminService;
use app::{AppState, build_router};
use backend::memory::InMemoryBackend;
use std::future::Future;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = config::AdminPlaneConfig::from_env_or_yaml().expect("admin plane config");
    run_with_shutdown(config, async {
        let _ = tokio::signal::ctrl_c().await;
    })
    .await
}

async fn run_with_shutdown<F>(config: config::AdminPlaneConfig, shutdown: F) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let metrics_handle = observability::init_observability("adminplane");
    let state = build_state(&config);
    let metrics_task = tokio::spawn(observability::serve_metrics(
        metrics_handle,
        config.metrics_bind,
    ));

    let app = build_router(state);

    let addr = config.bind_addr;
    tracing::info!(%addr, project_id = %config.project_id, "admin plane listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tokio::pin!(shutdown);
    tokio::select! {
        result = axum::serve(listener, app.into_make_service()) => {
            result?;
        }
        _ = &mut shutdown => {}
    }

    metrics_task.abort();
    let _ = metrics_task.await;
    Ok(())
}

fn build_state(config: &config::AdminPlaneConfig) -> AppState {
    let backend = Arc::new(InMemoryBackend::new());
    AppState {
        admin: AdminService::new(backend, &config.project_id),
        api_version: "v1".to_string(),
    }
}
