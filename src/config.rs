//! Admin-plane configuration sourced from environment variables, with an
//! optional YAML override file (`ADMINPLANE_CONFIG`).
use anyhow::{Context, Result};
use base64::Engine;
use serde::Deserialize;
use std::fs;
use std::net::SocketAddr;

#[derive(Debug, Clone)]
pub struct AdminPlaneConfig {
    pub bind_addr: SocketAddr,
    pub metrics_bind: SocketAddr,
    pub project_id: String,
    pub credentials: Option<Credentials>,
}

#[derive(Debug, Deserialize)]
struct AdminPlaneConfigOverride {
    bind_addr: Option<String>,
    metrics_bind: Option<String>,
    project_id: Option<String>,
}

/// Backend credentials: a project scope plus opaque authentication material,
/// decoded once at startup and immutable afterwards. The material is never
/// inspected here; it is handed to whatever backend client needs it.
#[derive(Debug, Clone, Deserialize)]
pub struct Credentials {
    pub project_id: String,
    #[serde(flatten)]
    pub material: serde_json::Map<String, serde_json::Value>,
}

impl Credentials {
    /// Decode base64-encoded JSON credential material.
    pub fn from_base64(encoded: &str) -> Result<Self> {
        let bytes = base64::engine::general_purpose::STANDARD
            .decode(encoded.trim())
            .with_context(|| "decode credentials base64")?;
        serde_json::from_slice(&bytes).with_context(|| "parse credentials json")
    }
}

impl AdminPlaneConfig {
    pub fn from_env() -> Result<Self> {
        let bind_addr = std::env::var("ADMINPLANE_BIND")
            .unwrap_or_else(|_| "0.0.0.0:8443".to_string())
            .parse()
            .with_context(|| "parse ADMINPLANE_BIND")?;
        let metrics_bind = std::env::var("ADMINPLANE_METRICS_BIND")
            .unwrap_or_else(|_| "0.0.0.0:8080".to_string())
            .parse()
            .with_context(|| "parse ADMINPLANE_METRICS_BIND")?;
        let credentials = match std::env::var("ADMINPLANE_CREDENTIALS") {
            Ok(encoded) => Some(Credentials::from_base64(&encoded)?),
            Err(_) => None,
        };
        // The credential's own project scope wins over the configured one.
        let project_id = credentials
            .as_ref()
            .map(|credentials| credentials.project_id.clone())
            .or_else(|| std::env::var("ADMINPLANE_PROJECT_ID").ok())
            .unwrap_or_else(|| "local".to_string());
        Ok(Self {
            bind_addr,
            metrics_bind,
            project_id,
            credentials,
        })
    }

    pub fn from_env_or_yaml() -> Result<Self> {
        let mut config = Self::from_env()?;
        if let Ok(path) = std::env::var("ADMINPLANE_CONFIG") {
            let contents = fs::read_to_string(&path)
                .with_context(|| format!("read ADMINPLANE_CONFIG: {path}"))?;
            let override_cfg: AdminPlaneConfigOverride =
                serde_yaml::from_str(&contents).with_context(|| "parse admin plane config yaml")?;
            if let Some(value) = override_cfg.bind_addr {
                config.bind_addr = value.parse().with_context(|| "parse bind_addr")?;
            }
            if let Some(value) = override_cfg.metrics_bind {
                config.metrics_bind = value.parse().with_context(|| "parse metrics_bind")?;
            }
            if let Some(value) = override_cfg.project_id {
                config.project_id = value;
            }
        }
        Ok(config)
    }
}
