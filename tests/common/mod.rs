#![allow(dead_code)]

use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use tower::ServiceExt;

use vendor_api_rust::config::{ApiConfig, DatabaseConfig};
use vendor_api_rust::vault::{SecretSource, VaultError};
use vendor_api_rust::{app, AppState};

pub const CREDENTIALS: &str =
    r#"{"host":"127.0.0.1","username":"vendor_test","password":"not-a-real-password"}"#;

/// Secret source that always returns the same payload
pub struct FixedSecret(pub String);

#[async_trait]
impl SecretSource for FixedSecret {
    fn secret_name(&self) -> &str {
        "fixed"
    }

    async fn fetch_secret(&self) -> Result<String, VaultError> {
        Ok(self.0.clone())
    }
}

/// Secret source whose secret does not exist
pub struct MissingSecret;

#[async_trait]
impl SecretSource for MissingSecret {
    fn secret_name(&self) -> &str {
        "missing"
    }

    async fn fetch_secret(&self) -> Result<String, VaultError> {
        Err(VaultError::classify(
            "missing",
            Some("ResourceNotFoundException"),
            "Secrets Manager can't find the specified secret.",
        ))
    }
}

/// Database settings pointing at a local port nothing listens on
pub fn unreachable_database() -> Result<DatabaseConfig> {
    let port = portpicker::pick_unused_port().context("failed to pick free port")?;
    Ok(DatabaseConfig {
        port,
        ..DatabaseConfig::default()
    })
}

pub fn api(propagate_errors: bool) -> ApiConfig {
    ApiConfig {
        propagate_errors,
        ..ApiConfig::default()
    }
}

pub fn router(
    vault: Arc<dyn SecretSource>,
    database: DatabaseConfig,
    propagate_errors: bool,
) -> Router {
    app(AppState::new(vault, database, api(propagate_errors)))
}

pub struct TestResponse {
    pub status: StatusCode,
    pub content_type: String,
    pub body: String,
}

pub async fn get(router: &Router, uri: &str) -> Result<TestResponse> {
    let resp = router
        .clone()
        .oneshot(Request::builder().method("GET").uri(uri).body(Body::empty())?)
        .await?;

    let status = resp.status();
    let content_type = resp
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    let bytes = to_bytes(resp.into_body(), usize::MAX).await?;

    Ok(TestResponse {
        status,
        content_type,
        body: String::from_utf8(bytes.to_vec())?,
    })
}
