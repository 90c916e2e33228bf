mod common;

use std::sync::Arc;

use anyhow::Result;
use axum::http::StatusCode;

use common::{FixedSecret, MissingSecret, CREDENTIALS};

#[tokio::test]
async fn select_renders_null_when_the_database_is_unreachable() -> Result<()> {
    let router = common::router(
        Arc::new(FixedSecret(CREDENTIALS.to_string())),
        common::unreachable_database()?,
        false,
    );

    let res = common::get(&router, "/select").await?;

    assert_eq!(res.status, StatusCode::OK);
    assert!(res.content_type.starts_with("application/json"), "content type: {}", res.content_type);
    assert_eq!(res.body, "null");
    Ok(())
}

#[tokio::test]
async fn select_renders_null_when_the_secret_is_missing() -> Result<()> {
    let router = common::router(Arc::new(MissingSecret), common::unreachable_database()?, false);

    let res = common::get(&router, "/select").await?;

    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body, "null");
    Ok(())
}

#[tokio::test]
async fn select_renders_null_when_the_secret_is_not_json() -> Result<()> {
    let router = common::router(
        Arc::new(FixedSecret("plain text".to_string())),
        common::unreachable_database()?,
        false,
    );

    let res = common::get(&router, "/select").await?;

    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body, "null");
    Ok(())
}

#[tokio::test]
async fn select_is_service_unavailable_when_propagating() -> Result<()> {
    let router = common::router(
        Arc::new(FixedSecret(CREDENTIALS.to_string())),
        common::unreachable_database()?,
        true,
    );

    let res = common::get(&router, "/select").await?;

    assert_eq!(res.status, StatusCode::SERVICE_UNAVAILABLE);
    let body: serde_json::Value = serde_json::from_str(&res.body)?;
    assert_eq!(body["error"], true);
    assert_eq!(body["code"], "SERVICE_UNAVAILABLE");
    Ok(())
}

#[tokio::test]
async fn select_is_bad_gateway_for_missing_secret_when_propagating() -> Result<()> {
    let router = common::router(Arc::new(MissingSecret), common::unreachable_database()?, true);

    let res = common::get(&router, "/select").await?;

    assert_eq!(res.status, StatusCode::BAD_GATEWAY);
    Ok(())
}
