mod common;

use std::sync::Arc;

use anyhow::Result;
use axum::http::StatusCode;

use common::{FixedSecret, MissingSecret, CREDENTIALS};

#[tokio::test]
async fn load_reports_success_even_when_the_database_is_unreachable() -> Result<()> {
    let router = common::router(
        Arc::new(FixedSecret(CREDENTIALS.to_string())),
        common::unreachable_database()?,
        false,
    );

    let res = common::get(&router, "/load").await?;

    assert_eq!(res.status, StatusCode::OK);
    assert!(res.content_type.starts_with("text/html"), "content type: {}", res.content_type);
    assert_eq!(res.body, "Data is loaded");
    Ok(())
}

#[tokio::test]
async fn load_reports_success_when_the_secret_is_missing() -> Result<()> {
    let router = common::router(Arc::new(MissingSecret), common::unreachable_database()?, false);

    let res = common::get(&router, "/load").await?;

    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body, "Data is loaded");
    Ok(())
}

#[tokio::test]
async fn load_is_service_unavailable_when_propagating() -> Result<()> {
    let router = common::router(
        Arc::new(FixedSecret(CREDENTIALS.to_string())),
        common::unreachable_database()?,
        true,
    );

    let res = common::get(&router, "/load").await?;

    assert_eq!(res.status, StatusCode::SERVICE_UNAVAILABLE);
    Ok(())
}
