// handlers/root.rs - GET / handler

use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

use crate::app::AppState;
use crate::error::ApiError;

pub const GREETING: &str = "Hello world from Flask! The secret is: ";

/// GET / - greet with the raw secret payload.
///
/// The response body contains the secret itself. There is no body to fall
/// back to, so a vault failure is a server error in either error mode. In
/// legacy mode that error is a bare plain-text 500.
pub async fn hello(State(state): State<AppState>) -> Response {
    match state.vault.fetch_secret().await {
        Ok(secret) => Html(format!("{GREETING}{secret}")).into_response(),
        Err(e) if state.api.propagate_errors => ApiError::from(e).into_response(),
        Err(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response(),
    }
}
