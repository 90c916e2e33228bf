use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::config::{ApiConfig, DatabaseConfig};
use crate::database::DatabaseManager;
use crate::handlers;
use crate::vault::SecretSource;

/// Everything a request handler needs. Built once at startup and cloned into
/// each request.
#[derive(Clone)]
pub struct AppState {
    pub vault: Arc<dyn SecretSource>,
    pub database: Arc<DatabaseManager>,
    pub api: Arc<ApiConfig>,
}

impl AppState {
    pub fn new(vault: Arc<dyn SecretSource>, database: DatabaseConfig, api: ApiConfig) -> Self {
        Self {
            database: Arc::new(DatabaseManager::new(Arc::clone(&vault), database)),
            vault,
            api: Arc::new(api),
        }
    }
}

pub fn app(state: AppState) -> Router {
    let request_logging = state.api.enable_request_logging;

    let router = Router::new()
        .route("/", get(handlers::hello))
        .route("/select", get(handlers::select))
        .route("/load", get(handlers::load))
        .with_state(state);

    if request_logging {
        router.layer(TraceLayer::new_for_http())
    } else {
        router
    }
}
