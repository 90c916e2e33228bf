// handlers/select.rs - GET /select handler

use axum::{extract::State, response::Json};

use crate::app::AppState;
use crate::database::{Repository, Vendor};
use crate::error::ApiError;

/// GET /select - all vendors as `[[vendor_id, vendor_name], ...]`, ordered by
/// name. In legacy mode a failed query renders as `null`.
pub async fn select(State(state): State<AppState>) -> Result<Json<Option<Vec<Vendor>>>, ApiError> {
    match Repository::new(&state.database).select_all().await {
        Ok(vendors) => Ok(Json(Some(vendors))),
        Err(e) if state.api.propagate_errors => Err(e.into()),
        Err(_) => Ok(Json(None)),
    }
}
