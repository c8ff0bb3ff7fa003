//! Mock Control Handlers

use axum::extract::State;
use axum::Json;
use tracing::{debug, info, instrument, warn};

use super::types::{MockError, MockSettings, MockUpdate};
use crate::api::extract::{InvalidBody, JsonBody};
use crate::api::AppState;

/// GET /mock
#[instrument(skip_all)]
pub async fn get_settings(State(state): State<AppState>) -> Json<MockSettings> {
    Json(state.mock.snapshot().await)
}

/// POST /mock
///
/// Applies a partial update. Rejected updates leave the settings unchanged
/// and return the reason code.
#[instrument(skip_all)]
pub async fn update_settings(
    State(state): State<AppState>,
    body: Result<JsonBody<MockUpdate>, InvalidBody>,
) -> Result<Json<MockSettings>, MockError> {
    let JsonBody(update) = body.map_err(|e| {
        debug!(error = %e, "Unparseable mock settings update");
        MockError::InvalidRequest
    })?;

    let settings = state.mock.update(update).await.map_err(|e| {
        warn!(reason = e.code(), "Rejected mock settings update");
        e
    })?;

    info!(
        contacts_success = settings.contacts_success,
        messages_success = settings.messages_success,
        delivery_status = %settings.delivery_status,
        webhook = %settings.webhook,
        webhook_headers = settings.webhook_headers.len(),
        "Mock settings updated"
    );

    Ok(Json(settings))
}
