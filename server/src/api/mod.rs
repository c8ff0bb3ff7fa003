//! API Router and Application State
//!
//! Central routing configuration and shared state.

pub mod extract;

use axum::{routing::get, Json, Router};
use serde::Serialize;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{
    config::Config,
    mock::{self, MockStore},
    provider,
    webhooks::{DeliveryError, WebhookDispatcher},
};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Simulation settings
    pub mock: MockStore,
    /// Webhook callback scheduler
    pub webhooks: WebhookDispatcher,
}

impl AppState {
    /// Create new application state.
    #[must_use]
    pub const fn new(mock: MockStore, webhooks: WebhookDispatcher) -> Self {
        Self { mock, webhooks }
    }

    /// Create state with default simulation settings.
    pub fn from_config(config: &Config) -> Result<Self, DeliveryError> {
        let mock = MockStore::default();
        let webhooks = WebhookDispatcher::new(mock.clone(), config)?;
        Ok(Self::new(mock, webhooks))
    }
}

/// Create the main application router.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Health check
        .route("/health", get(health_check))
        // Operator control surface
        .merge(mock::router())
        // Provider API
        .nest("/v1", provider::router())
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        // State
        .with_state(state)
}

/// Health check response.
#[derive(Serialize)]
struct HealthResponse {
    /// Service status
    status: &'static str,
}

/// Health check endpoint.
async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}
