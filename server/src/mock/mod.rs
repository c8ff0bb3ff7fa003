//! Mock Control Surface
//!
//! Operator-facing settings that drive failure injection and webhook
//! callbacks, exposed at `/mock`.

pub mod handlers;
pub mod store;
pub mod types;

use axum::{routing::get, Router};

use crate::api::AppState;

pub use store::MockStore;
pub use types::{DeliveryStatus, MockError, MockSettings, MockUpdate};

/// Create the mock control router.
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/mock",
        get(handlers::get_settings).post(handlers::update_settings),
    )
}
