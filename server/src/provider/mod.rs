//! Provider API
//!
//! The `/v1` endpoints an application calls when talking to the messaging
//! provider. Outcomes are driven by the current simulation settings.

pub mod contacts;
pub mod error;
pub mod messages;

use axum::{routing::post, Router};

use crate::api::AppState;

pub use error::ApiError;

/// Create the provider router, nested under `/v1`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/contacts", post(contacts::check_contacts))
        .route("/messages", post(messages::send_message))
}
