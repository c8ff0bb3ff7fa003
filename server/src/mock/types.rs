//! Mock Control Types
//!
//! Simulation settings, the partial update accepted by `POST /mock`, and the
//! reasons an update can be rejected.

use std::collections::HashMap;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Status reported in simulated delivery callbacks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryStatus {
    #[default]
    Sent,
    Read,
    Failed,
}

impl DeliveryStatus {
    /// Parse from the wire value (e.g., `"read"`).
    pub fn parse_str(s: &str) -> Option<Self> {
        match s {
            "sent" => Some(Self::Sent),
            "read" => Some(Self::Read),
            "failed" => Some(Self::Failed),
            _ => None,
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Sent => "sent",
            Self::Read => "read",
            Self::Failed => "failed",
        }
    }
}

impl std::fmt::Display for DeliveryStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Current simulation settings, as returned by `GET /mock`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MockSettings {
    /// Whether `POST /v1/contacts` succeeds.
    pub contacts_success: bool,
    /// Whether `POST /v1/messages` succeeds.
    pub messages_success: bool,
    /// Status sent in delivery callbacks.
    #[serde(rename = "messages_success_status")]
    pub delivery_status: DeliveryStatus,
    /// Callback URL; empty disables webhooks.
    pub webhook: String,
    /// Extra headers sent with every callback.
    pub webhook_headers: HashMap<String, String>,
}

impl Default for MockSettings {
    fn default() -> Self {
        Self {
            contacts_success: true,
            messages_success: true,
            delivery_status: DeliveryStatus::Sent,
            webhook: String::new(),
            webhook_headers: HashMap::new(),
        }
    }
}

impl MockSettings {
    /// Whether callbacks are enabled.
    pub fn webhook_enabled(&self) -> bool {
        !self.webhook.is_empty()
    }
}

/// Partial update accepted by `POST /mock`.
///
/// Flags are always applied (an absent flag means `false`). The status and
/// webhook URL are applied only when non-empty; headers only when present.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MockUpdate {
    #[serde(default)]
    pub contacts_success: bool,
    #[serde(default)]
    pub messages_success: bool,
    #[serde(default, rename = "messages_success_status")]
    pub delivery_status: Option<String>,
    #[serde(default)]
    pub webhook: Option<String>,
    #[serde(default)]
    pub webhook_headers: Option<HashMap<String, String>>,
}

/// Reasons a settings update is rejected.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MockError {
    #[error("delivery status must be one of sent, read, failed")]
    InvalidDeliveryStatus,
    #[error("webhook must be an absolute http(s) URL")]
    InvalidWebhookUrl,
    #[error("webhook headers must be valid HTTP header names and values")]
    InvalidWebhookHeaders,
    #[error("request body is not a valid settings object")]
    InvalidRequest,
}

impl MockError {
    /// Machine-readable reason returned to the caller.
    pub const fn code(&self) -> &'static str {
        match self {
            Self::InvalidDeliveryStatus => "invalid-delivery-status",
            Self::InvalidWebhookUrl => "invalid-webhook-url",
            Self::InvalidWebhookHeaders => "invalid-webhook-headers",
            Self::InvalidRequest => "invalid-request",
        }
    }
}

impl IntoResponse for MockError {
    fn into_response(self) -> Response {
        (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({ "error": self.code() })),
        )
            .into_response()
    }
}
