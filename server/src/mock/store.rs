//! Mock Control Store
//!
//! Holds the live [`MockSettings`]. Readers get an owned snapshot; writers
//! merge a [`MockUpdate`] into a candidate, validate it in full and swap it in
//! under the write guard, so no reader ever sees a half-applied update.

use std::sync::Arc;

use reqwest::header::{HeaderName, HeaderValue};
use tokio::sync::RwLock;

use super::types::{DeliveryStatus, MockError, MockSettings, MockUpdate};

/// Shared handle to the simulation settings.
#[derive(Debug, Clone, Default)]
pub struct MockStore {
    inner: Arc<RwLock<MockSettings>>,
}

impl MockStore {
    /// Create a store holding `settings`.
    #[must_use]
    pub fn new(settings: MockSettings) -> Self {
        Self {
            inner: Arc::new(RwLock::new(settings)),
        }
    }

    /// Copy of the current settings.
    pub async fn snapshot(&self) -> MockSettings {
        self.inner.read().await.clone()
    }

    /// Apply a partial update and return the resulting settings.
    ///
    /// On error the stored settings are left untouched.
    pub async fn update(&self, update: MockUpdate) -> Result<MockSettings, MockError> {
        let mut current = self.inner.write().await;
        let candidate = merge(&current, update)?;
        validate(&candidate)?;
        *current = candidate.clone();
        Ok(candidate)
    }
}

/// Build the candidate settings for `update` on top of `current`.
fn merge(current: &MockSettings, update: MockUpdate) -> Result<MockSettings, MockError> {
    let mut candidate = current.clone();
    candidate.contacts_success = update.contacts_success;
    candidate.messages_success = update.messages_success;

    if let Some(status) = update.delivery_status.filter(|s| !s.is_empty()) {
        candidate.delivery_status =
            DeliveryStatus::parse_str(&status).ok_or(MockError::InvalidDeliveryStatus)?;
    }

    if let Some(webhook) = update.webhook.filter(|w| !w.is_empty()) {
        candidate.webhook = webhook;
    }

    if let Some(headers) = update.webhook_headers {
        candidate.webhook_headers = headers;
    }

    Ok(candidate)
}

/// Check every invariant of a candidate before it is committed.
fn validate(settings: &MockSettings) -> Result<(), MockError> {
    validate_webhook_url(&settings.webhook)?;

    for (name, value) in &settings.webhook_headers {
        if HeaderName::from_bytes(name.as_bytes()).is_err() || HeaderValue::from_str(value).is_err()
        {
            return Err(MockError::InvalidWebhookHeaders);
        }
    }

    Ok(())
}

/// An empty URL disables callbacks; anything else must be absolute http(s) with a host.
fn validate_webhook_url(url: &str) -> Result<(), MockError> {
    if url.is_empty() {
        return Ok(());
    }

    let parsed = reqwest::Url::parse(url).map_err(|_| MockError::InvalidWebhookUrl)?;
    if !matches!(parsed.scheme(), "http" | "https") || parsed.host_str().is_none() {
        return Err(MockError::InvalidWebhookUrl);
    }

    Ok(())
}
