//! Webhook Delivery
//!
//! One delivery sequence per accepted message:
//! - wait the configured delay,
//! - post a status callback using the delivery status current at that moment,
//! - post an inbound reply if the message text was the reply trigger.
//!
//! Any HTTP response counts as delivered. A network error ends the sequence;
//! nothing is retried.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use tracing::{debug, info, warn};
use wamock_types::InboundWebhook;

use super::events;
use super::types::{AcceptedMessage, DeliveryError, WebhookTarget};
use crate::mock::MockStore;

/// Post `envelope` to `target` and return the response status code.
pub async fn deliver(
    client: &reqwest::Client,
    target: &WebhookTarget,
    envelope: &InboundWebhook,
) -> Result<u16, DeliveryError> {
    let payload = serde_json::to_vec(envelope)?;

    let mut headers = HeaderMap::with_capacity(target.headers.len() + 1);
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    for (name, value) in &target.headers {
        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|_| DeliveryError::InvalidHeader(name.clone()))?;
        let value =
            HeaderValue::from_str(value).map_err(|_| DeliveryError::InvalidHeader(name.to_string()))?;
        headers.insert(name, value);
    }

    let response = client
        .post(&target.url)
        .headers(headers)
        .body(payload)
        .send()
        .await?;

    Ok(response.status().as_u16())
}

/// A scheduled callback sequence for one message.
pub(crate) struct DeliverySequence {
    pub client: reqwest::Client,
    pub mock: MockStore,
    pub target: WebhookTarget,
    pub message: AcceptedMessage,
    pub delay: Duration,
}

impl DeliverySequence {
    /// Run the sequence to completion.
    pub async fn run(self) {
        tokio::time::sleep(self.delay).await;

        // Read now, not at scheduling time: operators may change it during the delay.
        let status = self.mock.snapshot().await.delivery_status;
        let envelope = events::status_update(&self.message.id, &self.message.to, status);

        match deliver(&self.client, &self.target, &envelope).await {
            Ok(code) => {
                info!(
                    message_id = %self.message.id,
                    url = %self.target.url,
                    status = %status,
                    code,
                    "Status webhook delivered"
                );
            }
            Err(e) => {
                warn!(
                    message_id = %self.message.id,
                    url = %self.target.url,
                    error = %e,
                    "Status webhook failed, abandoning sequence"
                );
                return;
            }
        }

        if !self.message.wants_reply() {
            debug!(message_id = %self.message.id, "Webhook sequence complete");
            return;
        }

        let envelope = events::inbound_reply(&self.message.to);
        match deliver(&self.client, &self.target, &envelope).await {
            Ok(code) => {
                info!(
                    message_id = %self.message.id,
                    url = %self.target.url,
                    code,
                    "Reply webhook delivered"
                );
            }
            Err(e) => {
                warn!(
                    message_id = %self.message.id,
                    url = %self.target.url,
                    error = %e,
                    "Reply webhook failed"
                );
            }
        }
    }
}
