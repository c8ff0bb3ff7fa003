//! Webhook Dispatch
//!
//! Non-blocking entry point that turns an accepted message into a detached
//! delivery sequence.

use std::time::Duration;

use tokio_util::task::TaskTracker;
use tracing::{debug, error};

use super::delivery::DeliverySequence;
use super::types::{AcceptedMessage, DeliveryError, WebhookTarget};
use crate::config::Config;
use crate::mock::MockStore;

/// Spawns and tracks webhook delivery sequences.
#[derive(Clone)]
pub struct WebhookDispatcher {
    client: reqwest::Client,
    mock: MockStore,
    delay: Duration,
    tracker: TaskTracker,
}

impl WebhookDispatcher {
    /// Create a dispatcher reading settings from `mock`.
    pub fn new(mock: MockStore, config: &Config) -> Result<Self, DeliveryError> {
        let client = reqwest::Client::builder()
            .timeout(config.webhook_timeout)
            .user_agent(concat!("wamock/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            mock,
            delay: config.webhook_delay,
            tracker: TaskTracker::new(),
        })
    }

    /// Schedule the callbacks for `message`.
    ///
    /// The webhook target is captured here; returns `false` when webhooks are
    /// disabled and nothing was scheduled. Never waits for delivery.
    pub async fn schedule(&self, message: AcceptedMessage) -> bool {
        let settings = self.mock.snapshot().await;
        if !settings.webhook_enabled() {
            debug!(message_id = %message.id, "Webhook disabled, no callbacks scheduled");
            return false;
        }

        let message_id = message.id.clone();
        let sequence = DeliverySequence {
            client: self.client.clone(),
            mock: self.mock.clone(),
            target: WebhookTarget {
                url: settings.webhook,
                headers: settings.webhook_headers,
            },
            message,
            delay: self.delay,
        };

        debug!(message_id = %message_id, url = %sequence.target.url, "Webhook sequence scheduled");

        // Panics inside a sequence are logged instead of propagating.
        self.tracker.spawn(async move {
            let handle = tokio::spawn(sequence.run());
            if let Err(e) = handle.await {
                error!(message_id = %message_id, "Webhook sequence panicked: {}", e);
            }
        });

        true
    }

    /// Number of sequences still running.
    pub fn in_flight(&self) -> usize {
        self.tracker.len()
    }

    /// Wait up to `timeout` for running sequences; returns whether all finished.
    ///
    /// Sequences scheduled after this call are still run but not waited for.
    pub async fn drain(&self, timeout: Duration) -> bool {
        self.tracker.close();
        tokio::time::timeout(timeout, self.tracker.wait())
            .await
            .is_ok()
    }
}
