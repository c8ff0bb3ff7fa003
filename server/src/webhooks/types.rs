//! Webhook Types
//!
//! Data structures shared by the dispatcher and the delivery sequence.

use std::collections::HashMap;

use thiserror::Error;
use wamock_types::Message;

use super::events::REPLY_TRIGGER;

/// Callback destination, captured when a sequence is scheduled.
///
/// Later settings updates never change the target of a scheduled sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebhookTarget {
    pub url: String,
    pub headers: HashMap<String, String>,
}

/// The parts of an accepted outbound message the callbacks refer to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcceptedMessage {
    /// Generated message ID returned to the caller.
    pub id: String,
    /// Recipient; statuses are reported for it and replies come from it.
    pub to: String,
    /// Text body, for text messages.
    pub text: Option<String>,
}

impl AcceptedMessage {
    pub fn new(id: String, message: &Message) -> Self {
        Self {
            id,
            to: message.to.clone(),
            text: message.text_body().map(str::to_string),
        }
    }

    /// Whether the simulated recipient answers this message.
    pub fn wants_reply(&self) -> bool {
        self.text.as_deref() == Some(REPLY_TRIGGER)
    }
}

/// Webhook delivery errors.
#[derive(Error, Debug)]
pub enum DeliveryError {
    #[error("Failed to serialize webhook payload: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("Invalid webhook header: {0}")]
    InvalidHeader(String),
    #[error("Webhook request failed: {0}")]
    Request(#[from] reqwest::Error),
}
