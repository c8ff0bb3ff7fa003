//! Simulated Provider Events
//!
//! Builders for the envelopes the mock posts to the configured webhook.

use wamock_types::{InboundContact, InboundMessage, InboundStatus, InboundWebhook, Profile};

use crate::mock::DeliveryStatus;
use crate::util;

/// Text body that makes the simulated recipient answer.
pub const REPLY_TRIGGER: &str = "reply";

/// Body of the simulated answer.
pub const REPLY_BODY: &str = "Replying to the message";

/// Status callback type for message statuses.
const STATUS_TYPE_MESSAGE: &str = "message";

/// `{statuses: [...]}` envelope reporting `status` for `message_id`.
pub fn status_update(message_id: &str, recipient_id: &str, status: DeliveryStatus) -> InboundWebhook {
    InboundWebhook {
        statuses: vec![InboundStatus {
            id: message_id.to_string(),
            recipient_id: recipient_id.to_string(),
            status: status.as_str().to_string(),
            timestamp: Some(chrono::Utc::now().timestamp().into()),
            status_type: STATUS_TYPE_MESSAGE.to_string(),
            ..InboundStatus::default()
        }],
        ..InboundWebhook::default()
    }
}

/// Inbound text message from `from`, with its contact profile.
pub fn inbound_reply(from: &str) -> InboundWebhook {
    let mut message = InboundMessage::text(util::message_id(), from, REPLY_BODY);
    message.timestamp = chrono::Utc::now().timestamp().to_string();

    InboundWebhook {
        contacts: vec![InboundContact {
            profile: Some(Profile {
                name: from.to_string(),
            }),
            wa_id: from.to_string(),
        }],
        messages: vec![message],
        ..InboundWebhook::default()
    }
}
