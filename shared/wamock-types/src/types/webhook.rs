//! Webhook Payload Types
//!
//! Provider-originated callbacks. A single envelope batches contacts, inbound
//! messages, delivery statuses and errors; empty parts are omitted.

use serde::{Deserialize, Serialize};

use super::message::{
    MessageContact, MessageInteractive, MessageLocation, MessageMedia, MessageText, MessageType,
};

/// Webhook envelope posted to the configured callback URL.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InboundWebhook {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub contacts: Vec<InboundContact>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub messages: Vec<InboundMessage>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub statuses: Vec<InboundStatus>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<InboundError>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InboundContact {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<Profile>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub wa_id: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Profile {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
}

/// A message received from a contact.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InboundMessage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<InboundMessageContext>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub from: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identity: Option<InboundMessageIdentity>,
    /// Unix seconds, as a string.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub timestamp: String,
    #[serde(rename = "type")]
    pub message_type: MessageType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<MessageText>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio: Option<MessageMedia>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document: Option<MessageMedia>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<MessageMedia>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sticker: Option<MessageMedia>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video: Option<MessageMedia>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub voice: Option<MessageMedia>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub contacts: Vec<MessageContact>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<MessageLocation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interactive: Option<MessageInteractive>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub button: Option<InboundMessageButton>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system: Option<MessageSystem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub referral: Option<Referral>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<InboundError>,
}

impl InboundMessage {
    /// A text message sent by `from`.
    pub fn text(id: impl Into<String>, from: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            context: None,
            from: from.into(),
            id: id.into(),
            identity: None,
            timestamp: String::new(),
            message_type: MessageType::Text,
            text: Some(MessageText { body: body.into() }),
            audio: None,
            document: None,
            image: None,
            sticker: None,
            video: None,
            voice: None,
            contacts: Vec::new(),
            location: None,
            interactive: None,
            button: None,
            system: None,
            referral: None,
            errors: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InboundMessageButton {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub payload: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub text: String,
}

/// Reference to the message being replied to or forwarded.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InboundMessageContext {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub from: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub group_id: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub mentions: Vec<String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub forwarded: bool,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub frequently_forwarded: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InboundMessageIdentity {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub acknowledged: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub created_timestamp: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub hash: String,
}

/// Delivery status update for a previously sent message.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InboundStatus {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conversation: Option<InboundStatusConversation>,
    /// ID of the message this status refers to.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pricing: Option<InboundStatusPricing>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub recipient_id: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub status: String,
    /// Unix seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<serde_json::Number>,
    #[serde(default, rename = "type", skip_serializing_if = "String::is_empty")]
    pub status_type: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InboundStatusPricing {
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub billable: bool,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub pricing_model: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InboundStatusConversation {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(default)]
    pub origin: ConversationOrigin,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiration_timestamp: Option<serde_json::Number>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConversationOrigin {
    #[serde(default, rename = "type", skip_serializing_if = "String::is_empty")]
    pub origin_type: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InboundError {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<i32>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub details: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub title: String,
}

/// Click-to-chat ad referral attached to the first inbound message.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Referral {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub headline: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub body: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub source_type: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub source_id: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub source_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<MessageMedia>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video: Option<MessageMedia>,
}

/// System notification, e.g. a contact changing their number.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MessageSystem {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub body: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub new_wa_id: String,
    #[serde(default, rename = "type", skip_serializing_if = "String::is_empty")]
    pub system_type: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub identity: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn status_only_envelope_omits_other_parts() {
        let envelope = InboundWebhook {
            statuses: vec![InboundStatus {
                id: "msg-1".to_string(),
                recipient_id: "15550100".to_string(),
                status: "read".to_string(),
                timestamp: Some(serde_json::Number::from(1_700_000_000_i64)),
                status_type: "message".to_string(),
                ..InboundStatus::default()
            }],
            ..InboundWebhook::default()
        };

        assert_eq!(
            serde_json::to_value(&envelope).unwrap(),
            json!({
                "statuses": [{
                    "id": "msg-1",
                    "recipient_id": "15550100",
                    "status": "read",
                    "timestamp": 1_700_000_000,
                    "type": "message"
                }]
            })
        );
    }

    #[test]
    fn inbound_text_message_shape() {
        let mut message = InboundMessage::text("in-1", "15550100", "hi");
        message.timestamp = "1700000000".to_string();

        assert_eq!(
            serde_json::to_value(&message).unwrap(),
            json!({
                "from": "15550100",
                "id": "in-1",
                "timestamp": "1700000000",
                "type": "text",
                "text": { "body": "hi" }
            })
        );
    }

    #[test]
    fn parses_provider_payload() {
        let envelope: InboundWebhook = serde_json::from_value(json!({
            "contacts": [{ "profile": { "name": "Kerry" }, "wa_id": "16315551234" }],
            "messages": [{
                "from": "16315551234",
                "id": "ABGGFlA5FpafAgo6EhgoSA",
                "timestamp": "1518694235",
                "type": "image",
                "image": { "id": "b1c68f38", "mime_type": "image/jpeg", "sha256": "29ed500f" }
            }]
        }))
        .unwrap();

        assert_eq!(envelope.contacts[0].wa_id, "16315551234");
        assert_eq!(envelope.messages[0].message_type, MessageType::Image);
        assert!(envelope.statuses.is_empty());
    }
}
