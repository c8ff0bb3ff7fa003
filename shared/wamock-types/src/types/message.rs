//! Outbound Message Types
//!
//! The "send message" body. Content is carried in one optional field per
//! variant, selected by the `type` discriminator; [`Message::content`] turns
//! that wire convention into a tagged [`MessageContent`] and rejects bodies
//! where the discriminator and the populated fields disagree.

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// Message kind discriminator.
///
/// Shared by outbound messages and inbound webhook messages. `voice` and
/// `button` only occur inbound; see [`MessageType::is_sendable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageType {
    Audio,
    #[serde(alias = "contact")]
    Contacts,
    Document,
    Image,
    Location,
    Sticker,
    Template,
    Text,
    /// Inbound only: a recorded voice note.
    Voice,
    Video,
    Interactive,
    /// Inbound only: a quick-reply button press.
    Button,
}

impl MessageType {
    /// Whether a message of this kind can be sent.
    pub const fn is_sendable(self) -> bool {
        !matches!(self, Self::Voice | Self::Button)
    }
}

/// Only individual recipients are supported by the API.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecipientType {
    #[default]
    Individual,
}

/// POST /v1/messages request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_content"))]
pub struct Message {
    pub recipient_type: RecipientType,
    #[validate(length(min = 1, message = "Recipient is required"))]
    pub to: String,
    #[serde(rename = "type")]
    pub message_type: MessageType,
    #[serde(default, alias = "preview", skip_serializing_if = "std::ops::Not::not")]
    pub preview_url: bool,
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
    pub contacts: Option<Vec<MessageContact>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<MessageLocation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<MessageTemplate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interactive: Option<MessageInteractive>,
}

/// Borrowed view of the single populated content variant of a [`Message`].
#[derive(Debug, Clone, Copy)]
pub enum MessageContent<'a> {
    Text(&'a MessageText),
    Audio(&'a MessageMedia),
    Document(&'a MessageMedia),
    Image(&'a MessageMedia),
    Sticker(&'a MessageMedia),
    Video(&'a MessageMedia),
    Contacts(&'a [MessageContact]),
    Location(&'a MessageLocation),
    Template(&'a MessageTemplate),
    Interactive(&'a MessageInteractive),
}

impl MessageContent<'_> {
    /// Discriminator value this variant is sent under.
    pub const fn message_type(&self) -> MessageType {
        match self {
            Self::Text(_) => MessageType::Text,
            Self::Audio(_) => MessageType::Audio,
            Self::Document(_) => MessageType::Document,
            Self::Image(_) => MessageType::Image,
            Self::Sticker(_) => MessageType::Sticker,
            Self::Video(_) => MessageType::Video,
            Self::Contacts(_) => MessageType::Contacts,
            Self::Location(_) => MessageType::Location,
            Self::Template(_) => MessageType::Template,
            Self::Interactive(_) => MessageType::Interactive,
        }
    }
}

impl Message {
    /// A plain text message to `to`.
    pub fn text(to: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            recipient_type: RecipientType::Individual,
            to: to.into(),
            message_type: MessageType::Text,
            preview_url: false,
            text: Some(MessageText { body: body.into() }),
            audio: None,
            document: None,
            image: None,
            sticker: None,
            video: None,
            contacts: None,
            location: None,
            template: None,
            interactive: None,
        }
    }

    /// Every content field that carries a value.
    fn populated(&self) -> impl Iterator<Item = MessageContent<'_>> {
        [
            self.text.as_ref().map(MessageContent::Text),
            self.audio.as_ref().map(MessageContent::Audio),
            self.document.as_ref().map(MessageContent::Document),
            self.image.as_ref().map(MessageContent::Image),
            self.sticker.as_ref().map(MessageContent::Sticker),
            self.video.as_ref().map(MessageContent::Video),
            self.contacts
                .as_deref()
                .filter(|c| !c.is_empty())
                .map(MessageContent::Contacts),
            self.location.as_ref().map(MessageContent::Location),
            self.template.as_ref().map(MessageContent::Template),
            self.interactive.as_ref().map(MessageContent::Interactive),
        ]
        .into_iter()
        .flatten()
    }

    /// The content variant, if exactly one is populated and it matches `type`.
    pub fn content(&self) -> Option<MessageContent<'_>> {
        let mut populated = self.populated();
        let content = populated.next()?;
        if populated.next().is_some() || content.message_type() != self.message_type {
            return None;
        }
        Some(content)
    }

    /// Text body, when this is a text message.
    pub fn text_body(&self) -> Option<&str> {
        match self.content()? {
            MessageContent::Text(text) => Some(text.body.as_str()),
            _ => None,
        }
    }
}

fn validate_content(message: &Message) -> Result<(), ValidationError> {
    if !message.message_type.is_sendable() {
        let mut err = ValidationError::new("inbound_only_type");
        err.message = Some("This message type is only received, never sent".into());
        return Err(err);
    }
    if message.content().is_none() {
        let mut err = ValidationError::new("content_mismatch");
        err.message = Some("Exactly one content field matching `type` is required".into());
        return Err(err);
    }
    Ok(())
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageText {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub body: String,
}

/// Media attachment, by uploaded `id` or public `link`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MessageMedia {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub link: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub caption: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub filename: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<MediaProvider>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub mime_type: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub sha256: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MediaProvider {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(default, rename = "type", skip_serializing_if = "String::is_empty")]
    pub provider_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<MediaProviderConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MediaProviderConfig {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub bearer: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub basic: Option<MediaProviderBasicAuth>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MediaProviderBasicAuth {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub username: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub password: String,
}

// ============================================================================
// Contact cards
// ============================================================================

/// `HOME`/`WORK` style label used by contact card entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ContactLabel {
    Home,
    Work,
    Cell,
    Main,
    Iphone,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MessageContact {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub addresses: Vec<ContactAddress>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub birthday: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub emails: Vec<ContactEmail>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<ContactName>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub org: Option<ContactOrg>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub phones: Vec<ContactPhone>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub urls: Vec<ContactUrl>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContactAddress {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub street: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub city: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub state: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub zip: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub country: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub country_code: String,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub label: Option<ContactLabel>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContactEmail {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub email: String,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub label: Option<ContactLabel>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContactName {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub formatted_name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub first_name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub last_name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub middle_name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub suffix: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub prefix: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContactOrg {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub company: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub department: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub title: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContactPhone {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub phone: String,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub label: Option<ContactLabel>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub wa_id: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContactUrl {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub url: String,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub label: Option<ContactLabel>,
}

/// Shared location pin. Coordinates keep their original numeric text.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MessageLocation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<serde_json::Number>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<serde_json::Number>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub address: String,
}

// ============================================================================
// Templates
// ============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MessageTemplate {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub namespace: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(default)]
    pub language: TemplateLanguage,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub components: Vec<TemplateComponent>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TemplateLanguage {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub policy: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub code: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TemplateComponent {
    #[serde(default, rename = "type", skip_serializing_if = "String::is_empty")]
    pub component_type: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub sub_type: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<TemplateParameter>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub text: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TemplateParameter {
    #[serde(default, rename = "type", skip_serializing_if = "String::is_empty")]
    pub parameter_type: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub sub_type: String,
    /// Button position, for button parameters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<u32>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub caption: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub link: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub text: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub payload: String,
}

// ============================================================================
// Interactive messages
// ============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MessageInteractive {
    #[serde(default, rename = "type", skip_serializing_if = "String::is_empty")]
    pub interactive_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub header: Option<InteractiveHeader>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<InteractiveText>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub footer: Option<InteractiveText>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<InteractiveAction>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub list_reply: Option<InteractiveSectionRow>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub button_reply: Option<InteractiveButtonReply>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InteractiveText {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub text: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InteractiveHeader {
    #[serde(default, rename = "type", skip_serializing_if = "String::is_empty")]
    pub header_type: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video: Option<MessageMedia>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<MessageMedia>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document: Option<MessageMedia>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InteractiveAction {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub button: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub buttons: Vec<InteractiveButton>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub catalog_id: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sections: Vec<InteractiveSection>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub product_retailer_id: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InteractiveButton {
    #[serde(default, rename = "type", skip_serializing_if = "String::is_empty")]
    pub button_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reply: Option<InteractiveButtonReply>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InteractiveButtonReply {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub title: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InteractiveSection {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub title: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub rows: Vec<InteractiveSectionRow>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub product_items: Vec<InteractiveSectionProduct>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InteractiveSectionRow {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub title: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InteractiveSectionProduct {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub product_retailer_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(value: serde_json::Value) -> Message {
        serde_json::from_value(value).expect("valid message JSON")
    }

    #[test]
    fn text_message_validates() {
        let msg = parse(json!({
            "recipient_type": "individual",
            "to": "15550100",
            "type": "text",
            "text": { "body": "hello" }
        }));
        assert!(msg.validate().is_ok());
        assert_eq!(msg.text_body(), Some("hello"));
    }

    #[test]
    fn type_must_match_populated_variant() {
        let msg = parse(json!({
            "recipient_type": "individual",
            "to": "15550100",
            "type": "image",
            "text": { "body": "hello" }
        }));
        assert!(msg.validate().is_err());
        assert!(msg.content().is_none());
    }

    #[test]
    fn two_populated_variants_are_rejected() {
        let msg = parse(json!({
            "recipient_type": "individual",
            "to": "15550100",
            "type": "text",
            "text": { "body": "hello" },
            "image": { "link": "https://example.com/a.png" }
        }));
        assert!(msg.validate().is_err());
    }

    #[test]
    fn missing_content_is_rejected() {
        let msg = parse(json!({
            "recipient_type": "individual",
            "to": "15550100",
            "type": "location"
        }));
        assert!(msg.validate().is_err());
    }

    #[test]
    fn empty_contacts_list_counts_as_unpopulated() {
        let msg = parse(json!({
            "recipient_type": "individual",
            "to": "15550100",
            "type": "contacts",
            "contacts": []
        }));
        assert!(msg.validate().is_err());
    }

    #[test]
    fn legacy_contact_type_is_accepted() {
        let msg = parse(json!({
            "recipient_type": "individual",
            "to": "15550100",
            "type": "contact",
            "contacts": [{ "name": { "formatted_name": "Ada" } }]
        }));
        assert!(msg.validate().is_ok());
        assert!(matches!(msg.content(), Some(MessageContent::Contacts(c)) if c.len() == 1));
    }

    #[test]
    fn inbound_only_types_are_rejected() {
        for kind in ["voice", "button"] {
            let msg = parse(json!({
                "recipient_type": "individual",
                "to": "15550100",
                "type": kind,
                "audio": { "id": "media-1" }
            }));
            let errors = msg.validate().unwrap_err();
            let rejected_as_inbound = errors
                .field_errors()
                .values()
                .flat_map(|errs| errs.iter())
                .any(|e| e.code == "inbound_only_type");
            assert!(rejected_as_inbound, "type: {kind}");
        }
        assert!(MessageType::Audio.is_sendable());
        assert!(!MessageType::Voice.is_sendable());
        assert!(!MessageType::Button.is_sendable());
    }

    #[test]
    fn empty_recipient_fails_validation() {
        let msg = Message::text("", "hello");
        assert!(msg.validate().is_err());
    }

    #[test]
    fn non_individual_recipient_type_does_not_parse() {
        let result: Result<Message, _> = serde_json::from_value(json!({
            "recipient_type": "group",
            "to": "15550100",
            "type": "text",
            "text": { "body": "hello" }
        }));
        assert!(result.is_err());
    }

    #[test]
    fn location_keeps_coordinate_text() {
        let msg = parse(json!({
            "recipient_type": "individual",
            "to": "15550100",
            "type": "location",
            "location": { "longitude": -122.425_332, "latitude": 37.758_056, "name": "Office" }
        }));
        assert!(msg.validate().is_ok());
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["location"]["name"], "Office");
        assert!(json.get("text").is_none());
    }
}
