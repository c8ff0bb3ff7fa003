//! Simulated Webhook Delivery
//!
//! After a message is accepted, provider callbacks (delivery status and an
//! optional inbound reply) are posted to the configured webhook from detached
//! background tasks.

pub mod delivery;
pub mod dispatch;
pub mod events;
pub mod types;

pub use dispatch::WebhookDispatcher;
pub use types::{AcceptedMessage, DeliveryError, WebhookTarget};
