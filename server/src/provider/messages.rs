//! Send Message Handler

use axum::{extract::State, Json};
use tracing::{info, instrument};
use wamock_types::{BaseResponse, IdModel, Message, MessagesResponse};

use super::ApiError;
use crate::{
    api::{extract::ValidatedJson, AppState},
    util,
    webhooks::AcceptedMessage,
};

/// Send a message.
///
/// POST /v1/messages
///
/// Responds as soon as the message is accepted; webhook callbacks run in the
/// background.
#[instrument(skip_all)]
pub async fn send_message(
    State(state): State<AppState>,
    ValidatedJson(message): ValidatedJson<Message>,
) -> Result<Json<MessagesResponse>, ApiError> {
    if !state.mock.snapshot().await.messages_success {
        return Err(ApiError::Injected);
    }

    let id = util::message_id();
    let scheduled = state
        .webhooks
        .schedule(AcceptedMessage::new(id.clone(), &message))
        .await;

    info!(
        message_id = %id,
        to = %message.to,
        message_type = ?message.message_type,
        webhook = scheduled,
        "Message accepted"
    );

    Ok(Json(MessagesResponse {
        base: BaseResponse::ok(),
        messages: vec![IdModel { id }],
    }))
}
