//! Contact Check Handler

use std::sync::LazyLock;

use axum::{extract::State, Json};
use regex::Regex;
use tracing::{debug, instrument};
use wamock_types::{BaseResponse, Contact, ContactStatus, ContactsRequest, ContactsResponse};

use super::ApiError;
use crate::api::{extract::ValidatedJson, AppState};

static NON_DIGITS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^0-9]+").expect("valid regex"));

/// Strip everything but ASCII digits from a phone number.
pub fn normalize_wa_id(input: &str) -> String {
    NON_DIGITS.replace_all(input, "").into_owned()
}

/// Check contacts.
///
/// POST /v1/contacts
///
/// Every input is reported as `valid`, in request order.
#[instrument(skip_all)]
pub async fn check_contacts(
    State(state): State<AppState>,
    ValidatedJson(body): ValidatedJson<ContactsRequest>,
) -> Result<Json<ContactsResponse>, ApiError> {
    if !state.mock.snapshot().await.contacts_success {
        return Err(ApiError::Injected);
    }

    debug!(
        blocking = ?body.blocking,
        force_check = body.force_check,
        count = body.contacts.len(),
        "Checking contacts"
    );

    let contacts = body
        .contacts
        .into_iter()
        .map(|input| Contact {
            wa_id: normalize_wa_id(&input),
            input,
            status: ContactStatus::Valid,
        })
        .collect();

    Ok(Json(ContactsResponse {
        base: BaseResponse::ok(),
        contacts,
    }))
}
