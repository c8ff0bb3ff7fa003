//! Contact Check Types

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::response::BaseResponse;

/// Whether the caller waits for the contact check to complete.
///
/// Recorded on requests but never enforced as latency by the mock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockingMode {
    Wait,
    NoWait,
}

/// Result of checking a single contact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactStatus {
    /// The input resolves to a registered account.
    Valid,
    /// The check is still running (`no_wait` mode).
    Processing,
    /// The input is not a registered account.
    Invalid,
    /// The check could not be performed.
    Failed,
}

/// POST /v1/contacts request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ContactsRequest {
    pub blocking: BlockingMode,
    /// Phone numbers in any format.
    #[validate(length(min = 1, message = "At least one contact is required"))]
    pub contacts: Vec<String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub force_check: bool,
}

/// One entry of the contact check result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub wa_id: String,
    pub input: String,
    pub status: ContactStatus,
}

/// POST /v1/contacts response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactsResponse {
    #[serde(flatten)]
    pub base: BaseResponse,
    pub contacts: Vec<Contact>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blocking_mode_uses_snake_case() {
        let req: ContactsRequest = serde_json::from_value(serde_json::json!({
            "blocking": "no_wait",
            "contacts": ["+1 555 0100"],
        }))
        .unwrap();
        assert_eq!(req.blocking, BlockingMode::NoWait);
        assert!(!req.force_check);
        assert!(req.validate().is_ok());
    }

    #[test]
    fn rejects_unknown_blocking_mode() {
        let result: Result<ContactsRequest, _> = serde_json::from_value(serde_json::json!({
            "blocking": "sometimes",
            "contacts": ["1"],
        }));
        assert!(result.is_err());
    }

    #[test]
    fn empty_contact_list_fails_validation() {
        let req = ContactsRequest {
            blocking: BlockingMode::Wait,
            contacts: vec![],
            force_check: false,
        };
        assert!(req.validate().is_err());
    }
}
