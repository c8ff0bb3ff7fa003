//! Response Envelope Types

use serde::{Deserialize, Serialize};

/// API version reported in response metadata.
pub const API_VERSION: &str = "v2.31.5";

/// Fields shared by every API response.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BaseResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<Metadata>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<ErrorDetail>,
}

impl BaseResponse {
    /// Metadata block of a successful call.
    pub fn ok() -> Self {
        Self {
            meta: Some(Metadata {
                success: true,
                api_status: "stable".to_string(),
                version: API_VERSION.to_string(),
                http_code: None,
                developer_message: None,
            }),
            errors: Vec::new(),
        }
    }
}

/// Response metadata.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Metadata {
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub success: bool,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub api_status: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub http_code: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub developer_message: Option<String>,
}

/// Error entry of a failed call.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ErrorDetail {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<i32>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub details: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub href: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub title: String,
}

/// A bare `{ "id": ... }` object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdModel {
    pub id: String,
}

/// POST /v1/messages response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessagesResponse {
    #[serde(flatten)]
    pub base: BaseResponse,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub messages: Vec<IdModel>,
}
