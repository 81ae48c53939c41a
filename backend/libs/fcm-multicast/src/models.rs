use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Google service account key, loaded from the JSON credentials file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceAccountKey {
    pub project_id: String,
    pub private_key_id: String,
    pub private_key: String,
    pub client_email: String,
    pub client_id: String,
    pub auth_uri: String,
    pub token_uri: String,
}

impl ServiceAccountKey {
    /// Load and parse a service account key from a JSON file on disk.
    pub fn from_file(path: &str) -> Result<Self, crate::FcmError> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| crate::FcmError::Credentials(format!("{}: {}", path, e)))?;
        serde_json::from_str(&raw).map_err(|e| crate::FcmError::Credentials(e.to_string()))
    }
}

/// Delivery priority hint passed through to the platform transport.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum MessagePriority {
    Normal,
    High,
}

impl MessagePriority {
    pub fn as_str(&self) -> &'static str {
        match self {
            MessagePriority::Normal => "normal",
            MessagePriority::High => "high",
        }
    }
}

/// Visible notification content.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FcmNotification {
    pub title: String,
    pub body: String,
}

/// Delivery outcome for a single device token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendOutcome {
    pub token: String,
    pub message_id: String,
    pub success: bool,
    pub error: Option<String>,
}

/// Aggregate receipt for one multicast submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MulticastReceipt {
    pub success_count: usize,
    pub failure_count: usize,
    pub outcomes: Vec<SendOutcome>,
}

/// OAuth2 access token cache entry
#[derive(Debug, Clone)]
pub(crate) struct TokenCache {
    pub access_token: String,
    pub expires_at: i64,
}

/// JWT claims for the Google OAuth2 assertion
#[derive(Debug, Serialize)]
pub(crate) struct OauthClaims {
    pub iss: String,
    pub sub: String,
    pub scope: String,
    pub aud: String,
    pub exp: i64,
    pub iat: i64,
}

/// Google OAuth2 token endpoint response
#[derive(Debug, Deserialize)]
pub(crate) struct GoogleTokenResponse {
    pub access_token: String,
    pub expires_in: i64,
}

/// FCM v1 send request envelope
#[derive(Debug, Serialize)]
pub(crate) struct FcmMessage {
    pub message: FcmMessageContent,
}

/// FCM v1 message content
#[derive(Debug, Serialize)]
pub(crate) struct FcmMessageContent {
    pub token: String,
    pub notification: FcmNotification,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<HashMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub android: Option<AndroidConfig>,
}

/// Android-specific delivery options
#[derive(Debug, Serialize)]
pub(crate) struct AndroidConfig {
    pub priority: String,
}

/// FCM v1 send response
#[derive(Debug, Deserialize)]
pub(crate) struct FcmApiResponse {
    pub name: Option<String>,
}
