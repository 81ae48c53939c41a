use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Channel-join request for a media-session token.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenRequest {
    #[serde(default)]
    pub channel_name: Option<String>,
    /// Participant uid; tolerant of numbers, numeric strings and absence.
    #[serde(default, deserialize_with = "uid_lenient")]
    pub uid: u32,
}

/// Issued media-session credential.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub token: String,
}

fn uid_lenient<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(coerce_uid(&value))
}

/// Lenient uid coercion: numbers and numeric strings pass through, anything
/// else becomes 0 (the media server then assigns a uid on join).
pub fn coerce_uid(value: &serde_json::Value) -> u32 {
    match value {
        serde_json::Value::Number(n) => n
            .as_u64()
            .and_then(|v| u32::try_from(v).ok())
            .unwrap_or(0),
        serde_json::Value::String(s) => s.trim().parse().unwrap_or(0),
        _ => 0,
    }
}

/// Chat push relay request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatPushRequest {
    #[serde(default)]
    pub uid: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub payload: Option<HashMap<String, String>>,
}

/// Incoming-call notification request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallPushRequest {
    #[serde(default)]
    pub target_uid: Option<String>,
    #[serde(default)]
    pub caller_name: Option<String>,
    #[serde(default)]
    pub channel_name: Option<String>,
    #[serde(default)]
    pub call_type: Option<String>,
}

/// Visible notification content handed to the transport.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationContent {
    pub title: String,
    pub body: String,
}

/// Delivery priority hint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PushPriority {
    Normal,
    High,
}

/// One multicast submission to the push transport.
#[derive(Debug, Clone)]
pub struct OutboundPush {
    pub tokens: Vec<String>,
    pub notification: NotificationContent,
    pub data: HashMap<String, String>,
    pub priority: PushPriority,
}

/// Outcome of one fan-out attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryOutcome {
    /// Submitted to the transport for `sent` devices
    Sent { sent: usize },
    /// The user has no registered devices at all
    NoDevices,
    /// Devices exist but none carries a usable token
    NoTokens,
}

/// Wire shape of a push operation result.
///
/// "Nothing to deliver" is a successful response with `success:false` and a
/// `reason`, never an error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PushResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sent: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl From<DeliveryOutcome> for PushResponse {
    fn from(outcome: DeliveryOutcome) -> Self {
        match outcome {
            DeliveryOutcome::Sent { sent } => PushResponse {
                success: true,
                sent: Some(sent),
                reason: None,
            },
            DeliveryOutcome::NoDevices => PushResponse {
                success: false,
                sent: None,
                reason: Some("no devices".to_string()),
            },
            DeliveryOutcome::NoTokens => PushResponse {
                success: false,
                sent: None,
                reason: Some("no tokens".to_string()),
            },
        }
    }
}

/// Device row as read for push fan-out.
#[derive(Debug, Clone)]
pub struct DeviceRecord {
    pub device_id: String,
    pub token: Option<String>,
}

/// Device registration written on client login / token refresh.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceRegistration {
    pub user_id: String,
    pub device_id: String,
    pub token: String,
    pub platform: String,
}

/// Registered device as listed back to callers; the token value itself is
/// never echoed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisteredDevice {
    pub device_id: String,
    pub platform: String,
    pub registered_at: DateTime<Utc>,
}
