//! FCM multicast push client
//!
//! Firebase Cloud Messaging (HTTP v1) client used to fan one notification
//! out to a list of device registration tokens. Handles:
//! - OAuth2 access-token generation from a Google service account
//! - Access-token caching with automatic refresh
//! - Per-token best-effort delivery with an aggregate receipt

pub mod client;
pub mod errors;
pub mod models;

pub use client::FcmClient;
pub use errors::FcmError;
pub use models::{
    FcmNotification, MessagePriority, MulticastReceipt, SendOutcome, ServiceAccountKey,
};
