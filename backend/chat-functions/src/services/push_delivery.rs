//! Shared device fan-out
//!
//! Both push operations resolve the target user's devices, drop rows
//! without a usable token and submit a single multicast to the transport.
//! The transport is never invoked with an empty recipient list; "nothing
//! to deliver" is reported as a soft outcome instead.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use fcm_multicast::{FcmClient, FcmNotification, MessagePriority};

use crate::error::{AppError, AppResult};
use crate::models::{DeliveryOutcome, NotificationContent, OutboundPush, PushPriority};
use crate::services::device_lookup::{usable_tokens, DeviceTokenStore};

#[async_trait]
pub trait PushTransport: Send + Sync {
    /// Submit one multicast to the push service.
    async fn send_multicast(&self, push: OutboundPush) -> AppResult<()>;
}

/// Production transport backed by Firebase Cloud Messaging.
pub struct FcmTransport {
    client: FcmClient,
}

impl FcmTransport {
    pub fn new(client: FcmClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl PushTransport for FcmTransport {
    async fn send_multicast(&self, push: OutboundPush) -> AppResult<()> {
        let notification = FcmNotification {
            title: push.notification.title,
            body: push.notification.body,
        };
        let priority = match push.priority {
            PushPriority::Normal => MessagePriority::Normal,
            PushPriority::High => MessagePriority::High,
        };

        let receipt = self
            .client
            .send_multicast(&push.tokens, &notification, &push.data, priority)
            .await
            .map_err(|e| AppError::Transport(e.to_string()))?;

        info!(
            "push submitted: {} delivered, {} failed",
            receipt.success_count, receipt.failure_count
        );
        Ok(())
    }
}

/// One fan-out routine shared by every push operation.
pub struct PushDelivery {
    store: Arc<dyn DeviceTokenStore>,
    transport: Arc<dyn PushTransport>,
}

impl PushDelivery {
    pub fn new(store: Arc<dyn DeviceTokenStore>, transport: Arc<dyn PushTransport>) -> Self {
        Self { store, transport }
    }

    /// Deliver one notification to every registered device of `user_id`.
    pub async fn deliver(
        &self,
        user_id: &str,
        notification: NotificationContent,
        data: HashMap<String, String>,
    ) -> AppResult<DeliveryOutcome> {
        let devices = self.store.devices_for_user(user_id).await?;
        if devices.is_empty() {
            info!("no registered devices for user {}", user_id);
            return Ok(DeliveryOutcome::NoDevices);
        }

        let tokens = usable_tokens(&devices);
        if tokens.is_empty() {
            info!("devices for user {} carry no usable tokens", user_id);
            return Ok(DeliveryOutcome::NoTokens);
        }

        let sent = tokens.len();
        self.transport
            .send_multicast(OutboundPush {
                tokens,
                notification,
                data,
                priority: PushPriority::High,
            })
            .await?;

        info!("notification fanned out to {} device(s) for user {}", sent, user_id);
        Ok(DeliveryOutcome::Sent { sent })
    }
}
