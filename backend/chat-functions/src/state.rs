use std::sync::Arc;

use crate::config::RtcConfig;
use crate::services::{DeviceTokenStore, PushDelivery};

/// Shared per-process state handed to every handler.
///
/// Constructed once in `main`; handlers only read from it. All request
/// handling stays stateless beyond these injected clients.
#[derive(Clone)]
pub struct AppState {
    pub rtc: RtcConfig,
    pub store: Arc<dyn DeviceTokenStore>,
    pub delivery: Arc<PushDelivery>,
}
