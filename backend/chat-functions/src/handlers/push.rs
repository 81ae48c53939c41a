use std::collections::HashMap;

use actix_web::{web, HttpResponse};

use crate::error::{AppError, AppResult};
use crate::models::{CallPushRequest, ChatPushRequest, NotificationContent, PushResponse};
use crate::state::AppState;

/// Relay a chat notification to every registered device of one user.
///
/// POST /v1/push/chat
pub async fn send_chat_push(
    state: web::Data<AppState>,
    req: web::Json<ChatPushRequest>,
) -> AppResult<HttpResponse> {
    let uid = match req.uid.as_deref() {
        Some(u) if !u.is_empty() => u,
        _ => return Err(AppError::InvalidArgument("uid missing".to_string())),
    };

    let notification = NotificationContent {
        title: req.title.clone().unwrap_or_default(),
        body: req.body.clone().unwrap_or_default(),
    };
    let data = req.payload.clone().unwrap_or_default();

    let outcome = state.delivery.deliver(uid, notification, data).await?;
    Ok(HttpResponse::Ok().json(PushResponse::from(outcome)))
}

/// Relay an incoming-call alert to every registered device of the callee.
///
/// POST /v1/push/call
pub async fn send_call_notification(
    state: web::Data<AppState>,
    req: web::Json<CallPushRequest>,
) -> AppResult<HttpResponse> {
    let target_uid = match req.target_uid.as_deref() {
        Some(u) if !u.is_empty() => u,
        _ => return Err(AppError::InvalidArgument("targetUid missing".to_string())),
    };

    let caller_name = req.caller_name.as_deref().unwrap_or("Someone");
    let call_type = req.call_type.as_deref().unwrap_or("voice");

    let notification = NotificationContent {
        title: format!("{} is calling", caller_name),
        body: if call_type == "video" {
            "Incoming Video Call"
        } else {
            "Incoming Voice Call"
        }
        .to_string(),
    };

    let mut data = HashMap::new();
    data.insert("type".to_string(), "call".to_string());
    data.insert(
        "channelName".to_string(),
        req.channel_name.clone().unwrap_or_default(),
    );
    data.insert("callType".to_string(), call_type.to_string());

    let outcome = state.delivery.deliver(target_uid, notification, data).await?;
    Ok(HttpResponse::Ok().json(PushResponse::from(outcome)))
}

pub fn register_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/v1/push/chat").route(web::post().to(send_chat_push)));
    cfg.service(web::resource("/v1/push/call").route(web::post().to(send_call_notification)));
}
