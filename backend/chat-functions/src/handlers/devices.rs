/// Device registration handlers
///
/// Clients register their push token on login and on every token refresh;
/// the push operations only ever read these rows.
use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::models::DeviceRegistration;
use crate::state::AppState;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterDevicePayload {
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub device_id: Option<String>,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub platform: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnregisterDevicePayload {
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub device_id: Option<String>,
}

fn required<'a>(value: &'a Option<String>, name: &str) -> Result<&'a str, AppError> {
    match value.as_deref() {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(AppError::InvalidArgument(format!("{} missing", name))),
    }
}

/// Register or refresh a device token.
///
/// POST /v1/devices/register
pub async fn register_device(
    state: web::Data<AppState>,
    req: web::Json<RegisterDevicePayload>,
) -> AppResult<HttpResponse> {
    let registration = DeviceRegistration {
        user_id: required(&req.user_id, "userId")?.to_string(),
        device_id: required(&req.device_id, "deviceId")?.to_string(),
        token: required(&req.token, "token")?.to_string(),
        platform: req.platform.clone().unwrap_or_else(|| "android".to_string()),
    };

    state.store.register_device(&registration).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({ "success": true })))
}

/// Remove a device registration.
///
/// POST /v1/devices/unregister
pub async fn unregister_device(
    state: web::Data<AppState>,
    req: web::Json<UnregisterDevicePayload>,
) -> AppResult<HttpResponse> {
    let user_id = required(&req.user_id, "userId")?;
    let device_id = required(&req.device_id, "deviceId")?;

    state.store.unregister_device(user_id, device_id).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({ "success": true })))
}

/// List a user's registered devices (token values are never echoed).
///
/// GET /v1/devices/{userId}
pub async fn list_devices(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let user_id = path.into_inner();
    let devices = state.store.registered_devices(&user_id).await?;
    Ok(HttpResponse::Ok().json(devices))
}

pub fn register_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/v1/devices/register").route(web::post().to(register_device)));
    cfg.service(web::resource("/v1/devices/unregister").route(web::post().to(unregister_device)));
    cfg.service(web::resource("/v1/devices/{userId}").route(web::get().to(list_devices)));
}
