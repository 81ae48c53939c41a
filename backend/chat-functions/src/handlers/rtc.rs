use actix_web::{web, HttpResponse};
use chrono::Utc;
use tracing::info;

use rtc_token::RtcRole;

use crate::error::{AppError, AppResult};
use crate::models::{TokenRequest, TokenResponse};
use crate::state::AppState;

/// Mint a channel-access token for a joining participant.
///
/// POST /v1/rtc/token
pub async fn issue_token(
    state: web::Data<AppState>,
    req: web::Json<TokenRequest>,
) -> AppResult<HttpResponse> {
    let rtc = &state.rtc;

    if !rtc.is_configured() {
        return Err(AppError::FailedPrecondition(
            "RTC app id / certificate missing".to_string(),
        ));
    }

    let channel = match req.channel_name.as_deref() {
        Some(name) if !name.is_empty() => name,
        _ => return Err(AppError::InvalidArgument("channelName required".to_string())),
    };

    let now = Utc::now().timestamp() as u64;
    let expire_at = now + rtc.token_ttl_secs;

    let token = rtc_token::build_token(
        &rtc.app_id,
        &rtc.app_certificate,
        channel,
        req.uid,
        RtcRole::Publisher,
        now,
        expire_at,
    )
    .map_err(|e| AppError::Internal(e.to_string()))?;

    info!(
        "issued channel token: channel={} uid={} expire_at={}",
        channel, req.uid, expire_at
    );

    Ok(HttpResponse::Ok().json(TokenResponse { token }))
}

pub fn register_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/v1/rtc/token").route(web::post().to(issue_token)));
}
