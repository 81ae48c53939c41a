use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone)]
pub struct Config {
    pub app: AppConfig,
    pub database: DatabaseConfig,
    pub rtc: RtcConfig,
    pub fcm: FcmConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub env: String,
    pub port: u16,
    /// Deployment region label, surfaced in startup logs
    pub region: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

/// Media-session signing identity.
///
/// The certificate is a secret supplied through the environment at startup.
/// An empty app id or certificate leaves token issuance unconfigured; the
/// token endpoint reports that per call instead of failing the whole
/// process at boot.
#[derive(Clone)]
pub struct RtcConfig {
    pub app_id: String,
    pub app_certificate: String,
    pub token_ttl_secs: u64,
}

impl fmt::Debug for RtcConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RtcConfig")
            .field("app_id", &self.app_id)
            .field("app_certificate", &"[REDACTED]")
            .field("token_ttl_secs", &self.token_ttl_secs)
            .finish()
    }
}

impl RtcConfig {
    pub fn is_configured(&self) -> bool {
        !self.app_id.is_empty() && !self.app_certificate.is_empty()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FcmConfig {
    /// Path to the service-account credentials JSON file
    pub credentials_path: String,
}

impl Config {
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        Ok(Config {
            app: AppConfig {
                env: std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
                port: std::env::var("APP_PORT")
                    .unwrap_or_else(|_| "8000".to_string())
                    .parse()?,
                region: std::env::var("APP_REGION").unwrap_or_else(|_| "asia-south1".to_string()),
            },
            database: DatabaseConfig {
                url: std::env::var("DATABASE_URL")?,
                max_connections: std::env::var("DATABASE_MAX_CONNECTIONS")
                    .unwrap_or_else(|_| "10".to_string())
                    .parse()?,
            },
            rtc: RtcConfig {
                app_id: std::env::var("RTC_APP_ID").unwrap_or_default(),
                app_certificate: std::env::var("RTC_APP_CERT").unwrap_or_default(),
                token_ttl_secs: std::env::var("RTC_TOKEN_TTL_SECS")
                    .unwrap_or_else(|_| "3600".to_string())
                    .parse()?,
            },
            fcm: FcmConfig {
                credentials_path: std::env::var("FCM_CREDENTIALS_PATH")
                    .or_else(|_| std::env::var("GOOGLE_APPLICATION_CREDENTIALS"))
                    .unwrap_or_default(),
            },
        })
    }
}
