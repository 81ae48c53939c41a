//! Media-session access tokens
//!
//! Builds the short-lived credential a client presents when joining a named
//! real-time audio/video channel. The token is a compact JWT signed with
//! HMAC-SHA256 under the application certificate, scoped to one channel,
//! one participant uid and one role, and carries an absolute expiry.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD as BASE64_URL, Engine};
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use thiserror::Error;

type HmacSha256 = Hmac<Sha256>;

/// Token build/verify error types
#[derive(Error, Debug)]
pub enum TokenError {
    #[error("invalid signing key: {0}")]
    InvalidKey(String),

    #[error("failed to encode claims: {0}")]
    Encode(String),

    #[error("malformed token")]
    Malformed,

    #[error("signature mismatch")]
    SignatureMismatch,
}

/// Role granted to the joining participant.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RtcRole {
    /// Can publish and subscribe to media streams
    Publisher,
    /// Receive-only participant
    Subscriber,
}

impl RtcRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            RtcRole::Publisher => "publisher",
            RtcRole::Subscriber => "subscriber",
        }
    }
}

/// Claims embedded in a media-session token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RtcClaims {
    /// Issuer (application identifier)
    pub iss: String,
    /// Channel the credential is scoped to
    pub channel: String,
    /// Participant uid; 0 lets the media server assign one
    pub uid: u32,
    /// Granted role
    pub role: RtcRole,
    /// Issued at (unix seconds)
    pub iat: u64,
    /// Expiry (unix seconds)
    pub exp: u64,
}

/// Build a signed channel-access token.
///
/// `issued_at` and `expire_at` are unix timestamps supplied by the caller;
/// the builder itself never reads the clock.
pub fn build_token(
    app_id: &str,
    certificate: &str,
    channel: &str,
    uid: u32,
    role: RtcRole,
    issued_at: u64,
    expire_at: u64,
) -> Result<String, TokenError> {
    let claims = RtcClaims {
        iss: app_id.to_string(),
        channel: channel.to_string(),
        uid,
        role,
        iat: issued_at,
        exp: expire_at,
    };

    let header = serde_json::json!({
        "alg": "HS256",
        "typ": "JWT"
    });

    let header_b64 = BASE64_URL.encode(
        serde_json::to_string(&header).map_err(|e| TokenError::Encode(e.to_string()))?,
    );
    let claims_b64 = BASE64_URL.encode(
        serde_json::to_string(&claims).map_err(|e| TokenError::Encode(e.to_string()))?,
    );

    let message = format!("{}.{}", header_b64, claims_b64);

    let mut mac = HmacSha256::new_from_slice(certificate.as_bytes())
        .map_err(|e| TokenError::InvalidKey(e.to_string()))?;
    mac.update(message.as_bytes());
    let signature_b64 = BASE64_URL.encode(mac.finalize().into_bytes());

    Ok(format!("{}.{}", message, signature_b64))
}

/// Verify a token's signature and decode its claims.
pub fn verify_token(certificate: &str, token: &str) -> Result<RtcClaims, TokenError> {
    let mut parts = token.split('.');
    let (header_b64, claims_b64, signature_b64) =
        match (parts.next(), parts.next(), parts.next(), parts.next()) {
            (Some(h), Some(c), Some(s), None) => (h, c, s),
            _ => return Err(TokenError::Malformed),
        };

    let message = format!("{}.{}", header_b64, claims_b64);
    let mut mac = HmacSha256::new_from_slice(certificate.as_bytes())
        .map_err(|e| TokenError::InvalidKey(e.to_string()))?;
    mac.update(message.as_bytes());

    let signature = BASE64_URL
        .decode(signature_b64)
        .map_err(|_| TokenError::Malformed)?;
    mac.verify_slice(&signature)
        .map_err(|_| TokenError::SignatureMismatch)?;

    let claims_json = BASE64_URL
        .decode(claims_b64)
        .map_err(|_| TokenError::Malformed)?;
    serde_json::from_slice(&claims_json).map_err(|_| TokenError::Malformed)
}

#[cfg(test)]
mod tests {
    use super::*;

    const APP_ID: &str = "app-1234";
    const CERT: &str = "super-secret-certificate";

    #[test]
    fn test_build_and_verify_roundtrip() {
        let token =
            build_token(APP_ID, CERT, "room-42", 7, RtcRole::Publisher, 1_700_000_000, 1_700_003_600)
                .unwrap();

        let claims = verify_token(CERT, &token).unwrap();
        assert_eq!(claims.iss, APP_ID);
        assert_eq!(claims.channel, "room-42");
        assert_eq!(claims.uid, 7);
        assert_eq!(claims.role, RtcRole::Publisher);
        assert_eq!(claims.iat, 1_700_000_000);
        assert_eq!(claims.exp, 1_700_003_600);
    }

    #[test]
    fn test_wrong_certificate_rejected() {
        let token =
            build_token(APP_ID, CERT, "room-42", 7, RtcRole::Publisher, 1_700_000_000, 1_700_003_600)
                .unwrap();

        let err = verify_token("some-other-certificate", &token).unwrap_err();
        assert!(matches!(err, TokenError::SignatureMismatch));
    }

    #[test]
    fn test_tampered_token_rejected() {
        let token =
            build_token(APP_ID, CERT, "room-42", 7, RtcRole::Publisher, 1_700_000_000, 1_700_003_600)
                .unwrap();

        // Flip the claims segment
        let forged = build_token(APP_ID, CERT, "room-43", 7, RtcRole::Publisher, 1_700_000_000, 1_700_003_600)
            .unwrap();
        let mut parts: Vec<&str> = token.split('.').collect();
        let forged_claims: Vec<&str> = forged.split('.').collect();
        parts[1] = forged_claims[1];
        let tampered = parts.join(".");

        assert!(matches!(
            verify_token(CERT, &tampered),
            Err(TokenError::SignatureMismatch)
        ));
    }

    #[test]
    fn test_same_scope_different_time_differs_only_in_timestamps() {
        let t1 =
            build_token(APP_ID, CERT, "room-42", 7, RtcRole::Publisher, 1_700_000_000, 1_700_003_600)
                .unwrap();
        let t2 =
            build_token(APP_ID, CERT, "room-42", 7, RtcRole::Publisher, 1_700_000_100, 1_700_003_700)
                .unwrap();

        assert_ne!(t1, t2);

        let c1 = verify_token(CERT, &t1).unwrap();
        let c2 = verify_token(CERT, &t2).unwrap();
        assert_eq!(c1.channel, c2.channel);
        assert_eq!(c1.uid, c2.uid);
        assert_eq!(c1.role, c2.role);
        assert_ne!(c1.exp, c2.exp);
    }

    #[test]
    fn test_garbage_token_is_malformed() {
        assert!(matches!(
            verify_token(CERT, "not-a-token"),
            Err(TokenError::Malformed)
        ));
        assert!(matches!(
            verify_token(CERT, "a.b.c.d"),
            Err(TokenError::Malformed)
        ));
    }

    #[test]
    fn test_role_as_str() {
        assert_eq!(RtcRole::Publisher.as_str(), "publisher");
        assert_eq!(RtcRole::Subscriber.as_str(), "subscriber");
    }
}
