use thiserror::Error;

/// FCM client error types
#[derive(Error, Debug)]
pub enum FcmError {
    #[error("invalid service account credentials: {0}")]
    Credentials(String),

    #[error("failed to parse private key: {0}")]
    KeyParse(String),

    #[error("failed to encode OAuth2 assertion: {0}")]
    JwtEncode(String),

    #[error("access token request failed: {0}")]
    TokenRequest(String),

    #[error("access token request rejected with status {0}")]
    TokenRejected(String),

    #[error("failed to parse token response: {0}")]
    TokenParse(String),

    #[error("send request failed: {0}")]
    SendRequest(String),

    #[error("failed to parse send response: {0}")]
    ResponseParse(String),
}
