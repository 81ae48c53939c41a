use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde::Serialize;
use thiserror::Error;

pub type AppResult<T> = Result<T, AppError>;

/// Service error taxonomy.
///
/// Required-field and misconfiguration failures are the only errors this
/// layer raises itself. Store and transport failures pass through carrying
/// the underlying message. "No devices" / "no tokens" are not errors; they
/// are soft results on the push responses.
#[derive(Debug, Error, Clone)]
pub enum AppError {
    #[error("{0}")]
    InvalidArgument(String),

    #[error("{0}")]
    FailedPrecondition(String),

    #[error("database error: {0}")]
    Database(String),

    #[error("push transport error: {0}")]
    Transport(String),

    #[error("internal error: {0}")]
    Internal(String),
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
    code: &'static str,
}

impl AppError {
    /// Machine-readable error kind carried on the wire.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::InvalidArgument(_) => "invalid-argument",
            AppError::FailedPrecondition(_) => "failed-precondition",
            AppError::Database(_) | AppError::Transport(_) | AppError::Internal(_) => "internal",
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidArgument(_) => StatusCode::BAD_REQUEST,
            AppError::FailedPrecondition(_)
            | AppError::Database(_)
            | AppError::Transport(_)
            | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorBody {
            error: self.to_string(),
            code: self.code(),
        })
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        AppError::Database(e.to_string())
    }
}

impl From<fcm_multicast::FcmError> for AppError {
    fn from(e: fcm_multicast::FcmError) -> Self {
        AppError::Transport(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            AppError::InvalidArgument("uid missing".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::FailedPrecondition("signing identity missing".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            AppError::Database("down".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_wire_codes() {
        assert_eq!(AppError::InvalidArgument("x".into()).code(), "invalid-argument");
        assert_eq!(
            AppError::FailedPrecondition("x".into()).code(),
            "failed-precondition"
        );
        assert_eq!(AppError::Transport("x".into()).code(), "internal");
    }
}
