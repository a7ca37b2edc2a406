use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use sqlx::Error as SqlxError;
use thiserror::Error as ThisError;
use tracing::{error, warn};

pub const MISSING_FIELDS_BODY: &str = "Missing fields";
pub const CAPTCHA_FAILED_BODY: &str = "Captcha failed";
pub const LOGIN_REJECTED_BODY: &str = "NOPE";

#[derive(Debug, ThisError)]
pub enum RelayError {
    #[error("sender or content missing from submission")]
    MissingFields,

    #[error("captcha verification did not pass")]
    CaptchaFailed,

    #[error("admin password did not match")]
    LoginRejected,

    #[error("Database error: {0}")]
    DatabaseError(#[from] SqlxError),

    #[error("HTTP request error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Upstream error with status: {0}")]
    UpstreamStatus(StatusCode),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Password hash error: {0}")]
    PasswordHash(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Blocking task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

impl From<argon2::password_hash::Error> for RelayError {
    fn from(e: argon2::password_hash::Error) -> Self {
        RelayError::PasswordHash(e.to_string())
    }
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            RelayError::MissingFields => (StatusCode::BAD_REQUEST, MISSING_FIELDS_BODY),
            RelayError::CaptchaFailed => (StatusCode::FORBIDDEN, CAPTCHA_FAILED_BODY),
            RelayError::LoginRejected => (StatusCode::FORBIDDEN, LOGIN_REJECTED_BODY),
            RelayError::Reqwest(_) | RelayError::UpstreamStatus(_) | RelayError::Json(_) => {
                warn!(error = %self, "captcha verification service unavailable");
                (StatusCode::BAD_GATEWAY, "Bad Gateway")
            }
            RelayError::DatabaseError(_)
            | RelayError::PasswordHash(_)
            | RelayError::Config(_)
            | RelayError::Join(_) => {
                error!(error = %self, "request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
            }
        };
        (status, body).into_response()
    }
}
