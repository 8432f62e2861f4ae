use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use tracing::error;

/// Domain error taxonomy for the API.
///
/// Every variant maps to a stable machine-readable `error` code and an HTTP
/// status. `Internal` is the catch-all for unexpected store/crypto failures:
/// it is logged with full context here and surfaced to the client as a
/// generic `SERVER_ERROR` with no internal detail.
#[derive(Debug)]
pub enum AppError {
    /// Request body could not be parsed into the expected shape.
    BadRequest(String),
    /// Body parsed but failed a validation rule.
    Validation(String),
    UserExists,
    /// Deliberately identical for "no such user" and "wrong password".
    InvalidCredentials,
    AccountLocked {
        remaining_minutes: i64,
    },
    TwoFactorEmailFailed,
    UserNotFound,
    NoPendingCode,
    CodeExpired,
    InvalidCode,
    PostNotFound,
    TokenExpired,
    TokenInvalid,
    TokenVerification,
    Unauthorized(String),
    Forbidden(String),
    Internal(anyhow::Error),
}

impl AppError {
    pub fn internal<E>(err: E) -> Self
    where
        E: Into<anyhow::Error>,
    {
        Self::Internal(err.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::UserExists => StatusCode::BAD_REQUEST,
            Self::InvalidCredentials => StatusCode::UNAUTHORIZED,
            Self::AccountLocked { .. } => StatusCode::LOCKED,
            Self::TwoFactorEmailFailed => StatusCode::INTERNAL_SERVER_ERROR,
            Self::UserNotFound | Self::PostNotFound => StatusCode::NOT_FOUND,
            Self::NoPendingCode | Self::CodeExpired | Self::InvalidCode => StatusCode::BAD_REQUEST,
            Self::TokenExpired
            | Self::TokenInvalid
            | Self::TokenVerification
            | Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::BadRequest(_) => "BAD_REQUEST",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::UserExists => "USER_EXISTS",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::AccountLocked { .. } => "ACCOUNT_LOCKED",
            Self::TwoFactorEmailFailed => "TWO_FACTOR_EMAIL_FAILED",
            Self::UserNotFound => "USER_NOT_FOUND",
            Self::NoPendingCode => "NO_PENDING_CODE",
            Self::CodeExpired => "CODE_EXPIRED",
            Self::InvalidCode => "INVALID_2FA_CODE",
            Self::PostNotFound => "POST_NOT_FOUND",
            Self::TokenExpired => "TOKEN_EXPIRED",
            Self::TokenInvalid => "TOKEN_INVALID",
            Self::TokenVerification => "TOKEN_VERIFICATION_ERROR",
            Self::Unauthorized(_) => "UNAUTHORIZED",
            Self::Forbidden(_) => "FORBIDDEN",
            Self::Internal(_) => "SERVER_ERROR",
        }
    }

    fn message(&self) -> String {
        match self {
            Self::BadRequest(msg) | Self::Validation(msg) => msg.clone(),
            Self::UserExists => "An account with this email already exists".to_string(),
            Self::InvalidCredentials => "Invalid credentials".to_string(),
            Self::AccountLocked { remaining_minutes } => format!(
                "Account temporarily locked. Try again in {} minutes.",
                remaining_minutes
            ),
            Self::TwoFactorEmailFailed => "Failed to send the verification code".to_string(),
            Self::UserNotFound => "User not found".to_string(),
            Self::NoPendingCode => "No pending verification code".to_string(),
            Self::CodeExpired => "The verification code has expired".to_string(),
            Self::InvalidCode => "The verification code is invalid".to_string(),
            Self::PostNotFound => "Post not found or unavailable".to_string(),
            Self::TokenExpired => "Token expired".to_string(),
            Self::TokenInvalid => "Invalid token".to_string(),
            Self::TokenVerification => "Failed to verify token".to_string(),
            Self::Unauthorized(msg) | Self::Forbidden(msg) => msg.clone(),
            Self::Internal(_) => "Internal server error".to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if let Self::Internal(err) = &self {
            error!(error = ?err, "Unexpected internal error");
        }

        let mut body = json!({
            "success": false,
            "message": self.message(),
            "error": self.code(),
        });

        if let Self::AccountLocked { remaining_minutes } = &self {
            body["data"] = json!({ "remainingMinutes": remaining_minutes });
        }

        (self.status(), Json(body)).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        Self::Internal(err.into())
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err)
    }
}
