use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use axum_helpers::ApiResponse;
use strum::{Display, IntoStaticStr};
use thiserror::Error;

/// Machine-readable reason a create/update payload was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum ValidationCode {
    MissingName,
    MissingEmail,
    MissingPassword,
    InvalidEmail,
}

impl ValidationCode {
    pub fn message(self) -> &'static str {
        match self {
            ValidationCode::MissingName => "Name is required",
            ValidationCode::MissingEmail => "Email is required",
            ValidationCode::MissingPassword => "Password is required",
            ValidationCode::InvalidEmail => "Invalid email format",
        }
    }
}

#[derive(Debug, Error)]
pub enum UserError {
    #[error("Validation failed: {0}")]
    Validation(ValidationCode),

    #[error("User with email '{0}' already exists")]
    DuplicateEmail(String),

    #[error("User not found: {0}")]
    NotFound(i64),

    #[error("Invalid user ID: {0}")]
    InvalidId(String),

    #[error("Invalid request data: {0}")]
    MalformedPayload(String),

    #[error("Password hashing error: {0}")]
    PasswordHash(String),
}

pub type UserResult<T> = Result<T, UserError>;

impl UserError {
    /// HTTP status the error maps to.
    pub fn status(&self) -> StatusCode {
        match self {
            UserError::Validation(_) | UserError::InvalidId(_) | UserError::MalformedPayload(_) => {
                StatusCode::BAD_REQUEST
            }
            UserError::DuplicateEmail(_) => StatusCode::CONFLICT,
            UserError::NotFound(_) => StatusCode::NOT_FOUND,
            UserError::PasswordHash(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Stable error code clients can branch on.
    pub fn code(&self) -> &'static str {
        match self {
            UserError::Validation(code) => (*code).into(),
            UserError::DuplicateEmail(_) => "duplicate_email",
            UserError::NotFound(_) => "user_not_found",
            UserError::InvalidId(_) => "invalid_id",
            UserError::MalformedPayload(_) => "invalid_request",
            UserError::PasswordHash(_) => "password_hash_error",
        }
    }

    fn public_message(&self) -> String {
        match self {
            UserError::Validation(code) => code.message().to_string(),
            UserError::DuplicateEmail(_) => "User with this email already exists".to_string(),
            UserError::NotFound(_) => "User not found".to_string(),
            UserError::InvalidId(_) => "Invalid user ID".to_string(),
            UserError::MalformedPayload(details) => format!("Invalid request data: {}", details),
            UserError::PasswordHash(_) => "Failed to process password".to_string(),
        }
    }
}

impl IntoResponse for UserError {
    fn into_response(self) -> Response {
        if let UserError::PasswordHash(msg) = &self {
            tracing::error!("Password hash error: {}", msg);
        }

        let status = self.status();
        let body = ApiResponse::<()>::failure(self.public_message(), self.code());
        (status, Json(body)).into_response()
    }
}
