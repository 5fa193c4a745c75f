use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_helpers::error_response;
use thiserror::Error;

/// Result type for user operations
pub type UserResult<T> = Result<T, UserError>;

/// User domain errors.
///
/// `Validation` and `Duplicate` are the two expected kinds; they reach the
/// caller with their own wire codes. Everything else is reported generically
/// and logged in full.
#[derive(Debug, Error)]
pub enum UserError {
    #[error("{0}")]
    Validation(String),

    #[error("{field} \"{value}\" already exists.")]
    Duplicate { field: &'static str, value: String },

    #[error("Database error: {message}")]
    Database {
        message: String,
        #[source]
        source: Option<mongodb::error::Error>,
    },

    #[error("Password hashing error: {0}")]
    PasswordHash(String),
}

impl UserError {
    /// Stable machine-readable code surfaced on the wire.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Duplicate { .. } => "DUPLICATE_ERROR",
            Self::Database { .. } | Self::PasswordHash(_) => "INTERNAL_SERVER_ERROR",
        }
    }
}

impl From<mongodb::error::Error> for UserError {
    fn from(err: mongodb::error::Error) -> Self {
        Self::Database {
            message: err.to_string(),
            source: Some(err),
        }
    }
}

impl From<mongodb::bson::ser::Error> for UserError {
    fn from(err: mongodb::bson::ser::Error) -> Self {
        Self::Database {
            message: format!("BSON serialization error: {}", err),
            source: None,
        }
    }
}

impl From<mongodb::bson::de::Error> for UserError {
    fn from(err: mongodb::bson::de::Error) -> Self {
        Self::Database {
            message: format!("BSON deserialization error: {}", err),
            source: None,
        }
    }
}

impl IntoResponse for UserError {
    fn into_response(self) -> Response {
        match &self {
            UserError::Validation(message) => {
                error_response(StatusCode::BAD_REQUEST, message.clone(), self.code())
            }
            UserError::Duplicate { .. } => {
                error_response(StatusCode::CONFLICT, self.to_string(), self.code())
            }
            UserError::Database { message, source } => {
                tracing::error!(error = %message, source = ?source, "User store failure");
                error_response(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An unexpected error occurred.".to_string(),
                    self.code(),
                )
            }
            UserError::PasswordHash(message) => {
                tracing::error!("Password hashing error: {}", message);
                error_response(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An unexpected error occurred.".to_string(),
                    self.code(),
                )
            }
        }
    }
}
