use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

/// Standard error body returned by every failing endpoint.
///
/// - `message`: human-readable error message
/// - `code`: stable machine-readable identifier (e.g., `VALIDATION_ERROR`)
///
/// # JSON Example
///
/// ```json
/// {
///   "message": "Invalid email format.",
///   "code": "VALIDATION_ERROR"
/// }
/// ```
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Human-readable error message
    pub message: String,
    /// Machine-readable error code for programmatic handling
    pub code: String,
}

/// Helper to build an error response with the standard body.
pub fn error_response(status: StatusCode, message: String, code: &str) -> Response {
    let body = Json(ErrorResponse {
        message,
        code: code.to_string(),
    });

    (status, body).into_response()
}

/// Fallback handler for unknown routes.
pub async fn not_found() -> Response {
    error_response(
        StatusCode::NOT_FOUND,
        "The requested resource was not found.".to_string(),
        "NOT_FOUND",
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_response_shape() {
        let body = serde_json::to_value(ErrorResponse {
            message: "Invalid email format.".to_string(),
            code: "VALIDATION_ERROR".to_string(),
        })
        .unwrap();

        assert_eq!(
            body,
            serde_json::json!({
                "message": "Invalid email format.",
                "code": "VALIDATION_ERROR"
            })
        );
    }
}
