/**
 * Error Conversion
 *
 * Converts `ApiError` values into HTTP responses so handlers can return
 * them directly with `?`.
 *
 * # Response Format
 *
 * Every error response is a JSON body of the form:
 *
 * ```json
 * {"error": "Task not found"}
 * ```
 *
 * with the status code taken from `ApiError::status_code()`.
 */

use axum::{
    response::{IntoResponse, Json, Response},
    http::StatusCode,
};

use crate::error::types::ApiError;

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(serde_json::json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_error_response_shape() {
        let response = ApiError::MissingCredential.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body, serde_json::json!({ "error": "No token provided" }));
    }
}
