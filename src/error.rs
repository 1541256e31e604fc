/*
 * Responsibility
 * - Application-wide AppError
 * - IntoResponse (HTTP status / JSON error body)
 * - 401 (who you are is unknown) and 403 (what you may do is insufficient) stay distinct
 */
use axum::{
    Json,
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::domain::course::PayloadError;
use crate::services::dispatcher::{AccessDenied, CreateCourseError};

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: &'static str,
    pub message: String,
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{code}: {message}")]
    BadRequest { code: &'static str, message: String },
    #[error("unauthorized")]
    Unauthorized,
    #[error("forbidden")]
    Forbidden,
    #[error("payload too large")]
    PayloadTooLarge,
    #[error("request timed out")]
    RequestTimeout,
    #[error("internal server error")]
    Internal,
}

impl AppError {
    pub fn bad_request(code: &'static str, message: impl Into<String>) -> Self {
        Self::BadRequest {
            code,
            message: message.into(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            AppError::BadRequest { code, message } => (StatusCode::BAD_REQUEST, code, message),
            AppError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "UNAUTHORIZED",
                "authentication required".into(),
            ),
            AppError::Forbidden => (
                StatusCode::FORBIDDEN,
                "FORBIDDEN",
                "insufficient authority".into(),
            ),
            AppError::PayloadTooLarge => (
                StatusCode::PAYLOAD_TOO_LARGE,
                "PAYLOAD_TOO_LARGE",
                "request body exceeds the size limit".into(),
            ),
            AppError::RequestTimeout => (
                StatusCode::REQUEST_TIMEOUT,
                "REQUEST_TIMEOUT",
                "request timed out".into(),
            ),
            AppError::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_SERVER_ERROR",
                "internal server error".into(),
            ),
        };

        let body = ErrorResponse {
            error: ErrorBody { code, message },
        };

        let mut response = (status, Json(body)).into_response();
        if status == StatusCode::UNAUTHORIZED {
            response.headers_mut().insert(
                header::WWW_AUTHENTICATE,
                HeaderValue::from_static("Bearer"),
            );
        }
        response
    }
}

impl From<AccessDenied> for AppError {
    fn from(_: AccessDenied) -> Self {
        AppError::Forbidden
    }
}

impl From<PayloadError> for AppError {
    fn from(e: PayloadError) -> Self {
        match e {
            PayloadError::InvalidJson(_) => {
                AppError::bad_request("INVALID_JSON", "request body must be JSON")
            }
            PayloadError::TooLarge => AppError::PayloadTooLarge,
            PayloadError::Unreadable(reason) => AppError::bad_request("UNREADABLE_BODY", reason),
        }
    }
}

impl From<CreateCourseError> for AppError {
    fn from(e: CreateCourseError) -> Self {
        match e {
            CreateCourseError::Denied(denied) => denied.into(),
            CreateCourseError::Payload(payload) => payload.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::route_guard::Operation;

    async fn body_of(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    async fn error_code(response: Response) -> serde_json::Value {
        let mut body = body_of(response).await;
        body["error"]["code"].take()
    }

    #[tokio::test]
    async fn unauthorized_and_forbidden_are_distinguishable() {
        let unauthorized = AppError::Unauthorized.into_response();
        let forbidden = AppError::from(AccessDenied {
            operation: Operation::CreateCourse,
            subject: "s".to_string(),
        })
        .into_response();

        let challenge = unauthorized.headers().get(header::WWW_AUTHENTICATE);
        assert_eq!(unauthorized.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(challenge.unwrap(), "Bearer");
        assert_eq!(forbidden.status(), StatusCode::FORBIDDEN);
        assert!(forbidden.headers().get(header::WWW_AUTHENTICATE).is_none());
    }

    #[tokio::test]
    async fn error_body_shape() {
        let error = AppError::bad_request("INVALID_JSON", "request body must be JSON");

        let body = body_of(error.into_response()).await;

        assert_eq!(
            body,
            serde_json::json!({
                "error": { "code": "INVALID_JSON", "message": "request body must be JSON" }
            })
        );
    }

    #[tokio::test]
    async fn payload_errors_map_to_client_errors() {
        let too_large = AppError::from(PayloadError::TooLarge).into_response();
        let unreadable = PayloadError::Unreadable("connection reset".to_string());
        let unreadable = AppError::from(unreadable).into_response();

        assert_eq!(too_large.status(), StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(error_code(too_large).await, "PAYLOAD_TOO_LARGE");
        assert_eq!(unreadable.status(), StatusCode::BAD_REQUEST);
        assert_eq!(error_code(unreadable).await, "UNREADABLE_BODY");
    }

    #[tokio::test]
    async fn timeouts_and_internal_errors_keep_the_json_shape() {
        let timeout = AppError::RequestTimeout.into_response();
        let internal = AppError::Internal.into_response();

        assert_eq!(timeout.status(), StatusCode::REQUEST_TIMEOUT);
        assert_eq!(internal.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(error_code(internal).await, "INTERNAL_SERVER_ERROR");
    }
}
