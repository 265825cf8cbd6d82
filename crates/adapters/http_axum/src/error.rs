//! HTTP error translation.
//!
//! Every failure a handler or extractor can produce becomes an [`ApiError`].
//! Handlers only return it; [`render_errors`] is the single place that turns
//! it into the structured JSON body, because only the middleware knows the
//! request path.

use axum::Json;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{OriginalUri, Request};
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use portal_domain::error::PortalError;

pub const USER_NOT_FOUND: &str = "User Not Found";
pub const INVALID_PARAMETER: &str = "Invalid Parameter";
pub const VALIDATION_FAILED: &str = "Validation Failed";
pub const INTERNAL_SERVER_ERROR: &str = "Internal Server Error";

/// JSON error body returned for every handled failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Local time the error was rendered, ISO-8601 without offset.
    pub timestamp: NaiveDateTime,
    pub status: u16,
    /// Error category, e.g. `User Not Found`.
    pub error: String,
    pub message: String,
    pub path: String,
}

/// A failure on its way to becoming an HTTP response.
#[derive(Debug, Clone)]
pub struct ApiError {
    status: StatusCode,
    error: &'static str,
    message: String,
}

impl ApiError {
    fn new(status: StatusCode, error: &'static str, message: impl Into<String>) -> Self {
        Self {
            status,
            error,
            message: message.into(),
        }
    }

    /// A query parameter could not be converted to its target type.
    pub fn invalid_parameter(value: &str, required_type: &str) -> Self {
        Self::new(
            StatusCode::BAD_REQUEST,
            INVALID_PARAMETER,
            format!("Failed to convert '{value}' to required type '{required_type}'"),
        )
    }

    /// A required query parameter was absent.
    pub fn missing_parameter(name: &str, required_type: &str) -> Self {
        Self::new(
            StatusCode::BAD_REQUEST,
            INVALID_PARAMETER,
            format!(
                "Required request parameter '{name}' for method parameter type {required_type} is not present"
            ),
        )
    }

    #[must_use]
    pub fn status(&self) -> StatusCode {
        self.status
    }

    #[must_use]
    pub fn error(&self) -> &'static str {
        self.error
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Build the JSON body for a request to `path`, stamped with the current time.
    #[must_use]
    pub fn to_body(&self, path: &str) -> ErrorBody {
        ErrorBody {
            timestamp: chrono::Local::now().naive_local(),
            status: self.status.as_u16(),
            error: self.error.to_string(),
            message: self.message.clone(),
            path: path.to_string(),
        }
    }

    fn render(&self, path: &str) -> Response {
        (self.status, Json(self.to_body(path))).into_response()
    }
}

impl From<PortalError> for ApiError {
    fn from(err: PortalError) -> Self {
        match err {
            PortalError::Validation(err) => {
                Self::new(StatusCode::BAD_REQUEST, VALIDATION_FAILED, err.to_string())
            }
            PortalError::NotFound(err) => {
                Self::new(StatusCode::NOT_FOUND, USER_NOT_FOUND, err.to_string())
            }
            PortalError::Storage(err) => {
                tracing::error!(error = %err, "storage error");
                Self::new(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    INTERNAL_SERVER_ERROR,
                    err.to_string(),
                )
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        let status = match &rejection {
            JsonRejection::MissingJsonContentType(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            _ => StatusCode::BAD_REQUEST,
        };
        Self::new(
            status,
            status.canonical_reason().unwrap_or("Bad Request"),
            rejection.body_text(),
        )
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::new(
            StatusCode::BAD_REQUEST,
            INVALID_PARAMETER,
            rejection.body_text(),
        )
    }
}

/// Responds with the bare status; the body is attached by [`render_errors`].
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let mut response = self.status.into_response();
        response.extensions_mut().insert(self);
        response
    }
}

/// Middleware rendering any [`ApiError`] left on a response into an [`ErrorBody`].
pub async fn render_errors(request: Request, next: Next) -> Response {
    let path = request
        .extensions()
        .get::<OriginalUri>()
        .map_or_else(|| request.uri().path(), |uri| uri.0.path())
        .to_owned();

    let mut response = next.run(request).await;
    match response.extensions_mut().remove::<ApiError>() {
        Some(err) => err.render(&path),
        None => response,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use portal_domain::error::{FieldError, NotFoundError, ValidationError};
    use portal_domain::id::UserId;

    #[test]
    fn should_map_not_found_to_404() {
        let err = ApiError::from(PortalError::from(NotFoundError {
            id: UserId::new(99999),
        }));
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
        assert_eq!(err.error(), "User Not Found");
        assert_eq!(err.message(), "User not found with id: 99999");
    }

    #[test]
    fn should_map_validation_to_400_with_field_messages() {
        let validation = ValidationError::from_errors(vec![FieldError::InvalidEmail]).unwrap();
        let err = ApiError::from(PortalError::from(validation));
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.error(), "Validation Failed");
        assert_eq!(err.message(), "email: Invalid email format");
    }

    #[test]
    fn should_map_storage_to_500_with_source_message() {
        let io = std::io::Error::other("Unexpected runtime error");
        let err = ApiError::from(PortalError::Storage(Box::new(io)));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.error(), "Internal Server Error");
        assert_eq!(err.message(), "Unexpected runtime error");
    }

    #[test]
    fn should_format_invalid_parameter_message() {
        let err = ApiError::invalid_parameter("abc", "Integer");
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.error(), "Invalid Parameter");
        assert_eq!(
            err.message(),
            "Failed to convert 'abc' to required type 'Integer'"
        );
    }

    #[test]
    fn should_fill_body_with_path_and_recent_timestamp() {
        let before = chrono::Local::now().naive_local();
        let body = ApiError::invalid_parameter("abc", "Integer").to_body("/user/getUserById");
        let after = chrono::Local::now().naive_local();

        assert_eq!(body.status, 400);
        assert_eq!(body.error, "Invalid Parameter");
        assert_eq!(body.path, "/user/getUserById");
        assert!(body.timestamp >= before && body.timestamp <= after);
    }

    #[test]
    fn should_serialize_body_with_iso_timestamp() {
        let body = ApiError::missing_parameter("userId", "Integer").to_body("/user/deleteUser");
        let json = serde_json::to_value(&body).unwrap();

        let timestamp = json["timestamp"].as_str().unwrap();
        assert!(NaiveDateTime::parse_from_str(timestamp, "%Y-%m-%dT%H:%M:%S%.f").is_ok());
        assert_eq!(json["status"], 400);
        assert_eq!(
            json["message"],
            "Required request parameter 'userId' for method parameter type Integer is not present"
        );
    }

    #[test]
    fn should_defer_body_to_middleware() {
        let response = ApiError::invalid_parameter("x", "Integer").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(response.extensions().get::<ApiError>().is_some());
    }
}
