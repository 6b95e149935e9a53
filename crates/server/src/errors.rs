use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use service::errors::ServiceError;
use thiserror::Error;
use tracing::{error, warn};

/// JSON error body: `{"error": <title>, "detail": <message>}`
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

#[derive(Debug)]
pub struct JsonApiError {
    pub status: StatusCode,
    pub body: ErrorBody,
}

impl JsonApiError {
    pub fn new(status: StatusCode, title: &str, detail: Option<String>) -> Self {
        Self { status, body: ErrorBody { error: title.to_string(), detail } }
    }
}

impl From<ServiceError> for JsonApiError {
    fn from(e: ServiceError) -> Self {
        let detail = Some(e.to_string());
        match e {
            ServiceError::NotFound(_) => JsonApiError::new(StatusCode::NOT_FOUND, "Not Found", detail),
            ServiceError::BadRequest(_) => JsonApiError::new(StatusCode::BAD_REQUEST, "Bad Request", detail),
            ServiceError::Integration(_) => {
                warn!(code = e.code(), err = %e, "integration failed");
                JsonApiError::new(StatusCode::BAD_GATEWAY, "Integration Failed", detail)
            }
            ServiceError::Db(_) => {
                error!(code = e.code(), err = %e, "database failure");
                JsonApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "Database Error", detail)
            }
        }
    }
}

impl IntoResponse for JsonApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("integration setup failed: {0}")]
    Integration(#[from] service::integration::IntegrationError),
    #[error(transparent)]
    Any(#[from] anyhow::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use service::integration::IntegrationError;

    #[test]
    fn service_errors_map_to_statuses() {
        let cases = [
            (ServiceError::NotFound("student 1 not found".into()), StatusCode::NOT_FOUND),
            (ServiceError::BadRequest("email taken".into()), StatusCode::BAD_REQUEST),
            (ServiceError::Integration(IntegrationError::Timeout), StatusCode::BAD_GATEWAY),
            (ServiceError::Db("down".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, status) in cases {
            assert_eq!(JsonApiError::from(err).status, status);
        }
    }

    #[test]
    fn detail_carries_service_message() {
        let e = JsonApiError::from(ServiceError::student_not_found(3));
        assert_eq!(e.body.error, "Not Found");
        assert_eq!(e.body.detail.as_deref(), Some("not found: student 3 not found"));
    }
}
