use thiserror::Error;

use crate::integration::IntegrationError;

/// Errors surfaced by the student service.
///
/// `NotFound` and `BadRequest` are the caller-facing business failures; the
/// remaining variants wrap infrastructure failures and are propagated as-is.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("not found: {0}")]
    NotFound(String),
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("integration error: {0}")]
    Integration(#[from] IntegrationError),
    #[error("database error: {0}")]
    Db(String),
}

impl ServiceError {
    pub fn student_not_found(id: i64) -> Self { Self::NotFound(format!("student {} not found", id)) }

    /// Stable numeric code for external mapping/logging
    pub fn code(&self) -> u16 {
        match self {
            ServiceError::NotFound(_) => 1003,
            ServiceError::BadRequest(_) => 1001,
            ServiceError::Integration(_) => 1300,
            ServiceError::Db(_) => 1200,
        }
    }
}

impl From<models::errors::ModelError> for ServiceError {
    fn from(e: models::errors::ModelError) -> Self {
        match e {
            models::errors::ModelError::Validation(msg) => ServiceError::BadRequest(msg),
            models::errors::ModelError::Db(msg) => ServiceError::Db(msg),
        }
    }
}
