//! Outbound integrations consulted while enrolling a student.
//!
//! Each collaborator is a narrow capability trait with a reqwest-backed
//! implementation and fixed-response doubles in [`mock`].

use std::time::Duration;

use reqwest::Response;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::error;

pub mod booking;
pub mod joke;
pub mod mock;

pub use booking::{BookingClient, HttpBookingClient};
pub use joke::{HttpJokeClient, Joke, JokeClient};

#[derive(Debug, Error)]
pub enum IntegrationError {
    #[error("network error: {0}")]
    Network(String),
    #[error("request timed out")]
    Timeout,
    #[error("upstream returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("parse error: {0}")]
    Parse(String),
}

impl From<reqwest::Error> for IntegrationError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            IntegrationError::Timeout
        } else {
            IntegrationError::Network(e.to_string())
        }
    }
}

pub(crate) fn build_http_client(timeout_secs: u64) -> Result<reqwest::Client, IntegrationError> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .build()
        .map_err(|e| IntegrationError::Network(e.to_string()))
}

/// Decode a JSON body, turning non-2xx responses into `IntegrationError::Status`.
pub(crate) async fn decode_json<T: DeserializeOwned>(resp: Response) -> Result<T, IntegrationError> {
    let status = resp.status();
    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        error!(status = status.as_u16(), %body, "integration request failed");
        return Err(IntegrationError::Status { status: status.as_u16(), body });
    }
    resp.json::<T>()
        .await
        .map_err(|e| IntegrationError::Parse(e.to_string()))
}
