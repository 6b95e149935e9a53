use async_trait::async_trait;
use configs::HttpClientConfig;
use serde::Serialize;
use tracing::{debug, instrument};

use super::{build_http_client, decode_json, IntegrationError};

#[async_trait]
pub trait BookingClient: Send + Sync {
    /// Create a booking for `name` and return its identifier.
    async fn create_booking(&self, name: &str) -> Result<i32, IntegrationError>;
}

#[derive(Serialize)]
struct BookingRequest<'a> {
    name: &'a str,
}

/// `POST {base_url}/bookings` with `{"name": ...}`; the response body is the
/// booking id as a bare JSON integer.
pub struct HttpBookingClient {
    client: reqwest::Client,
    base_url: String,
}

impl HttpBookingClient {
    pub fn new(cfg: &HttpClientConfig) -> Result<Self, IntegrationError> {
        Ok(Self {
            client: build_http_client(cfg.timeout_secs)?,
            base_url: cfg.base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl BookingClient for HttpBookingClient {
    #[instrument(skip(self), fields(base_url = %self.base_url))]
    async fn create_booking(&self, name: &str) -> Result<i32, IntegrationError> {
        let url = format!("{}/bookings", self.base_url);
        let resp = self
            .client
            .post(&url)
            .json(&BookingRequest { name })
            .send()
            .await?;
        let id: i32 = decode_json(resp).await?;
        debug!(booking_id = id, "booking created");
        Ok(id)
    }
}
