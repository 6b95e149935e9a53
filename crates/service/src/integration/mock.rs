//! Fixed-response doubles for the integration capabilities.
//! Each double counts its calls so tests can assert on side effects.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use super::{BookingClient, IntegrationError, Joke, JokeClient};

pub struct FixedJokeClient {
    text: Option<String>,
    calls: AtomicUsize,
}

impl FixedJokeClient {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: Some(text.into()), calls: AtomicUsize::new(0) }
    }

    /// A client whose every call fails with a network error.
    pub fn failing() -> Self {
        Self { text: None, calls: AtomicUsize::new(0) }
    }

    pub fn calls(&self) -> usize { self.calls.load(Ordering::SeqCst) }
}

#[async_trait]
impl JokeClient for FixedJokeClient {
    async fn get_joke(&self) -> Result<Joke, IntegrationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.text {
            Some(text) => Ok(Joke { text: text.clone() }),
            None => Err(IntegrationError::Network("joke service unavailable".into())),
        }
    }
}

pub struct FixedBookingClient {
    booking_id: Option<i32>,
    names: Mutex<Vec<String>>,
}

impl FixedBookingClient {
    pub fn new(booking_id: i32) -> Self {
        Self { booking_id: Some(booking_id), names: Mutex::new(Vec::new()) }
    }

    pub fn failing() -> Self {
        Self { booking_id: None, names: Mutex::new(Vec::new()) }
    }

    /// Names passed to `create_booking`, in call order.
    pub fn names(&self) -> Vec<String> {
        self.names.lock().map(|n| n.clone()).unwrap_or_default()
    }

    pub fn calls(&self) -> usize { self.names().len() }
}

#[async_trait]
impl BookingClient for FixedBookingClient {
    async fn create_booking(&self, name: &str) -> Result<i32, IntegrationError> {
        if let Ok(mut names) = self.names.lock() {
            names.push(name.to_string());
        }
        self.booking_id
            .ok_or_else(|| IntegrationError::Status { status: 503, body: "booking service unavailable".into() })
    }
}
