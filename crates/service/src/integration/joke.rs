use async_trait::async_trait;
use configs::HttpClientConfig;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use super::{build_http_client, decode_json, IntegrationError};

/// A single joke. The Chuck Norris API reports the text under `value`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Joke {
    #[serde(alias = "value")]
    pub text: String,
}

#[async_trait]
pub trait JokeClient: Send + Sync {
    async fn get_joke(&self) -> Result<Joke, IntegrationError>;
}

/// `GET {base_url}/jokes/random`
pub struct HttpJokeClient {
    client: reqwest::Client,
    base_url: String,
}

impl HttpJokeClient {
    pub fn new(cfg: &HttpClientConfig) -> Result<Self, IntegrationError> {
        Ok(Self {
            client: build_http_client(cfg.timeout_secs)?,
            base_url: cfg.base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl JokeClient for HttpJokeClient {
    #[instrument(skip(self), fields(base_url = %self.base_url))]
    async fn get_joke(&self) -> Result<Joke, IntegrationError> {
        let url = format!("{}/jokes/random", self.base_url);
        let resp = self.client.get(&url).send().await?;
        let joke: Joke = decode_json(resp).await?;
        debug!(len = joke.text.len(), "joke fetched");
        Ok(joke)
    }
}
