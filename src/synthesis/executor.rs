//! Request executor
//!
//! Turns one work item and one server address into exactly one [`Outcome`].
//! Every failure mode, from a missing speaker line to a refused connection,
//! comes back as a failed outcome rather than an error.

use async_trait::async_trait;
use reqwest::{
    header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE},
    Client, StatusCode,
};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use crate::config::SynthesisConfig;
use crate::error::Result;
use crate::models::{Address, Outcome, WorkItem};
use crate::storage::AudioSink;
use crate::utils::error::SynthesisError;

use super::playback::{NoPlayback, Playback};
use super::request::{SynthesisParams, SynthesisRequest, CONTENT_TYPE_MSGPACK};

/// Performs one synthesis attempt
#[async_trait]
pub trait Executor: Send + Sync {
    /// Run `item` on `server`. Never fails; failures are encoded in the outcome.
    async fn execute(&self, item: &WorkItem, server: &Address) -> Outcome;
}

/// HTTP executor speaking the synthesis wire protocol
pub struct SynthesisClient {
    /// HTTP client with the configured timeout
    client: Client,

    /// Endpoint path appended to every server address
    endpoint_path: String,

    /// Bearer token
    api_key: String,

    /// Decoding parameters shared by every request
    params: SynthesisParams,

    /// Where successful audio goes
    sink: AudioSink,

    /// Run after every successful write
    playback: Arc<dyn Playback>,
}

impl SynthesisClient {
    /// Create a client with playback disabled
    ///
    /// # Errors
    ///
    /// Returns `Error::Synthesis` if the HTTP client cannot be created
    pub fn new(config: &SynthesisConfig, sink: AudioSink) -> Result<Self> {
        Self::with_timeout(config, sink, config.request_timeout())
    }

    /// Create a client with an explicit request timeout
    ///
    /// # Errors
    ///
    /// Returns `Error::Synthesis` if the HTTP client cannot be created
    pub fn with_timeout(config: &SynthesisConfig, sink: AudioSink, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(SynthesisError::Transport)?;

        Ok(Self {
            client,
            endpoint_path: config.endpoint_path.clone(),
            api_key: config.api_key.clone(),
            params: SynthesisParams::from(config),
            sink,
            playback: Arc::new(NoPlayback),
        })
    }

    /// Replace the playback hook
    pub fn with_playback(mut self, playback: Arc<dyn Playback>) -> Self {
        self.playback = playback;
        self
    }

    /// Synthesize `item` on `server` and write the audio
    ///
    /// # Errors
    ///
    /// - `NoUsableText` before any network traffic if the item has no text
    /// - `HttpStatus` for any status other than 200
    /// - `Transport` for connection, timeout and body read failures
    /// - `Write` if the audio cannot be saved
    pub async fn synthesize(
        &self,
        item: &WorkItem,
        server: &Address,
    ) -> std::result::Result<PathBuf, SynthesisError> {
        if !item.has_text() {
            return Err(SynthesisError::NoUsableText);
        }

        let body = SynthesisRequest::new(item.text(), &self.params).encode()?;
        let url = server.url(&self.endpoint_path);

        let response = self
            .client
            .post(&url)
            .headers(self.build_headers())
            .body(body)
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(SynthesisError::HttpStatus(status.as_u16()));
        }

        let audio = response.bytes().await?;
        let path = self.sink.write(item.id(), &audio).await?;
        Ok(path)
    }

    /// Build authorization and content-type headers
    fn build_headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();

        headers.insert(CONTENT_TYPE, HeaderValue::from_static(CONTENT_TYPE_MSGPACK));

        match HeaderValue::from_str(&format!("Bearer {}", self.api_key)) {
            Ok(mut value) => {
                value.set_sensitive(true);
                headers.insert(AUTHORIZATION, value);
            }
            Err(_) => tracing::warn!("API key contains invalid header characters, omitting"),
        }

        headers
    }
}

#[async_trait]
impl Executor for SynthesisClient {
    async fn execute(&self, item: &WorkItem, server: &Address) -> Outcome {
        match self.synthesize(item, server).await {
            Ok(path) => {
                if let Err(e) = self.playback.play(&path).await {
                    tracing::warn!(id = item.id(), path = %path.display(), error = %e, "Playback failed");
                }
                Outcome::success(item, server, path.display().to_string())
            }
            Err(e) => {
                tracing::debug!(
                    id = item.id(),
                    server = %server,
                    recoverable = e.is_recoverable(),
                    error = %e,
                    "Synthesis attempt failed"
                );
                Outcome::failure(item, server, e.detail())
            }
        }
    }
}
