//! Torrentio addon client
//!
//! Fetches debrid-resolved stream sources from the Torrentio Stremio addon.
//! The debrid key is embedded in the path so Torrentio returns playable
//! Real-Debrid URLs instead of magnet info hashes.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

use super::StreamCatalog;
use crate::models::{ContentId, MediaType, StreamCandidate};

/// Torrentio error types
#[derive(Error, Debug)]
pub enum TorrentioError {
    #[error("Torrentio returned HTTP {0}")]
    HttpStatus(u16),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    #[error("No debrid API key configured")]
    MissingCredential,
}

/// Torrentio API response
#[derive(Debug, Deserialize)]
struct TorrentioResponse {
    #[serde(default)]
    streams: Vec<TorrentioStream>,
}

/// Individual stream from Torrentio; every field may be absent
#[derive(Debug, Deserialize)]
struct TorrentioStream {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    url: Option<String>,
    #[serde(rename = "behaviorHints", default)]
    behavior_hints: Option<Value>,
}

impl TorrentioStream {
    /// Convert to a candidate; entries without a playable URL are dropped
    fn into_candidate(self) -> Option<StreamCandidate> {
        let url = self.url.filter(|u| !u.trim().is_empty())?;
        Some(StreamCandidate {
            name: self.name.unwrap_or_default(),
            title: self.title.unwrap_or_default(),
            url,
            behavior_hints: self.behavior_hints.unwrap_or(Value::Null),
        })
    }
}

/// Torrentio addon client
pub struct TorrentioClient {
    base_url: String,
    debrid_key: String,
    client: reqwest::Client,
}

impl TorrentioClient {
    /// Create a new Torrentio client for the given debrid key
    pub fn new(debrid_key: impl Into<String>, timeout: Duration) -> Self {
        Self::with_base_url(debrid_key, "https://torrentio.strem.fun", timeout)
    }

    /// Create a client with a custom base URL (for testing)
    pub fn with_base_url(
        debrid_key: impl Into<String>,
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            debrid_key: debrid_key.into(),
            client: reqwest::Client::builder()
                .timeout(timeout)
                .build()
                .unwrap_or_default(),
        }
    }

    /// Stream list URL for a title
    pub fn stream_url(&self, media_type: MediaType, id: &ContentId) -> String {
        format!(
            "{}/realdebrid={}/stream/{}/{}.json",
            self.base_url,
            urlencoding::encode(&self.debrid_key),
            media_type,
            id
        )
    }

    /// Fetch and parse the stream list, in upstream order
    pub async fn fetch_streams(
        &self,
        media_type: MediaType,
        id: &ContentId,
    ) -> Result<Vec<StreamCandidate>, TorrentioError> {
        if self.debrid_key.trim().is_empty() {
            return Err(TorrentioError::MissingCredential);
        }

        let url = self.stream_url(media_type, id);
        let response = self.client.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(TorrentioError::HttpStatus(status.as_u16()));
        }

        let text = response.text().await?;
        let data: TorrentioResponse = serde_json::from_str(&text)
            .map_err(|e| TorrentioError::InvalidResponse(format!("JSON parse error: {}", e)))?;

        let total = data.streams.len();
        let streams: Vec<StreamCandidate> = data
            .streams
            .into_iter()
            .filter_map(TorrentioStream::into_candidate)
            .collect();

        debug!(%id, total, playable = streams.len(), "Torrentio streams");
        Ok(streams)
    }
}

#[async_trait]
impl StreamCatalog for TorrentioClient {
    async fn streams(
        &self,
        media_type: MediaType,
        id: &ContentId,
    ) -> Result<Vec<StreamCandidate>, TorrentioError> {
        self.fetch_streams(media_type, id).await
    }
}
