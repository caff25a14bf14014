//! Addon pipeline
//!
//! One stream request: resolve metadata and fetch candidates concurrently,
//! then filter, rank, cap and re-render every entry. Collaborator failures
//! degrade to defaults and never surface to the caller.

pub mod strategy;

use anyhow::{Context, Result};
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::api::{MetadataLookup, StreamCatalog, TmdbClient, TorrentioClient};
use crate::config::Config;
use crate::models::{
    ContentId, MediaType, MovieMetadata, ProcessedStream, ReleaseDescriptor, StreamCandidate,
};
use crate::ranking::RankingPolicy;
use crate::release::is_cached_url;

pub use strategy::{looks_complete, LiveStrategy, PresentationStrategy, TemplateStrategy};

/// The stream addon
pub struct Addon {
    config: Arc<Config>,
    metadata: Option<Arc<dyn MetadataLookup>>,
    catalog: Option<Arc<dyn StreamCatalog>>,
    policy: RankingPolicy,
    live: LiveStrategy,
    fallback: TemplateStrategy,
}

impl Addon {
    /// Build the addon with HTTP collaborators from configuration.
    ///
    /// Without a debrid key no catalog is created and every stream request
    /// returns nothing. Without a TMDB key metadata lookups are skipped.
    pub fn from_config(config: Config) -> Result<Self> {
        let timeout = config.request_timeout();

        let metadata = config
            .tmdb
            .api_key
            .as_deref()
            .filter(|k| !k.trim().is_empty())
            .map(|key| {
                Arc::new(TmdbClient::with_base_url(key, &config.tmdb.base_url, timeout))
                    as Arc<dyn MetadataLookup>
            });

        let catalog = if config.debrid_configured() {
            config.debrid.api_key.as_deref().map(|key| {
                Arc::new(TorrentioClient::with_base_url(
                    key,
                    &config.torrentio.base_url,
                    timeout,
                )) as Arc<dyn StreamCatalog>
            })
        } else {
            None
        };

        Self::new(config, metadata, catalog)
    }

    /// Build the addon around explicit collaborators
    pub fn new(
        config: Config,
        metadata: Option<Arc<dyn MetadataLookup>>,
        catalog: Option<Arc<dyn StreamCatalog>>,
    ) -> Result<Self> {
        let policy = RankingPolicy::new(&config.ranking).context("Invalid ranking blocklist")?;
        let live = LiveStrategy::new(config.display.clone());

        info!(
            metadata = metadata.is_some(),
            debrid = catalog.is_some(),
            max_results = policy.max_results(),
            "Addon ready"
        );

        Ok(Self {
            config: Arc::new(config),
            metadata,
            catalog,
            policy,
            live,
            fallback: TemplateStrategy::default(),
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// True when stream requests can reach the aggregator
    pub fn debrid_configured(&self) -> bool {
        self.catalog.is_some()
    }

    /// Handle a Stremio stream request. Unknown types, non-IMDB ids and
    /// every upstream failure yield an empty list.
    pub async fn streams(&self, media_type: &str, id: &str) -> Vec<ProcessedStream> {
        let Some(catalog) = self.catalog.as_ref() else {
            warn!(id, "Stream request without a debrid key configured");
            return Vec::new();
        };

        let (Some(media_type), Some(content_id)) =
            (MediaType::from_stremio(media_type), ContentId::parse(id))
        else {
            debug!(media_type, id, "Unsupported stream request");
            return Vec::new();
        };

        let (meta, candidates) = tokio::join!(
            self.lookup_metadata(&content_id),
            catalog.streams(media_type, &content_id)
        );

        let candidates = match candidates {
            Ok(c) => c,
            Err(e) => {
                warn!(%content_id, error = %e, "Stream fetch failed");
                return Vec::new();
            }
        };

        let streams = self.process(&meta, candidates);
        info!(%content_id, title = %meta, count = streams.len(), "Served streams");
        streams
    }

    /// Metadata for the id, or the placeholder when unavailable
    async fn lookup_metadata(&self, id: &ContentId) -> MovieMetadata {
        let Some(lookup) = self.metadata.as_ref() else {
            return MovieMetadata::default();
        };

        match lookup.lookup(id).await {
            Ok(meta) => meta,
            Err(e) => {
                warn!(imdb_id = %id.imdb_id, error = %e, "Metadata lookup failed");
                MovieMetadata::default()
            }
        }
    }

    /// Filter, rank, cap and render candidates
    pub fn process(
        &self,
        meta: &MovieMetadata,
        candidates: Vec<StreamCandidate>,
    ) -> Vec<ProcessedStream> {
        let ranked = self.policy.apply(candidates);

        let strategy: &dyn PresentationStrategy = if looks_complete(&ranked) {
            &self.live
        } else {
            debug!("Sparse titles, using compact layout");
            &self.fallback
        };

        ranked
            .into_iter()
            .map(|c| {
                let cached = self.is_cached(&c.url);
                ProcessedStream {
                    title: strategy.present(meta, &c, cached),
                    url: c.url,
                    behavior_hints: match c.behavior_hints {
                        Value::Null => json!({}),
                        hints => hints,
                    },
                }
            })
            .collect()
    }

    /// Parse a single title as the live strategy would
    pub fn describe(&self, title: &str, url: Option<&str>) -> ReleaseDescriptor {
        let cached = url.map(|u| self.is_cached(u)).unwrap_or(false);
        crate::release::parse(title).with_cached(cached)
    }

    /// Render a descriptor with the configured layout
    pub fn render(&self, meta: &MovieMetadata, desc: &ReleaseDescriptor) -> String {
        self.live.template().render(meta, desc)
    }

    fn is_cached(&self, url: &str) -> bool {
        is_cached_url(url, &self.config.debrid.cached_domain)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{TmdbError, TorrentioError};
    use async_trait::async_trait;

    struct FixedMetadata(Option<MovieMetadata>);

    #[async_trait]
    impl MetadataLookup for FixedMetadata {
        async fn lookup(&self, id: &ContentId) -> Result<MovieMetadata, TmdbError> {
            self.0
                .clone()
                .ok_or_else(|| TmdbError::NoResults(id.imdb_id.clone()))
        }
    }

    struct FixedCatalog(Option<Vec<StreamCandidate>>);

    #[async_trait]
    impl StreamCatalog for FixedCatalog {
        async fn streams(
            &self,
            _media_type: MediaType,
            _id: &ContentId,
        ) -> Result<Vec<StreamCandidate>, TorrentioError> {
            self.0.clone().ok_or(TorrentioError::HttpStatus(503))
        }
    }

    fn candidate(title: &str, url: &str) -> StreamCandidate {
        StreamCandidate {
            name: "Torrentio".to_string(),
            title: title.to_string(),
            url: url.to_string(),
            behavior_hints: Value::Null,
        }
    }

    fn addon(meta: Option<MovieMetadata>, streams: Option<Vec<StreamCandidate>>) -> Addon {
        Addon::new(
            Config::default(),
            Some(Arc::new(FixedMetadata(meta))),
            Some(Arc::new(FixedCatalog(streams))),
        )
        .unwrap()
    }

    fn sample_streams() -> Vec<StreamCandidate> {
        vec![
            candidate(
                "Dune.2021.1080p.BluRay.x264 8 GB 👤 40",
                "https://download.real-debrid.com/d/1",
            ),
            candidate("Dune.2021.HDCAM.x264 1.4 GB", "https://download.real-debrid.com/d/2"),
            candidate(
                "Dune.2021.2160p.WEB-DL.DV.HDR.Atmos.H265 30 GB 👤 9",
                "https://torrentio.strem.fun/resolve/x",
            ),
        ]
    }

    #[tokio::test]
    async fn test_streams_pipeline() {
        let addon = addon(Some(MovieMetadata::new("Dune", Some(2021))), Some(sample_streams()));
        let out = addon.streams("movie", "tt1160419").await;

        assert_eq!(out.len(), 2);
        assert!(out[0].title.starts_with("🎬 Dune (2021)\n💾 30.00 GB | Dolby Vision"));
        assert!(out[0].title.ends_with("🔗 Direct Torrent"));
        assert!(out[1].title.contains("📽️ 1080p"));
        assert!(out[1].title.ends_with("✅ Cached on RD"));
        assert_eq!(out[1].behavior_hints, json!({}));
    }

    #[tokio::test]
    async fn test_metadata_failure_uses_cleaned_title() {
        let addon = addon(None, Some(sample_streams()));
        let out = addon.streams("movie", "tt1160419").await;
        assert_eq!(out.len(), 2);
        assert!(out.iter().all(|s| s.title.starts_with("🎬 Dune (2021)\n")));
    }

    #[tokio::test]
    async fn test_stream_failure_is_empty() {
        let addon = addon(Some(MovieMetadata::default()), None);
        assert!(addon.streams("movie", "tt1160419").await.is_empty());
    }

    #[tokio::test]
    async fn test_unsupported_requests_are_empty() {
        let addon = addon(None, Some(sample_streams()));
        assert!(addon.streams("channel", "tt1160419").await.is_empty());
        assert!(addon.streams("movie", "kitsu:123").await.is_empty());
    }

    #[tokio::test]
    async fn test_no_debrid_key_returns_nothing() {
        let addon = Addon::from_config(Config::default()).unwrap();
        assert!(!addon.debrid_configured());
        assert!(addon.streams("movie", "tt1160419").await.is_empty());
    }

    #[test]
    fn test_process_caps_results() {
        let mut config = Config::default();
        config.ranking.max_results = 2;
        let addon = Addon::new(config, None, None).unwrap();
        let input: Vec<_> = (0..6)
            .map(|i| candidate(&format!("Film.{}.1080p {} GB", i, i + 1), "https://x.y/z"))
            .collect();
        let out = addon.process(&MovieMetadata::default(), input);
        assert_eq!(out.len(), 2);
        assert!(out[0].title.contains("💾 6.00 GB"));
    }

    #[test]
    fn test_describe_sets_cache_from_url() {
        let addon = Addon::new(Config::default(), None, None).unwrap();
        let desc = addon.describe("Film.720p", Some("https://abc.real-debrid.com/d/1"));
        assert!(desc.cached);
        assert!(!addon.describe("Film.720p", None).cached);
    }
}
