//! cleanstream - Real-Debrid streams with clean details for Stremio
//!
//! Proxies Torrentio through Real-Debrid, enriches titles via TMDB, and
//! rewrites each release name into a readable multi-line summary.
//!
//! # Modules
//!
//! - `models` - Release descriptors, metadata, stream candidates
//! - `release` - Release title parsing
//! - `format` - Display string rendering
//! - `ranking` - Filter, sort and cap policy
//! - `api` - API clients (TMDB, Torrentio)
//! - `addon` - Per-request stream pipeline
//! - `server` - Stremio HTTP routes
//! - `config`, `cli`, `commands` - Configuration and command line

pub mod addon;
pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod format;
pub mod models;
pub mod ranking;
pub mod release;
pub mod server;

// Re-export commonly used types
pub use addon::Addon;
pub use api::{MetadataLookup, StreamCatalog, TmdbClient, TorrentioClient};
pub use config::Config;
pub use format::{DisplayField, DisplayTemplate};
pub use models::{
    ContentId, MediaType, MovieMetadata, ProcessedStream, QualityTier, ReleaseDescriptor,
    SourceTracker, StreamCandidate, VideoRange,
};
pub use ranking::RankingPolicy;
pub use server::{create_router, AppState};
