//! API clients for external services
//!
//! - TMDB: title/year lookup by IMDB id
//! - Torrentio: debrid-backed stream lists via the Stremio addon protocol
//!
//! Each client sits behind a trait so the addon pipeline can be driven by
//! test doubles.

pub mod tmdb;
pub mod torrentio;

use async_trait::async_trait;

use crate::models::{ContentId, MediaType, MovieMetadata, StreamCandidate};

pub use tmdb::{TmdbClient, TmdbError};
pub use torrentio::{TorrentioClient, TorrentioError};

/// Source of display metadata for a piece of content
#[async_trait]
pub trait MetadataLookup: Send + Sync {
    async fn lookup(&self, id: &ContentId) -> Result<MovieMetadata, TmdbError>;
}

/// Source of raw stream candidates
#[async_trait]
pub trait StreamCatalog: Send + Sync {
    async fn streams(
        &self,
        media_type: MediaType,
        id: &ContentId,
    ) -> Result<Vec<StreamCandidate>, TorrentioError>;
}
