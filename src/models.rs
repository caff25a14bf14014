//! Data structures shared across cleanstream
//!
//! Organized by domain:
//! - **Release**: quality tiers, video range, trackers and the parsed descriptor
//! - **Metadata**: movie/series title information from TMDB
//! - **Addon**: raw upstream candidates, processed output entries, content ids

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

// =============================================================================
// Release Models
// =============================================================================

/// Coarse video resolution classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum QualityTier {
    Uhd4k,
    Hd1080,
    Hd720,
    Sd,
    #[default]
    Unknown,
}

impl QualityTier {
    /// Ranking for sorting (higher = better)
    pub fn rank(&self) -> u8 {
        match self {
            QualityTier::Uhd4k => 4,
            QualityTier::Hd1080 => 3,
            QualityTier::Hd720 => 2,
            QualityTier::Sd => 1,
            QualityTier::Unknown => 0,
        }
    }

    /// Resolution label shown to the player, `None` when unknown
    pub fn label(&self) -> Option<&'static str> {
        match self {
            QualityTier::Uhd4k => Some("2160p"),
            QualityTier::Hd1080 => Some("1080p"),
            QualityTier::Hd720 => Some("720p"),
            QualityTier::Sd => Some("480p"),
            QualityTier::Unknown => None,
        }
    }
}

impl fmt::Display for QualityTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label().unwrap_or("Unknown"))
    }
}

impl Ord for QualityTier {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.rank().cmp(&other.rank())
    }
}

impl PartialOrd for QualityTier {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

/// Dynamic range of the video track
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum VideoRange {
    #[default]
    Sdr,
    Hdr,
    Hdr10Plus,
    DolbyVision,
}

impl fmt::Display for VideoRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VideoRange::Sdr => write!(f, "SDR"),
            VideoRange::Hdr => write!(f, "HDR"),
            VideoRange::Hdr10Plus => write!(f, "HDR10+"),
            VideoRange::DolbyVision => write!(f, "Dolby Vision"),
        }
    }
}

/// Tracker the release was scraped from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SourceTracker {
    Yts,
    Rarbg,
    ThePirateBay,
    LeetX,
    #[default]
    Unknown,
}

impl fmt::Display for SourceTracker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceTracker::Yts => write!(f, "YTS"),
            SourceTracker::Rarbg => write!(f, "RARBG"),
            SourceTracker::ThePirateBay => write!(f, "ThePirateBay"),
            SourceTracker::LeetX => write!(f, "1337x"),
            SourceTracker::Unknown => write!(f, "Torrent"),
        }
    }
}

/// Structured view of a free-text release title.
///
/// Every field is always populated; unmatched fields carry their defaults.
/// Built by [`crate::release::parse`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReleaseDescriptor {
    pub quality: QualityTier,
    pub video_range: VideoRange,
    pub codec: String,
    pub audio: String,
    /// Size in MB-equivalent (GB × 1024), 0 when absent
    pub size_mb: f64,
    pub seeders: Option<u32>,
    pub source: SourceTracker,
    pub cleaned_title: String,
    pub year: Option<u16>,
    pub format: Option<String>,
    pub languages: Vec<String>,
    pub features: Vec<String>,
    pub cached: bool,
}

impl Default for ReleaseDescriptor {
    fn default() -> Self {
        Self {
            quality: QualityTier::Unknown,
            video_range: VideoRange::Sdr,
            codec: crate::release::DEFAULT_CODEC.to_string(),
            audio: crate::release::DEFAULT_AUDIO.to_string(),
            size_mb: 0.0,
            seeders: None,
            source: SourceTracker::Unknown,
            cleaned_title: crate::release::DEFAULT_TITLE.to_string(),
            year: None,
            format: None,
            languages: Vec::new(),
            features: Vec::new(),
            cached: false,
        }
    }
}

impl ReleaseDescriptor {
    /// Parse a raw release title (never fails)
    pub fn parse(title: &str) -> Self {
        crate::release::parse(title)
    }

    /// Set the debrid cache flag
    pub fn with_cached(mut self, cached: bool) -> Self {
        self.cached = cached;
        self
    }

    /// Seeder count for display ("?" when unknown)
    pub fn seeders_display(&self) -> String {
        self.seeders
            .map(|s| s.to_string())
            .unwrap_or_else(|| "?".to_string())
    }

    /// Size for display ("Size N/A" when unknown)
    pub fn size_display(&self) -> String {
        crate::release::format_size(self.size_mb)
    }
}

// =============================================================================
// Metadata Models (TMDB)
// =============================================================================

/// Placeholder title used when the metadata lookup fails
pub const PLACEHOLDER_TITLE: &str = "Movie";

/// Display title and year for a piece of content
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieMetadata {
    pub title: String,
    pub year: Option<u16>,
}

impl Default for MovieMetadata {
    fn default() -> Self {
        Self {
            title: PLACEHOLDER_TITLE.to_string(),
            year: None,
        }
    }
}

impl MovieMetadata {
    pub fn new(title: impl Into<String>, year: Option<u16>) -> Self {
        Self {
            title: title.into(),
            year,
        }
    }

    /// True when this is the fallback value rather than real metadata
    pub fn is_placeholder(&self) -> bool {
        self.title.trim().is_empty() || self.title == PLACEHOLDER_TITLE
    }
}

impl fmt::Display for MovieMetadata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.year {
            Some(year) => write!(f, "{} ({})", self.title, year),
            None => write!(f, "{}", self.title),
        }
    }
}

// =============================================================================
// Addon Models (Stremio)
// =============================================================================

/// Stremio content type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Movie,
    Series,
}

impl MediaType {
    /// Parse a Stremio type path segment
    pub fn from_stremio(s: &str) -> Option<Self> {
        match s {
            "movie" => Some(MediaType::Movie),
            "series" => Some(MediaType::Series),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MediaType::Movie => "movie",
            MediaType::Series => "series",
        }
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Stremio content id: `tt1234567` or `tt1234567:season:episode`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentId {
    pub imdb_id: String,
    pub season: Option<u16>,
    pub episode: Option<u16>,
}

impl ContentId {
    /// Parse a Stremio id, returns `None` for non-IMDB ids
    pub fn parse(id: &str) -> Option<Self> {
        let mut parts = id.split(':');
        let imdb_id = parts.next()?;
        if !is_imdb_id(imdb_id) {
            return None;
        }

        let season = match parts.next() {
            Some(s) => Some(s.parse().ok()?),
            None => None,
        };
        let episode = match parts.next() {
            Some(e) => Some(e.parse().ok()?),
            None => None,
        };
        if parts.next().is_some() {
            return None;
        }

        Some(Self {
            imdb_id: imdb_id.to_string(),
            season,
            episode,
        })
    }
}

impl fmt::Display for ContentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.imdb_id)?;
        if let (Some(s), Some(e)) = (self.season, self.episode) {
            write!(f, ":{}:{}", s, e)?;
        }
        Ok(())
    }
}

/// IMDB id format check (tt followed by 7+ digits)
pub fn is_imdb_id(id: &str) -> bool {
    id.starts_with("tt") && id.len() >= 9 && id[2..].chars().all(|c| c.is_ascii_digit())
}

/// Raw stream entry from the aggregator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StreamCandidate {
    pub name: String,
    pub title: String,
    pub url: String,
    #[serde(rename = "behaviorHints", default)]
    pub behavior_hints: Value,
}

impl StreamCandidate {
    /// Descriptive text used for parsing: the title, else the name
    pub fn text(&self) -> &str {
        if self.title.trim().is_empty() {
            &self.name
        } else {
            &self.title
        }
    }

    /// `behaviorHints.filename` when the aggregator supplies one
    pub fn filename_hint(&self) -> Option<&str> {
        self.behavior_hints.get("filename").and_then(Value::as_str)
    }
}

/// Entry returned to the player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessedStream {
    pub title: String,
    pub url: String,
    #[serde(rename = "behaviorHints")]
    pub behavior_hints: Value,
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_quality_tier_ordering() {
        assert!(QualityTier::Uhd4k > QualityTier::Hd1080);
        assert!(QualityTier::Hd1080 > QualityTier::Hd720);
        assert!(QualityTier::Hd720 > QualityTier::Sd);
        assert!(QualityTier::Sd > QualityTier::Unknown);
    }

    #[test]
    fn test_quality_tier_display() {
        assert_eq!(QualityTier::Uhd4k.to_string(), "2160p");
        assert_eq!(QualityTier::Hd720.to_string(), "720p");
        assert_eq!(QualityTier::Unknown.to_string(), "Unknown");
        assert_eq!(QualityTier::Unknown.label(), None);
    }

    #[test]
    fn test_source_tracker_display() {
        assert_eq!(SourceTracker::ThePirateBay.to_string(), "ThePirateBay");
        assert_eq!(SourceTracker::LeetX.to_string(), "1337x");
        assert_eq!(SourceTracker::Unknown.to_string(), "Torrent");
    }

    #[test]
    fn test_video_range_display() {
        assert_eq!(VideoRange::DolbyVision.to_string(), "Dolby Vision");
        assert_eq!(VideoRange::Hdr10Plus.to_string(), "HDR10+");
    }

    #[test]
    fn test_descriptor_defaults() {
        let d = ReleaseDescriptor::default();
        assert_eq!(d.codec, "H.264");
        assert_eq!(d.audio, "Audio");
        assert_eq!(d.size_mb, 0.0);
        assert_eq!(d.seeders_display(), "?");
        assert_eq!(d.size_display(), "Size N/A");
        assert!(!d.cached);
    }

    #[test]
    fn test_metadata_placeholder() {
        let meta = MovieMetadata::default();
        assert!(meta.is_placeholder());
        assert_eq!(meta.to_string(), "Movie");

        let meta = MovieMetadata::new("Dune", Some(2021));
        assert!(!meta.is_placeholder());
        assert_eq!(meta.to_string(), "Dune (2021)");
    }

    #[test]
    fn test_media_type_from_stremio() {
        assert_eq!(MediaType::from_stremio("movie"), Some(MediaType::Movie));
        assert_eq!(MediaType::from_stremio("series"), Some(MediaType::Series));
        assert_eq!(MediaType::from_stremio("channel"), None);
    }

    #[test]
    fn test_content_id_parse() {
        let id = ContentId::parse("tt1877830").unwrap();
        assert_eq!(id.imdb_id, "tt1877830");
        assert_eq!(id.season, None);

        let id = ContentId::parse("tt0903747:1:3").unwrap();
        assert_eq!(id.imdb_id, "tt0903747");
        assert_eq!(id.season, Some(1));
        assert_eq!(id.episode, Some(3));
        assert_eq!(id.to_string(), "tt0903747:1:3");

        assert!(ContentId::parse("kitsu:1234").is_none());
        assert!(ContentId::parse("tt123").is_none());
        assert!(ContentId::parse("tt0903747:x:3").is_none());
    }

    #[test]
    fn test_candidate_text_falls_back_to_name() {
        let c = StreamCandidate {
            name: "Torrentio\n4k".to_string(),
            title: "  ".to_string(),
            url: "https://example.com".to_string(),
            behavior_hints: json!({"filename": "Movie.2160p.mkv"}),
        };
        assert_eq!(c.text(), "Torrentio\n4k");
        assert_eq!(c.filename_hint(), Some("Movie.2160p.mkv"));
    }

    #[test]
    fn test_processed_stream_serializes_behavior_hints() {
        let s = ProcessedStream {
            title: "t".to_string(),
            url: "u".to_string(),
            behavior_hints: json!({"bingeGroup": "x"}),
        };
        let v = serde_json::to_value(&s).unwrap();
        assert_eq!(v["behaviorHints"]["bingeGroup"], "x");
    }
}
