//! Release descriptor extraction
//!
//! Turns a free-text torrent release title into a [`ReleaseDescriptor`].
//! Parsing never fails: fields that cannot be matched take their defaults.
//!
//! - `tables` - ordered (pattern, value) priority tables, one per field
//! - `extract` - single-field extractors and size formatting
//! - `title` - title normalization and movie-name cleanup

pub mod extract;
pub mod tables;
pub mod title;

pub use extract::{
    extract_audio, extract_codec, extract_features, extract_format, extract_languages,
    extract_quality, extract_seeders, extract_size, extract_source, extract_video_range,
    extract_year, format_size, is_cached_url,
};
pub use title::{clean_title, normalize_title};

use crate::models::ReleaseDescriptor;

/// Codec reported when the title names none
pub const DEFAULT_CODEC: &str = "H.264";

/// Audio label reported when the title names none
pub const DEFAULT_AUDIO: &str = "Audio";

/// Movie name used when nothing survives title cleanup
pub const DEFAULT_TITLE: &str = "Movie";

/// Parse a raw release title into a fully populated descriptor.
///
/// The cache flag is left unset; it depends on the stream URL, not the
/// title (see [`ReleaseDescriptor::with_cached`]).
pub fn parse(title: &str) -> ReleaseDescriptor {
    ReleaseDescriptor {
        quality: extract_quality(title),
        video_range: extract_video_range(title),
        codec: extract_codec(title).to_string(),
        audio: extract_audio(title).to_string(),
        size_mb: extract_size(title),
        seeders: extract_seeders(title),
        source: extract_source(title),
        cleaned_title: clean_title(title),
        year: extract_year(title),
        format: extract_format(title).map(str::to_string),
        languages: extract_languages(title)
            .into_iter()
            .map(str::to_string)
            .collect(),
        features: extract_features(title)
            .into_iter()
            .map(str::to_string)
            .collect(),
        cached: false,
    }
}
