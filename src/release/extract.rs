//! Single-field extractors
//!
//! All extractors run on the raw title; normalization would break dotted
//! tokens such as `H.265`, `DDP5.1` or `28.67 GB`.

use once_cell::sync::Lazy;
use regex::Regex;

use super::tables::{AUDIO, CODEC, FEATURES, FORMAT, LANGUAGES, QUALITY, SOURCE, VIDEO_RANGE};
use super::{DEFAULT_AUDIO, DEFAULT_CODEC};
use crate::models::{QualityTier, SourceTracker, VideoRange};

static SIZE_RE: Lazy<Option<Regex>> =
    Lazy::new(|| Regex::new(r"(?i)(\d+(?:\.\d+)?)\s?(GB|MB)").ok());

// Bounded by non-digits rather than `\b`, which treats `_` as a word character
static YEAR_RE: Lazy<Option<Regex>> =
    Lazy::new(|| Regex::new(r"(?:^|\D)((?:19|20)\d{2})(?:\D|$)").ok());

// Tried in order: Torrentio's person marker, star markers, then plain text
static SEEDER_RES: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"👤\s*(\d+)",
        r"(?:🌟|⭐)\s*(\d+)",
        r"(?i)(\d+)\s*seed(?:er)?s\b",
        r"(?i)seed(?:er)?s?:?\s*(\d+)",
    ]
    .iter()
    .filter_map(|p| Regex::new(p).ok())
    .collect()
});

pub fn extract_quality(title: &str) -> QualityTier {
    QUALITY.first_match(title).unwrap_or_default()
}

pub fn extract_video_range(title: &str) -> VideoRange {
    VIDEO_RANGE.first_match(title).unwrap_or_default()
}

pub fn extract_codec(title: &str) -> &'static str {
    CODEC.first_match(title).unwrap_or(DEFAULT_CODEC)
}

pub fn extract_audio(title: &str) -> &'static str {
    AUDIO.first_match(title).unwrap_or(DEFAULT_AUDIO)
}

pub fn extract_source(title: &str) -> SourceTracker {
    SOURCE.first_match(title).unwrap_or_default()
}

pub fn extract_format(title: &str) -> Option<&'static str> {
    FORMAT.first_match(title)
}

pub fn extract_languages(title: &str) -> Vec<&'static str> {
    LANGUAGES.all_matches(title)
}

pub fn extract_features(title: &str) -> Vec<&'static str> {
    FEATURES.all_matches(title)
}

/// Size in MB-equivalent: `28.67 GB` → 29358.08, `700 MB` → 700, none → 0
pub fn extract_size(title: &str) -> f64 {
    let Some(re) = SIZE_RE.as_ref() else {
        return 0.0;
    };
    let Some(caps) = re.captures(title) else {
        return 0.0;
    };

    let num: f64 = caps
        .get(1)
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or(0.0);
    let unit = caps
        .get(2)
        .map(|m| m.as_str().to_uppercase())
        .unwrap_or_default();

    let mb = if unit == "GB" { num * 1024.0 } else { num };
    mb.max(0.0)
}

/// Format an MB-equivalent size for display
pub fn format_size(size_mb: f64) -> String {
    if size_mb.is_nan() || size_mb <= 0.0 {
        "Size N/A".to_string()
    } else if size_mb >= 1024.0 {
        format!("{:.2} GB", size_mb / 1024.0)
    } else {
        format!("{:.0} MB", size_mb)
    }
}

/// Seeder count from markers like "👤 142", "🌟 455" or "seeds: 12"
pub fn extract_seeders(title: &str) -> Option<u32> {
    SEEDER_RES.iter().find_map(|re| {
        re.captures(title)
            .and_then(|caps| caps.get(1))
            .and_then(|m| m.as_str().parse().ok())
    })
}

/// First 4-digit year (19xx/20xx) in the title
pub fn extract_year(title: &str) -> Option<u16> {
    YEAR_RE
        .as_ref()?
        .captures(title)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

/// True when the URL's host is `cached_domain` or one of its subdomains
pub fn is_cached_url(url: &str, cached_domain: &str) -> bool {
    let domain = cached_domain.trim().trim_start_matches('.').to_lowercase();
    if domain.is_empty() {
        return false;
    }

    let Ok(parsed) = reqwest::Url::parse(url) else {
        return false;
    };
    let Some(host) = parsed.host_str() else {
        return false;
    };

    let host = host.to_lowercase();
    host == domain || host.ends_with(&format!(".{}", domain))
}
