//! Ordered priority tables for release-title fields
//!
//! Each table is a list of (pattern, canonical value) pairs evaluated in
//! order; the first matching pattern wins.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::{QualityTier, SourceTracker, VideoRange};

/// Ordered list of (pattern, value) pairs
pub struct PatternTable<T: 'static> {
    entries: Vec<(Regex, T)>,
}

impl<T: Copy> PatternTable<T> {
    /// Build a table from pattern literals, skipping any that fail to compile
    pub fn new(entries: &[(&str, T)]) -> Self {
        Self {
            entries: entries
                .iter()
                .filter_map(|(pattern, value)| Regex::new(pattern).ok().map(|re| (re, *value)))
                .collect(),
        }
    }

    /// Value of the first pattern that matches `text`
    pub fn first_match(&self, text: &str) -> Option<T> {
        self.entries
            .iter()
            .find(|(re, _)| re.is_match(text))
            .map(|(_, value)| *value)
    }

    /// Values of every matching pattern, in table order
    pub fn all_matches(&self, text: &str) -> Vec<T>
    where
        T: PartialEq,
    {
        let mut found = Vec::new();
        for (re, value) in &self.entries {
            if re.is_match(text) && !found.contains(value) {
                found.push(*value);
            }
        }
        found
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

pub const QUALITY_PATTERNS: &[(&str, QualityTier)] = &[
    (r"(?i)2160p|4k|\buhd\b", QualityTier::Uhd4k),
    (r"(?i)1080p|\bfhd\b", QualityTier::Hd1080),
    (r"(?i)720p", QualityTier::Hd720),
    (r"(?i)480p|576p", QualityTier::Sd),
];

pub const VIDEO_RANGE_PATTERNS: &[(&str, VideoRange)] = &[
    (r"(?i)dolby[\s.]?vision|\bdv\b|\bdovi\b", VideoRange::DolbyVision),
    (r"(?i)hdr10\+|hdr10plus", VideoRange::Hdr10Plus),
    (r"(?i)hdr", VideoRange::Hdr),
];

pub const CODEC_PATTERNS: &[(&str, &str)] = &[
    (r"(?i)h\.?265|x265|\bhevc\b", "H.265"),
    (r"(?i)h\.?264|x264|\bavc\b", "H.264"),
    (r"(?i)\bav1\b", "AV1"),
];

// Atmos is checked first regardless of where it appears in the title
pub const AUDIO_PATTERNS: &[(&str, &str)] = &[
    (r"(?i)atmos", "Atmos"),
    (r"(?i)ddp[\s.]?5[\s.]1|dd\+[\s.]?5[\s.]1", "DDP5.1"),
    (r"(?i)\bdd[\s.]?5[\s.]1", "DD5.1"),
    (r"(?i)\bac-?3\b", "AC3"),
    (r"(?i)\baac", "AAC"),
];

pub const SOURCE_PATTERNS: &[(&str, SourceTracker)] = &[
    (r"(?i)\byts\b|\byify\b", SourceTracker::Yts),
    (r"(?i)rarbg", SourceTracker::Rarbg),
    (r"(?i)thepiratebay|\btpb\b", SourceTracker::ThePirateBay),
    (r"(?i)1337x", SourceTracker::LeetX),
];

pub const FORMAT_PATTERNS: &[(&str, &str)] = &[
    (r"(?i)\bremux\b", "REMUX"),
    (r"(?i)blu-?ray|\bbdrip\b|\bbrrip\b", "BluRay"),
    (r"(?i)web-?dl", "WEB-DL"),
    (r"(?i)web-?rip", "WEBRip"),
    (r"(?i)\bhdtv\b", "HDTV"),
    (r"(?i)dvd-?rip", "DVDRip"),
];

pub const FEATURE_PATTERNS: &[(&str, &str)] = &[
    (r"(?i)10-?bit", "10bit"),
    (r"(?i)\bimax\b", "IMAX"),
    (r"(?i)\bextended\b", "Extended"),
    (r"(?i)\bremastered\b", "Remastered"),
    (r"(?i)director'?s[\s.]cut", "Director's Cut"),
    (r"(?i)\buncut\b", "Uncut"),
];

pub const LANGUAGE_PATTERNS: &[(&str, &str)] = &[
    (r"🇬🇧|🇺🇸", "English"),
    (r"🇫🇷", "French"),
    (r"🇩🇪", "German"),
    (r"🇪🇸|🇲🇽|🇦🇷", "Spanish"),
    (r"🇮🇹", "Italian"),
    (r"🇵🇹|🇧🇷", "Portuguese"),
    (r"🇷🇺", "Russian"),
    (r"🇯🇵", "Japanese"),
    (r"🇰🇷", "Korean"),
    (r"🇨🇳", "Chinese"),
    (r"🇮🇳", "Hindi"),
    (r"🇸🇦", "Arabic"),
    (r"(?i)\bmulti\b", "Multi"),
    (r"(?i)\bdual[\s.-]?audio\b", "Dual Audio"),
];

pub static QUALITY: Lazy<PatternTable<QualityTier>> =
    Lazy::new(|| PatternTable::new(QUALITY_PATTERNS));
pub static VIDEO_RANGE: Lazy<PatternTable<VideoRange>> =
    Lazy::new(|| PatternTable::new(VIDEO_RANGE_PATTERNS));
pub static CODEC: Lazy<PatternTable<&'static str>> =
    Lazy::new(|| PatternTable::new(CODEC_PATTERNS));
pub static AUDIO: Lazy<PatternTable<&'static str>> =
    Lazy::new(|| PatternTable::new(AUDIO_PATTERNS));
pub static SOURCE: Lazy<PatternTable<SourceTracker>> =
    Lazy::new(|| PatternTable::new(SOURCE_PATTERNS));
pub static FORMAT: Lazy<PatternTable<&'static str>> =
    Lazy::new(|| PatternTable::new(FORMAT_PATTERNS));
pub static FEATURES: Lazy<PatternTable<&'static str>> =
    Lazy::new(|| PatternTable::new(FEATURE_PATTERNS));
pub static LANGUAGES: Lazy<PatternTable<&'static str>> =
    Lazy::new(|| PatternTable::new(LANGUAGE_PATTERNS));
