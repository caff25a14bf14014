//! Display formatter
//!
//! Renders movie metadata plus a [`ReleaseDescriptor`] into the multi-line
//! string shown by the player. The layout is a list of lines, each a list of
//! fields joined by ` | `, so it can be reordered from configuration.

use serde::{Deserialize, Serialize};

use crate::models::{MovieMetadata, ReleaseDescriptor};

/// Separator between fields sharing a line
pub const FIELD_SEPARATOR: &str = " | ";

/// A single renderable field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayField {
    Title,
    Size,
    VideoRange,
    Quality,
    Codec,
    Audio,
    Source,
    Cache,
    Seeders,
    Format,
    Languages,
    Features,
}

impl DisplayField {
    /// Render this field, `None` when there is nothing to show
    pub fn render(&self, meta: &MovieMetadata, desc: &ReleaseDescriptor) -> Option<String> {
        match self {
            DisplayField::Title => Some(format!("🎬 {}", display_title(meta, desc))),
            DisplayField::Size => Some(format!("💾 {}", desc.size_display())),
            DisplayField::VideoRange => Some(desc.video_range.to_string()),
            DisplayField::Quality => desc.quality.label().map(|q| format!("📽️ {}", q)),
            DisplayField::Codec => Some(format!("🎞️ {}", desc.codec)),
            DisplayField::Audio => Some(format!("🔊 {}", desc.audio)),
            DisplayField::Source => Some(format!("🧲 {}", desc.source)),
            DisplayField::Cache => Some(if desc.cached {
                "✅ Cached on RD".to_string()
            } else {
                "🔗 Direct Torrent".to_string()
            }),
            DisplayField::Seeders => Some(format!("👥 {}", desc.seeders_display())),
            DisplayField::Format => desc.format.as_ref().map(|f| format!("📀 {}", f)),
            DisplayField::Languages => {
                (!desc.languages.is_empty()).then(|| format!("🌐 {}", desc.languages.join(", ")))
            }
            DisplayField::Features => {
                (!desc.features.is_empty()).then(|| format!("✨ {}", desc.features.join(", ")))
            }
        }
    }
}

/// Title line text: real metadata when available, else the cleaned release name
pub fn display_title(meta: &MovieMetadata, desc: &ReleaseDescriptor) -> String {
    if meta.is_placeholder() {
        desc.cleaned_title.clone()
    } else {
        meta.to_string()
    }
}

/// Ordered layout of display lines
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayTemplate {
    pub lines: Vec<Vec<DisplayField>>,
}

impl Default for DisplayTemplate {
    fn default() -> Self {
        use DisplayField::*;
        Self {
            lines: vec![
                vec![Title],
                vec![Size, VideoRange],
                vec![Quality, Codec],
                vec![Audio, Source],
                vec![Cache],
            ],
        }
    }
}

impl DisplayTemplate {
    /// Reduced layout used when titles carry little technical detail
    pub fn compact() -> Self {
        use DisplayField::*;
        Self {
            lines: vec![vec![Title], vec![Quality, Size], vec![Cache]],
        }
    }

    /// Render the descriptor; empty fields are skipped, empty lines dropped
    pub fn render(&self, meta: &MovieMetadata, desc: &ReleaseDescriptor) -> String {
        self.lines
            .iter()
            .filter_map(|line| {
                let parts: Vec<String> = line
                    .iter()
                    .filter_map(|field| field.render(meta, desc))
                    .collect();
                (!parts.is_empty()).then(|| parts.join(FIELD_SEPARATOR))
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}
