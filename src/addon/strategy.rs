//! Presentation strategies
//!
//! A strategy turns one ranked candidate into the display string. The live
//! strategy parses the upstream title; the template strategy is used when
//! titles carry too little detail and works from the candidate name plus the
//! file name hint, rendered with a reduced layout.

use crate::format::DisplayTemplate;
use crate::models::{MovieMetadata, QualityTier, ReleaseDescriptor, StreamCandidate};
use crate::release::{self, extract_quality, extract_size};

/// Produces the display string for a candidate
pub trait PresentationStrategy: Send + Sync {
    /// Build the descriptor this strategy renders
    fn describe(&self, candidate: &StreamCandidate, cached: bool) -> ReleaseDescriptor;

    /// Layout used for rendering
    fn template(&self) -> &DisplayTemplate;

    fn present(&self, meta: &MovieMetadata, candidate: &StreamCandidate, cached: bool) -> String {
        self.template()
            .render(meta, &self.describe(candidate, cached))
    }
}

/// Parses the upstream title and renders the full layout
#[derive(Debug, Clone, Default)]
pub struct LiveStrategy {
    template: DisplayTemplate,
}

impl LiveStrategy {
    pub fn new(template: DisplayTemplate) -> Self {
        Self { template }
    }
}

impl PresentationStrategy for LiveStrategy {
    fn describe(&self, candidate: &StreamCandidate, cached: bool) -> ReleaseDescriptor {
        release::parse(candidate.text()).with_cached(cached)
    }

    fn template(&self) -> &DisplayTemplate {
        &self.template
    }
}

/// Synthesizes a descriptor from the name and file name hint
#[derive(Debug, Clone)]
pub struct TemplateStrategy {
    template: DisplayTemplate,
}

impl Default for TemplateStrategy {
    fn default() -> Self {
        Self {
            template: DisplayTemplate::compact(),
        }
    }
}

impl PresentationStrategy for TemplateStrategy {
    fn describe(&self, candidate: &StreamCandidate, cached: bool) -> ReleaseDescriptor {
        // The file name (or title) leads so title cleanup reads the movie
        // name from it; the name is flattened onto the same line
        let mut text = candidate
            .filename_hint()
            .unwrap_or(&candidate.title)
            .to_string();
        for word in candidate.name.split_whitespace() {
            text.push(' ');
            text.push_str(word);
        }

        let mut desc = release::parse(&text).with_cached(cached);
        // Title text still holds the size when the name does not
        if desc.size_mb == 0.0 {
            desc.size_mb = extract_size(&candidate.title);
        }
        desc
    }

    fn template(&self) -> &DisplayTemplate {
        &self.template
    }
}

/// True when at least half of the candidates' titles yield a known quality
/// tier or a size. An empty list counts as complete.
pub fn looks_complete(candidates: &[StreamCandidate]) -> bool {
    if candidates.is_empty() {
        return true;
    }

    let informative = candidates
        .iter()
        .filter(|c| {
            let text = c.text();
            extract_quality(text) != QualityTier::Unknown || extract_size(text) > 0.0
        })
        .count();

    informative * 2 >= candidates.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn candidate(name: &str, title: &str, hints: Value) -> StreamCandidate {
        StreamCandidate {
            name: name.to_string(),
            title: title.to_string(),
            url: "https://download.real-debrid.com/d/abc".to_string(),
            behavior_hints: hints,
        }
    }

    #[test]
    fn test_looks_complete() {
        let rich = candidate("RD", "Movie.2021.1080p.WEB-DL 4.2 GB", Value::Null);
        let sized = candidate("RD", "Movie 700 MB", Value::Null);
        let bare = candidate("RD", "Movie", Value::Null);

        assert!(looks_complete(&[]));
        assert!(looks_complete(&[rich.clone(), bare.clone()]));
        assert!(looks_complete(&[sized, bare.clone()]));
        assert!(!looks_complete(&[rich, bare.clone(), bare]));
    }

    #[test]
    fn test_live_strategy_parses_title() {
        let c = candidate(
            "Torrentio\n4k",
            "Dune.2021.2160p.WEB-DL.DDP5.1.H.265 20 GB 👤 12",
            Value::Null,
        );
        let desc = LiveStrategy::default().describe(&c, true);
        assert_eq!(desc.quality, QualityTier::Uhd4k);
        assert_eq!(desc.codec, "H.265");
        assert_eq!(desc.seeders, Some(12));
        assert!(desc.cached);
    }

    #[test]
    fn test_template_strategy_uses_filename_hint() {
        let c = candidate(
            "[RD+] Torrentio\n1080p",
            "Some Upload",
            json!({"filename": "Dune.2021.1080p.BluRay.x265.mkv"}),
        );
        let strategy = TemplateStrategy::default();
        let desc = strategy.describe(&c, false);
        assert_eq!(desc.quality, QualityTier::Hd1080);
        assert_eq!(desc.codec, "H.265");

        let out = strategy.present(&MovieMetadata::new("Dune", Some(2021)), &c, false);
        assert_eq!(out, "🎬 Dune (2021)\n📽️ 1080p | 💾 Size N/A\n🔗 Direct Torrent");
    }

    #[test]
    fn test_template_strategy_title_line_from_filename() {
        let c = candidate(
            "[RD+] Torrentio\n1080p",
            "Some Upload",
            json!({"filename": "Dune.2021.1080p.BluRay.x265.mkv"}),
        );
        let strategy = TemplateStrategy::default();
        assert_eq!(strategy.describe(&c, true).cleaned_title, "Dune (2021)");

        let out = strategy.present(&MovieMetadata::default(), &c, true);
        assert_eq!(out.lines().next(), Some("🎬 Dune (2021)"));
    }

    #[test]
    fn test_template_strategy_without_hint_reads_title() {
        let c = candidate("Torrentio 720p", "Some Upload 1.5 GB", Value::Null);
        let desc = TemplateStrategy::default().describe(&c, true);
        assert_eq!(desc.quality, QualityTier::Hd720);
        assert_eq!(desc.size_mb, 1.5 * 1024.0);
    }
}
