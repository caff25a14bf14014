//! Ranking and filter policy
//!
//! Drops low-quality release types, orders what remains by quality tier then
//! size (both descending, stable), and caps the result count.

use regex::Regex;

use crate::config::RankingConfig;
use crate::models::StreamCandidate;
use crate::release::{extract_quality, extract_size};

/// Release markers dropped by default (case-insensitive, whole token with an
/// optional `rip` suffix)
pub const DEFAULT_BLOCKLIST: &[&str] = &[
    "CAM", "TS", "Telesync", "SCR", "HDCAM", "HDTS", "R5", "DVDScr",
];

/// Default maximum number of streams returned
pub const DEFAULT_MAX_RESULTS: usize = 15;

/// Filter, sort and cap policy for stream candidates
#[derive(Debug, Clone)]
pub struct RankingPolicy {
    blocklist: Option<Regex>,
    max_results: usize,
}

impl RankingPolicy {
    /// Build a policy from configuration
    pub fn new(config: &RankingConfig) -> Result<Self, regex::Error> {
        let tokens: Vec<String> = config
            .blocklist
            .iter()
            .map(|t| t.trim())
            .filter(|t| !t.is_empty())
            .map(regex::escape)
            .collect();

        let blocklist = if tokens.is_empty() {
            None
        } else {
            Some(Regex::new(&format!(
                r"(?i)\b(?:{})(?:-?rip)?\b",
                tokens.join("|")
            ))?)
        };

        Ok(Self {
            blocklist,
            max_results: config.max_results,
        })
    }

    pub fn max_results(&self) -> usize {
        self.max_results
    }

    /// True when the text carries a blocklisted release marker
    pub fn is_blocked(&self, text: &str) -> bool {
        self.blocklist
            .as_ref()
            .map(|re| re.is_match(text))
            .unwrap_or(false)
    }

    /// Drop blocklisted candidates
    pub fn filter(&self, candidates: Vec<StreamCandidate>) -> Vec<StreamCandidate> {
        candidates
            .into_iter()
            .filter(|c| !self.is_blocked(c.text()))
            .collect()
    }

    /// Order by quality tier descending, then size descending.
    /// Equal keys keep their input order.
    pub fn sort(&self, candidates: Vec<StreamCandidate>) -> Vec<StreamCandidate> {
        let mut keyed: Vec<_> = candidates
            .into_iter()
            .map(|c| {
                let text = c.text();
                (extract_quality(text), extract_size(text), c)
            })
            .collect();

        keyed.sort_by(|a, b| b.0.cmp(&a.0).then_with(|| b.1.total_cmp(&a.1)));

        keyed.into_iter().map(|(_, _, c)| c).collect()
    }

    /// Truncate to the configured maximum
    pub fn cap(&self, mut candidates: Vec<StreamCandidate>) -> Vec<StreamCandidate> {
        candidates.truncate(self.max_results);
        candidates
    }

    /// Filter, sort and cap
    pub fn apply(&self, candidates: Vec<StreamCandidate>) -> Vec<StreamCandidate> {
        self.cap(self.sort(self.filter(candidates)))
    }
}

impl Default for RankingPolicy {
    fn default() -> Self {
        // The default blocklist is made of escaped literals and always compiles
        Self::new(&RankingConfig::default()).unwrap_or(Self {
            blocklist: None,
            max_results: DEFAULT_MAX_RESULTS,
        })
    }
}
