//! Configuration management for cleanstream
//!
//! Config is read once at startup from a TOML file (`--config PATH`, or
//! ~/.config/cleanstream/config.toml when present), then environment
//! variables override individual settings. The result is immutable and
//! handed to the addon and the HTTP server.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::format::DisplayTemplate;
use crate::ranking::{DEFAULT_BLOCKLIST, DEFAULT_MAX_RESULTS};

/// Environment variable holding the Real-Debrid API key
pub const ENV_DEBRID_KEY: &str = "REAL_DEBRID_API";
/// Environment variable holding the TMDB API key
pub const ENV_TMDB_KEY: &str = "TMDB_API_KEY";
/// Environment variable overriding the listen port
pub const ENV_PORT: &str = "PORT";

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub debrid: DebridConfig,
    pub tmdb: TmdbConfig,
    pub torrentio: TorrentioConfig,
    pub ranking: RankingConfig,
    pub display: DisplayTemplate,
    pub addon: AddonInfo,
    /// Per-call timeout for outbound requests
    pub request_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            debrid: DebridConfig::default(),
            tmdb: TmdbConfig::default(),
            torrentio: TorrentioConfig::default(),
            ranking: RankingConfig::default(),
            display: DisplayTemplate::default(),
            addon: AddonInfo::default(),
            request_timeout_secs: 10,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DebridConfig {
    /// Real-Debrid API key; without it every stream request returns nothing
    pub api_key: Option<String>,
    /// Streams whose URL host is under this domain are marked cached
    pub cached_domain: String,
}

impl Default for DebridConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            cached_domain: "real-debrid.com".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TmdbConfig {
    /// TMDB v3 API key; metadata lookups are skipped without one
    pub api_key: Option<String>,
    pub base_url: String,
}

impl Default for TmdbConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: "https://api.themoviedb.org/3".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TorrentioConfig {
    pub base_url: String,
}

impl Default for TorrentioConfig {
    fn default() -> Self {
        Self {
            base_url: "https://torrentio.strem.fun".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RankingConfig {
    /// Release markers to drop (case-insensitive, whole token)
    pub blocklist: Vec<String>,
    /// Maximum number of streams returned per request
    pub max_results: usize,
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            blocklist: DEFAULT_BLOCKLIST.iter().map(|s| s.to_string()).collect(),
            max_results: DEFAULT_MAX_RESULTS,
        }
    }
}

/// Manifest fields presented to Stremio
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AddonInfo {
    pub id: String,
    pub name: String,
    pub description: String,
    pub logo: String,
    pub background: String,
}

impl Default for AddonInfo {
    fn default() -> Self {
        Self {
            id: "com.cleanstream.addon".to_string(),
            name: "Cleanstream".to_string(),
            description: "Real-Debrid Streams with Clean Details".to_string(),
            logo: "https://cdn-icons-png.flaticon.com/512/3095/3095588.png".to_string(),
            background: "https://images.unsplash.com/photo-1536440136628-849c177e76a1"
                .to_string(),
        }
    }
}

impl Config {
    /// Default config file path (~/.config/cleanstream/config.toml)
    pub fn path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("cleanstream").join("config.toml"))
    }

    /// Parse config from TOML text
    pub fn from_toml(text: &str) -> Result<Self> {
        toml::from_str(text).context("Failed to parse config TOML")
    }

    /// Load config from an explicit path, or the default path if it exists.
    /// A missing default file yields the built-in defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => match Self::path().filter(|p| p.exists()) {
                Some(p) => p,
                None => return Ok(Self::default()),
            },
        };

        let text = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;
        Self::from_toml(&text).with_context(|| format!("Invalid config in {:?}", path))
    }

    /// Load config and apply process environment overrides
    pub fn resolve(path: Option<&Path>) -> Result<Self> {
        let mut config = Self::load(path)?;
        config.apply_env(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    /// Override settings from environment-style lookups:
    /// `PORT`, `REAL_DEBRID_API`, `TMDB_API_KEY`
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(port) = lookup(ENV_PORT).and_then(|p| p.trim().parse().ok()) {
            self.server.port = port;
        }
        if let Some(key) = lookup(ENV_DEBRID_KEY).filter(|k| !k.trim().is_empty()) {
            self.debrid.api_key = Some(key.trim().to_string());
        }
        if let Some(key) = lookup(ENV_TMDB_KEY).filter(|k| !k.trim().is_empty()) {
            self.tmdb.api_key = Some(key.trim().to_string());
        }
    }

    /// Reject settings the addon cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.ranking.max_results == 0 {
            anyhow::bail!("ranking.max_results must be greater than 0");
        }
        if self.request_timeout_secs == 0 {
            anyhow::bail!("request_timeout_secs must be greater than 0");
        }
        if self.display.lines.is_empty() {
            anyhow::bail!("display.lines must contain at least one line");
        }
        Ok(())
    }

    /// True when a debrid key is available
    pub fn debrid_configured(&self) -> bool {
        self.debrid
            .api_key
            .as_deref()
            .map(|k| !k.trim().is_empty())
            .unwrap_or(false)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
