//! CLI Command Handlers
//!
//! Each handler takes CLI args, the resolved config and Output, and returns
//! an ExitCode.

use serde::Serialize;
use tracing::warn;

use crate::addon::Addon;
use crate::cli::{ExitCode, InspectCmd, Output, ServeCmd, StreamsCmd};
use crate::config::Config;
use crate::models::{ContentId, MediaType, MovieMetadata, ProcessedStream, ReleaseDescriptor};
use crate::server;

// =============================================================================
// Serve Command
// =============================================================================

pub async fn serve_cmd(cmd: ServeCmd, mut config: Config, output: &Output) -> ExitCode {
    if let Some(host) = cmd.host {
        config.server.host = host;
    }
    if let Some(port) = cmd.port {
        config.server.port = port;
    }

    if !config.debrid_configured() {
        warn!("REAL_DEBRID_API is not set; every stream request will return no streams");
    }

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let addon = match Addon::from_config(config) {
        Ok(addon) => addon,
        Err(e) => return output.error(format!("{:#}", e), ExitCode::ConfigError),
    };

    output.info(format!("Serving addon on http://{}/manifest.json", addr));

    match server::serve(addon, &addr).await {
        Ok(()) => ExitCode::Success,
        Err(e) => output.error(format!("Server error: {:#}", e), ExitCode::Error),
    }
}

// =============================================================================
// Inspect Command
// =============================================================================

#[derive(Debug, Serialize)]
struct InspectResult {
    original: String,
    parsed: ReleaseDescriptor,
    display: String,
}

pub async fn inspect_cmd(cmd: InspectCmd, config: Config, output: &Output) -> ExitCode {
    let cached_url = format!("https://download.{}/", config.debrid.cached_domain);
    let addon = match Addon::new(config, None, None) {
        Ok(addon) => addon,
        Err(e) => return output.error(format!("{:#}", e), ExitCode::ConfigError),
    };

    let parsed = addon.describe(&cmd.title, cmd.cached.then_some(cached_url.as_str()));
    let display = addon.render(&MovieMetadata::default(), &parsed);

    if !output.json {
        output.text(&display);
        return ExitCode::Success;
    }

    let result = InspectResult {
        original: cmd.title,
        parsed,
        display,
    };
    if let Err(e) = output.print(&result) {
        return output.error(format!("Failed to serialize: {}", e), ExitCode::Error);
    }
    ExitCode::Success
}

// =============================================================================
// Streams Command
// =============================================================================

pub async fn streams_cmd(cmd: StreamsCmd, config: Config, output: &Output) -> ExitCode {
    if ContentId::parse(&cmd.id).is_none() {
        return output.error(
            "Invalid id (expected tt followed by 7+ digits, optionally :season:episode)",
            ExitCode::InvalidArgs,
        );
    }
    if !config.debrid_configured() {
        return output.error(
            "No Real-Debrid key configured (set REAL_DEBRID_API or debrid.api_key)",
            ExitCode::ConfigError,
        );
    }

    let addon = match Addon::from_config(config) {
        Ok(addon) => addon,
        Err(e) => return output.error(format!("{:#}", e), ExitCode::ConfigError),
    };

    let media_type = MediaType::from(cmd.media_type);
    output.info(format!("Fetching streams for {} {}...", media_type, cmd.id));

    let streams: Vec<ProcessedStream> = addon.streams(media_type.as_str(), &cmd.id).await;
    if streams.is_empty() {
        return output.error("No streams found", ExitCode::NoStreams);
    }

    if output.json {
        if let Err(e) = output.print(&streams) {
            return output.error(format!("Failed to serialize: {}", e), ExitCode::Error);
        }
    } else {
        for (i, stream) in streams.iter().enumerate() {
            output.text(format!("[{}] {}\n{}\n", i + 1, stream.title, stream.url));
        }
    }
    ExitCode::Success
}
