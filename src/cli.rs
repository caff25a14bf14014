//! CLI - Command Line Interface for cleanstream
//!
//! Runs the addon server by default. The other subcommands drive the same
//! pipeline from a terminal for checking parser output and live results.
//!
//! # Examples
//!
//! ```bash
//! # Serve the addon on port 7000
//! cleanstream serve --port 7000
//!
//! # See how a release title is parsed and rendered
//! cleanstream inspect "Dune.2021.2160p.WEB-DL.DV.H265 20 GB" --json
//!
//! # Fetch processed streams for a title
//! cleanstream streams movie tt1160419
//! cleanstream streams series tt0903747:1:1
//! ```

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};
use std::io::IsTerminal;
use std::path::PathBuf;

use crate::models::MediaType;

// =============================================================================
// Exit Codes
// =============================================================================

/// Exit codes for CLI operations (semantic for scripting)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success
    Success = 0,
    /// General error
    Error = 1,
    /// Invalid arguments
    InvalidArgs = 2,
    /// Configuration missing or invalid
    ConfigError = 3,
    /// No streams available
    NoStreams = 4,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> i32 {
        code as i32
    }
}

impl From<ExitCode> for std::process::ExitCode {
    fn from(code: ExitCode) -> std::process::ExitCode {
        std::process::ExitCode::from(code as u8)
    }
}

// =============================================================================
// Main CLI Structure
// =============================================================================

/// cleanstream - Real-Debrid streams with clean details for Stremio
///
/// Run without arguments to serve the addon.
#[derive(Parser, Debug)]
#[command(
    name = "cleanstream",
    version,
    about = "Stremio addon: Real-Debrid streams with clean details",
    long_about = "Proxies Torrentio through Real-Debrid, filters and ranks the \
                  results, and rewrites each release name into a readable \
                  multi-line summary.\n\n\
                  Run without arguments to start the addon server.",
    after_help = "EXAMPLES:\n\
                  cleanstream                               Serve on the configured port\n\
                  cleanstream serve -p 7000                 Serve on port 7000\n\
                  cleanstream inspect \"Dune.2021.2160p\"     Parse a release title\n\
                  cleanstream streams movie tt1160419       Fetch processed streams"
)]
pub struct Cli {
    /// Output format as JSON (default for non-TTY)
    #[arg(long, short = 'j', global = true)]
    pub json: bool,

    /// Suppress non-essential output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Path to config file
    #[arg(long, short = 'c', global = true)]
    pub config: Option<PathBuf>,

    /// Subcommand to run (omit to serve)
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Cli {
    /// Check if JSON output should be used
    pub fn should_json(&self) -> bool {
        self.json || !std::io::stdout().is_terminal()
    }
}

// =============================================================================
// Subcommands
// =============================================================================

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the addon HTTP server
    Serve(ServeCmd),

    /// Parse a release title and show the rendered display
    #[command(visible_alias = "i")]
    Inspect(InspectCmd),

    /// Fetch processed streams for a title
    #[command(visible_alias = "st")]
    Streams(StreamsCmd),
}

/// Run the addon HTTP server
#[derive(Args, Debug, Default)]
pub struct ServeCmd {
    /// Address to bind (overrides config)
    #[arg(long)]
    pub host: Option<String>,

    /// Port to listen on (overrides config and PORT)
    #[arg(long, short = 'p')]
    pub port: Option<u16>,
}

/// Parse a release title
#[derive(Args, Debug)]
pub struct InspectCmd {
    /// Raw release title, as Torrentio reports it
    #[arg(required = true)]
    pub title: String,

    /// Treat the stream as cached on the debrid service
    #[arg(long)]
    pub cached: bool,
}

/// Fetch processed streams
#[derive(Args, Debug)]
pub struct StreamsCmd {
    /// Content type
    #[arg(value_enum)]
    pub media_type: MediaTypeArg,

    /// Stremio id: IMDB id, or `tt...:season:episode` for series
    #[arg(required = true)]
    pub id: String,
}

/// Content type argument
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaTypeArg {
    Movie,
    Series,
}

impl From<MediaTypeArg> for MediaType {
    fn from(arg: MediaTypeArg) -> Self {
        match arg {
            MediaTypeArg::Movie => MediaType::Movie,
            MediaTypeArg::Series => MediaType::Series,
        }
    }
}

// =============================================================================
// JSON Output Types
// =============================================================================

/// Generic JSON output wrapper with status
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonOutput<T: Serialize> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "is_zero")]
    pub exit_code: i32,
}

fn is_zero(n: &i32) -> bool {
    *n == 0
}

impl<T: Serialize> JsonOutput<T> {
    /// Create success output with data
    pub fn success(data: T) -> Self {
        Self {
            data: Some(data),
            error: None,
            exit_code: 0,
        }
    }
}

impl JsonOutput<()> {
    /// Create error output (no data)
    pub fn error_msg(msg: impl Into<String>, code: ExitCode) -> Self {
        Self {
            data: None,
            error: Some(msg.into()),
            exit_code: code.into(),
        }
    }
}

// =============================================================================
// Output Helpers
// =============================================================================

/// Output handler for consistent formatting
pub struct Output {
    pub json: bool,
    pub quiet: bool,
}

impl Output {
    pub fn new(cli: &Cli) -> Self {
        Self {
            json: cli.should_json(),
            quiet: cli.quiet,
        }
    }

    /// Print success data wrapped in the JSON envelope
    pub fn print<T: Serialize>(&self, data: T) -> anyhow::Result<()> {
        println!("{}", serde_json::to_string_pretty(&JsonOutput::success(data))?);
        Ok(())
    }

    /// Print plain text
    pub fn text(&self, text: impl std::fmt::Display) {
        println!("{}", text);
    }

    /// Print error and return exit code
    pub fn error(&self, msg: impl Into<String>, code: ExitCode) -> ExitCode {
        let msg = msg.into();
        if self.json {
            let output = JsonOutput::error_msg(&msg, code);
            if let Ok(json) = serde_json::to_string_pretty(&output) {
                eprintln!("{}", json);
            }
        } else if !self.quiet {
            eprintln!("Error: {}", msg);
        }
        code
    }

    /// Print info message (suppressed in quiet mode)
    pub fn info(&self, msg: impl std::fmt::Display) {
        if !self.quiet && !self.json {
            eprintln!("{}", msg);
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
