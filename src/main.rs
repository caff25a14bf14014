//! cleanstream - Stremio addon serving Real-Debrid streams with clean details
//!
//! # Usage
//!
//! ```bash
//! # Serve the addon (REAL_DEBRID_API and TMDB_API_KEY from the environment)
//! cleanstream
//!
//! # CLI mode
//! cleanstream inspect "Dune.2021.2160p.WEB-DL.DV.H265 20 GB"
//! cleanstream streams movie tt1160419 --json
//! ```

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use cleanstream::cli::{Cli, Command, ExitCode, Output, ServeCmd};
use cleanstream::commands;
use cleanstream::config::Config;

#[tokio::main]
async fn main() -> std::process::ExitCode {
    let cli = Cli::parse();
    init_logging(&cli);

    let exit_code = run(cli).await;
    exit_code.into()
}

/// Logs go to stderr so CLI output on stdout stays parseable
fn init_logging(cli: &Cli) {
    let default_filter = match (&cli.command, cli.quiet) {
        (_, true) => "error",
        (None | Some(Command::Serve(_)), false) => "info,tower_http=debug",
        _ => "warn",
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Resolve config and dispatch the command
async fn run(cli: Cli) -> ExitCode {
    let output = Output::new(&cli);

    let config = match Config::resolve(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => return output.error(format!("{:#}", e), ExitCode::ConfigError),
    };

    match cli.command {
        None => commands::serve_cmd(ServeCmd::default(), config, &output).await,
        Some(Command::Serve(cmd)) => commands::serve_cmd(cmd, config, &output).await,
        Some(Command::Inspect(cmd)) => commands::inspect_cmd(cmd, config, &output).await,
        Some(Command::Streams(cmd)) => commands::streams_cmd(cmd, config, &output).await,
    }
}
