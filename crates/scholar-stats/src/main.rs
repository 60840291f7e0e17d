//! Scholar Stats - Entry Point
//!
//! `scholar-stats` (or `scholar-stats fetch`) writes the snapshot;
//! `scholar-stats check` only verifies the identifier and connectivity.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use scholar_stats::config::{Config, snapshot};
use scholar_stats::fetcher;

#[derive(Parser, Debug)]
#[command(name = "scholar-stats")]
#[command(about = "Snapshot an author's citation metrics from Semantic Scholar")]
#[command(version)]
struct Cli {
    /// Semantic Scholar author ID
    #[arg(long, global = true, env = "SCHOLAR_ID")]
    scholar_id: Option<String>,

    /// Semantic Scholar API key (optional, enables higher rate limits)
    #[arg(long, global = true, env = "SEMANTIC_SCHOLAR_API_KEY")]
    api_key: Option<String>,

    /// Snapshot file location
    #[arg(long, global = true, default_value = snapshot::DEFAULT_OUTPUT_PATH)]
    output: PathBuf,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    /// Output logs as JSON
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, Copy, Default)]
enum Command {
    /// Fetch metrics and write the snapshot if it changed
    #[default]
    Fetch,
    /// Verify the identifier and resolve the author once, without writing
    Check,
}

fn init_tracing(log_level: &str, json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    let subscriber = tracing_subscriber::registry().with(filter);

    if json {
        subscriber.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        subscriber.with(tracing_subscriber::fmt::layer().compact()).init();
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // A missing .env is normal; real environment variables still apply.
    let _ = dotenv::dotenv();

    let cli = Cli::parse();

    init_tracing(&cli.log_level, cli.json_logs);

    let command = cli.command.unwrap_or_default();
    tracing::info!(version = env!("CARGO_PKG_VERSION"), command = ?command, "Starting scholar-stats");

    let config = Config::new(cli.api_key);
    let scholar_id = cli.scholar_id.as_deref();

    let status = match command {
        Command::Fetch => fetcher::run(config, scholar_id, &cli.output).await,
        Command::Check => fetcher::check(config, scholar_id).await,
    };

    status.into()
}
