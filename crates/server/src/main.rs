//! Wafr - Arabic-first coupon backend
//!
//! # Usage
//!
//! ```bash
//! # Run the server (default)
//! wafr
//! wafr serve --config configs/wafr.toml
//!
//! # Load a JSON fixture bundle into the store
//! wafr seed --file fixtures.json
//! ```

mod cmd;

use anyhow::Result;
use clap::{Parser, Subcommand};
use wafr_config::{Config, LogFormat};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Wafr - Arabic-first coupon backend
#[derive(Parser, Debug)]
#[command(name = "wafr")]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    // Global args that apply to serve when no subcommand given
    /// Path to configuration file (error if specified but not found)
    #[arg(short, long, global = true)]
    config: Option<std::path::PathBuf>,

    /// Log level (trace, debug, info, warn, error). Overrides config file.
    #[arg(short, long, global = true)]
    log_level: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the server
    Serve(cmd::serve::ServeArgs),

    /// Load a JSON fixture bundle into the store
    Seed(cmd::seed::SeedArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Command::Serve(mut args)) => {
            // CLI global --config overrides subcommand config if both specified
            if args.config.is_none() && cli.config.is_some() {
                args.config = cli.config;
            }
            init_logging_for(cli.log_level.as_deref(), args.config.as_deref())?;
            cmd::serve::run(args).await
        }
        Some(Command::Seed(mut args)) => {
            if args.config.is_none() && cli.config.is_some() {
                args.config = cli.config;
            }
            init_logging_for(cli.log_level.as_deref(), args.config.as_deref())?;
            cmd::seed::run(args).await
        }
        // No subcommand = run server (default behavior)
        None => {
            init_logging_for(cli.log_level.as_deref(), cli.config.as_deref())?;
            let args = cmd::serve::ServeArgs { config: cli.config };
            cmd::serve::run(args).await
        }
    }
}

/// Initialize logging: CLI flag > config file > default "info"
fn init_logging_for(
    cli_level: Option<&str>,
    config_path: Option<&std::path::Path>,
) -> Result<()> {
    let mut level = "info".to_string();
    let mut format = LogFormat::Console;

    if let Some(path) = config_path
        && path.exists()
        && let Ok(config) = Config::from_file(path)
    {
        level = config.log.level.as_str().to_string();
        format = config.log.format;
    }
    if let Some(cli_level) = cli_level {
        level = cli_level.to_string();
    }

    let filter = EnvFilter::try_new(&level)
        .or_else(|_| EnvFilter::try_new("info"))
        .map_err(|e| anyhow::anyhow!("invalid log level: {}", e))?;

    let registry = tracing_subscriber::registry().with(filter);
    match format {
        LogFormat::Console => registry
            .with(fmt::layer().with_target(true).with_thread_ids(false))
            .init(),
        LogFormat::Json => registry.with(fmt::layer().json()).init(),
    }

    Ok(())
}
