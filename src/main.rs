//! optidemon - generate tests, optimize and benchmark code from the terminal
//!
//! This is the binary entry point. All logic lives in the library crates.

use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::WrapErr;

use optidemon_app::config::{resolve_settings, SettingsOverrides};
use optidemon_client::HttpRemoteService;
use optidemon_core::logging;

/// optidemon - generate tests, optimize and benchmark code from the terminal
#[derive(Parser, Debug)]
#[command(name = "optidemon", version)]
#[command(about = "Generate tests, optimizations and benchmarks for a piece of code", long_about = None)]
struct Args {
    /// Source file to load into the editor
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    /// Backend base URL (overrides config and OPTIDEMON_ENDPOINT)
    #[arg(long, value_name = "URL")]
    endpoint: Option<String>,

    /// Config file to use instead of the default location
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Per-stage timeout in seconds, 0 disables
    #[arg(long, value_name = "SECS")]
    timeout: Option<u64>,

    /// Run FILE through the pipeline once and print NDJSON events
    #[arg(long, requires = "file")]
    headless: bool,
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let args = Args::parse();

    if let Err(e) = logging::init() {
        eprintln!("Warning: logging disabled: {}", e);
    }

    let overrides = SettingsOverrides {
        endpoint: args.endpoint.clone(),
        stage_timeout_secs: args.timeout,
    };
    let loaded = resolve_settings(args.config.as_deref(), &overrides);

    let service = HttpRemoteService::new(
        &loaded.settings.service.base_url,
        loaded.settings.service.connect_timeout(),
    )?;

    let source = match &args.file {
        Some(path) => Some(
            std::fs::read_to_string(path)
                .wrap_err_with(|| format!("Failed to read {}", path.display()))?,
        ),
        None => None,
    };

    if args.headless {
        // `requires = "file"` guarantees a source here
        let source = source.unwrap_or_default();
        let outcome = optidemon::run_headless(service, loaded, source).await?;
        if !outcome.is_success() {
            std::process::exit(1);
        }
        return Ok(());
    }

    optidemon::run_with_source(service, loaded, source).await?;
    Ok(())
}
