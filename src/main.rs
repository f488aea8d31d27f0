//! Traislate - Audio Translation Gateway
//!
//! Entry point: runs the gateway, submits a file through the resilient
//! client, or writes a default configuration.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{Level, info, warn};
use tracing_appender::{non_blocking, rolling};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use traislate::cli::{Args, Commands};
use traislate::client::audio::file_feedback;
use traislate::client::render::{detected_language_line, present};
use traislate::client::{HttpGatewayClient, Locale, ResilientClient, SessionContext};
use traislate::config::Config;
use traislate::env::load_env_file;
use traislate::server;

fn main() -> Result<()> {
    // The environment must be complete before any worker thread exists.
    let env_vars = load_env_file(Path::new(".env")).context("Failed to read .env")?;

    let args = Args::parse();
    setup_logging(args.verbose)?;
    if env_vars > 0 {
        info!("Loaded {} variables from .env", env_vars);
    }

    let mut config = Config::load(args.config.as_deref())?;
    config.apply_env_overrides();

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;

    runtime.block_on(run(args.command, config))
}

async fn run(command: Commands, mut config: Config) -> Result<()> {
    match command {
        Commands::Serve { port } => {
            if let Some(port) = port {
                config.server.port = port;
            }
            info!("Starting Traislate gateway");
            server::serve(&config).await?;
        }
        Commands::Submit {
            file,
            target,
            locale,
            endpoint,
        } => {
            if let Some(endpoint) = endpoint {
                config.client.endpoint = endpoint;
            }
            submit(config, file, target, locale).await?;
        }
        Commands::InitConfig { output } => {
            if output.exists() {
                warn!("Overwriting existing config file {}", output.display());
            }
            Config::default().save_to_file(&output)?;
            println!("Wrote default configuration to {}", output.display());
        }
    }
    Ok(())
}

async fn submit(
    config: Config,
    file: Option<PathBuf>,
    target: Option<String>,
    locale: Locale,
) -> Result<()> {
    let http = reqwest::Client::builder()
        .build()
        .context("Failed to build HTTP client")?;
    let gateway = HttpGatewayClient::new(http, config.client.endpoint.clone());
    info!("Submitting to {}", gateway.endpoint());
    let client = ResilientClient::new(Box::new(gateway), config.client);

    if let Some(path) = &file {
        if let Ok(meta) = tokio::fs::metadata(path).await {
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            println!("{}", file_feedback(&name, meta.len()));
        }
    }

    let ctx = SessionContext::new(locale);
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .context("Invalid spinner template")?,
    );
    spinner.set_message(traislate::client::UiStatus::Loading.message(locale));
    spinner.enable_steady_tick(Duration::from_millis(100));

    let outcome = client
        .submit(ctx, file.as_deref(), target.as_deref())
        .await;
    spinner.finish_and_clear();

    let ctx = outcome.context;
    println!("[{}] {}", ctx.last_status.tone().as_str(), ctx.status_message());
    match outcome.result {
        Some(result) => {
            println!();
            print!("{}", present(ctx.locale, &result));
        }
        None => {
            println!(
                "{}",
                detected_language_line(ctx.locale, ctx.last_detected_language.as_deref())
            );
        }
    }
    Ok(())
}

/// Setup logging to both console and file
fn setup_logging(verbose: bool) -> Result<()> {
    let log_dir = std::env::current_dir()?.join(".traislate").join("log");
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = rolling::daily(&log_dir, "traislate.log");
    let (non_blocking_file, guard) = non_blocking(file_appender);
    // Keep the guard alive for the duration of the program
    std::mem::forget(guard);

    let log_level = if verbose { Level::DEBUG } else { Level::INFO };

    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true);

    let file_layer = fmt::layer()
        .with_writer(non_blocking_file)
        .with_target(false)
        .with_thread_ids(true)
        .with_thread_names(true)
        .with_file(true)
        .with_line_number(true)
        .with_ansi(false);

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive(log_level.into()))
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    info!(
        "Logging initialized - console: {}, file: {}",
        log_level,
        log_dir.join("traislate.log").display()
    );
    Ok(())
}
