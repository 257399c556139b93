//! Memopost server entry point

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use memopost::domain::config::AppConfig;
use memopost::http::{create_router, AppState};
use memopost::infrastructure::config::{env_config, load_file_config};
use memopost::infrastructure::{SmtpMailer, WhisperTranscriber};

/// Memopost - transcribe voice memos and email the result
#[derive(Parser, Debug)]
#[command(name = "memopost")]
#[command(version)]
#[command(about = "Voice memo transcription service that emails the result")]
struct Cli {
    /// Path to the config file (default: XDG config dir)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// HTTP bind address
    #[arg(long, value_name = "ADDR")]
    bind: Option<String>,

    /// HTTP port
    #[arg(short, long, value_name = "PORT")]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    // Layer config: defaults <- file <- environment <- CLI flags
    let file_config = load_file_config(cli.config.as_deref()).await?;
    let cli_config = AppConfig {
        bind: cli.bind,
        port: cli.port,
        ..AppConfig::empty()
    };
    let config = AppConfig::defaults()
        .merge(file_config)
        .merge(env_config()?)
        .merge(cli_config);

    // Secrets and sender identity are required up front, not at first use
    let api_key = config.require_api_key()?.to_string();
    let sender = config.require_sender()?.to_string();
    let smtp_password = config.require_smtp_password()?.to_string();

    let transcriber = WhisperTranscriber::with_model(api_key, config.model_or_default())
        .with_base_url(config.api_base_url_or_default());
    let mailer = SmtpMailer::new(
        config.smtp_host_or_default(),
        config.smtp_port_or_default(),
        sender,
        smtp_password,
    );

    let state = AppState::new(Box::new(transcriber), Box::new(mailer));
    let router = create_router(state);

    let addr = format!("{}:{}", config.bind_or_default(), config.port_or_default());
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;

    info!("Memopost listening on http://{}", addr);
    info!(
        "Transcription model: {}, SMTP server: {}:{}",
        config.model_or_default(),
        config.smtp_host_or_default(),
        config.smtp_port_or_default()
    );

    axum::serve(listener, router).await?;

    Ok(())
}
