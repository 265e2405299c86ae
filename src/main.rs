//! # Main Entry Point
//!
//! Initializes the bot: environment configuration, logging (rotating file +
//! stdout), the review API client, the Telegram notifier, and the poll loop.

mod api;
mod config;
mod error;
mod notify;
mod poller;
mod verdict;

use anyhow::{Context, Result};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::api::ReviewApi;
use crate::config::Config;
use crate::notify::TelegramNotifier;
use crate::poller::Poller;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Logging Setup
    if !std::path::Path::new("logs").exists() {
        std::fs::create_dir("logs").context("Failed to create logs directory")?;
    }

    // File sink rotates daily; the non-blocking guard must outlive the loop.
    let file_appender = tracing_appender::rolling::daily("logs", "statusbot.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,hyper=warn,reqwest=warn"));

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false);
    let console_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stdout);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(console_layer)
        .init();

    // 2. Load Configuration
    // A missing token is non-recoverable: log it and refuse to start.
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(err) => {
            tracing::error!("fatal: {err}");
            return Err(err).context("refusing to start with incomplete configuration");
        }
    };

    tracing::info!("Starting statusbot...");

    // 3. Collaborators
    let source = ReviewApi::new(&config, config::ENDPOINT)
        .context("Failed to build the review API client")?;
    let notifier =
        TelegramNotifier::new(&config).context("Failed to build the Telegram notifier")?;

    // 4. Poll Loop
    let checkpoint = chrono::Utc::now().timestamp();
    let mut poller = Poller::new(source, notifier, config.poll_interval, checkpoint);
    poller.run().await;

    Ok(())
}
