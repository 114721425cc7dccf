use anyhow::{Context, Result};
use dotenv::dotenv;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

mod api;
mod bot;
mod config;
mod error;
mod models;
mod monitor;

use crate::api::dexscreener::DexScreenerClient;
use crate::api::discord::DiscordWebhookClient;
use crate::bot::notification::NotificationManager;
use crate::config::Config;
use crate::monitor::chain_filter::ChainFilter;
use crate::monitor::ledger::InMemoryLedger;
use crate::monitor::paid_monitor::{PaidMonitor, PaidMonitorConfig};
use crate::monitor::payment::PaymentChecker;
use crate::monitor::scanner::Scanner;

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenv().ok();

    // Initialize logging (RUST_LOG overrides the default level)
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = Config::load()?;
    info!("Configuration loaded successfully");

    let dexscreener = Arc::new(
        DexScreenerClient::new(&config.dexscreener_api_url, &config.target_chain, config.http_timeout())
            .context("Failed to create DexScreener client")?,
    );
    info!("DexScreener client initialized for chain {}", dexscreener.chain());

    let webhook = DiscordWebhookClient::new(&config.discord_webhook_url, config.http_timeout())
        .context("Failed to create Discord webhook client")?;
    info!("Discord webhook: {}", webhook.redacted_url());
    let notifier = Arc::new(NotificationManager::new(webhook));

    let payments = PaymentChecker::new(config.payment_policy());
    info!("Payment policy: {:?}", payments.policy());

    let scanner = Scanner::new(
        dexscreener,
        notifier,
        Box::new(InMemoryLedger::new()),
        ChainFilter::new(&config.target_chain),
        payments,
    );

    let monitor = PaidMonitor::new(PaidMonitorConfig {
        poll_interval: config.poll_interval(),
    });
    let handle = monitor.start(scanner).await?;

    tokio::signal::ctrl_c()
        .await
        .context("Failed to listen for Ctrl-C")?;
    info!("Ctrl-C received, finishing current pass...");

    monitor.stop().await?;
    handle.await.context("Monitor task panicked")?;

    Ok(())
}
