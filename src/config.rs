use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

use crate::monitor::payment::PaymentPolicy;

pub const DEFAULT_DEXSCREENER_API_URL: &str = "https://api.dexscreener.com";
pub const DEFAULT_TARGET_CHAIN: &str = "solana";
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 60_000;
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 20;

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Config {
    pub discord_webhook_url: String, // Secret, never log in full
    pub dexscreener_api_url: String,
    pub target_chain: String,

    pub poll_interval_ms: u64,
    pub http_timeout_secs: u64,

    // None keeps the "ever approved" behaviour
    pub payment_window_minutes: Option<i64>,
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the config from any key lookup (the process environment in `load`).
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let discord_webhook_url = lookup("DISCORD_WEBHOOK_URL")
            .filter(|v| !v.trim().is_empty())
            .context("DISCORD_WEBHOOK_URL not set in environment")?;

        let poll_interval_ms = match lookup("POLL_INTERVAL_MS") {
            Some(v) => v
                .trim()
                .parse::<u64>()
                .context("Failed to parse POLL_INTERVAL_MS")?,
            None => DEFAULT_POLL_INTERVAL_MS,
        };
        if poll_interval_ms == 0 {
            bail!("POLL_INTERVAL_MS must be greater than zero");
        }

        let http_timeout_secs = match lookup("HTTP_TIMEOUT_SECS") {
            Some(v) => v
                .trim()
                .parse::<u64>()
                .context("Failed to parse HTTP_TIMEOUT_SECS")?,
            None => DEFAULT_HTTP_TIMEOUT_SECS,
        };

        let payment_window_minutes = match lookup("PAYMENT_WINDOW_MINUTES") {
            Some(v) if !v.trim().is_empty() => {
                let minutes = v
                    .trim()
                    .parse::<i64>()
                    .context("Failed to parse PAYMENT_WINDOW_MINUTES")?;
                if minutes <= 0 {
                    bail!("PAYMENT_WINDOW_MINUTES must be positive");
                }
                if chrono::Duration::try_minutes(minutes).is_none() {
                    bail!("PAYMENT_WINDOW_MINUTES is too large: {}", minutes);
                }
                Some(minutes)
            }
            _ => None,
        };

        Ok(Self {
            discord_webhook_url: discord_webhook_url.trim().to_string(),
            dexscreener_api_url: lookup("DEXSCREENER_API_URL")
                .map(|v| v.trim().trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_DEXSCREENER_API_URL.to_string()),
            target_chain: lookup("TARGET_CHAIN")
                .map(|v| v.trim().to_lowercase())
                .unwrap_or_else(|| DEFAULT_TARGET_CHAIN.to_string()),
            poll_interval_ms,
            http_timeout_secs,
            payment_window_minutes,
        })
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }

    pub fn payment_policy(&self) -> PaymentPolicy {
        match self.payment_window_minutes {
            Some(minutes) => PaymentPolicy::ApprovedWithin(
                chrono::Duration::try_minutes(minutes).unwrap_or(chrono::Duration::MAX),
            ),
            None => PaymentPolicy::AnyApproved,
        }
    }
}
