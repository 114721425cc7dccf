//! Discord webhook client
//!
//! Posts embed messages to a single webhook. The webhook URL carries its own
//! token, so it is treated as a secret and only ever logged redacted.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

use crate::error::AlertError;

// --- Payload Structs ---

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WebhookPayload {
    pub embeds: Vec<Embed>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Embed {
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<EmbedImage>,
    pub fields: Vec<EmbedField>,
    pub footer: EmbedFooter,
    pub timestamp: String, // ISO-8601
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EmbedImage {
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EmbedField {
    pub name: String,
    pub value: String,
    pub inline: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EmbedFooter {
    pub text: String,
}

// --- Webhook Client ---

#[derive(Debug, Clone)]
pub struct DiscordWebhookClient {
    webhook_url: String,
    client: Client,
}

impl DiscordWebhookClient {
    pub fn new(webhook_url: &str, timeout: Duration) -> Result<Self, AlertError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            webhook_url: webhook_url.to_string(),
            client,
        })
    }

    /// Webhook URL with its token path segment masked, safe for logs.
    pub fn redacted_url(&self) -> String {
        redact_webhook_url(&self.webhook_url)
    }

    /// POST the payload. Returns whether Discord accepted it; a rejected
    /// message is logged and is not an error.
    pub async fn execute(&self, payload: &WebhookPayload) -> Result<bool, AlertError> {
        let response = self.client.post(&self.webhook_url).json(payload).send().await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            warn!(
                "Discord webhook {} rejected message: {} - {}",
                self.redacted_url(),
                status,
                error_text
            );
            return Ok(false);
        }

        debug!("Discord webhook accepted message ({})", status);
        Ok(true)
    }
}

fn redact_webhook_url(url: &str) -> String {
    match url.rsplit_once('/') {
        Some((head, token)) if !token.is_empty() => format!("{}/***", head),
        _ => "***".to_string(),
    }
}
