use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use tracing::info;

use crate::api::discord::{DiscordWebhookClient, Embed, EmbedField, EmbedFooter, EmbedImage, WebhookPayload};
use crate::error::AlertError;
use crate::models::{TokenDescriptor, TokenDetail};
use crate::monitor::ports::AlertSink;

pub const ALERT_TITLE: &str = "Dex Paid Detected";

/// Sends Dex paid alerts to a Discord webhook
pub struct NotificationManager {
    webhook: DiscordWebhookClient,
}

impl NotificationManager {
    /// Create a new notification manager
    pub fn new(webhook: DiscordWebhookClient) -> Self {
        Self { webhook }
    }
}

#[async_trait]
impl AlertSink for NotificationManager {
    async fn notify(&self, detail: &TokenDetail, descriptor: &TokenDescriptor) -> Result<(), AlertError> {
        let payload = WebhookPayload {
            embeds: vec![build_alert_embed(detail, descriptor, Utc::now())],
        };

        if self.webhook.execute(&payload).await? {
            info!(
                "Alert sent for {} ({}) - {}",
                detail.name, detail.symbol, descriptor.token_address
            );
        }

        Ok(())
    }
}

/// Build the alert embed for a token. `sent_at` becomes the embed timestamp.
pub fn build_alert_embed(detail: &TokenDetail, descriptor: &TokenDescriptor, sent_at: DateTime<Utc>) -> Embed {
    let thumbnail = detail
        .image_url
        .clone()
        .or_else(|| descriptor.icon.clone())
        .map(|url| EmbedImage { url });

    let mut fields = vec![
        EmbedField {
            name: "Market Cap".to_string(),
            value: format_market_cap(detail.market_cap),
            inline: true,
        },
        EmbedField {
            name: "M5 Buys / Sells".to_string(),
            value: format!("{} / {}", detail.m5_buys, detail.m5_sells),
            inline: true,
        },
        EmbedField {
            name: "M5 Price Change".to_string(),
            value: format_price_change(detail.m5_price_change),
            inline: true,
        },
    ];

    if let Some(links) = format_social_links(descriptor) {
        fields.push(EmbedField {
            name: "Links".to_string(),
            value: links,
            inline: false,
        });
    }

    Embed {
        title: ALERT_TITLE.to_string(),
        description: format!("**{}** ({})", detail.name, detail.symbol),
        url: descriptor.url.clone(),
        thumbnail,
        fields,
        footer: EmbedFooter {
            text: descriptor.token_address.clone(),
        },
        timestamp: sent_at.to_rfc3339_opts(SecondsFormat::Millis, true),
    }
}

/// `$1,234.5` style, or `N/A` when the market cap is zero or unusable.
pub fn format_market_cap(market_cap: f64) -> String {
    if market_cap == 0.0 || !market_cap.is_finite() {
        return "N/A".to_string();
    }

    let cents = (market_cap.abs() * 100.0).round() as u128;
    let whole = group_thousands(cents / 100);
    let frac = cents % 100;
    let sign = if market_cap < 0.0 { "-" } else { "" };

    match frac {
        0 => format!("{}${}", sign, whole),
        f if f % 10 == 0 => format!("{}${}.{}", sign, whole, f / 10),
        f => format!("{}${}.{:02}", sign, whole, f),
    }
}

pub fn format_price_change(change: Option<f64>) -> String {
    match change {
        Some(c) if c.is_finite() => format!("{:.2}%", c),
        _ => "N/A".to_string(),
    }
}

fn group_thousands(value: u128) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

fn format_social_links(descriptor: &TokenDescriptor) -> Option<String> {
    let links: Vec<String> = [("twitter", "Twitter"), ("telegram", "Telegram")]
        .iter()
        .filter_map(|(kind, label)| {
            descriptor
                .link_of_type(kind)
                .map(|link| format!("[{}]({})", label, link.url))
        })
        .collect();

    if links.is_empty() {
        None
    } else {
        Some(links.join(" | "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::token::TokenLink;
    use chrono::TimeZone;

    fn foo_detail() -> TokenDetail {
        TokenDetail {
            name: "Foo".to_string(),
            symbol: "FOO".to_string(),
            image_url: Some("http://x/i.png".to_string()),
            market_cap: 1000.0,
            m5_buys: 5,
            m5_sells: 2,
            m5_price_change: Some(12.345),
        }
    }

    fn foo_descriptor() -> TokenDescriptor {
        TokenDescriptor {
            url: Some("https://dexscreener.com/solana/mint111".to_string()),
            chain_id: Some("solana".to_string()),
            token_address: "Mint111".to_string(),
            icon: Some("https://cdn/icon.png".to_string()),
            header: None,
            open_graph: None,
            description: None,
            links: vec![],
        }
    }

    fn field<'a>(embed: &'a Embed, name: &str) -> &'a EmbedField {
        embed.fields.iter().find(|f| f.name == name).unwrap()
    }

    #[test]
    fn test_embed_fields() {
        let sent_at = Utc.with_ymd_and_hms(2026, 10, 16, 12, 0, 0).unwrap();
        let embed = build_alert_embed(&foo_detail(), &foo_descriptor(), sent_at);

        assert_eq!(embed.title, "Dex Paid Detected");
        assert_eq!(embed.description, "**Foo** (FOO)");
        assert_eq!(embed.thumbnail.as_ref().unwrap().url, "http://x/i.png");
        assert_eq!(embed.footer.text, "Mint111");
        assert_eq!(embed.timestamp, "2026-10-16T12:00:00.000Z");
        assert_eq!(embed.url.as_deref(), Some("https://dexscreener.com/solana/mint111"));

        assert_eq!(embed.fields.len(), 3);
        assert!(embed.fields.iter().all(|f| f.inline));
        assert_eq!(field(&embed, "Market Cap").value, "$1,000");
        assert_eq!(field(&embed, "M5 Buys / Sells").value, "5 / 2");
        assert_eq!(field(&embed, "M5 Price Change").value, "12.35%");
    }

    #[test]
    fn test_thumbnail_falls_back_to_icon() {
        let mut detail = foo_detail();
        detail.image_url = None;
        let embed = build_alert_embed(&detail, &foo_descriptor(), Utc::now());
        assert_eq!(embed.thumbnail.unwrap().url, "https://cdn/icon.png");

        let mut descriptor = foo_descriptor();
        descriptor.icon = None;
        let embed = build_alert_embed(&detail, &descriptor, Utc::now());
        assert!(embed.thumbnail.is_none());
    }

    #[test]
    fn test_links_field() {
        let mut descriptor = foo_descriptor();
        descriptor.links = vec![
            TokenLink {
                link_type: None,
                label: Some("Website".to_string()),
                url: "https://foo.xyz".to_string(),
            },
            TokenLink {
                link_type: Some("telegram".to_string()),
                label: None,
                url: "https://t.me/foo".to_string(),
            },
        ];

        let embed = build_alert_embed(&foo_detail(), &descriptor, Utc::now());
        let links = field(&embed, "Links");
        assert!(!links.inline);
        assert_eq!(links.value, "[Telegram](https://t.me/foo)");
    }

    #[test]
    fn test_format_market_cap() {
        assert_eq!(format_market_cap(0.0), "N/A");
        assert_eq!(format_market_cap(f64::NAN), "N/A");
        assert_eq!(format_market_cap(1000.0), "$1,000");
        assert_eq!(format_market_cap(999.0), "$999");
        assert_eq!(format_market_cap(1_234_567.891), "$1,234,567.89");
        assert_eq!(format_market_cap(42.5), "$42.5");
    }

    #[test]
    fn test_format_price_change() {
        assert_eq!(format_price_change(Some(12.345)), "12.35%");
        assert_eq!(format_price_change(Some(-3.0)), "-3.00%");
        assert_eq!(format_price_change(Some(0.0)), "0.00%");
        assert_eq!(format_price_change(None), "N/A");
    }
}
