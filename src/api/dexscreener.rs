//! DexScreener API Client
//!
//! Public endpoints used to spot Dex paid tokens:
//! - /token-profiles/latest/v1 - Latest token profiles (all chains)
//! - /orders/v1/{chain}/{address} - Paid orders for a token
//! - /token-pairs/v1/{chain}/{address} - Trading pairs for a token

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

use crate::error::AlertError;
use crate::models::Order;
use crate::monitor::ports::{ListingEntry, TokenDataSource};

#[derive(Debug, Clone)]
pub struct DexScreenerClient {
    base_url: String,
    chain: String,
    client: Client,
}

impl DexScreenerClient {
    pub fn new(base_url: &str, chain: &str, timeout: Duration) -> Result<Self, AlertError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            chain: chain.to_string(),
            client,
        })
    }

    pub fn chain(&self) -> &str {
        &self.chain
    }

    /// GET a JSON document, failing on non-success status or an unexpected shape.
    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, AlertError> {
        debug!("GET {}", url);

        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            warn!("DexScreener API error for {}: {} - {}", url, status, body);
            return Err(AlertError::Fetch {
                status: status.as_u16(),
                body: if body.is_empty() {
                    status.canonical_reason().unwrap_or("Unknown error").to_string()
                } else {
                    body
                },
            });
        }

        let text = response.text().await?;
        serde_json::from_str(&text)
            .map_err(|e| AlertError::Mapping(format!("unexpected response from {}: {}", url, e)))
    }
}

/// Parse each array element on its own so one bad row does not sink the rest.
fn parse_each<T: DeserializeOwned>(items: Vec<Value>, what: &str) -> Vec<Result<T, AlertError>> {
    items
        .into_iter()
        .enumerate()
        .map(|(i, item)| {
            serde_json::from_value(item)
                .map_err(|e| AlertError::Mapping(format!("malformed {} at index {}: {}", what, i, e)))
        })
        .collect()
}

#[async_trait]
impl TokenDataSource for DexScreenerClient {
    async fn fetch_latest_listings(&self) -> Result<Vec<ListingEntry>, AlertError> {
        let url = format!("{}/token-profiles/latest/v1", self.base_url);
        let rows: Vec<Value> = self.get_json(&url).await?;
        debug!("Fetched {} latest token profiles", rows.len());
        Ok(parse_each(rows, "token profile"))
    }

    async fn fetch_orders(&self, token_address: &str) -> Result<Vec<Order>, AlertError> {
        let url = format!("{}/orders/v1/{}/{}", self.base_url, self.chain, token_address);
        let rows: Vec<Value> = self.get_json(&url).await?;

        let orders = parse_each::<Order>(rows, "order")
            .into_iter()
            .filter_map(|parsed| match parsed {
                Ok(order) => Some(order),
                Err(e) => {
                    warn!("Ignoring order for {}: {}", token_address, e);
                    None
                }
            })
            .collect();
        Ok(orders)
    }

    async fn fetch_pairs(&self, token_address: &str) -> Result<Vec<Value>, AlertError> {
        let url = format!("{}/token-pairs/v1/{}/{}", self.base_url, self.chain, token_address);
        let pairs: Vec<Value> = self.get_json(&url).await?;
        debug!("Fetched {} pairs for {}", pairs.len(), token_address);
        Ok(pairs)
    }
}
