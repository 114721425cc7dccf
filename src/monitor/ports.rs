//! Seams between the scanner and the outside world.
//!
//! The DexScreener client and the Discord notifier implement these in
//! production; scanner tests swap in recording fakes.

use async_trait::async_trait;
use serde_json::Value;

use crate::error::AlertError;
use crate::models::{Order, TokenDescriptor, TokenDetail};

/// One row of the listing: a descriptor, or the reason it could not be read.
pub type ListingEntry = Result<TokenDescriptor, AlertError>;

/// Upstream token data for the configured chain.
#[async_trait]
pub trait TokenDataSource: Send + Sync {
    /// Latest token profiles, all chains. `Err` only when the listing itself
    /// is unavailable; malformed rows come back as `Err` entries.
    async fn fetch_latest_listings(&self) -> Result<Vec<ListingEntry>, AlertError>;

    /// Paid orders registered for a token. Malformed orders are dropped.
    async fn fetch_orders(&self, token_address: &str) -> Result<Vec<Order>, AlertError>;

    /// Raw trading pairs for a token, in upstream order. Callers validate
    /// only the rows they use.
    async fn fetch_pairs(&self, token_address: &str) -> Result<Vec<Value>, AlertError>;
}

/// Where alerts are delivered.
#[async_trait]
pub trait AlertSink: Send + Sync {
    /// Deliver one alert. Non-success responses are logged by the sink and are
    /// not errors; `Err` means the alert could not be sent at all.
    async fn notify(&self, detail: &TokenDetail, descriptor: &TokenDescriptor) -> Result<(), AlertError>;
}
