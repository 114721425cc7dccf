use serde::{Deserialize, Serialize};

use crate::error::AlertError;

// ============================================================================
// Upstream records (as returned by DexScreener)
// ============================================================================

/// A token profile from the latest-profiles listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenDescriptor {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub chain_id: Option<String>,
    pub token_address: String,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub header: Option<String>,
    #[serde(default)]
    pub open_graph: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub links: Vec<TokenLink>,
}

impl TokenDescriptor {
    /// First link with the given type (e.g. "twitter", "telegram").
    pub fn link_of_type(&self, link_type: &str) -> Option<&TokenLink> {
        self.links
            .iter()
            .find(|l| l.link_type.as_deref() == Some(link_type))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenLink {
    #[serde(rename = "type", default)]
    pub link_type: Option<String>,
    #[serde(default)]
    pub label: Option<String>,
    pub url: String,
}

/// A paid order attached to a token (Dex paid, ads, boosts...).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(rename = "type", default)]
    pub order_type: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub payment_timestamp: Option<i64>, // Milliseconds since epoch
}

impl Order {
    pub fn is_approved(&self) -> bool {
        self.status.as_deref() == Some("approved")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PairRecord {
    #[serde(default)]
    pub chain_id: Option<String>,
    #[serde(default)]
    pub dex_id: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub pair_address: Option<String>,
    pub base_token: PairToken,
    #[serde(default)]
    pub quote_token: Option<PairToken>,
    #[serde(default)]
    pub txns: Option<PairTxns>,
    #[serde(default)]
    pub price_change: Option<PriceChange>,
    #[serde(default)]
    pub market_cap: Option<f64>,
    #[serde(default)]
    pub info: Option<PairInfo>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PairToken {
    pub address: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub symbol: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PairTxns {
    #[serde(default)]
    pub m5: Option<TxnCounts>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TxnCounts {
    pub buys: u64,
    pub sells: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceChange {
    #[serde(default)]
    pub m5: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PairInfo {
    #[serde(default)]
    pub image_url: Option<String>,
}

// ============================================================================
// Normalized detail
// ============================================================================

/// What the alert shows about a token, taken from its first trading pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenDetail {
    pub name: String,
    pub symbol: String,
    pub image_url: Option<String>,
    pub market_cap: f64,
    pub m5_buys: u64,
    pub m5_sells: u64,
    pub m5_price_change: Option<f64>,
}

impl TryFrom<PairRecord> for TokenDetail {
    type Error = AlertError;

    fn try_from(pair: PairRecord) -> Result<Self, Self::Error> {
        let token = &pair.base_token.address;

        let name = pair
            .base_token
            .name
            .clone()
            .filter(|n| !n.is_empty())
            .ok_or_else(|| AlertError::Mapping(format!("pair for {} has no base token name", token)))?;
        let symbol = pair
            .base_token
            .symbol
            .clone()
            .filter(|s| !s.is_empty())
            .ok_or_else(|| AlertError::Mapping(format!("pair for {} has no base token symbol", token)))?;
        let m5 = pair
            .txns
            .as_ref()
            .and_then(|t| t.m5)
            .ok_or_else(|| AlertError::Mapping(format!("pair for {} has no m5 transaction counts", token)))?;

        let market_cap = pair.market_cap.unwrap_or(0.0);
        if !market_cap.is_finite() {
            return Err(AlertError::Mapping(format!("pair for {} has a non-finite market cap", token)));
        }

        Ok(Self {
            name,
            symbol,
            image_url: pair.info.and_then(|i| i.image_url),
            market_cap,
            m5_buys: m5.buys,
            m5_sells: m5.sells,
            m5_price_change: pair.price_change.and_then(|p| p.m5),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAIR_JSON: &str = r#"{
        "chainId": "solana",
        "dexId": "raydium",
        "url": "https://dexscreener.com/solana/pair111",
        "pairAddress": "pair111",
        "baseToken": { "address": "Mint111", "name": "Foo", "symbol": "FOO" },
        "quoteToken": { "address": "So11111111111111111111111111111111111111112", "name": "Wrapped SOL", "symbol": "SOL" },
        "txns": { "m5": { "buys": 5, "sells": 2 }, "h1": { "buys": 40, "sells": 12 } },
        "priceChange": { "m5": 12.345, "h1": -3.1 },
        "marketCap": 1000,
        "info": { "imageUrl": "http://x/i.png", "websites": [] }
    }"#;

    #[test]
    fn test_pair_maps_to_detail() {
        let pair: PairRecord = serde_json::from_str(PAIR_JSON).unwrap();
        let detail = TokenDetail::try_from(pair).unwrap();

        assert_eq!(
            detail,
            TokenDetail {
                name: "Foo".to_string(),
                symbol: "FOO".to_string(),
                image_url: Some("http://x/i.png".to_string()),
                market_cap: 1000.0,
                m5_buys: 5,
                m5_sells: 2,
                m5_price_change: Some(12.345),
            }
        );
    }

    #[test]
    fn test_missing_m5_txns_is_mapping_error() {
        let json = r#"{
            "baseToken": { "address": "Mint111", "name": "Foo", "symbol": "FOO" },
            "txns": { "h1": { "buys": 1, "sells": 1 } }
        }"#;
        let pair: PairRecord = serde_json::from_str(json).unwrap();
        let err = TokenDetail::try_from(pair).unwrap_err();
        assert!(matches!(err, AlertError::Mapping(_)));
    }

    #[test]
    fn test_missing_name_is_mapping_error() {
        let json = r#"{
            "baseToken": { "address": "Mint111", "symbol": "FOO" },
            "txns": { "m5": { "buys": 1, "sells": 0 } }
        }"#;
        let pair: PairRecord = serde_json::from_str(json).unwrap();
        assert!(matches!(TokenDetail::try_from(pair), Err(AlertError::Mapping(_))));
    }

    #[test]
    fn test_optional_fields_default() {
        let json = r#"{
            "baseToken": { "address": "Mint111", "name": "Foo", "symbol": "FOO" },
            "txns": { "m5": { "buys": 0, "sells": 0 } }
        }"#;
        let pair: PairRecord = serde_json::from_str(json).unwrap();
        let detail = TokenDetail::try_from(pair).unwrap();
        assert_eq!(detail.market_cap, 0.0);
        assert!(detail.image_url.is_none());
        assert!(detail.m5_price_change.is_none());
    }

    #[test]
    fn test_descriptor_parsing() {
        let json = r#"{
            "url": "https://dexscreener.com/solana/mint111",
            "chainId": "solana",
            "tokenAddress": "Mint111",
            "icon": "https://cdn/icon.png",
            "description": "a token",
            "links": [
                { "label": "Website", "url": "https://foo.xyz" },
                { "type": "twitter", "url": "https://x.com/foo" }
            ]
        }"#;

        let descriptor: TokenDescriptor = serde_json::from_str(json).unwrap();
        assert_eq!(descriptor.token_address, "Mint111");
        assert_eq!(descriptor.links.len(), 2);
        assert!(descriptor.links[0].link_type.is_none());
        assert_eq!(
            descriptor.link_of_type("twitter").map(|l| l.url.as_str()),
            Some("https://x.com/foo")
        );
        assert!(descriptor.link_of_type("telegram").is_none());
    }

    #[test]
    fn test_order_status() {
        let approved: Order =
            serde_json::from_str(r#"{"type":"tokenProfile","status":"approved","paymentTimestamp":1700000000000}"#)
                .unwrap();
        let pending: Order = serde_json::from_str(r#"{"type":"tokenProfile","status":"pending"}"#).unwrap();
        let shouting: Order = serde_json::from_str(r#"{"status":"APPROVED"}"#).unwrap();
        let no_status: Order = serde_json::from_str(r#"{"type":"x"}"#).unwrap();

        assert!(approved.is_approved());
        assert!(!pending.is_approved());
        assert!(!shouting.is_approved());
        assert!(!no_status.is_approved());
        assert_eq!(approved.payment_timestamp, Some(1_700_000_000_000));
    }
}
