use tracing::debug;

use crate::error::AlertError;
use crate::models::{PairRecord, TokenDetail};
use crate::monitor::ports::TokenDataSource;

/// Detail for a token from the first pair DexScreener returns.
///
/// The first pair is not necessarily the most liquid one. Later pairs are
/// never parsed, so a malformed one cannot block the alert.
pub async fn fetch_token_detail(source: &dyn TokenDataSource, token_address: &str) -> Result<TokenDetail, AlertError> {
    let pairs = source.fetch_pairs(token_address).await?;

    let first = pairs
        .into_iter()
        .next()
        .ok_or_else(|| AlertError::EmptyResult(token_address.to_string()))?;

    let pair: PairRecord = serde_json::from_value(first)
        .map_err(|e| AlertError::Mapping(format!("malformed first pair for {}: {}", token_address, e)))?;

    debug!(
        "Using pair {} on {} for {}",
        pair.pair_address.as_deref().unwrap_or("?"),
        pair.dex_id.as_deref().unwrap_or("?"),
        token_address
    );

    TokenDetail::try_from(pair)
}
