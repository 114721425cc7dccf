use crate::models::TokenDescriptor;

const DEXSCREENER_SITE_URL: &str = "https://dexscreener.com";

/// Selects descriptors that belong to one chain.
///
/// Upstream profiles do not always fill `chainId`, so the DexScreener page URL
/// (`https://dexscreener.com/{chain}/...`) is accepted as a second signal.
#[derive(Debug, Clone)]
pub struct ChainFilter {
    chain: String,
    url_prefix: String,
}

impl ChainFilter {
    pub fn new(chain: &str) -> Self {
        let chain = chain.trim().to_lowercase();
        Self {
            url_prefix: format!("{}/{}/", DEXSCREENER_SITE_URL, chain),
            chain,
        }
    }

    pub fn chain(&self) -> &str {
        &self.chain
    }

    pub fn is_target_chain(&self, descriptor: &TokenDescriptor) -> bool {
        let chain_matches = descriptor
            .chain_id
            .as_deref()
            .map(|id| id.eq_ignore_ascii_case(&self.chain))
            .unwrap_or(false);

        let url_matches = descriptor
            .url
            .as_deref()
            .map(|url| url.starts_with(&self.url_prefix))
            .unwrap_or(false);

        chain_matches || url_matches
    }
}
