//! Alert Ledger
//!
//! Remembers which token addresses have already been alerted so a token is
//! announced at most once per process. Entries are never evicted.

use std::collections::HashSet;
use tracing::debug;

pub trait AlertLedger: Send {
    fn contains(&self, token_address: &str) -> bool;

    /// Record an alerted token. Returns false if it was already present.
    fn record(&mut self, token_address: &str) -> bool;

    fn len(&self) -> usize;

    #[cfg(test)]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// In-process ledger backed by a `HashSet`.
#[derive(Debug, Default, Clone)]
pub struct InMemoryLedger {
    alerted: HashSet<String>,
}

impl InMemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ledger pre-seeded with addresses that must never be alerted.
    #[cfg(test)]
    pub fn with_addresses<I, S>(addresses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            alerted: addresses.into_iter().map(Into::into).collect(),
        }
    }
}

impl AlertLedger for InMemoryLedger {
    fn contains(&self, token_address: &str) -> bool {
        self.alerted.contains(token_address)
    }

    fn record(&mut self, token_address: &str) -> bool {
        let inserted = self.alerted.insert(token_address.to_string());
        if inserted {
            debug!("Ledger now holds {} alerted tokens", self.alerted.len());
        }
        inserted
    }

    fn len(&self) -> usize {
        self.alerted.len()
    }
}
