//! Dex Paid Scanner
//!
//! Runs one pass over the latest DexScreener token profiles:
//! fetch listings -> chain filter -> ledger check -> payment check ->
//! pair detail -> alert -> record.
//!
//! A failing token is logged and skipped; only a failed listing fetch aborts
//! the pass.

use std::sync::Arc;
use tracing::{debug, error, info, warn};

use crate::error::AlertError;
use crate::models::TokenDescriptor;
use crate::monitor::chain_filter::ChainFilter;
use crate::monitor::detail::fetch_token_detail;
use crate::monitor::ledger::AlertLedger;
use crate::monitor::payment::PaymentChecker;
use crate::monitor::ports::{AlertSink, TokenDataSource};

/// Counts from a single pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PassReport {
    pub listed: usize,
    pub on_chain: usize,
    pub already_alerted: usize,
    pub unpaid: usize,
    pub notified: usize,
    pub failed: usize,
}

enum TokenOutcome {
    AlreadyAlerted,
    Unpaid,
    Notified,
}

pub struct Scanner {
    source: Arc<dyn TokenDataSource>,
    sink: Arc<dyn AlertSink>,
    ledger: Box<dyn AlertLedger>,
    filter: ChainFilter,
    payments: PaymentChecker,
}

impl Scanner {
    pub fn new(
        source: Arc<dyn TokenDataSource>,
        sink: Arc<dyn AlertSink>,
        ledger: Box<dyn AlertLedger>,
        filter: ChainFilter,
        payments: PaymentChecker,
    ) -> Self {
        Self {
            source,
            sink,
            ledger,
            filter,
            payments,
        }
    }

    pub fn ledger(&self) -> &dyn AlertLedger {
        self.ledger.as_ref()
    }

    /// Run a single pass. Errors only when the listing itself cannot be fetched.
    pub async fn run_pass(&mut self) -> Result<PassReport, AlertError> {
        debug!("🔍 Fetching latest token profiles...");

        let listings = self.source.fetch_latest_listings().await?;
        let mut report = PassReport {
            listed: listings.len(),
            ..PassReport::default()
        };

        let mut on_chain: Vec<TokenDescriptor> = Vec::new();
        for entry in listings {
            match entry {
                Ok(descriptor) if self.filter.is_target_chain(&descriptor) => on_chain.push(descriptor),
                Ok(_) => {}
                Err(e) => {
                    warn!("Skipping malformed listing row: {}", e);
                    report.failed += 1;
                }
            }
        }
        report.on_chain = on_chain.len();

        for descriptor in &on_chain {
            match self.process_token(descriptor).await {
                Ok(TokenOutcome::AlreadyAlerted) => report.already_alerted += 1,
                Ok(TokenOutcome::Unpaid) => report.unpaid += 1,
                Ok(TokenOutcome::Notified) => report.notified += 1,
                Err(e) => {
                    report.failed += 1;
                    match e {
                        AlertError::EmptyResult(_) => {
                            warn!("Skipping {}: {}", descriptor.token_address, e)
                        }
                        _ => error!("Failed to process {}: {}", descriptor.token_address, e),
                    }
                }
            }
        }

        info!(
            "📊 Pass done: {} listed, {} on {}, {} already alerted, {} unpaid, {} notified, {} failed",
            report.listed,
            report.on_chain,
            self.filter.chain(),
            report.already_alerted,
            report.unpaid,
            report.notified,
            report.failed
        );

        Ok(report)
    }

    async fn process_token(&mut self, descriptor: &TokenDescriptor) -> Result<TokenOutcome, AlertError> {
        let addr = descriptor.token_address.as_str();

        if self.ledger.contains(addr) {
            debug!("Skipping {} - already alerted", addr);
            return Ok(TokenOutcome::AlreadyAlerted);
        }

        if !self.payments.has_approved_payment(self.source.as_ref(), addr).await {
            debug!("{} has no approved Dex paid order", addr);
            return Ok(TokenOutcome::Unpaid);
        }

        let detail = fetch_token_detail(self.source.as_ref(), addr).await?;
        info!("💰 [DEX PAID] {} ({}) - {}", detail.name, detail.symbol, addr);

        self.sink.notify(&detail, descriptor).await?;
        self.ledger.record(addr);

        Ok(TokenOutcome::Notified)
    }
}
