// src/monitor/paid_monitor.rs
//
// Drives the scanner on a fixed timer: one pass at startup, then one per
// poll interval until stopped.

use anyhow::{anyhow, Result};
use std::sync::Arc;
use tokio::sync::{broadcast, RwLock};
use tokio::task::JoinHandle;
use tokio::time::{interval, Duration, MissedTickBehavior};
use tracing::{debug, error, info, warn};

use crate::monitor::scanner::Scanner;

// ============================================================================
// CONFIGURATION
// ============================================================================

#[derive(Debug, Clone)]
pub struct PaidMonitorConfig {
    /// Time between pass starts
    pub poll_interval: Duration,
}

impl Default for PaidMonitorConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_millis(crate::config::DEFAULT_POLL_INTERVAL_MS),
        }
    }
}

// ============================================================================
// DEX PAID MONITOR
// ============================================================================

/// Runs passes strictly one after another. A pass that outlasts the poll
/// interval delays the next one; missed ticks are dropped, never queued.
pub struct PaidMonitor {
    config: PaidMonitorConfig,
    /// Running flag
    running: Arc<RwLock<bool>>,
    /// Shutdown signal
    shutdown_tx: broadcast::Sender<()>,
}

impl PaidMonitor {
    pub fn new(config: PaidMonitorConfig) -> Self {
        let (shutdown_tx, _) = broadcast::channel(1);

        Self {
            config,
            running: Arc::new(RwLock::new(false)),
            shutdown_tx,
        }
    }

    /// Start polling. The scanner (and its ledger) moves into the polling task.
    pub async fn start(&self, mut scanner: Scanner) -> Result<JoinHandle<()>> {
        let mut running = self.running.write().await;
        if *running {
            return Err(anyhow!("Dex paid monitor is already running"));
        }
        *running = true;
        drop(running);

        info!("👀 Starting Dex paid monitor...");
        info!("📊 Poll interval: {} ms", self.config.poll_interval.as_millis());

        let poll_interval = self.config.poll_interval;
        let running = self.running.clone();
        let mut shutdown_rx = self.shutdown_tx.subscribe();

        let handle = tokio::spawn(async move {
            let mut poll_timer = interval(poll_interval);
            poll_timer.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                tokio::select! {
                    biased;

                    _ = shutdown_rx.recv() => {
                        info!("Dex paid monitor received shutdown signal");
                        break;
                    }

                    _ = poll_timer.tick() => {
                        match scanner.run_pass().await {
                            Ok(_) => {}
                            Err(e) if e.is_fetch() => {
                                warn!("Pass aborted, listing endpoint refused: {}", e);
                            }
                            Err(e) => {
                                error!("Pass aborted, could not fetch listings: {}", e);
                            }
                        }
                    }
                }
            }

            *running.write().await = false;
            info!("Dex paid monitor stopped ({} tokens alerted)", scanner.ledger().len());
        });

        Ok(handle)
    }

    /// Ask the polling task to stop after its current pass.
    pub async fn stop(&self) -> Result<()> {
        if !self.is_running().await {
            debug!("Dex paid monitor is not running");
            return Ok(());
        }

        info!("Stopping Dex paid monitor...");
        let _ = self.shutdown_tx.send(());
        Ok(())
    }

    /// Check if the monitor is running.
    pub async fn is_running(&self) -> bool {
        *self.running.read().await
    }
}

// ============================================================================
// TESTS
// ============================================================================
