pub mod chain_filter;
pub mod detail;
pub mod ledger;
pub mod paid_monitor;
pub mod payment;
pub mod ports;
pub mod scanner;
