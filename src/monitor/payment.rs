use chrono::{DateTime, Duration, TimeZone, Utc};
use tracing::{debug, warn};

use crate::models::Order;
use crate::monitor::ports::TokenDataSource;

/// Which approved orders count as "Dex paid".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentPolicy {
    /// Any approved order, however old.
    AnyApproved,
    /// Only orders approved with a payment inside the window before now.
    ApprovedWithin(Duration),
}

impl Default for PaymentPolicy {
    fn default() -> Self {
        PaymentPolicy::AnyApproved
    }
}

impl PaymentPolicy {
    pub fn accepts(&self, order: &Order, now: DateTime<Utc>) -> bool {
        if !order.is_approved() {
            return false;
        }

        match self {
            PaymentPolicy::AnyApproved => true,
            PaymentPolicy::ApprovedWithin(window) => {
                let paid_at = match order
                    .payment_timestamp
                    .and_then(|ms| Utc.timestamp_millis_opt(ms).single())
                {
                    Some(t) => t,
                    None => return false,
                };
                paid_at <= now && now.signed_duration_since(paid_at) <= *window
            }
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct PaymentChecker {
    policy: PaymentPolicy,
}

impl PaymentChecker {
    pub fn new(policy: PaymentPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> PaymentPolicy {
        self.policy
    }

    /// Whether the token has an approved Dex paid order.
    ///
    /// Lookup failures count as "not paid": a missed alert can be sent on a
    /// later pass, a wrong one cannot be taken back.
    pub async fn has_approved_payment(&self, source: &dyn TokenDataSource, token_address: &str) -> bool {
        match source.fetch_orders(token_address).await {
            Ok(orders) => {
                let now = Utc::now();
                let paid = orders.iter().any(|o| self.policy.accepts(o, now));
                debug!(
                    "{}: {} orders, approved under {:?}: {}",
                    token_address,
                    orders.len(),
                    self.policy,
                    paid
                );
                paid
            }
            Err(e) => {
                warn!("Could not check orders for {}: {}; treating as unpaid", token_address, e);
                false
            }
        }
    }
}
