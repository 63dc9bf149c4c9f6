//! Checkout Config

use std::time::Duration;

use clap::{ArgAction, Args};
use halalchain_app::domain::checkout::CheckoutConfig;

/// Checkout settings.
#[derive(Debug, Args)]
pub struct CheckoutSettings {
    /// Upper bound on one checkout attempt, in milliseconds.
    #[arg(long, env = "CHECKOUT_TIMEOUT_MS", default_value_t = 5_000_u64)]
    pub checkout_timeout_ms: u64,

    /// Retry a checkout once when it fails on lock contention or a timeout.
    #[arg(
        long,
        env = "CHECKOUT_RETRY_TRANSIENT",
        action = ArgAction::Set,
        default_value_t = true
    )]
    pub checkout_retry_transient: bool,
}

impl CheckoutSettings {
    #[must_use]
    pub fn to_checkout_config(&self) -> CheckoutConfig {
        CheckoutConfig {
            timeout: Duration::from_millis(self.checkout_timeout_ms),
            retry_transient: self.checkout_retry_transient,
        }
    }
}
