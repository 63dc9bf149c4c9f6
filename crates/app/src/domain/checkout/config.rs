//! Checkout Config

use std::time::Duration;

/// How long one checkout attempt may take before it is rolled back.
pub const DEFAULT_CHECKOUT_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckoutConfig {
    /// Deadline for a single attempt, from acquiring a connection to commit.
    pub timeout: Duration,

    /// Retry once when an attempt fails for a transient reason.
    pub retry_transient: bool,
}

impl Default for CheckoutConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_CHECKOUT_TIMEOUT,
            retry_transient: true,
        }
    }
}
