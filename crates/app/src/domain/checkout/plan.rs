//! Checkout planning and phase tracking.

use std::fmt::{Display, Formatter, Result as FmtResult};

use jiff::Timestamp;
use rustc_hash::FxHashMap;
use tracing::{debug, info, warn};

use crate::domain::{
    carts::records::CartLineRecord,
    checkout::errors::CheckoutServiceError,
    inventory::StockLevel,
    orders::records::{OrderItemRecord, OrderItemUuid, OrderRecord, OrderStatus, OrderUuid},
    pricing::{line_total, sum_totals},
    products::records::ProductUuid,
    users::UserUuid,
};

/// Where a checkout attempt has got to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckoutPhase {
    Validating,
    Reserving,
    Committing,
    Done,
    Failed,
}

impl CheckoutPhase {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Validating => "validating",
            Self::Reserving => "reserving",
            Self::Committing => "committing",
            Self::Done => "done",
            Self::Failed => "failed",
        }
    }
}

impl Display for CheckoutPhase {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

/// Follows one checkout attempt through its phases, logging each transition.
#[derive(Debug)]
pub struct CheckoutTrace {
    user: UserUuid,
    attempt: u32,
    phase: CheckoutPhase,
}

impl CheckoutTrace {
    pub(crate) fn start(user: UserUuid, attempt: u32) -> Self {
        debug!(%user, attempt, checkout.phase = %CheckoutPhase::Validating, "checkout started");

        Self {
            user,
            attempt,
            phase: CheckoutPhase::Validating,
        }
    }

    #[must_use]
    pub fn phase(&self) -> CheckoutPhase {
        self.phase
    }

    pub(crate) fn advance(&mut self, phase: CheckoutPhase) {
        debug!(
            user = %self.user,
            attempt = self.attempt,
            from = %self.phase,
            checkout.phase = %phase,
            "checkout phase changed"
        );

        self.phase = phase;
    }

    pub(crate) fn done(&mut self, order: &OrderRecord) {
        info!(
            user = %self.user,
            attempt = self.attempt,
            order = %order.uuid,
            items = order.items.len(),
            subtotal = %order.subtotal,
            checkout.phase = %CheckoutPhase::Done,
            "checkout committed"
        );

        self.phase = CheckoutPhase::Done;
    }

    pub(crate) fn failed(&mut self, error: &CheckoutServiceError) {
        warn!(
            user = %self.user,
            attempt = self.attempt,
            at = %self.phase,
            %error,
            checkout.phase = %CheckoutPhase::Failed,
            "checkout rolled back"
        );

        self.phase = CheckoutPhase::Failed;
    }
}

/// Validate the cart against fresh stock readings and build the order it becomes.
///
/// `lines` must be in the order items should appear; `levels` must have been
/// read inside the same atomic scope that will apply the plan. The first line
/// that cannot be covered aborts the whole plan.
pub(crate) fn plan_checkout(
    user: UserUuid,
    lines: &[CartLineRecord],
    levels: &FxHashMap<ProductUuid, StockLevel>,
    now: Timestamp,
) -> Result<OrderRecord, CheckoutServiceError> {
    if lines.is_empty() {
        return Err(CheckoutServiceError::EmptyCart);
    }

    let order_uuid = OrderUuid::new();
    let mut items = Vec::with_capacity(lines.len());

    for line in lines {
        let level = levels
            .get(&line.product_uuid)
            .ok_or(CheckoutServiceError::ProductNotFound)?;

        level.ensure_covers(line.quantity)?;

        items.push(OrderItemRecord {
            uuid: OrderItemUuid::new(),
            order_uuid,
            product_uuid: line.product_uuid,
            quantity: line.quantity,
            price_at_purchase: level.price,
            line_total: line_total(level.price, line.quantity)?,
        });
    }

    let subtotal = sum_totals(items.iter().map(|item| item.line_total))?;

    Ok(OrderRecord {
        uuid: order_uuid,
        user_uuid: user,
        items,
        subtotal,
        status: OrderStatus::Pending,
        created_at: now,
    })
}
