//! Cart quantity rules shared by every storage backend.
//!
//! Nothing here touches storage: callers read the current line and stock
//! level, ask these functions what the new state should be, and only write if
//! the answer is `Ok`.

use crate::domain::{carts::errors::CartsServiceError, inventory::StockLevel};

/// What a quantity update asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum QuantityChange {
    Set(u32),
    Remove,
}

/// Largest quantity a single line may hold; the schema stores it as `INTEGER`.
const MAX_LINE_QUANTITY: u32 = i32::MAX.unsigned_abs();

/// Validate a quantity supplied to an add. Anything below one is rejected.
pub(crate) fn requested_quantity(quantity: i64) -> Result<u32, CartsServiceError> {
    u32::try_from(quantity)
        .ok()
        .filter(|quantity| (1..=MAX_LINE_QUANTITY).contains(quantity))
        .ok_or(CartsServiceError::InvalidQuantity)
}

/// Interpret a quantity supplied to an update: zero or less removes the line.
pub(crate) fn quantity_change(quantity: i64) -> Result<QuantityChange, CartsServiceError> {
    if quantity <= 0 {
        return Ok(QuantityChange::Remove);
    }

    requested_quantity(quantity).map(QuantityChange::Set)
}

/// Quantity a line holds after adding `added` to `existing`, checked against stock.
///
/// The added amount must fit on its own before the merged amount is checked, so
/// an impossible request is reported against what was asked for.
pub(crate) fn merged_quantity(
    existing: Option<u32>,
    added: u32,
    level: &StockLevel,
) -> Result<u32, CartsServiceError> {
    level.ensure_covers(added)?;

    let merged = existing
        .unwrap_or(0)
        .checked_add(added)
        .filter(|merged| *merged <= MAX_LINE_QUANTITY)
        .ok_or(CartsServiceError::InvalidQuantity)?;

    level.ensure_covers(merged)?;

    Ok(merged)
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;
    use testresult::TestResult;

    use crate::domain::products::records::ProductUuid;

    use super::*;

    fn level(available: u32) -> StockLevel {
        StockLevel {
            product_uuid: ProductUuid::new(),
            name: "Medjool Dates 1kg".to_string(),
            price: dec!(12.50),
            available,
        }
    }

    #[test]
    fn requested_quantity_must_be_positive() -> TestResult {
        assert_eq!(requested_quantity(1)?, 1);
        assert!(matches!(
            requested_quantity(0),
            Err(CartsServiceError::InvalidQuantity)
        ));
        assert!(matches!(
            requested_quantity(-4),
            Err(CartsServiceError::InvalidQuantity)
        ));
        assert!(matches!(
            requested_quantity(i64::from(u32::MAX)),
            Err(CartsServiceError::InvalidQuantity)
        ));

        Ok(())
    }

    #[test]
    fn non_positive_update_removes() -> TestResult {
        assert_eq!(quantity_change(0)?, QuantityChange::Remove);
        assert_eq!(quantity_change(-1)?, QuantityChange::Remove);
        assert_eq!(quantity_change(7)?, QuantityChange::Set(7));

        Ok(())
    }

    #[test]
    fn merge_adds_to_existing_quantity() -> TestResult {
        assert_eq!(merged_quantity(None, 3, &level(5))?, 3);
        assert_eq!(merged_quantity(Some(2), 3, &level(5))?, 5);

        Ok(())
    }

    #[test]
    fn merge_beyond_stock_reports_merged_request() {
        let result = merged_quantity(Some(3), 3, &level(5));

        assert!(
            matches!(
                result,
                Err(CartsServiceError::InsufficientStock(ref s)) if s.requested == 6 && s.available == 5
            ),
            "expected InsufficientStock, got {result:?}"
        );
    }

    #[test]
    fn merge_with_impossible_addition_reports_addition() {
        let result = merged_quantity(Some(1), 9, &level(5));

        assert!(
            matches!(
                result,
                Err(CartsServiceError::InsufficientStock(ref s)) if s.requested == 9
            ),
            "expected InsufficientStock, got {result:?}"
        );
    }
}
