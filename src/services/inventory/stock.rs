use crate::models::inventory::entities::TransactionKind;

/// Stock level after a movement, or why the movement is rejected.
///
/// `In` and `Out` need a positive quantity; `Adjustment` sets the absolute
/// level and accepts zero.
pub fn apply_movement(current: i64, kind: TransactionKind, quantity: i64) -> Result<i64, String> {
    match kind {
        TransactionKind::In | TransactionKind::Out if quantity <= 0 => {
            Err("Quantity must be greater than zero".to_string())
        }
        TransactionKind::Adjustment if quantity < 0 => {
            Err("Adjusted stock cannot be negative".to_string())
        }
        TransactionKind::In => current
            .checked_add(quantity)
            .ok_or_else(|| "Stock level overflow".to_string()),
        TransactionKind::Out if quantity > current => Err(format!(
            "Insufficient stock: {current} available, {quantity} requested"
        )),
        TransactionKind::Out => Ok(current - quantity),
        TransactionKind::Adjustment => Ok(quantity),
    }
}

pub fn is_low_stock(current: i64, minimum: i64) -> bool {
    current <= minimum
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stock_in_and_out() {
        assert_eq!(apply_movement(10, TransactionKind::In, 5), Ok(15));
        assert_eq!(apply_movement(10, TransactionKind::Out, 4), Ok(6));
        assert_eq!(apply_movement(10, TransactionKind::Out, 10), Ok(0));
    }

    #[test]
    fn test_out_cannot_go_negative() {
        assert!(apply_movement(3, TransactionKind::Out, 4).is_err());
    }

    #[test]
    fn test_quantity_rules() {
        assert!(apply_movement(3, TransactionKind::In, 0).is_err());
        assert!(apply_movement(3, TransactionKind::Out, -1).is_err());
        assert_eq!(apply_movement(3, TransactionKind::Adjustment, 0), Ok(0));
        assert_eq!(apply_movement(3, TransactionKind::Adjustment, 42), Ok(42));
        assert!(apply_movement(3, TransactionKind::Adjustment, -1).is_err());
    }

    #[test]
    fn test_low_stock_threshold_is_inclusive() {
        assert!(is_low_stock(5, 5));
        assert!(is_low_stock(0, 0));
        assert!(!is_low_stock(6, 5));
    }
}
