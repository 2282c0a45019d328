//! Money conversion helpers.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use rigmart_core::error::AppError;
use rigmart_core::result::AppResult;

/// Convert a decimal price to the provider's integer minor units
/// (e.g. 10.00 EUR becomes 1000 cents). Rounds to the nearest cent.
pub fn to_minor_units(amount: Decimal) -> AppResult<i64> {
    let cents = (amount * Decimal::from(100)).round();
    cents
        .to_i64()
        .ok_or_else(|| AppError::internal(format!("Amount out of range: {amount}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whole_amounts() {
        assert_eq!(to_minor_units(Decimal::new(1000, 2)).unwrap(), 1000);
        assert_eq!(to_minor_units(Decimal::new(2500, 2)).unwrap(), 2500);
        assert_eq!(to_minor_units(Decimal::from(7)).unwrap(), 700);
    }

    #[test]
    fn test_rounding_at_the_cent() {
        // 1999.5 cents rounds to the even neighbour, 2000
        assert_eq!(to_minor_units(Decimal::new(19995, 3)).unwrap(), 2000);
        assert_eq!(to_minor_units(Decimal::new(19994, 3)).unwrap(), 1999);
    }

    #[test]
    fn test_zero() {
        assert_eq!(to_minor_units(Decimal::ZERO).unwrap(), 0);
    }
}
