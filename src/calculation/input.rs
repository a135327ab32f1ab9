//! Input guards shared by the calculators.

use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};

/// Rejects a negative amount with [`EngineError::InvalidInput`].
pub(crate) fn ensure_non_negative(field: &str, value: Decimal) -> EngineResult<()> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(EngineError::InvalidInput {
            field: field.to_string(),
            message: format!("must not be negative, got {}", value),
        });
    }
    Ok(())
}

/// Rejects a rate outside `[0, 1]`.
pub(crate) fn ensure_fraction(field: &str, value: Decimal) -> EngineResult<()> {
    ensure_non_negative(field, value)?;
    if value > Decimal::ONE {
        return Err(EngineError::InvalidInput {
            field: field.to_string(),
            message: format!("must be a fraction no greater than 1, got {}", value),
        });
    }
    Ok(())
}

/// Unwraps a `checked_*` result, reporting overflow against `field`.
pub(crate) fn in_range(field: &str, value: Option<Decimal>) -> EngineResult<Decimal> {
    value.ok_or_else(|| EngineError::out_of_range(field))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_zero_and_positive() {
        assert!(ensure_non_negative("gross_salary", Decimal::ZERO).is_ok());
        assert!(ensure_non_negative("gross_salary", Decimal::new(1, 2)).is_ok());
    }

    #[test]
    fn test_rejects_negative() {
        let result = ensure_non_negative("annual_bonus", Decimal::new(-1, 0));

        match result {
            Err(EngineError::InvalidInput { field, message }) => {
                assert_eq!(field, "annual_bonus");
                assert!(message.contains("-1"));
            }
            _ => panic!("Expected InvalidInput error"),
        }
    }

    #[test]
    fn test_fraction_bounds() {
        assert!(ensure_fraction("state_rate", Decimal::ONE).is_ok());
        assert!(ensure_fraction("state_rate", Decimal::new(685, 4)).is_ok());
        assert!(ensure_fraction("state_rate", Decimal::TWO).is_err());
        assert!(ensure_fraction("state_rate", Decimal::new(-1, 2)).is_err());
    }

    #[test]
    fn test_in_range_reports_overflow() {
        let overflow = in_range("monthly_salary", Decimal::MAX.checked_mul(Decimal::TWO));

        assert_eq!(overflow, Err(EngineError::out_of_range("monthly_salary")));
        assert_eq!(
            in_range("monthly_salary", Decimal::ONE.checked_add(Decimal::ONE)),
            Ok(Decimal::TWO)
        );
    }
}
