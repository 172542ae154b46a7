//! Charge computation for a one-hour session.
//!
//! The hourly rate is stored as a float. The charge is computed on the
//! rate's shortest decimal rendering (the digits the tutor typed) and
//! rounded half away from zero to whole minor units, so `49.995` becomes
//! `5000` and `10.005` becomes `1001`. Multiplying the binary float by 100
//! first would turn both into values just below the midpoint.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

/// Integer amount in the currency's minor unit (cents for USD).
pub type MinorUnits = i64;

/// Converts an hourly rate into the minor-unit charge for one session.
///
/// Rejects rates that are not finite and strictly positive, and rates that
/// round to zero minor units.
pub fn charge_minor_units(hourly_rate: f64) -> Result<MinorUnits, ValidationError> {
    let invalid = |reason: &str| ValidationError::invalid_format("hourlyRate", reason);

    if !hourly_rate.is_finite() || hourly_rate <= 0.0 {
        return Err(invalid("must be a positive number"));
    }

    let rate = Decimal::from_str(&hourly_rate.to_string()).map_err(|_| invalid("is out of range"))?;
    let minor = rate
        .checked_mul(Decimal::ONE_HUNDRED)
        .ok_or_else(|| invalid("is out of range"))?
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .ok_or_else(|| invalid("is out of range"))?;

    if minor <= 0 {
        return Err(invalid("is below the smallest chargeable amount"));
    }
    Ok(minor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn half_cent_rates_round_up() {
        assert_eq!(charge_minor_units(49.995), Ok(5000));
        assert_eq!(charge_minor_units(10.005), Ok(1001));
        assert_eq!(charge_minor_units(0.015), Ok(2));
    }

    #[test]
    fn whole_and_two_decimal_rates_are_exact() {
        assert_eq!(charge_minor_units(25.0), Ok(2500));
        assert_eq!(charge_minor_units(19.99), Ok(1999));
        assert_eq!(charge_minor_units(0.29), Ok(29));
    }

    #[test]
    fn sub_half_cent_remainders_round_down() {
        assert_eq!(charge_minor_units(49.994), Ok(4999));
        assert_eq!(charge_minor_units(12.3449), Ok(1234));
    }

    #[test]
    fn non_positive_or_non_finite_rates_are_rejected() {
        for rate in [0.0, -5.0, f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let err = charge_minor_units(rate).unwrap_err();
            assert_eq!(err.field(), "hourlyRate");
        }
    }

    #[test]
    fn rate_rounding_to_zero_is_rejected() {
        assert!(charge_minor_units(0.004).is_err());
    }

    #[test]
    fn absurdly_large_rate_is_rejected() {
        assert!(charge_minor_units(1e300).is_err());
    }

    proptest! {
        #[test]
        fn two_decimal_rates_charge_exactly_their_cents(cents in 1i64..100_000_000) {
            let rate = cents as f64 / 100.0;
            prop_assert_eq!(charge_minor_units(rate), Ok(cents));
        }
    }
}
