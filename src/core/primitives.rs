use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::{PickerError, PickerResult};

/// Number of decimals kept for every recorded pick time.
pub const PICK_TIME_DECIMALS: u32 = 3;

pub fn decimal_to_f64(value: Decimal, field_name: &str) -> PickerResult<f64> {
    value.to_f64().ok_or_else(|| {
        PickerError::InvalidData(format!("{field_name} cannot be represented as f64"))
    })
}

/// Rounds a pick time to millisecond precision.
///
/// Rounding works on the exact binary value of `value`, so `12.3455` (stored
/// slightly below the tie) becomes `12.345`. Exact ties resolve to the even
/// neighbour. Non-finite or out-of-range values are rejected.
pub fn round_pick_time(value: f64) -> PickerResult<f64> {
    if !value.is_finite() {
        return Err(PickerError::InvalidData(
            "pick time must be finite".to_owned(),
        ));
    }
    let decimal = Decimal::from_f64_retain(value).ok_or_else(|| {
        PickerError::InvalidData(format!("pick time {value} is out of decimal range"))
    })?;
    let rounded =
        decimal.round_dp_with_strategy(PICK_TIME_DECIMALS, RoundingStrategy::MidpointNearestEven);

    // Exact mantissa over an exact power of ten yields the f64 nearest the decimal.
    let mantissa = rounded.mantissa();
    if mantissa.unsigned_abs() < (1_u128 << f64::MANTISSA_DIGITS) {
        return Ok(mantissa as f64 / f64::from(10_u32.pow(rounded.scale())));
    }
    decimal_to_f64(rounded, "pick time")
}

/// Annotation text shown next to cursors and committed picks.
#[must_use]
pub fn format_time_label(seconds: f64) -> String {
    format!("{seconds:.3} s")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounds_to_three_decimals() {
        assert_eq!(round_pick_time(12.345_49).expect("round"), 12.345);
        assert_eq!(round_pick_time(-0.000_4).expect("round"), 0.0);
        assert_eq!(round_pick_time(7.0).expect("round"), 7.0);
    }

    #[test]
    fn decimal_looking_ties_follow_the_binary_value() {
        assert_eq!(round_pick_time(12.3455).expect("round"), 12.345);
        assert_eq!(round_pick_time(0.0005).expect("round"), 0.001);
        assert_eq!(round_pick_time(2.6675).expect("round"), 2.667);
    }

    #[test]
    fn exact_binary_ties_go_to_even() {
        assert_eq!(round_pick_time(0.0625).expect("round"), 0.062);
        assert_eq!(round_pick_time(0.1875).expect("round"), 0.188);
    }

    #[test]
    fn rounding_is_idempotent() {
        let once = round_pick_time(3.141_592).expect("round");
        assert_eq!(round_pick_time(once).expect("round twice"), once);
    }

    #[test]
    fn rejects_non_finite() {
        assert!(round_pick_time(f64::NAN).is_err());
        assert!(round_pick_time(f64::INFINITY).is_err());
    }

    #[test]
    fn label_uses_three_decimals() {
        assert_eq!(format_time_label(12.3), "12.300 s");
    }
}
