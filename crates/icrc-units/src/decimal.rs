//! Fixed-point rendering of integer ledger amounts.
//!
//! An amount `n` with scale `s` stands for `n * 10^-s`. Formatting works on
//! the decimal digit string of `n`: the last `s` digits become the fractional
//! part, which is truncated to the requested precision and stripped of
//! trailing zeros.

use icrc_error::{IcrcError, Result};
use num_bigint::BigUint;
use num_traits::Zero;

/// Renders `amount * 10^-scale`, keeping at most `max_decimals` fractional
/// digits when given. Extra digits are cut, not rounded.
///
/// ```
/// use icrc_units::{to_full_decimal, BigUint};
///
/// assert_eq!(to_full_decimal(&BigUint::from(100_000u32), 5, None), "1");
/// assert_eq!(to_full_decimal(&BigUint::from(123_456u32), 5, Some(2)), "1.23");
/// assert_eq!(to_full_decimal(&BigUint::from(100u32), 5, None), "0.001");
/// ```
pub fn to_full_decimal(amount: &BigUint, scale: u32, max_decimals: Option<u32>) -> String {
    if amount.is_zero() {
        return "0".to_string();
    }
    format_digits(&amount.to_str_radix(10), scale as usize, max_decimals)
}

/// String entry point for [`to_full_decimal`].
///
/// `digits` must be a non-empty run of ASCII decimal digits; leading zeros
/// are allowed.
pub fn parse_full_decimal(digits: &str, scale: u32, max_decimals: Option<u32>) -> Result<String> {
    let amount = parse_integer(digits)?;
    Ok(to_full_decimal(&amount, scale, max_decimals))
}

/// Converts a human-readable decimal such as `"1.5"` into smallest units.
///
/// Fails when the text has more fractional digits than `scale` allows.
pub fn parse_units(text: &str, scale: u32) -> Result<BigUint> {
    let (int_part, frac_part) = match text.split_once('.') {
        Some((_, "")) | Some(("", _)) => {
            return Err(IcrcError::InvalidAmount(format!("'{text}' is not a decimal number")));
        }
        Some((int_part, frac_part)) => (int_part, frac_part),
        None if text.is_empty() => {
            return Err(IcrcError::InvalidAmount("empty amount".to_string()));
        }
        None => (text, ""),
    };

    if frac_part.len() > scale as usize {
        return Err(IcrcError::InvalidAmount(format!(
            "'{text}' has more than {scale} fractional digits"
        )));
    }
    if !frac_part.bytes().all(|b| b.is_ascii_digit()) {
        return Err(IcrcError::InvalidAmount(format!("'{text}' is not a decimal number")));
    }

    let value = parse_integer(&format!("{int_part}{frac_part}"))?;
    // frac_part.len() <= scale, so the shift fits in u32
    let shift = scale - frac_part.len() as u32;
    Ok(value * BigUint::from(10u8).pow(shift))
}

fn parse_integer(digits: &str) -> Result<BigUint> {
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(IcrcError::InvalidAmount(format!(
            "'{digits}' is not an unsigned integer"
        )));
    }
    BigUint::parse_bytes(digits.as_bytes(), 10)
        .ok_or_else(|| IcrcError::InvalidAmount(digits.to_string()))
}

fn format_digits(digits: &str, scale: usize, max_decimals: Option<u32>) -> String {
    // The fractional part is `zeros` implied zeros followed by `frac_digits`.
    let (int_part, frac_digits, zeros) = if digits.len() > scale {
        let (int_part, frac_digits) = digits.split_at(digits.len() - scale);
        (int_part, frac_digits, 0)
    } else {
        ("0", digits, scale - digits.len())
    };

    let keep = max_decimals.map_or(scale, |max| scale.min(max as usize));
    if keep <= zeros {
        return int_part.to_string();
    }

    let frac_digits = frac_digits[..keep - zeros].trim_end_matches('0');
    if frac_digits.is_empty() {
        int_part.to_string()
    } else {
        format!("{int_part}.{}{frac_digits}", "0".repeat(zeros))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn fmt(amount: u128, scale: u32, max: Option<u32>) -> String {
        to_full_decimal(&BigUint::from(amount), scale, max)
    }

    #[test]
    fn test_zero_for_every_scale() {
        for scale in [0, 1, 8, 18, 40] {
            assert_eq!(fmt(0, scale, None), "0");
            assert_eq!(fmt(0, scale, Some(2)), "0");
        }
    }

    #[test]
    fn test_whole_units() {
        assert_eq!(fmt(100_000, 5, None), "1");
        assert_eq!(fmt(100_000_000, 8, Some(5)), "1");
        assert_eq!(fmt(4_200_000_000, 8, None), "42");
    }

    #[test]
    fn test_truncates_without_rounding() {
        assert_eq!(fmt(123_456, 5, Some(2)), "1.23");
        assert_eq!(fmt(199_999, 5, Some(2)), "1.99");
        assert_eq!(fmt(123_456_789, 8, Some(5)), "1.23456");
    }

    #[test]
    fn test_pads_short_amounts() {
        assert_eq!(fmt(100, 5, None), "0.001");
        assert_eq!(fmt(1, 8, None), "0.00000001");
        assert_eq!(fmt(12_345, 5, None), "0.12345");
    }

    #[test]
    fn test_truncation_to_nothing_keeps_integer_part() {
        assert_eq!(fmt(1, 8, Some(5)), "0");
        assert_eq!(fmt(150_000, 5, Some(0)), "1");
        assert_eq!(fmt(12_345, 5, Some(0)), "0");
    }

    #[test]
    fn test_strips_trailing_zeros_after_truncation() {
        assert_eq!(fmt(120_000, 5, None), "1.2");
        assert_eq!(fmt(100_100, 5, Some(2)), "1");
    }

    #[test]
    fn test_zero_scale() {
        assert_eq!(fmt(987, 0, None), "987");
        assert_eq!(fmt(987, 0, Some(3)), "987");
    }

    #[test]
    fn test_beyond_f64_precision() {
        let amount = BigUint::parse_bytes(b"123456789012345678901234567890", 10).unwrap();
        assert_eq!(
            to_full_decimal(&amount, 18, None),
            "123456789012.34567890123456789"
        );
        assert_eq!(to_full_decimal(&amount, 18, Some(3)), "123456789012.345");
    }

    #[test]
    fn test_parse_full_decimal() {
        assert_eq!(parse_full_decimal("123456", 5, Some(2)).unwrap(), "1.23");
        assert_eq!(parse_full_decimal("000100", 5, None).unwrap(), "0.001");
        assert_eq!(parse_full_decimal("0", 8, None).unwrap(), "0");
    }

    #[test]
    fn test_parse_full_decimal_rejects_malformed() {
        assert!(parse_full_decimal("", 8, None).is_err());
        assert!(parse_full_decimal("12a", 8, None).is_err());
        assert!(parse_full_decimal("-5", 8, None).is_err());
        assert!(parse_full_decimal("1.5", 8, None).is_err());
    }

    #[test]
    fn test_parse_units() {
        assert_eq!(parse_units("1.5", 8).unwrap(), BigUint::from(150_000_000u64));
        assert_eq!(parse_units("42", 2).unwrap(), BigUint::from(4_200u32));
        assert_eq!(parse_units("0.001", 5).unwrap(), BigUint::from(100u32));
    }

    #[test]
    fn test_parse_units_rejects_excess_precision() {
        let err = parse_units("0.123", 2).unwrap_err();
        assert!(matches!(err, IcrcError::InvalidAmount(_)));
        assert!(parse_units("1.2.3", 8).is_err());
        assert!(parse_units(".", 8).is_err());
    }

    #[test]
    fn test_scale_wider_than_format_width() {
        assert_eq!(fmt(1, 65_535, Some(2)), "0");
        assert_eq!(fmt(1, 65_535, Some(5)), "0");
        assert_eq!(fmt(10u128.pow(20), 70_000, Some(0)), "0");

        let text = fmt(1, 70_000, None);
        assert_eq!(text.len(), 70_002);
        assert!(text.starts_with("0.000"));
        assert!(text.ends_with("01"));
    }

    #[test]
    fn test_parse_units_large_scale() {
        let value = parse_units("1", 70_000).unwrap();
        assert_eq!(value, BigUint::from(10u8).pow(70_000));

        let half = parse_units("0.5", 65_536).unwrap();
        assert_eq!(half, BigUint::from(5u8) * BigUint::from(10u8).pow(65_535));
        assert_eq!(to_full_decimal(&half, 65_536, None), "0.5");
    }

    proptest! {
        #[test]
        fn prop_formatting_is_idempotent(amount: u128, scale in 0u32..40, max in proptest::option::of(0u32..40)) {
            prop_assert_eq!(fmt(amount, scale, max), fmt(amount, scale, max));
        }

        #[test]
        fn prop_untruncated_output_parses_back(amount: u128, scale in 0u32..40) {
            let text = fmt(amount, scale, None);
            prop_assert_eq!(parse_units(&text, scale).unwrap(), BigUint::from(amount));
        }

        #[test]
        fn prop_fraction_never_exceeds_max(amount: u128, scale in 0u32..40, max in 0u32..40) {
            let text = fmt(amount, scale, Some(max));
            let frac_len = text.split_once('.').map_or(0, |(_, frac)| frac.len());
            prop_assert!(frac_len <= max as usize);
        }
    }
}
