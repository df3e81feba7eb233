//! `0x`-prefixed hexadecimal to big integer and 32-byte buffers.

use num_bigint::BigUint;

/// Width of the fixed big-endian encoding produced by [`hex_to_bytes32`].
pub const BYTES32_LEN: usize = 32;

/// Parses `0x` followed by one or more hex digits (either case).
///
/// Returns `None` when the prefix is missing, no digits follow it, or any
/// character is not a hex digit.
pub fn hex_to_number(text: &str) -> Option<BigUint> {
    let digits = text.strip_prefix("0x")?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    BigUint::parse_bytes(digits.as_bytes(), 16)
}

/// Big-endian 32-byte encoding of the value of `text`.
///
/// Values wider than 256 bits keep their low 32 bytes.
pub fn hex_to_bytes32(text: &str) -> Option<[u8; BYTES32_LEN]> {
    let value = hex_to_number(text)?;
    let bytes = value.to_bytes_be();
    let low = &bytes[bytes.len().saturating_sub(BYTES32_LEN)..];

    let mut out = [0u8; BYTES32_LEN];
    out[BYTES32_LEN - low.len()..].copy_from_slice(low);
    Some(out)
}

/// Like [`hex_to_bytes32`] but malformed input yields a zero-filled buffer.
pub fn hex_to_bytes32_or_zero(text: &str) -> [u8; BYTES32_LEN] {
    hex_to_bytes32(text).unwrap_or([0u8; BYTES32_LEN])
}

/// Reads a 32-byte big-endian buffer back into an integer.
pub fn bytes32_to_number(bytes: &[u8; BYTES32_LEN]) -> BigUint {
    BigUint::from_bytes_be(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_parses_small_values() {
        assert_eq!(hex_to_number("0x0"), Some(BigUint::from(0u8)));
        assert_eq!(hex_to_number("0xff"), Some(BigUint::from(255u32)));
        assert_eq!(hex_to_number("0xFF"), Some(BigUint::from(255u32)));
        assert_eq!(hex_to_number("0x1a2B"), Some(BigUint::from(0x1a2bu32)));
    }

    #[test]
    fn test_rejects_missing_prefix() {
        assert_eq!(hex_to_number("ff"), None);
        assert_eq!(hex_to_number("0Xff"), None);
        assert_eq!(hex_to_bytes32("1234"), None);
    }

    #[test]
    fn test_rejects_empty_digits() {
        assert_eq!(hex_to_number("0x"), None);
        assert_eq!(hex_to_bytes32("0x"), None);
        assert_eq!(hex_to_number(""), None);
    }

    #[test]
    fn test_rejects_non_hex_characters() {
        assert_eq!(hex_to_number("0xfg"), None);
        assert_eq!(hex_to_number("0x12 34"), None);
        assert_eq!(hex_to_number("0x1_000"), None);
        assert_eq!(hex_to_number("0x-1"), None);
    }

    #[test]
    fn test_zero_encodes_to_zero_bytes() {
        assert_eq!(hex_to_bytes32("0x0"), Some([0u8; 32]));
        assert_eq!(hex_to_bytes32("0x0000"), Some([0u8; 32]));
    }

    #[test]
    fn test_big_endian_layout() {
        let bytes = hex_to_bytes32("0x0102").unwrap();
        assert_eq!(bytes[30], 0x01);
        assert_eq!(bytes[31], 0x02);
        assert!(bytes[..30].iter().all(|b| *b == 0));
    }

    #[test]
    fn test_full_width_value() {
        let hex = format!("0x{}", "ab".repeat(32));
        assert_eq!(hex_to_bytes32(&hex), Some([0xab; 32]));
    }

    #[test]
    fn test_truncates_to_low_32_bytes() {
        // 33 bytes: a leading 0x01 followed by 32 bytes of 0xcd
        let hex = format!("0x01{}", "cd".repeat(32));
        assert_eq!(hex_to_bytes32(&hex), Some([0xcd; 32]));
    }

    #[test]
    fn test_malformed_falls_back_to_zero() {
        assert_eq!(hex_to_bytes32_or_zero("nothex"), [0u8; 32]);
        assert_eq!(hex_to_bytes32_or_zero("0x10")[31], 0x10);
    }

    proptest! {
        #[test]
        fn prop_bytes32_reproduces_value(digits in "[0-9a-fA-F]{1,64}") {
            let expected = BigUint::parse_bytes(digits.as_bytes(), 16).unwrap();
            let bytes = hex_to_bytes32(&format!("0x{digits}")).unwrap();
            prop_assert_eq!(bytes32_to_number(&bytes), expected);
        }

        #[test]
        fn prop_unprefixed_is_rejected(digits in "[0-9a-f]{1,64}") {
            prop_assert!(hex_to_bytes32(&digits).is_none());
        }
    }
}
