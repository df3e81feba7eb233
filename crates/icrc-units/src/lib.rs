//! # icrc-units
//!
//! Exact conversions for ledger amounts:
//!
//! - [`hex_to_number`] / [`hex_to_bytes32`] turn `0x`-prefixed hex into a big
//!   integer and its 32-byte big-endian encoding.
//! - [`to_full_decimal`] renders an integer amount with an implied number of
//!   fractional digits, truncating (never rounding) to a display precision.
//!
//! All arithmetic is done on digit strings and [`BigUint`], so balances far
//! above 2^53 keep every digit.
//!
//! ```
//! use icrc_units::{parse_full_decimal, hex_to_bytes32};
//!
//! assert_eq!(parse_full_decimal("123456", 5, Some(2)).unwrap(), "1.23");
//! assert_eq!(hex_to_bytes32("0x01").unwrap()[31], 1);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod decimal;
pub mod hex;

pub use decimal::{parse_full_decimal, parse_units, to_full_decimal};
pub use hex::{bytes32_to_number, hex_to_bytes32, hex_to_bytes32_or_zero, hex_to_number};
pub use num_bigint::BigUint;
