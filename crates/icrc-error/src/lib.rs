//! # icrc-error
//!
//! Unified error types for the icrc-balance workspace. Every library crate
//! returns [`Result`] so that failures from decoding, configuration and
//! ledger calls surface through one enum.
//!
//! ## Example
//!
//! ```
//! use icrc_error::{IcrcError, Result};
//!
//! fn require_prefix(text: &str) -> Result<&str> {
//!     text.strip_prefix("0x")
//!         .ok_or_else(|| IcrcError::InvalidHex(format!("missing 0x prefix: {text}")))
//! }
//!
//! assert!(require_prefix("0xff").is_ok());
//! assert!(require_prefix("ff").is_err());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

use thiserror::Error;

/// The main error type for balance queries and their supporting utilities.
#[derive(Error, Debug)]
pub enum IcrcError {
    // ============ Decoding Errors ============
    /// Malformed hexadecimal input
    #[error("Invalid hex: {0}")]
    InvalidHex(String),

    /// Malformed integer or decimal amount
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    /// Seed outside the accepted length range
    #[error("Invalid seed: {0}")]
    InvalidSeed(String),

    /// Principal text that does not parse
    #[error("Invalid principal '{text}': {reason}")]
    InvalidPrincipal {
        /// The rejected text
        text: String,
        /// Reason for rejection
        reason: String,
    },

    // ============ Configuration Errors ============
    /// Required setting absent from the environment
    #[error("Missing configuration value: {0}")]
    MissingConfig(String),

    /// Setting present but unusable
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Network host that is not a valid URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    // ============ Network Errors ============
    /// Agent construction or transport failure
    #[error("Agent error: {0}")]
    AgentError(String),

    /// A canister method call was rejected or failed
    #[error("Ledger call failed: {canister}.{method} - {reason}")]
    LedgerCallError {
        /// Target canister id
        canister: String,
        /// Canister method name
        method: String,
        /// Error reason
        reason: String,
    },

    // ============ Encoding Errors ============
    /// Candid argument encoding or reply decoding failed
    #[error("Candid error: {0}")]
    CandidError(String),

    /// JSON rendering failed
    #[error("JSON error: {0}")]
    JsonError(String),
}

/// Convenient Result type using IcrcError
pub type Result<T> = std::result::Result<T, IcrcError>;

// ============ Conversions ============

impl From<std::num::ParseIntError> for IcrcError {
    fn from(err: std::num::ParseIntError) -> Self {
        IcrcError::ConfigError(err.to_string())
    }
}

impl IcrcError {
    /// Builds a [`IcrcError::LedgerCallError`] from any displayable cause
    pub fn ledger_call(
        canister: impl ToString,
        method: impl Into<String>,
        reason: impl ToString,
    ) -> Self {
        IcrcError::LedgerCallError {
            canister: canister.to_string(),
            method: method.into(),
            reason: reason.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = IcrcError::InvalidPrincipal {
            text: "not-a-principal".to_string(),
            reason: "bad checksum".to_string(),
        };
        assert!(err.to_string().contains("not-a-principal"));
        assert!(err.to_string().contains("bad checksum"));
    }

    #[test]
    fn test_ledger_call_display() {
        let err = IcrcError::ledger_call("ryjl3-tyaaa-aaaaa-aaaba-cai", "icrc1_balance_of", "rejected");
        assert_eq!(
            err.to_string(),
            "Ledger call failed: ryjl3-tyaaa-aaaaa-aaaba-cai.icrc1_balance_of - rejected"
        );
        assert!(matches!(err, IcrcError::LedgerCallError { ref method, .. } if method == "icrc1_balance_of"));
    }

    #[test]
    fn test_parse_int_conversion() {
        let err: IcrcError = "abc".parse::<u8>().unwrap_err().into();
        assert!(matches!(err, IcrcError::ConfigError(_)));
    }
}
