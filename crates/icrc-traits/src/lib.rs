//! # icrc-traits
//!
//! Shared types for querying ICRC-1 ledgers:
//!
//! - [`Amount`] - integer amount in smallest units plus its scale
//! - [`TokenBalance`] - one ledger's balance, ready to display
//! - [`BoardRow`] - one ledger's line on the board, fetched or unavailable
//! - [`BalanceBoard`] - what a renderer receives for one refresh cycle
//! - [`LedgerClient`] / [`LedgerFactory`] - the seam between aggregation and
//!   the network
//!
//! ## Example
//!
//! ```ignore
//! use icrc_traits::prelude::*;
//!
//! async fn show<L: LedgerClient>(ledger: &L, owner: Principal) -> Result<String> {
//!     let raw = ledger.balance(owner, false).await?;
//!     Ok(Amount::from_smallest_unit(raw, 8).to_string())
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

use async_trait::async_trait;
use candid::{Nat, Principal};
use icrc_error::Result;
use icrc_units::to_full_decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// An integer ledger amount with its number of implied fractional digits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Amount {
    /// The value in the smallest unit of the token
    #[serde(with = "nat_string")]
    pub value: Nat,
    /// Number of decimal places (8 for ICP and ckBTC)
    pub decimals: u8,
}

impl Amount {
    /// Creates a new Amount from the smallest unit value
    pub fn from_smallest_unit(value: impl Into<Nat>, decimals: u8) -> Self {
        Self {
            value: value.into(),
            decimals,
        }
    }

    /// Returns zero amount with the specified decimals
    pub fn zero(decimals: u8) -> Self {
        Self::from_smallest_unit(0u64, decimals)
    }

    /// Checks if the amount is zero
    pub fn is_zero(&self) -> bool {
        self.value == Nat::from(0u64)
    }

    /// Renders the amount keeping at most `max_decimals` fractional digits
    pub fn to_display(&self, max_decimals: Option<u32>) -> String {
        to_full_decimal(&self.value.0, u32::from(self.decimals), max_decimals)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_display(None))
    }
}

/// The balance of one ledger for one owner, fetched in a single refresh.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenBalance {
    /// Ledger canister that was queried
    pub ledger_id: Principal,
    /// Token symbol (e.g. "ICP", "CKBTC")
    pub symbol: String,
    /// Balance in smallest units as returned by the ledger
    #[serde(with = "nat_string")]
    pub raw_amount: Nat,
    /// Scale used to build `display_amount`
    pub decimals: u8,
    /// Human-readable, truncated balance
    pub display_amount: String,
}

impl TokenBalance {
    /// Builds a balance, formatting `raw_amount` with `decimals`
    pub fn new(
        ledger_id: Principal,
        symbol: impl Into<String>,
        raw_amount: Nat,
        decimals: u8,
        max_decimals: Option<u32>,
    ) -> Self {
        let display_amount = to_full_decimal(&raw_amount.0, u32::from(decimals), max_decimals);
        Self {
            ledger_id,
            symbol: symbol.into(),
            raw_amount,
            decimals,
            display_amount,
        }
    }

    /// Returns the untruncated amount
    pub fn amount(&self) -> Amount {
        Amount::from_smallest_unit(self.raw_amount.clone(), self.decimals)
    }
}

/// One ledger's line on a [`BalanceBoard`].
///
/// Serialized with a `status` tag (`"ok"` or `"unavailable"`) next to the
/// row's own fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum BoardRow {
    /// The ledger answered
    Ok(TokenBalance),
    /// The ledger could not be read
    Unavailable {
        /// Configured token symbol
        symbol: String,
        /// Why the query failed
        reason: String,
    },
}

impl BoardRow {
    /// Turns one settled query into a row, keeping the failure reason
    pub fn settled(symbol: impl Into<String>, result: Result<TokenBalance>) -> Self {
        match result {
            Ok(balance) => BoardRow::Ok(balance),
            Err(e) => BoardRow::Unavailable {
                symbol: symbol.into(),
                reason: e.to_string(),
            },
        }
    }

    /// Symbol shown for this row
    pub fn symbol(&self) -> &str {
        match self {
            BoardRow::Ok(balance) => &balance.symbol,
            BoardRow::Unavailable { symbol, .. } => symbol,
        }
    }

    /// The balance, when the ledger answered
    pub fn balance(&self) -> Option<&TokenBalance> {
        match self {
            BoardRow::Ok(balance) => Some(balance),
            BoardRow::Unavailable { .. } => None,
        }
    }
}

/// State handed to a renderer: who is being shown, whether a refresh is in
/// flight, and the rows from the last completed refresh.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BalanceBoard {
    /// Owner whose balances are shown
    pub principal: Option<Principal>,
    /// True while a refresh is running
    pub loading: bool,
    /// One row per configured ledger, in configuration order
    pub tokens: Vec<BoardRow>,
    /// Value of the companion counter canister, when one is configured
    #[serde(serialize_with = "nat_string::serialize_option")]
    pub count: Option<Nat>,
}

impl BalanceBoard {
    /// Starts a refresh for `principal`
    pub fn loading(principal: Principal) -> Self {
        Self {
            principal: Some(principal),
            loading: true,
            ..Default::default()
        }
    }

    /// Completes the refresh with balances from every ledger
    pub fn finish(self, tokens: Vec<TokenBalance>) -> Self {
        self.finish_rows(tokens.into_iter().map(BoardRow::Ok).collect())
    }

    /// Completes the refresh with rows that may include unavailable ledgers
    pub fn finish_rows(mut self, rows: Vec<BoardRow>) -> Self {
        self.tokens = rows;
        self.loading = false;
        self
    }

    /// Attaches the counter value
    pub fn with_count(mut self, count: Option<Nat>) -> Self {
        self.count = count;
        self
    }
}

/// A handle to one ICRC-1 ledger canister.
#[async_trait]
pub trait LedgerClient: Send + Sync {
    /// The ledger canister this client talks to
    fn canister_id(&self) -> Principal;

    /// Balance of the default subaccount of `owner`.
    ///
    /// When `certified` is set the answer must come from a certified
    /// (update) call rather than a query.
    async fn balance(&self, owner: Principal, certified: bool) -> Result<Nat>;

    /// Number of decimals the ledger uses for display
    async fn decimals(&self) -> Result<u8>;

    /// Token symbol reported by the ledger
    async fn symbol(&self) -> Result<String>;
}

/// Builds an independent [`LedgerClient`] per ledger canister.
pub trait LedgerFactory: Send + Sync {
    /// Client type produced by this factory
    type Client: LedgerClient;

    /// Returns a client for `canister_id`
    fn ledger(&self, canister_id: Principal) -> Self::Client;
}

/// Serde helpers that write [`Nat`] as a plain decimal string.
pub mod nat_string {
    use candid::Nat;
    use serde::{de::Error as _, Deserialize, Deserializer, Serializer};

    /// Serializes as a decimal string
    pub fn serialize<S: Serializer>(value: &Nat, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.0.to_str_radix(10))
    }

    /// Deserializes from a decimal string
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Nat, D::Error> {
        let text = String::deserialize(deserializer)?;
        icrc_units::parse_units(&text, 0)
            .map(Nat::from)
            .map_err(D::Error::custom)
    }

    /// Serializes an optional value, `None` as null
    pub fn serialize_option<S: Serializer>(
        value: &Option<Nat>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(value) => serialize(value, serializer),
            None => serializer.serialize_none(),
        }
    }
}

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{Amount, BalanceBoard, BoardRow, LedgerClient, LedgerFactory, TokenBalance};
    pub use candid::{Nat, Principal};
    pub use icrc_error::{IcrcError, Result};
}
