//! Concurrent balance fetch across every configured ledger.
//!
//! All queries are started before any is awaited and joined positionally,
//! so the output follows configuration order no matter which ledger answers
//! first. There is no retry and no timeout at this level.

use futures::future::{join_all, try_join_all};
use icrc_error::Result;
use icrc_traits::{LedgerClient, LedgerFactory, TokenBalance};

use crate::config::{BalanceConfig, TokenConfig};

/// Fetches one owner's balances from every ledger in a [`BalanceConfig`].
///
/// Holds no state between calls; each fetch builds fresh clients from the
/// factory.
pub struct BalanceAggregator<F: LedgerFactory> {
    factory: F,
    config: BalanceConfig,
}

impl<F: LedgerFactory> BalanceAggregator<F> {
    /// Creates an aggregator over the ledgers in `config`
    pub fn new(factory: F, config: BalanceConfig) -> Self {
        Self { factory, config }
    }

    /// The configuration every fetch runs against
    pub fn config(&self) -> &BalanceConfig {
        &self.config
    }

    /// Fetches every balance; the first failing ledger fails the whole call
    /// and no partial list is returned.
    pub async fn fetch_all(&self) -> Result<Vec<TokenBalance>> {
        let queries = self.config.tokens.iter().map(|token| self.fetch_one(token));
        let balances = try_join_all(queries).await?;

        tracing::info!(count = balances.len(), owner = %self.config.owner, "Fetched balances");
        Ok(balances)
    }

    /// Fetches every balance and reports each ledger's outcome separately,
    /// in configuration order.
    pub async fn fetch_settled(&self) -> Vec<(TokenConfig, Result<TokenBalance>)> {
        let queries = self
            .config
            .tokens
            .iter()
            .map(|token| async move { (token.clone(), self.fetch_one(token).await) });
        let settled = join_all(queries).await;

        let failed = settled.iter().filter(|(_, r)| r.is_err()).count();
        tracing::info!(count = settled.len(), failed, "Settled balance queries");
        settled
    }

    async fn fetch_one(&self, token: &TokenConfig) -> Result<TokenBalance> {
        let ledger_id = self.config.ledger_id(token);
        let ledger = self.factory.ledger(ledger_id);
        tracing::debug!(symbol = %token.symbol, ledger = %ledger_id, "Querying balance");

        let raw = ledger
            .balance(self.config.owner, self.config.certified)
            .await
            .inspect_err(|e| tracing::warn!(symbol = %token.symbol, "Balance query failed: {e}"))?;

        // Tokens without configured decimals take their metadata from the ledger.
        let (decimals, symbol) = match token.decimals {
            Some(decimals) => (decimals, token.symbol.clone()),
            None => futures::try_join!(ledger.decimals(), ledger.symbol())?,
        };

        Ok(TokenBalance::new(
            ledger_id,
            symbol,
            raw,
            decimals,
            self.config.max_decimals,
        ))
    }
}
