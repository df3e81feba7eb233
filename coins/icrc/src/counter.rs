//! Companion counter canister shown next to the balances.
//!
//! The counter is informational: a failed read is logged and dropped so it
//! never blocks the balance display.

use candid::{Decode, Encode, Nat, Principal};
use ic_agent::Agent;
use icrc_error::{IcrcError, Result};
use std::future::Future;

/// `get : () -> (nat) query`
pub const COUNTER_GET: &str = "get";

/// Reads the counter, returning `None` on any failure.
pub async fn fetch_count(agent: &Agent, backend: Principal) -> Option<Nat> {
    settle_count(query_count(agent, backend)).await
}

async fn query_count(agent: &Agent, backend: Principal) -> Result<Nat> {
    let arg = Encode!().map_err(|e| IcrcError::CandidError(e.to_string()))?;
    let reply = agent
        .query(&backend, COUNTER_GET)
        .with_arg(arg)
        .call()
        .await
        .map_err(|e| IcrcError::ledger_call(backend, COUNTER_GET, e))?;
    Decode!(&reply, Nat).map_err(|e| IcrcError::CandidError(e.to_string()))
}

pub(crate) async fn settle_count<F>(read: F) -> Option<Nat>
where
    F: Future<Output = Result<Nat>>,
{
    match read.await {
        Ok(count) => Some(count),
        Err(e) => {
            tracing::error!("Failed to read counter: {e}");
            None
        }
    }
}
