//! ICRC-1 ledger calls over an `ic-agent` [`Agent`].

use async_trait::async_trait;
use candid::{CandidType, Decode, Encode, Nat, Principal};
use ic_agent::Agent;
use icrc_error::{IcrcError, Result};
use icrc_traits::{LedgerClient, LedgerFactory};
use serde::Deserialize;

/// `icrc1_balance_of : (Account) -> (nat) query`
pub const BALANCE_OF: &str = "icrc1_balance_of";
/// `icrc1_decimals : () -> (nat8) query`
pub const DECIMALS: &str = "icrc1_decimals";
/// `icrc1_symbol : () -> (text) query`
pub const SYMBOL: &str = "icrc1_symbol";

/// ICRC-1 account: an owner plus an optional 32-byte subaccount.
#[derive(CandidType, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Account {
    pub owner: Principal,
    pub subaccount: Option<Vec<u8>>,
}

impl From<Principal> for Account {
    fn from(owner: Principal) -> Self {
        Self {
            owner,
            subaccount: None,
        }
    }
}

/// Client for one ICRC-1 ledger canister.
#[derive(Clone)]
pub struct IcrcLedger {
    agent: Agent,
    canister_id: Principal,
}

impl IcrcLedger {
    pub fn new(agent: Agent, canister_id: Principal) -> Self {
        Self { agent, canister_id }
    }

    async fn query(&self, method: &str, arg: Vec<u8>) -> Result<Vec<u8>> {
        self.agent
            .query(&self.canister_id, method)
            .with_arg(arg)
            .call()
            .await
            .map_err(|e| IcrcError::ledger_call(self.canister_id, method, e))
    }

    async fn update(&self, method: &str, arg: Vec<u8>) -> Result<Vec<u8>> {
        self.agent
            .update(&self.canister_id, method)
            .with_arg(arg)
            .call_and_wait()
            .await
            .map_err(|e| IcrcError::ledger_call(self.canister_id, method, e))
    }
}

fn candid_error(e: candid::Error) -> IcrcError {
    IcrcError::CandidError(e.to_string())
}

#[async_trait]
impl LedgerClient for IcrcLedger {
    fn canister_id(&self) -> Principal {
        self.canister_id
    }

    async fn balance(&self, owner: Principal, certified: bool) -> Result<Nat> {
        let arg = Encode!(&Account::from(owner)).map_err(candid_error)?;
        let reply = if certified {
            self.update(BALANCE_OF, arg).await?
        } else {
            self.query(BALANCE_OF, arg).await?
        };
        Decode!(&reply, Nat).map_err(candid_error)
    }

    async fn decimals(&self) -> Result<u8> {
        let reply = self.query(DECIMALS, Encode!().map_err(candid_error)?).await?;
        Decode!(&reply, u8).map_err(candid_error)
    }

    async fn symbol(&self) -> Result<String> {
        let reply = self.query(SYMBOL, Encode!().map_err(candid_error)?).await?;
        Decode!(&reply, String).map_err(candid_error)
    }
}

/// Hands out an [`IcrcLedger`] per canister, all sharing one agent.
#[derive(Clone)]
pub struct AgentLedgers {
    agent: Agent,
}

impl AgentLedgers {
    pub fn new(agent: Agent) -> Self {
        Self { agent }
    }
}

impl LedgerFactory for AgentLedgers {
    type Client = IcrcLedger;

    fn ledger(&self, canister_id: Principal) -> IcrcLedger {
        IcrcLedger::new(self.agent.clone(), canister_id)
    }
}
