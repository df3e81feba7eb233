//! ICRC-1 ledger integration: throwaway seed identities, ledger clients and
//! the concurrent balance aggregator.

pub mod aggregator;
pub mod config;
pub mod counter;
pub mod identity;
pub mod ledger;

pub use aggregator::BalanceAggregator;
pub use config::{BalanceConfig, TokenConfig};
pub use counter::fetch_count;
pub use identity::{random_seed, SeedIdentity};
pub use ledger::{Account, AgentLedgers, IcrcLedger};
