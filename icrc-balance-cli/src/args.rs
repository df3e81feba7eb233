//! Command line arguments

use clap::{Args, Parser, Subcommand};
use icrc_ledger::config::ENV_PREFIX;
use std::collections::HashMap;

#[derive(Debug, Parser)]
#[command(name = "icrc-balance", version, about = "Show ICRC-1 ledger balances for one principal")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    #[command(flatten)]
    pub balance: BalanceArgs,

    /// More logging (-v debug, -vv trace); RUST_LOG takes precedence
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Decode 0x-prefixed hex into its 32-byte big-endian form
    Hex {
        value: String,
    },
    /// Render an integer amount with an implied number of decimals
    Format {
        amount: String,
        scale: u32,
        #[arg(long)]
        max_decimals: Option<u32>,
    },
    /// Convert a decimal amount such as 1.5 into smallest units
    Parse {
        amount: String,
        scale: u32,
    },
}

/// Flags for the default balance listing. Each one overrides the matching
/// `ICRC_*` environment variable.
#[derive(Debug, Default, Args)]
pub struct BalanceArgs {
    /// Network host (ICRC_AGENT_HOST)
    #[arg(long)]
    pub host: Option<String>,

    /// Owner principal (ICRC_WALLET_PRINCIPAL_ID)
    #[arg(long)]
    pub owner: Option<String>,

    /// Fractional digits to keep, or "none" (ICRC_MAX_DECIMALS)
    #[arg(long)]
    pub max_decimals: Option<String>,

    /// Use certified update calls (ICRC_CERTIFIED)
    #[arg(long)]
    pub certified: bool,

    /// Show the ledgers that answered even if some failed
    #[arg(long)]
    pub keep_going: bool,

    /// Print JSON instead of text
    #[arg(long)]
    pub json: bool,

    /// Seed for the signing identity; random when omitted
    #[arg(long)]
    pub seed: Option<String>,
}

impl BalanceArgs {
    /// Environment-style overrides keyed by full variable name
    pub fn overrides(&self) -> HashMap<String, String> {
        let mut vars = HashMap::new();
        let mut set = |name: &str, value: Option<&String>| {
            if let Some(value) = value {
                vars.insert(format!("{ENV_PREFIX}{name}"), value.clone());
            }
        };
        set("AGENT_HOST", self.host.as_ref());
        set("WALLET_PRINCIPAL_ID", self.owner.as_ref());
        set("MAX_DECIMALS", self.max_decimals.as_ref());
        if self.certified {
            vars.insert(format!("{ENV_PREFIX}CERTIFIED"), "true".to_string());
        }
        vars
    }
}
