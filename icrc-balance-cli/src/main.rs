//! icrc-balance
//!
//! Lists the balances of every configured ICRC-1 ledger for one owner,
//! signing requests with a throwaway seed-derived identity.

mod args;
mod render;

use anyhow::Context;
use args::{BalanceArgs, Cli, Command};
use clap::Parser;
use icrc_error::IcrcError;
use icrc_ledger::{fetch_count, AgentLedgers, BalanceAggregator, BalanceConfig, SeedIdentity};
use icrc_provider::build_agent;
use icrc_traits::{BalanceBoard, BoardRow};
use icrc_units::{hex_to_bytes32, parse_full_decimal, parse_units, BigUint};
use render::{render_json, render_text};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Some(Command::Hex { value }) => decode_hex(&value),
        Some(Command::Format {
            amount,
            scale,
            max_decimals,
        }) => {
            println!("{}", parse_full_decimal(&amount, scale, max_decimals)?);
            Ok(())
        }
        Some(Command::Parse { amount, scale }) => {
            println!("{}", parse_units(&amount, scale)?);
            Ok(())
        }
        None => show_balances(&cli.balance).await,
    }
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn decode_hex(value: &str) -> anyhow::Result<()> {
    let bytes = hex_to_bytes32(value)
        .ok_or_else(|| IcrcError::InvalidHex(format!("'{value}' is not 0x-prefixed hex")))?;
    println!("value: {}", BigUint::from_bytes_be(&bytes));
    println!("bytes: {}", hex::encode(bytes));
    Ok(())
}

async fn show_balances(args: &BalanceArgs) -> anyhow::Result<()> {
    let overrides = args.overrides();
    let config = BalanceConfig::from_lookup(|key| {
        overrides
            .get(key)
            .cloned()
            .or_else(|| std::env::var(key).ok())
    })
    .context("Failed to load configuration")?;

    let identity = match &args.seed {
        Some(seed) => SeedIdentity::from_seed(seed)?,
        None => SeedIdentity::random()?,
    };
    tracing::debug!("Signing as {}", identity.principal());

    let agent = build_agent(&config.provider, identity.to_agent_identity()).await?;
    let board = BalanceBoard::loading(config.owner);
    let backend = config.backend;
    let keep_going = args.keep_going;
    let aggregator = BalanceAggregator::new(AgentLedgers::new(agent.clone()), config);

    let count = async {
        match backend {
            Some(backend) => fetch_count(&agent, backend).await,
            None => None,
        }
    };

    let board = if keep_going {
        let (settled, count) = tokio::join!(aggregator.fetch_settled(), count);
        let rows = settled
            .into_iter()
            .map(|(token, result)| BoardRow::settled(token.symbol, result))
            .collect();
        board.finish_rows(rows).with_count(count)
    } else {
        let (balances, count) = tokio::join!(aggregator.fetch_all(), count);
        let balances = balances.context("Failed to fetch balances")?;
        board.finish(balances).with_count(count)
    };

    if args.json {
        println!("{}", render_json(&board)?);
    } else {
        print!("{}", render_text(&board));
    }
    Ok(())
}
