//! Terminal output for a balance board

use icrc_error::{IcrcError, Result};
use icrc_traits::{BalanceBoard, BoardRow};
use std::fmt::Write;

pub fn render_text(board: &BalanceBoard) -> String {
    let mut out = String::new();

    if let Some(principal) = board.principal {
        let _ = writeln!(out, "Principal: {principal}");
    }
    if let Some(count) = &board.count {
        let _ = writeln!(out, "Count: {}", count.0);
    }
    if board.loading {
        let _ = writeln!(out, "Loading balances...");
        return out;
    }

    for row in &board.tokens {
        let _ = match row {
            BoardRow::Ok(token) => writeln!(
                out,
                "{} Balance: {} {}",
                token.symbol, token.display_amount, token.symbol
            ),
            BoardRow::Unavailable { symbol, reason } => {
                writeln!(out, "{symbol} Balance: unavailable ({reason})")
            }
        };
    }
    out
}

pub fn render_json(board: &BalanceBoard) -> Result<String> {
    serde_json::to_string_pretty(board).map_err(|e| IcrcError::JsonError(e.to_string()))
}
