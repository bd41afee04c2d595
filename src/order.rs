//! Order intents produced by a rebalance pass.

use serde::Serialize;

use crate::types::Symbol;

/// A single rebalance order intent.
///
/// Quantity is always positive; zero-quantity candidates are dropped before
/// they reach the caller. `price_cents` is the price the order was sized at
/// and `notional_cents = quantity * price_cents`.
#[derive(Debug, Clone, Serialize)]
pub struct Order {
    pub symbol: Symbol,
    pub action: Action,
    pub quantity: u64,
    pub price_cents: i64,
    pub notional_cents: i64,
}

/// Trade direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Action {
    Buy,
    Sell,
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Action::Buy => write!(f, "BUY"),
            Action::Sell => write!(f, "SELL"),
        }
    }
}
