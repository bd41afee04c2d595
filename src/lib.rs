// Allow our dollar.cents digit grouping convention (e.g., 100_00 = $100.00)
#![allow(clippy::inconsistent_digit_grouping)]

//! # driftband
//!
//! A tolerance-band portfolio rebalancing calculator. Given priced
//! holdings, a cash balance, and target allocation weights, it computes the
//! ordered buy/sell orders that bring current allocations back within a
//! drift threshold of target — sells first, then buys funded by the freed
//! cash, largest deficit first. Orders are intents; nothing is executed
//! against a market.
//!
//! ## Quick start
//!
//! ```
//! use driftband::{Instrument, RebalancingEngine, Symbol};
//!
//! let mut engine = RebalancingEngine::new(10_000_00); // $10,000
//! engine.set_target_allocations(&[
//!     (Symbol::new("AAPL"), 0.50),
//!     (Symbol::new("META"), 0.20),
//!     (Symbol::new("FNTL"), 0.30),
//! ])?;
//!
//! engine.add_holding(Instrument::new(Symbol::new("AAPL"), 150_00), 33)?;
//! engine.add_holding(Instrument::new(Symbol::new("META"), 300_00), 6)?;
//! engine.add_holding(Instrument::new(Symbol::new("FNTL"), 100_00), 30)?;
//!
//! // Market data arrives
//! engine.set_price(Symbol::new("AAPL"), 180_00)?;
//! engine.set_price(Symbol::new("META"), 270_00)?;
//! engine.set_price(Symbol::new("FNTL"), 110_00)?;
//!
//! let orders = engine.rebalance()?;
//! assert_eq!(orders.len(), 2); // SELL AAPL, then BUY META
//! # Ok::<(), driftband::Error>(())
//! ```
//!
//! ## Money representation
//!
//! Prices and cash are `i64` cents (`150_00` = $150.00), so order notionals
//! and the cash ledger stay exact. Allocation fractions and drift are `f64`.

pub mod commands;
pub mod config;
pub mod engine;
pub mod error;
pub mod holding;
pub mod instrument;
pub mod order;
pub mod portfolio;
pub mod report;
mod types;

pub use engine::{DEFAULT_DRIFT_THRESHOLD, RebalancingEngine};
pub use error::{Error, Result};
pub use holding::Holding;
pub use instrument::Instrument;
pub use order::{Action, Order};
pub use types::Symbol;
