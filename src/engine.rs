//! The rebalancing engine: drift detection, order sizing, and the
//! sell-then-buy execution-ordering policy.
//!
//! The engine owns the holdings and the cash balance. `rebalance` computes
//! per-symbol drift against the target allocations, sizes candidate orders,
//! then applies all sells before any buy so that cash freed by overweight
//! positions funds the underweight purchases in the same pass.

use rustc_hash::FxHashMap;

use crate::error::{Error, Result};
use crate::holding::Holding;
use crate::instrument::Instrument;
use crate::order::{Action, Order};
use crate::types::Symbol;

/// Default minimum absolute drift before an order is generated.
pub const DEFAULT_DRIFT_THRESHOLD: f64 = 0.03;

/// Absolute tolerance on the target-allocation sum.
pub const ALLOCATION_SUM_TOLERANCE: f64 = 0.001;

/// A sized order candidate, before execution ordering and cash capping.
#[derive(Debug, Clone)]
struct PendingOrder {
    /// Index into `holdings`
    idx: usize,
    symbol: Symbol,
    action: Action,
    quantity: u64,
    price_cents: i64,
    /// Absolute allocation drift, used to fund the largest deficit first
    weight: f64,
}

/// A single-portfolio rebalancing calculator.
///
/// Holdings keep their insertion order and symbols are unique across
/// holdings. Cash is in cents and stays non-negative through `rebalance`;
/// only `add_holding` can overdraw it (caller's responsibility).
///
/// Not internally synchronized: one caller drives one engine per cycle.
/// Concurrent callers must wrap the whole engine in a single mutex.
#[derive(Clone, Debug)]
pub struct RebalancingEngine {
    holdings: Vec<Holding>,
    cash_cents: i64,
    targets: FxHashMap<Symbol, f64>,
    drift_threshold: f64,
}

impl RebalancingEngine {
    /// Create an engine with initial cash (cents) and the default drift
    /// threshold of 3%.
    pub fn new(cash_cents: i64) -> Self {
        Self::with_threshold(cash_cents, DEFAULT_DRIFT_THRESHOLD)
    }

    /// Create an engine with an explicit drift threshold. The threshold is
    /// fixed for the lifetime of the engine.
    pub fn with_threshold(cash_cents: i64, drift_threshold: f64) -> Self {
        debug_assert!(
            drift_threshold > 0.0 && drift_threshold < 1.0,
            "drift threshold must be in (0, 1), got {drift_threshold}"
        );
        Self {
            holdings: Vec::new(),
            cash_cents,
            targets: FxHashMap::default(),
            drift_threshold,
        }
    }

    // === Queries ===

    /// Current cash balance (cents).
    #[inline]
    pub fn cash_cents(&self) -> i64 {
        self.cash_cents
    }

    /// All holdings in insertion order.
    pub fn holdings(&self) -> &[Holding] {
        &self.holdings
    }

    /// The holding for `symbol`, if any.
    pub fn holding(&self, symbol: Symbol) -> Option<&Holding> {
        self.holdings.iter().find(|h| h.symbol() == symbol)
    }

    /// Configured target weight for `symbol`, if any.
    pub fn target(&self, symbol: Symbol) -> Option<f64> {
        self.targets.get(&symbol).copied()
    }

    #[inline]
    pub fn drift_threshold(&self) -> f64 {
        self.drift_threshold
    }

    /// Sum of all holdings' market values (cents). Excludes cash.
    pub fn stocks_value_cents(&self) -> i64 {
        self.holdings.iter().map(Holding::market_value_cents).sum()
    }

    /// Stocks value plus cash (cents).
    pub fn total_value_cents(&self) -> i64 {
        self.stocks_value_cents() + self.cash_cents
    }

    // === Configuration ===

    /// Replace the target allocation map wholesale.
    ///
    /// Weights must be unique per symbol, each in `(0.0, 1.0]`, and sum to
    /// 1.0 within an absolute tolerance of 0.001. On any failure the prior
    /// map is left untouched.
    pub fn set_target_allocations(&mut self, targets: &[(Symbol, f64)]) -> Result<()> {
        let mut map = FxHashMap::default();
        for &(symbol, weight) in targets {
            if !(weight > 0.0 && weight <= 1.0) {
                return Err(Error::WeightRange { symbol, weight });
            }
            if map.insert(symbol, weight).is_some() {
                return Err(Error::DuplicateSymbol(symbol));
            }
        }

        let sum: f64 = map.values().sum();
        if (sum - 1.0).abs() > ALLOCATION_SUM_TOLERANCE {
            return Err(Error::AllocationSum { sum });
        }

        self.targets = map;
        Ok(())
    }

    /// Buy `quantity` shares of `instrument` at its current price and hold
    /// them.
    ///
    /// Cash is debited by `price * quantity` with no overdraft guard — the
    /// caller decides how much of the book to invest. A second holding for
    /// a symbol already held is rejected before any state change; the
    /// rebalance loop relies on symbol uniqueness.
    pub fn add_holding(&mut self, instrument: Instrument, quantity: u64) -> Result<()> {
        let symbol = instrument.symbol();
        if self.holding(symbol).is_some() {
            return Err(Error::DuplicateSymbol(symbol));
        }
        self.cash_cents -= quantity as i64 * instrument.price_cents();
        self.holdings.push(Holding::new(instrument, quantity));
        Ok(())
    }

    /// Update the price of a held instrument (market-data inbound path).
    pub fn set_price(&mut self, symbol: Symbol, price_cents: i64) -> Result<()> {
        let holding = self
            .holdings
            .iter_mut()
            .find(|h| h.symbol() == symbol)
            .ok_or(Error::UnknownSymbol(symbol))?;
        holding.instrument_mut().set_price(price_cents);
        Ok(())
    }

    // === Rebalancing ===

    /// Compute and apply the orders that bring allocations back within the
    /// drift threshold of target.
    ///
    /// Returns the orders in execution order: all sells first (holding
    /// discovery order), then buys sorted by descending drift. Each
    /// returned order has already been applied to the holdings and cash,
    /// as if filled at the current price.
    ///
    /// Drift percentages are computed against the stocks-only value, while
    /// order sizing uses the total value including cash. An all-cash or
    /// empty portfolio is a no-op. Symbol coverage between holdings and
    /// targets is validated before any mutation.
    pub fn rebalance(&mut self) -> Result<Vec<Order>> {
        self.check_symbol_coverage()?;

        let stocks_value = self.stocks_value_cents();
        if stocks_value == 0 {
            log::debug!("rebalance: no invested capital, nothing to do");
            return Ok(Vec::new());
        }
        let portfolio_value = stocks_value + self.cash_cents;

        let mut pending = Vec::new();
        for (idx, holding) in self.holdings.iter().enumerate() {
            let symbol = holding.symbol();
            let price = holding.instrument().price_cents();
            if price <= 0 {
                // Unpriced instrument: cannot size an order against it
                continue;
            }

            // Coverage was checked above, so the lookup cannot fail
            let target = match self.targets.get(&symbol) {
                Some(&t) => t,
                None => continue,
            };

            let current = holding.market_value_cents() as f64 / stocks_value as f64;
            let diff = current - target;
            let money_diff = diff * portfolio_value as f64;
            log::debug!("{symbol}: current {current:.4} target {target:.4} drift {diff:+.4}");

            if diff > self.drift_threshold {
                pending.push(PendingOrder {
                    idx,
                    symbol,
                    action: Action::Sell,
                    quantity: (money_diff / price as f64).floor() as u64,
                    price_cents: price,
                    weight: diff.abs(),
                });
            } else if diff < -self.drift_threshold {
                pending.push(PendingOrder {
                    idx,
                    symbol,
                    action: Action::Buy,
                    quantity: (money_diff.abs() / price as f64).floor() as u64,
                    price_cents: price,
                    weight: diff.abs(),
                });
            }
        }

        Ok(self.execute(pending))
    }

    /// Every held symbol needs a target and every target needs a holding.
    fn check_symbol_coverage(&self) -> Result<()> {
        for holding in &self.holdings {
            if !self.targets.contains_key(&holding.symbol()) {
                return Err(Error::MissingTarget(holding.symbol()));
            }
        }
        for &symbol in self.targets.keys() {
            if self.holding(symbol).is_none() {
                return Err(Error::MissingHolding(symbol));
            }
        }
        Ok(())
    }

    /// Apply pending orders: sells first in full, then buys largest-deficit
    /// first, each capped by the cash remaining at that point.
    fn execute(&mut self, pending: Vec<PendingOrder>) -> Vec<Order> {
        let mut orders = Vec::new();

        for p in pending.iter().filter(|p| p.action == Action::Sell) {
            let holding = &mut self.holdings[p.idx];
            // Sizing uses total value while drift uses stocks-only value,
            // so with a large cash balance the raw quantity can exceed the
            // held shares; cap it to keep the holding non-negative.
            let quantity = p.quantity.min(holding.quantity());
            if quantity == 0 {
                continue;
            }
            let notional = quantity as i64 * p.price_cents;
            holding.decrease(quantity);
            self.cash_cents += notional;
            orders.push(Order {
                symbol: p.symbol,
                action: Action::Sell,
                quantity,
                price_cents: p.price_cents,
                notional_cents: notional,
            });
        }

        let mut buys: Vec<&PendingOrder> =
            pending.iter().filter(|p| p.action == Action::Buy).collect();
        buys.sort_by(|a, b| b.weight.total_cmp(&a.weight));

        for p in buys {
            let affordable = (self.cash_cents.max(0) / p.price_cents) as u64;
            let quantity = p.quantity.min(affordable);
            if quantity == 0 {
                continue;
            }
            let notional = quantity as i64 * p.price_cents;
            self.holdings[p.idx].increase(quantity);
            self.cash_cents -= notional;
            orders.push(Order {
                symbol: p.symbol,
                action: Action::Buy,
                quantity,
                price_cents: p.price_cents,
                notional_cents: notional,
            });
        }

        orders
    }
}
