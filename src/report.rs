//! Console rendering of portfolio state and rebalance orders.
//!
//! Presentation only: both tables read the engine through its public
//! accessors and never mutate it.

use serde::Serialize;

use crate::engine::RebalancingEngine;
use crate::order::Order;

/// Formatted view of current holdings and allocations.
#[derive(Debug, Clone, Serialize)]
pub struct AllocationTable {
    pub rows: Vec<AllocationRow>,
    pub stocks_value_cents: i64,
    pub cash_cents: i64,
}

/// One holding's line in the allocation table.
#[derive(Debug, Clone, Serialize)]
pub struct AllocationRow {
    pub symbol: String,
    pub quantity: u64,
    pub price_cents: i64,
    pub value_cents: i64,
    /// Fraction of the stocks-only value (cash excluded)
    pub weight: f64,
}

impl AllocationTable {
    /// Snapshot the engine's holdings into table rows.
    pub fn new(engine: &RebalancingEngine) -> Self {
        let stocks_value = engine.stocks_value_cents();
        let rows = engine
            .holdings()
            .iter()
            .map(|h| {
                let value = h.market_value_cents();
                AllocationRow {
                    symbol: h.symbol().as_str().to_string(),
                    quantity: h.quantity(),
                    price_cents: h.instrument().price_cents(),
                    value_cents: value,
                    weight: if stocks_value > 0 {
                        value as f64 / stocks_value as f64
                    } else {
                        0.0
                    },
                }
            })
            .collect();

        AllocationTable {
            rows,
            stocks_value_cents: stocks_value,
            cash_cents: engine.cash_cents(),
        }
    }

    pub fn total_cents(&self) -> i64 {
        self.stocks_value_cents + self.cash_cents
    }
}

impl std::fmt::Display for AllocationTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "CURRENT ALLOCATIONS:")?;
        for row in &self.rows {
            writeln!(
                f,
                "  {:8} {:>6} @ ${:>8.2} = ${:>11.2}  ({:5.2}%)",
                row.symbol,
                row.quantity,
                row.price_cents as f64 / 100.0,
                row.value_cents as f64 / 100.0,
                row.weight * 100.0,
            )?;
        }
        writeln!(
            f,
            "\n  Stocks value: ${:.2}",
            self.stocks_value_cents as f64 / 100.0
        )?;
        writeln!(f, "  Cash:         ${:.2}", self.cash_cents as f64 / 100.0)?;
        writeln!(f, "  Total:        ${:.2}", self.total_cents() as f64 / 100.0)?;
        Ok(())
    }
}

/// Formatted view of a rebalance order list.
#[derive(Debug, Clone)]
pub struct OrderTable<'a> {
    orders: &'a [Order],
}

impl<'a> OrderTable<'a> {
    pub fn new(orders: &'a [Order]) -> Self {
        OrderTable { orders }
    }
}

impl std::fmt::Display for OrderTable<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.orders.is_empty() {
            writeln!(f, "No rebalancing needed — portfolio is within threshold.")?;
            return Ok(());
        }

        writeln!(f, "REBALANCE ORDERS:")?;
        writeln!(
            f,
            "  {:>3}  {:5} {:8} {:>8} {:>10} {:>12}",
            "#", "Side", "Symbol", "Shares", "Price", "Notional"
        )?;
        for (i, order) in self.orders.iter().enumerate() {
            writeln!(
                f,
                "  {:>3}  {:5} {:8} {:>8} ${:>9.2} ${:>11.2}",
                i + 1,
                format!("{}", order.action),
                order.symbol,
                order.quantity,
                order.price_cents as f64 / 100.0,
                order.notional_cents as f64 / 100.0,
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instrument::Instrument;
    use crate::order::Action;
    use crate::types::Symbol;

    fn sample_engine() -> RebalancingEngine {
        let mut engine = RebalancingEngine::new(10_000_00);
        engine
            .set_target_allocations(&[(Symbol::new("AAPL"), 0.5), (Symbol::new("META"), 0.5)])
            .unwrap();
        engine
            .add_holding(Instrument::new(Symbol::new("AAPL"), 150_00), 33)
            .unwrap();
        engine
            .add_holding(Instrument::new(Symbol::new("META"), 300_00), 6)
            .unwrap();
        engine
    }

    #[test]
    fn allocation_rows_match_holdings() {
        let engine = sample_engine();
        let table = AllocationTable::new(&engine);

        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0].symbol, "AAPL");
        assert_eq!(table.rows[0].quantity, 33);
        assert_eq!(table.rows[0].value_cents, 33 * 150_00);
        assert_eq!(table.stocks_value_cents, 33 * 150_00 + 6 * 300_00);
        assert_eq!(table.cash_cents, engine.cash_cents());
        assert_eq!(
            table.total_cents(),
            table.stocks_value_cents + table.cash_cents
        );
    }

    #[test]
    fn weights_sum_to_one() {
        let engine = sample_engine();
        let table = AllocationTable::new(&engine);
        let sum: f64 = table.rows.iter().map(|r| r.weight).sum();
        assert!((sum - 1.0).abs() < 1e-9);
    }

    #[test]
    fn empty_engine_renders_zero_weights() {
        let engine = RebalancingEngine::new(500_00);
        let table = AllocationTable::new(&engine);
        assert!(table.rows.is_empty());
        assert_eq!(table.stocks_value_cents, 0);
        let text = format!("{table}");
        assert!(text.contains("Cash:"));
    }

    #[test]
    fn allocation_display_contains_rows() {
        let engine = sample_engine();
        let text = format!("{}", AllocationTable::new(&engine));
        assert!(text.contains("AAPL"));
        assert!(text.contains("META"));
        assert!(text.contains("Total:"));
    }

    #[test]
    fn empty_orders_render_no_rebalancing_needed() {
        let text = format!("{}", OrderTable::new(&[]));
        assert!(text.contains("No rebalancing needed"));
    }

    #[test]
    fn orders_render_in_sequence() {
        let orders = vec![
            Order {
                symbol: Symbol::new("AAPL"),
                action: Action::Sell,
                quantity: 2,
                price_cents: 180_00,
                notional_cents: 360_00,
            },
            Order {
                symbol: Symbol::new("META"),
                action: Action::Buy,
                quantity: 2,
                price_cents: 270_00,
                notional_cents: 540_00,
            },
        ];
        let text = format!("{}", OrderTable::new(&orders));
        let sell_at = text.find("SELL").unwrap();
        let buy_at = text.find("BUY").unwrap();
        assert!(sell_at < buy_at);
        assert!(text.contains("AAPL"));
        assert!(text.contains("360.00"));
    }
}
