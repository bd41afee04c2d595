//! A priced instrument: symbol plus last known market price.

use crate::types::Symbol;

/// A tradable instrument with a mutable current price.
///
/// The symbol is fixed at construction; the price is replaced wholesale by
/// whatever market-data source drives the session. Prices are in the
/// smallest currency unit (cents): `150_00` = $150.00.
#[derive(Clone, Debug, serde::Serialize)]
pub struct Instrument {
    symbol: Symbol,
    price_cents: i64,
}

impl Instrument {
    /// Create an instrument at the given price (cents).
    ///
    /// Negative prices are a programming error (`debug_assert`); zero is
    /// allowed and means "not yet priced" — the engine skips such holdings
    /// when generating orders.
    pub fn new(symbol: Symbol, price_cents: i64) -> Self {
        debug_assert!(price_cents >= 0, "price must be non-negative, got {price_cents}");
        Self { symbol, price_cents }
    }

    #[inline]
    pub fn symbol(&self) -> Symbol {
        self.symbol
    }

    /// Latest price (cents).
    #[inline]
    pub fn price_cents(&self) -> i64 {
        self.price_cents
    }

    /// Replace the current price unconditionally.
    #[inline]
    pub fn set_price(&mut self, price_cents: i64) {
        self.price_cents = price_cents;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_instrument() {
        let inst = Instrument::new(Symbol::new("AAPL"), 150_00);
        assert_eq!(inst.symbol(), Symbol::new("AAPL"));
        assert_eq!(inst.price_cents(), 150_00);
    }

    #[test]
    fn set_price_replaces() {
        let mut inst = Instrument::new(Symbol::new("AAPL"), 150_00);
        inst.set_price(180_00);
        assert_eq!(inst.price_cents(), 180_00);
        inst.set_price(0);
        assert_eq!(inst.price_cents(), 0);
    }
}
