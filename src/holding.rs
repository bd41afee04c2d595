//! A holding: an instrument paired with a share quantity.

use crate::instrument::Instrument;
use crate::types::Symbol;

/// A position in a single instrument.
///
/// Quantity is a whole number of shares and never goes negative: the engine
/// never generates a sell larger than the held quantity, and `decrease`
/// treats a violation as a programming error rather than validating it.
#[derive(Clone, Debug, serde::Serialize)]
pub struct Holding {
    instrument: Instrument,
    quantity: u64,
}

impl Holding {
    pub fn new(instrument: Instrument, quantity: u64) -> Self {
        Self { instrument, quantity }
    }

    #[inline]
    pub fn symbol(&self) -> Symbol {
        self.instrument.symbol()
    }

    #[inline]
    pub fn instrument(&self) -> &Instrument {
        &self.instrument
    }

    pub(crate) fn instrument_mut(&mut self) -> &mut Instrument {
        &mut self.instrument
    }

    #[inline]
    pub fn quantity(&self) -> u64 {
        self.quantity
    }

    /// Market value at the instrument's latest price (cents).
    ///
    /// Recomputed on every call so it always reflects the current price.
    #[inline]
    pub fn market_value_cents(&self) -> i64 {
        self.quantity as i64 * self.instrument.price_cents()
    }

    /// Add `n` shares (a buy fill).
    pub fn increase(&mut self, n: u64) {
        self.quantity += n;
    }

    /// Remove `n` shares (a sell fill). Precondition: `n <= quantity`.
    pub fn decrease(&mut self, n: u64) {
        debug_assert!(
            n <= self.quantity,
            "sell of {n} exceeds held quantity {}",
            self.quantity
        );
        self.quantity = self.quantity.saturating_sub(n);
    }
}
