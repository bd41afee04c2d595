//! Portfolio definition file (portfolio.json) loading and validation.
//!
//! The file describes the starting book: cash, target weights, the holdings
//! bought at their entry prices, and optional price marks applied after the
//! holdings are in place (the "market moved" step).

use std::path::Path;

use serde::Deserialize;

use crate::engine::RebalancingEngine;
use crate::error::{Error, Result};
use crate::instrument::Instrument;
use crate::types::Symbol;

/// A portfolio description loaded from JSON. Dollar amounts in the file,
/// cents everywhere else.
#[derive(Debug, Clone, Deserialize)]
pub struct PortfolioFile {
    /// Starting cash in dollars
    pub cash: f64,
    pub targets: Vec<TargetWeight>,
    pub holdings: Vec<HoldingEntry>,
    /// Price updates applied after the holdings are added
    #[serde(default)]
    pub marks: Vec<PriceMark>,
}

/// A target weight: symbol + fraction of invested capital.
#[derive(Debug, Clone, Deserialize)]
pub struct TargetWeight {
    pub symbol: String,
    pub weight: f64,
}

/// A holding entry: bought at `price` dollars per share.
#[derive(Debug, Clone, Deserialize)]
pub struct HoldingEntry {
    pub symbol: String,
    pub price: f64,
    pub quantity: u64,
}

/// A current-market price for a held symbol.
#[derive(Debug, Clone, Deserialize)]
pub struct PriceMark {
    pub symbol: String,
    pub price: f64,
}

fn to_cents(dollars: f64) -> i64 {
    (dollars * 100.0).round() as i64
}

impl PortfolioFile {
    /// Load and validate a portfolio.json file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| Error::PortfolioRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_json(&contents)
    }

    /// Parse from a JSON string (useful for testing).
    pub fn from_json(json: &str) -> Result<Self> {
        let file: PortfolioFile = serde_json::from_str(json)?;
        file.validate()?;
        Ok(file)
    }

    /// Validate the portfolio description.
    fn validate(&self) -> Result<()> {
        if self.cash < 0.0 {
            return Err(Error::Portfolio(format!(
                "cash must be non-negative, got {}",
                self.cash
            )));
        }
        if self.targets.is_empty() {
            return Err(Error::Portfolio("targets list is empty".into()));
        }

        let mut seen = std::collections::HashSet::new();
        for t in &self.targets {
            check_symbol(&t.symbol)?;
            if !seen.insert(&t.symbol) {
                return Err(Error::Portfolio(format!("duplicate target symbol: {}", t.symbol)));
            }
        }

        let mut held = std::collections::HashSet::new();
        for h in &self.holdings {
            check_symbol(&h.symbol)?;
            if !held.insert(&h.symbol) {
                return Err(Error::Portfolio(format!(
                    "duplicate holding symbol: {}",
                    h.symbol
                )));
            }
            if h.price <= 0.0 {
                return Err(Error::Portfolio(format!(
                    "price for {} must be positive, got {}",
                    h.symbol, h.price
                )));
            }
        }

        for m in &self.marks {
            check_symbol(&m.symbol)?;
            if m.price <= 0.0 {
                return Err(Error::Portfolio(format!(
                    "mark price for {} must be positive, got {}",
                    m.symbol, m.price
                )));
            }
        }

        Ok(())
    }

    /// Build an engine from this description: cash, targets, holdings
    /// (debiting cash at entry prices), then the price marks.
    pub fn build_engine(&self, drift_threshold: f64) -> Result<RebalancingEngine> {
        let mut engine = RebalancingEngine::with_threshold(to_cents(self.cash), drift_threshold);

        let targets: Vec<(Symbol, f64)> = self
            .targets
            .iter()
            .map(|t| (Symbol::new(&t.symbol), t.weight))
            .collect();
        engine.set_target_allocations(&targets)?;

        for h in &self.holdings {
            let instrument = Instrument::new(Symbol::new(&h.symbol), to_cents(h.price));
            engine.add_holding(instrument, h.quantity)?;
        }

        for m in &self.marks {
            engine.set_price(Symbol::new(&m.symbol), to_cents(m.price))?;
        }

        Ok(engine)
    }
}

fn check_symbol(symbol: &str) -> Result<()> {
    if symbol.is_empty() {
        return Err(Error::Portfolio("empty symbol".into()));
    }
    if symbol.len() > Symbol::MAX_LEN {
        return Err(Error::Portfolio(format!(
            "symbol '{symbol}' exceeds {} bytes",
            Symbol::MAX_LEN
        )));
    }
    Ok(())
}
