//! CLI workflows: load a portfolio file, run the engine, render the result.

use std::path::Path;

use log::info;

use crate::config::Config;
use crate::error::Result;
use crate::portfolio::PortfolioFile;
use crate::report::{AllocationTable, OrderTable};
use crate::types::Symbol;

/// A price override from the command line (`--price SYM=PRICE`).
#[derive(Debug, Clone)]
pub struct PriceOverride {
    pub symbol: String,
    pub price_cents: i64,
}

/// Parse a `SYM=PRICE` argument, price in dollars.
pub fn parse_price_override(s: &str) -> std::result::Result<PriceOverride, String> {
    let (symbol, price) = s
        .split_once('=')
        .ok_or_else(|| format!("expected SYM=PRICE, got '{s}'"))?;
    if symbol.is_empty() || symbol.len() > Symbol::MAX_LEN {
        return Err(format!("bad symbol '{symbol}' (1-{} bytes)", Symbol::MAX_LEN));
    }
    let dollars: f64 = price
        .parse()
        .map_err(|_| format!("bad price '{price}' for {symbol}"))?;
    if dollars <= 0.0 {
        return Err(format!("price for {symbol} must be positive"));
    }
    Ok(PriceOverride {
        symbol: symbol.to_string(),
        price_cents: (dollars * 100.0).round() as i64,
    })
}

/// Show the current allocation table for a portfolio file.
pub fn show(config: &Config, portfolio_path: &Path) -> Result<()> {
    let file = PortfolioFile::load(portfolio_path)?;
    let engine = file.build_engine(config.engine.drift_threshold)?;

    print!("{}", AllocationTable::new(&engine));
    Ok(())
}

/// Compute and display the rebalance plan for a portfolio file.
///
/// Price overrides are applied after the file's own marks, then the engine
/// runs a full rebalance pass. The resulting allocations reflect the
/// orders having been filled at current prices.
pub fn plan(config: &Config, portfolio_path: &Path, overrides: &[PriceOverride]) -> Result<()> {
    let file = PortfolioFile::load(portfolio_path)?;
    let mut engine = file.build_engine(config.engine.drift_threshold)?;

    for o in overrides {
        engine.set_price(Symbol::new(&o.symbol), o.price_cents)?;
    }

    info!(
        "rebalancing {} holdings, threshold {:.1}%",
        engine.holdings().len(),
        engine.drift_threshold() * 100.0
    );

    print!("{}", AllocationTable::new(&engine));
    println!();

    let orders = engine.rebalance()?;
    print!("{}", OrderTable::new(&orders));

    if !orders.is_empty() {
        println!();
        print!("{}", AllocationTable::new(&engine));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_valid_override() {
        let o = parse_price_override("AAPL=180.50").unwrap();
        assert_eq!(o.symbol, "AAPL");
        assert_eq!(o.price_cents, 180_50);
    }

    #[test]
    fn parse_integer_price() {
        let o = parse_price_override("FNTL=110").unwrap();
        assert_eq!(o.price_cents, 110_00);
    }

    #[test]
    fn reject_missing_equals() {
        assert!(parse_price_override("AAPL180").is_err());
    }

    #[test]
    fn reject_bad_price() {
        assert!(parse_price_override("AAPL=abc").is_err());
        assert!(parse_price_override("AAPL=-5").is_err());
        assert!(parse_price_override("AAPL=0").is_err());
    }

    #[test]
    fn reject_bad_symbol() {
        assert!(parse_price_override("=100").is_err());
        assert!(parse_price_override("TOOLONGNAME=100").is_err());
    }
}
