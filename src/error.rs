//! Error types for the rebalancing calculator.

use std::path::PathBuf;

use crate::types::Symbol;

/// All errors that can occur while configuring or rebalancing a portfolio.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("target allocations must sum to 1.0, got {sum:.4}")]
    AllocationSum { sum: f64 },

    #[error("target weight for {symbol} ({weight}) must be in (0.0, 1.0]")]
    WeightRange { symbol: Symbol, weight: f64 },

    #[error("duplicate symbol: {0}")]
    DuplicateSymbol(Symbol),

    #[error("no target allocation configured for held symbol {0}")]
    MissingTarget(Symbol),

    #[error("target symbol {0} has no holding in the portfolio")]
    MissingHolding(Symbol),

    #[error("unknown symbol: {0}")]
    UnknownSymbol(Symbol),

    #[error("portfolio file error: {0}")]
    Portfolio(String),

    #[error("failed to read portfolio file {path}: {source}")]
    PortfolioRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse portfolio JSON: {0}")]
    PortfolioParse(#[from] serde_json::Error),

    #[error("config error: {0}")]
    Config(String),

    #[error("failed to read config file {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    ConfigParse(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
