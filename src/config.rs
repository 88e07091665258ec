use std::env;

use crate::error::{AppError, Result};
use crate::types::LookbackPeriod;

/// Exchange suffixes accepted as-is on a ticker.
pub(crate) const EXCHANGE_SUFFIXES: [&str; 2] = [".NS", ".BO"];

/// Suffix appended to bare tickers (National Stock Exchange).
const DEFAULT_EXCHANGE_SUFFIX: &str = ".NS";

/// Lookback windows and band width used by the indicator engine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndicatorConfig {
    /// Fast simple moving average window.
    pub ma_fast: usize,
    /// Slow simple moving average window.
    pub ma_slow: usize,
    /// RSI averaging window.
    pub rsi_period: usize,
    /// MACD fast EMA span.
    pub macd_fast: usize,
    /// MACD slow EMA span.
    pub macd_slow: usize,
    /// MACD signal line EMA span.
    pub macd_signal: usize,
    /// Bollinger middle band / standard deviation window.
    pub bb_period: usize,
    /// Bollinger band width in standard deviations.
    pub bb_std_dev: f64,
}

impl Default for IndicatorConfig {
    fn default() -> Self {
        Self {
            ma_fast: 20,
            ma_slow: 50,
            rsi_period: 14,
            macd_fast: 12,
            macd_slow: 26,
            macd_signal: 9,
            bb_period: 20,
            bb_std_dev: 2.0,
        }
    }
}

impl IndicatorConfig {
    /// Check that every window is usable.
    pub fn validate(&self) -> Result<()> {
        let periods = [
            ("ma_fast", self.ma_fast),
            ("ma_slow", self.ma_slow),
            ("rsi_period", self.rsi_period),
            ("macd_fast", self.macd_fast),
            ("macd_slow", self.macd_slow),
            ("macd_signal", self.macd_signal),
            ("bb_period", self.bb_period),
        ];
        if let Some((name, _)) = periods.iter().find(|(_, p)| *p == 0) {
            return Err(AppError::InvalidConfig(format!("{} must be positive", name)));
        }
        if self.ma_fast >= self.ma_slow {
            return Err(AppError::InvalidConfig(
                "ma_fast must be shorter than ma_slow".to_string(),
            ));
        }
        if self.macd_fast >= self.macd_slow {
            return Err(AppError::InvalidConfig(
                "macd_fast must be shorter than macd_slow".to_string(),
            ));
        }
        // Sample standard deviation needs two observations.
        if self.bb_period < 2 {
            return Err(AppError::InvalidConfig(
                "bb_period must be at least 2".to_string(),
            ));
        }
        if !self.bb_std_dev.is_finite() || self.bb_std_dev <= 0.0 {
            return Err(AppError::InvalidConfig(
                "bb_std_dev must be a positive number".to_string(),
            ));
        }
        Ok(())
    }
}

/// Normalized exchange ticker, e.g. `RELIANCE.NS`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarketSymbol(String);

impl MarketSymbol {
    /// Upper-case the ticker and qualify it with an exchange suffix.
    pub fn parse(raw: &str) -> Result<Self> {
        let symbol = raw.trim().to_uppercase();
        if symbol.is_empty() {
            return Err(AppError::BadRequest("Enter Stock Symbol".to_string()));
        }
        if symbol.chars().any(char::is_whitespace) {
            return Err(AppError::BadRequest(format!("Invalid stock symbol: {}", raw)));
        }

        if EXCHANGE_SUFFIXES.iter().any(|s| symbol.ends_with(s)) {
            Ok(Self(symbol))
        } else {
            Ok(Self(format!("{}{}", symbol, DEFAULT_EXCHANGE_SUFFIX)))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for MarketSymbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A validated market analysis request.
#[derive(Debug, Clone, PartialEq)]
pub struct MarketQuery {
    pub symbol: MarketSymbol,
    pub period: LookbackPeriod,
}

impl MarketQuery {
    /// Build a query from raw request parameters, falling back to
    /// `default_period` when none is given.
    pub fn parse(stock: &str, period: Option<&str>, default_period: LookbackPeriod) -> Result<Self> {
        let symbol = MarketSymbol::parse(stock)?;
        let period = match period {
            Some(p) => LookbackPeriod::from_str(p)
                .ok_or_else(|| AppError::BadRequest(format!("Unknown period: {}", p)))?,
            None => default_period,
        };
        Ok(Self { symbol, period })
    }
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server host address.
    pub host: String,
    /// Server port.
    pub port: u16,
    /// Path of the SQLite trade log.
    pub database_path: String,
    /// Lookback window used when a request names none.
    pub default_period: LookbackPeriod,
    /// Fewest trades a symbol needs before a profit prediction is attempted.
    pub min_trade_records: usize,
    /// Indicator windows.
    pub indicators: IndicatorConfig,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3001),
            database_path: env::var("TRADES_DB_PATH").unwrap_or_else(|_| "trades.db".to_string()),
            default_period: env::var("DEFAULT_PERIOD")
                .ok()
                .and_then(|v| LookbackPeriod::from_str(&v))
                .unwrap_or_default(),
            min_trade_records: env::var("MIN_TRADE_RECORDS")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|n: &usize| *n > 0)
                .unwrap_or(5),
            indicators: IndicatorConfig::default(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
