pub mod prediction;
pub mod signals;
pub mod symbols;
pub mod trade_store;

pub use prediction::ProfitPredictor;
pub use signals::{analyze, IndicatorEngine, MarketAnalysis};
pub use trade_store::TradeStore;
