//! SQLite persistence for the trader's trade log.
//!
//! One row per closed trade: symbol, buy and sell price, signed profit and
//! the profit/loss outcome label read by the profit predictor.

use rusqlite::{params, Connection, Row};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};
use tracing::{debug, info};

use crate::error::{AppError, Result};
use crate::types::{StoredTrade, TradeRecord};

/// SQLite store for the trade log.
pub struct TradeStore {
    conn: Mutex<Connection>,
}

impl TradeStore {
    /// Open (or create) the trade log at the given path.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open(path)?;
        let store = Self {
            conn: Mutex::new(conn),
        };
        store.init_schema()?;
        info!("Trade store initialized");
        Ok(store)
    }

    /// Create an in-memory trade log (for testing).
    pub fn new_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self {
            conn: Mutex::new(conn),
        };
        store.init_schema()?;
        debug!("In-memory trade store initialized");
        Ok(store)
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| AppError::Internal("trade store lock poisoned".to_string()))
    }

    fn init_schema(&self) -> Result<()> {
        let conn = self.lock()?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS trades (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                stock TEXT NOT NULL,
                buy REAL NOT NULL,
                sell REAL NOT NULL,
                profit REAL NOT NULL,
                result INTEGER NOT NULL,
                created_at INTEGER NOT NULL
            )",
            [],
        )?;

        conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_trades_stock ON trades(stock)",
            [],
        )?;

        Ok(())
    }

    /// Record a closed trade.
    pub fn insert(&self, symbol: &str, record: &TradeRecord) -> Result<StoredTrade> {
        let conn = self.lock()?;
        let created_at = chrono::Utc::now().timestamp_millis();
        conn.execute(
            "INSERT INTO trades (stock, buy, sell, profit, result, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                symbol,
                record.buy_price,
                record.sell_price,
                record.profit,
                record.result,
                created_at,
            ],
        )?;
        let id = conn.last_insert_rowid();
        debug!("Recorded trade {} for {}", id, symbol);
        Ok(StoredTrade {
            id,
            symbol: symbol.to_string(),
            record: *record,
            created_at,
        })
    }

    /// Trade history across all symbols, newest first.
    pub fn list(&self, limit: usize) -> Result<Vec<StoredTrade>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(
            "SELECT id, stock, buy, sell, profit, result, created_at
             FROM trades ORDER BY id DESC LIMIT ?1",
        )?;
        let trades = stmt
            .query_map(params![limit as i64], row_to_trade)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(trades)
    }

    /// Every trade for `symbol`, oldest first, so the last record is the
    /// most recent trade.
    pub fn records_for(&self, symbol: &str) -> Result<Vec<TradeRecord>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(
            "SELECT buy, sell, profit, result FROM trades WHERE stock = ?1 ORDER BY id ASC",
        )?;
        let records = stmt
            .query_map(params![symbol], |row| {
                Ok(TradeRecord {
                    buy_price: row.get(0)?,
                    sell_price: row.get(1)?,
                    profit: row.get(2)?,
                    result: row.get(3)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(records)
    }
}

fn row_to_trade(row: &Row<'_>) -> rusqlite::Result<StoredTrade> {
    Ok(StoredTrade {
        id: row.get(0)?,
        symbol: row.get(1)?,
        record: TradeRecord {
            buy_price: row.get(2)?,
            sell_price: row.get(3)?,
            profit: row.get(4)?,
            result: row.get(5)?,
        },
        created_at: row.get(6)?,
    })
}
