//! Ticker autocomplete over a fixed list of NSE symbols.

use crate::config::EXCHANGE_SUFFIXES;

/// Tickers offered by the search box.
pub const STOCK_LIST: [&str; 30] = [
    "RELIANCE", "TCS", "INFY", "HDFCBANK", "ICICIBANK",
    "SBIN", "AXISBANK", "ITC", "WIPRO", "LT",
    "BAJFINANCE", "HCLTECH", "MARUTI", "TATAMOTORS",
    "ADANIENT", "ADANIPORTS", "TITAN", "SUNPHARMA",
    "ONGC", "COALINDIA", "NTPC", "POWERGRID",
    "BPCL", "IOC", "BHARTIARTL", "ASIANPAINT",
    "HINDUNILVR", "ULTRACEMCO", "JSWSTEEL", "VEDL",
];

/// Trimmed, upper-cased ticker as stored in the trade log. Exchange
/// suffixes are dropped so `tcs.ns` and `TCS` name the same log.
pub fn normalize(raw: &str) -> Option<String> {
    let symbol = raw.trim().to_uppercase();
    let bare = EXCHANGE_SUFFIXES
        .iter()
        .find_map(|suffix| symbol.strip_suffix(suffix))
        .unwrap_or(symbol.as_str())
        .trim_end();
    (!bare.is_empty()).then(|| bare.to_string())
}

/// Tickers containing `query`, case-insensitively, in list order.
pub fn search(query: &str) -> Vec<&'static str> {
    let Some(query) = normalize(query) else {
        return Vec::new();
    };

    STOCK_LIST
        .iter()
        .copied()
        .filter(|symbol| symbol.contains(query.as_str()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_case_insensitive() {
        assert_eq!(search("tcs"), vec!["TCS"]);
        assert_eq!(search("Adani"), vec!["ADANIENT", "ADANIPORTS"]);
    }

    #[test]
    fn test_search_substring_in_list_order() {
        assert_eq!(search("BANK"), vec!["HDFCBANK", "ICICIBANK", "AXISBANK"]);
    }

    #[test]
    fn test_search_empty_query() {
        assert!(search("").is_empty());
        assert!(search("   ").is_empty());
    }

    #[test]
    fn test_search_no_match() {
        assert!(search("NASDAQ").is_empty());
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize(" reliance "), Some("RELIANCE".to_string()));
        assert_eq!(normalize(""), None);
    }

    #[test]
    fn test_normalize_drops_exchange_suffix() {
        assert_eq!(normalize("reliance.ns"), Some("RELIANCE".to_string()));
        assert_eq!(normalize(" Tcs.BO "), Some("TCS".to_string()));
        assert_eq!(normalize(".NS"), None);
        assert_eq!(search("infy.ns"), vec!["INFY"]);
    }
}
