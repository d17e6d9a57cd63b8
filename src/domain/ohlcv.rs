//! OHLCV bar and tick representation.

use chrono::NaiveDateTime;
use std::collections::HashMap;

/// One symbol's market data for a single timestep.
#[derive(Debug, Clone, PartialEq)]
pub struct OhlcvBar {
    pub timestamp: NaiveDateTime,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl OhlcvBar {
    /// (high + low + close) / 3
    pub fn typical_price(&self) -> f64 {
        (self.high + self.low + self.close) / 3.0
    }
}

/// One unit of incoming market data: bars for one or more symbols sharing a
/// timestep. Close is the authoritative price for valuation, opening and
/// closing within the tick.
#[derive(Debug, Clone, Default)]
pub struct Tick {
    bars: HashMap<String, OhlcvBar>,
}

impl Tick {
    pub fn new() -> Self {
        Tick {
            bars: HashMap::new(),
        }
    }

    pub fn insert(&mut self, symbol: impl Into<String>, bar: OhlcvBar) {
        self.bars.insert(symbol.into(), bar);
    }

    pub fn with_bar(mut self, symbol: impl Into<String>, bar: OhlcvBar) -> Self {
        self.insert(symbol, bar);
        self
    }

    pub fn bar(&self, symbol: &str) -> Option<&OhlcvBar> {
        self.bars.get(symbol)
    }

    pub fn close(&self, symbol: &str) -> Option<f64> {
        self.bars.get(symbol).map(|b| b.close)
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.bars.contains_key(symbol)
    }

    pub fn symbols(&self) -> impl Iterator<Item = &str> {
        self.bars.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &OhlcvBar)> {
        self.bars.iter().map(|(s, b)| (s.as_str(), b))
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }
}
