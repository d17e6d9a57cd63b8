//! Append-only recorded history: per-symbol OHLCV series, ledger time
//! series, and named metric series.

use chrono::NaiveDateTime;
use std::collections::HashMap;

use super::ohlcv::Tick;

/// Parallel series for one symbol. All six vectors always have equal
/// length: one element per tick in which the symbol appeared.
#[derive(Debug, Clone, Default)]
pub struct SymbolHistory {
    pub timestamps: Vec<NaiveDateTime>,
    pub open: Vec<f64>,
    pub high: Vec<f64>,
    pub low: Vec<f64>,
    pub close: Vec<f64>,
    pub volume: Vec<f64>,
}

impl SymbolHistory {
    pub fn len(&self) -> usize {
        self.close.len()
    }

    pub fn is_empty(&self) -> bool {
        self.close.is_empty()
    }

    pub fn last_close(&self) -> Option<f64> {
        self.close.last().copied()
    }
}

#[derive(Debug, Clone, Default)]
pub struct HistoryStore {
    symbols: HashMap<String, SymbolHistory>,
    cash: Vec<f64>,
    position_value: Vec<f64>,
    portfolio_value: Vec<f64>,
    metrics: HashMap<String, Vec<f64>>,
}

impl HistoryStore {
    pub fn new() -> Self {
        HistoryStore::default()
    }

    /// Append each symbol's bar to its series, creating the series set the
    /// first time a symbol is seen.
    pub fn record_tick(&mut self, tick: &Tick) {
        for (symbol, bar) in tick.iter() {
            let series = self.symbols.entry(symbol.to_string()).or_default();
            series.timestamps.push(bar.timestamp);
            series.open.push(bar.open);
            series.high.push(bar.high);
            series.low.push(bar.low);
            series.close.push(bar.close);
            series.volume.push(bar.volume);
        }
    }

    /// Append one value to each of the three ledger time series. Called
    /// exactly once per tick, so their length equals the tick count.
    pub fn record_ledger_snapshot(
        &mut self,
        cash: f64,
        position_value: f64,
        portfolio_value: f64,
    ) {
        self.cash.push(cash);
        self.position_value.push(position_value);
        self.portfolio_value.push(portfolio_value);
    }

    /// Append a value to a named metric series, independent of the tick
    /// cadence. The series is created on first use.
    pub fn record_metric(&mut self, key: &str, value: f64) {
        self.metrics.entry(key.to_string()).or_default().push(value);
    }

    pub fn symbol(&self, symbol: &str) -> Option<&SymbolHistory> {
        self.symbols.get(symbol)
    }

    pub fn symbols(&self) -> impl Iterator<Item = &str> {
        self.symbols.keys().map(String::as_str)
    }

    pub fn cash_history(&self) -> &[f64] {
        &self.cash
    }

    pub fn position_value_history(&self) -> &[f64] {
        &self.position_value
    }

    pub fn portfolio_value_history(&self) -> &[f64] {
        &self.portfolio_value
    }

    pub fn metric_series(&self, key: &str) -> Option<&[f64]> {
        self.metrics.get(key).map(Vec::as_slice)
    }

    pub fn metric_keys(&self) -> impl Iterator<Item = &str> {
        self.metrics.keys().map(String::as_str)
    }

    pub fn ticks_recorded(&self) -> usize {
        self.cash.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ohlcv::OhlcvBar;
    use chrono::NaiveDate;

    fn bar(day: u32, close: f64) -> OhlcvBar {
        OhlcvBar {
            timestamp: NaiveDate::from_ymd_opt(2024, 1, day)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap(),
            open: close - 1.0,
            high: close + 1.0,
            low: close - 2.0,
            close,
            volume: 1000.0,
        }
    }

    #[test]
    fn record_tick_creates_series_on_first_sight() {
        let mut store = HistoryStore::new();
        store.record_tick(&Tick::new().with_bar("BTC", bar(1, 100.0)));

        let series = store.symbol("BTC").unwrap();
        assert_eq!(series.len(), 1);
        assert_eq!(series.close, vec![100.0]);
        assert_eq!(series.open, vec![99.0]);
    }

    #[test]
    fn parallel_series_stay_equal_length() {
        let mut store = HistoryStore::new();
        store.record_tick(&Tick::new().with_bar("BTC", bar(1, 100.0)));
        store.record_tick(
            &Tick::new()
                .with_bar("BTC", bar(2, 110.0))
                .with_bar("ETH", bar(2, 50.0)),
        );

        let btc = store.symbol("BTC").unwrap();
        assert_eq!(btc.timestamps.len(), 2);
        assert_eq!(btc.open.len(), 2);
        assert_eq!(btc.high.len(), 2);
        assert_eq!(btc.low.len(), 2);
        assert_eq!(btc.close.len(), 2);
        assert_eq!(btc.volume.len(), 2);

        // ETH only appeared in the second tick
        assert_eq!(store.symbol("ETH").unwrap().len(), 1);
    }

    #[test]
    fn ledger_snapshots_track_tick_count() {
        let mut store = HistoryStore::new();
        store.record_ledger_snapshot(100.0, 0.0, 100.0);
        store.record_ledger_snapshot(90.0, 15.0, 105.0);

        assert_eq!(store.ticks_recorded(), 2);
        assert_eq!(store.cash_history(), &[100.0, 90.0]);
        assert_eq!(store.position_value_history(), &[0.0, 15.0]);
        assert_eq!(store.portfolio_value_history(), &[100.0, 105.0]);
    }

    #[test]
    fn metric_series_independent_of_ticks() {
        let mut store = HistoryStore::new();
        store.record_metric("rsi", 45.0);
        store.record_metric("rsi", 55.0);
        store.record_metric("drawdown", 0.1);

        assert_eq!(store.metric_series("rsi"), Some(&[45.0, 55.0][..]));
        assert_eq!(store.metric_series("drawdown"), Some(&[0.1][..]));
        assert_eq!(store.metric_series("missing"), None);
        assert_eq!(store.ticks_recorded(), 0);
    }

    #[test]
    fn last_close() {
        let mut store = HistoryStore::new();
        assert!(store.symbol("BTC").is_none());
        store.record_tick(&Tick::new().with_bar("BTC", bar(1, 100.0)));
        store.record_tick(&Tick::new().with_bar("BTC", bar(2, 120.0)));
        assert_eq!(store.symbol("BTC").unwrap().last_close(), Some(120.0));
    }
}
