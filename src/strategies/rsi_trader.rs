//! RSI threshold-crossing strategy.
//!
//! Goes long when RSI crosses up through the lower threshold, short when it
//! crosses down through the upper threshold. Stop-loss and take-profit are
//! placed as offsets from the current price, and each order risks a fixed
//! fraction of current cash.

use crate::domain::engine::Engine;
use crate::domain::indicator::rsi;
use crate::domain::ohlcv::Tick;
use crate::domain::position::Action;
use crate::ports::strategy_port::Strategy;

#[derive(Debug, Clone)]
pub struct RsiTrader {
    pub symbol: String,
    pub window: usize,
    pub lower: f64,
    pub upper: f64,
    pub stop_loss_pct: f64,
    pub take_profit_pct: f64,
    pub order_fraction: f64,
}

impl RsiTrader {
    pub fn new(symbol: impl Into<String>, window: usize) -> Self {
        RsiTrader {
            symbol: symbol.into(),
            window,
            lower: 30.0,
            upper: 70.0,
            stop_loss_pct: 0.015,
            take_profit_pct: 0.025,
            order_fraction: 0.01,
        }
    }
}

impl Strategy for RsiTrader {
    fn initialize(&mut self, _engine: &mut Engine) {}

    fn trade(&mut self, engine: &mut Engine, tick: &Tick) {
        let Some(price) = tick.close(&self.symbol) else {
            return;
        };
        let Some(history) = engine.history().symbol(&self.symbol) else {
            return;
        };

        let series = rsi(&history.open, &history.close, self.window);
        let [.., prev, last] = series[..] else {
            return;
        };

        let stop_offset = price * self.stop_loss_pct;
        let profit_offset = price * self.take_profit_pct;
        let quantity = (engine.cash() * self.order_fraction) / price;

        let long_signal = prev < self.lower && last >= self.lower;
        let short_signal = prev > self.upper && last <= self.upper;

        if short_signal {
            // rejected orders are non-fatal; keep trading
            let _ = engine.open(
                tick,
                &self.symbol,
                quantity,
                Action::Short,
                Some(price + stop_offset),
                Some(price - profit_offset),
            );
        }
        if long_signal {
            let _ = engine.open(
                tick,
                &self.symbol,
                quantity,
                Action::Long,
                Some(price - stop_offset),
                Some(price + profit_offset),
            );
        }
    }
}
