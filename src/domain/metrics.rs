//! Summary statistics over a finished simulation.

use std::fmt;

use super::engine::Engine;
use super::event::EngineEvent;

#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub ticks: usize,
    pub initial_cash: f64,
    pub final_portfolio_value: f64,
    pub total_return: f64,
    pub max_drawdown: f64,
    pub trades_closed: usize,
    pub trades_won: usize,
    pub win_rate: f64,
}

impl Summary {
    pub fn compute(engine: &Engine) -> Self {
        let initial_cash = engine.initial_cash();
        let equity = engine.history().portfolio_value_history();

        let final_portfolio_value = equity.last().copied().unwrap_or(initial_cash);
        let total_return = if initial_cash > 0.0 {
            (final_portfolio_value - initial_cash) / initial_cash
        } else {
            0.0
        };

        let (trades_closed, trades_won) = count_trades(engine);
        let win_rate = if trades_closed > 0 {
            trades_won as f64 / trades_closed as f64
        } else {
            0.0
        };

        Summary {
            ticks: engine.ticks_processed(),
            initial_cash,
            final_portfolio_value,
            total_return,
            max_drawdown: max_drawdown(equity),
            trades_closed,
            trades_won,
            win_rate,
        }
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "ticks processed:  {}", self.ticks)?;
        writeln!(f, "initial cash:     {:.2}", self.initial_cash)?;
        writeln!(f, "final portfolio:  {:.2}", self.final_portfolio_value)?;
        writeln!(f, "total return:     {:.2}%", self.total_return * 100.0)?;
        writeln!(f, "max drawdown:     {:.2}%", self.max_drawdown * 100.0)?;
        write!(
            f,
            "closed trades:    {} ({} won, {:.1}% win rate)",
            self.trades_closed,
            self.trades_won,
            self.win_rate * 100.0
        )
    }
}

/// A trade counts as won when its close proceeds exceed its entry cost,
/// i.e. realized P&L was positive. Proceeds come from the event log, which
/// records the close-time valuation the ledger was credited with.
fn count_trades(engine: &Engine) -> (usize, usize) {
    let mut closed = 0usize;
    let mut won = 0usize;
    for event in engine.events() {
        let EngineEvent::Closed { id, proceeds, .. } = event else {
            continue;
        };
        closed += 1;
        if let Some(position) = engine.position(*id) {
            if *proceeds > position.entry_cost() {
                won += 1;
            }
        }
    }
    (closed, won)
}

/// Largest peak-to-trough decline of the equity series, as a fraction of
/// the peak.
fn max_drawdown(equity: &[f64]) -> f64 {
    let mut peak = f64::MIN;
    let mut worst = 0.0f64;
    for &value in equity {
        if value > peak {
            peak = value;
        }
        if peak > 0.0 {
            let drawdown = (peak - value) / peak;
            if drawdown > worst {
                worst = drawdown;
            }
        }
    }
    worst
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::engine::EngineConfig;
    use crate::domain::ohlcv::{OhlcvBar, Tick};
    use crate::domain::position::Action;
    use crate::ports::strategy_port::Strategy;
    use approx::assert_relative_eq;
    use chrono::NaiveDate;

    struct Noop;

    impl Strategy for Noop {
        fn initialize(&mut self, _engine: &mut Engine) {}
        fn trade(&mut self, _engine: &mut Engine, _tick: &Tick) {}
    }

    fn btc_tick(day: u32, close: f64) -> Tick {
        Tick::new().with_bar(
            "BTC",
            OhlcvBar {
                timestamp: NaiveDate::from_ymd_opt(2024, 1, day)
                    .unwrap()
                    .and_hms_opt(0, 0, 0)
                    .unwrap(),
                open: close,
                high: close,
                low: close,
                close,
                volume: 1000.0,
            },
        )
    }

    #[test]
    fn max_drawdown_monotonic_rise_is_zero() {
        assert_relative_eq!(max_drawdown(&[100.0, 110.0, 120.0]), 0.0);
    }

    #[test]
    fn max_drawdown_single_dip() {
        // peak 200, trough 150
        let dd = max_drawdown(&[100.0, 200.0, 150.0, 180.0]);
        assert_relative_eq!(dd, 0.25);
    }

    #[test]
    fn max_drawdown_empty() {
        assert_relative_eq!(max_drawdown(&[]), 0.0);
    }

    #[test]
    fn summary_counts_winning_trades() {
        let mut engine = Engine::new(EngineConfig::new(10_000.0), &mut Noop);

        let t1 = btc_tick(1, 100.0);
        engine.tick(&mut Noop, &t1);
        let winner = engine
            .open(&t1, "BTC", 1.0, Action::Long, None, None)
            .unwrap();

        let t2 = btc_tick(2, 150.0);
        engine.tick(&mut Noop, &t2);
        engine.close(winner, &t2).unwrap();
        let loser = engine
            .open(&t2, "BTC", 1.0, Action::Long, None, None)
            .unwrap();

        let t3 = btc_tick(3, 120.0);
        engine.tick(&mut Noop, &t3);
        engine.close(loser, &t3).unwrap();

        let summary = Summary::compute(&engine);
        assert_eq!(summary.ticks, 3);
        assert_eq!(summary.trades_closed, 2);
        assert_eq!(summary.trades_won, 1);
        assert_relative_eq!(summary.win_rate, 0.5);
        // +50 on the winner, -30 on the loser
        assert_relative_eq!(summary.final_portfolio_value, 10_020.0);
        assert_relative_eq!(summary.total_return, 0.002);
    }

    #[test]
    fn summary_without_ticks() {
        let engine = Engine::new(EngineConfig::new(5_000.0), &mut Noop);
        let summary = Summary::compute(&engine);
        assert_eq!(summary.ticks, 0);
        assert_relative_eq!(summary.final_portfolio_value, 5_000.0);
        assert_relative_eq!(summary.total_return, 0.0);
        assert_relative_eq!(summary.win_rate, 0.0);
    }
}
