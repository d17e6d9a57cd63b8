//! Strategy capability trait.

use crate::domain::engine::Engine;
use crate::domain::ohlcv::Tick;

/// Trading logic plugged into the engine. Both methods are required: a
/// type that cannot initialize or trade is not a strategy.
///
/// `trade` runs once per tick, after the risk sweep, and is the only point
/// where strategy-driven opens and closes happen. Orders placed here take
/// effect in the ledger immediately but participate in valuation, history
/// and risk checks starting with the next tick.
pub trait Strategy {
    /// Called exactly once, when the engine is constructed.
    fn initialize(&mut self, engine: &mut Engine);

    /// Called once per tick. May call `engine.open` / `engine.close`.
    fn trade(&mut self, engine: &mut Engine, tick: &Tick);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::engine::EngineConfig;

    struct CountingStrategy {
        initialized: usize,
        trades: usize,
    }

    impl Strategy for CountingStrategy {
        fn initialize(&mut self, _engine: &mut Engine) {
            self.initialized += 1;
        }

        fn trade(&mut self, _engine: &mut Engine, _tick: &Tick) {
            self.trades += 1;
        }
    }

    #[test]
    fn initialize_called_once_at_construction() {
        let mut strategy = CountingStrategy {
            initialized: 0,
            trades: 0,
        };
        let mut engine = Engine::new(EngineConfig::new(1_000.0), &mut strategy);
        assert_eq!(strategy.initialized, 1);
        assert_eq!(strategy.trades, 0);

        engine.tick(&mut strategy, &Tick::new());
        engine.tick(&mut strategy, &Tick::new());
        assert_eq!(strategy.initialized, 1);
        assert_eq!(strategy.trades, 2);
    }
}
