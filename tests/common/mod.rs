#![allow(dead_code)]

use chrono::{NaiveDate, NaiveDateTime};
use ticksim::domain::engine::{Engine, EngineConfig};
use ticksim::domain::ohlcv::{OhlcvBar, Tick};
use ticksim::ports::execution_port::{ExecutionPort, HookError};
use ticksim::ports::strategy_port::Strategy;

pub fn ts(day: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 1, day)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
}

pub fn make_bar(day: u32, close: f64) -> OhlcvBar {
    OhlcvBar {
        timestamp: ts(day),
        open: close - 1.0,
        high: close + 1.0,
        low: close - 2.0,
        close,
        volume: 1000.0,
    }
}

/// Tick covering one or more symbols, all at the same day.
pub fn make_tick(day: u32, closes: &[(&str, f64)]) -> Tick {
    let mut tick = Tick::new();
    for &(symbol, close) in closes {
        tick.insert(symbol, make_bar(day, close));
    }
    tick
}

/// Strategy that does nothing; the test drives the engine directly.
pub struct NoopStrategy;

impl Strategy for NoopStrategy {
    fn initialize(&mut self, _engine: &mut Engine) {}
    fn trade(&mut self, _engine: &mut Engine, _tick: &Tick) {}
}

pub fn make_engine(cash: f64) -> Engine {
    Engine::new(EngineConfig::new(cash), &mut NoopStrategy)
}

/// Execution hook that fails on demand, counting invocations.
pub struct FailingExecution {
    pub fail_open: bool,
    pub fail_close: bool,
    pub opens: usize,
    pub closes: usize,
}

impl FailingExecution {
    pub fn new(fail_open: bool, fail_close: bool) -> Self {
        FailingExecution {
            fail_open,
            fail_close,
            opens: 0,
            closes: 0,
        }
    }
}

impl ExecutionPort for FailingExecution {
    fn on_open(&mut self, _position: &ticksim::domain::position::Position) -> Result<(), HookError> {
        self.opens += 1;
        if self.fail_open {
            Err(HookError::new("exchange unreachable"))
        } else {
            Ok(())
        }
    }

    fn on_close(
        &mut self,
        _position: &ticksim::domain::position::Position,
    ) -> Result<(), HookError> {
        self.closes += 1;
        if self.fail_close {
            Err(HookError::new("exchange unreachable"))
        } else {
            Ok(())
        }
    }
}
