//! Tick orchestration engine.
//!
//! `tick` drives one timestep in a fixed order:
//!
//! 1. mark-to-market, against this tick's prices but the position set as it
//!    stood entering the tick
//! 2. history capture: the tick's bars, then a ledger snapshot
//! 3. risk pass: stop-loss/take-profit checks over the open set, closing
//!    through the same path strategies use
//! 4. sweep: staged closes move out of the open set
//! 5. strategy invocation
//!
//! The order is a contract, not an implementation detail: reordering 1-4
//! changes valuation semantics. Trades placed by the strategy in step 5
//! mutate the ledger immediately but are first valued, recorded and
//! risk-checked on the next tick.

use std::collections::HashMap;

use super::book::{PositionBook, PositionId};
use super::error::EngineError;
use super::event::{EngineEvent, HookKind, TriggerKind};
use super::history::HistoryStore;
use super::ledger::Ledger;
use super::ohlcv::Tick;
use super::position::{Action, Position, Status};
use crate::ports::execution_port::{ExecutionPort, NullExecution};
use crate::ports::strategy_port::Strategy;

#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    pub initial_cash: f64,
    pub verbose: bool,
}

impl EngineConfig {
    pub fn new(initial_cash: f64) -> Self {
        EngineConfig {
            initial_cash,
            verbose: false,
        }
    }

    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }
}

pub struct Engine {
    config: EngineConfig,
    ledger: Ledger,
    book: PositionBook,
    history: HistoryStore,
    execution: Box<dyn ExecutionPort>,
    events: Vec<EngineEvent>,
    last_close: HashMap<String, f64>,
    ticks_processed: usize,
}

impl Engine {
    /// Build an engine with no external execution and run the strategy's
    /// one-time initialization.
    pub fn new(config: EngineConfig, strategy: &mut dyn Strategy) -> Self {
        Self::with_execution(config, Box::new(NullExecution), strategy)
    }

    pub fn with_execution(
        config: EngineConfig,
        execution: Box<dyn ExecutionPort>,
        strategy: &mut dyn Strategy,
    ) -> Self {
        let ledger = Ledger::new(config.initial_cash);
        let mut engine = Engine {
            config,
            ledger,
            book: PositionBook::new(),
            history: HistoryStore::new(),
            execution,
            events: Vec::new(),
            last_close: HashMap::new(),
            ticks_processed: 0,
        };
        strategy.initialize(&mut engine);
        engine
    }

    /// Process one tick of market data.
    pub fn tick(&mut self, strategy: &mut dyn Strategy, tick: &Tick) {
        for (symbol, bar) in tick.iter() {
            self.last_close.insert(symbol.to_string(), bar.close);
        }

        self.mark_to_market();

        self.history.record_tick(tick);
        self.history.record_ledger_snapshot(
            self.ledger.cash(),
            self.ledger.position_value(),
            self.ledger.portfolio_value(),
        );

        self.check_open_positions(tick);
        self.book.sweep();

        strategy.trade(self, tick);
        self.ticks_processed += 1;
    }

    /// Open a position at the current tick's close for `symbol`.
    ///
    /// Fails without mutating any state when the quantity is not positive,
    /// the symbol has no bar in this tick, or cash cannot cover
    /// quantity * close. The external open hook runs after the ledger
    /// commit; its failure is contained and does not undo the open.
    pub fn open(
        &mut self,
        tick: &Tick,
        symbol: &str,
        quantity: f64,
        action: Action,
        stop_loss: Option<f64>,
        take_profit: Option<f64>,
    ) -> Result<PositionId, EngineError> {
        if !(quantity > 0.0) {
            return Err(EngineError::InvalidQuantity { quantity });
        }
        let Some(bar) = tick.bar(symbol) else {
            return Err(EngineError::UnknownSymbol {
                symbol: symbol.to_string(),
            });
        };

        let price = bar.close;
        let timestamp = bar.timestamp;
        let cost = quantity * price;

        if !self.ledger.can_afford(cost) {
            let available = self.ledger.cash();
            self.emit(EngineEvent::OpenRejected {
                symbol: symbol.to_string(),
                required: cost,
                available,
            });
            return Err(EngineError::InsufficientFunds {
                symbol: symbol.to_string(),
                required: cost,
                available,
            });
        }

        let position = Position {
            symbol: symbol.to_string(),
            quantity,
            entry_price: price,
            entry_timestamp: timestamp,
            action,
            status: Status::Open,
            stop_loss,
            take_profit,
        };
        let id = self.book.insert(position);
        self.ledger.apply_open(cost);

        self.emit(EngineEvent::Opened {
            id,
            symbol: symbol.to_string(),
            quantity,
            price,
            timestamp,
        });

        let hook_result = match self.book.get(id) {
            Some(position) => self.execution.on_open(position),
            None => Ok(()),
        };
        if let Err(err) = hook_result {
            self.emit(EngineEvent::HookFailed {
                hook: HookKind::Open,
                id,
                reason: err.to_string(),
            });
        }

        Ok(id)
    }

    /// Close a position at the current tick's close for its symbol.
    ///
    /// Closing an already-closed position is a diagnosable no-op. The
    /// position is only staged for removal here; it leaves the open set at
    /// the next sweep, so closes issued while iterating the open set are
    /// safe.
    pub fn close(&mut self, id: PositionId, tick: &Tick) -> Result<(), EngineError> {
        let (is_open, symbol) = match self.book.get(id) {
            Some(position) => (position.is_open(), position.symbol.clone()),
            None => return Err(EngineError::UnknownPosition { id }),
        };
        if !is_open {
            self.emit(EngineEvent::CloseIgnored { id });
            return Err(EngineError::AlreadyClosed { id });
        }

        let Some(bar) = tick.bar(&symbol) else {
            return Err(EngineError::UnknownSymbol { symbol });
        };
        let price = bar.close;
        let timestamp = bar.timestamp;

        let proceeds = self
            .book
            .get(id)
            .ok_or(EngineError::UnknownPosition { id })?
            .mark_value(price);

        self.ledger.apply_close(proceeds);
        if let Some(position) = self.book.get_mut(id) {
            position.status = Status::Closed;
        }
        self.book.stage_removal(id);

        self.emit(EngineEvent::Closed {
            id,
            symbol,
            proceeds,
            timestamp,
        });

        let hook_result = match self.book.get(id) {
            Some(position) => self.execution.on_close(position),
            None => Ok(()),
        };
        if let Err(err) = hook_result {
            self.emit(EngineEvent::HookFailed {
                hook: HookKind::Close,
                id,
                reason: err.to_string(),
            });
        }

        Ok(())
    }

    /// Append a value to a named metric series.
    pub fn record_metric(&mut self, key: &str, value: f64) {
        self.history.record_metric(key, value);
    }

    pub fn cash(&self) -> f64 {
        self.ledger.cash()
    }

    pub fn position_value(&self) -> f64 {
        self.ledger.position_value()
    }

    pub fn portfolio_value(&self) -> f64 {
        self.ledger.portfolio_value()
    }

    pub fn initial_cash(&self) -> f64 {
        self.config.initial_cash
    }

    pub fn position(&self, id: PositionId) -> Option<&Position> {
        self.book.get(id)
    }

    pub fn open_positions(&self) -> impl Iterator<Item = (PositionId, &Position)> {
        self.book.open_positions()
    }

    pub fn closed_positions(&self) -> impl Iterator<Item = (PositionId, &Position)> {
        self.book.closed_positions()
    }

    pub fn open_position_ids(&self) -> Vec<PositionId> {
        self.book.open_ids().to_vec()
    }

    pub fn history(&self) -> &HistoryStore {
        &self.history
    }

    pub fn events(&self) -> &[EngineEvent] {
        &self.events
    }

    pub fn ticks_processed(&self) -> usize {
        self.ticks_processed
    }

    /// Revalue the open positions. A position whose symbol has not appeared
    /// in any tick yet is carried at its entry price; one missing from the
    /// current tick is carried at its last observed close.
    fn mark_to_market(&mut self) {
        let marks: Vec<f64> = self
            .book
            .open_positions()
            .map(|(_, position)| {
                let price = self
                    .last_close
                    .get(&position.symbol)
                    .copied()
                    .unwrap_or(position.entry_price);
                position.mark_value(price)
            })
            .collect();
        self.ledger.mark_to_market(marks);
    }

    /// Stop-loss/take-profit pass over the open set as it stood entering
    /// the tick. Both checks are independent; the status guard in `close`
    /// makes a double trigger close the position exactly once.
    fn check_open_positions(&mut self, tick: &Tick) {
        let open: Vec<PositionId> = self.book.open_ids().to_vec();
        for id in open {
            let Some(price) = self
                .book
                .get(id)
                .filter(|p| p.is_open())
                .and_then(|p| tick.close(&p.symbol))
            else {
                continue;
            };

            if self.book.get(id).is_some_and(|p| p.should_stop_loss(price)) {
                self.emit(EngineEvent::RiskTriggered {
                    id,
                    trigger: TriggerKind::StopLoss,
                    price,
                });
                let _ = self.close(id, tick);
            }

            if self
                .book
                .get(id)
                .is_some_and(|p| p.is_open() && p.should_take_profit(price))
            {
                self.emit(EngineEvent::RiskTriggered {
                    id,
                    trigger: TriggerKind::TakeProfit,
                    price,
                });
                let _ = self.close(id, tick);
            }
        }
    }

    fn emit(&mut self, event: EngineEvent) {
        if self.config.verbose {
            eprintln!("{event}");
        }
        self.events.push(event);
    }
}
