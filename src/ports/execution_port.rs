//! External execution hook port.
//!
//! The engine calls these hooks after a position is opened or closed in the
//! simulated ledger. An adapter may forward the order to a real exchange;
//! the shipped default does nothing. Hook failures are contained by the
//! engine and never roll back the ledger: the simulated state and the
//! external side effect are deliberately decoupled. Adapters performing
//! real I/O are responsible for their own timeouts so a hook cannot stall
//! tick processing.

use crate::domain::position::Position;

#[derive(Debug, Clone, thiserror::Error)]
#[error("{reason}")]
pub struct HookError {
    pub reason: String,
}

impl HookError {
    pub fn new(reason: impl Into<String>) -> Self {
        HookError {
            reason: reason.into(),
        }
    }
}

pub trait ExecutionPort {
    fn on_open(&mut self, position: &Position) -> Result<(), HookError>;
    fn on_close(&mut self, position: &Position) -> Result<(), HookError>;
}

/// No-op execution: simulation only, no external exchange.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullExecution;

impl ExecutionPort for NullExecution {
    fn on_open(&mut self, _position: &Position) -> Result<(), HookError> {
        Ok(())
    }

    fn on_close(&mut self, _position: &Position) -> Result<(), HookError> {
        Ok(())
    }
}
