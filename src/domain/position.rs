//! Position entity and stop-loss/take-profit trigger checks.

use chrono::NaiveDateTime;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Long,
    Short,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Open,
    Closed,
}

/// One open or closed trade. Stop-loss and take-profit, when set, are
/// absolute prices fixed at open time, not offsets. Status moves
/// open -> closed exactly once, driven by the engine.
#[derive(Debug, Clone, PartialEq)]
pub struct Position {
    pub symbol: String,
    pub quantity: f64,
    pub entry_price: f64,
    pub entry_timestamp: NaiveDateTime,
    pub action: Action,
    pub status: Status,
    pub stop_loss: Option<f64>,
    pub take_profit: Option<f64>,
}

impl Position {
    pub fn is_open(&self) -> bool {
        self.status == Status::Open
    }

    pub fn is_long(&self) -> bool {
        self.action == Action::Long
    }

    pub fn is_short(&self) -> bool {
        self.action == Action::Short
    }

    /// Mark-to-market value at `price`. For a short this is the entry
    /// notional plus the gain when price falls:
    /// quantity * (2 * entry - price). The same formula gives the proceeds
    /// credited on close.
    pub fn mark_value(&self, price: f64) -> f64 {
        match self.action {
            Action::Long => self.quantity * price,
            Action::Short => self.quantity * (2.0 * self.entry_price - price),
        }
    }

    /// Entry cost reserved from cash at open time.
    pub fn entry_cost(&self) -> f64 {
        self.quantity * self.entry_price
    }

    /// Strict comparison: a price exactly at the threshold does not trigger.
    pub fn should_stop_loss(&self, price: f64) -> bool {
        let Some(stop_loss) = self.stop_loss else {
            return false;
        };
        match self.action {
            Action::Long => price < stop_loss,
            Action::Short => price > stop_loss,
        }
    }

    /// Strict comparison: a price exactly at the threshold does not trigger.
    pub fn should_take_profit(&self, price: f64) -> bool {
        let Some(take_profit) = self.take_profit else {
            return false;
        };
        match self.action {
            Action::Long => price > take_profit,
            Action::Short => price < take_profit,
        }
    }
}
