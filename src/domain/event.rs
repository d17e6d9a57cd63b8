//! Structured engine event log.
//!
//! Every noteworthy engine action is recorded as an event: opens, closes,
//! rejected orders, risk triggers, and contained hook failures. Tests and
//! callers inspect the log instead of scraping console output; when the
//! engine is constructed verbose, each event is also printed as it occurs.

use chrono::NaiveDateTime;
use std::fmt;

use super::book::PositionId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookKind {
    Open,
    Close,
}

impl fmt::Display for HookKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HookKind::Open => write!(f, "open"),
            HookKind::Close => write!(f, "close"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerKind {
    StopLoss,
    TakeProfit,
}

impl fmt::Display for TriggerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TriggerKind::StopLoss => write!(f, "stop-loss"),
            TriggerKind::TakeProfit => write!(f, "take-profit"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    Opened {
        id: PositionId,
        symbol: String,
        quantity: f64,
        price: f64,
        timestamp: NaiveDateTime,
    },
    Closed {
        id: PositionId,
        symbol: String,
        proceeds: f64,
        timestamp: NaiveDateTime,
    },
    OpenRejected {
        symbol: String,
        required: f64,
        available: f64,
    },
    CloseIgnored {
        id: PositionId,
    },
    RiskTriggered {
        id: PositionId,
        trigger: TriggerKind,
        price: f64,
    },
    HookFailed {
        hook: HookKind,
        id: PositionId,
        reason: String,
    },
}

impl fmt::Display for EngineEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineEvent::Opened {
                id,
                symbol,
                quantity,
                price,
                timestamp,
            } => write!(
                f,
                "{timestamp}: ordered {quantity} {symbol} at {price} ({id})"
            ),
            EngineEvent::Closed {
                id,
                symbol,
                proceeds,
                timestamp,
            } => write!(f, "{timestamp}: closed {symbol} {id} for {proceeds:.2}"),
            EngineEvent::OpenRejected {
                symbol,
                required,
                available,
            } => write!(
                f,
                "order of {symbol} rejected: insufficient funds (need {required:.2}, have {available:.2})"
            ),
            EngineEvent::CloseIgnored { id } => {
                write!(f, "position {id} already closed")
            }
            EngineEvent::RiskTriggered { id, trigger, price } => {
                write!(f, "{trigger} triggered for {id} at {price}")
            }
            EngineEvent::HookFailed { hook, id, reason } => {
                write!(f, "exchange {hook} hook failed for {id}: {reason}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trigger_display() {
        assert_eq!(TriggerKind::StopLoss.to_string(), "stop-loss");
        assert_eq!(TriggerKind::TakeProfit.to_string(), "take-profit");
    }

    #[test]
    fn open_rejected_display() {
        let event = EngineEvent::OpenRejected {
            symbol: "BTC".into(),
            required: 10_000.0,
            available: 500.0,
        };
        assert_eq!(
            event.to_string(),
            "order of BTC rejected: insufficient funds (need 10000.00, have 500.00)"
        );
    }
}
