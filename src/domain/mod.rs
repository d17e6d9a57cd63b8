//! Core domain types and logic.

pub mod book;
pub mod engine;
pub mod error;
pub mod event;
pub mod history;
pub mod indicator;
pub mod ledger;
pub mod metrics;
pub mod ohlcv;
pub mod position;
