//! Bundled strategy implementations.

pub mod rsi_trader;
