//! Technical indicators, pure functions over price history slices.
//!
//! The engine makes no assumptions about these beyond purity: strategies
//! feed them slices of the recorded history and read back a series.

pub mod rsi;

pub use rsi::{rsi, rsi_with};
