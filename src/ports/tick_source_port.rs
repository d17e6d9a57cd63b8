//! Tick data source port trait.

use chrono::NaiveDateTime;

use crate::domain::error::TicksimError;
use crate::domain::ohlcv::Tick;

pub trait TickSourcePort {
    /// Load bars for the given symbols and merge them on timestamp into an
    /// ordered tick sequence. A tick carries a bar for every symbol that
    /// has data at that timestamp; symbols without one are simply absent.
    fn load_ticks(&self, symbols: &[String]) -> Result<Vec<Tick>, TicksimError>;

    fn list_symbols(&self) -> Result<Vec<String>, TicksimError>;

    /// First timestamp, last timestamp and row count for a symbol, or None
    /// if the symbol has no rows.
    fn symbol_range(
        &self,
        symbol: &str,
    ) -> Result<Option<(NaiveDateTime, NaiveDateTime, usize)>, TicksimError>;
}
