//! CSV tick data adapter.
//!
//! Reads one `{symbol}.csv` file per symbol from a base directory, columns
//! `timestamp,open,high,low,close,volume`, and merges the rows of all
//! requested symbols on timestamp into an ordered tick sequence.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use crate::domain::error::TicksimError;
use crate::domain::ohlcv::{OhlcvBar, Tick};
use crate::ports::tick_source_port::TickSourcePort;

pub struct CsvTickAdapter {
    base_path: PathBuf,
}

impl CsvTickAdapter {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    fn csv_path(&self, symbol: &str) -> PathBuf {
        self.base_path.join(format!("{}.csv", symbol))
    }

    fn read_bars(&self, symbol: &str) -> Result<Vec<OhlcvBar>, TicksimError> {
        let path = self.csv_path(symbol);
        let content = fs::read_to_string(&path).map_err(|e| TicksimError::Data {
            reason: format!("failed to read {}: {}", path.display(), e),
        })?;

        let mut rdr = csv::Reader::from_reader(content.as_bytes());
        let mut bars = Vec::new();

        for result in rdr.records() {
            let record = result.map_err(|e| TicksimError::Data {
                reason: format!("CSV parse error in {}: {}", path.display(), e),
            })?;

            let timestamp_str = record.get(0).ok_or_else(|| TicksimError::Data {
                reason: "missing timestamp column".into(),
            })?;
            let timestamp = parse_timestamp(timestamp_str)?;

            let mut field = |index: usize, name: &str| -> Result<f64, TicksimError> {
                record
                    .get(index)
                    .ok_or_else(|| TicksimError::Data {
                        reason: format!("missing {name} column"),
                    })?
                    .parse()
                    .map_err(|e| TicksimError::Data {
                        reason: format!("invalid {name} value: {e}"),
                    })
            };

            bars.push(OhlcvBar {
                timestamp,
                open: field(1, "open")?,
                high: field(2, "high")?,
                low: field(3, "low")?,
                close: field(4, "close")?,
                volume: field(5, "volume")?,
            });
        }

        bars.sort_by_key(|b| b.timestamp);
        Ok(bars)
    }
}

/// Accepts `YYYY-MM-DD HH:MM:SS`, `YYYY-MM-DDTHH:MM:SS`, or a bare date
/// taken as midnight.
fn parse_timestamp(value: &str) -> Result<NaiveDateTime, TicksimError> {
    if let Ok(ts) = NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S") {
        return Ok(ts);
    }
    if let Ok(ts) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S") {
        return Ok(ts);
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map(|d| d.and_time(NaiveTime::MIN))
        .map_err(|_| TicksimError::Data {
            reason: format!("invalid timestamp: {value}"),
        })
}

impl TickSourcePort for CsvTickAdapter {
    fn load_ticks(&self, symbols: &[String]) -> Result<Vec<Tick>, TicksimError> {
        let mut by_timestamp: BTreeMap<NaiveDateTime, Tick> = BTreeMap::new();

        for symbol in symbols {
            for bar in self.read_bars(symbol)? {
                by_timestamp
                    .entry(bar.timestamp)
                    .or_default()
                    .insert(symbol.clone(), bar);
            }
        }

        Ok(by_timestamp.into_values().collect())
    }

    fn list_symbols(&self) -> Result<Vec<String>, TicksimError> {
        let entries = fs::read_dir(&self.base_path).map_err(|e| TicksimError::Data {
            reason: format!(
                "failed to read directory {}: {}",
                self.base_path.display(),
                e
            ),
        })?;

        let mut symbols = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| TicksimError::Data {
                reason: format!("directory entry error: {e}"),
            })?;
            let name = entry.file_name();
            let name_str = name.to_string_lossy();
            if let Some(symbol) = name_str.strip_suffix(".csv") {
                symbols.push(symbol.to_string());
            }
        }

        symbols.sort();
        Ok(symbols)
    }

    fn symbol_range(
        &self,
        symbol: &str,
    ) -> Result<Option<(NaiveDateTime, NaiveDateTime, usize)>, TicksimError> {
        let bars = self.read_bars(symbol)?;
        match (bars.first(), bars.last()) {
            (Some(first), Some(last)) => {
                Ok(Some((first.timestamp, last.timestamp, bars.len())))
            }
            _ => Ok(None),
        }
    }
}
