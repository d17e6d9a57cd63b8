//! CSV report adapter.
//!
//! Writes the recorded simulation history to CSV files for external
//! plotting: `ledger.csv` with the three ledger time series, and one
//! `{symbol}_close.csv` per symbol with its timestamped closes.

use std::fs;
use std::path::Path;

use crate::domain::engine::Engine;
use crate::domain::error::TicksimError;
use crate::ports::report_port::ReportPort;

#[derive(Debug, Clone, Copy, Default)]
pub struct CsvReportAdapter;

impl CsvReportAdapter {
    fn write_ledger(&self, engine: &Engine, output_dir: &Path) -> Result<(), TicksimError> {
        let path = output_dir.join("ledger.csv");
        let mut writer = csv::Writer::from_path(&path).map_err(|e| TicksimError::Data {
            reason: format!("failed to write {}: {}", path.display(), e),
        })?;

        writer
            .write_record(["tick", "cash", "position_value", "portfolio_value"])
            .map_err(csv_error)?;

        let history = engine.history();
        let cash = history.cash_history();
        let position_value = history.position_value_history();
        let portfolio_value = history.portfolio_value_history();

        for i in 0..history.ticks_recorded() {
            writer
                .write_record([
                    i.to_string(),
                    cash[i].to_string(),
                    position_value[i].to_string(),
                    portfolio_value[i].to_string(),
                ])
                .map_err(csv_error)?;
        }

        writer.flush()?;
        Ok(())
    }

    fn write_closes(&self, engine: &Engine, output_dir: &Path) -> Result<(), TicksimError> {
        for symbol in engine.history().symbols() {
            let Some(series) = engine.history().symbol(symbol) else {
                continue;
            };

            let path = output_dir.join(format!("{}_close.csv", symbol));
            let mut writer = csv::Writer::from_path(&path).map_err(|e| TicksimError::Data {
                reason: format!("failed to write {}: {}", path.display(), e),
            })?;

            writer
                .write_record(["timestamp", "close"])
                .map_err(csv_error)?;
            for (timestamp, close) in series.timestamps.iter().zip(&series.close) {
                writer
                    .write_record([timestamp.to_string(), close.to_string()])
                    .map_err(csv_error)?;
            }
            writer.flush()?;
        }
        Ok(())
    }
}

fn csv_error(err: csv::Error) -> TicksimError {
    TicksimError::Data {
        reason: format!("CSV write error: {err}"),
    }
}

impl ReportPort for CsvReportAdapter {
    fn write(&self, engine: &Engine, output_dir: &Path) -> Result<(), TicksimError> {
        fs::create_dir_all(output_dir)?;
        self.write_ledger(engine, output_dir)?;
        self.write_closes(engine, output_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::engine::{Engine, EngineConfig};
    use crate::domain::ohlcv::{OhlcvBar, Tick};
    use crate::ports::strategy_port::Strategy;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    struct Noop;

    impl Strategy for Noop {
        fn initialize(&mut self, _engine: &mut Engine) {}
        fn trade(&mut self, _engine: &mut Engine, _tick: &Tick) {}
    }

    fn btc_tick(day: u32, close: f64) -> Tick {
        Tick::new().with_bar(
            "BTC",
            OhlcvBar {
                timestamp: NaiveDate::from_ymd_opt(2024, 1, day)
                    .unwrap()
                    .and_hms_opt(0, 0, 0)
                    .unwrap(),
                open: close,
                high: close,
                low: close,
                close,
                volume: 1000.0,
            },
        )
    }

    #[test]
    fn writes_ledger_and_close_files() {
        let mut engine = Engine::new(EngineConfig::new(10_000.0), &mut Noop);
        engine.tick(&mut Noop, &btc_tick(1, 100.0));
        engine.tick(&mut Noop, &btc_tick(2, 110.0));

        let dir = TempDir::new().unwrap();
        CsvReportAdapter.write(&engine, dir.path()).unwrap();

        let ledger = fs::read_to_string(dir.path().join("ledger.csv")).unwrap();
        let mut lines = ledger.lines();
        assert_eq!(
            lines.next(),
            Some("tick,cash,position_value,portfolio_value")
        );
        assert_eq!(lines.count(), 2);

        let closes = fs::read_to_string(dir.path().join("BTC_close.csv")).unwrap();
        assert!(closes.starts_with("timestamp,close"));
        assert_eq!(closes.lines().count(), 3);
    }

    #[test]
    fn creates_output_directory() {
        let engine = Engine::new(EngineConfig::new(1_000.0), &mut Noop);
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("reports/run1");
        CsvReportAdapter.write(&engine, &nested).unwrap();
        assert!(nested.join("ledger.csv").exists());
    }
}
