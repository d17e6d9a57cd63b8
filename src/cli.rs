//! CLI definition and dispatch.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

use crate::adapters::csv_report_adapter::CsvReportAdapter;
use crate::adapters::csv_tick_adapter::CsvTickAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::domain::engine::{Engine, EngineConfig};
use crate::domain::error::TicksimError;
use crate::domain::metrics::Summary;
use crate::ports::config_port::ConfigPort;
use crate::ports::report_port::ReportPort;
use crate::ports::tick_source_port::TickSourcePort;
use crate::strategies::rsi_trader::RsiTrader;

#[derive(Parser, Debug)]
#[command(name = "ticksim", about = "Tick-driven trading strategy simulator")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run a simulation
    Run {
        #[arg(short, long)]
        config: PathBuf,
        /// Override the data directory from the config
        #[arg(short, long)]
        data: Option<PathBuf>,
        /// Write CSV reports of the recorded history to this directory
        #[arg(short, long)]
        output: Option<PathBuf>,
        #[arg(long)]
        verbose: bool,
    },
    /// Show row counts and timestamp ranges for a data directory
    Info {
        #[arg(short, long)]
        data: PathBuf,
        #[arg(long)]
        symbol: Option<String>,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Run {
            config,
            data,
            output,
            verbose,
        } => run_simulation(&config, data.as_ref(), output.as_ref(), verbose),
        Command::Info { data, symbol } => run_info(&data, symbol.as_deref()),
    }
}

pub fn load_config(path: &PathBuf) -> Result<FileConfigAdapter, ExitCode> {
    FileConfigAdapter::from_file(path).map_err(|e| {
        let err = TicksimError::ConfigParse {
            file: path.display().to_string(),
            reason: e.to_string(),
        };
        eprintln!("error: {err}");
        ExitCode::from(&err)
    })
}

fn run_simulation(
    config_path: &PathBuf,
    data_override: Option<&PathBuf>,
    output_path: Option<&PathBuf>,
    verbose_flag: bool,
) -> ExitCode {
    eprintln!("Loading config from {}", config_path.display());
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };

    let engine_config = build_engine_config(&adapter, verbose_flag);

    let mut strategy = match build_strategy(&adapter) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };
    eprintln!("Loaded strategy: RSI({}) on {}", strategy.window, strategy.symbol);

    let data_path = match resolve_data_path(data_override, &adapter) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };
    let source = CsvTickAdapter::new(data_path.clone());

    let symbols = match resolve_symbols(&adapter, &source) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };
    if symbols.is_empty() {
        eprintln!("error: no symbols under {}", data_path.display());
        return ExitCode::from(3);
    }

    eprintln!("Loading ticks for {} symbols...", symbols.len());
    let ticks = match source.load_ticks(&symbols) {
        Ok(t) => t,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };
    eprintln!("Running {} ticks...", ticks.len());

    let mut engine = Engine::new(engine_config, &mut strategy);
    for tick in &ticks {
        engine.tick(&mut strategy, tick);
    }

    println!("{}", Summary::compute(&engine));

    if let Some(output) = output_path {
        if let Err(e) = CsvReportAdapter.write(&engine, output) {
            eprintln!("error: {e}");
            return (&e).into();
        }
        eprintln!("Reports written to {}", output.display());
    }

    ExitCode::SUCCESS
}

fn run_info(data_path: &PathBuf, symbol: Option<&str>) -> ExitCode {
    let source = CsvTickAdapter::new(data_path.clone());

    let symbols = match symbol {
        Some(s) => vec![s.to_string()],
        None => match source.list_symbols() {
            Ok(s) => s,
            Err(e) => {
                eprintln!("error: {e}");
                return (&e).into();
            }
        },
    };

    for symbol in &symbols {
        match source.symbol_range(symbol) {
            Ok(Some((first, last, count))) => {
                println!("{symbol}: {count} rows, {first} .. {last}");
            }
            Ok(None) => println!("{symbol}: no rows"),
            Err(e) => {
                eprintln!("error: {e}");
                return (&e).into();
            }
        }
    }

    ExitCode::SUCCESS
}

pub fn build_engine_config(adapter: &dyn ConfigPort, verbose_flag: bool) -> EngineConfig {
    let initial_cash = adapter.get_double("simulation", "initial_cash", 100_000.0);
    let verbose = verbose_flag || adapter.get_bool("simulation", "verbose", false);
    EngineConfig::new(initial_cash).verbose(verbose)
}

pub fn build_strategy(adapter: &dyn ConfigPort) -> Result<RsiTrader, TicksimError> {
    let kind = adapter
        .get_string("strategy", "kind")
        .unwrap_or_else(|| "rsi".to_string());
    if kind != "rsi" {
        return Err(TicksimError::ConfigInvalid {
            section: "strategy".into(),
            key: "kind".into(),
            reason: format!("unknown strategy kind: {kind}"),
        });
    }

    let symbol =
        adapter
            .get_string("strategy", "symbol")
            .ok_or_else(|| TicksimError::ConfigMissing {
                section: "strategy".into(),
                key: "symbol".into(),
            })?;

    let window = adapter.get_int("strategy", "window", 14);
    if window <= 0 {
        return Err(TicksimError::ConfigInvalid {
            section: "strategy".into(),
            key: "window".into(),
            reason: format!("window must be positive, got {window}"),
        });
    }

    let mut strategy = RsiTrader::new(symbol, window as usize);
    strategy.lower = adapter.get_double("strategy", "lower", strategy.lower);
    strategy.upper = adapter.get_double("strategy", "upper", strategy.upper);
    strategy.stop_loss_pct =
        adapter.get_double("strategy", "stop_loss_pct", strategy.stop_loss_pct);
    strategy.take_profit_pct =
        adapter.get_double("strategy", "take_profit_pct", strategy.take_profit_pct);
    strategy.order_fraction =
        adapter.get_double("strategy", "order_fraction", strategy.order_fraction);
    Ok(strategy)
}

fn resolve_data_path(
    data_override: Option<&PathBuf>,
    adapter: &dyn ConfigPort,
) -> Result<PathBuf, TicksimError> {
    if let Some(path) = data_override {
        return Ok(path.clone());
    }
    adapter
        .get_string("data", "path")
        .map(PathBuf::from)
        .ok_or_else(|| TicksimError::ConfigMissing {
            section: "data".into(),
            key: "path".into(),
        })
}

/// Comma-separated `[data] symbols`, falling back to every CSV file in the
/// data directory.
pub fn resolve_symbols(
    adapter: &dyn ConfigPort,
    source: &dyn TickSourcePort,
) -> Result<Vec<String>, TicksimError> {
    if let Some(raw) = adapter.get_string("data", "symbols") {
        let symbols: Vec<String> = raw
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        return Ok(symbols);
    }
    source.list_symbols()
}
