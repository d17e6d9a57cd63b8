//! Domain error types.

use super::book::PositionId;

/// Errors from engine trading operations. All are non-fatal to tick
/// processing: they are reported to the caller of `open`/`close` and leave
/// the ledger untouched.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EngineError {
    #[error("insufficient funds for {symbol}: need {required:.2}, have {available:.2}")]
    InsufficientFunds {
        symbol: String,
        required: f64,
        available: f64,
    },

    #[error("position {id} is already closed")]
    AlreadyClosed { id: PositionId },

    #[error("unknown position {id}")]
    UnknownPosition { id: PositionId },

    #[error("no data for {symbol} in current tick")]
    UnknownSymbol { symbol: String },

    #[error("quantity must be positive, got {quantity}")]
    InvalidQuantity { quantity: f64 },
}

/// Top-level error type for ticksim.
#[derive(Debug, thiserror::Error)]
pub enum TicksimError {
    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("data error: {reason}")]
    Data { reason: String },

    #[error("no data for {symbol} under {path}")]
    NoData { symbol: String, path: String },

    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&TicksimError> for std::process::ExitCode {
    fn from(err: &TicksimError) -> Self {
        let code: u8 = match err {
            TicksimError::Io(_) => 1,
            TicksimError::ConfigParse { .. }
            | TicksimError::ConfigMissing { .. }
            | TicksimError::ConfigInvalid { .. } => 2,
            TicksimError::Data { .. } | TicksimError::NoData { .. } => 3,
            TicksimError::Engine(_) => 4,
        };
        std::process::ExitCode::from(code)
    }
}
