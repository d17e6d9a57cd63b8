//! Port traits for external collaborators.

pub mod config_port;
pub mod execution_port;
pub mod report_port;
pub mod strategy_port;
pub mod tick_source_port;
