//! ticksim — tick-driven trading strategy simulator.
//!
//! Hexagonal architecture: domain logic in [`domain`], port traits in
//! [`ports`], concrete implementations in [`adapters`], bundled strategies
//! in [`strategies`].

pub mod adapters;
pub mod cli;
pub mod domain;
pub mod ports;
pub mod strategies;
