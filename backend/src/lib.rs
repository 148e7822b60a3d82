//! Tradecraft Simulator Core - Rust Engine
//!
//! Generates synthetic bank-transaction datasets that emulate money-laundering
//! tradecraft, for training and testing downstream detection and
//! entity-resolution pipelines.
//!
//! # Architecture
//!
//! - **core**: Money arithmetic helpers
//! - **models**: Domain types (Transaction, ShellCorp, TradecraftDeal)
//! - **orchestrator**: The simulation engine and its three phases
//! - **export**: Date-sorted tabular dataset rendering
//! - **rng**: Deterministic random number generation and distribution sampling
//!
//! # Critical Invariants
//!
//! 1. All money values are i64 (cents)
//! 2. All randomness is deterministic (seeded RNG)
//! 3. Shell balances are never negative; the transaction log is append-only

// Module declarations
pub mod core;
pub mod export;
pub mod models;
pub mod orchestrator;
pub mod rng;

// Re-exports for convenience
pub use export::{Dataset, ExportError};
pub use models::{
    deal::TradecraftDeal,
    shell::{ShellCorp, ShellCorpError},
    transaction::Transaction,
};
pub use orchestrator::{
    ShellConfig, Simulation, SimulationConfig, SimulationError, INTERDAY_MEDIAN, INTERDAY_STDEV,
    XACT_LIMIT,
};
pub use rng::{RngManager, SamplingError};
