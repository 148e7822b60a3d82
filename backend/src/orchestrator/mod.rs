//! Simulation orchestrator
//!
//! Owns the shell-company roster and the append-only transaction log, and
//! exposes the three tradecraft phases: origination, layering, extraction.

mod engine;

pub use engine::{
    ShellConfig, Simulation, SimulationConfig, SimulationError, INTERDAY_MEDIAN, INTERDAY_STDEV,
    XACT_LIMIT,
};
