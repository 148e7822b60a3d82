//! Deterministic random number generation
//!
//! Uses the xorshift64* algorithm for fast, deterministic random number
//! generation, with the distribution sampling layer (Gaussian, exponential,
//! Poisson, uniform datetime) built on top of the same generator state.
//! CRITICAL: All randomness in the simulator MUST go through this module.

mod distributions;
mod xorshift;

pub use distributions::SamplingError;
pub use xorshift::RngManager;
