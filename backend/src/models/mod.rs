//! Domain models
//!
//! - **Transaction**: immutable record of one money movement
//! - **ShellCorp**: shell company holding a mutable bank balance
//! - **TradecraftDeal**: closed set of extraction mechanisms

pub mod deal;
pub mod shell;
pub mod transaction;

pub use deal::TradecraftDeal;
pub use shell::{ShellCorp, ShellCorpError};
pub use transaction::Transaction;
