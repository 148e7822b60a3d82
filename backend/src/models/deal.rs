//! Extraction deal mechanisms
//!
//! The closed set of ways laundered funds leave the shell-company system.
//! Adding a mechanism means adding a variant here and extending the
//! exhaustive match in the extraction phase; the compiler flags every site
//! that needs the new arm.

use serde::{Deserialize, Serialize};

/// An extraction mechanism for draining a shell company's balance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TradecraftDeal {
    /// Cryptocoin purchases through a sketch exchange
    Crypto,

    /// Merchandise bought for marketplace resale
    Amzn,
}

impl TradecraftDeal {
    /// Transaction description tag for this mechanism
    pub fn description(&self) -> &'static str {
        match self {
            TradecraftDeal::Crypto => "investment",
            TradecraftDeal::Amzn => "merchandise",
        }
    }
}
