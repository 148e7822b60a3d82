//! Transaction model
//!
//! Represents one money movement between two parties. Parties are free-text
//! names (shell company, sketch bank, or external counterparty) so the
//! exported dataset stays compatible with tooling that matches on strings.
//!
//! A transaction is immutable once constructed.
//!
//! CRITICAL: All money values are i64 (cents)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An immutable record of one money movement
///
/// # Example
/// ```
/// use chrono::Utc;
/// use tradecraft_simulator_core_rs::Transaction;
///
/// let tx = Transaction::new(
///     Utc::now(),
///     4_900_000, // $49,000.00 in cents
///     "Ranchlander National Bank".to_string(),
///     "BARLLOWS SERVICES LTD".to_string(),
///     "local deposit".to_string(),
/// );
/// assert_eq!(tx.amount(), 4_900_000);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique transaction identifier (UUID)
    id: String,

    /// Value date of the transfer
    date: DateTime<Utc>,

    /// Transferred amount (i64 cents, non-negative)
    amount: i64,

    /// Paying party name
    remitter: String,

    /// Receiving party name
    receiver: String,

    /// Free-text tag, e.g. "local deposit", "invoiced services"
    description: String,
}

impl Transaction {
    /// Create a new transaction
    ///
    /// # Arguments
    /// * `date` - Value date
    /// * `amount` - Amount in cents (must be non-negative)
    /// * `remitter` - Paying party name
    /// * `receiver` - Receiving party name
    /// * `description` - Free-text tag
    ///
    /// # Panics
    /// Panics if amount < 0
    pub fn new(
        date: DateTime<Utc>,
        amount: i64,
        remitter: String,
        receiver: String,
        description: String,
    ) -> Self {
        assert!(amount >= 0, "amount must be non-negative");

        Self {
            id: uuid::Uuid::new_v4().to_string(),
            date,
            amount,
            remitter,
            receiver,
            description,
        }
    }

    /// Unique transaction ID (not part of the exported table)
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Value date
    pub fn date(&self) -> DateTime<Utc> {
        self.date
    }

    /// Amount in cents
    pub fn amount(&self) -> i64 {
        self.amount
    }

    /// Paying party name
    pub fn remitter(&self) -> &str {
        &self.remitter
    }

    /// Receiving party name
    pub fn receiver(&self) -> &str {
        &self.receiver
    }

    /// Free-text description tag
    pub fn description(&self) -> &str {
        &self.description
    }
}
