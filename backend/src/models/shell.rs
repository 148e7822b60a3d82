//! Shell company model
//!
//! A shell company holds one bank account at a sketch bank. Its balance
//! changes only by applying transactions, and its activity timestamp never
//! moves backwards.
//!
//! # Invariants
//!
//! 1. `balance >= 0` at every observation point
//! 2. `last_active` is monotonically non-decreasing
//!
//! CRITICAL: All money values are i64 (cents)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::transaction::Transaction;

/// Errors from shell-company balance operations
#[derive(Debug, Error, PartialEq)]
pub enum ShellCorpError {
    #[error("insufficient funds: required {required}, available {available}")]
    InsufficientFunds { required: i64, available: i64 },
}

/// A shell company with a bank account
///
/// Created once per simulation run from the configured roster, mutated only
/// through [`credit`](ShellCorp::credit) and [`debit`](ShellCorp::debit),
/// never deleted.
///
/// # Example
/// ```
/// use chrono::Utc;
/// use tradecraft_simulator_core_rs::{ShellCorp, Transaction};
///
/// let opened = Utc::now();
/// let mut shell = ShellCorp::new(
///     "WELLHANCIA HEALTH CARE LTD".to_string(),
///     "31 Quernmore Close, Bromley, BR1 4EL".to_string(),
///     "Liberty Reserve".to_string(),
///     opened,
/// );
///
/// let deposit = Transaction::new(
///     opened,
///     5_000_000,
///     shell.bank().to_string(),
///     shell.name().to_string(),
///     "local deposit".to_string(),
/// );
/// shell.credit(&deposit);
/// assert_eq!(shell.balance(), 5_000_000);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShellCorp {
    /// Registered company name, unique within a run
    name: String,

    /// Registered address (first of the configured candidates)
    address: String,

    /// Name of the correspondent sketch bank holding the account
    bank: String,

    /// Current account balance (i64 cents, never negative)
    balance: i64,

    /// Timestamp of the most recent account activity
    last_active: DateTime<Utc>,
}

impl ShellCorp {
    /// Create a new shell company with a zero opening balance
    ///
    /// # Arguments
    /// * `name` - Registered company name
    /// * `address` - Registered address
    /// * `bank` - Correspondent bank name
    /// * `opened` - Account opening timestamp (initial `last_active`)
    pub fn new(name: String, address: String, bank: String, opened: DateTime<Utc>) -> Self {
        Self {
            name,
            address,
            bank,
            balance: 0,
            last_active: opened,
        }
    }

    /// Apply an incoming transaction: add its amount to the balance
    pub fn credit(&mut self, xact: &Transaction) {
        self.balance += xact.amount();
        self.touch(xact.date());
    }

    /// Apply an outgoing transaction: subtract its amount from the balance
    ///
    /// # Errors
    /// Returns [`ShellCorpError::InsufficientFunds`] if the amount exceeds
    /// the current balance; the balance is left unchanged.
    pub fn debit(&mut self, xact: &Transaction) -> Result<(), ShellCorpError> {
        if xact.amount() > self.balance {
            return Err(ShellCorpError::InsufficientFunds {
                required: xact.amount(),
                available: self.balance,
            });
        }

        self.balance -= xact.amount();
        self.touch(xact.date());
        Ok(())
    }

    // last_active only ever moves forward, even when transactions are
    // applied out of date order.
    fn touch(&mut self, date: DateTime<Utc>) {
        self.last_active = self.last_active.max(date);
    }

    /// Registered company name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Registered address
    pub fn address(&self) -> &str {
        &self.address
    }

    /// Correspondent bank name
    pub fn bank(&self) -> &str {
        &self.bank
    }

    /// Current balance in cents
    pub fn balance(&self) -> i64 {
        self.balance
    }

    /// Most recent account activity
    pub fn last_active(&self) -> DateTime<Utc> {
        self.last_active
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn shell(opened: DateTime<Utc>) -> ShellCorp {
        ShellCorp::new(
            "BARLLOWS SERVICES LTD".to_string(),
            "3 Market Parade, 41 East Street, Bromley, BR1 1QN".to_string(),
            "BCCI".to_string(),
            opened,
        )
    }

    fn tx(date: DateTime<Utc>, amount: i64) -> Transaction {
        Transaction::new(
            date,
            amount,
            "a".to_string(),
            "b".to_string(),
            "invoiced services".to_string(),
        )
    }

    #[test]
    fn test_credit_increases_balance() {
        let opened = Utc::now();
        let mut s = shell(opened);

        s.credit(&tx(opened + Duration::days(2), 1_000_000));
        assert_eq!(s.balance(), 1_000_000);
        assert_eq!(s.last_active(), opened + Duration::days(2));
    }

    #[test]
    fn test_debit_decreases_balance() {
        let opened = Utc::now();
        let mut s = shell(opened);

        s.credit(&tx(opened, 1_000_000));
        s.debit(&tx(opened, 400_000)).unwrap();
        assert_eq!(s.balance(), 600_000);
    }

    #[test]
    fn test_debit_beyond_balance_rejected() {
        let opened = Utc::now();
        let mut s = shell(opened);

        s.credit(&tx(opened, 100));
        let err = s.debit(&tx(opened, 200)).unwrap_err();
        assert_eq!(
            err,
            ShellCorpError::InsufficientFunds {
                required: 200,
                available: 100,
            }
        );
        // balance unchanged after the rejected debit
        assert_eq!(s.balance(), 100);
    }

    #[test]
    fn test_last_active_never_goes_backwards() {
        let opened = Utc::now();
        let mut s = shell(opened);

        s.credit(&tx(opened + Duration::days(10), 100));
        s.credit(&tx(opened + Duration::days(3), 100));

        assert_eq!(s.last_active(), opened + Duration::days(10));
    }
}
