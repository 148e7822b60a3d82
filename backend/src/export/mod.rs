//! Dataset export
//!
//! Renders the transaction log as a date-sorted table with the columns
//! `date, amount, remitter, receiver, description`. The view is read-only;
//! the simulation log is never mutated. Downstream collaborators (ingestion
//! scripts, graph loaders) consume the CSV or JSON-lines output by column
//! name and party-name strings only.

use std::io::Write;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use thiserror::Error;

use crate::core::money::dollars_from_cents;
use crate::models::transaction::Transaction;

/// Errors from dataset rendering
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("csv write error: {0}")]
    Csv(#[from] csv::Error),

    #[error("json write error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// One exported row: the five dataset columns
///
/// Dates render as RFC 3339, amounts as decimal dollars.
#[derive(Debug, Clone, Serialize)]
struct ExportRow<'a> {
    date: String,
    amount: f64,
    remitter: &'a str,
    receiver: &'a str,
    description: &'a str,
}

impl<'a> ExportRow<'a> {
    fn from_xact(xact: &'a Transaction) -> Self {
        Self {
            date: format_date(xact.date()),
            amount: dollars_from_cents(xact.amount()),
            remitter: xact.remitter(),
            receiver: xact.receiver(),
            description: xact.description(),
        }
    }
}

fn format_date(date: DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// A date-sorted view of a transaction log
///
/// # Example
/// ```
/// use tradecraft_simulator_core_rs::export::Dataset;
///
/// let dataset = Dataset::from_log(&[]);
/// let mut csv = Vec::new();
/// dataset.write_csv(&mut csv).unwrap();
/// assert!(String::from_utf8(csv).unwrap().starts_with("date,amount"));
/// ```
#[derive(Debug, Clone)]
pub struct Dataset {
    rows: Vec<Transaction>,
}

impl Dataset {
    /// Build a dataset from a transaction log
    ///
    /// Rows are sorted by date ascending with a stable sort, so equal dates
    /// keep their log insertion order and repeated export of the same log
    /// yields identical row order.
    pub fn from_log(log: &[Transaction]) -> Self {
        let mut rows = log.to_vec();
        rows.sort_by_key(|xact| xact.date());
        Self { rows }
    }

    /// Sorted rows
    pub fn rows(&self) -> &[Transaction] {
        &self.rows
    }

    /// Write the dataset as CSV with a header row
    ///
    /// The header is written even for an empty dataset.
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<(), ExportError> {
        let mut wtr = csv::WriterBuilder::new().has_headers(false).from_writer(writer);
        wtr.write_record(["date", "amount", "remitter", "receiver", "description"])?;
        for xact in &self.rows {
            wtr.serialize(ExportRow::from_xact(xact))?;
        }
        wtr.flush()?;
        Ok(())
    }

    /// Write the dataset as JSON lines, one row object per line
    pub fn write_json_lines<W: Write>(&self, mut writer: W) -> Result<(), ExportError> {
        for xact in &self.rows {
            serde_json::to_writer(&mut writer, &ExportRow::from_xact(xact))?;
            writer.write_all(b"\n")?;
        }
        Ok(())
    }
}
