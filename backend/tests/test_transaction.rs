//! Tests for the Transaction model

use chrono::{TimeZone, Utc};
use tradecraft_simulator_core_rs::Transaction;

fn sample() -> Transaction {
    Transaction::new(
        Utc.with_ymd_and_hms(2024, 1, 8, 0, 0, 0).unwrap(),
        4_900_000,
        "Ranchlander National Bank".to_string(),
        "BARLLOWS SERVICES LTD".to_string(),
        "local deposit".to_string(),
    )
}

#[test]
fn test_transaction_fields() {
    let tx = sample();

    assert_eq!(
        tx.date(),
        Utc.with_ymd_and_hms(2024, 1, 8, 0, 0, 0).unwrap()
    );
    assert_eq!(tx.amount(), 4_900_000);
    assert_eq!(tx.remitter(), "Ranchlander National Bank");
    assert_eq!(tx.receiver(), "BARLLOWS SERVICES LTD");
    assert_eq!(tx.description(), "local deposit");
}

#[test]
fn test_transaction_ids_are_unique() {
    assert_ne!(sample().id(), sample().id());
}

#[test]
#[should_panic(expected = "amount must be non-negative")]
fn test_negative_amount_rejected() {
    Transaction::new(
        Utc::now(),
        -1,
        "a".to_string(),
        "b".to_string(),
        "invoiced services".to_string(),
    );
}

#[test]
fn test_serde_round_trip() {
    let tx = sample();

    let json = serde_json::to_string(&tx).unwrap();
    let back: Transaction = serde_json::from_str(&json).unwrap();

    assert_eq!(back.id(), tx.id());
    assert_eq!(back.date(), tx.date());
    assert_eq!(back.amount(), tx.amount());
    assert_eq!(back.remitter(), tx.remitter());
    assert_eq!(back.receiver(), tx.receiver());
    assert_eq!(back.description(), tx.description());
}
