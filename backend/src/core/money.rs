//! Money arithmetic helpers
//!
//! CRITICAL: All money values are i64 (cents). Distribution draws happen in
//! f64 dollars and cross into cents exactly once, here.

/// Cents in one thousand dollars, the deposit rounding unit.
pub const THOUSAND_DOLLARS: i64 = 100_000;

/// Convert a dollar amount to cents, rounding to the nearest cent.
pub fn cents_from_dollars(dollars: f64) -> i64 {
    (dollars * 100.0).round() as i64
}

/// Convert cents back to dollars.
pub fn dollars_from_cents(cents: i64) -> f64 {
    cents as f64 / 100.0
}

/// Round a cent amount to the nearest thousand dollars.
///
/// Deposits and layering injections use coarse round-number amounts, a
/// well-known structuring tell. Half-thousand amounts round away from zero.
pub fn round_to_thousand(cents: i64) -> i64 {
    let dollars_thousands = (cents as f64 / THOUSAND_DOLLARS as f64).round() as i64;
    dollars_thousands * THOUSAND_DOLLARS
}

/// Format a cent amount as a 2-decimal dollar string, e.g. `49000.00`.
pub fn format_cents(cents: i64) -> String {
    format!("{:.2}", dollars_from_cents(cents))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cents_from_dollars_rounds_to_cent() {
        assert_eq!(cents_from_dollars(49_123.456), 4_912_346);
        assert_eq!(cents_from_dollars(0.004), 0);
        assert_eq!(cents_from_dollars(0.005), 1);
    }

    #[test]
    fn test_round_to_thousand() {
        assert_eq!(round_to_thousand(cents_from_dollars(49_499.99)), 4_900_000);
        assert_eq!(round_to_thousand(cents_from_dollars(49_500.00)), 5_000_000);
        assert_eq!(round_to_thousand(cents_from_dollars(499.99)), 0);
        assert_eq!(round_to_thousand(0), 0);
    }

    #[test]
    fn test_round_trip_is_exact_to_two_decimals() {
        let cents = 4_912_346;
        assert_eq!(cents_from_dollars(dollars_from_cents(cents)), cents);
    }

    #[test]
    fn test_format_cents() {
        assert_eq!(format_cents(4_900_000), "49000.00");
        assert_eq!(format_cents(31_245), "312.45");
        assert_eq!(format_cents(0), "0.00");
    }
}
