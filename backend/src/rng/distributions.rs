//! Distribution sampling layer
//!
//! Named samplers over the xorshift64* generator. Every stochastic decision
//! in the engine routes through these accessors:
//!
//! - **Gaussian** (Box-Muller) — transaction amounts, centered to land just
//!   under the reporting threshold
//! - **Exponential** (inverse CDF) — per-hop bleed-off during layering
//! - **Poisson** (Knuth product method) — inter-transaction gaps in days
//! - **Uniform datetime** — a timestamp drawn from a half-open range
//!
//! All samplers advance the same generator state, so a seeded run consumes
//! one well-defined random sequence.

use chrono::{DateTime, Duration, Utc};
use thiserror::Error;

use super::xorshift::RngManager;

/// Errors from distribution sampling
#[derive(Debug, Error, PartialEq)]
pub enum SamplingError {
    #[error("empty datetime range: finish {finish} is not after start {start}")]
    EmptyDateRange {
        start: DateTime<Utc>,
        finish: DateTime<Utc>,
    },
}

impl RngManager {
    /// Sample from a Gaussian distribution via the Box-Muller transform
    ///
    /// # Example
    /// ```
    /// use tradecraft_simulator_core_rs::RngManager;
    ///
    /// let mut rng = RngManager::new(42);
    /// let draw = rng.gaussian(49_500.0, 9_900.0);
    /// assert!(draw.is_finite());
    /// ```
    pub fn gaussian(&mut self, mean: f64, stdev: f64) -> f64 {
        let u1 = self.next_f64();
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + stdev * z
    }

    /// Sample from an exponential distribution with the given scale
    ///
    /// Inverse-CDF method: `-ln(u) * scale`. The result is non-negative and
    /// unbounded above.
    pub fn exponential(&mut self, scale: f64) -> f64 {
        let u = self.next_f64();
        -u.ln() * scale
    }

    /// Sample from a Poisson distribution with the given lambda
    ///
    /// Knuth's product method. Draws are non-negative integers, returned as
    /// f64 so callers can scale them (e.g. into a day offset) directly.
    pub fn poisson(&mut self, lambda: f64) -> f64 {
        let limit = (-lambda).exp();
        let mut product = self.next_f64();
        let mut count: u64 = 0;

        while product > limit {
            count += 1;
            product *= self.next_f64();
        }

        count as f64
    }

    /// Sample a timestamp uniformly from `[start, finish)`
    ///
    /// Uniform over whole seconds in the range.
    ///
    /// # Errors
    /// Returns [`SamplingError::EmptyDateRange`] if `finish <= start`; the
    /// range is never silently collapsed to `start`.
    ///
    /// # Example
    /// ```
    /// use chrono::{TimeZone, Utc};
    /// use tradecraft_simulator_core_rs::RngManager;
    ///
    /// let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    /// let finish = Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap();
    ///
    /// let mut rng = RngManager::new(42);
    /// let date = rng.uniform_datetime(start, finish).unwrap();
    /// assert!(date >= start && date < finish);
    /// ```
    pub fn uniform_datetime(
        &mut self,
        start: DateTime<Utc>,
        finish: DateTime<Utc>,
    ) -> Result<DateTime<Utc>, SamplingError> {
        let delta_secs = (finish - start).num_seconds();
        if delta_secs <= 0 {
            return Err(SamplingError::EmptyDateRange { start, finish });
        }

        let offset_secs = self.range(0, delta_secs);
        Ok(start + Duration::seconds(offset_secs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_gaussian_sample_mean() {
        let mut rng = RngManager::new(42);

        let n = 10_000;
        let sum: f64 = (0..n).map(|_| rng.gaussian(100.0, 15.0)).sum();
        let mean = sum / n as f64;

        assert!(
            (mean - 100.0).abs() < 1.0,
            "sample mean {} too far from 100.0",
            mean
        );
    }

    #[test]
    fn test_exponential_non_negative() {
        let mut rng = RngManager::new(42);

        for _ in 0..1000 {
            let draw = rng.exponential(0.1);
            assert!(draw >= 0.0, "exponential draw {} negative", draw);
        }
    }

    #[test]
    fn test_poisson_integer_valued() {
        let mut rng = RngManager::new(42);

        for _ in 0..1000 {
            let draw = rng.poisson(8.7);
            assert!(draw >= 0.0);
            assert_eq!(draw, draw.trunc(), "poisson draw {} not integral", draw);
        }
    }

    #[test]
    fn test_poisson_sample_mean() {
        let mut rng = RngManager::new(42);

        let n = 10_000;
        let sum: f64 = (0..n).map(|_| rng.poisson(8.7)).sum();
        let mean = sum / n as f64;

        assert!(
            (mean - 8.7).abs() < 0.3,
            "sample mean {} too far from lambda 8.7",
            mean
        );
    }

    #[test]
    fn test_uniform_datetime_in_range() {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let finish = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap();

        let mut rng = RngManager::new(42);
        for _ in 0..1000 {
            let date = rng.uniform_datetime(start, finish).unwrap();
            assert!(date >= start && date < finish);
        }
    }

    #[test]
    fn test_uniform_datetime_empty_range() {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();

        let mut rng = RngManager::new(42);
        let err = rng.uniform_datetime(start, start).unwrap_err();
        assert!(matches!(err, SamplingError::EmptyDateRange { .. }));

        let earlier = start - Duration::days(1);
        let err = rng.uniform_datetime(start, earlier).unwrap_err();
        assert!(matches!(err, SamplingError::EmptyDateRange { .. }));
    }

    #[test]
    fn test_sampling_deterministic() {
        let mut rng1 = RngManager::new(99999);
        let mut rng2 = RngManager::new(99999);

        for _ in 0..100 {
            assert_eq!(rng1.gaussian(0.0, 1.0), rng2.gaussian(0.0, 1.0));
            assert_eq!(rng1.exponential(0.1), rng2.exponential(0.1));
            assert_eq!(rng1.poisson(8.7), rng2.poisson(8.7));
        }
    }
}
