//! Simulation engine
//!
//! Stateful model of money-laundering tradecraft across three phases:
//!
//! ```text
//! 1. Origination — shells open accounts at sketch banks and receive
//!    round-number cash deposits
//! 2. Layering   — rapid movement of funds around a random cycle of
//!    shells, bleeding off a fraction at each hop
//! 3. Extraction — "deals" drain every balance to external counterparties
//! ```
//!
//! The driver decides how many layering rounds to run; the engine only
//! models one round at a time.
//!
//! # Example
//!
//! ```
//! use tradecraft_simulator_core_rs::{ShellConfig, Simulation, SimulationConfig};
//!
//! let config = SimulationConfig {
//!     rng_seed: 42,
//!     shells: vec![
//!         ShellConfig {
//!             name: "BARLLOWS SERVICES LTD".to_string(),
//!             addresses: vec!["3 Market Parade, Bromley, BR1 1QN".to_string()],
//!         },
//!         ShellConfig {
//!             name: "LMAR (GB) LTD".to_string(),
//!             addresses: vec!["31 Quernmore Close, Bromley, BR1 4EL".to_string()],
//!         },
//!     ],
//!     ..Default::default()
//! };
//!
//! let mut sim = Simulation::new(config).unwrap();
//! sim.seed_shell_companies().unwrap();
//! for _ in 0..3 {
//!     sim.layer_rmf().unwrap();
//! }
//! sim.drain_into_deals().unwrap();
//!
//! let dataset = sim.export();
//! assert!(dataset.rows().len() >= sim.shells().len());
//! ```

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use thiserror::Error;

use crate::core::money::{cents_from_dollars, round_to_thousand};
use crate::export::Dataset;
use crate::models::deal::TradecraftDeal;
use crate::models::shell::{ShellCorp, ShellCorpError};
use crate::models::transaction::Transaction;
use crate::rng::{RngManager, SamplingError};

// ============================================================================
// Tuning Constants
// ============================================================================

/// Reporting threshold the generated amounts structure themselves under
/// (dollars).
pub const XACT_LIMIT: f64 = 99_000.0;

/// Median inter-transaction gap in days (Poisson lambda).
pub const INTERDAY_MEDIAN: f64 = 8.7;

/// Inter-transaction gap spread in days, exposed alongside the median for
/// tuning. The Poisson gap model consumes only the median.
pub const INTERDAY_STDEV: f64 = 32.745006;

/// Scale of the exponential bleed-off drawn at each layering hop.
const BLEED_SCALE: f64 = 0.1;

fn default_sketch_banks() -> Vec<String> {
    [
        "BCCI",
        "Liberty Reserve",
        "Arab Bank",
        "Banca Socială",
        "Ranchlander National Bank",
        "Banco Alas",
        "Santa Anna National Bank",
        "Pulaski Savings",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn default_sketch_crypto() -> Vec<String> {
    [
        "BitMEX",
        "BIPPAX",
        "FX Alliance Traders",
        "Pinance.io",
        "DCEX Exchange",
        "Bityard",
        "CoinWpro",
        "Coinegg",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn default_fund_origins() -> Vec<String> {
    [
        "Amazon Marketplace",
        "Rosoboronexport",
        "Hermitage Capital Management",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

// ============================================================================
// Configuration Types
// ============================================================================

/// One shell company in the configured roster
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShellConfig {
    /// Registered company name, unique within the roster
    pub name: String,

    /// Candidate registered addresses; the first one is used
    pub addresses: Vec<String>,
}

/// Complete simulation configuration
///
/// Roster entries are an ordered `Vec`, not a map, so creation order (and
/// with it the deterministic RNG consumption order) is well-defined.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Simulation start timestamp; `None` resolves to the current time
    /// inside [`Simulation::new`]
    pub start: Option<DateTime<Utc>>,

    /// RNG seed for deterministic generation
    pub rng_seed: u64,

    /// Reporting threshold in dollars that amounts structure under
    pub xact_limit: f64,

    /// Poisson lambda for inter-transaction gaps in days
    pub interday_median: f64,

    /// Gap spread in days (tuning knob; see [`INTERDAY_STDEV`])
    pub interday_stdev: f64,

    /// Sketch banks that host shell accounts and remit opening deposits
    pub sketch_banks: Vec<String>,

    /// Sketch crypto exchanges receiving extraction deals
    pub sketch_crypto: Vec<String>,

    /// External remitter labels for layering fund injections
    pub fund_origins: Vec<String>,

    /// Shell-company roster
    pub shells: Vec<ShellConfig>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            start: None,
            rng_seed: 42,
            xact_limit: XACT_LIMIT,
            interday_median: INTERDAY_MEDIAN,
            interday_stdev: INTERDAY_STDEV,
            sketch_banks: default_sketch_banks(),
            sketch_crypto: default_sketch_crypto(),
            fund_origins: default_fund_origins(),
            shells: Vec::new(),
        }
    }
}

// ============================================================================
// Errors
// ============================================================================

/// Errors from simulation construction and phase operations
#[derive(Debug, Error, PartialEq)]
pub enum SimulationError {
    /// Configuration validation error
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// Phase operation invoked before origination
    #[error("shell roster is not seeded; run origination first")]
    NotSeeded,

    /// Origination invoked twice on the same simulation
    #[error("shell roster is already seeded")]
    AlreadySeeded,

    /// Shell name not present in the roster
    #[error("unknown shell company: {0}")]
    UnknownShell(String),

    /// Balance operation error
    #[error(transparent)]
    Funds(#[from] ShellCorpError),

    /// Distribution sampling error
    #[error(transparent)]
    Sampling(#[from] SamplingError),
}

// ============================================================================
// Simulation
// ============================================================================

/// The transaction-simulation engine
///
/// Owns the shell roster (creation order), an internal name→index map for
/// referential integrity, the append-only transaction log (insertion order =
/// generation order; export re-sorts by date), and the seeded RNG. All state
/// belongs to one instance for the duration of a run; parallel runs should
/// construct independent simulations with independent seeds.
#[derive(Debug, Clone)]
pub struct Simulation {
    config: SimulationConfig,

    /// Resolved start timestamp (config value, or `Utc::now()` at
    /// construction)
    start: DateTime<Utc>,

    rng: RngManager,

    /// Shell roster in creation order
    shells: Vec<ShellCorp>,

    /// Shell name → roster position. Transactions reference parties by name
    /// only; this index backs name lookups without embedding references in
    /// the wire format.
    shell_index: HashMap<String, usize>,

    /// Append-only transaction log
    xact_log: Vec<Transaction>,
}

impl Simulation {
    /// Create a new simulation from a validated configuration
    ///
    /// # Errors
    /// Returns [`SimulationError::InvalidConfig`] for an empty or duplicate
    /// roster, a shell without addresses, a non-positive threshold or gap
    /// median, or empty counterparty lists. No partial state is created on
    /// failure.
    pub fn new(config: SimulationConfig) -> Result<Self, SimulationError> {
        validate_config(&config)?;

        let start = config.start.unwrap_or_else(Utc::now);
        let rng = RngManager::new(config.rng_seed);

        Ok(Self {
            start,
            rng,
            shells: Vec::new(),
            shell_index: HashMap::new(),
            xact_log: Vec::new(),
            config,
        })
    }

    // ------------------------------------------------------------------
    // Generators
    // ------------------------------------------------------------------

    /// Generate one transaction amount in cents
    ///
    /// Draws `g ~ Gaussian(limit/2, limit/10)` and returns `limit - g`,
    /// concentrating amounts just under the reporting threshold. A draw
    /// from the far tail would make the amount negative; such draws are
    /// resampled (see DESIGN.md).
    pub fn sample_amount(&mut self) -> i64 {
        let mean = self.config.xact_limit / 2.0;
        let stdev = self.config.xact_limit / 10.0;

        loop {
            let amount = self.config.xact_limit - self.rng.gaussian(mean, stdev);
            if amount > 0.0 {
                return cents_from_dollars(amount);
            }
        }
    }

    /// Generate a round-number amount: [`sample_amount`](Self::sample_amount)
    /// rounded to the nearest thousand dollars, redrawn while the rounding
    /// yields zero
    pub fn sample_rounded_amount(&mut self) -> i64 {
        loop {
            let rounded = round_to_thousand(self.sample_amount());
            if rounded > 0 {
                return rounded;
            }
        }
    }

    /// Generate the timing of the next transaction after `from`
    ///
    /// Adds `Poisson(interday_median)` whole days, modeling irregular but
    /// clustered gaps.
    pub fn sample_timing(&mut self, from: DateTime<Utc>) -> DateTime<Utc> {
        let offset_days = self.rng.poisson(self.config.interday_median);
        from + Duration::hours((offset_days * 24.0) as i64)
    }

    // bleed factor in (0, 1]: exponential draws >= 1.0 would invert the
    // transfer direction and are redrawn (see DESIGN.md)
    fn bleed_factor(&mut self) -> f64 {
        loop {
            let bleed = self.rng.exponential(BLEED_SCALE);
            if bleed < 1.0 {
                return 1.0 - bleed;
            }
        }
    }

    // ------------------------------------------------------------------
    // Phase 1: origination
    // ------------------------------------------------------------------

    /// Instantiate the shell roster and create opening balances
    ///
    /// Each configured shell gets an account at a uniformly drawn sketch
    /// bank, then 1-5 round-number deposits dated 1-7 days after the
    /// simulation start, remitted by its bank. Every shell ends the phase
    /// with a positive balance.
    ///
    /// # Errors
    /// Returns [`SimulationError::AlreadySeeded`] if the roster was already
    /// seeded.
    pub fn seed_shell_companies(&mut self) -> Result<(), SimulationError> {
        if !self.shells.is_empty() {
            return Err(SimulationError::AlreadySeeded);
        }

        let roster = self.config.shells.clone();
        for cfg in &roster {
            let bank_idx = self.rng.range(0, self.config.sketch_banks.len() as i64) as usize;
            let shell = ShellCorp::new(
                cfg.name.clone(),
                cfg.addresses[0].clone(),
                self.config.sketch_banks[bank_idx].clone(),
                self.start,
            );
            self.shell_index.insert(cfg.name.clone(), self.shells.len());
            self.shells.push(shell);
        }

        // opening balances
        for idx in 0..self.shells.len() {
            let deposits = self.rng.range(1, 6);
            for _ in 0..deposits {
                let date = self.start + Duration::days(self.rng.range(1, 8));
                let amount = self.sample_rounded_amount();
                let xact = Transaction::new(
                    date,
                    amount,
                    self.shells[idx].bank().to_string(),
                    self.shells[idx].name().to_string(),
                    "local deposit".to_string(),
                );

                self.shells[idx].credit(&xact);
                self.xact_log.push(xact);
            }
        }

        Ok(())
    }

    // ------------------------------------------------------------------
    // Phase 2: layering
    // ------------------------------------------------------------------

    /// Run one rapid-movement-of-funds layering round
    ///
    /// Draws a random permutation of the roster as the cycle order, injects
    /// external funds into the first shell, then walks the cycle with the
    /// last shell paying back to the first. Each hop chains its date from
    /// the previous hop and multiplies the amount by a bleed factor in
    /// (0, 1], so hop amounts never increase. The payer is debited and the
    /// payee credited at every hop.
    ///
    /// Calling this several times compounds layering complexity and is the
    /// intended usage.
    ///
    /// # Errors
    /// Returns [`SimulationError::NotSeeded`] before origination.
    pub fn layer_rmf(&mut self) -> Result<(), SimulationError> {
        if self.shells.is_empty() {
            return Err(SimulationError::NotSeeded);
        }

        let mut cycle: Vec<usize> = (0..self.shells.len()).collect();
        self.rng.shuffle(&mut cycle);

        // inject external funds into the cycle's first shell
        let lead = cycle[0];
        let origin_idx = self.rng.range(0, self.config.fund_origins.len() as i64) as usize;
        let origin = self.config.fund_origins[origin_idx].clone();

        let mut date = self.sample_timing(self.shells[lead].last_active());
        let mut amount = self.sample_rounded_amount();

        let xact = Transaction::new(
            date,
            amount,
            origin,
            self.shells[lead].name().to_string(),
            "invoiced services".to_string(),
        );
        self.shells[lead].credit(&xact);
        self.xact_log.push(xact);

        // layer through the cycle, bleeding off at each hop, until the last
        // shell dumps back to the first
        for (ind, &payer) in cycle.iter().enumerate() {
            let payee = cycle[(ind + 1) % cycle.len()];

            date = self.sample_timing(date);
            amount = (amount as f64 * self.bleed_factor()).round() as i64;

            let xact = Transaction::new(
                date,
                amount,
                self.shells[payer].name().to_string(),
                self.shells[payee].name().to_string(),
                "invoiced services".to_string(),
            );
            self.shells[payer].debit(&xact)?;
            self.shells[payee].credit(&xact);
            self.xact_log.push(xact);
        }

        Ok(())
    }

    // ------------------------------------------------------------------
    // Phase 3: extraction
    // ------------------------------------------------------------------

    /// Perform one deal draining funds from the named shell
    ///
    /// The deal amount is a round-thousand draw capped at the current
    /// balance; a draw that rounds to zero falls back to the full remaining
    /// balance so the drain loop always makes progress. Counterparty and
    /// description come from the deal mechanism.
    ///
    /// # Errors
    /// Returns [`SimulationError::UnknownShell`] for a name outside the
    /// roster.
    pub fn perform_deal(
        &mut self,
        shell_name: &str,
        deal: TradecraftDeal,
    ) -> Result<(), SimulationError> {
        let idx = *self
            .shell_index
            .get(shell_name)
            .ok_or_else(|| SimulationError::UnknownShell(shell_name.to_string()))?;
        self.deal_for(idx, deal)
    }

    fn deal_for(&mut self, idx: usize, deal: TradecraftDeal) -> Result<(), SimulationError> {
        let balance = self.shells[idx].balance();
        let candidate = round_to_thousand(self.sample_amount());
        let amount = if candidate == 0 {
            balance
        } else {
            candidate.min(balance)
        };

        let date = self.sample_timing(self.shells[idx].last_active());

        let receiver = match deal {
            TradecraftDeal::Crypto => {
                let i = self.rng.range(0, self.config.sketch_crypto.len() as i64) as usize;
                self.config.sketch_crypto[i].clone()
            }
            TradecraftDeal::Amzn => "Amazon Marketplace".to_string(),
        };

        let xact = Transaction::new(
            date,
            amount,
            self.shells[idx].name().to_string(),
            receiver,
            deal.description().to_string(),
        );
        self.shells[idx].debit(&xact)?;
        self.xact_log.push(xact);

        Ok(())
    }

    /// Drain every shell's balance to zero through deals
    ///
    /// Repeatedly performs crypto deals per shell while its balance is
    /// positive. Terminates because every deal amount is capped at the
    /// remaining balance and zero-rounding draws fall back to draining it.
    ///
    /// # Errors
    /// Returns [`SimulationError::NotSeeded`] before origination.
    pub fn drain_into_deals(&mut self) -> Result<(), SimulationError> {
        if self.shells.is_empty() {
            return Err(SimulationError::NotSeeded);
        }

        for idx in 0..self.shells.len() {
            while self.shells[idx].balance() > 0 {
                self.deal_for(idx, TradecraftDeal::Crypto)?;
            }
        }

        Ok(())
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    /// Resolved simulation start timestamp
    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    /// The configuration this simulation was built from
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Shell roster in creation order
    pub fn shells(&self) -> &[ShellCorp] {
        &self.shells
    }

    /// Look up a shell by name
    pub fn shell(&self, name: &str) -> Option<&ShellCorp> {
        self.shell_index.get(name).map(|&idx| &self.shells[idx])
    }

    /// Transaction log in generation order
    pub fn xact_log(&self) -> &[Transaction] {
        &self.xact_log
    }

    /// Export the log as a date-sorted dataset (read-only view)
    pub fn export(&self) -> Dataset {
        Dataset::from_log(&self.xact_log)
    }
}

fn validate_config(config: &SimulationConfig) -> Result<(), SimulationError> {
    if config.shells.is_empty() {
        return Err(SimulationError::InvalidConfig(
            "shell roster is empty".to_string(),
        ));
    }

    let mut names = HashSet::new();
    for shell in &config.shells {
        if shell.name.trim().is_empty() {
            return Err(SimulationError::InvalidConfig(
                "shell name is empty".to_string(),
            ));
        }
        if !names.insert(shell.name.as_str()) {
            return Err(SimulationError::InvalidConfig(format!(
                "duplicate shell name: {}",
                shell.name
            )));
        }
        if shell.addresses.is_empty() {
            return Err(SimulationError::InvalidConfig(format!(
                "shell {} has no addresses",
                shell.name
            )));
        }
    }

    if config.xact_limit <= 0.0 || !config.xact_limit.is_finite() {
        return Err(SimulationError::InvalidConfig(format!(
            "xact_limit must be positive, got {}",
            config.xact_limit
        )));
    }
    if config.interday_median <= 0.0 || !config.interday_median.is_finite() {
        return Err(SimulationError::InvalidConfig(format!(
            "interday_median must be positive, got {}",
            config.interday_median
        )));
    }

    if config.sketch_banks.is_empty() {
        return Err(SimulationError::InvalidConfig(
            "sketch bank list is empty".to_string(),
        ));
    }
    if config.sketch_crypto.is_empty() {
        return Err(SimulationError::InvalidConfig(
            "sketch crypto-exchange list is empty".to_string(),
        ));
    }
    if config.fund_origins.is_empty() {
        return Err(SimulationError::InvalidConfig(
            "fund origin list is empty".to_string(),
        ));
    }

    Ok(())
}
