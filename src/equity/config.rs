//! Configuration options for equity runs.
//!
//! This module provides the configuration struct that controls how many
//! trials run, how they are seeded and how the work is split across threads.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use super::error::EquityError;

/// Configuration for the equity engine.
///
/// # Example
/// ```
/// use tictactoe_equity::equity::EquityConfig;
///
/// let config = EquityConfig::fast().with_seed(7);
/// assert_eq!(config.seed, Some(7));
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EquityConfig {
    /// Number of Monte Carlo trials to run.
    ///
    /// The standard error of each equity shrinks with the square root of
    /// this number; 10,000 trials give roughly half a percentage point.
    pub trials: u64,

    /// Random seed for reproducibility.
    ///
    /// If set, the same request and trial count always produce the same
    /// result regardless of thread count. If `None`, a seed is drawn from
    /// the operating system.
    pub seed: Option<u64>,

    /// Number of worker threads.
    ///
    /// Set to `None` to use rayon's global pool (all available cores).
    pub num_threads: Option<usize>,

    /// Trials per work unit.
    ///
    /// Each batch has its own random stream and is the granularity at
    /// which cancellation and progress are observed.
    pub batch_size: u64,
}

impl Default for EquityConfig {
    fn default() -> Self {
        Self {
            trials: 10_000,
            seed: None,
            num_threads: None,
            batch_size: 1_000,
        }
    }
}

impl EquityConfig {
    /// Create a new EquityConfig with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// A quick estimate, good to a couple of percentage points.
    pub fn fast() -> Self {
        Self {
            trials: 1_000,
            batch_size: 250,
            ..Default::default()
        }
    }

    /// A tight estimate for final numbers.
    pub fn precise() -> Self {
        Self {
            trials: 1_000_000,
            batch_size: 10_000,
            ..Default::default()
        }
    }

    /// Builder method: set the trial count.
    pub fn with_trials(mut self, trials: u64) -> Self {
        self.trials = trials;
        self
    }

    /// Builder method: set random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Builder method: set number of threads.
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.num_threads = Some(threads);
        self
    }

    /// Builder method: set the batch size.
    pub fn with_batch_size(mut self, batch_size: u64) -> Self {
        self.batch_size = batch_size;
        self
    }

    /// Number of batches needed to cover `trials`.
    pub fn num_batches(&self) -> u64 {
        if self.batch_size == 0 {
            return 0;
        }
        self.trials.div_ceil(self.batch_size)
    }

    /// Trial count of batch `index`; only the last batch may be short.
    pub fn batch_trials(&self, index: u64) -> u64 {
        let start = index * self.batch_size;
        self.batch_size.min(self.trials.saturating_sub(start))
    }

    /// Validate the configuration and return any errors.
    pub fn validate(&self) -> Result<(), EquityError> {
        if self.trials == 0 {
            return Err(EquityError::InvalidTrialCount(self.trials));
        }
        if self.batch_size == 0 {
            return Err(EquityError::InvalidBatchSize(self.batch_size));
        }
        Ok(())
    }

    /// Load a configuration from a JSON file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, EquityError> {
        let content = fs::read_to_string(path.as_ref())
            .map_err(|e| EquityError::Io(e.to_string()))?;
        Self::from_json_str(&content)
    }

    /// Parse a configuration from a JSON string; missing fields take defaults.
    pub fn from_json_str(json: &str) -> Result<Self, EquityError> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| EquityError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }
}
