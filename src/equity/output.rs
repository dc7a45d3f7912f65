//! Equity results and export utilities.
//!
//! This module provides the serializable result of an equity run and
//! functions for printing it and saving it to disk.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Equity of a single player.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerEquity {
    /// Player number, starting at 1
    pub player: usize,
    /// Share of the pot won on average, in [0, 1]
    pub equity: f64,
    /// Trials won outright
    pub wins: u64,
    /// Trials split with at least one other player
    pub ties: u64,
}

/// Result of an equity run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquityResult {
    /// Trials actually run
    pub trials: u64,
    /// Trials asked for
    pub requested_trials: u64,
    /// Whether the run stopped before all requested trials
    pub cancelled: bool,
    /// Wall-clock time of the run
    pub elapsed_seconds: f64,
    /// One entry per player, in seat order
    pub players: Vec<PlayerEquity>,
}

impl EquityResult {
    /// Equity fractions in seat order.
    pub fn equities(&self) -> Vec<f64> {
        self.players.iter().map(|p| p.equity).collect()
    }

    /// Equity of one player (0-based seat).
    pub fn equity(&self, player: usize) -> Option<f64> {
        self.players.get(player).map(|p| p.equity)
    }

    /// Sum of all equities; 1.0 up to rounding.
    pub fn total(&self) -> f64 {
        self.players.iter().map(|p| p.equity).sum()
    }

    /// Trials per second.
    pub fn trials_per_second(&self) -> f64 {
        if self.elapsed_seconds > 0.0 {
            self.trials as f64 / self.elapsed_seconds
        } else {
            0.0
        }
    }

    /// Serialize to pretty JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Save to JSON file.
    pub fn save_json<P: AsRef<Path>>(&self, path: P) -> std::io::Result<()> {
        let json = self.to_json()?;
        let mut file = File::create(path)?;
        file.write_all(json.as_bytes())
    }
}

impl fmt::Display for EquityResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "###########################")?;
        if self.cancelled {
            writeln!(
                f,
                "Results after {} of {} trials (cancelled):\n",
                self.trials, self.requested_trials
            )?;
        } else {
            writeln!(f, "Results after {} trials:\n", self.trials)?;
        }
        for p in &self.players {
            writeln!(f, "    Player {}: {:.2}%", p.player, 100.0 * p.equity)?;
        }
        write!(f, "###########################")
    }
}
