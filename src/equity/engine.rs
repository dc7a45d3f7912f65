//! Monte Carlo equity engine.
//!
//! Each trial samples a complete deal, ranks every player's best hand and
//! hands one unit of credit to the winners, split evenly on ties. Trials are
//! grouped into batches that run in parallel on rayon workers; each batch has
//! its own seeded generator and private tally, and tallies are merged in batch
//! order once all batches finish.

use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Instant;

use crate::game::hand_eval::{HandEvaluator, HandRank};
use super::config::EquityConfig;
use super::error::EquityError;
use super::output::{EquityResult, PlayerEquity};
use super::request::EquityRequest;
use super::sampler::{Deal, DealSampler};

/// Odd constant used to spread batch indices across the seed space.
const SEED_STRIDE: u64 = 0x9E37_79B9_7F4A_7C15;

/// Seed of batch `index` within a run seeded with `seed`.
pub(crate) fn batch_seed(seed: u64, index: usize) -> u64 {
    seed.wrapping_add((index as u64).wrapping_mul(SEED_STRIDE))
}

/// Per-player tallies over a set of trials.
#[derive(Debug, Clone, PartialEq)]
pub struct EquityAccumulator {
    credit: Vec<f64>,
    wins: Vec<u64>,
    ties: Vec<u64>,
    trials: u64,
}

impl EquityAccumulator {
    /// Create an empty tally for `num_players` players.
    pub fn new(num_players: usize) -> Self {
        Self {
            credit: vec![0.0; num_players],
            wins: vec![0; num_players],
            ties: vec![0; num_players],
            trials: 0,
        }
    }

    /// Number of players tracked.
    pub fn num_players(&self) -> usize {
        self.credit.len()
    }

    /// Trials recorded so far.
    pub fn trials(&self) -> u64 {
        self.trials
    }

    /// Record one trial given every player's best hand.
    ///
    /// All players holding the maximum share one unit of credit equally.
    #[inline]
    pub fn record(&mut self, ranks: &[HandRank]) {
        let Some(&best) = ranks.iter().max() else {
            return;
        };
        let num_winners = ranks.iter().filter(|&&r| r == best).count();
        let share = 1.0 / num_winners as f64;

        for (i, &rank) in ranks.iter().enumerate() {
            if rank == best {
                self.credit[i] += share;
                if num_winners == 1 {
                    self.wins[i] += 1;
                } else {
                    self.ties[i] += 1;
                }
            }
        }
        self.trials += 1;
    }

    /// Add another tally into this one.
    pub fn merge(&mut self, other: &Self) {
        for (a, b) in self.credit.iter_mut().zip(&other.credit) {
            *a += b;
        }
        for (a, b) in self.wins.iter_mut().zip(&other.wins) {
            *a += b;
        }
        for (a, b) in self.ties.iter_mut().zip(&other.ties) {
            *a += b;
        }
        self.trials += other.trials;
    }

    /// Equity of each player: accumulated credit over trials.
    pub fn equities(&self) -> Vec<f64> {
        if self.trials == 0 {
            return vec![0.0; self.credit.len()];
        }
        let trials = self.trials as f64;
        self.credit.iter().map(|c| c / trials).collect()
    }

    /// Package the tally as a result.
    pub fn into_result(self, requested_trials: u64, elapsed_seconds: f64) -> EquityResult {
        let equities = self.equities();
        let players = equities
            .into_iter()
            .enumerate()
            .map(|(i, equity)| PlayerEquity {
                player: i + 1,
                equity,
                wins: self.wins[i],
                ties: self.ties[i],
            })
            .collect();

        EquityResult {
            trials: self.trials,
            requested_trials,
            cancelled: self.trials < requested_trials,
            elapsed_seconds,
            players,
        }
    }
}

/// Monte Carlo equity engine.
#[derive(Debug, Clone, Default)]
pub struct EquityEngine {
    config: EquityConfig,
    evaluator: HandEvaluator,
}

impl EquityEngine {
    /// Create an engine with the given configuration.
    pub fn new(config: EquityConfig) -> Self {
        Self {
            config,
            evaluator: HandEvaluator::new(),
        }
    }

    /// Get the configuration.
    pub fn config(&self) -> &EquityConfig {
        &self.config
    }

    /// Best hand of every player in a deal, in seat order.
    pub fn rank_players(&self, deal: &Deal) -> Vec<HandRank> {
        deal.hands()
            .iter()
            .map(|hole| self.evaluator.best_hand(hole, deal.board()))
            .collect()
    }

    /// Seats (0-based) holding the best hand in a deal.
    pub fn winners(&self, deal: &Deal) -> Vec<usize> {
        let ranks = self.rank_players(deal);
        let Some(&best) = ranks.iter().max() else {
            return Vec::new();
        };
        (0..ranks.len()).filter(|&i| ranks[i] == best).collect()
    }

    /// Run the configured number of trials.
    pub fn run(&self, request: &EquityRequest) -> Result<EquityResult, EquityError> {
        let cancel = AtomicBool::new(false);
        self.run_with_progress(request, &cancel, |_| {})
    }

    /// Run with cooperative cancellation and progress reporting.
    ///
    /// `cancel` is checked before each batch starts; batches already running
    /// finish. `progress` receives the number of trials completed so far after
    /// every batch, from whichever worker finished it.
    ///
    /// A run cancelled after some batches completed returns the partial
    /// result with `cancelled` set. A run cancelled before any batch completed
    /// fails with `EquityError::Cancelled`.
    pub fn run_with_progress<F>(
        &self,
        request: &EquityRequest,
        cancel: &AtomicBool,
        progress: F,
    ) -> Result<EquityResult, EquityError>
    where
        F: Fn(u64) + Sync,
    {
        self.config.validate()?;
        let sampler = DealSampler::new(request)?;
        let num_players = request.num_players();
        let seed = self.config.seed.unwrap_or_else(rand::random);
        let num_batches = self.config.num_batches() as usize;

        debug!(
            "Equity run: {} players, {} unknown cards from a pool of {}",
            num_players,
            sampler.num_wildcards(),
            sampler.pool_size()
        );
        debug!(
            "{} trials in {} batches of {}, threads: {:?}, seed: {}",
            self.config.trials, num_batches, self.config.batch_size, self.config.num_threads, seed
        );

        let start_time = Instant::now();
        let completed = AtomicU64::new(0);

        let run_batches = || -> Vec<Option<EquityAccumulator>> {
            (0..num_batches)
                .into_par_iter()
                .map(|index| {
                    if cancel.load(Ordering::Relaxed) {
                        return None;
                    }
                    let trials = self.config.batch_trials(index as u64);
                    let tally = self.run_batch(&sampler, num_players, batch_seed(seed, index), trials);
                    let done = completed.fetch_add(trials, Ordering::Relaxed) + trials;
                    progress(done);
                    Some(tally)
                })
                .collect()
        };

        let tallies = match self.config.num_threads {
            Some(threads) => rayon::ThreadPoolBuilder::new()
                .num_threads(threads)
                .build()
                .map_err(|e| EquityError::ThreadPool(e.to_string()))?
                .install(run_batches),
            None => run_batches(),
        };

        let mut total = EquityAccumulator::new(num_players);
        for tally in tallies.iter().flatten() {
            total.merge(tally);
        }

        let elapsed = start_time.elapsed().as_secs_f64();
        if total.trials() == 0 {
            warn!("Equity run cancelled before any batch completed");
            return Err(EquityError::Cancelled);
        }

        let result = total.into_result(self.config.trials, elapsed);
        if result.cancelled {
            warn!(
                "Equity run cancelled after {} of {} trials",
                result.trials, result.requested_trials
            );
        }
        info!(
            "Equity run finished: {} trials in {:.3}s ({:.0} trials/s)",
            result.trials,
            elapsed,
            result.trials_per_second()
        );

        Ok(result)
    }

    fn run_batch(
        &self,
        sampler: &DealSampler,
        num_players: usize,
        seed: u64,
        trials: u64,
    ) -> EquityAccumulator {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut tally = EquityAccumulator::new(num_players);
        let mut deal = sampler.template();
        let mut ranks = Vec::with_capacity(num_players);

        for _ in 0..trials {
            sampler.sample_into(&mut rng, &mut deal);
            ranks.clear();
            ranks.extend(
                deal.hands()
                    .iter()
                    .map(|hole| self.evaluator.best_hand(hole, deal.board())),
            );
            tally.record(&ranks);
        }

        tally
    }
}

/// Estimate each player's equity over `trials` trials with default settings.
///
/// Returns one fraction per player, in seat order, summing to 1.
pub fn simulate(request: &EquityRequest, trials: u64) -> Result<Vec<f64>, EquityError> {
    let config = EquityConfig::default().with_trials(trials);
    let result = EquityEngine::new(config).run(request)?;
    Ok(result.equities())
}
