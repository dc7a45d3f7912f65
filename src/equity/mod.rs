//! Monte Carlo equity calculation.
//!
//! This module turns a partially known deal into each player's probability
//! of winning the pot, with ties split evenly.
//!
//! # Overview
//!
//! A run proceeds in three stages:
//! 1. Validate the request: player count, card conflicts, deck capacity
//! 2. Repeatedly complete the deal at random from the cards left over
//! 3. Rank every player's best hand and credit the winners
//!
//! # Example
//!
//! ```
//! use tictactoe_equity::equity::{EquityConfig, EquityEngine, EquityRequest};
//!
//! let request = EquityRequest::parse(
//!     &["Ah Kh * *", "* * * *"],
//!     "* * * * * * * * *",
//! ).unwrap();
//!
//! let engine = EquityEngine::new(EquityConfig::fast().with_seed(42));
//! let result = engine.run(&request).unwrap();
//! assert!((result.total() - 1.0).abs() < 1e-9);
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod output;
pub mod request;
pub mod sampler;

// Re-export main types
pub use config::EquityConfig;
pub use engine::{simulate, EquityAccumulator, EquityEngine};
pub use error::EquityError;
pub use output::{EquityResult, PlayerEquity};
pub use request::{parse_hand, EquityRequest, HandSpec, Slot, HOLE_CARDS};
pub use sampler::{Deal, DealSampler};
