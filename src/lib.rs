//! # Tic-Tac-Toe Poker Equity
//!
//! A Monte Carlo equity calculator for tic-tac-toe poker, a variant in which
//! every player holds four hole cards and nine community cards are laid out
//! on a 3x3 grid.
//!
//! ## Rules
//!
//! A final hand is exactly two hole cards plus the three board cards of one
//! row, column or diagonal of the grid: 6 hole pairs times 8 lines gives 48
//! candidate hands per player. Standard five-card ranking applies and the
//! ace may play low in the wheel.
//!
//! ## Features
//!
//! - **Partial information**: Any hole or board card may be a wildcard (`*`)
//! - **Dead cards**: Exposed cards that belong to nobody leave the deck
//! - **Parallel**: Trials run in seeded batches across rayon workers
//! - **Reproducible**: A seeded run gives the same answer on any thread count
//! - **Cancellable**: Partial results stay valid when a run stops early
//!
//! ## Quick Start
//!
//! ```
//! use tictactoe_equity::{EquityConfig, EquityEngine, EquityRequest};
//!
//! let request = EquityRequest::parse(
//!     &["Ah Kh Qd Jc", "* * * *"],
//!     "Th * * * * * * * *",
//! ).unwrap();
//!
//! let engine = EquityEngine::new(EquityConfig::fast().with_seed(1));
//! let result = engine.run(&request).unwrap();
//! println!("{}", result);
//! ```
//!
//! ## Modules
//!
//! - [`game`]: Cards, board geometry and hand ranking
//! - [`equity`]: Requests, deal sampling and the equity engine
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                         Equity Engine                           │
//! │  - Batches over rayon     - Seeded per-batch RNG                │
//! │  - Tie-split tallies      - Cancellation and progress           │
//! └─────────────────────────────────────────────────────────────────┘
//!               │                                   │
//!               │ complete deals                    │ rank players
//!               ▼                                   ▼
//!        ┌─────────────┐                    ┌───────────────┐
//!        │    Deal     │                    │     Hand      │
//!        │   Sampler   │                    │   Evaluator   │
//!        └─────────────┘                    └───────────────┘
//!               │                                   │
//!               ▼                                   ▼
//!        ┌─────────────┐                    ┌───────────────┐
//!        │ Card / Deck │                    │ Board (cells, │
//!        │             │                    │    lines)     │
//!        └─────────────┘                    └───────────────┘
//! ```

#![warn(missing_docs)]

/// Game model module.
///
/// Cards, decks, the 3x3 board and hand evaluation.
pub mod game;

/// Equity calculation module.
///
/// Request parsing and validation, deal sampling and the parallel engine.
pub mod equity;

// Re-export commonly used types at crate root for convenience
pub use equity::{simulate, EquityConfig, EquityEngine, EquityError, EquityRequest, EquityResult};
pub use game::{Board, BoardSpec, Card, CardSpec, HandEvaluator, HandRank};
