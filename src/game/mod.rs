//! Tic-tac-toe poker game model.
//!
//! Each player holds four hole cards and the board is a 3x3 grid of nine
//! cards. A final hand is exactly two hole cards plus the three board cards
//! of one row, column or diagonal.
//!
//! ## Modules
//!
//! - `card`: Card, card slot, deck and street representations
//! - `board`: Grid topology (cells and lines) and dealt/partial boards
//! - `hand_eval`: 5-card hand ranking and best-hand search

pub mod card;
pub mod board;
pub mod hand_eval;

// Re-export commonly used types
pub use card::{Card, CardError, CardSpec, Deck, Street};
pub use board::{cells, lines, Board, BoardSpec, Cell, Line, CELLS, LINES};
pub use hand_eval::{BestHand, HandCategory, HandEvaluator, HandRank, HOLE_PAIRS};
