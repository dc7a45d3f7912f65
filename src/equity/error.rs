//! Errors raised while validating and running an equity request.
//!
//! Every variant except `Cancelled` is detected before the first trial runs;
//! once a request validates, sampling and ranking cannot fail.

use std::fmt;

use crate::game::card::{Card, CardError};
use super::request::Slot;

/// Errors that can occur when computing equity.
#[derive(Debug, Clone, PartialEq)]
pub enum EquityError {
    /// A token is neither a card like "Ah" nor the wildcard "*".
    InvalidCardToken(String),
    /// The same physical card was given in two fixed slots.
    ConflictingCards {
        /// The repeated card.
        card: Card,
        /// Where it appeared first.
        first: Slot,
        /// Where it appeared again.
        second: Slot,
    },
    /// Trial count below one.
    InvalidTrialCount(u64),
    /// Fewer than two players.
    InvalidPlayerCount(usize),
    /// A hand or the board got the wrong number of card slots.
    WrongCardCount {
        /// Which hand or board.
        slot: String,
        /// Slots required.
        expected: usize,
        /// Tokens given.
        actual: usize,
    },
    /// More unknown slots than cards left in the deck.
    NotEnoughCards {
        /// Unknown slots to fill.
        needed: usize,
        /// Cards left after removing known ones.
        available: usize,
    },
    /// A card was removed from a deck that no longer held it.
    DuplicateCard(Card),
    /// Batch size below one.
    InvalidBatchSize(u64),
    /// The worker pool could not be built.
    ThreadPool(String),
    /// The run was cancelled before any batch completed.
    Cancelled,
    /// Reading or writing a file failed.
    Io(String),
    /// A JSON document did not parse.
    Parse(String),
}

impl fmt::Display for EquityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidCardToken(t) => write!(f, "Invalid card token: '{}'", t),
            Self::ConflictingCards { card, first, second } => {
                write!(f, "Card {} appears twice: {} and {}", card, first, second)
            }
            Self::InvalidTrialCount(n) => write!(f, "Invalid trial count: {} (must be at least 1)", n),
            Self::InvalidPlayerCount(n) => write!(f, "Invalid player count: {} (must be at least 2)", n),
            Self::WrongCardCount { slot, expected, actual } => {
                write!(f, "{} needs {} cards, got {}", slot, expected, actual)
            }
            Self::NotEnoughCards { needed, available } => {
                write!(f, "Not enough cards: {} unknown slots but {} cards left in the deck", needed, available)
            }
            Self::DuplicateCard(c) => write!(f, "Card {} is not in the deck", c),
            Self::InvalidBatchSize(n) => write!(f, "Invalid batch size: {} (must be at least 1)", n),
            Self::ThreadPool(e) => write!(f, "Thread pool error: {}", e),
            Self::Cancelled => write!(f, "Cancelled before any trial completed"),
            Self::Io(e) => write!(f, "IO error: {}", e),
            Self::Parse(e) => write!(f, "Parse error: {}", e),
        }
    }
}

impl std::error::Error for EquityError {}

impl From<CardError> for EquityError {
    fn from(e: CardError) -> Self {
        match e {
            CardError::InvalidToken(t) => Self::InvalidCardToken(t),
            CardError::DuplicateCard(c) => Self::DuplicateCard(c),
            CardError::DeckExhausted { requested, remaining } => Self::NotEnoughCards {
                needed: requested,
                available: remaining,
            },
            CardError::WrongCardCount { expected, actual } => Self::WrongCardCount {
                slot: "Card list".to_string(),
                expected,
                actual,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::board::Cell;

    #[test]
    fn test_card_errors_map_to_request_errors() {
        let e: EquityError = CardError::InvalidToken("Zz".into()).into();
        assert_eq!(e, EquityError::InvalidCardToken("Zz".into()));

        let e: EquityError = CardError::DeckExhausted { requested: 5, remaining: 3 }.into();
        assert_eq!(e, EquityError::NotEnoughCards { needed: 5, available: 3 });
    }

    #[test]
    fn test_conflict_message_names_both_slots() {
        let e = EquityError::ConflictingCards {
            card: Card::parse("Ah").unwrap(),
            first: Slot::Hole { player: 0, index: 1 },
            second: Slot::Board(Cell::new(1, 1)),
        };
        assert_eq!(
            e.to_string(),
            "Card Ah appears twice: player 1 hole card 2 and board cell r2c2"
        );
    }
}
