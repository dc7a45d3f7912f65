//! Card representation for tic-tac-toe poker.
//!
//! This module provides the card-level building blocks of the equity engine:
//! - `Card`: A single playing card with rank and suit
//! - `CardSpec`: A user-supplied card slot, either a known card or a wildcard
//! - `Deck`: The working deck cards are removed from and drawn out of
//! - `Street`: The dealing round a board cell belongs to

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// Rank of a card (0-12: 2-A).

/// Two.
pub const RANK_2: u8 = 0;
/// Three.
pub const RANK_3: u8 = 1;
/// Four.
pub const RANK_4: u8 = 2;
/// Five.
pub const RANK_5: u8 = 3;
/// Six.
pub const RANK_6: u8 = 4;
/// Seven.
pub const RANK_7: u8 = 5;
/// Eight.
pub const RANK_8: u8 = 6;
/// Nine.
pub const RANK_9: u8 = 7;
/// Ten.
pub const RANK_T: u8 = 8;
/// Jack.
pub const RANK_J: u8 = 9;
/// Queen.
pub const RANK_Q: u8 = 10;
/// King.
pub const RANK_K: u8 = 11;
/// Ace.
pub const RANK_A: u8 = 12;

// Suit of a card (0-3).

/// Clubs.
pub const SUIT_CLUBS: u8 = 0;
/// Diamonds.
pub const SUIT_DIAMONDS: u8 = 1;
/// Hearts.
pub const SUIT_HEARTS: u8 = 2;
/// Spades.
pub const SUIT_SPADES: u8 = 3;

/// Number of cards in a full deck.
pub const DECK_SIZE: usize = 52;

/// Token standing for an unknown card.
pub const WILDCARD: char = '*';

/// Rank characters for display.
const RANK_CHARS: [char; 13] = ['2', '3', '4', '5', '6', '7', '8', '9', 'T', 'J', 'Q', 'K', 'A'];

/// Suit characters for display.
const SUIT_CHARS: [char; 4] = ['c', 'd', 'h', 's'];

/// A single playing card.
///
/// Ordering follows the (rank, suit) pair since the id is `rank * 4 + suit`.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Card {
    /// Card index 0-51: rank * 4 + suit
    id: u8,
}

impl Card {
    /// Create a new card from rank (0-12) and suit (0-3).
    #[inline]
    pub fn new(rank: u8, suit: u8) -> Self {
        debug_assert!(rank < 13, "rank must be 0-12");
        debug_assert!(suit < 4, "suit must be 0-3");
        Self { id: rank * 4 + suit }
    }

    /// Create a card from its ID (0-51).
    #[inline]
    pub fn from_id(id: u8) -> Self {
        debug_assert!(id < 52, "card id must be 0-51");
        Self { id }
    }

    /// Parse a card from a token like "As", "Kh", "2c".
    pub fn parse(s: &str) -> Result<Self, CardError> {
        let mut chars = s.trim().chars();
        let (Some(r), Some(u), None) = (chars.next(), chars.next(), chars.next()) else {
            return Err(CardError::InvalidToken(s.to_string()));
        };

        let rank = RANK_CHARS.iter().position(|&c| c == r.to_ascii_uppercase());
        let suit = SUIT_CHARS.iter().position(|&c| c == u.to_ascii_lowercase());
        match (rank, suit) {
            (Some(rank), Some(suit)) => Ok(Self::new(rank as u8, suit as u8)),
            _ => Err(CardError::InvalidToken(s.to_string())),
        }
    }

    /// Get the card's ID (0-51).
    #[inline]
    pub fn id(&self) -> u8 {
        self.id
    }

    /// Get the card's rank (0-12: 2-A).
    #[inline]
    pub fn rank(&self) -> u8 {
        self.id / 4
    }

    /// Get the card's suit (0-3).
    #[inline]
    pub fn suit(&self) -> u8 {
        self.id % 4
    }

    /// Single-bit mask of this card within a 52-bit card set.
    #[inline]
    pub fn bit(&self) -> u64 {
        1u64 << self.id
    }

    /// Get rank character for display.
    pub fn rank_char(&self) -> char {
        RANK_CHARS[self.rank() as usize]
    }

    /// Get suit character for display.
    pub fn suit_char(&self) -> char {
        SUIT_CHARS[self.suit() as usize]
    }

    /// All 52 cards in id order.
    pub fn all() -> impl Iterator<Item = Card> {
        (0..DECK_SIZE as u8).map(Card::from_id)
    }
}

impl FromStr for Card {
    type Err = CardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Card {
    type Error = CardError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<Card> for String {
    fn from(card: Card) -> Self {
        card.to_string()
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank_char(), self.suit_char())
    }
}

impl fmt::Debug for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}

/// One card slot as supplied by the caller.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(try_from = "String", into = "String")]
pub enum CardSpec {
    /// A concrete, already-known card.
    Known(Card),
    /// Unknown; sampled from the remaining deck on every trial.
    #[default]
    Wildcard,
}

impl CardSpec {
    /// Parse a single token: a card like "Ah" or the wildcard "*".
    pub fn parse(s: &str) -> Result<Self, CardError> {
        let t = s.trim();
        if t.len() == 1 && t.starts_with(WILDCARD) {
            return Ok(CardSpec::Wildcard);
        }
        Card::parse(t).map(CardSpec::Known)
    }

    /// Parse a run of tokens such as "Ah Kd * *", "Ah,Kd,*,*" or "AhKd**".
    pub fn parse_many(s: &str) -> Result<Vec<Self>, CardError> {
        let chars: Vec<char> = s
            .chars()
            .filter(|c| !c.is_whitespace() && *c != ',')
            .collect();

        let mut specs = Vec::with_capacity(chars.len() / 2 + 1);
        let mut i = 0;
        while i < chars.len() {
            if chars[i] == WILDCARD {
                specs.push(CardSpec::Wildcard);
                i += 1;
                continue;
            }
            let end = (i + 2).min(chars.len());
            let token: String = chars[i..end].iter().collect();
            specs.push(CardSpec::Known(Card::parse(&token)?));
            i = end;
        }
        Ok(specs)
    }

    /// The concrete card, if known.
    #[inline]
    pub fn card(&self) -> Option<Card> {
        match self {
            CardSpec::Known(card) => Some(*card),
            CardSpec::Wildcard => None,
        }
    }

    /// Check if this slot is still unknown.
    #[inline]
    pub fn is_wildcard(&self) -> bool {
        matches!(self, CardSpec::Wildcard)
    }
}

impl From<Card> for CardSpec {
    fn from(card: Card) -> Self {
        CardSpec::Known(card)
    }
}

impl FromStr for CardSpec {
    type Err = CardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for CardSpec {
    type Error = CardError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<CardSpec> for String {
    fn from(spec: CardSpec) -> Self {
        spec.to_string()
    }
}

impl fmt::Display for CardSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CardSpec::Known(card) => write!(f, "{}", card),
            CardSpec::Wildcard => write!(f, "{}", WILDCARD),
        }
    }
}

impl fmt::Debug for CardSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}

/// Dealing round of the 3x3 board.
///
/// The four corners come on the flop, the four edge cells on the turn and
/// the center card alone on the river.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Street {
    /// The four corners.
    Flop,
    /// The four edge cells.
    Turn,
    /// The center cell.
    River,
}

impl Street {
    /// All streets in dealing order.
    pub const ALL: [Street; 3] = [Street::Flop, Street::Turn, Street::River];
}

impl fmt::Display for Street {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Street::Flop => write!(f, "Flop"),
            Street::Turn => write!(f, "Turn"),
            Street::River => write!(f, "River"),
        }
    }
}

/// A working deck of playing cards.
///
/// Cards still available live in `cards[..size]`; removing or drawing a card
/// swaps it out of that prefix.
#[derive(Clone)]
pub struct Deck {
    /// Available cards occupy the first `size` entries.
    cards: [Card; DECK_SIZE],
    /// Number of usable cards in the deck.
    size: usize,
    /// Bitmask of cards no longer in the deck.
    dealt_mask: u64,
}

impl Deck {
    /// Create a full 52-card deck in standard order.
    pub fn new() -> Self {
        let mut cards = [Card::from_id(0); DECK_SIZE];
        for (i, card) in cards.iter_mut().enumerate() {
            *card = Card::from_id(i as u8);
        }
        Self {
            cards,
            size: DECK_SIZE,
            dealt_mask: 0,
        }
    }

    /// Create a deck with specific cards removed.
    pub fn without(dead_cards: &[Card]) -> Result<Self, CardError> {
        let mut deck = Self::new();
        deck.remove_all(dead_cards)?;
        Ok(deck)
    }

    /// Remove a known card from the deck.
    ///
    /// Fails with `DuplicateCard` when the card was already removed or dealt,
    /// which is how the same physical card named twice gets caught.
    pub fn remove(&mut self, card: Card) -> Result<(), CardError> {
        if !self.contains(card) {
            return Err(CardError::DuplicateCard(card));
        }
        // Present cards always sit inside the live prefix.
        if let Some(pos) = self.cards[..self.size].iter().position(|&c| c == card) {
            self.size -= 1;
            self.cards.swap(pos, self.size);
        }
        self.dealt_mask |= card.bit();
        Ok(())
    }

    /// Remove several known cards.
    pub fn remove_all(&mut self, cards: &[Card]) -> Result<(), CardError> {
        for &card in cards {
            self.remove(card)?;
        }
        Ok(())
    }

    /// Draw `out.len()` distinct cards uniformly at random without replacement.
    pub fn draw_into<R: Rng>(&mut self, rng: &mut R, out: &mut [Card]) -> Result<(), CardError> {
        if out.len() > self.size {
            return Err(CardError::DeckExhausted {
                requested: out.len(),
                remaining: self.size,
            });
        }
        for slot in out.iter_mut() {
            let j = rng.gen_range(0..self.size);
            self.size -= 1;
            self.cards.swap(j, self.size);
            let card = self.cards[self.size];
            self.dealt_mask |= card.bit();
            *slot = card;
        }
        Ok(())
    }

    /// Draw `n` distinct cards uniformly at random without replacement.
    pub fn draw<R: Rng>(&mut self, rng: &mut R, n: usize) -> Result<Vec<Card>, CardError> {
        let mut cards = vec![Card::from_id(0); n];
        self.draw_into(rng, &mut cards)?;
        Ok(cards)
    }

    /// Draw a single card uniformly at random, or `None` if the deck is empty.
    #[inline]
    pub fn pick<R: Rng>(&mut self, rng: &mut R) -> Option<Card> {
        if self.size == 0 {
            return None;
        }
        let j = rng.gen_range(0..self.size);
        self.size -= 1;
        self.cards.swap(j, self.size);
        let card = self.cards[self.size];
        self.dealt_mask |= card.bit();
        Some(card)
    }

    /// Get the number of remaining cards.
    pub fn remaining(&self) -> usize {
        self.size
    }

    /// Check if a card is still available.
    pub fn contains(&self, card: Card) -> bool {
        self.dealt_mask & card.bit() == 0
    }

    /// Get remaining cards as a slice (in no particular order).
    pub fn remaining_cards(&self) -> &[Card] {
        &self.cards[..self.size]
    }
}

impl Default for Deck {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Deck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Deck({} remaining)", self.remaining())
    }
}

// ============================================================================
// Errors
// ============================================================================

/// Errors raised by card parsing and deck operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CardError {
    /// Token is neither a rank+suit pair nor the wildcard.
    InvalidToken(String),
    /// Card is not in the deck (removed or dealt already).
    DuplicateCard(Card),
    /// More cards requested than the deck holds.
    DeckExhausted {
        /// Cards asked for.
        requested: usize,
        /// Cards left.
        remaining: usize,
    },
    /// A fixed-size group of card slots got the wrong number of tokens.
    WrongCardCount {
        /// Slots required.
        expected: usize,
        /// Tokens given.
        actual: usize,
    },
}

impl fmt::Display for CardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidToken(t) => write!(f, "Invalid card token: '{}'", t),
            Self::DuplicateCard(c) => write!(f, "Card {} is not in the deck", c),
            Self::DeckExhausted { requested, remaining } => {
                write!(f, "Cannot draw {} cards, only {} remaining", requested, remaining)
            }
            Self::WrongCardCount { expected, actual } => {
                write!(f, "Expected {} cards, got {}", expected, actual)
            }
        }
    }
}

impl std::error::Error for CardError {}
