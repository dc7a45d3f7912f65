//! Random completion of a partially known deal.
//!
//! The sampler removes every known card (hole, board and dead) from a deck
//! once, then fills the unknown slots of each trial by drawing without
//! replacement from a fresh copy of that deck. Every completion consistent
//! with the known cards is equally likely.

use rand::Rng;
use std::fmt;

use crate::game::board::Board;
use crate::game::card::{Card, Deck};
use super::error::EquityError;
use super::request::{EquityRequest, Slot, HOLE_CARDS};

/// A complete deal: nine board cards and four hole cards per player.
#[derive(Clone, PartialEq, Eq)]
pub struct Deal {
    board: Board,
    hands: Vec<[Card; HOLE_CARDS]>,
}

impl Deal {
    /// Create a deal, checking that no card appears twice.
    pub fn new(board: Board, hands: Vec<[Card; HOLE_CARDS]>) -> Result<Self, EquityError> {
        let deal = Self { board, hands };
        let mut mask = 0u64;
        for card in deal.cards() {
            if mask & card.bit() != 0 {
                return Err(EquityError::DuplicateCard(card));
            }
            mask |= card.bit();
        }
        Ok(deal)
    }

    /// The board.
    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Hole cards of every player.
    #[inline]
    pub fn hands(&self) -> &[[Card; HOLE_CARDS]] {
        &self.hands
    }

    /// Hole cards of one player.
    #[inline]
    pub fn hand(&self, player: usize) -> &[Card; HOLE_CARDS] {
        &self.hands[player]
    }

    /// Number of players.
    pub fn num_players(&self) -> usize {
        self.hands.len()
    }

    /// Every card in the deal: board first, then hole cards by player.
    pub fn cards(&self) -> impl Iterator<Item = Card> + '_ {
        self.board
            .cards()
            .iter()
            .copied()
            .chain(self.hands.iter().flat_map(|h| h.iter().copied()))
    }

    #[inline]
    fn set(&mut self, slot: Slot, card: Card) {
        match slot {
            Slot::Board(cell) => self.board.set(cell, card),
            Slot::Hole { player, index } => self.hands[player][index] = card,
            Slot::Dead(_) => {}
        }
    }
}

impl fmt::Debug for Deal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Deal {{ board: [{}]", self.board)?;
        for (i, hand) in self.hands.iter().enumerate() {
            write!(f, ", p{}: {} {} {} {}", i + 1, hand[0], hand[1], hand[2], hand[3])?;
        }
        write!(f, " }}")
    }
}

/// Draws complete deals consistent with an `EquityRequest`.
#[derive(Debug, Clone)]
pub struct DealSampler {
    /// Known cards in place, unknown slots holding placeholders.
    template: Deal,
    /// Deck with every known and dead card removed.
    deck: Deck,
    /// Unknown slots in fill order.
    wildcards: Vec<Slot>,
}

impl DealSampler {
    /// Validate a request and prepare to sample it.
    pub fn new(request: &EquityRequest) -> Result<Self, EquityError> {
        request.validate()?;

        let placeholder = Card::from_id(0);
        let mut template = Deal {
            board: Board::new([placeholder; 9]),
            hands: vec![[placeholder; HOLE_CARDS]; request.num_players()],
        };
        let mut deck = Deck::new();
        for (slot, card) in request.fixed_cards() {
            template.set(slot, card);
            deck.remove(card)?;
        }

        Ok(Self {
            template,
            deck,
            wildcards: request.wildcard_slots(),
        })
    }

    /// Number of unknown slots filled per trial.
    pub fn num_wildcards(&self) -> usize {
        self.wildcards.len()
    }

    /// Number of cards the unknown slots are drawn from.
    pub fn pool_size(&self) -> usize {
        self.deck.remaining()
    }

    /// A deal with known cards in place; unknown slots hold placeholders
    /// until overwritten by `sample_into`.
    pub fn template(&self) -> Deal {
        self.template.clone()
    }

    /// Draw a fresh complete deal.
    pub fn sample<R: Rng>(&self, rng: &mut R) -> Deal {
        let mut deal = self.template();
        self.sample_into(rng, &mut deal);
        deal
    }

    /// Overwrite the unknown slots of `deal` with a fresh draw.
    ///
    /// `deal` must come from `template()` or an earlier `sample` of this
    /// sampler; known slots are left untouched.
    #[inline]
    pub fn sample_into<R: Rng>(&self, rng: &mut R, deal: &mut Deal) {
        let mut deck = self.deck.clone();
        // The request was checked to need no more cards than the deck holds.
        let draws = std::iter::from_fn(|| deck.pick(&mut *rng));
        for (&slot, card) in self.wildcards.iter().zip(draws) {
            deal.set(slot, card);
        }
    }
}
