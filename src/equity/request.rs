//! The parsed problem description handed to the engine.
//!
//! A request lists each player's four hole-card slots, the nine board
//! slots and any dead cards. Slots are either known cards or wildcards.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;

use crate::game::board::{BoardSpec, Cell, NUM_CELLS};
use crate::game::card::{Card, CardSpec, DECK_SIZE};
use super::error::EquityError;

/// Hole cards per player.
pub const HOLE_CARDS: usize = 4;

/// One player's hole-card slots.
pub type HandSpec = [CardSpec; HOLE_CARDS];

/// Where a card sits in a request or deal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    /// Hole card `index` (0-3) of player `player` (0-based).
    Hole {
        /// Seat, 0-based.
        player: usize,
        /// Hole card position, 0-3.
        index: usize,
    },
    /// A board cell.
    Board(Cell),
    /// Dead card number `index` (0-based).
    Dead(usize),
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Slot::Hole { player, index } => {
                write!(f, "player {} hole card {}", player + 1, index + 1)
            }
            Slot::Board(cell) => write!(f, "board cell {}", cell),
            Slot::Dead(i) => write!(f, "dead card {}", i + 1),
        }
    }
}

/// An equity question: who holds what, what is on the board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EquityRequest {
    /// Hole-card slots, one entry per player.
    pub players: Vec<HandSpec>,
    /// Board slots in row-major order.
    #[serde(default)]
    pub board: BoardSpec,
    /// Cards known to be out of play.
    #[serde(default)]
    pub dead: Vec<Card>,
}

impl EquityRequest {
    /// Create a request without dead cards.
    pub fn new(players: Vec<HandSpec>, board: BoardSpec) -> Self {
        Self {
            players,
            board,
            dead: Vec::new(),
        }
    }

    /// Builder method: set the dead cards.
    pub fn with_dead(mut self, dead: Vec<Card>) -> Self {
        self.dead = dead;
        self
    }

    /// Parse a request from token strings, e.g. `["Ah Kd * *", "* * * *"]`
    /// and `"* * * * * * * * *"`.
    pub fn parse(players: &[&str], board: &str) -> Result<Self, EquityError> {
        let players = players
            .iter()
            .enumerate()
            .map(|(i, s)| parse_hand(s, i))
            .collect::<Result<Vec<_>, _>>()?;
        let board = BoardSpec::parse(board).map_err(|e| match EquityError::from(e) {
            EquityError::WrongCardCount { expected, actual, .. } => EquityError::WrongCardCount {
                slot: "Board".to_string(),
                expected,
                actual,
            },
            other => other,
        })?;
        Ok(Self::new(players, board))
    }

    /// Load a request from a JSON file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, EquityError> {
        let content = fs::read_to_string(path.as_ref())
            .map_err(|e| EquityError::Io(e.to_string()))?;
        Self::from_json_str(&content)
    }

    /// Parse a request from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self, EquityError> {
        let request: Self = serde_json::from_str(json)
            .map_err(|e| EquityError::Parse(e.to_string()))?;
        request.validate()?;
        Ok(request)
    }

    /// Number of players.
    pub fn num_players(&self) -> usize {
        self.players.len()
    }

    /// Every known card with its slot: hole cards, then board, then dead cards.
    pub fn fixed_cards(&self) -> Vec<(Slot, Card)> {
        let holes = self.players.iter().enumerate().flat_map(|(player, hand)| {
            hand.iter()
                .enumerate()
                .filter_map(move |(index, spec)| spec.card().map(|c| (Slot::Hole { player, index }, c)))
        });
        let board = self
            .board
            .cells
            .iter()
            .enumerate()
            .filter_map(|(i, spec)| spec.card().map(|c| (Slot::Board(Cell::from_index(i)), c)));
        let dead = self.dead.iter().enumerate().map(|(i, &c)| (Slot::Dead(i), c));

        holes.chain(board).chain(dead).collect()
    }

    /// Every unknown slot in sampling order: board cells first, then hole cards.
    pub fn wildcard_slots(&self) -> Vec<Slot> {
        let board = (0..NUM_CELLS)
            .filter(|&i| self.board.cells[i].is_wildcard())
            .map(|i| Slot::Board(Cell::from_index(i)));
        let holes = self.players.iter().enumerate().flat_map(|(player, hand)| {
            (0..HOLE_CARDS)
                .filter(move |&index| hand[index].is_wildcard())
                .map(move |index| Slot::Hole { player, index })
        });

        board.chain(holes).collect()
    }

    /// Validate the request and return the mask of known cards.
    ///
    /// Checks the player count, that no physical card is named twice and
    /// that the deck can fill every unknown slot.
    pub fn validate(&self) -> Result<u64, EquityError> {
        if self.players.len() < 2 {
            return Err(EquityError::InvalidPlayerCount(self.players.len()));
        }

        let fixed = self.fixed_cards();
        let mut seen: FxHashMap<Card, Slot> =
            FxHashMap::with_capacity_and_hasher(fixed.len(), Default::default());
        let mut used = 0u64;
        for (slot, card) in fixed {
            if let Some(&first) = seen.get(&card) {
                return Err(EquityError::ConflictingCards {
                    card,
                    first,
                    second: slot,
                });
            }
            seen.insert(card, slot);
            used |= card.bit();
        }

        let needed = self.wildcard_slots().len();
        let available = DECK_SIZE - seen.len();
        if needed > available {
            return Err(EquityError::NotEnoughCards { needed, available });
        }

        Ok(used)
    }
}

/// Parse one player's four hole-card slots.
pub fn parse_hand(s: &str, player: usize) -> Result<HandSpec, EquityError> {
    let specs = CardSpec::parse_many(s)?;
    specs.try_into().map_err(|v: Vec<CardSpec>| EquityError::WrongCardCount {
        slot: format!("Player {}", player + 1),
        expected: HOLE_CARDS,
        actual: v.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_request() {
        let req = EquityRequest::parse(&["Ah Kd * *", "* * * *"], "Qs * * * * * * * 2c").unwrap();
        assert_eq!(req.num_players(), 2);
        assert_eq!(req.fixed_cards().len(), 4);
        assert_eq!(req.wildcard_slots().len(), 7 + 6);
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_wildcard_order_board_first() {
        let req = EquityRequest::parse(&["* Kd Ah Ac", "Qd Qc Qh *"], "Qs Js Ts 9s 8s 7s 6s 5s *").unwrap();
        assert_eq!(
            req.wildcard_slots(),
            vec![
                Slot::Board(Cell::from_index(8)),
                Slot::Hole { player: 0, index: 0 },
                Slot::Hole { player: 1, index: 3 },
            ]
        );
    }

    #[test]
    fn test_wrong_card_counts() {
        let err = EquityRequest::parse(&["Ah Kd *", "* * * *"], "* * * * * * * * *").unwrap_err();
        assert_eq!(
            err,
            EquityError::WrongCardCount { slot: "Player 1".into(), expected: 4, actual: 3 }
        );

        let err = EquityRequest::parse(&["* * * *", "* * * *"], "* * *").unwrap_err();
        assert_eq!(
            err,
            EquityError::WrongCardCount { slot: "Board".into(), expected: 9, actual: 3 }
        );
    }

    #[test]
    fn test_invalid_token() {
        let err = EquityRequest::parse(&["Ah Kd * 1x", "* * * *"], "* * * * * * * * *").unwrap_err();
        assert_eq!(err, EquityError::InvalidCardToken("1x".into()));
    }

    #[test]
    fn test_conflict_between_hole_and_board() {
        let req = EquityRequest::parse(&["Ah * * *", "* * * *"], "* * * * Ah * * * *").unwrap();
        assert_eq!(
            req.validate(),
            Err(EquityError::ConflictingCards {
                card: Card::parse("Ah").unwrap(),
                first: Slot::Hole { player: 0, index: 0 },
                second: Slot::Board(Cell::new(1, 1)),
            })
        );
    }

    #[test]
    fn test_conflict_between_players_and_dead() {
        let req = EquityRequest::parse(&["* * * *", "* 7c * *"], "* * * * * * * * *").unwrap();
        assert!(req.validate().is_ok());

        let req = req.with_dead(vec![Card::parse("7c").unwrap()]);
        assert_eq!(
            req.validate(),
            Err(EquityError::ConflictingCards {
                card: Card::parse("7c").unwrap(),
                first: Slot::Hole { player: 1, index: 1 },
                second: Slot::Dead(0),
            })
        );
    }

    #[test]
    fn test_player_count() {
        let req = EquityRequest::parse(&["* * * *"], "* * * * * * * * *").unwrap();
        assert_eq!(req.validate(), Err(EquityError::InvalidPlayerCount(1)));
    }

    #[test]
    fn test_deck_underflow() {
        // 11 players x 4 + 9 board = 53 slots.
        let hands = vec!["* * * *"; 11];
        let req = EquityRequest::parse(&hands, "* * * * * * * * *").unwrap();
        assert_eq!(
            req.validate(),
            Err(EquityError::NotEnoughCards { needed: 53, available: 52 })
        );

        let hands = vec!["* * * *"; 10];
        let req = EquityRequest::parse(&hands, "* * * * * * * * *").unwrap();
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_json_round_trip() {
        let json = r#"{
            "players": [["Ah", "Kd", "*", "*"], ["*", "*", "*", "*"]],
            "board": ["*", "*", "*", "*", "*", "*", "*", "*", "Qs"],
            "dead": ["2c"]
        }"#;
        let req = EquityRequest::from_json_str(json).unwrap();
        assert_eq!(req.players[0][1].to_string(), "Kd");
        assert_eq!(req.board.cells[8].to_string(), "Qs");
        assert_eq!(req.dead, vec![Card::parse("2c").unwrap()]);

        let back = serde_json::to_string(&req).unwrap();
        assert_eq!(EquityRequest::from_json_str(&back).unwrap(), req);
    }

    #[test]
    fn test_json_rejects_conflicts() {
        let json = r#"{ "players": [["Ah","*","*","*"], ["Ah","*","*","*"]] }"#;
        assert!(matches!(
            EquityRequest::from_json_str(json),
            Err(EquityError::ConflictingCards { .. })
        ));
        assert!(matches!(
            EquityRequest::from_json_str(r#"{ "players": [["Ah","*","*"]] }"#),
            Err(EquityError::Parse(_))
        ));
    }
}
