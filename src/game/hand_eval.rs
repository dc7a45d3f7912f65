//! Poker hand evaluation.
//!
//! This module ranks 5-card poker hands and finds a player's best hand on a
//! tic-tac-toe board: exactly two of the four hole cards plus the three cards
//! of one board line. That is 6 hole pairs x 8 lines = 48 candidate hands.

use super::board::{Board, Line, LINES};
use super::card::Card;
use std::cmp::Ordering;
use std::fmt;

/// Index pairs of the six ways to choose two of four hole cards.
pub const HOLE_PAIRS: [(usize, usize); 6] = [(0, 1), (0, 2), (0, 3), (1, 2), (1, 3), (2, 3)];

/// Rank characters used in hand descriptions.
const RANK_CHARS: [char; 13] = ['2', '3', '4', '5', '6', '7', '8', '9', 'T', 'J', 'Q', 'K', 'A'];

/// Hand rank categories, ordered from worst to best.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum HandCategory {
    /// No pair.
    HighCard = 0,
    /// One pair.
    OnePair = 1,
    /// Two pairs.
    TwoPair = 2,
    /// Trips.
    ThreeOfAKind = 3,
    /// Five in a row, wheel included.
    Straight = 4,
    /// Five of one suit.
    Flush = 5,
    /// Trips plus a pair.
    FullHouse = 6,
    /// Quads.
    FourOfAKind = 7,
    /// Straight in one suit.
    StraightFlush = 8,
}

impl HandCategory {
    /// Get the category name.
    pub fn name(&self) -> &'static str {
        match self {
            HandCategory::HighCard => "High Card",
            HandCategory::OnePair => "One Pair",
            HandCategory::TwoPair => "Two Pair",
            HandCategory::ThreeOfAKind => "Three of a Kind",
            HandCategory::Straight => "Straight",
            HandCategory::Flush => "Flush",
            HandCategory::FullHouse => "Full House",
            HandCategory::FourOfAKind => "Four of a Kind",
            HandCategory::StraightFlush => "Straight Flush",
        }
    }

    /// Number of tie-break ranks that matter within this category.
    pub fn num_kickers(&self) -> usize {
        match self {
            HandCategory::Straight | HandCategory::StraightFlush => 1,
            HandCategory::FourOfAKind | HandCategory::FullHouse => 2,
            HandCategory::ThreeOfAKind | HandCategory::TwoPair => 3,
            HandCategory::OnePair => 4,
            HandCategory::HighCard | HandCategory::Flush => 5,
        }
    }
}

/// A hand rank that can be compared.
/// Higher values are better hands.
/// Format: category (4 bits) | kicker1 (4 bits) | kicker2 (4 bits) | ...
///
/// Kickers are rank indices (0-12) in the order they are compared: group
/// ranks first (quads, trips, pairs), then singles from high to low. A
/// straight keeps only its top card, with the wheel topping out at the five.
/// Suits never enter the value, so equal hands in different suits tie.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HandRank(u32);

impl HandRank {
    /// Create a new hand rank.
    fn new(category: HandCategory, kickers: &[u8]) -> Self {
        let mut value = (category as u32) << 20;
        for (i, &k) in kickers.iter().take(5).enumerate() {
            value |= (k as u32) << (16 - i * 4);
        }
        Self(value)
    }

    /// Get the raw rank value for comparison.
    pub fn value(&self) -> u32 {
        self.0
    }

    /// Get the hand category.
    pub fn category(&self) -> HandCategory {
        match self.0 >> 20 {
            0 => HandCategory::HighCard,
            1 => HandCategory::OnePair,
            2 => HandCategory::TwoPair,
            3 => HandCategory::ThreeOfAKind,
            4 => HandCategory::Straight,
            5 => HandCategory::Flush,
            6 => HandCategory::FullHouse,
            7 => HandCategory::FourOfAKind,
            8 => HandCategory::StraightFlush,
            _ => HandCategory::HighCard,
        }
    }

    /// The significant tie-break ranks in comparison order.
    pub fn kickers(&self) -> Vec<u8> {
        (0..self.category().num_kickers())
            .map(|i| ((self.0 >> (16 - i * 4)) & 0xF) as u8)
            .collect()
    }
}

impl PartialOrd for HandRank {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for HandRank {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.cmp(&other.0)
    }
}

impl fmt::Display for HandRank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ranks: String = self
            .kickers()
            .iter()
            .map(|&k| RANK_CHARS[k as usize])
            .collect();
        write!(f, "{} ({})", self.category().name(), ranks)
    }
}

/// The best hand a player can make, with where it came from.
///
/// When several line/pair combinations reach the same value, the first one
/// found (lines in table order, then hole pairs) is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BestHand {
    /// Value of the hand.
    pub rank: HandRank,
    /// Index into `LINES` of the board line used.
    pub line: usize,
    /// Indices of the two hole cards used.
    pub hole_pair: (usize, usize),
    /// The five cards: two hole cards then the three line cards.
    pub cards: [Card; 5],
}

impl BestHand {
    /// The board line used.
    pub fn line_cells(&self) -> &'static Line {
        &LINES[self.line]
    }
}

impl fmt::Display for BestHand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [", self.rank)?;
        for (i, card) in self.cards.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", card)?;
        }
        write!(f, "]")
    }
}

/// Hand evaluator for tic-tac-toe poker hands.
#[derive(Debug, Clone, Copy, Default)]
pub struct HandEvaluator;

impl HandEvaluator {
    /// Create a new hand evaluator.
    pub fn new() -> Self {
        Self
    }

    /// Evaluate a 5-card hand.
    pub fn evaluate_5(&self, cards: &[Card; 5]) -> HandRank {
        let mut rank_counts = [0u8; 13];
        let mut rank_bits = 0u16;
        let suit = cards[0].suit();
        let mut is_flush = true;

        for card in cards {
            rank_counts[card.rank() as usize] += 1;
            rank_bits |= 1 << card.rank();
            is_flush &= card.suit() == suit;
        }

        // Five distinct ranks are needed for a straight
        let straight_high = if rank_bits.count_ones() == 5 {
            self.find_straight(rank_bits)
        } else {
            None
        };

        if let Some(high) = straight_high {
            let category = if is_flush {
                HandCategory::StraightFlush
            } else {
                HandCategory::Straight
            };
            return HandRank::new(category, &[high]);
        }

        // Group ranks by multiplicity, larger groups first, then higher rank
        let mut ordered = [0u8; 5];
        let mut sizes = [0u8; 5];
        let mut groups = 0;
        for count in (1..=4u8).rev() {
            for rank in (0..13u8).rev() {
                if rank_counts[rank as usize] == count {
                    ordered[groups] = rank;
                    sizes[groups] = count;
                    groups += 1;
                }
            }
        }
        let kickers = &ordered[..groups];

        let category = match (sizes[0], sizes[1]) {
            (4, _) => HandCategory::FourOfAKind,
            (3, 2) => HandCategory::FullHouse,
            _ if is_flush => HandCategory::Flush,
            (3, _) => HandCategory::ThreeOfAKind,
            (2, 2) => HandCategory::TwoPair,
            (2, _) => HandCategory::OnePair,
            _ => HandCategory::HighCard,
        };

        HandRank::new(category, kickers)
    }

    /// Best hand value from any two hole cards plus any board line.
    pub fn best_hand(&self, hole: &[Card; 4], board: &Board) -> HandRank {
        let mut best = HandRank(0);

        for line in LINES.iter() {
            let [a, b, c] = board.line_cards(line);
            for &(i, j) in HOLE_PAIRS.iter() {
                let rank = self.evaluate_5(&[hole[i], hole[j], a, b, c]);
                if rank > best {
                    best = rank;
                }
            }
        }

        best
    }

    /// Like `best_hand`, also reporting which line and hole pair made it.
    pub fn best_hand_detail(&self, hole: &[Card; 4], board: &Board) -> BestHand {
        let mut best: Option<BestHand> = None;

        for (line_idx, line) in LINES.iter().enumerate() {
            let [a, b, c] = board.line_cards(line);
            for &(i, j) in HOLE_PAIRS.iter() {
                let cards = [hole[i], hole[j], a, b, c];
                let rank = self.evaluate_5(&cards);
                if best.map_or(true, |b| rank > b.rank) {
                    best = Some(BestHand {
                        rank,
                        line: line_idx,
                        hole_pair: (i, j),
                        cards,
                    });
                }
            }
        }

        // LINES and HOLE_PAIRS are non-empty, so the first candidate always lands.
        best.unwrap_or(BestHand {
            rank: HandRank(0),
            line: 0,
            hole_pair: HOLE_PAIRS[0],
            cards: [hole[0], hole[1], board.cards()[0], board.cards()[1], board.cards()[2]],
        })
    }

    /// Find the highest straight from a rank bitmask.
    /// Returns the high card of the straight, or None if no straight.
    fn find_straight(&self, rank_bits: u16) -> Option<u8> {
        for high in (4..13u8).rev() {
            let mask = 0b11111u16 << (high - 4);
            if rank_bits & mask == mask {
                return Some(high);
            }
        }

        // Wheel: A-2-3-4-5 = bits 12,0,1,2,3, plays as five high
        const WHEEL: u16 = 0b1_0000_0000_1111;
        if rank_bits & WHEEL == WHEEL {
            return Some(3);
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::card::{CardSpec, RANK_5, RANK_6, RANK_A, RANK_K};

    fn cards_from_str(s: &str) -> Vec<Card> {
        CardSpec::parse_many(s)
            .unwrap()
            .into_iter()
            .map(|c| c.card().unwrap())
            .collect()
    }

    fn arr5(s: &str) -> [Card; 5] {
        cards_from_str(s).try_into().unwrap()
    }

    fn arr4(s: &str) -> [Card; 4] {
        cards_from_str(s).try_into().unwrap()
    }

    fn rank(s: &str) -> HandRank {
        HandEvaluator::new().evaluate_5(&arr5(s))
    }

    #[test]
    fn test_high_card() {
        assert_eq!(rank("As Kd Qh Jc 9s").category(), HandCategory::HighCard);
    }

    #[test]
    fn test_one_pair() {
        assert_eq!(rank("As Ad Kh Qc Js").category(), HandCategory::OnePair);
    }

    #[test]
    fn test_two_pair() {
        assert_eq!(rank("As Ad Kh Kc Js").category(), HandCategory::TwoPair);
    }

    #[test]
    fn test_three_of_a_kind() {
        assert_eq!(rank("As Ad Ah Kc Js").category(), HandCategory::ThreeOfAKind);
    }

    #[test]
    fn test_straight() {
        assert_eq!(rank("Ts 9d 8h 7c 6s").category(), HandCategory::Straight);
        assert_eq!(rank("As Kd Qh Jc Ts").category(), HandCategory::Straight);
        assert_eq!(rank("6s 5d 4h 3c 2s").category(), HandCategory::Straight);

        let wheel = rank("5s 4d 3h 2c As");
        assert_eq!(wheel.category(), HandCategory::Straight);
        assert_eq!(wheel.kickers(), vec![RANK_5]);

        // No wrap-around
        assert_eq!(rank("Qs Kd Ah 2c 3s").category(), HandCategory::HighCard);
    }

    #[test]
    fn test_flush() {
        assert_eq!(rank("As Ks 9s 7s 2s").category(), HandCategory::Flush);
    }

    #[test]
    fn test_full_house() {
        let fh = rank("As Ad Ah Kc Kd");
        assert_eq!(fh.category(), HandCategory::FullHouse);
        assert_eq!(fh.kickers(), vec![RANK_A, RANK_K]);
    }

    #[test]
    fn test_four_of_a_kind() {
        assert_eq!(rank("As Ad Ah Ac Ks").category(), HandCategory::FourOfAKind);
    }

    #[test]
    fn test_straight_flush() {
        assert_eq!(rank("9s 8s 7s 6s 5s").category(), HandCategory::StraightFlush);
        assert_eq!(rank("As Ks Qs Js Ts").category(), HandCategory::StraightFlush);
        assert_eq!(rank("5h 4h 3h 2h Ah").category(), HandCategory::StraightFlush);
    }

    #[test]
    fn test_category_ordering() {
        let ladder = [
            rank("As Ks Qs Js Ts"),
            rank("9c 9d 9h 9s 2c"),
            rank("8c 8d 8h 3s 3c"),
            rank("Kh Jh 8h 5h 3h"),
            rank("9c 8d 7h 6s 5c"),
            rank("Qc Qd Qh 7s 2c"),
            rank("Jc Jd 4h 4s Ac"),
            rank("Tc Td Ah 7s 2c"),
            rank("Ac Qd 9h 6s 3c"),
        ];
        for pair in ladder.windows(2) {
            assert!(pair[0] > pair[1], "{} should beat {}", pair[0], pair[1]);
        }
    }

    #[test]
    fn test_wheel_is_lowest_straight() {
        let wheel = rank("Ac 2d 3h 4s 5c");
        let six_high = rank("2c 3d 4h 5s 6c");
        let trips = rank("Ac Ad Ah Ks Qc");
        let ace_high = rank("Ac Kd Qh Js 9c");

        assert!(six_high > wheel);
        assert_eq!(six_high.kickers(), vec![RANK_6]);
        assert!(wheel > trips);
        assert!(wheel > ace_high);
    }

    #[test]
    fn test_tie_breaks_within_category() {
        // Kickers after the pair
        assert!(rank("Ac Ad Kh 7s 2c") > rank("As Ah Qc Jd Tc"));
        // Higher pair of two pair first, then the lower pair, then the kicker
        assert!(rank("Kc Kd 2h 2s 3c") > rank("Qc Qd Jh Js Ac"));
        assert!(rank("Kc Kd 5h 5s 3c") > rank("Kh Ks 4c 4d Ac"));
        assert!(rank("Kc Kd 5h 5s 4c") > rank("Kh Ks 5c 5d 3c"));
        // Full house: trips rank before pair rank
        assert!(rank("3c 3d 3h 2s 2c") > rank("2h 2d 2s Ac Ad"));
        // Flush compares all five cards
        assert!(rank("Ah Qh 9h 5h 3h") > rank("Ac Qc 9c 5c 2c"));
        // Quads kicker
        assert!(rank("9c 9d 9h 9s Kc") > rank("9c 9d 9h 9s Qc"));
    }

    #[test]
    fn test_suits_do_not_break_ties() {
        assert_eq!(rank("Ac Kd Qh Js 9c"), rank("Ad Kh Qs Jc 9d"));
        assert_eq!(rank("Tc 9d 8h 7s 6c"), rank("Th 9s 8c 7d 6h"));
        assert_eq!(rank("Ah Qh 9h 5h 3h"), rank("As Qs 9s 5s 3s"));
    }

    #[test]
    fn test_display() {
        assert_eq!(rank("As Ad Ah Kc Kd").to_string(), "Full House (AK)");
        assert_eq!(rank("5s 4d 3h 2c As").to_string(), "Straight (5)");
    }

    #[test]
    fn test_best_hand_uses_exactly_two_hole_cards() {
        let eval = HandEvaluator::new();
        // Four aces in hand only ever play as a pair of aces here.
        let hole = arr4("As Ah Ad Ac");
        let board = Board::parse("2c 7d 9h Js 4c 8d Kh 3s 6c").unwrap();
        let best = eval.best_hand(&hole, &board);
        assert_eq!(best.category(), HandCategory::OnePair);
        assert_eq!(best.kickers()[0], RANK_A);
    }

    #[test]
    fn test_best_hand_uses_only_lines() {
        let eval = HandEvaluator::new();
        // Three hearts sit on cells 0, 5 and 7: no common line.
        let hole = arr4("Ah Kh 2c 3d");
        let board = Board::parse("9h 4s 6c Jd 8s 7h 2s Th Qc").unwrap();
        let best = eval.best_hand(&hole, &board);
        assert_ne!(best.category(), HandCategory::Flush);

        // Same cards with the hearts moved onto the top row.
        let board = Board::parse("9h 7h Th Jd 8s 4s 2s 6c Qc").unwrap();
        let detail = eval.best_hand_detail(&hole, &board);
        assert_eq!(detail.rank.category(), HandCategory::Flush);
        assert_eq!(detail.line, 0);
        assert_eq!(detail.hole_pair, (0, 1));
        assert_eq!(detail.rank, eval.best_hand(&hole, &board));
    }

    #[test]
    fn test_best_hand_diagonal() {
        let eval = HandEvaluator::new();
        let hole = arr4("Ah Kh 2c 3d");
        // Qh Jh Th on the 6-4-2 diagonal.
        let board = Board::parse("4c 5d Th 7s Jh 8c Qh 9d 2s").unwrap();
        let detail = eval.best_hand_detail(&hole, &board);
        assert_eq!(detail.rank.category(), HandCategory::StraightFlush);
        assert_eq!(detail.line, 7);
        let cells: Vec<usize> = detail.line_cells().iter().map(|c| c.index()).collect();
        assert_eq!(cells, vec![6, 4, 2]);
        assert_eq!(detail.rank.kickers(), vec![RANK_A]);
    }

    #[test]
    fn test_best_hand_ordering() {
        let eval = HandEvaluator::new();
        let board = Board::parse("2c 7d 9h Js 4c 8d Kh 3s 6c").unwrap();
        let aces = arr4("As Ah Qd Qc");
        let kings = arr4("Ks Kc Qh Qs");
        // Kings make trips with the Kh line, aces only a pair.
        let aces_best = eval.best_hand(&aces, &board);
        let kings_best = eval.best_hand(&kings, &board);
        assert_eq!(kings_best.cmp(&aces_best), Ordering::Greater);
        assert_eq!(aces_best.cmp(&eval.best_hand(&aces, &board)), Ordering::Equal);
    }
}
