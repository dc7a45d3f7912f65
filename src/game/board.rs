//! Board topology for the 3x3 grid.
//!
//! The board is nine cells in row-major order:
//!
//! ```text
//!   0 | 1 | 2
//!  ---+---+---
//!   3 | 4 | 5
//!  ---+---+---
//!   6 | 7 | 8
//! ```
//!
//! A player's hand may only use three board cards lying on one of the eight
//! lines (three rows, three columns, two diagonals). The geometry is pure
//! constant data so the evaluator never has to derive it at runtime.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::card::{Card, CardError, CardSpec, Street};

/// Number of cells on the board.
pub const NUM_CELLS: usize = 9;

/// Number of lines a hand can be built from.
pub const NUM_LINES: usize = 8;

/// One of the nine fixed board positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Cell(u8);

impl Cell {
    /// Create a cell from row and column (each 0-2).
    #[inline]
    pub const fn new(row: u8, col: u8) -> Self {
        debug_assert!(row < 3 && col < 3);
        Self(row * 3 + col)
    }

    /// Create a cell from its row-major index (0-8).
    #[inline]
    pub const fn from_index(index: usize) -> Self {
        debug_assert!(index < NUM_CELLS);
        Self(index as u8)
    }

    /// Row-major index (0-8).
    #[inline]
    pub const fn index(&self) -> usize {
        self.0 as usize
    }

    /// Row (0-2).
    #[inline]
    pub const fn row(&self) -> u8 {
        self.0 / 3
    }

    /// Column (0-2).
    #[inline]
    pub const fn col(&self) -> u8 {
        self.0 % 3
    }

    /// The street on which this cell is dealt.
    pub fn street(&self) -> Street {
        match self.0 {
            4 => Street::River,
            0 | 2 | 6 | 8 => Street::Flop,
            _ => Street::Turn,
        }
    }

    /// Lines that pass through this cell.
    pub fn lines(&self) -> impl Iterator<Item = &'static Line> + '_ {
        LINES.iter().filter(move |line| line.contains(self))
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "r{}c{}", self.row() + 1, self.col() + 1)
    }
}

/// Three cells in a straight line.
pub type Line = [Cell; 3];

/// All cells in row-major order.
pub const CELLS: [Cell; NUM_CELLS] = [
    Cell(0), Cell(1), Cell(2),
    Cell(3), Cell(4), Cell(5),
    Cell(6), Cell(7), Cell(8),
];

/// Rows, then columns, then the two diagonals.
pub const LINES: [Line; NUM_LINES] = [
    [Cell(0), Cell(1), Cell(2)],
    [Cell(3), Cell(4), Cell(5)],
    [Cell(6), Cell(7), Cell(8)],
    [Cell(0), Cell(3), Cell(6)],
    [Cell(1), Cell(4), Cell(7)],
    [Cell(2), Cell(5), Cell(8)],
    [Cell(0), Cell(4), Cell(8)],
    [Cell(6), Cell(4), Cell(2)],
];

/// The nine board cells.
#[inline]
pub fn cells() -> &'static [Cell; NUM_CELLS] {
    &CELLS
}

/// The eight lines.
#[inline]
pub fn lines() -> &'static [Line; NUM_LINES] {
    &LINES
}

/// A fully dealt board.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    cards: [Card; NUM_CELLS],
}

impl Board {
    /// Create a board from nine cards in row-major order.
    pub fn new(cards: [Card; NUM_CELLS]) -> Self {
        Self { cards }
    }

    /// Parse a fully known board; wildcards are rejected.
    pub fn parse(s: &str) -> Result<Self, CardError> {
        let spec = BoardSpec::parse(s)?;
        let mut cards = [Card::from_id(0); NUM_CELLS];
        for (slot, cell) in cards.iter_mut().zip(spec.cells.iter()) {
            *slot = cell.card().ok_or_else(|| CardError::InvalidToken(cell.to_string()))?;
        }
        Ok(Self { cards })
    }

    /// The card at a cell.
    #[inline]
    pub fn card(&self, cell: Cell) -> Card {
        self.cards[cell.index()]
    }

    /// Place a card at a cell.
    #[inline]
    pub fn set(&mut self, cell: Cell, card: Card) {
        self.cards[cell.index()] = card;
    }

    /// All nine cards in row-major order.
    #[inline]
    pub fn cards(&self) -> &[Card; NUM_CELLS] {
        &self.cards
    }

    /// The three cards on a line.
    #[inline]
    pub fn line_cards(&self, line: &Line) -> [Card; 3] {
        [self.card(line[0]), self.card(line[1]), self.card(line[2])]
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.cards.chunks(3).enumerate() {
            if i > 0 {
                write!(f, " / ")?;
            }
            write!(f, "{} {} {}", row[0], row[1], row[2])?;
        }
        Ok(())
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self)
    }
}

/// The board as supplied by the caller: nine slots, each known or wildcard.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BoardSpec {
    /// Slots in row-major order.
    pub cells: [CardSpec; NUM_CELLS],
}

impl BoardSpec {
    /// A board with every cell unknown.
    pub fn unknown() -> Self {
        Self::default()
    }

    /// Create from nine slots in row-major order.
    pub fn new(cells: [CardSpec; NUM_CELLS]) -> Self {
        Self { cells }
    }

    /// Parse nine tokens like "Ah Kd * 2c * * * * Ts".
    pub fn parse(s: &str) -> Result<Self, CardError> {
        let specs = CardSpec::parse_many(s)?;
        let cells: [CardSpec; NUM_CELLS] = specs.try_into().map_err(|v: Vec<CardSpec>| {
            CardError::WrongCardCount {
                expected: NUM_CELLS,
                actual: v.len(),
            }
        })?;
        Ok(Self { cells })
    }

    /// Parse the board as three rows of three tokens each.
    pub fn from_rows(rows: [&str; 3]) -> Result<Self, CardError> {
        let mut cells = [CardSpec::Wildcard; NUM_CELLS];
        for (r, row) in rows.iter().enumerate() {
            let specs = CardSpec::parse_many(row)?;
            if specs.len() != 3 {
                return Err(CardError::WrongCardCount {
                    expected: 3,
                    actual: specs.len(),
                });
            }
            cells[r * 3..r * 3 + 3].copy_from_slice(&specs);
        }
        Ok(Self { cells })
    }

    /// The slot at a cell.
    #[inline]
    pub fn cell(&self, cell: Cell) -> CardSpec {
        self.cells[cell.index()]
    }

    /// Known cards on the board.
    pub fn known_cards(&self) -> impl Iterator<Item = Card> + '_ {
        self.cells.iter().filter_map(|c| c.card())
    }

    /// Number of cells still to be sampled.
    pub fn num_wildcards(&self) -> usize {
        self.cells.iter().filter(|c| c.is_wildcard()).count()
    }

    /// The latest street whose cells, and every earlier street's cells, are known.
    ///
    /// Returns `None` while any corner is still unknown.
    pub fn street(&self) -> Option<Street> {
        let mut dealt = None;
        for street in Street::ALL {
            let complete = CELLS
                .iter()
                .filter(|cell| cell.street() == street)
                .all(|&cell| !self.cell(cell).is_wildcard());
            if !complete {
                break;
            }
            dealt = Some(street);
        }
        dealt
    }
}

impl From<Board> for BoardSpec {
    fn from(board: Board) -> Self {
        let mut cells = [CardSpec::Wildcard; NUM_CELLS];
        for (slot, &card) in cells.iter_mut().zip(board.cards.iter()) {
            *slot = CardSpec::Known(card);
        }
        Self { cells }
    }
}

impl fmt::Display for BoardSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.cells.chunks(3).enumerate() {
            if i > 0 {
                write!(f, " / ")?;
            }
            write!(f, "{} {} {}", row[0], row[1], row[2])?;
        }
        Ok(())
    }
}

impl fmt::Debug for BoardSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self)
    }
}
