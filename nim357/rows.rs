//! The board is made of three rows holding 3, 5 and 7 pieces.
//!
//! Pieces are always taken from the left end of a row, so a row is fully described by the number
//! of pieces it still holds (its heap size) and the board by three such numbers. A move takes
//! between one and [`MAX_TAKE`] pieces from a single row.

use crate::{
    nim_sum::NimSum,
    parsing::{Parser, impl_from_str_via_parser},
};
use itertools::{Itertools, iproduct};
use std::fmt::{self, Display};

/// Maximum number of pieces that can be taken in a single turn
pub const MAX_TAKE: u32 = 3;

/// Width of the `Row n` label column on the printed board, slots included
const LABEL_WIDTH: u32 = 10;

/// One of the three rows of the board
#[derive(Debug, Hash, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Row {
    /// Top row, 3 pieces
    First,
    /// Middle row, 5 pieces
    Second,
    /// Bottom row, 7 pieces
    Third,
}

impl Row {
    /// All rows in the order they are scanned by the advisor
    pub const ALL: [Row; 3] = [Row::First, Row::Second, Row::Third];

    /// Number of slots in the row
    #[inline]
    pub const fn capacity(self) -> u32 {
        match self {
            Row::First => 3,
            Row::Second => 5,
            Row::Third => 7,
        }
    }

    /// 1-based row number as shown to players
    #[inline]
    pub const fn number(self) -> u32 {
        self.index() as u32 + 1
    }

    /// Inverse of [`Row::number`]
    #[inline]
    pub const fn from_number(number: u32) -> Option<Row> {
        match number {
            1 => Some(Row::First),
            2 => Some(Row::Second),
            3 => Some(Row::Third),
            _ => None,
        }
    }

    #[inline]
    const fn index(self) -> usize {
        match self {
            Row::First => 0,
            Row::Second => 1,
            Row::Third => 2,
        }
    }

    /// Occupancy of the row slots from left to right when `heap` pieces are left.
    ///
    /// Taken pieces come off the left end, so empty slots always come first.
    pub fn slots(self, heap: u32) -> impl Iterator<Item = bool> {
        let empty = self.capacity().saturating_sub(heap);
        (0..self.capacity()).map(move |slot| slot >= empty)
    }
}

impl Display for Row {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number())
    }
}

/// Take `pieces` from the `row`
#[derive(Debug, Hash, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Move {
    row: Row,
    pieces: u32,
}

impl Move {
    /// Create new move. Legality depends on the position, see [`Rows::is_legal`]
    #[inline]
    pub const fn new(row: Row, pieces: u32) -> Move {
        Move { row, pieces }
    }

    /// Row to take from
    #[inline]
    pub const fn row(self) -> Row {
        self.row
    }

    /// Number of pieces to take
    #[inline]
    pub const fn pieces(self) -> u32 {
        self.pieces
    }

    /// Parse move written as `row:pieces`
    pub fn parse(p: Parser<'_>) -> Option<(Parser<'_>, Move)> {
        let (p, row) = p.number()?;
        let row = Row::from_number(row)?;
        let (p, pieces) = p.symbol(':')?.number()?;
        Some((p, Move::new(row, pieces)))
    }
}

impl Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.row, self.pieces)
    }
}

impl_from_str_via_parser!(Move, "row:pieces");

/// Heap sizes of the three rows
#[derive(Debug, Hash, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Rows {
    // Invariant: heaps[i] <= Row::ALL[i].capacity()
    heaps: [u32; 3],
}

impl Rows {
    /// Number of positions that fit the board, empty one included
    pub const POSITIONS: usize = ((Row::First.capacity() + 1)
        * (Row::Second.capacity() + 1)
        * (Row::Third.capacity() + 1)) as usize;

    /// Create a position, returns `None` if any heap does not fit its row
    pub const fn new(first: u32, second: u32, third: u32) -> Option<Rows> {
        if first > Row::First.capacity()
            || second > Row::Second.capacity()
            || third > Row::Third.capacity()
        {
            return None;
        }
        Some(Rows {
            heaps: [first, second, third],
        })
    }

    /// Starting position, every row full
    #[inline]
    pub const fn full() -> Rows {
        Rows {
            heaps: [
                Row::First.capacity(),
                Row::Second.capacity(),
                Row::Third.capacity(),
            ],
        }
    }

    /// Finished position, no pieces left
    #[inline]
    pub const fn empty() -> Rows {
        Rows { heaps: [0, 0, 0] }
    }

    /// Every position that fits the board, empty one included, in [`Rows::index`] order
    pub fn all() -> impl Iterator<Item = Rows> {
        iproduct!(
            0..=Row::First.capacity(),
            0..=Row::Second.capacity(),
            0..=Row::Third.capacity()
        )
        .map(|(first, second, third)| Rows {
            heaps: [first, second, third],
        })
    }

    /// Position of `self` in [`Rows::all`], below [`Rows::POSITIONS`]
    #[inline]
    pub const fn index(&self) -> usize {
        let [first, second, third] = self.heaps;
        ((first * (Row::Second.capacity() + 1) + second) * (Row::Third.capacity() + 1) + third)
            as usize
    }

    /// Number of pieces left in the `row`
    #[inline]
    pub const fn heap(&self, row: Row) -> u32 {
        self.heaps[row.index()]
    }

    /// Heap sizes in row order
    #[inline]
    pub const fn heaps(&self) -> [u32; 3] {
        self.heaps
    }

    /// Number of pieces left on the whole board
    #[inline]
    pub const fn total(&self) -> u32 {
        self.heaps[0] + self.heaps[1] + self.heaps[2]
    }

    /// Check if there are no pieces left
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.total() == 0
    }

    /// Nim-sum of the heap sizes
    pub fn nim_sum(&self) -> NimSum {
        self.heaps.into_iter().sum()
    }

    /// Check if `mv` takes between 1 and [`MAX_TAKE`] pieces and the row holds that many
    #[inline]
    pub const fn is_legal(&self, mv: Move) -> bool {
        mv.pieces >= 1 && mv.pieces <= MAX_TAKE && mv.pieces <= self.heap(mv.row)
    }

    /// Position after `mv`, or `None` if the move is not legal
    #[must_use]
    pub fn remove(&self, mv: Move) -> Option<Rows> {
        if !self.is_legal(mv) {
            return None;
        }
        let mut heaps = self.heaps;
        heaps[mv.row.index()] -= mv.pieces;
        Some(Rows { heaps })
    }

    /// All legal moves, row by row and in increasing number of pieces
    pub fn legal_moves(self) -> impl Iterator<Item = Move> {
        Row::ALL.into_iter().flat_map(move |row| {
            (1..=MAX_TAKE.min(self.heap(row))).map(move |pieces| Move::new(row, pieces))
        })
    }

    /// Plain text picture of the board, one line per row
    #[inline]
    pub const fn board(&self) -> Board<'_> {
        Board { rows: self }
    }

    /// Parse position written as `h1,h2,h3`, optionally in parentheses
    pub fn parse(p: Parser<'_>) -> Option<(Parser<'_>, Rows)> {
        let (p, parenthesized) = p.optional_symbol('(');
        let (p, first) = p.number()?;
        let (p, second) = p.symbol(',')?.number()?;
        let (p, third) = p.symbol(',')?.number()?;
        let p = if parenthesized { p.symbol(')')? } else { p };
        Some((p, Rows::new(first, second, third)?))
    }
}

impl Default for Rows {
    fn default() -> Self {
        Self::full()
    }
}

impl Display for Rows {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({})", self.heaps.iter().format(", "))
    }
}

impl_from_str_via_parser!(Rows, "h1,h2,h3");

/// See [`Rows::board`]
#[derive(Debug, Clone, Copy)]
pub struct Board<'r> {
    rows: &'r Rows,
}

impl Display for Board<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in Row::ALL {
            let slots = row
                .slots(self.rows.heap(row))
                .map(|occupied| if occupied { '■' } else { '·' });
            let padding = (LABEL_WIDTH - row.capacity()) as usize;
            writeln!(f, "Row {}{:padding$}{}", row, "", slots.format(" "))?;
        }
        Ok(())
    }
}

#[cfg(any(test, feature = "quickcheck"))]
impl quickcheck::Arbitrary for Rows {
    fn arbitrary(g: &mut quickcheck::Gen) -> Self {
        use quickcheck::Arbitrary;

        let mut heaps = [0; 3];
        for row in Row::ALL {
            heaps[row.index()] = u32::arbitrary(g) % (row.capacity() + 1);
        }
        Rows { heaps }
    }

    fn shrink(&self) -> Box<dyn Iterator<Item = Self>> {
        let rows = *self;
        Box::new(rows.legal_moves().filter_map(move |mv| rows.remove(mv)))
    }
}
