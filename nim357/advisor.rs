//! Move advisor.
//!
//! The advisor plays the nim-sum strategy: a position whose heaps XOR to zero is lost for the
//! player to move, and from any other position some heap can be reduced so that the XOR becomes
//! zero again. On this board a turn takes at most [`MAX_TAKE`](crate::rows::MAX_TAKE) pieces, so
//! the prescribed reduction is not always available. When it is not, the advisor falls back to
//! the end-game patterns below and otherwise takes a single piece from the first non-empty row.
//!
//! Zeroing moves are searched from row 3 up to row 1, stalling moves from row 1 down to row 3.

use crate::{
    nim_sum::NimSum,
    rows::{Move, Row, Rows},
};
use std::fmt::{self, Display};

/// How the advised move was chosen
#[derive(Debug, Hash, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum Strategy {
    /// Exactly one piece was left on the board, there is nothing to choose
    LastPiece,

    /// The move leaves a zero nim-sum
    Zeroing,

    /// Two rows hold one piece each (or are both empty) and no zeroing move fits under the cap,
    /// so the remaining larger row is cut down to a single piece
    ReduceToOne,

    /// Take one piece from the first non-empty row. Used in lost positions and when nothing
    /// better is allowed
    Stall,
}

impl Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::LastPiece => write!(f, "last piece"),
            Strategy::Zeroing => write!(f, "zeroing"),
            Strategy::ReduceToOne => write!(f, "reduce to one"),
            Strategy::Stall => write!(f, "stall"),
        }
    }
}

/// Move picked by the advisor together with the reason it was picked
#[derive(Debug, Hash, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Advice {
    #[cfg_attr(feature = "serde", serde(rename = "move"))]
    mv: Move,
    strategy: Strategy,
}

impl Advice {
    /// Pair a move with the strategy it came from
    #[inline]
    pub const fn new(mv: Move, strategy: Strategy) -> Advice {
        Advice { mv, strategy }
    }

    /// Advised move
    #[inline]
    pub const fn mv(&self) -> Move {
        self.mv
    }

    /// Rule that produced the move
    #[inline]
    pub const fn strategy(&self) -> Strategy {
        self.strategy
    }
}

impl Display for Advice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.mv, self.strategy)
    }
}

/// Compute the move to play from `rows`.
///
/// Returns `None` only when the board is already empty, otherwise the move is always legal.
pub fn compute_move(rows: &Rows) -> Option<Advice> {
    if rows.total() == 1 {
        let row = first_non_empty(rows)?;
        return Some(Advice::new(Move::new(row, 1), Strategy::LastPiece));
    }

    let nim_sum = rows.nim_sum();
    if nim_sum.is_zero() {
        return stall(rows);
    }

    if let Some(mv) = zeroing_move(rows, nim_sum) {
        return Some(Advice::new(mv, Strategy::Zeroing));
    }

    if let Some(mv) = reduce_to_one(rows) {
        return Some(Advice::new(mv, Strategy::ReduceToOne));
    }

    stall(rows)
}

/// Same as [`compute_move`] on raw heap sizes, returns `(row, pieces)` with 1-based row.
///
/// Returns `None` if a heap does not fit its row or the board is empty.
pub fn advise(first: u32, second: u32, third: u32) -> Option<(u32, u32)> {
    let rows = Rows::new(first, second, third)?;
    let advice = compute_move(&rows)?;
    Some((advice.mv().row().number(), advice.mv().pieces()))
}

/// First move that brings the nim-sum to zero and fits under the cap, scanning from the longest
/// row to the shortest
pub fn zeroing_move(rows: &Rows, nim_sum: NimSum) -> Option<Move> {
    Row::ALL.into_iter().rev().find_map(|row| {
        let heap = rows.heap(row);
        let mv = Move::new(row, heap - nim_sum.target(heap)?);
        rows.is_legal(mv).then_some(mv)
    })
}

fn reduce_to_one(rows: &Rows) -> Option<Move> {
    let heaps = rows.heaps();
    let ones = heaps.iter().filter(|&&heap| heap == 1).count();
    let zeros = heaps.iter().filter(|&&heap| heap == 0).count();
    if ones != 2 && zeros != 2 {
        return None;
    }

    let row = Row::ALL.into_iter().find(|&row| rows.heap(row) > 1)?;
    let mv = Move::new(row, rows.heap(row) - 1);
    rows.is_legal(mv).then_some(mv)
}

fn stall(rows: &Rows) -> Option<Advice> {
    let row = first_non_empty(rows)?;
    Some(Advice::new(Move::new(row, 1), Strategy::Stall))
}

fn first_non_empty(rows: &Rows) -> Option<Row> {
    Row::ALL.into_iter().find(|&row| rows.heap(row) > 0)
}
