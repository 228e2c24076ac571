//! Perfect play outcomes of the real game, where whoever takes the last piece loses.
//!
//! The nim-sum strategy of the [advisor](crate::advisor) is the winning strategy of the game
//! where taking the last piece *wins*. Under the three-piece cap and the last-piece-loses rule
//! it is only a heuristic, and [`Outcomes`] is what it is measured against.

use crate::rows::{Move, Rows};
use std::fmt::{self, Display};

/// Who wins a position when both players play perfectly
#[derive(Debug, Hash, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Outcome {
    /// The player to move wins
    N,

    /// The player who just moved wins
    P,
}

impl Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::N => write!(f, "N"),
            Outcome::P => write!(f, "P"),
        }
    }
}

/// Outcome of every position of the board
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcomes {
    // Indexed by Rows::index
    table: Vec<Outcome>,
}

impl Outcomes {
    /// Solve the whole board.
    ///
    /// A move always lowers [`Rows::index`], so visiting positions in index order finds every
    /// successor already solved.
    pub fn solve() -> Outcomes {
        let mut table: Vec<Outcome> = Vec::with_capacity(Rows::POSITIONS);
        for rows in Rows::all() {
            // On the empty board the opponent has just taken the last piece
            let outcome = if rows.is_empty()
                || rows
                    .legal_moves()
                    .filter_map(|mv| rows.remove(mv))
                    .any(|after| table[after.index()] == Outcome::P)
            {
                Outcome::N
            } else {
                Outcome::P
            };
            table.push(outcome);
        }
        Outcomes { table }
    }

    /// Outcome of `rows`
    #[inline]
    pub fn outcome(&self, rows: &Rows) -> Outcome {
        self.table[rows.index()]
    }

    /// Moves from `rows` that leave the opponent in a P-position
    pub fn winning_moves(&self, rows: Rows) -> impl Iterator<Item = Move> + '_ {
        rows.legal_moves().filter(move |&mv| {
            rows.remove(mv)
                .is_some_and(|after| self.outcome(&after) == Outcome::P)
        })
    }
}
