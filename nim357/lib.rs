//! Three-row Nim (rows of 3, 5 and 7 pieces, at most 3 pieces per turn).
//!
//! The centre of the crate is the [move advisor](crate::advisor), which picks a move that
//! restores a zero [nim-sum](crate::nim_sum::NimSum) whenever the three-piece cap allows it.
//! Around it live the [rows model](crate::rows), a small [game session](crate::game), the
//! [perfect play outcomes](crate::outcome) of the last-piece-loses game and an exhaustive
//! [audit](crate::audit) of every reachable position against both.

#![warn(missing_docs)]

pub mod advisor;
pub mod audit;
pub mod game;
pub mod nim_sum;
pub mod outcome;
pub mod parsing;
pub mod rows;
