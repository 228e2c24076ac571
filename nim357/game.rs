//! Game session: the board and the player to move.
//!
//! The player who takes the last piece loses.

use crate::{
    advisor::{Advice, compute_move},
    rows::{Move, Rows},
};
use std::fmt::{self, Display};

/// One of the two players
#[derive(Debug, Hash, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[allow(missing_docs)]
pub enum Player {
    A,
    B,
}

impl Player {
    /// Opposite player
    #[inline(always)]
    #[must_use]
    pub const fn opposite(self) -> Player {
        match self {
            Player::A => Player::B,
            Player::B => Player::A,
        }
    }
}

impl Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::A => write!(f, "A"),
            Player::B => write!(f, "B"),
        }
    }
}

/// Move rejected by [`Game::play`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IllegalMove {
    /// Position the move was tried on
    pub rows: Rows,

    /// The rejected move
    pub mv: Move,
}

impl Display for IllegalMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Cannot take {} from row {} holding {}",
            self.mv.pieces(),
            self.mv.row(),
            self.rows.heap(self.mv.row())
        )
    }
}

impl std::error::Error for IllegalMove {}

/// Game in progress
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Game {
    rows: Rows,
    to_move: Player,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    /// Full board, player A to move
    #[inline]
    pub const fn new() -> Game {
        Game::from_rows(Rows::full(), Player::A)
    }

    /// Continue from an arbitrary position
    #[inline]
    pub const fn from_rows(rows: Rows, to_move: Player) -> Game {
        Game { rows, to_move }
    }

    /// Current position
    #[inline]
    pub const fn rows(&self) -> Rows {
        self.rows
    }

    /// Player whose turn it is
    #[inline]
    pub const fn to_move(&self) -> Player {
        self.to_move
    }

    /// Check if all pieces have been taken
    #[inline]
    pub const fn is_over(&self) -> bool {
        self.rows.is_empty()
    }

    /// Winner of a finished game. The last piece was taken by the opponent of the player to move
    #[inline]
    pub const fn winner(&self) -> Option<Player> {
        if self.is_over() {
            Some(self.to_move)
        } else {
            None
        }
    }

    /// Advisor's move for the player to move, `None` once the game is over
    pub fn advice(&self) -> Option<Advice> {
        compute_move(&self.rows)
    }

    /// Play `mv` for the player to move and pass the turn
    pub fn play(&mut self, mv: Move) -> Result<(), IllegalMove> {
        let rows = self.rows;
        self.rows = rows.remove(mv).ok_or(IllegalMove { rows, mv })?;
        self.to_move = self.to_move.opposite();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rows::Row;

    #[test]
    fn turns_alternate() {
        let mut game = Game::new();
        assert_eq!(game.to_move(), Player::A);
        game.play(Move::new(Row::Third, 3)).unwrap();
        assert_eq!(game.to_move(), Player::B);
        assert_eq!(game.rows(), Rows::new(3, 5, 4).unwrap());
        game.play(Move::new(Row::First, 1)).unwrap();
        assert_eq!(game.to_move(), Player::A);
    }

    #[test]
    fn illegal_move_keeps_state() {
        let mut game = Game::new();
        let err = game.play(Move::new(Row::Second, 4)).unwrap_err();
        assert_eq!(err.to_string(), "Cannot take 4 from row 2 holding 5");
        assert_eq!(game, Game::new());

        let mut game = Game::from_rows(Rows::new(0, 2, 0).unwrap(), Player::B);
        assert!(game.play(Move::new(Row::First, 1)).is_err());
        assert_eq!(game.to_move(), Player::B);
    }

    #[test]
    fn taking_last_piece_loses() {
        let mut game = Game::from_rows(Rows::new(0, 0, 1).unwrap(), Player::A);
        assert_eq!(game.winner(), None);
        game.play(Move::new(Row::Third, 1)).unwrap();
        assert!(game.is_over());
        assert_eq!(game.winner(), Some(Player::B));
        assert_eq!(game.advice(), None);
    }

    #[test]
    fn advisor_finishes_the_game() {
        let mut game = Game::new();
        let mut turns = 0;
        while let Some(advice) = game.advice() {
            game.play(advice.mv()).unwrap();
            turns += 1;
        }
        // 15 pieces, at most 3 per turn
        assert!(turns >= 5);
        assert!(turns <= 15);
        assert!(game.winner().is_some());
    }
}
