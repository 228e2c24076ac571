//! Exhaustive check of the [advisor](crate::advisor) over every position of the board.
//!
//! The board has only 4 * 6 * 8 positions, so instead of trusting the end-game patterns of the
//! advisor we run it on all of them and check the result against a brute force search for
//! zeroing moves. Positions where the cap rules out every zeroing move and no end-game pattern
//! applies are reported separately.
//!
//! Each record also carries the perfect play [outcomes](crate::outcome) before and after the
//! advised move. The nim-sum strategy does not know that taking the last piece loses, so these
//! show where following the advisor gives a won game away.

use crate::{
    advisor::{Advice, Strategy, compute_move},
    nim_sum::NimSum,
    outcome::{Outcome, Outcomes},
    rows::{Row, Rows},
};
use std::fmt::{self, Display};

/// Broken advisor guarantee
#[derive(Debug, Hash, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum Violation {
    /// No move for a non-empty board
    NoMove,

    /// Move that cannot be played
    IllegalMove,

    /// A legal zeroing move existed but the advised move does not zero the nim-sum
    MissedZeroing,

    /// Lost position where the move is not a single piece from the first non-empty row
    WrongStall,
}

impl Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::NoMove => write!(f, "no move"),
            Violation::IllegalMove => write!(f, "illegal move"),
            Violation::MissedZeroing => write!(f, "missed zeroing move"),
            Violation::WrongStall => write!(f, "wrong stalling move"),
        }
    }
}

/// Advisor result for a single position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct AuditRecord {
    /// Audited position
    pub rows: Rows,

    /// Nim-sum of the audited position
    pub nim_sum: NimSum,

    /// Perfect play outcome of the audited position
    pub outcome: Outcome,

    /// Move picked by the advisor
    pub advice: Option<Advice>,

    /// If any legal move brings the nim-sum to zero
    pub zeroing_available: bool,

    /// Position after the advised move
    pub after: Option<Rows>,

    /// Perfect play outcome of the position after the advised move
    pub after_outcome: Option<Outcome>,
}

impl AuditRecord {
    /// Run the advisor on `rows` and collect the facts needed to judge it
    pub fn new(rows: Rows, outcomes: &Outcomes) -> AuditRecord {
        let advice = compute_move(&rows);
        let after = advice.and_then(|advice| rows.remove(advice.mv()));
        let zeroing_available = rows
            .legal_moves()
            .filter_map(|mv| rows.remove(mv))
            .any(|after| after.nim_sum().is_zero());

        AuditRecord {
            rows,
            nim_sum: rows.nim_sum(),
            outcome: outcomes.outcome(&rows),
            advice,
            zeroing_available,
            after,
            after_outcome: after.map(|after| outcomes.outcome(&after)),
        }
    }

    /// First broken guarantee, if any
    pub fn violation(&self) -> Option<Violation> {
        let Some(advice) = self.advice else {
            return Some(Violation::NoMove);
        };
        let Some(after) = self.after else {
            return Some(Violation::IllegalMove);
        };

        if self.nim_sum.is_zero() {
            let first = Row::ALL
                .into_iter()
                .find(|&row| self.rows.heap(row) > 0);
            if Some(advice.mv().row()) != first || advice.mv().pieces() != 1 {
                return Some(Violation::WrongStall);
            }
        } else if self.zeroing_available && !after.nim_sum().is_zero() {
            return Some(Violation::MissedZeroing);
        }

        None
    }

    /// Check if the position is won, the cap blocks every zeroing move and the advisor had to
    /// stall without an end-game pattern to guide it
    pub fn is_unlisted_fallback(&self) -> bool {
        !self.nim_sum.is_zero()
            && !self.zeroing_available
            && self
                .advice
                .is_some_and(|advice| advice.strategy() == Strategy::Stall)
    }

    /// Check if the advised move leaves the opponent in a lost position
    pub fn leaves_lost_position(&self) -> bool {
        self.after_outcome == Some(Outcome::P)
    }

    /// Check if the position was won but the advised move hands the win to the opponent
    pub fn throws_win(&self) -> bool {
        self.outcome == Outcome::N && self.after_outcome == Some(Outcome::N)
    }
}

/// Audit every non-empty position
pub fn audit() -> impl Iterator<Item = AuditRecord> {
    let outcomes = Outcomes::solve();
    Rows::all()
        .filter(|rows| !rows.is_empty())
        .map(move |rows| AuditRecord::new(rows, &outcomes))
}

/// Totals over audited positions
#[derive(Debug, Default, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Summary {
    /// Number of audited positions
    pub positions: usize,

    /// Positions advised with [`Strategy::LastPiece`]
    pub last_piece: usize,

    /// Positions advised with [`Strategy::Zeroing`]
    pub zeroing: usize,

    /// Positions advised with [`Strategy::ReduceToOne`]
    pub reduce_to_one: usize,

    /// Positions advised with [`Strategy::Stall`]
    pub stall: usize,

    /// Positions with a non-zero nim-sum where the cap rules out every zeroing move
    pub capped: usize,

    /// Capped positions not covered by any end-game pattern
    pub unlisted_fallbacks: usize,

    /// Positions where the advised move leaves a lost position for the opponent
    pub lost_positions_left: usize,

    /// Won positions where the advised move leaves a won position for the opponent
    pub thrown_wins: usize,

    /// Positions with a broken guarantee
    pub violations: usize,
}

impl Summary {
    /// Count `record` in
    pub fn add(&mut self, record: &AuditRecord) {
        self.positions += 1;

        match record.advice.map(|advice| advice.strategy()) {
            Some(Strategy::LastPiece) => self.last_piece += 1,
            Some(Strategy::Zeroing) => self.zeroing += 1,
            Some(Strategy::ReduceToOne) => self.reduce_to_one += 1,
            Some(Strategy::Stall) => self.stall += 1,
            None => {}
        }

        if !record.nim_sum.is_zero() && !record.zeroing_available {
            self.capped += 1;
        }
        if record.is_unlisted_fallback() {
            self.unlisted_fallbacks += 1;
        }
        if record.leaves_lost_position() {
            self.lost_positions_left += 1;
        }
        if record.throws_win() {
            self.thrown_wins += 1;
        }
        if record.violation().is_some() {
            self.violations += 1;
        }
    }
}

impl<'r> FromIterator<&'r AuditRecord> for Summary {
    fn from_iter<T: IntoIterator<Item = &'r AuditRecord>>(iter: T) -> Self {
        let mut summary = Summary::default();
        for record in iter {
            summary.add(record);
        }
        summary
    }
}

impl Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "positions:          {}", self.positions)?;
        writeln!(f, "last piece:         {}", self.last_piece)?;
        writeln!(f, "zeroing:            {}", self.zeroing)?;
        writeln!(f, "reduce to one:      {}", self.reduce_to_one)?;
        writeln!(f, "stall:              {}", self.stall)?;
        writeln!(f, "capped:             {}", self.capped)?;
        writeln!(f, "unlisted fallbacks: {}", self.unlisted_fallbacks)?;
        writeln!(f, "lost left:          {}", self.lost_positions_left)?;
        writeln!(f, "thrown wins:        {}", self.thrown_wins)?;
        write!(f, "violations:         {}", self.violations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rows::Move;

    #[test]
    fn every_position_is_audited() {
        let records = audit().collect::<Vec<_>>();
        assert_eq!(records.len(), 4 * 6 * 8 - 1);
        assert!(records.iter().all(|record| !record.rows.is_empty()));
    }

    #[test]
    fn no_violations() {
        for record in audit() {
            assert_eq!(record.violation(), None, "{}", record.rows);
        }
    }

    #[test]
    fn capped_position_is_flagged() {
        let outcomes = Outcomes::solve();
        let record = AuditRecord::new(Rows::new(0, 5, 1).unwrap(), &outcomes);
        assert!(!record.zeroing_available);
        assert!(record.is_unlisted_fallback());

        let record = AuditRecord::new(Rows::new(1, 1, 4).unwrap(), &outcomes);
        assert!(!record.zeroing_available);
        assert!(!record.is_unlisted_fallback());

        let record = AuditRecord::new(Rows::full(), &outcomes);
        assert!(record.zeroing_available);
        assert!(!record.is_unlisted_fallback());
    }

    #[test]
    fn violations_are_detected() {
        let outcomes = Outcomes::solve();
        let record = AuditRecord {
            advice: None,
            ..AuditRecord::new(Rows::full(), &outcomes)
        };
        assert_eq!(record.violation(), Some(Violation::NoMove));

        let record = AuditRecord {
            after: None,
            ..AuditRecord::new(Rows::full(), &outcomes)
        };
        assert_eq!(record.violation(), Some(Violation::IllegalMove));

        // 1:2 from the full board leaves (1, 5, 7) with nim-sum 3
        let rows = Rows::full();
        let record = AuditRecord {
            after: rows.remove(Move::new(Row::First, 2)),
            ..AuditRecord::new(rows, &outcomes)
        };
        assert_eq!(record.violation(), Some(Violation::MissedZeroing));

        let rows = Rows::new(1, 1, 0).unwrap();
        let mv = Move::new(Row::Second, 1);
        let record = AuditRecord {
            advice: Some(Advice::new(mv, Strategy::Stall)),
            after: rows.remove(mv),
            ..AuditRecord::new(rows, &outcomes)
        };
        assert_eq!(record.violation(), Some(Violation::WrongStall));
    }

    #[test]
    fn taking_the_last_piece_is_not_a_win() {
        let outcomes = Outcomes::solve();

        // Forced to take the last piece, the position was already lost
        let record = AuditRecord::new(Rows::new(1, 0, 0).unwrap(), &outcomes);
        assert_eq!(record.outcome, Outcome::P);
        assert_eq!(record.after, Some(Rows::empty()));
        assert_eq!(record.after_outcome, Some(Outcome::N));
        assert!(!record.leaves_lost_position());
        assert!(!record.throws_win());

        // Zeroing takes all three pieces, leaving one behind would have won
        let record = AuditRecord::new(Rows::new(0, 0, 3).unwrap(), &outcomes);
        assert_eq!(record.advice.map(|advice| advice.strategy()), Some(Strategy::Zeroing));
        assert_eq!(record.outcome, Outcome::N);
        assert_eq!(record.after_outcome, Some(Outcome::N));
        assert!(!record.leaves_lost_position());
        assert!(record.throws_win());

        let record = AuditRecord::new(Rows::full(), &outcomes);
        assert!(record.leaves_lost_position());
        assert!(!record.throws_win());
    }

    #[test]
    fn summary_adds_up() {
        let records = audit().collect::<Vec<_>>();
        let summary = records.iter().collect::<Summary>();
        assert_eq!(summary.positions, records.len());
        assert_eq!(
            summary.last_piece + summary.zeroing + summary.reduce_to_one + summary.stall,
            summary.positions
        );
        assert_eq!(summary.violations, 0);
        assert_eq!(summary.last_piece, 3);
        assert!(summary.unlisted_fallbacks <= summary.capped);
        assert!(summary.reduce_to_one <= summary.capped);
        assert!(summary.thrown_wins + summary.lost_positions_left <= summary.positions);
    }
}
