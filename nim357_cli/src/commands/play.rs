use crate::io::FileOrStdin;
use anyhow::{Context, Result};
use clap::{self, Parser, ValueEnum};
use nim357::{
    game::{Game, Player},
    rows::{Move, Rows},
};
use std::{
    io::{self, BufRead, BufReader, Write},
    str::FromStr,
};

const SEPARATOR: &str = "---------------------------------------------";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Computer {
    /// Two people share the keyboard
    None,
    /// Computer moves first
    A,
    /// Computer moves second
    B,
    /// Computer plays itself
    Both,
}

impl Computer {
    const fn plays(self, player: Player) -> bool {
        matches!(
            (self, player),
            (Computer::Both, _) | (Computer::A, Player::A) | (Computer::B, Player::B)
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    AwaitingMove(Player),
    GameOver { winner: Player },
}

impl Phase {
    const fn of(game: &Game) -> Phase {
        match game.winner() {
            Some(winner) => Phase::GameOver { winner },
            None => Phase::AwaitingMove(game.to_move()),
        }
    }
}

/// Play a game in the terminal. The player who takes the last piece loses.
///
/// The computer follows the nim-sum advisor, which does not account for that rule: from
/// positions such as (0, 0, 3) or (1, 1, 2) it takes the final pieces and loses. Run
/// `nim357 audit --only thrown-wins` for the full list.
#[derive(Parser, Debug)]
pub struct Args {
    /// Which players are played by the computer
    #[arg(long, value_enum, default_value_t = Computer::B)]
    computer: Computer,

    /// Starting position written as `h1,h2,h3`
    #[arg(long, default_value_t = Rows::full())]
    rows: Rows,

    /// Where to read moves from
    #[arg(long, default_value = "-")]
    input: FileOrStdin,
}

#[allow(clippy::needless_pass_by_value)]
pub fn run(args: Args) -> Result<()> {
    let input = args
        .input
        .open()
        .with_context(|| format!("Could not open input file `{}`", &args.input))?;
    let mut lines = BufReader::new(input).lines();
    let mut game = Game::from_rows(args.rows, Player::A);

    if play_game(
        &mut game,
        args.computer,
        &mut lines,
        args.input.is_interactive(),
    )?
    .is_none()
    {
        eprintln!("Leaving the game at {}", game.rows());
    }
    Ok(())
}

/// Run turns until the game ends. `None` if a human player left before that
fn play_game<I>(
    game: &mut Game,
    computer: Computer,
    lines: &mut I,
    interactive: bool,
) -> Result<Option<Player>>
where
    I: Iterator<Item = io::Result<String>>,
{
    loop {
        let player = match Phase::of(game) {
            Phase::GameOver { winner } => {
                println!("{SEPARATOR}");
                println!("Player {winner} wins!");
                return Ok(Some(winner));
            }
            Phase::AwaitingMove(player) => player,
        };

        println!("{SEPARATOR}");
        print!("{}", game.rows().board());
        println!("It is player {player}'s turn.");

        let mv = if computer.plays(player) {
            let advice = game
                .advice()
                .context("Advisor returned no move for a non-empty board")?;
            println!(
                "Computer takes {} from row {}.",
                advice.mv().pieces(),
                advice.mv().row()
            );
            advice.mv()
        } else {
            match read_move(lines, interactive)? {
                Some(mv) => mv,
                None => return Ok(None),
            }
        };

        if let Err(err) = game.play(mv) {
            println!("Invalid move! {err}.");
        }
    }
}

/// Prompt until a well-formed move comes in. `None` when the input ends or the player quits
fn read_move<I>(lines: &mut I, interactive: bool) -> Result<Option<Move>>
where
    I: Iterator<Item = io::Result<String>>,
{
    loop {
        print!("Enter your move as row:pieces, or q to quit: ");
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            return Ok(None);
        };
        let line = line.context("Could not read move")?;
        let line = line.trim();
        if !interactive {
            println!("{line}");
        }

        if line == "q" {
            return Ok(None);
        }
        match Move::from_str(line) {
            Ok(mv) => return Ok(Some(mv)),
            Err(err) => println!("Invalid move! {err}."),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nim357::rows::Row;

    fn lines(input: &[&str]) -> impl Iterator<Item = io::Result<String>> {
        input
            .iter()
            .map(|line| Ok::<_, io::Error>(line.to_string()))
            .collect::<Vec<_>>()
            .into_iter()
    }

    #[test]
    fn computer_sides() {
        for player in [Player::A, Player::B] {
            assert!(!Computer::None.plays(player));
            assert!(Computer::Both.plays(player));
        }
        assert!(Computer::A.plays(Player::A));
        assert!(!Computer::A.plays(Player::B));
        assert!(Computer::B.plays(Player::B));
        assert!(!Computer::B.plays(Player::A));
    }

    #[test]
    fn phase_follows_the_board() {
        let game = Game::from_rows(Rows::full(), Player::B);
        assert_eq!(Phase::of(&game), Phase::AwaitingMove(Player::B));

        // B is to move on an empty board, so A took the last piece
        let game = Game::from_rows(Rows::empty(), Player::B);
        assert_eq!(Phase::of(&game), Phase::GameOver { winner: Player::B });
    }

    #[test]
    fn malformed_move_prompts_again() {
        let mut input = lines(&["x", "4:1", "3:2"]);
        let mv = read_move(&mut input, false).unwrap();
        assert_eq!(mv, Some(Move::new(Row::Third, 2)));
        assert!(input.next().is_none());
    }

    #[test]
    fn quit_and_end_of_input() {
        assert_eq!(read_move(&mut lines(&[" q "]), true).unwrap(), None);
        assert_eq!(read_move(&mut lines(&[]), false).unwrap(), None);

        let mut failing = std::iter::once(Err(io::Error::other("disconnected")));
        assert!(read_move(&mut failing, true).is_err());
    }

    #[test]
    fn illegal_move_prompts_again() {
        // 3:4 parses but is over the cap, 3:2 leaves the last piece to the computer
        let mut game = Game::from_rows(Rows::new(0, 0, 3).unwrap(), Player::A);
        let mut input = lines(&["3:4", "3:2"]);
        let winner = play_game(&mut game, Computer::B, &mut input, false).unwrap();
        assert_eq!(winner, Some(Player::A));
        assert!(game.is_over());
        assert!(input.next().is_none());
    }

    #[test]
    fn human_can_leave() {
        let mut game = Game::from_rows(Rows::full(), Player::A);
        let mut input = lines(&["1:1", "q"]);
        let winner = play_game(&mut game, Computer::B, &mut input, false).unwrap();
        assert_eq!(winner, None);
        // The computer answered 1:1 with its advised move before the player quit
        let advised = Game::from_rows(Rows::new(2, 5, 7).unwrap(), Player::B)
            .advice()
            .unwrap()
            .mv();
        assert_eq!(
            Some(game.rows()),
            Rows::new(2, 5, 7).unwrap().remove(advised)
        );
    }

    #[test]
    fn computer_follows_the_advisor() {
        let mut game = Game::from_rows(Rows::full(), Player::A);
        let mut expected = Game::from_rows(Rows::full(), Player::A);
        let winner = play_game(&mut game, Computer::Both, &mut lines(&[]), false).unwrap();

        while let Some(advice) = expected.advice() {
            expected.play(advice.mv()).unwrap();
        }
        assert_eq!(winner, expected.winner());
        assert!(game.is_over());
    }
}
