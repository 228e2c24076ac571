use anyhow::{Context, Result};
use clap::{self, Parser};
use nim357::{advisor::compute_move, rows::Rows};

/// Print the advised move for a position.
#[derive(Parser, Debug)]
pub struct Args {
    /// Heap sizes written as `h1,h2,h3`
    #[arg(long, default_value_t = Rows::full())]
    rows: Rows,

    /// Print the advice as JSON
    #[arg(long)]
    json: bool,
}

#[allow(clippy::needless_pass_by_value)]
pub fn run(args: Args) -> Result<()> {
    let advice = compute_move(&args.rows)
        .with_context(|| format!("Position {} has no pieces left to take", args.rows))?;

    eprint!("{}", args.rows.board());
    eprintln!("Nim-sum: {}", args.rows.nim_sum());

    if args.json {
        println!("{}", serde_json::ser::to_string(&advice)?);
    } else {
        println!("{advice}");
    }

    Ok(())
}
