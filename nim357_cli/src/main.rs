use crate::commands::*;
use anyhow::Result;
use clap::{self, Parser, Subcommand};

mod commands;
mod io;

#[derive(Subcommand, Debug)]
enum Command {
    Advise(advise::Args),
    Audit(audit::Args),
    Play(play::Args),
}

#[derive(Parser)]
struct Args {
    #[clap(subcommand)]
    command: Command,
}

fn main() -> Result<()> {
    let args = Args::parse();
    match args.command {
        Command::Advise(args) => advise::run(args),
        Command::Audit(args) => audit::run(args),
        Command::Play(args) => play::run(args),
    }
}
