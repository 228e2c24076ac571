use crate::io::FileOrStdout;
use anyhow::{Context, Result, bail};
use clap::{self, Parser, ValueEnum};
use nim357::audit::{AuditRecord, Summary, Violation, audit};
use serde::Serialize;
use std::io::{BufWriter, Write};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Filter {
    /// Every non-empty position
    All,
    /// Positions where the cap rules out every zeroing move
    Capped,
    /// Capped positions without an end-game pattern
    Fallbacks,
    /// Positions where the advisor broke its guarantees
    Violations,
    /// Won positions the advised move gives away
    ThrownWins,
}

impl Filter {
    fn keeps(self, record: &AuditRecord) -> bool {
        match self {
            Filter::All => true,
            Filter::Capped => !record.nim_sum.is_zero() && !record.zeroing_available,
            Filter::Fallbacks => record.is_unlisted_fallback(),
            Filter::Violations => record.violation().is_some(),
            Filter::ThrownWins => record.throws_win(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
struct Report<'r> {
    #[serde(flatten)]
    record: &'r AuditRecord,
    violation: Option<Violation>,
    unlisted_fallback: bool,
    throws_win: bool,
}

/// Run the advisor on every position of the board and check its guarantees.
#[derive(Parser, Debug)]
pub struct Args {
    /// Which positions to report
    #[arg(long, value_enum, default_value_t = Filter::All)]
    only: Filter,

    /// Where to write one JSON report per line
    #[arg(long, default_value = "-")]
    output: FileOrStdout,
}

#[allow(clippy::needless_pass_by_value)]
pub fn run(args: Args) -> Result<()> {
    let mut output = BufWriter::new(
        args.output
            .create()
            .with_context(|| format!("Could not open output file `{}`", &args.output))?,
    );

    let mut summary = Summary::default();
    for record in audit() {
        summary.add(&record);
        if !args.only.keeps(&record) {
            continue;
        }

        let report = Report {
            record: &record,
            violation: record.violation(),
            unlisted_fallback: record.is_unlisted_fallback(),
            throws_win: record.throws_win(),
        };
        serde_json::ser::to_writer(&mut output, &report)
            .with_context(|| format!("Could not write report for {}", record.rows))?;
        writeln!(output)?;
    }
    output.flush()?;

    eprintln!("{summary}");
    if summary.violations != 0 {
        bail!(
            "Advisor broke its guarantees in {} positions",
            summary.violations
        );
    }

    Ok(())
}
