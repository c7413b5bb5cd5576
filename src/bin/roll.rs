//! diceroll_roll - roll dice notation from the command line

use anyhow::{bail, Result};
use clap::Parser;
use diceroll::dice::{evaluate_with, parse_groups, DieSource, OsDieSource, SequenceSource};
use diceroll::{init_tracing, LogFormat};

/// Roll dice notation once and print the breakdown
#[derive(Parser, Debug)]
#[command(
    name = "diceroll_roll",
    version,
    about = "Roll dice notation like 2d8+3",
    allow_negative_numbers = true
)]
struct Args {
    /// Dice notation; multiple words are joined with spaces
    #[arg(required = true)]
    notation: Vec<String>,

    /// Print the outcome as JSON
    #[arg(long)]
    json: bool,

    /// Print the possible range of each dice group before rolling
    #[arg(long)]
    range: bool,

    /// Replay these faces instead of random draws (e.g. 3,5,1)
    #[arg(long, value_delimiter = ',')]
    sequence: Option<Vec<u32>>,
}

fn main() -> Result<()> {
    init_tracing(LogFormat::Text, "diceroll=warn");

    let args = Args::parse();
    let input = args.notation.join(" ");
    let input = input.trim();
    if input.is_empty() {
        bail!("Please enter dice notation");
    }

    if args.range {
        for group in parse_groups(input)? {
            println!("{}: {}-{}", group, group.min(), group.max());
        }
    }

    let source: Box<dyn DieSource> = match args.sequence {
        Some(faces) => Box::new(SequenceSource::new(faces)),
        None => Box::new(OsDieSource),
    };
    let outcome = evaluate_with(input, source.as_ref());

    if args.json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else if outcome.is_ok() {
        println!("{}", outcome.result);
        println!("{}", outcome.details);
    }

    if let Some(error) = outcome.error {
        bail!(error);
    }

    Ok(())
}
