// Copyright (c) 2022 Bastiaan Marinus van de Weerd

use std::path::PathBuf;
use anyhow::{bail, Context as _};
use clap::Parser;

mod util;
util::mod_days![
	01, 02, 03, 04, 05, 06, 07, 08, 09, 10,
	11, 12, 13, 14, 15, 16, 17, 18, 19, 20,
	21, 22, 23, 24, 25,
];


/// Solves the puzzles of the 2022 edition of the advent calendar.
#[derive(Parser, Debug)]
#[command(version)]
struct Cli {
	/// Days to solve (1 through 25); solves every day when omitted.
	#[arg(value_parser = clap::value_parser!(u8).range(1..=25))]
	days: Vec<u8>,

	/// Input file to use instead of the default one (requires a single day).
	#[arg(short, long, value_name = "FILE")]
	input: Option<PathBuf>,

	/// Directory holding the default `<day>.txt` input files.
	#[arg(short = 'd', long, value_name = "DIR", default_value = "input")]
	input_dir: PathBuf,

	/// Increases logging verbosity (may be repeated); `RUST_LOG` takes precedence.
	#[arg(short, long, action = clap::ArgAction::Count)]
	verbose: u8,
}


fn main() -> anyhow::Result<()> {
	let cli = Cli::parse();
	util::init_tracing(cli.verbose);

	let days = if cli.days.is_empty() { DAYS.to_vec() } else { cli.days };
	if cli.input.is_some() && days.len() != 1 {
		bail!("An explicit input file requires exactly one day")
	}

	for day in days {
		let path = cli.input.clone().unwrap_or_else(|| util::input_path(&cli.input_dir, day));
		tracing::debug!(day, path = %path.display(), "reading input");
		let input = util::read_input(&path)?;

		for part in [1, 2] {
			let answer = util::timed(day, part, || solve(day, part, &input))
				.with_context(|| format!("Failed to solve day {day}, part {part}"))?;
			if answer.contains('\n') {
				println!("Day {day}; part {part}:\n{answer}");
			} else {
				println!("Day {day}; part {part}: {answer}");
			}
		}
	}

	Ok(())
}
