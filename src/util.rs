// Copyright (c) 2022 Bastiaan Marinus van de Weerd

use std::{path::{Path, PathBuf}, time::Instant};
use anyhow::Context as _;


/// Declares the `dayNN` modules and generates [`DAYS`] and `solve`, which
/// dispatches a day & part to the corresponding `dayNN::partN` function.
macro_rules! mod_days { ( $( $day:literal ),+ $(,)? ) => { paste::paste! {
	$( mod [<day $day>]; )+

	pub(crate) const DAYS: &[u8] = &[ $( $day ),+ ];

	pub(crate) fn solve(day: u8, part: u8, input: &str) -> anyhow::Result<String> {
		match (day, part) {
			$(
				($day, 1) => Ok([<day $day>]::part1(input)?.to_string()),
				($day, 2) => Ok([<day $day>]::part2(input)?.to_string()),
			)+
			_ => anyhow::bail!("No solver for day {day}, part {part}"),
		}
	}
} } }

pub(crate) use mod_days;


pub(crate) fn input_path(dir: &Path, day: u8) -> PathBuf {
	dir.join(format!("{day}.txt"))
}

pub(crate) fn read_input(path: &Path) -> anyhow::Result<String> {
	std::fs::read_to_string(path)
		.with_context(|| format!("Could not read input file {}", path.display()))
}


/// Runs `f` within a span for `day` & `part`, logging how long it took.
pub(crate) fn timed<T>(day: u8, part: u8, f: impl FnOnce() -> T) -> T {
	let _span = tracing::info_span!("solve", day, part).entered();
	let start = Instant::now();
	let result = f();
	tracing::info!(elapsed = ?start.elapsed(), "finished");
	result
}


pub(crate) fn init_tracing(verbosity: u8) {
	use tracing_subscriber::{fmt, prelude::*, EnvFilter};

	let default_directive = match verbosity {
		0 => "warn",
		1 => "info",
		2 => "debug",
		_ => "trace",
	};
	let filter = EnvFilter::try_from_default_env()
		.unwrap_or_else(|_| EnvFilter::new(default_directive));

	tracing_subscriber::registry()
		.with(filter)
		.with(fmt::layer().with_writer(std::io::stderr).with_target(false))
		.init();
}


#[test]
fn tests() {
	assert_eq!(input_path(Path::new("input"), 7), Path::new("input/7.txt"));
	assert!(read_input(Path::new("does/not/exist.txt")).is_err());
	assert_eq!(timed(1, 2, || 3), 3);
}
