// Copyright (c) 2022 Bastiaan Marinus van de Weerd

use std::ops::RangeInclusive;


/// Section assignments of a pair of elves.
struct Pair([RangeInclusive<u32>; 2]);

impl Pair {
	fn fully_contains(&self) -> bool {
		let [a, b] = &self.0;
		(a.contains(b.start()) && a.contains(b.end()))
			|| (b.contains(a.start()) && b.contains(a.end()))
	}

	fn overlaps(&self) -> bool {
		let [a, b] = &self.0;
		a.start() <= b.end() && b.start() <= a.end()
	}
}


fn input_pairs_from_str(s: &str) -> Result<Vec<Pair>, parsing::PairsError> {
	parsing::pairs_from_str(s).collect()
}


fn count(input_pairs: &[Pair], pred: impl Fn(&Pair) -> bool) -> usize {
	input_pairs.iter().filter(|&pair| pred(pair)).count()
}

pub(crate) fn part1(input: &str) -> Result<usize, parsing::PairsError> {
	Ok(count(&input_pairs_from_str(input)?, Pair::fully_contains))
}

pub(crate) fn part2(input: &str) -> Result<usize, parsing::PairsError> {
	Ok(count(&input_pairs_from_str(input)?, Pair::overlaps))
}


mod parsing {
	use std::{num::ParseIntError, ops::RangeInclusive, str::FromStr};
	use super::Pair;

	#[derive(Debug, thiserror::Error)]
	pub(crate) enum PairError {
		#[error("expected `<start>-<end>,<start>-<end>`")]
		Format,
		#[error("invalid section: {0}")]
		Section(#[from] ParseIntError),
		#[error("assignment {0}-{1} ends before it starts")]
		Reversed(u32, u32),
	}

	fn try_assignment_from_str(s: &str) -> Result<RangeInclusive<u32>, PairError> {
		let (start, end) = s.split_once('-').ok_or(PairError::Format)?;
		let (start, end) = (start.parse()?, end.parse()?);
		if end < start { return Err(PairError::Reversed(start, end)) }
		Ok(start..=end)
	}

	impl FromStr for Pair {
		type Err = PairError;
		fn from_str(s: &str) -> Result<Self, Self::Err> {
			let (a, b) = s.split_once(',').ok_or(PairError::Format)?;
			Ok(Pair([try_assignment_from_str(a)?, try_assignment_from_str(b)?]))
		}
	}

	#[derive(Debug, thiserror::Error)]
	#[error("Invalid pair on line {line}: {source}")]
	pub(crate) struct PairsError { line: usize, source: PairError }

	pub(super) fn pairs_from_str(s: &str) -> impl Iterator<Item = Result<Pair, PairsError>> + '_ {
		s.lines()
			.enumerate()
			.filter(|(_, line)| !line.is_empty())
			.map(|(l, line)| line.parse()
				.map_err(|e| PairsError { line: l + 1, source: e }))
	}
}


#[test]
fn tests() {
	const INPUT: &str = indoc::indoc! { "
		2-4,6-8
		2-3,4-5
		5-7,7-9
		2-8,3-7
		6-6,4-6
		2-6,4-8
	" };
	let pairs = input_pairs_from_str(INPUT).unwrap();
	assert_eq!(count(&pairs, Pair::fully_contains), 2);
	assert_eq!(count(&pairs, Pair::overlaps), 4);
	assert_eq!(part1(INPUT).unwrap(), 2);
	assert!(part2("4-2,1-1").is_err());
}
