// Copyright (c) 2022 Bastiaan Marinus van de Weerd


/// Food item calories carried by a single elf.
struct Elf(Vec<u64>);

impl Elf {
	fn total(&self) -> u64 {
		self.0.iter().sum()
	}
}


fn input_elves_from_str(s: &str) -> Result<Vec<Elf>, parsing::ElvesError> {
	parsing::elves_from_str(s)
}


fn totals_descending(input_elves: &[Elf]) -> impl Iterator<Item = u64> {
	use itertools::Itertools as _;
	input_elves.iter()
		.map(Elf::total)
		.sorted_by(|l, r| r.cmp(l))
}


fn part1_impl(input_elves: &[Elf]) -> u64 {
	totals_descending(input_elves).next().unwrap_or(0)
}

pub(crate) fn part1(input: &str) -> Result<u64, parsing::ElvesError> {
	Ok(part1_impl(&input_elves_from_str(input)?))
}


fn part2_impl(input_elves: &[Elf]) -> u64 {
	totals_descending(input_elves).take(3).sum()
}

pub(crate) fn part2(input: &str) -> Result<u64, parsing::ElvesError> {
	Ok(part2_impl(&input_elves_from_str(input)?))
}


mod parsing {
	use std::num::ParseIntError;
	use super::Elf;

	#[derive(Debug, thiserror::Error)]
	pub(crate) enum ElvesError {
		#[error("Empty input")]
		Empty,
		#[error("Invalid calories on line {line}: {source}")]
		Invalid { line: usize, source: ParseIntError },
	}

	pub(super) fn elves_from_str(s: &str) -> Result<Vec<Elf>, ElvesError> {
		let mut elves = vec![];
		let mut current = None;
		for (l, line) in s.lines().enumerate() {
			if line.is_empty() {
				elves.extend(current.take().map(Elf));
				continue
			}
			let calories = line.parse()
				.map_err(|e| ElvesError::Invalid { line: l + 1, source: e })?;
			current.get_or_insert_with(Vec::new).push(calories);
		}
		elves.extend(current.map(Elf));

		if elves.is_empty() { return Err(ElvesError::Empty) }
		Ok(elves)
	}
}


#[test]
fn tests() {
	const INPUT: &str = indoc::indoc! { "
		1000
		2000
		3000

		4000

		5000
		6000

		7000
		8000
		9000

		10000
	" };
	let elves = input_elves_from_str(INPUT).unwrap();
	assert_eq!(elves.len(), 5);
	assert_eq!(part1_impl(&elves), 24_000);
	assert_eq!(part2_impl(&elves), 45_000);
	assert!(matches!(input_elves_from_str(""), Err(parsing::ElvesError::Empty)));
	assert!(matches!(input_elves_from_str("12\nx1\n"),
		Err(parsing::ElvesError::Invalid { line: 2, .. })));
}
