// Copyright (c) 2022 Bastiaan Marinus van de Weerd


/// Set of item types, as a bitmask indexed by priority.
#[derive(Clone, Copy, Default)]
struct Items(u64);

impl Items {
	fn priority(item: u8) -> Option<u32> {
		match item {
			b'a'..=b'z' => Some((item - b'a') as u32 + 1),
			b'A'..=b'Z' => Some((item - b'A') as u32 + 27),
			_ => None,
		}
	}

	fn common(self, other: Items) -> Items {
		Items(self.0 & other.0)
	}

	fn union(self, other: Items) -> Items {
		Items(self.0 | other.0)
	}

	fn priorities(self) -> impl Iterator<Item = u32> {
		(1..=52).filter(move |p| self.0 & 1 << p != 0)
	}
}

struct Rucksack([Items; 2]);

impl Rucksack {
	fn all(&self) -> Items {
		self.0[0].union(self.0[1])
	}
}


#[derive(Debug, thiserror::Error)]
pub(crate) enum Error {
	#[error(transparent)]
	Parse(#[from] parsing::RucksacksError),
	#[error("Group {group} does not share exactly one item type (found {found})")]
	Badge { group: usize, found: u32 },
	#[error("The last group only has {0} rucksack(s)")]
	IncompleteGroup(usize),
}


fn input_rucksacks_from_str(s: &str) -> Result<Vec<Rucksack>, parsing::RucksacksError> {
	parsing::rucksacks_from_str(s).collect()
}


fn part1_impl(input_rucksacks: &[Rucksack]) -> u32 {
	input_rucksacks.iter()
		.flat_map(|Rucksack([left, right])| left.common(*right).priorities())
		.sum()
}

pub(crate) fn part1(input: &str) -> Result<u32, Error> {
	Ok(part1_impl(&input_rucksacks_from_str(input)?))
}


fn part2_impl(input_rucksacks: &[Rucksack]) -> Result<u32, Error> {
	input_rucksacks.chunks(3)
		.enumerate()
		.map(|(g, group)| {
			if group.len() < 3 { return Err(Error::IncompleteGroup(group.len())) }
			let badge = group.iter()
				.map(Rucksack::all)
				.reduce(Items::common)
				.unwrap_or_default();
			let found = badge.0.count_ones();
			if found != 1 { return Err(Error::Badge { group: g + 1, found }) }
			Ok(badge.0.trailing_zeros())
		})
		.sum()
}

pub(crate) fn part2(input: &str) -> Result<u32, Error> {
	part2_impl(&input_rucksacks_from_str(input)?)
}


mod parsing {
	use std::str::FromStr;
	use super::{Items, Rucksack};

	#[derive(Debug, thiserror::Error)]
	pub(crate) enum RucksackError {
		#[error("odd number of items ({0})")]
		OddLen(usize),
		#[error("invalid item {found:?} at column {column}")]
		InvalidItem { column: usize, found: char },
	}

	impl FromStr for Rucksack {
		type Err = RucksackError;
		fn from_str(s: &str) -> Result<Self, Self::Err> {
			if s.len() % 2 != 0 { return Err(RucksackError::OddLen(s.len())) }
			let mut compartments = [Items::default(); 2];
			for (c, b) in s.bytes().enumerate() {
				let priority = Items::priority(b)
					.ok_or(RucksackError::InvalidItem { column: c + 1, found: b as char })?;
				compartments[c * 2 / s.len()].0 |= 1 << priority;
			}
			Ok(Rucksack(compartments))
		}
	}

	#[derive(Debug, thiserror::Error)]
	#[error("Invalid rucksack on line {line}: {source}")]
	pub(crate) struct RucksacksError { line: usize, source: RucksackError }

	pub(super) fn rucksacks_from_str(s: &str) -> impl Iterator<Item = Result<Rucksack, RucksacksError>> + '_ {
		s.lines()
			.enumerate()
			.filter(|(_, line)| !line.is_empty())
			.map(|(l, line)| line.parse()
				.map_err(|e| RucksacksError { line: l + 1, source: e }))
	}
}


#[test]
fn tests() {
	const INPUT: &str = indoc::indoc! { "
		vJrwpWtwJgWrhcsFMMfFFhFp
		jqHRNqRjqzjGDLGLrsFMfFZSrLrFZsSL
		PmmdzqPrVvPwwTWBwg
		wMqvLMZHhHMvwLHjbvcjnnSBnvTQFn
		ttgJtRGJQctTZtZT
		CrZsJsPPZsGzwwsLwLmpwMDw
	" };
	let rucksacks = input_rucksacks_from_str(INPUT).unwrap();
	assert_eq!(part1_impl(&rucksacks), 157);
	assert_eq!(part2_impl(&rucksacks).unwrap(), 70);
	assert!(matches!(part2_impl(&rucksacks[..4]), Err(Error::IncompleteGroup(1))));
	assert!(matches!(part2_impl(&input_rucksacks_from_str("ab\ncd\nef\n").unwrap()),
		Err(Error::Badge { group: 1, found: 0 })));
}
