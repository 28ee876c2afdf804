// Copyright (c) 2022 Bastiaan Marinus van de Weerd

use std::collections::{HashMap, HashSet};


type Elves = HashSet<[i32; 2]>;

const NEIGHBORS: [[i32; 2]; 8] = [[-1, -1], [-1, 0], [-1, 1], [0, -1], [0, 1], [1, -1], [1, 0], [1, 1]];

/// North, south, west & east: the step, and the positions that must be free
/// to take it.
const DIRECTIONS: [([i32; 2], [[i32; 2]; 3]); 4] = [
	([-1, 0], [[-1, -1], [-1, 0], [-1, 1]]),
	([1, 0], [[1, -1], [1, 0], [1, 1]]),
	([0, -1], [[-1, -1], [0, -1], [1, -1]]),
	([0, 1], [[-1, 1], [0, 1], [1, 1]]),
];

fn offset([row, col]: [i32; 2], [dr, dc]: [i32; 2]) -> [i32; 2] {
	[row + dr, col + dc]
}

/// Plays round number `round` (from zero), returning whether any elf moved.
fn play_round(elves: &mut Elves, round: usize) -> bool {
	// Per target, the elf proposing it, or `None` if more than one did
	let mut proposals = HashMap::<[i32; 2], Option<[i32; 2]>>::new();
	for &elf in elves.iter() {
		let free = |delta: &[i32; 2]| !elves.contains(&offset(elf, *delta));
		if NEIGHBORS.iter().all(free) { continue }
		let step = (0..4)
			.map(|i| &DIRECTIONS[(round + i) % 4])
			.find(|(_, checks)| checks.iter().all(free));
		if let Some((step, _)) = step {
			proposals.entry(offset(elf, *step))
				.and_modify(|proposer| *proposer = None)
				.or_insert(Some(elf));
		}
	}

	let moves = proposals.into_iter()
		.filter_map(|(to, from)| Some((from?, to)))
		.collect::<Vec<_>>();
	for (from, to) in &moves {
		elves.remove(from);
		elves.insert(*to);
	}
	!moves.is_empty()
}

/// The smallest rectangle containing every elf, as row & column ranges.
fn bounds(elves: &Elves) -> Option<[[i32; 2]; 2]> {
	use itertools::{Itertools as _, MinMaxResult::*};
	let minmax = |axis: usize| match elves.iter().map(|elf| elf[axis]).minmax() {
		NoElements => None,
		OneElement(x) => Some([x, x]),
		MinMax(min, max) => Some([min, max]),
	};
	Some([minmax(0)?, minmax(1)?])
}

#[cfg(test)]
fn render(elves: &Elves) -> String {
	use itertools::Itertools as _;
	let Some([[row_min, row_max], [col_min, col_max]]) = bounds(elves) else { return String::new() };
	(row_min..=row_max)
		.map(|row| (col_min..=col_max)
			.map(|col| if elves.contains(&[row, col]) { '#' } else { '.' })
			.collect::<String>())
		.join("\n")
}


#[derive(Debug, thiserror::Error)]
pub(crate) enum Error {
	#[error(transparent)]
	Parse(#[from] parsing::ElvesError),
	#[error("No elves")]
	NoElves,
}


fn input_elves_from_str(s: &str) -> Result<Elves, Error> {
	let elves = parsing::elves_from_str(s)?;
	if elves.is_empty() { return Err(Error::NoElves) }
	Ok(elves)
}


fn part1_impl(mut input_elves: Elves) -> usize {
	for round in 0..10 { play_round(&mut input_elves, round); }
	let Some([[row_min, row_max], [col_min, col_max]]) = bounds(&input_elves) else { return 0 };
	let area = (row_max - row_min + 1) as usize * (col_max - col_min + 1) as usize;
	area - input_elves.len()
}

pub(crate) fn part1(input: &str) -> Result<usize, Error> {
	Ok(part1_impl(input_elves_from_str(input)?))
}


fn part2_impl(mut input_elves: Elves) -> usize {
	let mut round = 0;
	while play_round(&mut input_elves, round) { round += 1 }
	tracing::debug!(rounds = round + 1, elves = input_elves.len(), "elves settled");
	round + 1
}

pub(crate) fn part2(input: &str) -> Result<usize, Error> {
	Ok(part2_impl(input_elves_from_str(input)?))
}


mod parsing {
	use super::Elves;

	#[derive(Debug, thiserror::Error)]
	#[error("Invalid tile {found:?} on line {line}, column {column}")]
	pub(crate) struct ElvesError { line: usize, column: usize, found: char }

	pub(super) fn elves_from_str(s: &str) -> Result<Elves, ElvesError> {
		let mut elves = Elves::new();
		for (l, line) in s.lines().enumerate() {
			for (c, chr) in line.chars().enumerate() {
				match chr {
					'#' => { elves.insert([l as i32, c as i32]); }
					'.' => (),
					found => return Err(ElvesError { line: l + 1, column: c + 1, found }),
				}
			}
		}
		Ok(elves)
	}
}


#[test]
fn tests() {
	const SMALL: &str = indoc::indoc! { "
		.....
		..##.
		..#..
		.....
		..##.
		.....
	" };
	let mut elves = input_elves_from_str(SMALL).unwrap();
	for round in 0..3 { assert!(play_round(&mut elves, round)); }
	assert_eq!(render(&elves), indoc::indoc! { "
		..#..
		....#
		#....
		....#
		.....
		..#.." });
	assert!(!play_round(&mut elves, 3));

	const INPUT: &str = indoc::indoc! { "
		....#..
		..###.#
		#...#.#
		.#...##
		#.###..
		##.#.##
		.#..#..
	" };
	let elves = input_elves_from_str(INPUT).unwrap();
	let mut after_ten = elves.clone();
	for round in 0..10 { play_round(&mut after_ten, round); }
	assert_eq!(render(&after_ten), indoc::indoc! { "
		......#.....
		..........#.
		.#.#..#.....
		.....#......
		..#.....#..#
		#......##...
		....##......
		.#........#.
		...#.#..#...
		............
		...#..#..#.." });
	assert_eq!(part1_impl(elves.clone()), 110);
	assert_eq!(part2_impl(elves), 20);

	assert!(matches!(input_elves_from_str("..\n"), Err(Error::NoElves)));
	assert!(input_elves_from_str(".x\n").is_err());
}
