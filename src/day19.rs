// Copyright (c) 2022 Bastiaan Marinus van de Weerd


#[derive(Clone, Copy, PartialEq, Eq)]
#[cfg_attr(test, derive(Debug))]
enum Mineral { Ore, Clay, Obsidian, Geode }

#[cfg_attr(test, derive(Debug, PartialEq, Eq))]
struct Blueprint {
	id: u32,
	/// Per robot, what it costs of each mineral.
	costs: [[u32; 4]; 4],
}

#[derive(Clone, Copy)]
struct State {
	minerals: [u32; 4],
	robots: [u32; 4],
}

impl State {
	fn new() -> Self {
		State { minerals: [0; 4], robots: [1, 0, 0, 0] }
	}

	fn can_build(&self, blueprint: &Blueprint, robot: Mineral) -> bool {
		blueprint.costs[robot as usize].iter().zip(self.minerals).all(|(&cost, have)| have >= cost)
	}

	/// Minutes to wait before `robot` is affordable, or `None` if it never
	/// will be with the current robots.
	fn turns_to_build(&self, blueprint: &Blueprint, robot: Mineral) -> Option<u32> {
		blueprint.costs[robot as usize].iter()
			.zip(self.minerals.iter().zip(self.robots))
			.filter(|(&cost, _)| cost > 0)
			.map(|(&cost, (&have, robots))| match (cost.checked_sub(have), robots) {
				(None | Some(0), _) => Some(0),
				(Some(_), 0) => None,
				(Some(missing), robots) => Some((missing + robots - 1) / robots),
			})
			.try_fold(0, |max, turns| Some(max.max(turns?)))
	}

	fn advanced(mut self, minutes: u32) -> Self {
		for (minerals, robots) in self.minerals.iter_mut().zip(self.robots) {
			*minerals += robots * minutes;
		}
		self
	}

	fn with_robot(mut self, blueprint: &Blueprint, robot: Mineral) -> Self {
		for (minerals, cost) in self.minerals.iter_mut().zip(blueprint.costs[robot as usize]) {
			*minerals -= cost;
		}
		self.robots[robot as usize] += 1;
		self
	}
}

struct Search<'a> {
	blueprint: &'a Blueprint,
	min_ore_cost: u32,
	best: i32,
}

impl<'a> Search<'a> {
	fn new(blueprint: &'a Blueprint) -> Self {
		let min_ore_cost = blueprint.costs.iter().map(|costs| costs[0]).min().unwrap_or(0);
		Search { blueprint, min_ore_cost, best: 0 }
	}

	fn robot_order(&self, state: &State, time: i32) -> &'static [Mineral] {
		use Mineral::*;
		if time < 2 { return &[] }
		match (state.robots[Obsidian as usize] > 0, state.robots[Clay as usize] > 0) {
			(true, true) => &[Geode, Obsidian, Clay, Ore],
			(true, false) => &[Geode, Clay, Ore],
			(false, true) => &[Obsidian, Clay, Ore],
			(false, false) if state.robots[Ore as usize] <= self.min_ore_cost => &[Ore, Clay],
			(false, false) => &[Clay, Ore],
		}
	}

	/// Geodes still to be gained if a geode robot could be built every minute
	/// from the earliest one possible.
	fn upper_bound(&self, state: &State, time: i32) -> i32 {
		let triangle = |t: i32| t * (t - 1) / 2;
		if time < 2 { 0 }
		else if state.can_build(self.blueprint, Mineral::Geode) { triangle(time) }
		else if state.advanced(1).can_build(self.blueprint, Mineral::Geode) { triangle(time - 1) }
		else { triangle(time - 2) }
	}

	fn explore(&mut self, state: State, time: i32, score: i32, robot: Mineral) {
		self.best = self.best.max(score);
		if time <= 1 { return }
		let Some(turns) = state.turns_to_build(self.blueprint, robot) else { return };

		let time = time - turns as i32;
		let state = state.advanced(turns + 1).with_robot(self.blueprint, robot);
		let mut score = score;
		if robot == Mineral::Geode {
			score += time - 1;
			self.best = self.best.max(score);
		}

		if score + self.upper_bound(&state, time - 1) > self.best {
			for &next in self.robot_order(&state, time - 1) {
				self.explore(state, time - 1, score, next);
			}
		}
	}
}

fn max_geodes(blueprint: &Blueprint, time: i32) -> u32 {
	let mut search = Search::new(blueprint);
	let state = State::new();
	for &robot in search.robot_order(&state, time) {
		search.explore(state, time, 0, robot);
	}
	tracing::debug!(blueprint = blueprint.id, time, geodes = search.best, "blueprint optimized");
	search.best as u32
}


#[derive(Debug, thiserror::Error)]
pub(crate) enum Error {
	#[error(transparent)]
	Parse(#[from] parsing::BlueprintsError),
	#[error("No blueprints")]
	NoBlueprints,
}


fn input_blueprints_from_str(s: &str) -> Result<Vec<Blueprint>, Error> {
	let blueprints = parsing::blueprints_from_str(s)?;
	if blueprints.is_empty() { return Err(Error::NoBlueprints) }
	Ok(blueprints)
}


fn part1_impl(input_blueprints: &[Blueprint]) -> u32 {
	use rayon::prelude::*;
	input_blueprints.par_iter()
		.map(|blueprint| blueprint.id * max_geodes(blueprint, 24))
		.sum()
}

pub(crate) fn part1(input: &str) -> Result<u32, Error> {
	Ok(part1_impl(&input_blueprints_from_str(input)?))
}


fn part2_impl(input_blueprints: &[Blueprint]) -> u64 {
	use rayon::prelude::*;
	input_blueprints[..input_blueprints.len().min(3)].par_iter()
		.map(|blueprint| max_geodes(blueprint, 32) as u64)
		.product()
}

pub(crate) fn part2(input: &str) -> Result<u64, Error> {
	Ok(part2_impl(&input_blueprints_from_str(input)?))
}


mod parsing {
	use std::num::ParseIntError;
	use super::Blueprint;

	/// Blueprints may be wrapped over lines any which way, so they're matched
	/// word by word. `#` stands in for a number.
	const TEMPLATE: &str = "Blueprint #: \
		Each ore robot costs # ore. \
		Each clay robot costs # ore. \
		Each obsidian robot costs # ore and # clay. \
		Each geode robot costs # ore and # obsidian.";

	#[derive(Debug, thiserror::Error)]
	pub(crate) enum BlueprintsError {
		#[error("Expected {expected:?} on line {line}, found {found:?}")]
		Unexpected { line: usize, expected: &'static str, found: String },
		#[error("Invalid number on line {line}: {source}")]
		Number { line: usize, source: ParseIntError },
		#[error("Blueprint ends early")]
		Truncated,
	}

	pub(super) fn blueprints_from_str(s: &str) -> Result<Vec<Blueprint>, BlueprintsError> {
		use BlueprintsError as E;

		let mut words = s.lines()
			.enumerate()
			.flat_map(|(l, line)| line.split_whitespace().map(move |word| (l + 1, word)))
			.peekable();

		let mut blueprints = Vec::new();
		while words.peek().is_some() {
			let mut numbers = [0; 7];
			let mut n = 0;
			for expected in TEMPLATE.split_whitespace() {
				let (line, found) = words.next().ok_or(E::Truncated)?;
				let unexpected = || E::Unexpected { line, expected, found: found.to_owned() };
				match expected.split_once('#') {
					Some((prefix, suffix)) => {
						let number = found.strip_prefix(prefix)
							.and_then(|found| found.strip_suffix(suffix))
							.ok_or_else(unexpected)?;
						numbers[n] = number.parse().map_err(|e| E::Number { line, source: e })?;
						n += 1;
					}
					None if found == expected => (),
					None => return Err(unexpected()),
				}
			}

			let [id, ore_ore, clay_ore, obsidian_ore, obsidian_clay, geode_ore, geode_obsidian] = numbers;
			blueprints.push(Blueprint { id, costs: [
				[ore_ore, 0, 0, 0],
				[clay_ore, 0, 0, 0],
				[obsidian_ore, obsidian_clay, 0, 0],
				[geode_ore, 0, geode_obsidian, 0],
			] });
		}
		Ok(blueprints)
	}
}


#[test]
fn tests() {
	const INPUT: &str = indoc::indoc! { "
		Blueprint 1:
		  Each ore robot costs 4 ore.
		  Each clay robot costs 2 ore.
		  Each obsidian robot costs 3 ore and 14 clay.
		  Each geode robot costs 2 ore and 7 obsidian.

		Blueprint 2:
		  Each ore robot costs 2 ore.
		  Each clay robot costs 3 ore.
		  Each obsidian robot costs 3 ore and 8 clay.
		  Each geode robot costs 3 ore and 12 obsidian.
	" };
	let blueprints = input_blueprints_from_str(INPUT).unwrap();
	assert_eq!(blueprints.len(), 2);
	assert_eq!(blueprints[0], Blueprint { id: 1, costs: [[4, 0, 0, 0], [2, 0, 0, 0], [3, 14, 0, 0], [2, 0, 7, 0]] });
	let single_lines = INPUT.replace("\n  ", " ").replace("\n\n", "\n");
	assert_eq!(input_blueprints_from_str(&single_lines).unwrap(), blueprints);

	let state = State::new();
	assert_eq!(state.turns_to_build(&blueprints[0], Mineral::Clay), Some(2));
	assert_eq!(state.turns_to_build(&blueprints[0], Mineral::Obsidian), None);
	assert!(!state.advanced(1).can_build(&blueprints[0], Mineral::Clay));
	assert!(state.advanced(2).can_build(&blueprints[0], Mineral::Clay));

	assert_eq!(max_geodes(&blueprints[0], 24), 9);
	assert_eq!(max_geodes(&blueprints[1], 24), 12);
	assert_eq!(part1_impl(&blueprints), 33);
	assert_eq!(max_geodes(&blueprints[0], 32), 56);

	assert!(matches!(input_blueprints_from_str("Blueprint 1: Each ore robot costs 4 clay."),
		Err(Error::Parse(parsing::BlueprintsError::Unexpected { line: 1, expected: "ore.", .. }))));
	assert!(matches!(input_blueprints_from_str("Blueprint 1:\nEach ore robot"),
		Err(Error::Parse(parsing::BlueprintsError::Truncated))));
	assert!(matches!(input_blueprints_from_str("Blueprint x:"),
		Err(Error::Parse(parsing::BlueprintsError::Number { line: 1, .. }))));
	assert!(matches!(input_blueprints_from_str("\n"), Err(Error::NoBlueprints)));
}
