// Copyright (c) 2022 Bastiaan Marinus van de Weerd

use std::collections::HashSet;


#[derive(PartialEq, Eq, Hash, Clone, Copy)]
#[cfg_attr(test, derive(Debug))]
struct Cube([i32; 3]);

impl Cube {
	fn adjacent(self) -> impl Iterator<Item = Cube> {
		let Cube(pos) = self;
		(0..3).flat_map(move |axis| [-1, 1].map(|delta| {
			let mut adjacent = pos;
			adjacent[axis] += delta;
			Cube(adjacent)
		}))
	}
}


#[derive(Debug, thiserror::Error)]
pub(crate) enum Error {
	#[error(transparent)]
	Parse(#[from] parsing::CubesError),
}


fn input_cubes_from_str(s: &str) -> Result<HashSet<Cube>, parsing::CubesError> {
	parsing::cubes_from_str(s).collect()
}


fn part1_impl(input_cubes: &HashSet<Cube>) -> usize {
	input_cubes.iter()
		.flat_map(|cube| cube.adjacent())
		.filter(|adjacent| !input_cubes.contains(adjacent))
		.count()
}

pub(crate) fn part1(input: &str) -> Result<usize, Error> {
	Ok(part1_impl(&input_cubes_from_str(input)?))
}


/// Counts the faces touching air that is reachable from outside, by flooding
/// the bounding box (padded by one, so the flood can get all around) from a
/// corner.
fn part2_impl(input_cubes: &HashSet<Cube>) -> usize {
	let Some(first) = input_cubes.iter().next() else { return 0 };
	let (min, max) = input_cubes.iter().fold((first.0, first.0), |(mut min, mut max), cube| {
		for axis in 0..3 {
			min[axis] = min[axis].min(cube.0[axis] - 1);
			max[axis] = max[axis].max(cube.0[axis] + 1);
		}
		(min, max)
	});
	let in_bounds = |cube: &Cube| (0..3).all(|axis| (min[axis]..=max[axis]).contains(&cube.0[axis]));

	let mut outside = HashSet::from([Cube(min)]);
	let mut stack = vec![Cube(min)];
	let mut faces = 0;
	while let Some(air) = stack.pop() {
		for adjacent in air.adjacent() {
			if !in_bounds(&adjacent) { continue }
			if input_cubes.contains(&adjacent) { faces += 1; continue }
			if outside.insert(adjacent) { stack.push(adjacent) }
		}
	}
	faces
}

pub(crate) fn part2(input: &str) -> Result<usize, Error> {
	Ok(part2_impl(&input_cubes_from_str(input)?))
}


mod parsing {
	use std::{num::ParseIntError, str::FromStr};
	use super::Cube;

	#[derive(Debug, thiserror::Error)]
	pub(crate) enum CubeError {
		#[error("expected `<x>,<y>,<z>`")]
		Format,
		#[error("invalid coordinate: {0}")]
		Coordinate(#[from] ParseIntError),
	}

	impl FromStr for Cube {
		type Err = CubeError;
		fn from_str(s: &str) -> Result<Self, Self::Err> {
			let mut coords = s.split(',').map(|c| c.trim().parse::<i32>());
			let (Some(x), Some(y), Some(z), None) = (coords.next(), coords.next(), coords.next(), coords.next())
				else { return Err(CubeError::Format) };
			Ok(Cube([x?, y?, z?]))
		}
	}

	#[derive(Debug, thiserror::Error)]
	#[error("Invalid cube on line {line}: {source}")]
	pub(crate) struct CubesError { line: usize, source: CubeError }

	pub(super) fn cubes_from_str(s: &str) -> impl Iterator<Item = Result<Cube, CubesError>> + '_ {
		s.lines()
			.enumerate()
			.filter(|(_, line)| !line.is_empty())
			.map(|(l, line)| line.parse()
				.map_err(|e| CubesError { line: l + 1, source: e }))
	}
}


#[test]
fn tests() {
	const INPUT: &str = indoc::indoc! { "
		2,2,2
		1,2,2
		3,2,2
		2,1,2
		2,3,2
		2,2,1
		2,2,3
		2,2,4
		2,2,6
		1,2,5
		3,2,5
		2,1,5
		2,3,5
	" };
	let cubes = input_cubes_from_str(INPUT).unwrap();
	assert_eq!(part1_impl(&input_cubes_from_str("1,1,1\n2,1,1\n").unwrap()), 10);
	assert_eq!(part1_impl(&cubes), 64);
	assert_eq!(part2_impl(&cubes), 58);
	assert_eq!(Cube([0, 0, 0]).adjacent().count(), 6);
	assert!(input_cubes_from_str("1,2\n").is_err());
	assert!(input_cubes_from_str("1,2,3,4\n").is_err());
	assert!(matches!(part2("1,1,1\n1,x,1\n"), Err(Error::Parse(_))));
}
