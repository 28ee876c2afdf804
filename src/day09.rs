// Copyright (c) 2022 Bastiaan Marinus van de Weerd

use std::collections::HashSet;


#[derive(Clone, Copy)]
#[cfg_attr(test, derive(Debug, PartialEq, Eq))]
enum Direction { Up, Down, Left, Right }

#[cfg_attr(test, derive(Debug))]
struct Motion { dir: Direction, steps: usize }

type Pos = [i32; 2];

struct Rope {
	knots: Vec<Pos>,
}

impl Direction {
	fn delta(self) -> Pos {
		match self {
			Direction::Up => [0, 1],
			Direction::Down => [0, -1],
			Direction::Left => [-1, 0],
			Direction::Right => [1, 0],
		}
	}
}

impl Rope {
	fn new(len: usize) -> Self {
		Rope { knots: vec![[0, 0]; len.max(1)] }
	}

	fn tail(&self) -> Pos {
		self.knots[self.knots.len() - 1]
	}

	/// Moves the head one step, each following knot stepping towards the
	/// previous one (diagonally if needed) whenever they no longer touch.
	fn step(&mut self, dir: Direction) {
		let [dx, dy] = dir.delta();
		self.knots[0][0] += dx;
		self.knots[0][1] += dy;

		for i in 1..self.knots.len() {
			let (leader, follower) = (self.knots[i - 1], &mut self.knots[i]);
			let delta = [leader[0] - follower[0], leader[1] - follower[1]];
			if delta[0].abs() <= 1 && delta[1].abs() <= 1 { break }
			follower[0] += delta[0].signum();
			follower[1] += delta[1].signum();
		}
	}
}


fn input_motions_from_str(s: &str) -> Result<Vec<Motion>, parsing::MotionsError> {
	parsing::motions_from_str(s).collect()
}


fn part1and2_impl(input_motions: &[Motion], knots: usize) -> usize {
	let mut rope = Rope::new(knots);
	let mut visited = HashSet::from([rope.tail()]);
	for motion in input_motions {
		for _ in 0..motion.steps {
			rope.step(motion.dir);
			visited.insert(rope.tail());
		}
	}
	visited.len()
}

pub(crate) fn part1(input: &str) -> Result<usize, parsing::MotionsError> {
	Ok(part1and2_impl(&input_motions_from_str(input)?, 2))
}

pub(crate) fn part2(input: &str) -> Result<usize, parsing::MotionsError> {
	Ok(part1and2_impl(&input_motions_from_str(input)?, 10))
}


mod parsing {
	use std::{num::ParseIntError, str::FromStr};
	use super::{Direction, Motion};

	#[derive(Debug, thiserror::Error)]
	pub(crate) enum MotionError {
		#[error("expected `<U|D|L|R> <steps>`")]
		Format,
		#[error("invalid direction {0:?}")]
		Direction(String),
		#[error("invalid steps: {0}")]
		Steps(#[from] ParseIntError),
	}

	impl FromStr for Motion {
		type Err = MotionError;
		fn from_str(s: &str) -> Result<Self, Self::Err> {
			let (dir, steps) = s.split_once(' ').ok_or(MotionError::Format)?;
			let dir = match dir {
				"U" => Direction::Up,
				"D" => Direction::Down,
				"L" => Direction::Left,
				"R" => Direction::Right,
				_ => return Err(MotionError::Direction(dir.to_owned())),
			};
			Ok(Motion { dir, steps: steps.parse()? })
		}
	}

	#[derive(Debug, thiserror::Error)]
	#[error("Invalid motion on line {line}: {source}")]
	pub(crate) struct MotionsError { line: usize, source: MotionError }

	pub(super) fn motions_from_str(s: &str) -> impl Iterator<Item = Result<Motion, MotionsError>> + '_ {
		s.lines()
			.enumerate()
			.filter(|(_, line)| !line.is_empty())
			.map(|(l, line)| line.parse()
				.map_err(|e| MotionsError { line: l + 1, source: e }))
	}
}


#[test]
fn tests() {
	const INPUT: &str = indoc::indoc! { "
		R 4
		U 4
		L 3
		D 1
		R 4
		D 1
		L 5
		R 2
	" };
	const LARGER_INPUT: &str = indoc::indoc! { "
		R 5
		U 8
		L 8
		D 3
		R 17
		D 10
		L 25
		U 20
	" };
	let motions = input_motions_from_str(INPUT).unwrap();
	assert_eq!(motions[1].dir, Direction::Up);
	assert_eq!(part1and2_impl(&motions, 2), 13);
	assert_eq!(part1and2_impl(&motions, 10), 1);
	assert_eq!(part2(LARGER_INPUT).unwrap(), 36);
	assert!(input_motions_from_str("X 1\n").is_err());
}
