// Copyright (c) 2022 Bastiaan Marinus van de Weerd

use std::collections::HashMap;


#[derive(Clone, Copy, PartialEq, Eq)]
#[cfg_attr(test, derive(Debug))]
enum Dir { North, East, South, West }

impl Dir {
	fn step(self, [row, col]: [usize; 2]) -> Option<[usize; 2]> {
		Some(match self {
			Dir::North => [row.checked_sub(1)?, col],
			Dir::East => [row, col + 1],
			Dir::South => [row + 1, col],
			Dir::West => [row, col.checked_sub(1)?],
		})
	}
}

struct Valley {
	/// Including walls.
	width: usize,
	height: usize,
	walls: Vec<bool>,
	blizzards: Vec<([usize; 2], Dir)>,
	entrance: [usize; 2],
	exit: [usize; 2],
}

fn gcd(a: usize, b: usize) -> usize {
	if b == 0 { a } else { gcd(b, a % b) }
}

impl Valley {
	/// Minutes after which every blizzard is back where it started.
	fn period(&self) -> usize {
		let [inner_width, inner_height] = [self.width - 2, self.height - 2];
		inner_width / gcd(inner_width, inner_height) * inner_height
	}

	fn blizzard_at(&self, ([row, col], dir): ([usize; 2], Dir), time: usize) -> [usize; 2] {
		// Blizzards wrap around within the walls
		let [inner_width, inner_height] = [self.width - 2, self.height - 2];
		let [row, col] = [row - 1, col - 1];
		let [row, col] = match dir {
			Dir::North => [(row + inner_height - time % inner_height) % inner_height, col],
			Dir::East => [row, (col + time) % inner_width],
			Dir::South => [(row + time) % inner_height, col],
			Dir::West => [row, (col + inner_width - time % inner_width) % inner_width],
		};
		[row + 1, col + 1]
	}

	/// For every minute of a period, which positions are walls or blizzards.
	fn layouts(&self) -> Vec<Vec<bool>> {
		(0..self.period())
			.map(|time| {
				let mut blocked = self.walls.clone();
				for &blizzard in &self.blizzards {
					let [row, col] = self.blizzard_at(blizzard, time);
					blocked[row * self.width + col] = true;
				}
				blocked
			})
			.collect()
	}

	#[cfg(test)]
	fn render(&self, time: usize) -> String {
		use itertools::Itertools as _;
		let at = (0..self.height * self.width)
			.map(|_| Vec::new())
			.collect::<Vec<Vec<Dir>>>();
		let at = self.blizzards.iter().fold(at, |mut at, &blizzard| {
			let [row, col] = self.blizzard_at(blizzard, time);
			at[row * self.width + col].push(blizzard.1);
			at
		});
		(0..self.height)
			.map(|row| (0..self.width)
				.map(|col| match at[row * self.width + col][..] {
					_ if self.walls[row * self.width + col] => '#',
					[] => '.',
					[Dir::North] => '^',
					[Dir::East] => '>',
					[Dir::South] => 'v',
					[Dir::West] => '<',
					ref many => char::from_digit(many.len().min(9) as u32, 10).unwrap_or('9'),
				})
				.collect::<String>())
			.join("\n")
	}
}

fn manhattan_distance(a: [usize; 2], b: [usize; 2]) -> usize {
	a[0].abs_diff(b[0]) + a[1].abs_diff(b[1])
}


/// Depth-first, trying moves towards the current goal first. A state is
/// skipped when its position was already reached in the same stage at the
/// same point of the blizzards' period at or before its time, or when even a
/// straight walk through the remaining stages couldn't beat the best time.
fn fastest_route(valley: &Valley, stages: usize) -> Option<usize> {
	let layouts = valley.layouts();
	let period = layouts.len();
	let crossing = manhattan_distance(valley.entrance, valley.exit);
	let goal = |stage: usize| if stage % 2 == 0 { valley.exit } else { valley.entrance };

	let mut best = None::<usize>;
	let mut visited = HashMap::<(usize, usize, [usize; 2]), usize>::new();
	let mut stack = vec![(0, 0, valley.entrance)];

	while let Some((time, mut stage, pos)) = stack.pop() {
		if pos == goal(stage) {
			stage += 1;
			if stage == stages {
				if best.map_or(true, |best| time < best) { best = Some(time) }
				continue
			}
		}

		let earliest = visited.entry((stage, time % period, pos)).or_insert(usize::MAX);
		if *earliest <= time { continue }
		*earliest = time;

		let bound = time + manhattan_distance(pos, goal(stage)) + crossing * (stages - 1 - stage);
		if best.map_or(false, |best| bound > best) { continue }

		let next = &layouts[(time + 1) % period];
		let open = |pos: [usize; 2]| pos[0] < valley.height && pos[1] < valley.width
			&& !next[pos[0] * valley.width + pos[1]];
		let dirs = if stage % 2 == 0 {
			[Dir::South, Dir::East, Dir::North, Dir::West]
		} else {
			[Dir::North, Dir::West, Dir::South, Dir::East]
		};

		// Pushed in reverse, so that they're popped in order
		if open(pos) { stack.push((time + 1, stage, pos)) }
		for dir in dirs.into_iter().rev() {
			if let Some(next_pos) = dir.step(pos).filter(|&next_pos| open(next_pos)) {
				stack.push((time + 1, stage, next_pos));
			}
		}
	}

	tracing::debug!(stages, period, states = visited.len(), ?best, "route search finished");
	best
}


#[derive(Debug, thiserror::Error)]
pub(crate) enum Error {
	#[error(transparent)]
	Parse(#[from] parsing::ValleyError),
	#[error("No route through the blizzards")]
	NoRoute,
}


fn input_valley_from_str(s: &str) -> Result<Valley, parsing::ValleyError> {
	s.parse()
}


fn part1and2_impl(input_valley: &Valley, stages: usize) -> Result<usize, Error> {
	fastest_route(input_valley, stages).ok_or(Error::NoRoute)
}

pub(crate) fn part1(input: &str) -> Result<usize, Error> {
	part1and2_impl(&input_valley_from_str(input)?, 1)
}

pub(crate) fn part2(input: &str) -> Result<usize, Error> {
	part1and2_impl(&input_valley_from_str(input)?, 3)
}


mod parsing {
	use std::str::FromStr;
	use super::{Dir, Valley};

	#[derive(Debug, thiserror::Error)]
	pub(crate) enum ValleyError {
		#[error("Invalid tile {found:?} on line {line}, column {column}")]
		Tile { line: usize, column: usize, found: char },
		#[error("Line {0} is not as wide as the first")]
		Ragged(usize),
		#[error("The valley is too small")]
		TooSmall,
		#[error("Expected a single opening in the top & bottom walls")]
		Openings,
		#[error("Blizzard on line {line}, column {column} is on the walls' rows or columns")]
		Blizzard { line: usize, column: usize },
	}

	impl FromStr for Valley {
		type Err = ValleyError;
		fn from_str(s: &str) -> Result<Self, Self::Err> {
			let rows = s.lines().filter(|line| !line.is_empty()).collect::<Vec<_>>();
			let width = rows.first().map_or(0, |row| row.len());
			let height = rows.len();
			if width < 3 || height < 3 { return Err(ValleyError::TooSmall) }

			let mut walls = Vec::with_capacity(width * height);
			let mut blizzards = Vec::new();
			for (r, row) in rows.iter().enumerate() {
				if row.chars().count() != width { return Err(ValleyError::Ragged(r + 1)) }
				for (c, chr) in row.chars().enumerate() {
					let dir = match chr {
						'#' => { walls.push(true); continue }
						'.' => { walls.push(false); continue }
						'^' => Dir::North,
						'>' => Dir::East,
						'v' => Dir::South,
						'<' => Dir::West,
						found => return Err(ValleyError::Tile { line: r + 1, column: c + 1, found }),
					};
					if r == 0 || r == height - 1 || c == 0 || c == width - 1 {
						return Err(ValleyError::Blizzard { line: r + 1, column: c + 1 })
					}
					walls.push(false);
					blizzards.push(([r, c], dir));
				}
			}

			let opening = |r: usize| {
				let mut open = (0..width).filter(|&c| !walls[r * width + c]);
				match (open.next(), open.next()) {
					(Some(c), None) => Ok([r, c]),
					_ => Err(ValleyError::Openings),
				}
			};
			let (entrance, exit) = (opening(0)?, opening(height - 1)?);
			Ok(Valley { width, height, walls, blizzards, entrance, exit })
		}
	}
}


#[test]
fn tests() {
	const INPUT: &str = indoc::indoc! { "
		#.######
		#>>.<^<#
		#.<..<<#
		#>v.><>#
		#<^v^^>#
		######.#
	" };
	let simple = input_valley_from_str(indoc::indoc! { "
		#.#####
		#.....#
		#>....#
		#.....#
		#...v.#
		#.....#
		#####.#
	" }).unwrap();
	assert_eq!(simple.period(), 5);
	assert_eq!(simple.render(3), indoc::indoc! { "
		#.#####
		#.....#
		#...2.#
		#.....#
		#.....#
		#.....#
		#####.#" });

	let valley = input_valley_from_str(INPUT).unwrap();
	assert_eq!([valley.entrance, valley.exit], [[0, 1], [5, 6]]);
	assert_eq!(valley.period(), 12);
	assert_eq!(valley.render(0), INPUT.trim_end());
	assert_eq!(valley.render(valley.period()), INPUT.trim_end());
	assert_eq!(valley.render(1), indoc::indoc! { "
		#.######
		#.>3.<.#
		#<..<<.#
		#>2.22.#
		#>v..^<#
		######.#" });

	assert_eq!(part1and2_impl(&valley, 1).unwrap(), 18);
	assert_eq!(part1and2_impl(&valley, 3).unwrap(), 54);

	let walled_in = input_valley_from_str("#.###\n#>>>#\n#>>>#\n###.#\n").unwrap();
	assert!(matches!(part1and2_impl(&walled_in, 1), Err(Error::NoRoute)));
	assert!(matches!(input_valley_from_str("#.##\n#..\n##.#\n"), Err(parsing::ValleyError::Ragged(2))));
	assert!(matches!(input_valley_from_str("#.##\n#.x#\n##.#\n"),
		Err(parsing::ValleyError::Tile { line: 2, column: 3, found: 'x' })));
}
