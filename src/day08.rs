// Copyright (c) 2022 Bastiaan Marinus van de Weerd


#[derive(Clone, Copy)]
enum Direction { Up, Down, Left, Right }

impl Direction {
	const ALL: [Direction; 4] = [Direction::Up, Direction::Down, Direction::Left, Direction::Right];
}

#[cfg_attr(test, derive(Debug))]
struct Grid {
	tree_heights: Vec<u8>,
	width: usize,
	height: usize,
}

impl Grid {
	fn tree_height(&self, (x, y): (usize, usize)) -> u8 {
		self.tree_heights[y * self.width + x]
	}

	/// Positions from (but excluding) `from` towards the edge in `dir`.
	fn sightline(&self, from: (usize, usize), dir: Direction) -> impl Iterator<Item = (usize, usize)> {
		let (width, height) = (self.width, self.height);
		std::iter::successors(Some(from), move |&(x, y)| match dir {
			Direction::Up => y.checked_sub(1).map(|y| (x, y)),
			Direction::Down => (y + 1 < height).then_some((x, y + 1)),
			Direction::Left => x.checked_sub(1).map(|x| (x, y)),
			Direction::Right => (x + 1 < width).then_some((x + 1, y)),
		}).skip(1)
	}

	/// Lines of positions as seen from the edge opposite `dir`, sweeping in `dir`.
	fn sweeps(&self, dir: Direction) -> Vec<Vec<(usize, usize)>> {
		let (width, height) = (self.width, self.height);
		let starts: Vec<_> = match dir {
			Direction::Down => (0..width).map(|x| (x, 0)).collect(),
			Direction::Up => (0..width).map(|x| (x, height - 1)).collect(),
			Direction::Right => (0..height).map(|y| (0, y)).collect(),
			Direction::Left => (0..height).map(|y| (width - 1, y)).collect(),
		};
		starts.into_iter()
			.map(|start| std::iter::once(start).chain(self.sightline(start, dir)).collect())
			.collect()
	}
}


fn input_grid_from_str(s: &str) -> Result<Grid, parsing::GridError> {
	s.parse()
}


fn part1_impl(input_grid: &Grid) -> usize {
	let mut visible = vec![false; input_grid.tree_heights.len()];
	for dir in Direction::ALL {
		for sweep in input_grid.sweeps(dir) {
			let mut highest = None;
			for pos in sweep {
				let height = input_grid.tree_height(pos);
				if highest.map_or(true, |h| height > h) {
					visible[pos.1 * input_grid.width + pos.0] = true;
					highest = Some(height);
				}
			}
		}
	}
	visible.into_iter().filter(|&v| v).count()
}

pub(crate) fn part1(input: &str) -> Result<usize, parsing::GridError> {
	Ok(part1_impl(&input_grid_from_str(input)?))
}


fn scenic_score(grid: &Grid, pos: (usize, usize)) -> usize {
	use itertools::Itertools as _;

	let height = grid.tree_height(pos);
	Direction::ALL.into_iter()
		.map(|dir| {
			let mut sightline = grid.sightline(pos, dir).peekable();
			let lower = sightline
				.peeking_take_while(|&other| grid.tree_height(other) < height)
				.count();
			// The blocking tree is visible too
			lower + if sightline.next().is_some() { 1 } else { 0 }
		})
		.product()
}

fn part2_impl(input_grid: &Grid) -> usize {
	use itertools::iproduct;

	iproduct!(0..input_grid.height, 0..input_grid.width)
		.map(|(y, x)| scenic_score(input_grid, (x, y)))
		.max()
		.unwrap_or(0)
}

pub(crate) fn part2(input: &str) -> Result<usize, parsing::GridError> {
	Ok(part2_impl(&input_grid_from_str(input)?))
}


mod parsing {
	use std::str::FromStr;
	use super::Grid;

	#[derive(Debug, thiserror::Error)]
	pub(crate) enum GridError {
		#[error("Empty grid")]
		Empty,
		#[error("Invalid tree height {found:?} at line {line}, column {column}")]
		InvalidHeight { line: usize, column: usize, found: char },
		#[error("Line {line} has {len} trees instead of {width}")]
		Ragged { line: usize, len: usize, width: usize },
	}

	impl FromStr for Grid {
		type Err = GridError;
		fn from_str(s: &str) -> Result<Self, Self::Err> {
			let mut tree_heights = vec![];
			let mut width = None;
			let mut height = 0;
			for (l, line) in s.lines().enumerate() {
				if line.is_empty() { continue }
				let w = *width.get_or_insert(line.len());
				if line.len() != w {
					return Err(GridError::Ragged { line: l + 1, len: line.len(), width: w })
				}
				for (c, b) in line.bytes().enumerate() {
					if !b.is_ascii_digit() {
						return Err(GridError::InvalidHeight { line: l + 1, column: c + 1, found: b as char })
					}
					tree_heights.push(b - b'0');
				}
				height += 1;
			}
			let width = width.ok_or(GridError::Empty)?;
			Ok(Grid { tree_heights, width, height })
		}
	}
}


#[test]
fn tests() {
	const INPUT: &str = indoc::indoc! { "
		30373
		25512
		65332
		33549
		35390
	" };
	let grid = input_grid_from_str(INPUT).unwrap();
	assert_eq!((grid.width, grid.height), (5, 5));
	assert_eq!(part1_impl(&grid), 21);
	assert_eq!(scenic_score(&grid, (2, 1)), 4);
	assert_eq!(scenic_score(&grid, (2, 3)), 8);
	assert_eq!(scenic_score(&grid, (0, 2)), 0);
	assert_eq!(part2_impl(&grid), 8);

	assert!(matches!(input_grid_from_str("12\n3\n"), Err(parsing::GridError::Ragged { line: 2, .. })));
	assert!(matches!(input_grid_from_str(""), Err(parsing::GridError::Empty)));
}
