// Copyright (c) 2022 Bastiaan Marinus van de Weerd


const SOURCE: [usize; 2] = [500, 0];


#[derive(Clone, Copy, PartialEq, Eq)]
enum Tile { Air, Rock, Sand }

/// A line of rock through the given points, horizontal or vertical between
/// consecutive points.
#[cfg_attr(test, derive(Debug))]
struct Path(Vec<[usize; 2]>);

struct Cave {
	// Dense, spanning every column sand can ever reach, plus one either side
	tiles: Vec<Tile>,
	x_min: usize,
	width: usize,
	max_y: usize,
	floor: bool,
}

impl Cave {
	fn new(paths: &[Path], floor: bool) -> Self {
		use itertools::Itertools as _;

		let points = || paths.iter().flat_map(|path| path.0.iter());
		let max_y = points().map(|&[_, y]| y).max().unwrap_or(0);
		let (rock_x_min, rock_x_max) = points()
			.map(|&[x, _]| x)
			.minmax()
			.into_option()
			.unwrap_or((SOURCE[0], SOURCE[0]));
		let spread = max_y + 2;
		let x_min = rock_x_min.min(SOURCE[0].saturating_sub(spread)).saturating_sub(1);
		let x_max = rock_x_max.max(SOURCE[0] + spread) + 1;
		let width = x_max - x_min + 1;

		let mut cave = Cave { tiles: vec![Tile::Air; width * (max_y + 3)], x_min, width, max_y, floor };
		for path in paths {
			for (&[x0, y0], &[x1, y1]) in path.0.iter().tuple_windows() {
				for y in y0.min(y1)..=y0.max(y1) {
					for x in x0.min(x1)..=x0.max(x1) {
						*cave.tile_mut([x, y]) = Tile::Rock;
					}
				}
			}
		}
		cave
	}

	fn floor_y(&self) -> usize {
		self.max_y + 2
	}

	fn tile(&self, [x, y]: [usize; 2]) -> Tile {
		if self.floor && y == self.floor_y() { return Tile::Rock }
		self.tiles[y * self.width + x - self.x_min]
	}

	fn tile_mut(&mut self, [x, y]: [usize; 2]) -> &mut Tile {
		&mut self.tiles[y * self.width + x - self.x_min]
	}

	/// Drops a unit of sand from the source, returning where it came to rest,
	/// or `None` if it fell past the lowest rock (without a floor) or the
	/// source is already blocked.
	fn drop_sand(&mut self) -> Option<[usize; 2]> {
		if self.tile(SOURCE) != Tile::Air { return None }

		let [mut x, mut y] = SOURCE;
		loop {
			if !self.floor && y >= self.max_y { return None }
			let below = [x, x - 1, x + 1].into_iter()
				.map(|x| [x, y + 1])
				.find(|&pos| self.tile(pos) == Tile::Air);
			match below {
				Some(pos) => [x, y] = pos,
				None => break,
			}
		}

		*self.tile_mut([x, y]) = Tile::Sand;
		Some([x, y])
	}

	/// Drops sand until no more comes to rest, returning how many units did.
	fn pour(&mut self) -> usize {
		std::iter::from_fn(|| self.drop_sand()).count()
	}

	#[cfg(test)]
	fn render(&self, margin: usize) -> String {
		use itertools::Itertools as _;

		let rows = if self.floor { self.floor_y() + 1 } else { self.max_y + 1 };
		let (x_min, x_max) = (0..self.max_y + 3)
			.flat_map(|y| (self.x_min..self.x_min + self.width).map(move |x| [x, y]))
			.filter(|&[x, y]| self.tiles[y * self.width + x - self.x_min] != Tile::Air)
			.map(|[x, _]| x)
			.chain([SOURCE[0]])
			.minmax()
			.into_option()
			.unwrap_or((SOURCE[0], SOURCE[0]));

		(0..rows)
			.map(|y| (x_min - margin..=x_max + margin)
				.map(|x| match self.tile([x, y]) {
					Tile::Air if [x, y] == SOURCE => '+',
					Tile::Air => '.',
					Tile::Rock => '#',
					Tile::Sand => 'o',
				})
				.collect::<String>())
			.join("\n")
	}
}


#[derive(Debug, thiserror::Error)]
pub(crate) enum Error {
	#[error(transparent)]
	Parse(#[from] parsing::PathsError),
	#[error("No rock paths")]
	NoRocks,
}


fn input_paths_from_str(s: &str) -> Result<Vec<Path>, parsing::PathsError> {
	parsing::paths_from_str(s).collect()
}


fn part1and2_impl(input_paths: &[Path], floor: bool) -> Result<usize, Error> {
	if input_paths.is_empty() { return Err(Error::NoRocks) }
	Ok(Cave::new(input_paths, floor).pour())
}

pub(crate) fn part1(input: &str) -> Result<usize, Error> {
	part1and2_impl(&input_paths_from_str(input)?, false)
}

pub(crate) fn part2(input: &str) -> Result<usize, Error> {
	part1and2_impl(&input_paths_from_str(input)?, true)
}


mod parsing {
	use std::{num::ParseIntError, str::FromStr};
	use itertools::Itertools as _;
	use super::Path;

	#[derive(Debug, thiserror::Error)]
	pub(crate) enum PathError {
		#[error("expected `<x>,<y>`, found {0:?}")]
		Point(String),
		#[error("invalid coordinate: {0}")]
		Coordinate(#[from] ParseIntError),
		#[error("segment {0:?} -> {1:?} is diagonal")]
		Diagonal([usize; 2], [usize; 2]),
	}

	impl FromStr for Path {
		type Err = PathError;
		fn from_str(s: &str) -> Result<Self, Self::Err> {
			let points = s.split(" -> ")
				.map(|point| -> Result<[usize; 2], PathError> {
					let (x, y) = point.split_once(',').ok_or_else(|| PathError::Point(point.to_owned()))?;
					Ok([x.trim().parse()?, y.trim().parse()?])
				})
				.collect::<Result<Vec<_>, _>>()?;
			if let Some((&a, &b)) = points.iter().tuple_windows().find(|(a, b)| a[0] != b[0] && a[1] != b[1]) {
				return Err(PathError::Diagonal(a, b))
			}
			Ok(Path(points))
		}
	}

	#[derive(Debug, thiserror::Error)]
	#[error("Invalid rock path on line {line}: {source}")]
	pub(crate) struct PathsError { line: usize, source: PathError }

	pub(super) fn paths_from_str(s: &str) -> impl Iterator<Item = Result<Path, PathsError>> + '_ {
		s.lines()
			.enumerate()
			.filter(|(_, line)| !line.is_empty())
			.map(|(l, line)| line.parse()
				.map_err(|e| PathsError { line: l + 1, source: e }))
	}
}


#[test]
fn tests() {
	const INPUT: &str = indoc::indoc! { "
		498,4 -> 498,6 -> 496,6
		503,4 -> 502,4 -> 502,9 -> 494,9
	" };
	let paths = input_paths_from_str(INPUT).unwrap();
	assert_eq!(Cave::new(&paths, false).render(0), indoc::indoc! { "
		......+...
		..........
		..........
		..........
		....#...##
		....#...#.
		..###...#.
		........#.
		........#.
		#########." });
	assert_eq!(Cave::new(&paths, true).render(0), indoc::indoc! { "
		......+...
		..........
		..........
		..........
		....#...##
		....#...#.
		..###...#.
		........#.
		........#.
		#########.
		..........
		##########" });
	assert_eq!(part1and2_impl(&paths, false).unwrap(), 24);

	let mut cave = Cave::new(&paths, true);
	assert_eq!(cave.pour(), 93);
	assert_eq!(cave.render(1), indoc::indoc! { "
		...........o...........
		..........ooo..........
		.........ooooo.........
		........ooooooo........
		.......oo#ooo##o.......
		......ooo#ooo#ooo......
		.....oo###ooo#oooo.....
		....oooo.oooo#ooooo....
		...oooooooooo#oooooo...
		..ooo#########ooooooo..
		.ooooo.......ooooooooo.
		#######################" });

	assert!(input_paths_from_str("1,1 -> 2,2\n").is_err());
	assert!(matches!(part1(""), Err(Error::NoRocks)));
}
