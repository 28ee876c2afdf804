// Copyright (c) 2022 Bastiaan Marinus van de Weerd

use std::collections::HashMap;


#[derive(Clone, Copy, PartialEq, Eq)]
#[cfg_attr(test, derive(Debug))]
enum Tile { Void, Open, Wall }

#[derive(Clone, Copy)]
#[cfg_attr(test, derive(Debug, PartialEq, Eq))]
enum Turn { Left, Right }

#[derive(Clone, Copy, PartialEq, Eq)]
#[cfg_attr(test, derive(Debug))]
enum Facing {
	Right = 0,
	Down = 1,
	Left = 2,
	Up = 3,
}

const FACINGS: [Facing; 4] = [Facing::Right, Facing::Down, Facing::Left, Facing::Up];

impl Facing {
	fn turned(self, turn: Turn) -> Facing {
		let quarters = match turn { Turn::Right => 1, Turn::Left => 3 };
		FACINGS[(self as usize + quarters) % 4]
	}

	fn delta(self) -> [isize; 2] {
		match self {
			Facing::Right => [0, 1],
			Facing::Down => [1, 0],
			Facing::Left => [0, -1],
			Facing::Up => [-1, 0],
		}
	}
}

/// Steps forward, after turning first if there's a turn.
#[cfg_attr(test, derive(Debug, PartialEq, Eq))]
struct Move {
	turn: Option<Turn>,
	steps: usize,
}

/// Padded with void so every row is equally wide.
struct Map {
	tiles: Vec<Tile>,
	width: usize,
	height: usize,
}

impl Map {
	fn tile(&self, [row, col]: [usize; 2]) -> Tile {
		if row >= self.height || col >= self.width { return Tile::Void }
		self.tiles[row * self.width + col]
	}

	fn start(&self) -> Option<[usize; 2]> {
		let i = self.tiles.iter().position(|&tile| tile == Tile::Open)?;
		Some([i / self.width, i % self.width])
	}
}


/// Where walking off a tile leads.
trait Topology {
	fn next(&self, pos: [usize; 2], facing: Facing) -> ([usize; 2], Facing);
}

/// Walking off an edge comes back in on the opposite end of the same row or
/// column.
struct Flat {
	rows: Vec<[usize; 2]>,
	cols: Vec<[usize; 2]>,
}

impl Flat {
	fn new(map: &Map) -> Self {
		let bounds = |tiles: &mut dyn Iterator<Item = Tile>| {
			let solid = tiles.enumerate().filter(|&(_, tile)| tile != Tile::Void).map(|(i, _)| i);
			solid.fold(None, |bounds: Option<[usize; 2]>, i| match bounds {
				None => Some([i, i]),
				Some([first, _]) => Some([first, i]),
			}).unwrap_or([0, 0])
		};
		Flat {
			rows: (0..map.height).map(|r| bounds(&mut (0..map.width).map(|c| map.tile([r, c])))).collect(),
			cols: (0..map.width).map(|c| bounds(&mut (0..map.height).map(|r| map.tile([r, c])))).collect(),
		}
	}
}

impl Topology for Flat {
	fn next(&self, [row, col]: [usize; 2], facing: Facing) -> ([usize; 2], Facing) {
		let ([row_first, row_last], [col_first, col_last]) = (self.rows[row], self.cols[col]);
		let pos = match facing {
			Facing::Right => [row, if col >= row_last { row_first } else { col + 1 }],
			Facing::Left => [row, if col <= row_first { row_last } else { col - 1 }],
			Facing::Down => [if row >= col_last { col_first } else { row + 1 }, col],
			Facing::Up => [if row <= col_first { col_last } else { row - 1 }, col],
		};
		(pos, facing)
	}
}


/// Per face, numbered in reading order, and per [`Facing`] walked off it: the
/// face walked onto and the facing after.
type CubeTable = [[(usize, Facing); 4]; 6];

/// Faces' positions in the map, in units of the face size, along with how
/// they fold together.
static KNOWN_CUBES: [([[usize; 2]; 6], CubeTable); 2] = {
	use Facing::*;
	[
		// ..0.
		// 123.
		// ..45
		([[0, 2], [1, 0], [1, 1], [1, 2], [2, 2], [2, 3]], [
			[(5, Left), (3, Down), (2, Down), (1, Down)],
			[(2, Right), (4, Up), (5, Up), (0, Down)],
			[(3, Right), (4, Right), (1, Left), (0, Right)],
			[(5, Down), (4, Down), (2, Left), (0, Up)],
			[(5, Right), (1, Up), (2, Up), (3, Up)],
			[(0, Left), (1, Right), (4, Left), (3, Left)],
		]),
		// .01
		// .2.
		// 34.
		// 5..
		([[0, 1], [0, 2], [1, 1], [2, 0], [2, 1], [3, 0]], [
			[(1, Right), (2, Down), (3, Right), (5, Right)],
			[(4, Left), (2, Left), (0, Left), (5, Up)],
			[(1, Up), (4, Down), (3, Down), (0, Up)],
			[(4, Right), (5, Down), (0, Right), (2, Right)],
			[(1, Left), (5, Left), (3, Left), (2, Up)],
			[(4, Up), (1, Down), (0, Down), (3, Up)],
		]),
	]
};

struct Cube {
	size: usize,
	faces: [[usize; 2]; 6],
	table: &'static CubeTable,
}

impl Cube {
	fn new(map: &Map) -> Result<Self, Error> {
		let area = map.tiles.iter().filter(|&&tile| tile != Tile::Void).count();
		let size = (1..).take_while(|size| 6 * size * size <= area).last().unwrap_or(0);
		if size == 0 || 6 * size * size != area || map.width % size != 0 || map.height % size != 0 {
			return Err(Error::NotACube)
		}

		let faces = (0..map.height / size)
			.flat_map(|r| (0..map.width / size).map(move |c| [r, c]))
			.filter(|&[r, c]| map.tile([r * size, c * size]) != Tile::Void)
			.collect::<Vec<_>>();
		let faces = <[[usize; 2]; 6]>::try_from(faces).map_err(|_| Error::NotACube)?;

		let (_, table) = KNOWN_CUBES.iter()
			.find(|(known, _)| *known == faces)
			.ok_or(Error::UnknownLayout)?;
		tracing::debug!(size, ?faces, "folded cube");
		Ok(Cube { size, faces, table })
	}

	fn face(&self, [row, col]: [usize; 2]) -> Option<usize> {
		self.faces.iter().position(|&face| face == [row / self.size, col / self.size])
	}
}

impl Topology for Cube {
	fn next(&self, pos: [usize; 2], facing: Facing) -> ([usize; 2], Facing) {
		let Some(face) = self.face(pos) else { return (pos, facing) };
		let [dr, dc] = facing.delta();
		let [row, col] = [pos[0] as isize + dr, pos[1] as isize + dc];
		if row >= 0 && col >= 0 {
			let next = [row as usize, col as usize];
			if self.face(next) == Some(face) { return (next, facing) }
		}

		// Position along the edge, as if the next face were unfolded right
		// there, then turned a quarter at a time to match the new facing
		let size = self.size as isize;
		let mut rel = [row.rem_euclid(size) as usize, col.rem_euclid(size) as usize];
		let (next_face, next_facing) = self.table[face][facing as usize];
		let mut turned = facing;
		while turned != next_facing {
			turned = turned.turned(Turn::Right);
			rel = [rel[1], self.size - 1 - rel[0]];
		}
		let [face_row, face_col] = self.faces[next_face];
		([face_row * self.size + rel[0], face_col * self.size + rel[1]], next_facing)
	}
}


struct Walk {
	pos: [usize; 2],
	facing: Facing,
	/// The last facing on every tile visited.
	trail: HashMap<[usize; 2], Facing>,
}

impl Walk {
	fn new(map: &Map, path: &[Move], topology: &impl Topology) -> Result<Self, Error> {
		let pos = map.start().ok_or(Error::NoStart)?;
		let mut walk = Walk { pos, facing: Facing::Right, trail: HashMap::from([(pos, Facing::Right)]) };
		for Move { turn, steps } in path {
			if let Some(turn) = turn {
				walk.facing = walk.facing.turned(*turn);
				walk.trail.insert(walk.pos, walk.facing);
			}
			for _ in 0..*steps {
				let (pos, facing) = topology.next(walk.pos, walk.facing);
				if map.tile(pos) != Tile::Open { break }
				walk.pos = pos;
				walk.facing = facing;
				walk.trail.insert(pos, facing);
			}
		}
		Ok(walk)
	}

	fn password(&self) -> usize {
		1000 * (self.pos[0] + 1) + 4 * (self.pos[1] + 1) + self.facing as usize
	}

	#[cfg(test)]
	fn render(&self, map: &Map) -> String {
		use itertools::Itertools as _;
		(0..map.height)
			.map(|row| (0..map.width)
				.map(|col| match (self.trail.get(&[row, col]), map.tile([row, col])) {
					(Some(Facing::Right), _) => '>',
					(Some(Facing::Down), _) => 'v',
					(Some(Facing::Left), _) => '<',
					(Some(Facing::Up), _) => '^',
					(None, Tile::Void) => ' ',
					(None, Tile::Open) => '.',
					(None, Tile::Wall) => '#',
				})
				.collect::<String>()
				.trim_end()
				.to_owned())
			.join("\n")
	}
}


#[derive(Debug, thiserror::Error)]
pub(crate) enum Error {
	#[error(transparent)]
	Parse(#[from] parsing::NotesError),
	#[error("No open tile to start from")]
	NoStart,
	#[error("The map does not fold into a cube")]
	NotACube,
	#[error("No known way to fold the map's faces into a cube")]
	UnknownLayout,
}


fn input_notes_from_str(s: &str) -> Result<(Map, Vec<Move>), parsing::NotesError> {
	parsing::notes_from_str(s)
}


fn part1_impl((map, path): &(Map, Vec<Move>)) -> Result<Walk, Error> {
	Walk::new(map, path, &Flat::new(map))
}

pub(crate) fn part1(input: &str) -> Result<usize, Error> {
	Ok(part1_impl(&input_notes_from_str(input)?)?.password())
}


fn part2_impl((map, path): &(Map, Vec<Move>)) -> Result<Walk, Error> {
	Walk::new(map, path, &Cube::new(map)?)
}

pub(crate) fn part2(input: &str) -> Result<usize, Error> {
	Ok(part2_impl(&input_notes_from_str(input)?)?.password())
}


mod parsing {
	use std::num::ParseIntError;
	use super::{Map, Move, Tile, Turn};

	#[derive(Debug, thiserror::Error)]
	pub(crate) enum PathError {
		#[error("unexpected {found:?} at column {column}")]
		Unexpected { column: usize, found: char },
		#[error("invalid number of steps: {0}")]
		Steps(#[from] ParseIntError),
		#[error("turn without steps at the end")]
		DanglingTurn,
	}

	#[derive(Debug, thiserror::Error)]
	pub(crate) enum NotesError {
		#[error("Invalid tile {found:?} on line {line}, column {column}")]
		Tile { line: usize, column: usize, found: char },
		#[error("Invalid path on line {line}: {source}")]
		Path { line: usize, source: PathError },
		#[error("Missing path after the map")]
		MissingPath,
	}

	fn path_from_str(s: &str) -> Result<Vec<Move>, PathError> {
		let mut path = Vec::new();
		let (mut turn, mut digits_start) = (None, None);
		for (c, chr) in s.char_indices().chain([(s.len(), ' ')]) {
			if chr.is_ascii_digit() {
				digits_start.get_or_insert(c);
				continue
			}
			if let Some(start) = digits_start.take() {
				path.push(Move { turn: turn.take(), steps: s[start..c].parse()? });
			}
			if c == s.len() { break }
			turn = match (chr, turn) {
				('L', None) if c > 0 => Some(Turn::Left),
				('R', None) if c > 0 => Some(Turn::Right),
				(found, _) => return Err(PathError::Unexpected { column: c + 1, found }),
			};
		}
		if turn.is_some() { return Err(PathError::DanglingTurn) }
		Ok(path)
	}

	pub(super) fn notes_from_str(s: &str) -> Result<(Map, Vec<Move>), NotesError> {
		let mut lines = s.lines().enumerate();
		let rows = lines.by_ref()
			.take_while(|(_, line)| !line.is_empty())
			.map(|(l, line)| line.chars()
				.enumerate()
				.map(|(c, chr)| match chr {
					' ' => Ok(Tile::Void),
					'.' => Ok(Tile::Open),
					'#' => Ok(Tile::Wall),
					found => Err(NotesError::Tile { line: l + 1, column: c + 1, found }),
				})
				.collect::<Result<Vec<_>, _>>())
			.collect::<Result<Vec<_>, _>>()?;

		let width = rows.iter().map(Vec::len).max().unwrap_or(0);
		let height = rows.len();
		let tiles = rows.into_iter()
			.flat_map(|row| {
				let padding = width - row.len();
				row.into_iter().chain(std::iter::repeat(Tile::Void).take(padding))
			})
			.collect();

		let (l, line) = lines.find(|(_, line)| !line.is_empty()).ok_or(NotesError::MissingPath)?;
		let path = path_from_str(line.trim_end()).map_err(|e| NotesError::Path { line: l + 1, source: e })?;
		Ok((Map { tiles, width, height }, path))
	}
}


#[test]
fn tests() {
	const INPUT: &str = indoc::indoc! { "
		        ...#
		        .#..
		        #...
		        ....
		...#.......#
		........#...
		..#....#....
		..........#.
		        ...#....
		        .....#..
		        .#......
		        ......#.

		10R5L5R10L4R5L5
	" };
	let notes = input_notes_from_str(INPUT).unwrap();
	assert_eq!([notes.0.width, notes.0.height], [16, 12]);
	assert_eq!(notes.1.len(), 7);
	assert_eq!(notes.1[..2], [Move { turn: None, steps: 10 }, Move { turn: Some(Turn::Right), steps: 5 }]);
	assert_eq!(notes.0.start(), Some([0, 8]));

	assert_eq!(Facing::Right.turned(Turn::Right), Facing::Down);
	assert_eq!(Facing::Right.turned(Turn::Left), Facing::Up);

	let walk = part1_impl(&notes).unwrap();
	assert_eq!(walk.render(&notes.0), indoc::indoc! { "
		        >>v#
		        .#v.
		        #.v.
		        ..v.
		...#...v..v#
		>>>v...>#.>>
		..#v...#....
		...>>>>v..#.
		        ...#....
		        .....#..
		        .#......
		        ......#." });
	assert_eq!(walk.password(), 6032);

	let walk = part2_impl(&notes).unwrap();
	assert_eq!(walk.render(&notes.0), indoc::indoc! { "
		        >>v#
		        .#v.
		        #.v.
		        ..v.
		...#..^...v#
		.>>>>>^.#.>>
		.^#....#....
		.^........#.
		        ...#..v.
		        .....#v.
		        .#v<<<<.
		        ..v...#." });
	assert_eq!(walk.password(), 5031);

	// Walking off an edge and straight back returns to the same edge
	for (_, table) in &KNOWN_CUBES {
		for face in 0..6 {
			for facing in FACINGS {
				let (next_face, next_facing) = table[face][facing as usize];
				let back = table[next_face][next_facing.turned(Turn::Right).turned(Turn::Right) as usize];
				assert_eq!(back, (face, facing.turned(Turn::Left).turned(Turn::Left)));
			}
		}
	}

	assert!(matches!(part2_impl(&input_notes_from_str("......\n\n1\n").unwrap()), Err(Error::UnknownLayout)));
	assert!(matches!(part2_impl(&input_notes_from_str("...\n\n1\n").unwrap()), Err(Error::NotACube)));
	assert!(matches!(input_notes_from_str("..x\n\n1\n"),
		Err(parsing::NotesError::Tile { line: 1, column: 3, found: 'x' })));
	assert!(matches!(input_notes_from_str("...\n\n1R\n"),
		Err(parsing::NotesError::Path { line: 3, source: parsing::PathError::DanglingTurn })));
	assert!(matches!(input_notes_from_str("...\n"), Err(parsing::NotesError::MissingPath)));
}
