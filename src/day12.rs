// Copyright (c) 2022 Bastiaan Marinus van de Weerd


#[cfg_attr(test, derive(Debug))]
struct Heightmap {
	heights: Vec<u8>,
	width: usize,
	start: usize,
	end: usize,
}

impl Heightmap {
	fn neighbors(&self, pos: usize) -> impl Iterator<Item = usize> {
		let (w, len) = (self.width, self.heights.len());
		let up = pos.checked_sub(w);
		let left = (pos % w > 0).then(|| pos - 1);
		let right = (pos % w < w - 1).then(|| pos + 1);
		let down = (pos + w < len).then(|| pos + w);
		[up, left, right, down].into_iter().flatten()
	}

	/// Steps needed from each position to reach the end, if reachable at all.
	/// Walks edges in reverse: from `pos` one can go back to any neighbor
	/// from which `pos` is at most one unit higher.
	fn distances_to_end(&self) -> Vec<Option<usize>> {
		let mut distances = vec![None; self.heights.len()];
		distances[self.end] = Some(0);

		let mut frontier = vec![self.end];
		let mut steps = 0;
		while !frontier.is_empty() {
			steps += 1;
			let mut next = vec![];
			for pos in frontier {
				for neighbor in self.neighbors(pos) {
					if distances[neighbor].is_some() { continue }
					if self.heights[pos] > self.heights[neighbor] + 1 { continue }
					distances[neighbor] = Some(steps);
					next.push(neighbor);
				}
			}
			frontier = next;
		}

		tracing::debug!(levels = steps, "explored heightmap");
		distances
	}
}


#[derive(Debug, thiserror::Error)]
pub(crate) enum Error {
	#[error(transparent)]
	Parse(#[from] parsing::HeightmapError),
	#[error("The end cannot be reached from the start")]
	Unreachable,
}


fn input_heightmap_from_str(s: &str) -> Result<Heightmap, parsing::HeightmapError> {
	s.parse()
}


fn part1_impl(input_heightmap: &Heightmap) -> Result<usize, Error> {
	input_heightmap.distances_to_end()[input_heightmap.start].ok_or(Error::Unreachable)
}

pub(crate) fn part1(input: &str) -> Result<usize, Error> {
	part1_impl(&input_heightmap_from_str(input)?)
}


fn part2_impl(input_heightmap: &Heightmap) -> Result<usize, Error> {
	input_heightmap.distances_to_end().into_iter()
		.zip(&input_heightmap.heights)
		.filter_map(|(distance, &height)| (height == 0).then_some(distance).flatten())
		.min()
		.ok_or(Error::Unreachable)
}

pub(crate) fn part2(input: &str) -> Result<usize, Error> {
	part2_impl(&input_heightmap_from_str(input)?)
}


mod parsing {
	use std::str::FromStr;
	use super::Heightmap;

	#[derive(Debug, thiserror::Error)]
	pub(crate) enum HeightmapError {
		#[error("Line {line} has length {found} instead of {len}")]
		LineLen { line: usize, len: usize, found: usize },
		#[error("Invalid height {found:?} at line {line}, column {column}")]
		InvalidByte { line: usize, column: usize, found: char },
		#[error("Second start at line {line}, column {column}")]
		DuplicateStart { line: usize, column: usize },
		#[error("Second end at line {line}, column {column}")]
		DuplicateEnd { line: usize, column: usize },
		#[error("No start")]
		NoStart,
		#[error("No end")]
		NoEnd,
	}

	impl FromStr for Heightmap {
		type Err = HeightmapError;
		fn from_str(s: &str) -> Result<Self, Self::Err> {
			let mut heights = vec![];
			let mut width = None;
			let mut start = None;
			let mut end = None;

			for (l, line) in s.lines().enumerate() {
				if line.is_empty() { continue }
				let len = *width.get_or_insert(line.len());
				if line.len() != len {
					return Err(HeightmapError::LineLen { line: l + 1, len, found: line.len() })
				}

				for (c, b) in line.bytes().enumerate() {
					let (line, column) = (l + 1, c + 1);
					let height = match b {
						b'S' if start.is_some() => return Err(HeightmapError::DuplicateStart { line, column }),
						b'E' if end.is_some() => return Err(HeightmapError::DuplicateEnd { line, column }),
						b'S' => { start = Some(heights.len()); 0 }
						b'E' => { end = Some(heights.len()); 25 }
						b'a'..=b'z' => b - b'a',
						_ => return Err(HeightmapError::InvalidByte { line, column, found: b as char }),
					};
					heights.push(height);
				}
			}

			Ok(Heightmap {
				heights,
				width: width.unwrap_or(0),
				start: start.ok_or(HeightmapError::NoStart)?,
				end: end.ok_or(HeightmapError::NoEnd)?,
			})
		}
	}
}


#[test]
fn tests() {
	const INPUT: &str = indoc::indoc! { "
		Sabqponm
		abcryxxl
		accszExk
		acctuvwj
		abdefghi
	" };
	let heightmap = input_heightmap_from_str(INPUT).unwrap();
	assert_eq!((heightmap.width, heightmap.start, heightmap.end), (8, 0, 21));
	assert_eq!(part1_impl(&heightmap).unwrap(), 31);
	assert_eq!(part2_impl(&heightmap).unwrap(), 29);

	assert!(matches!(part1("SzE\n"), Err(Error::Unreachable)));
	assert!(matches!(input_heightmap_from_str("SaE\nSaa\n"),
		Err(parsing::HeightmapError::DuplicateStart { line: 2, column: 1 })));
}
