// Copyright (c) 2022 Bastiaan Marinus van de Weerd

use std::collections::HashMap;


/// Rows of the 7-wide chamber are bit vectors, the leftmost column being the
/// highest bit.
const FULL_ROW: u8 = 0b111_1111;
const LEFT_WALL: u8 = 0b100_0000;
const RIGHT_WALL: u8 = 0b000_0001;

/// Rock shapes, bottom row first, already two units away from the left wall.
const SHAPES: [&[u8]; 5] = [
	&[0b0011110],
	&[0b0001000, 0b0011100, 0b0001000],
	&[0b0011100, 0b0000100, 0b0000100],
	&[0b0010000; 4],
	&[0b0011000, 0b0011000],
];

/// Gives up on finding a repeating state after this many rocks.
const CYCLE_SEARCH_LIMIT: u64 = 1_000_000;


#[derive(Clone, Copy)]
#[cfg_attr(test, derive(Debug, PartialEq, Eq))]
enum Jet { Left, Right }

#[derive(Clone, Copy)]
struct Rock {
	rows: [u8; 4],
	len: usize,
	bottom: usize,
}

impl Rock {
	fn rows(&self) -> &[u8] {
		&self.rows[..self.len]
	}

	fn pushed(&self, jet: Jet) -> Option<Rock> {
		let mut rock = *self;
		for row in &mut rock.rows[..self.len] {
			*row = match jet {
				Jet::Left if *row & LEFT_WALL == 0 => *row << 1,
				Jet::Right if *row & RIGHT_WALL == 0 => *row >> 1,
				_ => return None,
			}
		}
		Some(rock)
	}

	fn dropped(&self) -> Rock {
		Rock { bottom: self.bottom - 1, ..*self }
	}
}

struct Chamber {
	/// Row 0 is the floor.
	rows: Vec<u8>,
	height: usize,
}

impl Chamber {
	fn new() -> Self {
		Chamber { rows: vec![FULL_ROW], height: 0 }
	}

	fn fits(&self, rock: &Rock) -> bool {
		rock.rows().iter()
			.enumerate()
			.all(|(i, row)| self.rows.get(rock.bottom + i).copied().unwrap_or(0) & row == 0)
	}

	fn settle(&mut self, rock: &Rock) {
		let top = rock.bottom + rock.len;
		if self.rows.len() < top { self.rows.resize(top, 0) }
		for (i, row) in rock.rows().iter().enumerate() {
			self.rows[rock.bottom + i] |= row;
		}
		self.height = self.height.max(top - 1);
	}
}

/// Cycles through the jets, remembering the index of the last one used.
struct Jets<'a> {
	pattern: &'a [Jet],
	next: usize,
	last: usize,
}

impl Jets<'_> {
	fn push(&mut self, chamber: &Chamber, rock: Rock) -> Rock {
		let jet = self.pattern[self.next];
		self.last = self.next;
		self.next = (self.next + 1) % self.pattern.len();
		rock.pushed(jet).filter(|pushed| chamber.fits(pushed)).unwrap_or(rock)
	}
}


#[derive(Debug, thiserror::Error)]
pub(crate) enum Error {
	#[error(transparent)]
	Parse(#[from] parsing::JetsError),
	#[error("The tower did not repeat itself within {0} rocks")]
	NoCycle(u64),
}


fn input_jets_from_str(s: &str) -> Result<Vec<Jet>, parsing::JetsError> {
	parsing::jets_from_str(s)
}


/// Height of the tower after `count` rocks. When `skip_cycles`, each row that
/// becomes full is remembered along with everything above it and the shape &
/// jet indices; seeing that state again at a greater height means the tower
/// repeats, so whole repetitions are skipped.
fn tower_height(jets: &[Jet], count: u64, skip_cycles: bool) -> Result<u64, Error> {
	let mut chamber = Chamber::new();
	let mut jets = Jets { pattern: jets, next: 0, last: 0 };
	let mut seen = HashMap::<(Vec<u8>, usize, usize), (u64, usize)>::new();
	let mut skipped_height = 0;
	let mut caching = skip_cycles;

	let mut i = 0;
	while i < count {
		let shape = (i % SHAPES.len() as u64) as usize;
		let mut rock = Rock { rows: [0; 4], len: SHAPES[shape].len(), bottom: chamber.height + 4 };
		rock.rows[..rock.len].copy_from_slice(SHAPES[shape]);

		// Nothing can be in the way during the first three drops
		for _ in 0..3 {
			rock = jets.push(&chamber, rock).dropped();
		}
		rock = jets.push(&chamber, rock);
		loop {
			let dropped = rock.dropped();
			if !chamber.fits(&dropped) { break }
			rock = jets.push(&chamber, dropped);
		}
		chamber.settle(&rock);

		if caching {
			for y in rock.bottom..rock.bottom + rock.len {
				if chamber.rows[y] != FULL_ROW { continue }
				let key = (chamber.rows[y..=chamber.height].to_vec(), shape, jets.last);
				match seen.get(&key) {
					Some(&(i0, height0)) if chamber.height > height0 => {
						// Rock `i` has settled, leaving `count - 1 - i` to go
						let period = i - i0;
						let repeats = (count - 1 - i) / period;
						tracing::debug!(start = i0, period, repeats, "tower repeats");
						i += repeats * period;
						skipped_height += repeats * (chamber.height - height0) as u64;
						caching = false;
						break
					}
					_ => { seen.insert(key, (i, chamber.height)); }
				}
			}
			if caching && i >= CYCLE_SEARCH_LIMIT { return Err(Error::NoCycle(CYCLE_SEARCH_LIMIT)) }
		}

		i += 1;
	}

	Ok(chamber.height as u64 + skipped_height)
}

pub(crate) fn part1(input: &str) -> Result<u64, Error> {
	tower_height(&input_jets_from_str(input)?, 2022, false)
}

pub(crate) fn part2(input: &str) -> Result<u64, Error> {
	tower_height(&input_jets_from_str(input)?, 1_000_000_000_000, true)
}


mod parsing {
	use super::Jet;

	#[derive(Debug, thiserror::Error)]
	pub(crate) enum JetsError {
		#[error("No jets")]
		Empty,
		#[error("Invalid jet {found:?} at column {column}")]
		Invalid { column: usize, found: char },
	}

	pub(super) fn jets_from_str(s: &str) -> Result<Vec<Jet>, JetsError> {
		let jets = s.trim_end()
			.chars()
			.enumerate()
			.map(|(c, chr)| match chr {
				'<' => Ok(Jet::Left),
				'>' => Ok(Jet::Right),
				found => Err(JetsError::Invalid { column: c + 1, found }),
			})
			.collect::<Result<Vec<_>, _>>()?;
		if jets.is_empty() { return Err(JetsError::Empty) }
		Ok(jets)
	}
}


#[test]
fn tests() {
	const INPUT: &str = ">>><<><>><<<>><>>><<<>>><<<><<<>><>><<>>\n";
	let jets = input_jets_from_str(INPUT).unwrap();
	assert_eq!(jets[..4], [Jet::Right, Jet::Right, Jet::Right, Jet::Left]);
	assert_eq!(tower_height(&jets, 1, false).unwrap(), 1);
	assert_eq!(tower_height(&jets, 2022, false).unwrap(), 3068);
	// The example never fills a row
	assert_eq!(tower_height(&jets, 2022, true).unwrap(), 3068);

	// This one does, and soon repeats
	let repeating = input_jets_from_str(">><<<<><").unwrap();
	assert_eq!(tower_height(&repeating, 5_000, false).unwrap(), 6_577);
	assert_eq!(tower_height(&repeating, 5_000, true).unwrap(), 6_577);
	assert_eq!(tower_height(&repeating, 100_000, true).unwrap(), 131_433);
	assert_eq!(part2(">><<<<><").unwrap(), 1_314_285_714_290);

	// Skipping must land on exactly `count` rocks, also when the rocks left
	// are a whole number of periods
	for pattern in [">><<<<><", "><><>>><><<<", "><><>><<><>><<<<<"] {
		let jets = input_jets_from_str(pattern).unwrap();
		for count in 1..2_000 {
			assert_eq!(tower_height(&jets, count, true).unwrap(), tower_height(&jets, count, false).unwrap(),
				"{pattern} after {count} rocks");
		}
	}

	assert!(matches!(input_jets_from_str("<>x"), Err(parsing::JetsError::Invalid { column: 3, found: 'x' })));
}
