// Copyright (c) 2022 Bastiaan Marinus van de Weerd


/// Crate labels per stack, bottom first.
#[cfg_attr(test, derive(Debug, PartialEq, Eq))]
struct Stacks(Vec<Vec<u8>>);

#[cfg_attr(test, derive(Debug))]
#[derive(Clone, Copy)]
struct Move {
	count: usize,
	from: usize,
	to: usize,
}

#[derive(Clone, Copy)]
enum Crane {
	/// Moves crates one at a time.
	CrateMover9000,
	/// Moves multiple crates at once, retaining their order.
	CrateMover9001,
}


#[derive(Debug, thiserror::Error)]
pub(crate) enum Error {
	#[error(transparent)]
	Parse(#[from] parsing::InputError),
	#[error("Move {step} takes {count} crate(s) from stack {from}, which only holds {held}")]
	Underflow { step: usize, count: usize, from: usize, held: usize },
}


impl Stacks {
	fn apply(&mut self, step: usize, mv: Move, crane: Crane) -> Result<(), Error> {
		let held = self.0[mv.from].len();
		if held < mv.count {
			return Err(Error::Underflow { step, count: mv.count, from: mv.from + 1, held })
		}

		let mut lifted = self.0[mv.from].split_off(held - mv.count);
		if matches!(crane, Crane::CrateMover9000) { lifted.reverse() }
		self.0[mv.to].extend(lifted);
		Ok(())
	}

	fn tops(&self) -> String {
		self.0.iter()
			.filter_map(|stack| stack.last())
			.map(|&b| b as char)
			.collect()
	}
}


fn input_from_str(s: &str) -> Result<(Stacks, Vec<Move>), parsing::InputError> {
	parsing::stacks_and_moves_from_str(s)
}


fn part1and2_impl(input: (Stacks, Vec<Move>), crane: Crane) -> Result<String, Error> {
	let (mut stacks, moves) = input;
	for (i, mv) in moves.into_iter().enumerate() {
		stacks.apply(i + 1, mv, crane)?;
	}
	Ok(stacks.tops())
}

pub(crate) fn part1(input: &str) -> Result<String, Error> {
	part1and2_impl(input_from_str(input)?, Crane::CrateMover9000)
}

pub(crate) fn part2(input: &str) -> Result<String, Error> {
	part1and2_impl(input_from_str(input)?, Crane::CrateMover9001)
}


mod parsing {
	use std::{num::ParseIntError, str::FromStr};
	use super::{Stacks, Move};

	#[derive(Debug, thiserror::Error)]
	pub(crate) enum MoveError {
		#[error("expected `move <count> from <stack> to <stack>`")]
		Format,
		#[error("invalid number: {0}")]
		Number(#[from] ParseIntError),
		#[error("stack numbers start at 1")]
		ZeroStack,
	}

	impl FromStr for Move {
		type Err = MoveError;
		fn from_str(s: &str) -> Result<Self, Self::Err> {
			let s = s.strip_prefix("move ").ok_or(MoveError::Format)?;
			let (count, s) = s.split_once(" from ").ok_or(MoveError::Format)?;
			let (from, to) = s.split_once(" to ").ok_or(MoveError::Format)?;
			let stack = |s: &str| -> Result<usize, MoveError> {
				s.parse::<usize>()?.checked_sub(1).ok_or(MoveError::ZeroStack)
			};
			Ok(Move { count: count.parse()?, from: stack(from)?, to: stack(to)? })
		}
	}

	#[derive(Debug, thiserror::Error)]
	pub(crate) enum InputError {
		#[error("Expected a drawing and moves separated by a blank line")]
		NoBlank,
		#[error("Expected a line of stack numbers below the drawing")]
		NoLabels,
		#[error("Invalid stack number {0:?}")]
		Label(String),
		#[error("Invalid crate {found:?} on line {line}")]
		Crate { line: usize, found: char },
		#[error("Invalid move on line {line}: {source}")]
		Move { line: usize, source: MoveError },
		#[error("Move on line {line} refers to stack {stack}, but there are only {len}")]
		Stack { line: usize, stack: usize, len: usize },
	}

	fn try_stacks_from_lines(drawing: &str) -> Result<Stacks, InputError> {
		let mut rows = drawing.lines().collect::<Vec<_>>();
		let labels = rows.pop().ok_or(InputError::NoLabels)?;
		let len = labels.split_whitespace()
			.map(|label| label.parse::<usize>()
				.map_err(|_| InputError::Label(label.to_owned())))
			.try_fold(0, |max, label| label.map(|label| max.max(label)))?;
		if len == 0 { return Err(InputError::NoLabels) }

		let mut stacks = vec![vec![]; len];
		for (l, row) in rows.iter().enumerate().rev() {
			for (i, stack) in stacks.iter_mut().enumerate() {
				match row.as_bytes().get(1 + 4 * i) {
					None | Some(b' ') => (),
					Some(b) if b.is_ascii_uppercase() => stack.push(*b),
					Some(b) => return Err(InputError::Crate { line: l + 1, found: *b as char }),
				}
			}
		}
		Ok(Stacks(stacks))
	}

	pub(super) fn stacks_and_moves_from_str(s: &str) -> Result<(Stacks, Vec<Move>), InputError> {
		let (drawing, moves) = s.split_once("\n\n").ok_or(InputError::NoBlank)?;
		let stacks = try_stacks_from_lines(drawing)?;
		let first_move_line = drawing.lines().count() + 2;

		let moves = moves.lines()
			.enumerate()
			.filter(|(_, line)| !line.is_empty())
			.map(|(l, s)| {
				let line = first_move_line + l;
				let mv = s.parse::<Move>().map_err(|e| InputError::Move { line, source: e })?;
				for stack in [mv.from, mv.to] {
					if stack >= stacks.0.len() {
						return Err(InputError::Stack { line, stack: stack + 1, len: stacks.0.len() })
					}
				}
				Ok(mv)
			})
			.collect::<Result<_, _>>()?;

		Ok((stacks, moves))
	}
}


#[test]
fn tests() {
	const INPUT: &str = concat!(
		"    [D]    \n",
		"[N] [C]    \n",
		"[Z] [M] [P]\n",
		" 1   2   3 \n",
		"\n",
		"move 1 from 2 to 1\n",
		"move 3 from 1 to 3\n",
		"move 2 from 2 to 1\n",
		"move 1 from 1 to 2\n",
	);
	let (stacks, moves) = input_from_str(INPUT).unwrap();
	assert_eq!(stacks, Stacks(vec![b"ZN".to_vec(), b"MCD".to_vec(), b"P".to_vec()]));
	assert_eq!(moves.len(), 4);
	assert_eq!(part1(INPUT).unwrap(), "CMZ");
	assert_eq!(part2(INPUT).unwrap(), "MCD");

	// Rows trimmed of their trailing spaces are fine too
	assert_eq!(part1("    [D]\n[N] [C]\n[Z] [M] [P]\n 1   2   3\n\nmove 1 from 2 to 1\n").unwrap(), "DCP");
	assert!(matches!(part1("[A]\n 1\n\nmove 2 from 1 to 1\n"), Err(Error::Underflow { step: 1, .. })));
	assert!(matches!(input_from_str("[A]\n 1\n\nmove 1 from 1 to 4\n"),
		Err(parsing::InputError::Stack { line: 4, stack: 4, .. })));
}
