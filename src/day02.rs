// Copyright (c) 2022 Bastiaan Marinus van de Weerd


#[derive(Clone, Copy, PartialEq, Eq)]
#[cfg_attr(test, derive(Debug))]
enum Shape { Rock, Paper, Scissors }

#[derive(Clone, Copy, PartialEq, Eq)]
#[cfg_attr(test, derive(Debug))]
enum Outcome { Loss, Draw, Win }

/// The second column of the strategy guide, which means either
/// a [`Shape`] (part 1) or an [`Outcome`] (part 2).
#[derive(Clone, Copy)]
enum Column { X, Y, Z }

struct Round { opponent: Shape, column: Column }


impl Shape {
	const ALL: [Shape; 3] = [Shape::Rock, Shape::Paper, Shape::Scissors];

	fn index(self) -> usize {
		self as usize
	}

	fn score(self) -> u64 {
		self.index() as u64 + 1
	}

	/// The shape that this shape defeats.
	fn defeats(self) -> Shape {
		Shape::ALL[(self.index() + 2) % 3]
	}

	fn against(self, opponent: Shape) -> Outcome {
		if self == opponent { Outcome::Draw }
		else if self.defeats() == opponent { Outcome::Win }
		else { Outcome::Loss }
	}

	fn for_outcome(opponent: Shape, outcome: Outcome) -> Shape {
		match outcome {
			Outcome::Draw => opponent,
			Outcome::Win => Shape::ALL.into_iter().find(|s| s.defeats() == opponent).unwrap_or(opponent),
			Outcome::Loss => opponent.defeats(),
		}
	}
}

impl Outcome {
	fn score(self) -> u64 {
		match self { Outcome::Loss => 0, Outcome::Draw => 3, Outcome::Win => 6 }
	}
}

impl Column {
	fn as_shape(self) -> Shape {
		match self { Column::X => Shape::Rock, Column::Y => Shape::Paper, Column::Z => Shape::Scissors }
	}

	fn as_outcome(self) -> Outcome {
		match self { Column::X => Outcome::Loss, Column::Y => Outcome::Draw, Column::Z => Outcome::Win }
	}
}


fn score(mine: Shape, opponent: Shape) -> u64 {
	mine.score() + mine.against(opponent).score()
}


fn input_rounds_from_str(s: &str) -> Result<Vec<Round>, parsing::RoundsError> {
	parsing::rounds_from_str(s).collect()
}


fn part1_impl(input_rounds: &[Round]) -> u64 {
	input_rounds.iter()
		.map(|round| score(round.column.as_shape(), round.opponent))
		.sum()
}

pub(crate) fn part1(input: &str) -> Result<u64, parsing::RoundsError> {
	Ok(part1_impl(&input_rounds_from_str(input)?))
}


fn part2_impl(input_rounds: &[Round]) -> u64 {
	input_rounds.iter()
		.map(|round| {
			let mine = Shape::for_outcome(round.opponent, round.column.as_outcome());
			score(mine, round.opponent)
		})
		.sum()
}

pub(crate) fn part2(input: &str) -> Result<u64, parsing::RoundsError> {
	Ok(part2_impl(&input_rounds_from_str(input)?))
}


mod parsing {
	use std::str::FromStr;
	use super::{Shape, Column, Round};

	#[derive(Debug, thiserror::Error)]
	pub(crate) enum RoundError {
		#[error("expected `<A|B|C> <X|Y|Z>`")]
		Format,
		#[error("invalid opponent shape {0:?}")]
		Opponent(char),
		#[error("invalid second column {0:?}")]
		Column(char),
	}

	impl FromStr for Round {
		type Err = RoundError;
		fn from_str(s: &str) -> Result<Self, Self::Err> {
			let &[opponent, b' ', column] = s.as_bytes() else { return Err(RoundError::Format) };
			let opponent = match opponent {
				b'A' => Shape::Rock,
				b'B' => Shape::Paper,
				b'C' => Shape::Scissors,
				b => return Err(RoundError::Opponent(b as char)),
			};
			let column = match column {
				b'X' => Column::X,
				b'Y' => Column::Y,
				b'Z' => Column::Z,
				b => return Err(RoundError::Column(b as char)),
			};
			Ok(Round { opponent, column })
		}
	}

	#[derive(Debug, thiserror::Error)]
	#[error("Invalid round on line {line}: {source}")]
	pub(crate) struct RoundsError { line: usize, source: RoundError }

	pub(super) fn rounds_from_str(s: &str) -> impl Iterator<Item = Result<Round, RoundsError>> + '_ {
		s.lines()
			.enumerate()
			.filter(|(_, line)| !line.is_empty())
			.map(|(l, line)| line.parse()
				.map_err(|e| RoundsError { line: l + 1, source: e }))
	}
}


#[test]
fn tests() {
	const INPUT: &str = indoc::indoc! { "
		A Y
		B X
		C Z
	" };
	assert_eq!(Shape::Rock.defeats(), Shape::Scissors);
	assert_eq!(Shape::for_outcome(Shape::Rock, Outcome::Win), Shape::Paper);
	assert_eq!(part1_impl(&input_rounds_from_str(INPUT).unwrap()), 15);
	assert_eq!(part2_impl(&input_rounds_from_str(INPUT).unwrap()), 12);
	assert!(input_rounds_from_str("A Q\n").is_err());
}
