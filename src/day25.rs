// Copyright (c) 2022 Bastiaan Marinus van de Weerd


/// A number written in balanced base 5, with digits `=`, `-`, `0`, `1` & `2`
/// for -2 through 2.
#[derive(Clone, Copy, PartialEq, Eq)]
#[cfg_attr(test, derive(Debug))]
struct Snafu(i64);

impl std::fmt::Display for Snafu {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		if self.0 == 0 { return f.write_str("0") }
		let mut digits = itertools::unfold(self.0, |rem| (*rem != 0).then(|| {
			let digit = (*rem + 2).rem_euclid(5) - 2;
			*rem = (*rem - digit) / 5;
			match digit { -2 => '=', -1 => '-', 0 => '0', 1 => '1', _ => '2' }
		})).collect::<Vec<_>>();
		digits.reverse();
		f.write_str(&digits.into_iter().collect::<String>())
	}
}


fn input_snafus_from_str(s: &str) -> impl Iterator<Item = Result<Snafu, parsing::SnafusError>> + '_ {
	parsing::snafus_from_str(s)
}


fn part1_impl(input_snafus: impl Iterator<Item = Snafu>) -> Snafu {
	Snafu(input_snafus.map(|Snafu(n)| n).sum())
}

pub(crate) fn part1(input: &str) -> Result<String, parsing::SnafusError> {
	let snafus = input_snafus_from_str(input).collect::<Result<Vec<_>, _>>()?;
	Ok(part1_impl(snafus.into_iter()).to_string())
}


/// The last day only has the one puzzle.
pub(crate) fn part2(_input: &str) -> Result<&'static str, std::convert::Infallible> {
	Ok("Merry Christmas!")
}


mod parsing {
	use std::str::FromStr;
	use super::Snafu;

	#[derive(Debug, thiserror::Error)]
	pub(crate) enum SnafuError {
		#[error("empty number")]
		Empty,
		#[error("invalid digit {found:?} at column {column}")]
		Digit { column: usize, found: char },
		#[error("number too large")]
		Overflow,
	}

	impl FromStr for Snafu {
		type Err = SnafuError;
		fn from_str(s: &str) -> Result<Self, Self::Err> {
			if s.is_empty() { return Err(SnafuError::Empty) }
			s.chars().enumerate().try_fold(Snafu(0), |Snafu(n), (c, chr)| {
				let digit = match chr {
					'=' => -2,
					'-' => -1,
					'0'..='2' => chr as i64 - '0' as i64,
					found => return Err(SnafuError::Digit { column: c + 1, found }),
				};
				n.checked_mul(5).and_then(|n| n.checked_add(digit)).map(Snafu).ok_or(SnafuError::Overflow)
			})
		}
	}

	#[derive(Debug, thiserror::Error)]
	#[error("Invalid SNAFU number on line {line}: {source}")]
	pub(crate) struct SnafusError { line: usize, source: SnafuError }

	pub(super) fn snafus_from_str(s: &str) -> impl Iterator<Item = Result<Snafu, SnafusError>> + '_ {
		s.lines()
			.enumerate()
			.filter(|(_, line)| !line.is_empty())
			.map(|(l, line)| line.trim().parse()
				.map_err(|e| SnafusError { line: l + 1, source: e }))
	}
}


#[cfg(test)]
mod tests {
	use test_case::test_case;
	use super::*;

	#[test_case(1, "1")]
	#[test_case(2, "2")]
	#[test_case(3, "1=")]
	#[test_case(4, "1-")]
	#[test_case(5, "10")]
	#[test_case(6, "11")]
	#[test_case(7, "12")]
	#[test_case(8, "2=")]
	#[test_case(9, "2-")]
	#[test_case(10, "20")]
	#[test_case(15, "1=0")]
	#[test_case(20, "1-0")]
	#[test_case(2022, "1=11-2")]
	#[test_case(12345, "1-0---0")]
	#[test_case(314159265, "1121-1110-1=0")]
	#[test_case(1747, "1=-0-2")]
	#[test_case(906, "12111")]
	#[test_case(198, "2=0=")]
	#[test_case(4890, "2=-1=0")]
	#[test_case(0, "0")]
	#[test_case(-3, "-2")]
	fn conversion(decimal: i64, snafu: &str) {
		assert_eq!(Snafu(decimal).to_string(), snafu);
		assert_eq!(snafu.parse::<Snafu>().unwrap(), Snafu(decimal));
	}

	#[test]
	fn tests() {
		const INPUT: &str = indoc::indoc! { "
			1=-0-2
			12111
			2=0=
			21
			2=01
			111
			20012
			112
			1=-1=
			1-12
			12
			1=
			122
		" };
		assert_eq!(part1(INPUT).unwrap(), "2=-1=0");
		assert_eq!(part2(INPUT).unwrap(), "Merry Christmas!");

		assert!(matches!("1=3".parse::<Snafu>(), Err(parsing::SnafuError::Digit { column: 3, found: '3' })));
		assert!(matches!("".parse::<Snafu>(), Err(parsing::SnafuError::Empty)));
		assert!(matches!("2".repeat(30).parse::<Snafu>(), Err(parsing::SnafuError::Overflow)));
		assert!(part1("12\n1x\n").is_err());
	}
}
