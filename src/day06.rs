// Copyright (c) 2022 Bastiaan Marinus van de Weerd


#[derive(Debug, thiserror::Error)]
pub(crate) enum Error {
	#[error("Invalid character {found:?} at position {position}")]
	InvalidChar { position: usize, found: char },
	#[error("No window of {0} distinct characters")]
	NoMarker(usize),
}


fn input_datastream_from_str(s: &str) -> Result<&[u8], Error> {
	let s = s.trim_end();
	if let Some(position) = s.bytes().position(|b| !b.is_ascii_lowercase()) {
		let found = s[position..].chars().next().unwrap_or_default();
		return Err(Error::InvalidChar { position: position + 1, found })
	}
	Ok(s.as_bytes())
}


/// Number of characters processed up to and including the first window of
/// `N` distinct characters.
fn marker_end<const N: usize>(input_datastream: &[u8]) -> Result<usize, Error> {
	input_datastream.windows(N)
		.position(|w| w.iter()
			.fold(0_u32, |acc, b| acc | 1 << (b - b'a'))
			.count_ones() as usize == N)
		.map(|p| p + N)
		.ok_or(Error::NoMarker(N))
}

pub(crate) fn part1(input: &str) -> Result<usize, Error> {
	marker_end::<4>(input_datastream_from_str(input)?)
}

pub(crate) fn part2(input: &str) -> Result<usize, Error> {
	marker_end::<14>(input_datastream_from_str(input)?)
}


#[cfg(test)]
mod tests {
	use test_case::test_case;
	use super::*;

	#[test_case("mjqjpqmgbljsphdztnvjfqwrcgsmlb", 7, 19)]
	#[test_case("bvwbjplbgvbhsrlpgdmjqwftvncz", 5, 23)]
	#[test_case("nppdvjthqldpwncqszvftbrmjlhg", 6, 23)]
	#[test_case("nznrnfrfntjfmvfwmzdfjlvtqnbhcprsg", 10, 29)]
	#[test_case("zcfzfwzzqfrljwzlrfnpqdbhtmscgvjw", 11, 26)]
	fn markers(input: &str, start_of_packet: usize, start_of_message: usize) {
		assert_eq!(part1(input).unwrap(), start_of_packet);
		assert_eq!(part2(input).unwrap(), start_of_message);
	}

	#[test]
	fn errors() {
		assert!(matches!(part1("aaaaaaaa\n"), Err(Error::NoMarker(4))));
		assert!(matches!(part1("abC"), Err(Error::InvalidChar { position: 3, found: 'C' })));
		assert!(matches!(part2("abcd"), Err(Error::NoMarker(14))));
	}
}
