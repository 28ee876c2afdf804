// Copyright (c) 2022 Bastiaan Marinus van de Weerd

use std::cmp::Ordering;


#[derive(Clone, PartialEq, Eq)]
#[cfg_attr(test, derive(Debug))]
enum Packet {
	Int(u32),
	List(Vec<Packet>),
}

impl Packet {
	/// Integers compare numerically; an integer compared against a list is
	/// wrapped in a list first; lists compare element-wise, then by length.
	fn order(&self, other: &Packet) -> Ordering {
		use Packet::*;
		match (self, other) {
			(Int(left), Int(right)) => left.cmp(right),
			(List(left), List(right)) => left.iter()
				.zip(right)
				.map(|(l, r)| l.order(r))
				.find(|o| o.is_ne())
				.unwrap_or_else(|| left.len().cmp(&right.len())),
			(Int(left), right) => List(vec![Int(*left)]).order(right),
			(left, Int(right)) => left.order(&List(vec![Int(*right)])),
		}
	}

	fn divider(n: u32) -> Packet {
		Packet::List(vec![Packet::List(vec![Packet::Int(n)])])
	}
}


/// Stable merge sort, putting `a` before `b` when `comes_before(a, b)`.
fn merge_sort<T>(mut values: Vec<T>, comes_before: &impl Fn(&T, &T) -> bool) -> Vec<T> {
	if values.len() < 2 { return values }

	let right = merge_sort(values.split_off(values.len() / 2), comes_before);
	let left = merge_sort(values, comes_before);

	let mut merged = Vec::with_capacity(left.len() + right.len());
	let (mut left, mut right) = (left.into_iter().peekable(), right.into_iter().peekable());
	while let (Some(l), Some(r)) = (left.peek(), right.peek()) {
		let next = if comes_before(r, l) { right.next() } else { left.next() };
		merged.extend(next);
	}
	merged.extend(left);
	merged.extend(right);
	merged
}


#[derive(Debug, thiserror::Error)]
pub(crate) enum Error {
	#[error(transparent)]
	Parse(#[from] parsing::PacketsError),
}


fn input_pairs_from_str(s: &str) -> Result<Vec<[Packet; 2]>, parsing::PacketsError> {
	parsing::pairs_from_str(s)
}

fn input_packets_from_str(s: &str) -> Result<Vec<Packet>, parsing::PacketsError> {
	parsing::packets_from_str(s).collect()
}


fn part1_impl(input_pairs: &[[Packet; 2]]) -> usize {
	input_pairs.iter()
		.enumerate()
		.filter(|(_, [left, right])| left.order(right).is_lt())
		.map(|(i, _)| i + 1)
		.sum()
}

pub(crate) fn part1(input: &str) -> Result<usize, Error> {
	Ok(part1_impl(&input_pairs_from_str(input)?))
}


/// Sorted packets, each paired with whether it is one of the added dividers.
fn sorted_with_dividers(packets: Vec<Packet>) -> Vec<(Packet, bool)> {
	let packets = packets.into_iter()
		.map(|packet| (packet, false))
		.chain([2, 6].map(|n| (Packet::divider(n), true)))
		.collect::<Vec<_>>();
	merge_sort(packets, &|(a, _): &(Packet, bool), (b, _): &(Packet, bool)| a.order(b).is_lt())
}

fn part2_impl(input_packets: Vec<Packet>) -> usize {
	sorted_with_dividers(input_packets).into_iter()
		.enumerate()
		.filter(|(_, (_, is_divider))| *is_divider)
		.map(|(i, _)| i + 1)
		.product()
}

pub(crate) fn part2(input: &str) -> Result<usize, Error> {
	Ok(part2_impl(input_packets_from_str(input)?))
}


mod parsing {
	use std::str::FromStr;
	use super::Packet;

	#[derive(Debug, thiserror::Error)]
	pub(crate) enum PacketError {
		#[error("packets must be lists")]
		NotAList,
		#[error("unexpected {found:?} at column {column}")]
		Unexpected { column: usize, found: Option<char> },
		#[error("integer at column {0} is too large")]
		Overflow(usize),
	}

	struct Parser<'s> {
		bytes: &'s [u8],
		pos: usize,
	}

	impl Parser<'_> {
		fn unexpected(&self) -> PacketError {
			PacketError::Unexpected { column: self.pos + 1, found: self.bytes.get(self.pos).map(|&b| b as char) }
		}

		fn value(&mut self) -> Result<Packet, PacketError> {
			match self.bytes.get(self.pos) {
				Some(b'[') => self.list(),
				Some(b) if b.is_ascii_digit() => self.int(),
				_ => Err(self.unexpected()),
			}
		}

		fn int(&mut self) -> Result<Packet, PacketError> {
			let start = self.pos;
			let mut n: u32 = 0;
			while let Some(b) = self.bytes.get(self.pos).filter(|b| b.is_ascii_digit()) {
				n = n.checked_mul(10)
					.and_then(|n| n.checked_add((b - b'0') as u32))
					.ok_or(PacketError::Overflow(start + 1))?;
				self.pos += 1;
			}
			Ok(Packet::Int(n))
		}

		fn list(&mut self) -> Result<Packet, PacketError> {
			self.pos += 1;
			let mut values = vec![];
			if self.bytes.get(self.pos) == Some(&b']') {
				self.pos += 1;
				return Ok(Packet::List(values))
			}
			loop {
				values.push(self.value()?);
				match self.bytes.get(self.pos) {
					Some(b',') => self.pos += 1,
					Some(b']') => { self.pos += 1; return Ok(Packet::List(values)) }
					_ => return Err(self.unexpected()),
				}
			}
		}
	}

	impl FromStr for Packet {
		type Err = PacketError;
		fn from_str(s: &str) -> Result<Self, Self::Err> {
			if !s.starts_with('[') { return Err(PacketError::NotAList) }
			let mut parser = Parser { bytes: s.as_bytes(), pos: 0 };
			let packet = parser.value()?;
			if parser.pos < s.len() { return Err(parser.unexpected()) }
			Ok(packet)
		}
	}

	#[derive(Debug, thiserror::Error)]
	pub(crate) enum PacketsError {
		#[error("Invalid packet on line {line}: {source}")]
		Packet { line: usize, source: PacketError },
		#[error("Expected a pair of packets before line {0}")]
		Pair(usize),
	}

	pub(super) fn packets_from_str(s: &str) -> impl Iterator<Item = Result<Packet, PacketsError>> + '_ {
		s.lines()
			.enumerate()
			.filter(|(_, line)| !line.is_empty())
			.map(|(l, line)| line.parse()
				.map_err(|e| PacketsError::Packet { line: l + 1, source: e }))
	}

	pub(super) fn pairs_from_str(s: &str) -> Result<Vec<[Packet; 2]>, PacketsError> {
		let mut pairs = vec![];
		let mut pending = vec![];
		for (l, line) in s.lines().chain([""]).enumerate() {
			if !line.is_empty() {
				pending.push(line.parse()
					.map_err(|e| PacketsError::Packet { line: l + 1, source: e })?);
				continue
			}
			match <[Packet; 2]>::try_from(std::mem::take(&mut pending)) {
				Ok(pair) => pairs.push(pair),
				Err(rest) if rest.is_empty() => (),
				Err(_) => return Err(PacketsError::Pair(l + 1)),
			}
		}
		Ok(pairs)
	}
}


#[cfg(test)]
mod tests {
	use test_case::test_case;
	use super::*;

	const INPUT: &str = indoc::indoc! { "
		[1,1,3,1,1]
		[1,1,5,1,1]

		[[1],[2,3,4]]
		[[1],4]

		[9]
		[[8,7,6]]

		[[4,4],4,4]
		[[4,4],4,4,4]

		[7,7,7,7]
		[7,7,7]

		[]
		[3]

		[[[]]]
		[[]]

		[1,[2,[3,[4,[5,6,7]]]],8,9]
		[1,[2,[3,[4,[5,6,0]]]],8,9]
	" };

	#[test_case("[1,1,3,1,1]", "[1,1,5,1,1]", true)]
	#[test_case("[[1],[2,3,4]]", "[[1],4]", true)]
	#[test_case("[9]", "[[8,7,6]]", false)]
	#[test_case("[[4,4],4,4]", "[[4,4],4,4,4]", true)]
	#[test_case("[7,7,7,7]", "[7,7,7]", false)]
	#[test_case("[]", "[3]", true)]
	#[test_case("[[[]]]", "[[]]", false)]
	#[test_case("[1,[2,[3,[4,[5,6,7]]]],8,9]", "[1,[2,[3,[4,[5,6,0]]]],8,9]", false)]
	fn in_order(left: &str, right: &str, expected: bool) {
		let (left, right) = (left.parse::<Packet>().unwrap(), right.parse::<Packet>().unwrap());
		assert_eq!(left.order(&right).is_lt(), expected);
	}

	#[test]
	fn parsing() {
		assert_eq!("[10,[]]".parse::<Packet>().unwrap(),
			Packet::List(vec![Packet::Int(10), Packet::List(vec![])]));
		assert!(matches!("3".parse::<Packet>(), Err(parsing::PacketError::NotAList)));
		assert!(matches!("[1,]".parse::<Packet>(),
			Err(parsing::PacketError::Unexpected { column: 4, found: Some(']') })));
		assert!(matches!("[1]]".parse::<Packet>(),
			Err(parsing::PacketError::Unexpected { column: 4, .. })));
		assert!(matches!(input_pairs_from_str("[1]\n\n[2]\n"), Err(parsing::PacketsError::Pair(2))));
	}

	#[test]
	fn sorting() {
		// Linear congruential generator, for a reproducible shuffle
		let mut state = 12345_u32;
		let values = (0..1 << 14)
			.map(|_| {
				state = state.wrapping_mul(1_103_515_245).wrapping_add(12345);
				(state >> 16) % 1025
			})
			.collect::<Vec<_>>();
		let mut expected = values.clone();
		expected.sort();
		assert_eq!(merge_sort(values, &|a: &u32, b: &u32| a < b), expected);

		let keyed = vec![(1, 'a'), (0, 'b'), (1, 'c'), (0, 'd')];
		assert_eq!(merge_sort(keyed, &|a: &(u8, char), b: &(u8, char)| a.0 < b.0),
			[(0, 'b'), (0, 'd'), (1, 'a'), (1, 'c')]);
	}

	#[test]
	fn parts() {
		let pairs = input_pairs_from_str(INPUT).unwrap();
		assert_eq!(pairs.len(), 8);
		assert_eq!(part1_impl(&pairs), 13);

		let sorted = sorted_with_dividers(input_packets_from_str(INPUT).unwrap())
			.into_iter()
			.map(|(packet, _)| packet)
			.collect::<Vec<_>>();
		assert_eq!(sorted, input_packets_from_str(indoc::indoc! { "
			[]
			[[]]
			[[[]]]
			[1,1,3,1,1]
			[1,1,5,1,1]
			[[1],[2,3,4]]
			[1,[2,[3,[4,[5,6,0]]]],8,9]
			[1,[2,[3,[4,[5,6,7]]]],8,9]
			[[1],4]
			[[2]]
			[3]
			[[4,4],4,4]
			[[4,4],4,4,4]
			[[6]]
			[7,7,7]
			[7,7,7,7]
			[[8,7,6]]
			[9]
		" }).unwrap());
		assert_eq!(part2_impl(input_packets_from_str(INPUT).unwrap()), 140);

		// Packets equal to a divider sort before it
		assert_eq!(part2("[[2]]\n[1]\n").unwrap(), 3 * 4);
		assert_eq!(part2("[[6]]\n[[2]]\n").unwrap(), 2 * 4);
		assert!(matches!(part1("[1]\n[x]\n"), Err(Error::Parse(parsing::PacketsError::Packet { line: 2, .. }))));
	}
}
