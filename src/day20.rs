// Copyright (c) 2022 Bastiaan Marinus van de Weerd


/// Mixes `numbers` in place, tracking positions through `order`, which holds
/// indices into `numbers` in their current circular arrangement.
fn mix(numbers: &[i64], order: &mut Vec<usize>) {
	let len = numbers.len();
	// Nothing can move
	if len <= 1 { return }

	for (i, &number) in numbers.iter().enumerate() {
		let Some(from) = order.iter().position(|&j| j == i) else { continue };
		order.remove(from);
		let to = (from as i64 + number).rem_euclid(len as i64 - 1) as usize;
		order.insert(to, i);
	}
}

fn grove_coordinates(numbers: &[i64], order: &[usize]) -> Option<i64> {
	let zero = order.iter().position(|&i| numbers[i] == 0)?;
	Some([1000, 2000, 3000].into_iter()
		.map(|offset| numbers[order[(zero + offset) % order.len()]])
		.sum())
}


#[derive(Debug, thiserror::Error)]
pub(crate) enum Error {
	#[error(transparent)]
	Parse(#[from] parsing::NumbersError),
	#[error("No 0 to count from")]
	NoZero,
}


fn input_numbers_from_str(s: &str) -> Result<Vec<i64>, parsing::NumbersError> {
	parsing::numbers_from_str(s).collect()
}


fn part1and2_impl(input_numbers: &[i64], decryption_key: i64, mixes: usize) -> Result<i64, Error> {
	let numbers = input_numbers.iter().map(|n| n * decryption_key).collect::<Vec<_>>();
	let mut order = (0..numbers.len()).collect::<Vec<_>>();
	for _ in 0..mixes { mix(&numbers, &mut order) }
	grove_coordinates(&numbers, &order).ok_or(Error::NoZero)
}

pub(crate) fn part1(input: &str) -> Result<i64, Error> {
	part1and2_impl(&input_numbers_from_str(input)?, 1, 1)
}

pub(crate) fn part2(input: &str) -> Result<i64, Error> {
	part1and2_impl(&input_numbers_from_str(input)?, 811_589_153, 10)
}


mod parsing {
	use std::num::ParseIntError;

	#[derive(Debug, thiserror::Error)]
	#[error("Invalid number on line {line}: {source}")]
	pub(crate) struct NumbersError { line: usize, source: ParseIntError }

	pub(super) fn numbers_from_str(s: &str) -> impl Iterator<Item = Result<i64, NumbersError>> + '_ {
		s.lines()
			.enumerate()
			.filter(|(_, line)| !line.is_empty())
			.map(|(l, line)| line.trim().parse()
				.map_err(|e| NumbersError { line: l + 1, source: e }))
	}
}


#[test]
fn tests() {
	const INPUT: &str = indoc::indoc! { "
		1
		2
		-3
		3
		-2
		0
		4
	" };
	let numbers = input_numbers_from_str(INPUT).unwrap();

	let mixed_from_zero = |numbers: &[i64], order: &[usize]| {
		let zero = order.iter().position(|&i| numbers[i] == 0).unwrap();
		order.iter().cycle().skip(zero).take(order.len()).map(|&i| numbers[i]).collect::<Vec<_>>()
	};
	let mut order = (0..numbers.len()).collect();
	mix(&numbers, &mut order);
	assert_eq!(mixed_from_zero(&numbers, &order), [0, 3, -2, 1, 2, -3, 4]);

	assert_eq!(part1and2_impl(&numbers, 1, 1).unwrap(), 3);
	assert_eq!(part1and2_impl(&numbers, 811_589_153, 10).unwrap(), 1_623_178_306);

	let mut single = vec![0];
	mix(&[5], &mut single);
	assert_eq!(single, [0]);
	assert_eq!(part1and2_impl(&[0], 1, 1).unwrap(), 0);
	assert!(matches!(part1and2_impl(&[1, 2], 1, 1), Err(Error::NoZero)));
	assert!(input_numbers_from_str("1\nx\n").is_err());
}
