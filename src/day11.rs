// Copyright (c) 2022 Bastiaan Marinus van de Weerd


#[derive(Clone, Copy)]
enum Operator { Add, Mul }

#[derive(Clone, Copy)]
enum Operand { Value(u64), Old }

/// `new = old <operator> <operand>`
#[derive(Clone, Copy)]
struct Operation(Operator, Operand);

impl Operation {
	fn apply(self, old: u64) -> u64 {
		let rhs = match self.1 { Operand::Value(v) => v, Operand::Old => old };
		match self.0 { Operator::Add => old + rhs, Operator::Mul => old * rhs }
	}
}

/// A monkey's notes, before picking how to track worry levels.
struct Notes {
	items: Vec<u64>,
	operation: Operation,
	div_by: u64,
	/// Target when the test fails, target when it passes.
	targets: [usize; 2],
}

struct Monkey<W> {
	items: Vec<W>,
	operation: Operation,
	div_by: u64,
	targets: [usize; 2],
}


/// How an item's worry level is tracked while monkeys inspect it.
trait Worry: Sized {
	fn inspect(&mut self, operation: Operation);
	/// Whether the worry level is divisible by `div_by`, the test of the
	/// monkey at index `monkey`.
	fn is_divisible(&self, monkey: usize, div_by: u64) -> bool;
}

/// The actual worry level, which drops to a third after each inspection.
impl Worry for u64 {
	fn inspect(&mut self, operation: Operation) {
		*self = operation.apply(*self) / 3;
	}

	fn is_divisible(&self, _: usize, div_by: u64) -> bool {
		self % div_by == 0
	}
}

/// The worry level modulo every monkey's divisor (in monkey order), which
/// keeps the numbers small while preserving every test's outcome.
#[cfg_attr(test, derive(Debug))]
struct Residues(Vec<(u64, u64)>);

impl Residues {
	fn new(value: u64, divisors: &[u64]) -> Self {
		Residues(divisors.iter().map(|&d| (d, value % d)).collect())
	}
}

impl Worry for Residues {
	fn inspect(&mut self, operation: Operation) {
		for (modulus, residue) in &mut self.0 {
			*residue = operation.apply(*residue) % *modulus;
		}
	}

	fn is_divisible(&self, monkey: usize, _: u64) -> bool {
		self.0[monkey].1 == 0
	}
}


#[derive(Debug, thiserror::Error)]
pub(crate) enum Error {
	#[error(transparent)]
	Parse(#[from] parsing::NotesError),
	#[error("Monkey business needs at least two monkeys")]
	TooFewMonkeys,
}


fn input_notes_from_str(s: &str) -> Result<Vec<Notes>, parsing::NotesError> {
	parsing::notes_from_str(s)
}


fn play_round<W: Worry>(monkeys: &mut [Monkey<W>], inspections: &mut [usize]) {
	for i in 0..monkeys.len() {
		let items = std::mem::take(&mut monkeys[i].items);
		inspections[i] += items.len();
		let (operation, div_by, targets) = (monkeys[i].operation, monkeys[i].div_by, monkeys[i].targets);
		for mut item in items {
			item.inspect(operation);
			let target = targets[item.is_divisible(i, div_by) as usize];
			monkeys[target].items.push(item);
		}
	}
}

fn monkey_business<W: Worry>(mut monkeys: Vec<Monkey<W>>, rounds: usize) -> Result<u64, Error> {
	use itertools::Itertools as _;

	if monkeys.len() < 2 { return Err(Error::TooFewMonkeys) }
	let mut inspections = vec![0; monkeys.len()];
	for _ in 0..rounds {
		play_round(&mut monkeys, &mut inspections);
	}
	Ok(inspections.into_iter()
		.sorted_by(|l, r| r.cmp(l))
		.take(2)
		.map(|n| n as u64)
		.product())
}


fn monkeys_with<W>(notes: Vec<Notes>, worry: impl Fn(u64) -> W) -> Vec<Monkey<W>> {
	notes.into_iter()
		.map(|Notes { items, operation, div_by, targets }| Monkey {
			items: items.into_iter().map(&worry).collect(),
			operation,
			div_by,
			targets,
		})
		.collect()
}

fn part1_impl(input_notes: Vec<Notes>) -> Result<u64, Error> {
	monkey_business(monkeys_with(input_notes, |v| v), 20)
}

pub(crate) fn part1(input: &str) -> Result<u64, Error> {
	part1_impl(input_notes_from_str(input)?)
}


fn part2_impl(input_notes: Vec<Notes>) -> Result<u64, Error> {
	let divisors = input_notes.iter().map(|notes| notes.div_by).collect::<Vec<_>>();
	monkey_business(monkeys_with(input_notes, |v| Residues::new(v, &divisors)), 10_000)
}

pub(crate) fn part2(input: &str) -> Result<u64, Error> {
	part2_impl(input_notes_from_str(input)?)
}


mod parsing {
	use std::num::ParseIntError;
	use super::{Notes, Operation, Operator, Operand};

	#[derive(Debug, thiserror::Error)]
	pub(crate) enum NoteError {
		#[error("expected {0:?}")]
		Expected(&'static str),
		#[error("invalid number: {0}")]
		Number(#[from] ParseIntError),
		#[error("invalid operation")]
		Operation,
		#[error("divisor must not be zero")]
		ZeroDivisor,
		#[error("monkey {0} does not exist")]
		Target(usize),
		#[error("a monkey cannot throw to itself")]
		SelfTarget,
	}

	#[derive(Debug, thiserror::Error)]
	#[error("Invalid notes on line {line}: {source}")]
	pub(crate) struct NotesError { line: usize, source: NoteError }

	fn field<'s>(line: &'s str, prefix: &'static str) -> Result<&'s str, NoteError> {
		line.trim_start().strip_prefix(prefix).ok_or(NoteError::Expected(prefix))
	}

	fn try_operation_from_str(s: &str) -> Result<Operation, NoteError> {
		let (operator, operand) = s.split_once(' ').ok_or(NoteError::Operation)?;
		let operator = match operator {
			"+" => Operator::Add,
			"*" => Operator::Mul,
			_ => return Err(NoteError::Operation),
		};
		let operand = match operand {
			"old" => Operand::Old,
			v => Operand::Value(v.parse()?),
		};
		Ok(Operation(operator, operand))
	}

	pub(super) fn notes_from_str(s: &str) -> Result<Vec<Notes>, NotesError> {
		let lines = s.lines().enumerate()
			.filter(|(_, line)| !line.trim().is_empty())
			.collect::<Vec<_>>();

		let mut notes = vec![];
		for (m, block) in lines.chunks(6).enumerate() {
			let last = block.last().map_or(0, |&(l, _)| l);
			let line = |i: usize| block.get(i).map_or((last + 2, ""), |&(l, line)| (l + 1, line));
			let parse = |i: usize, f: &dyn Fn(&str) -> Result<u64, NoteError>| {
				let (l, text) = line(i);
				f(text).map_err(|source| NotesError { line: l, source })
			};

			let (l, header) = line(0);
			if header != format!("Monkey {m}:") {
				return Err(NotesError { line: l, source: NoteError::Expected("Monkey <n>:") })
			}

			let (l, items) = line(1);
			let items = field(items, "Starting items:")
				.and_then(|items| items.split(',')
					.map(|item| item.trim().parse().map_err(NoteError::from))
					.collect::<Result<Vec<_>, _>>())
				.map_err(|source| NotesError { line: l, source })?;

			let (l, operation) = line(2);
			let operation = field(operation, "Operation: new = old ")
				.and_then(try_operation_from_str)
				.map_err(|source| NotesError { line: l, source })?;

			let div_by = parse(3, &|text| match field(text, "Test: divisible by ")?.parse()? {
				0 => Err(NoteError::ZeroDivisor),
				d => Ok(d),
			})?;
			let if_true = parse(4, &|text| Ok(field(text, "If true: throw to monkey ")?.parse()?))?;
			let if_false = parse(5, &|text| Ok(field(text, "If false: throw to monkey ")?.parse()?))?;

			notes.push(Notes {
				items,
				operation,
				div_by,
				targets: [if_false as usize, if_true as usize],
			});
		}

		for (m, monkey) in notes.iter().enumerate() {
			for (t, target) in monkey.targets.into_iter().enumerate() {
				let source = if target == m { NoteError::SelfTarget }
					else if target >= notes.len() { NoteError::Target(target) }
					else { continue };
				let line = lines[m * 6 + 5 - t].0 + 1;
				return Err(NotesError { line, source })
			}
		}

		Ok(notes)
	}
}


#[test]
fn tests() {
	const INPUT: &str = indoc::indoc! { "
		Monkey 0:
		  Starting items: 79, 98
		  Operation: new = old * 19
		  Test: divisible by 23
		    If true: throw to monkey 2
		    If false: throw to monkey 3

		Monkey 1:
		  Starting items: 54, 65, 75, 74
		  Operation: new = old + 6
		  Test: divisible by 19
		    If true: throw to monkey 2
		    If false: throw to monkey 0

		Monkey 2:
		  Starting items: 79, 60, 97
		  Operation: new = old * old
		  Test: divisible by 13
		    If true: throw to monkey 1
		    If false: throw to monkey 3

		Monkey 3:
		  Starting items: 74
		  Operation: new = old + 3
		  Test: divisible by 17
		    If true: throw to monkey 0
		    If false: throw to monkey 1
	" };

	let mut monkeys = monkeys_with(input_notes_from_str(INPUT).unwrap(), |v| v);
	let mut inspections = vec![0; monkeys.len()];
	play_round(&mut monkeys, &mut inspections);
	assert_eq!(monkeys.iter().map(|m| m.items.clone()).collect::<Vec<_>>(),
		[vec![20, 23, 27, 26], vec![2080, 25, 167, 207, 401, 1046], vec![], vec![]]);
	assert_eq!(inspections, [2, 4, 3, 5]);

	assert_eq!(part1_impl(input_notes_from_str(INPUT).unwrap()).unwrap(), 10_605);
	assert_eq!(part2_impl(input_notes_from_str(INPUT).unwrap()).unwrap(), 2_713_310_158);

	assert!(matches!(part1(&INPUT.replace("monkey 3", "monkey 7")), Err(Error::Parse(_))));
	assert!(matches!(part1(INPUT.split("\n\n").next().unwrap()), Err(Error::Parse(_))));
}
