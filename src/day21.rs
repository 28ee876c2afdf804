// Copyright (c) 2022 Bastiaan Marinus van de Weerd

use std::collections::HashMap;


const ROOT: &str = "root";
const HUMAN: &str = "humn";


#[derive(Clone, Copy)]
#[cfg_attr(test, derive(Debug, PartialEq, Eq))]
enum Operator { Add, Sub, Mul, Div }

impl Operator {
	/// `None` on division by zero or overflow.
	fn operate(&self, [left, right]: [i64; 2]) -> Option<i64> {
		use Operator::*;
		match self {
			Add => left.checked_add(right),
			Sub => left.checked_sub(right),
			Mul => left.checked_mul(right),
			Div => left.checked_div(right),
		}
	}
}

#[cfg_attr(test, derive(Debug, PartialEq, Eq))]
enum Job<'a> {
	Number(i64),
	Operation(Operator, [&'a str; 2]),
}

type Monkeys<'a> = HashMap<&'a str, Job<'a>>;

/// Ways to compute a monkey's number from two others.
struct Formula<'a>(Operator, [&'a str; 2]);

struct Riddle<'a> {
	numbers: HashMap<&'a str, i64>,
	formulas: HashMap<&'a str, Vec<Formula<'a>>>,
	/// Per monkey, those with a formula using its number.
	dependents: HashMap<&'a str, Vec<&'a str>>,
}

impl<'a> Riddle<'a> {
	/// Besides each monkey's own operation, registers the inverses that give
	/// either operand from the result and the other operand.
	fn new(monkeys: &Monkeys<'a>) -> Self {
		use Operator::*;

		let mut riddle = Riddle { numbers: HashMap::new(), formulas: HashMap::new(), dependents: HashMap::new() };
		for (&name, job) in monkeys {
			match *job {
				Job::Number(number) => { riddle.numbers.insert(name, number); }
				Job::Operation(operator, [left, right]) => {
					let (left_formula, right_formula) = match operator {
						Add => (Formula(Sub, [name, right]), Formula(Sub, [name, left])),
						Sub => (Formula(Add, [name, right]), Formula(Sub, [left, name])),
						Mul => (Formula(Div, [name, right]), Formula(Div, [name, left])),
						Div => (Formula(Mul, [name, right]), Formula(Div, [left, name])),
					};
					riddle.add(name, Formula(operator, [left, right]));
					riddle.add(left, left_formula);
					riddle.add(right, right_formula);
				}
			}
		}
		riddle
	}

	fn add(&mut self, name: &'a str, formula: Formula<'a>) {
		for operand in formula.1 {
			self.dependents.entry(operand).or_default().push(name);
		}
		self.formulas.entry(name).or_default().push(formula);
	}

	/// Works out every number that follows from those already known.
	fn solve(&mut self) {
		let mut pending = self.numbers.keys()
			.filter_map(|name| self.dependents.get(name))
			.flatten()
			.copied()
			.collect::<Vec<_>>();

		while let Some(name) = pending.pop() {
			if self.numbers.contains_key(name) { continue }
			let Some(formulas) = self.formulas.get(name) else { continue };
			let number = formulas.iter().find_map(|Formula(operator, [left, right])| {
				let operands = [*self.numbers.get(left)?, *self.numbers.get(right)?];
				operator.operate(operands)
			});
			if let Some(number) = number {
				self.numbers.insert(name, number);
				pending.extend(self.dependents.get(name).into_iter().flatten());
			}
		}
	}
}


#[derive(Debug, thiserror::Error)]
pub(crate) enum Error {
	#[error(transparent)]
	Parse(#[from] parsing::MonkeysError),
	#[error("No monkey `root` doing an operation")]
	NoRootOperation,
	#[error("Could not work out the number of {0:?}")]
	Unresolved(&'static str),
}


fn input_monkeys_from_str(s: &str) -> Result<Monkeys, parsing::MonkeysError> {
	parsing::monkeys_from_str(s)
}


fn part1_impl(input_monkeys: &Monkeys) -> Result<i64, Error> {
	let mut riddle = Riddle::new(input_monkeys);
	riddle.solve();
	riddle.numbers.get(ROOT).copied().ok_or(Error::Unresolved(ROOT))
}

pub(crate) fn part1(input: &str) -> Result<i64, Error> {
	part1_impl(&input_monkeys_from_str(input)?)
}


fn part2_impl(input_monkeys: &Monkeys) -> Result<i64, Error> {
	let Some(&Job::Operation(_, [left, right])) = input_monkeys.get(ROOT) else { return Err(Error::NoRootOperation) };

	let mut riddle = Riddle::new(input_monkeys);
	riddle.numbers.remove(HUMAN);
	riddle.solve();

	let known = riddle.numbers.get(left).or_else(|| riddle.numbers.get(right)).copied()
		.ok_or(Error::Unresolved(ROOT))?;
	riddle.numbers.insert(left, known);
	riddle.numbers.insert(right, known);
	riddle.solve();
	riddle.numbers.get(HUMAN).copied().ok_or(Error::Unresolved(HUMAN))
}

pub(crate) fn part2(input: &str) -> Result<i64, Error> {
	part2_impl(&input_monkeys_from_str(input)?)
}


mod parsing {
	use std::num::ParseIntError;
	use super::{Job, Monkeys, Operator};

	#[derive(Debug, thiserror::Error)]
	pub(crate) enum JobError {
		#[error("expected `<name>: <number>` or `<name>: <name> <op> <name>`")]
		Format,
		#[error("invalid number: {0}")]
		Number(#[from] ParseIntError),
		#[error("invalid operator {0:?}")]
		Operator(String),
	}

	#[derive(Debug, thiserror::Error)]
	pub(crate) enum MonkeysError {
		#[error("Invalid monkey on line {line}: {source}")]
		Job { line: usize, source: JobError },
		#[error("Monkey {0:?} is listed twice")]
		Duplicate(String),
	}

	fn try_monkey_from_str(s: &str) -> Result<(&str, Job), JobError> {
		let (name, job) = s.split_once(": ").ok_or(JobError::Format)?;
		let words = job.split(' ').collect::<Vec<_>>();
		let job = match words[..] {
			[number] => Job::Number(number.parse()?),
			[left, operator, right] => {
				let operator = match operator {
					"+" => Operator::Add,
					"-" => Operator::Sub,
					"*" => Operator::Mul,
					"/" => Operator::Div,
					found => return Err(JobError::Operator(found.to_owned())),
				};
				Job::Operation(operator, [left, right])
			}
			_ => return Err(JobError::Format),
		};
		Ok((name, job))
	}

	pub(super) fn monkeys_from_str(s: &str) -> Result<Monkeys, MonkeysError> {
		let mut monkeys = Monkeys::new();
		for (l, line) in s.lines().enumerate().filter(|(_, line)| !line.is_empty()) {
			let (name, job) = try_monkey_from_str(line)
				.map_err(|e| MonkeysError::Job { line: l + 1, source: e })?;
			if monkeys.insert(name, job).is_some() { return Err(MonkeysError::Duplicate(name.to_owned())) }
		}
		Ok(monkeys)
	}
}


#[test]
fn tests() {
	const INPUT: &str = indoc::indoc! { "
		root: pppw + sjmn
		dbpl: 5
		cczh: sllz + lgvd
		zczc: 2
		ptdq: humn - dvpt
		dvpt: 3
		lfqf: 4
		humn: 5
		ljgn: 2
		sjmn: drzm * dbpl
		sllz: 4
		pppw: cczh / lfqf
		lgvd: ljgn * ptdq
		drzm: hmdt - zczc
		hmdt: 32
	" };
	let monkeys = input_monkeys_from_str(INPUT).unwrap();
	assert_eq!(monkeys.len(), 15);
	assert_eq!(monkeys["root"], Job::Operation(Operator::Add, ["pppw", "sjmn"]));
	assert_eq!(monkeys["hmdt"], Job::Number(32));
	assert_eq!(part1_impl(&monkeys).unwrap(), 152);
	assert_eq!(part2_impl(&monkeys).unwrap(), 301);

	// Every inverse gets used
	for (job, expected) in [("a + humn", 8), ("a - humn", -8), ("humn - a", 16), ("a * humn", 3), ("x / humn", 4), ("humn / a", 48)] {
		let input = format!("root: b + c\nb: {job}\nc: 12\na: 4\nx: 48\nhumn: 0\n");
		assert_eq!(part2_impl(&input_monkeys_from_str(&input).unwrap()).unwrap(), expected, "{job}");
	}

	assert!(matches!(part1_impl(&input_monkeys_from_str("root: a / b\na: 1\nb: 0\n").unwrap()),
		Err(Error::Unresolved("root"))));
	assert!(matches!(part2_impl(&input_monkeys_from_str("root: 1\n").unwrap()), Err(Error::NoRootOperation)));
	assert!(matches!(input_monkeys_from_str("a: b % c\n"),
		Err(parsing::MonkeysError::Job { line: 1, source: parsing::JobError::Operator(_) })));
	assert!(matches!(input_monkeys_from_str("a: 1\na: 2\n"), Err(parsing::MonkeysError::Duplicate(_))));
}
