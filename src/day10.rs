// Copyright (c) 2022 Bastiaan Marinus van de Weerd


const SCREEN_WIDTH: usize = 40;


#[derive(Clone, Copy)]
#[cfg_attr(test, derive(Debug, PartialEq, Eq))]
enum Instruction {
	Noop,
	AddX(i64),
}

impl Instruction {
	fn cycles(self) -> usize {
		match self { Instruction::Noop => 1, Instruction::AddX(_) => 2 }
	}
}


/// Value of the X register *during* each cycle.
fn x_per_cycle(program: &[Instruction]) -> impl Iterator<Item = i64> + '_ {
	use {std::iter::repeat, either::Either};
	program.iter()
		.scan(1, |x, &instr| {
			let during = *x;
			if let Instruction::AddX(v) = instr { *x += v }
			Some(match instr.cycles() {
				1 => Either::Left(std::iter::once(during)),
				n => Either::Right(repeat(during).take(n)),
			})
		})
		.flatten()
}

/// Value of the X register once every instruction finished.
fn final_x(program: &[Instruction]) -> i64 {
	program.iter().fold(1, |x, instr| match instr {
		Instruction::AddX(v) => x + v,
		Instruction::Noop => x,
	})
}


fn input_program_from_str(s: &str) -> Result<Vec<Instruction>, parsing::ProgramError> {
	parsing::program_from_str(s).collect()
}


fn part1_impl(input_program: &[Instruction]) -> i64 {
	x_per_cycle(input_program)
		.zip(1..)
		.filter(|&(_, cycle)| cycle % 40 == 20)
		.map(|(x, cycle)| cycle * x)
		.sum()
}

pub(crate) fn part1(input: &str) -> Result<i64, parsing::ProgramError> {
	Ok(part1_impl(&input_program_from_str(input)?))
}


fn part2_impl(input_program: &[Instruction]) -> String {
	use itertools::Itertools as _;
	x_per_cycle(input_program)
		.enumerate()
		.map(|(i, x)| if (x - (i % SCREEN_WIDTH) as i64).abs() < 2 { '#' } else { '.' })
		.chunks(SCREEN_WIDTH)
		.into_iter()
		.map(|row| row.collect::<String>())
		.join("\n")
}

pub(crate) fn part2(input: &str) -> Result<String, parsing::ProgramError> {
	Ok(part2_impl(&input_program_from_str(input)?))
}


mod parsing {
	use std::{num::ParseIntError, str::FromStr};
	use super::Instruction;

	#[derive(Debug, thiserror::Error)]
	pub(crate) enum InstructionError {
		#[error("unknown instruction")]
		Unknown,
		#[error("invalid operand: {0}")]
		Operand(#[from] ParseIntError),
	}

	impl FromStr for Instruction {
		type Err = InstructionError;
		fn from_str(s: &str) -> Result<Self, Self::Err> {
			match s.split_once(' ') {
				None if s == "noop" => Ok(Instruction::Noop),
				Some(("addx", v)) => Ok(Instruction::AddX(v.parse()?)),
				_ => Err(InstructionError::Unknown),
			}
		}
	}

	#[derive(Debug, thiserror::Error)]
	#[error("Invalid instruction on line {line}: {source}")]
	pub(crate) struct ProgramError { line: usize, source: InstructionError }

	pub(super) fn program_from_str(s: &str) -> impl Iterator<Item = Result<Instruction, ProgramError>> + '_ {
		s.lines()
			.enumerate()
			.filter(|(_, line)| !line.is_empty())
			.map(|(l, line)| line.parse()
				.map_err(|e| ProgramError { line: l + 1, source: e }))
	}
}


#[test]
fn tests() {
	const INPUTS: [&str; 2] = [
		indoc::indoc! { "
			noop
			addx 3
			addx -5
		" },
		include_str!("day10-test.txt"),
	];
	let mini = input_program_from_str(INPUTS[0]).unwrap();
	assert_eq!(mini, [Instruction::Noop, Instruction::AddX(3), Instruction::AddX(-5)]);
	assert_eq!(x_per_cycle(&mini).collect::<Vec<_>>(), [1, 1, 1, 4, 4]);
	assert_eq!(final_x(&mini), -1);

	let program = input_program_from_str(INPUTS[1]).unwrap();
	assert_eq!(part1_impl(&program), 13140);
	assert_eq!(part2_impl(&program), indoc::indoc! { "
		##..##..##..##..##..##..##..##..##..##..
		###...###...###...###...###...###...###.
		####....####....####....####....####....
		#####.....#####.....#####.....#####.....
		######......######......######......####
		#######.......#######.......#######....." });
	assert!(input_program_from_str("addx\n").is_err());
}
