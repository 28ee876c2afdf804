// Copyright (c) 2022 Bastiaan Marinus van de Weerd


#[cfg_attr(test, derive(Debug))]
struct Valve {
	flow_rate: u32,
	tunnels: Vec<usize>,
}

#[cfg_attr(test, derive(Debug))]
struct Scan {
	valves: Vec<Valve>,
	start: usize,
}


/// Best-case multipliers for the closed valves' flow rates with `time` minutes
/// left, when each of `N` actors opens at most one valve every two minutes.
fn bound_factors<const N: usize>(time: i32) -> impl Iterator<Item = u32> {
	let odd = (time % 2) as u32;
	(0..(time / 2).max(0) as u32).rev()
		.flat_map(move |n| std::iter::repeat(2 * n + 1 + odd).take(N))
}

#[derive(Clone, Copy)]
struct Node<const N: usize> {
	time: i32,
	positions: [usize; N],
	released: u32,
	open: u64,
	/// Per actor, the valves passed since it last opened one.
	circling: [u64; N],
}

struct Search<'a, const N: usize> {
	scan: &'a Scan,
	/// Valve bits & flow rates of the valves worth opening, highest flow first.
	by_flow: Vec<(u64, u32)>,
	best: u32,
}

impl<'a, const N: usize> Search<'a, N> {
	fn new(scan: &'a Scan) -> Self {
		use itertools::Itertools as _;
		let by_flow = scan.valves.iter()
			.enumerate()
			.filter(|(_, valve)| valve.flow_rate > 0)
			.map(|(i, valve)| (1 << i, valve.flow_rate))
			.sorted_by(|(_, l), (_, r)| r.cmp(l))
			.collect();
		Search { scan, by_flow, best: 0 }
	}

	fn upper_bound(&self, time: i32, open: u64) -> u32 {
		bound_factors::<N>(time)
			.zip(self.by_flow.iter().filter(|(bit, _)| open & bit == 0))
			.map(|(factor, (_, flow_rate))| factor * flow_rate)
			.sum()
	}

	fn explore(&mut self, node: Node<N>) {
		use itertools::Itertools as _;

		self.best = self.best.max(node.released);
		if node.released + self.upper_bound(node.time, node.open) < self.best { return }
		if node.time <= 0 { return }
		if node.positions.iter().zip(node.circling).any(|(&p, c)| c & 1 << p != 0) { return }
		let time = node.time - 1;

		// Per actor, `None` opens the current valve, `Some` moves through a tunnel
		let options = node.positions.iter()
			.map(|&p| {
				let open = (node.open & 1 << p == 0).then_some(None);
				open.into_iter().chain(self.scan.valves[p].tunnels.iter().map(|&t| Some(t)))
					.collect::<Vec<_>>()
			})
			.multi_cartesian_product();

		for actions in options {
			let mut next = Node { time, ..node };
			let mut opened_now = 0;
			let mut conflict = false;
			for (a, action) in actions.into_iter().enumerate() {
				let p = node.positions[a];
				match action {
					None => {
						if opened_now & 1 << p != 0 { conflict = true; break }
						opened_now |= 1 << p;
						next.released += self.scan.valves[p].flow_rate * time as u32;
						next.circling[a] = 0;
					}
					Some(t) => {
						next.positions[a] = t;
						next.circling[a] |= 1 << p;
					}
				}
			}
			if conflict { continue }
			next.open |= opened_now;
			self.explore(next);
		}
	}
}


#[derive(Debug, thiserror::Error)]
pub(crate) enum Error {
	#[error(transparent)]
	Parse(#[from] parsing::ScanError),
}


fn input_scan_from_str(s: &str) -> Result<Scan, parsing::ScanError> {
	s.parse()
}


fn part1and2_impl<const N: usize>(input_scan: &Scan, time: i32) -> u32 {
	let mut search = Search::<N>::new(input_scan);
	// Valves without flow are as good as open
	let open = input_scan.valves.iter()
		.enumerate()
		.filter(|(_, valve)| valve.flow_rate == 0)
		.fold(0, |open, (i, _)| open | 1 << i);
	search.explore(Node {
		time,
		positions: [input_scan.start; N],
		released: 0,
		open,
		circling: [0; N],
	});
	tracing::debug!(actors = N, best = search.best, "search finished");
	search.best
}

pub(crate) fn part1(input: &str) -> Result<u32, Error> {
	Ok(part1and2_impl::<1>(&input_scan_from_str(input)?, 30))
}

pub(crate) fn part2(input: &str) -> Result<u32, Error> {
	Ok(part1and2_impl::<2>(&input_scan_from_str(input)?, 26))
}


mod parsing {
	use std::{collections::HashMap, num::ParseIntError, str::FromStr};
	use super::{Scan, Valve};

	#[derive(Debug, thiserror::Error)]
	pub(crate) enum ValveError {
		#[error("expected `Valve <name> has flow rate=<rate>; tunnels lead to valves <name>, …`")]
		Format,
		#[error("invalid flow rate: {0}")]
		FlowRate(#[from] ParseIntError),
		#[error("unknown valve {0:?}")]
		Unknown(String),
	}

	#[derive(Debug, thiserror::Error)]
	pub(crate) enum ScanError {
		#[error("Invalid valve on line {line}: {source}")]
		Valve { line: usize, source: ValveError },
		#[error("Valve {0:?} is listed twice")]
		Duplicate(String),
		#[error("Too many valves ({0}); at most 64 are supported")]
		TooMany(usize),
		#[error("No valve `AA` to start from")]
		NoStart,
	}

	fn try_line_from_str(s: &str) -> Result<(&str, u32, Vec<&str>), ValveError> {
		let s = s.strip_prefix("Valve ").ok_or(ValveError::Format)?;
		let (name, s) = s.split_once(" has flow rate=").ok_or(ValveError::Format)?;
		let (flow_rate, s) = s.split_once("; ").ok_or(ValveError::Format)?;
		let tunnels = s.strip_prefix("tunnels lead to valves ")
			.or_else(|| s.strip_prefix("tunnel leads to valve "))
			.ok_or(ValveError::Format)?;
		Ok((name, flow_rate.parse()?, tunnels.split(", ").collect()))
	}

	impl FromStr for Scan {
		type Err = ScanError;
		fn from_str(s: &str) -> Result<Self, Self::Err> {
			let lines = s.lines()
				.enumerate()
				.filter(|(_, line)| !line.is_empty())
				.map(|(l, line)| try_line_from_str(line)
					.map(|parsed| (l + 1, parsed))
					.map_err(|e| ScanError::Valve { line: l + 1, source: e }))
				.collect::<Result<Vec<_>, _>>()?;
			if lines.len() > 64 { return Err(ScanError::TooMany(lines.len())) }

			let mut indices = HashMap::new();
			for (i, (_, (name, _, _))) in lines.iter().enumerate() {
				if indices.insert(*name, i).is_some() { return Err(ScanError::Duplicate(name.to_string())) }
			}

			let valves = lines.into_iter()
				.map(|(line, (_, flow_rate, tunnels))| {
					let tunnels = tunnels.into_iter()
						.map(|t| indices.get(t).copied()
							.ok_or_else(|| ScanError::Valve { line, source: ValveError::Unknown(t.to_owned()) }))
						.collect::<Result<_, _>>()?;
					Ok(Valve { flow_rate, tunnels })
				})
				.collect::<Result<_, ScanError>>()?;
			let start = *indices.get("AA").ok_or(ScanError::NoStart)?;
			Ok(Scan { valves, start })
		}
	}
}


#[test]
fn tests() {
	const INPUT: &str = indoc::indoc! { "
		Valve AA has flow rate=0; tunnels lead to valves DD, II, BB
		Valve BB has flow rate=13; tunnels lead to valves CC, AA
		Valve CC has flow rate=2; tunnels lead to valves DD, BB
		Valve DD has flow rate=20; tunnels lead to valves CC, AA, EE
		Valve EE has flow rate=3; tunnels lead to valves FF, DD
		Valve FF has flow rate=0; tunnels lead to valves EE, GG
		Valve GG has flow rate=0; tunnels lead to valves FF, HH
		Valve HH has flow rate=22; tunnel leads to valve GG
		Valve II has flow rate=0; tunnels lead to valves AA, JJ
		Valve JJ has flow rate=21; tunnel leads to valve II
	" };
	assert_eq!(bound_factors::<1>(5).collect::<Vec<_>>(), [4, 2]);
	assert_eq!(bound_factors::<2>(4).collect::<Vec<_>>(), [3, 3, 1, 1]);
	assert_eq!(bound_factors::<1>(1).count(), 0);

	let scan = input_scan_from_str(INPUT).unwrap();
	assert_eq!(scan.valves.len(), 10);
	assert_eq!(scan.valves[7].tunnels, [6]);
	assert_eq!(part1and2_impl::<1>(&scan, 30), 1651);
	assert_eq!(part1and2_impl::<2>(&scan, 26), 1707);

	assert!(matches!(input_scan_from_str("Valve BB has flow rate=1; tunnel leads to valve BB\n"),
		Err(parsing::ScanError::NoStart)));
	assert!(matches!(input_scan_from_str("Valve AA has flow rate=1; tunnel leads to valve ZZ\n"),
		Err(parsing::ScanError::Valve { line: 1, source: parsing::ValveError::Unknown(_) })));
}
