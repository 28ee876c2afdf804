// Copyright (c) 2022 Bastiaan Marinus van de Weerd

use std::ops::RangeInclusive;


#[derive(Clone, Copy)]
#[cfg_attr(test, derive(Debug, PartialEq, Eq))]
struct Sensor {
	pos: [i64; 2],
	beacon: [i64; 2],
}

impl Sensor {
	fn radius(&self) -> i64 {
		(self.beacon[0] - self.pos[0]).abs() + (self.beacon[1] - self.pos[1]).abs()
	}

	fn covers(&self, [x, y]: [i64; 2]) -> bool {
		(x - self.pos[0]).abs() + (y - self.pos[1]).abs() <= self.radius()
	}

	/// The positions on `row` within range, if any.
	fn row_coverage(&self, row: i64) -> Option<RangeInclusive<i64>> {
		let half_width = self.radius() - (row - self.pos[1]).abs();
		(half_width >= 0).then(|| self.pos[0] - half_width..=self.pos[0] + half_width)
	}

	/// Every position just outside the range.
	fn boundary(&self) -> impl Iterator<Item = [i64; 2]> {
		let ([x, y], d) = (self.pos, self.radius());
		[[x - d - 1, y], [x + d + 1, y]].into_iter()
			.chain((-d..=d).flat_map(move |offset| {
				let dy = d - offset.abs() + 1;
				[[x + offset, y + dy], [x + offset, y - dy]]
			}))
	}
}

fn covered(sensors: &[Sensor], pos: [i64; 2]) -> bool {
	sensors.iter().any(|sensor| sensor.covers(pos))
}

fn tuning_frequency([x, y]: [i64; 2]) -> i64 {
	4_000_000 * x + y
}


#[derive(Debug, thiserror::Error)]
pub(crate) enum Error {
	#[error(transparent)]
	Parse(#[from] parsing::SensorsError),
	#[error("No position within 0..={0} is out of every sensor's range")]
	NotFound(i64),
}


fn input_sensors_from_str(s: &str) -> Result<Vec<Sensor>, parsing::SensorsError> {
	parsing::sensors_from_str(s).collect()
}


fn part1_impl(input_sensors: &[Sensor], row: i64) -> u64 {
	use itertools::Itertools as _;

	let merged = input_sensors.iter()
		.filter_map(|sensor| sensor.row_coverage(row))
		.sorted_by_key(|range| *range.start())
		.coalesce(|a, b| if *b.start() <= *a.end() + 1 {
			Ok(*a.start()..=*a.end().max(b.end()))
		} else {
			Err((a, b))
		})
		.collect::<Vec<_>>();

	let covered = merged.iter().map(|range| (range.end() - range.start() + 1) as u64).sum::<u64>();
	let beacons = input_sensors.iter()
		.filter(|sensor| sensor.beacon[1] == row)
		.map(|sensor| sensor.beacon[0])
		.unique()
		.filter(|x| merged.iter().any(|range| range.contains(x)))
		.count() as u64;
	covered - beacons
}

pub(crate) fn part1(input: &str) -> Result<u64, Error> {
	Ok(part1_impl(&input_sensors_from_str(input)?, 2_000_000))
}


/// Intersections of the diagonals hugging each sensor's range from outside.
fn diagonal_candidates(sensors: &[Sensor], max: i64) -> Option<[i64; 2]> {
	use {itertools::Itertools as _, rayon::prelude::*};

	let (ascending, descending): (Vec<_>, Vec<_>) = sensors.iter()
		.flat_map(|sensor| {
			let ([x, y], d) = (sensor.pos, sensor.radius() + 1);
			[(y - x + d, y + x + d), (y - x - d, y + x - d)]
		})
		.unzip();
	let ascending = ascending.into_iter().unique().collect::<Vec<_>>();
	let descending = descending.into_iter().unique().collect::<Vec<_>>();

	ascending.par_iter().find_map_any(|&a| descending.iter().find_map(|&b| {
		if (a + b) % 2 != 0 { return None }
		let pos = [(b - a) / 2, (a + b) / 2];
		let in_bounds = pos.iter().all(|c| (0..=max).contains(c));
		(in_bounds && !covered(sensors, pos)).then_some(pos)
	}))
}

fn boundary_scan(sensors: &[Sensor], max: i64) -> Option<[i64; 2]> {
	use rayon::prelude::*;

	sensors.par_iter().find_map_any(|sensor| sensor.boundary()
		.filter(|pos| pos.iter().all(|c| (0..=max).contains(c)))
		.find(|&pos| !covered(sensors, pos)))
}

fn part2_impl(input_sensors: &[Sensor], max: i64) -> Result<i64, Error> {
	let pos = diagonal_candidates(input_sensors, max)
		.or_else(|| {
			tracing::debug!("no diagonal intersection qualifies, scanning boundaries");
			boundary_scan(input_sensors, max)
		})
		.ok_or(Error::NotFound(max))?;
	tracing::debug!(x = pos[0], y = pos[1], "found distress beacon");
	Ok(tuning_frequency(pos))
}

pub(crate) fn part2(input: &str) -> Result<i64, Error> {
	part2_impl(&input_sensors_from_str(input)?, 4_000_000)
}


mod parsing {
	use std::{num::ParseIntError, str::FromStr};
	use super::Sensor;

	#[derive(Debug, thiserror::Error)]
	pub(crate) enum SensorError {
		#[error("expected `Sensor at x=<x>, y=<y>: closest beacon is at x=<x>, y=<y>`")]
		Format,
		#[error("invalid coordinate: {0}")]
		Coordinate(#[from] ParseIntError),
	}

	fn try_pos_from_str(s: &str) -> Result<[i64; 2], SensorError> {
		let s = s.strip_prefix("x=").ok_or(SensorError::Format)?;
		let (x, y) = s.split_once(", y=").ok_or(SensorError::Format)?;
		Ok([x.parse()?, y.parse()?])
	}

	impl FromStr for Sensor {
		type Err = SensorError;
		fn from_str(s: &str) -> Result<Self, Self::Err> {
			let s = s.strip_prefix("Sensor at ").ok_or(SensorError::Format)?;
			let (pos, beacon) = s.split_once(": closest beacon is at ").ok_or(SensorError::Format)?;
			Ok(Sensor { pos: try_pos_from_str(pos)?, beacon: try_pos_from_str(beacon)? })
		}
	}

	#[derive(Debug, thiserror::Error)]
	#[error("Invalid sensor on line {line}: {source}")]
	pub(crate) struct SensorsError { line: usize, source: SensorError }

	pub(super) fn sensors_from_str(s: &str) -> impl Iterator<Item = Result<Sensor, SensorsError>> + '_ {
		s.lines()
			.enumerate()
			.filter(|(_, line)| !line.is_empty())
			.map(|(l, line)| line.parse()
				.map_err(|e| SensorsError { line: l + 1, source: e }))
	}
}


#[test]
fn tests() {
	use std::collections::HashSet;

	const INPUT: &str = indoc::indoc! { "
		Sensor at x=2, y=18: closest beacon is at x=-2, y=15
		Sensor at x=9, y=16: closest beacon is at x=10, y=16
		Sensor at x=13, y=2: closest beacon is at x=15, y=3
		Sensor at x=12, y=14: closest beacon is at x=10, y=16
		Sensor at x=10, y=20: closest beacon is at x=10, y=16
		Sensor at x=14, y=17: closest beacon is at x=10, y=16
		Sensor at x=8, y=7: closest beacon is at x=2, y=10
		Sensor at x=2, y=0: closest beacon is at x=2, y=10
		Sensor at x=0, y=11: closest beacon is at x=2, y=10
		Sensor at x=20, y=14: closest beacon is at x=25, y=17
		Sensor at x=17, y=20: closest beacon is at x=21, y=22
		Sensor at x=16, y=7: closest beacon is at x=15, y=3
		Sensor at x=14, y=3: closest beacon is at x=15, y=3
		Sensor at x=20, y=1: closest beacon is at x=15, y=3
	" };
	let sensors = input_sensors_from_str(INPUT).unwrap();
	assert_eq!(sensors[0], Sensor { pos: [2, 18], beacon: [-2, 15] });
	assert_eq!(part1_impl(&sensors, 10), 26);

	let boundary = Sensor { pos: [2, 0], beacon: [2, 2] }.boundary().collect::<HashSet<_>>();
	assert_eq!(boundary, HashSet::from([
		[-1, 0], [0, -1], [1, -2], [2, -3], [3, -2], [4, -1],
		[5, 0], [4, 1], [3, 2], [2, 3], [1, 2], [0, 1],
	]));

	assert_eq!(diagonal_candidates(&sensors, 20), Some([14, 11]));
	assert_eq!(boundary_scan(&sensors, 20), Some([14, 11]));
	assert_eq!(part2_impl(&sensors, 20).unwrap(), 56_000_011);

	let everywhere = [Sensor { pos: [10, 10], beacon: [10, 30] }];
	assert!(matches!(part2_impl(&everywhere, 20), Err(Error::NotFound(20))));
}
