// Copyright (c) 2022 Bastiaan Marinus van de Weerd

use std::collections::HashMap;


const DISK_SIZE: u64 = 70_000_000;
const SPACE_NEEDED: u64 = 30_000_000;


#[derive(Default)]
#[cfg_attr(test, derive(Debug))]
struct Dir<'s> {
	parent: Option<usize>,
	dirs: HashMap<&'s str, usize>,
	files: HashMap<&'s str, u64>,
	/// Total size, including all nested directories.
	size: u64,
}

/// Directories in an arena; index 0 is the root.
#[cfg_attr(test, derive(Debug))]
struct FileSystem<'s>(Vec<Dir<'s>>);

impl<'s> FileSystem<'s> {
	fn new() -> Self {
		FileSystem(vec![Dir::default()])
	}

	fn add_dir(&mut self, parent: usize, name: &'s str) -> usize {
		if let Some(&existing) = self.0[parent].dirs.get(name) { return existing }
		let index = self.0.len();
		self.0.push(Dir { parent: Some(parent), ..Dir::default() });
		self.0[parent].dirs.insert(name, index);
		index
	}

	/// Adds a file, unless listed before, and grows the sizes of its ancestors.
	fn add_file(&mut self, dir: usize, name: &'s str, size: u64) {
		if self.0[dir].files.insert(name, size).is_some() { return }
		let mut current = Some(dir);
		while let Some(index) = current {
			self.0[index].size += size;
			current = self.0[index].parent;
		}
	}

	fn sizes(&self) -> impl Iterator<Item = u64> + '_ {
		self.0.iter().map(|dir| dir.size)
	}

	fn used(&self) -> u64 {
		self.0[0].size
	}
}


#[derive(Debug, thiserror::Error)]
pub(crate) enum Error {
	#[error(transparent)]
	Parse(#[from] parsing::TranscriptError),
	#[error("No single directory frees up {0} more bytes")]
	NothingToDelete(u64),
}


fn input_file_system_from_str(s: &str) -> Result<FileSystem<'_>, parsing::TranscriptError> {
	parsing::file_system_from_str(s)
}


fn part1_impl(input_file_system: &FileSystem) -> u64 {
	input_file_system.sizes()
		.filter(|&size| size <= 100_000)
		.sum()
}

pub(crate) fn part1(input: &str) -> Result<u64, Error> {
	Ok(part1_impl(&input_file_system_from_str(input)?))
}


fn part2_impl(input_file_system: &FileSystem) -> Result<u64, Error> {
	let free = DISK_SIZE.saturating_sub(input_file_system.used());
	let to_free = SPACE_NEEDED.saturating_sub(free);
	input_file_system.sizes()
		.filter(|&size| size >= to_free)
		.min()
		.ok_or(Error::NothingToDelete(to_free))
}

pub(crate) fn part2(input: &str) -> Result<u64, Error> {
	part2_impl(&input_file_system_from_str(input)?)
}


mod parsing {
	use super::FileSystem;

	#[derive(Debug, thiserror::Error)]
	pub(crate) enum LineError {
		#[error("no such directory {0:?}")]
		UnknownDir(String),
		#[error("already at the root directory")]
		AboveRoot,
		#[error("listing output without an `ls` command")]
		UnexpectedOutput,
		#[error("unrecognized command or output")]
		Format,
	}

	#[derive(Debug, thiserror::Error)]
	#[error("Invalid transcript on line {line}: {source}")]
	pub(crate) struct TranscriptError { line: usize, source: LineError }

	pub(super) fn file_system_from_str(s: &str) -> Result<FileSystem<'_>, TranscriptError> {
		let mut fs = FileSystem::new();
		let mut cwd = 0;
		let mut listing = false;

		for (l, line) in s.lines().enumerate() {
			if line.is_empty() { continue }
			let err = |source| TranscriptError { line: l + 1, source };

			if let Some(cmd) = line.strip_prefix("$ ") {
				listing = false;
				match cmd.split_once(' ') {
					None if cmd == "ls" => listing = true,
					Some(("cd", "/")) => cwd = 0,
					Some(("cd", "..")) => cwd = fs.0[cwd].parent.ok_or_else(|| err(LineError::AboveRoot))?,
					Some(("cd", name)) => cwd = *fs.0[cwd].dirs.get(name)
						.ok_or_else(|| err(LineError::UnknownDir(name.to_owned())))?,
					_ => return Err(err(LineError::Format)),
				}
				continue
			}

			if !listing { return Err(err(LineError::UnexpectedOutput)) }
			match line.split_once(' ') {
				Some(("dir", name)) => { fs.add_dir(cwd, name); }
				Some((size, name)) => {
					let size = size.parse().map_err(|_| err(LineError::Format))?;
					fs.add_file(cwd, name, size);
				}
				None => return Err(err(LineError::Format)),
			}
		}

		Ok(fs)
	}
}


#[test]
fn tests() {
	const INPUT: &str = indoc::indoc! { "
		$ cd /
		$ ls
		dir a
		14848514 b.txt
		8504156 c.dat
		dir d
		$ cd a
		$ ls
		dir e
		29116 f
		2557 g
		62596 h.lst
		$ cd e
		$ ls
		584 i
		$ cd ..
		$ cd ..
		$ cd d
		$ ls
		4060174 j
		8033020 d.log
		5626152 d.ext
		7214296 k
	" };
	let fs = input_file_system_from_str(INPUT).unwrap();
	assert_eq!(fs.used(), 48_381_165);
	assert_eq!(part1_impl(&fs), 95_437);
	assert_eq!(part2_impl(&fs).unwrap(), 24_933_642);

	// Listing a directory twice does not count its files twice
	let fs = input_file_system_from_str("$ ls\n10 a\n$ ls\n10 a\n").unwrap();
	assert_eq!(fs.used(), 10);
	assert!(input_file_system_from_str("$ cd ..\n").is_err());
	assert!(input_file_system_from_str("$ cd x\n").is_err());
}
