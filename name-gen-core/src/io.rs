use std::fs::{self, File};
use std::io::Read;
use std::path::{Path, PathBuf};
use std::env;

use crate::error::{Error, Result};

/// Reads a text file and returns all its lines as a `Vec<String>`.
///
/// - Reads the entire file into memory
/// - Splits on `\n` / `\r\n`
pub fn read_file<P: AsRef<Path>>(filename: P) -> Result<Vec<String>> {
	let path = filename.as_ref();
	let mut contents = String::new();
	File::open(path)
		.and_then(|mut file| file.read_to_string(&mut contents))
		.map_err(|source| Error::Io { path: path.to_path_buf(), source })?;
	Ok(contents.lines().map(str::to_owned).collect())
}

/// Reads a corpus file: one name per line.
///
/// - Surrounding whitespace is trimmed
/// - Blank lines are skipped
/// - Names are lower-cased so the model sees a single case
pub fn read_names<P: AsRef<Path>>(filename: P) -> Result<Vec<String>> {
	Ok(read_file(filename)?
		.iter()
		.map(|line| line.trim())
		.filter(|line| !line.is_empty())
		.map(str::to_lowercase)
		.collect())
}

/// Extracts the base filename without extension.
///
/// Examples:
/// - `"./data/female.txt"` → `"female"`
/// - `"male.txt"` → `"male"`
pub fn get_filename<P: AsRef<Path>>(input_path: P) -> Option<String> {
	input_path
		.as_ref()
		.file_stem()
		.map(|stem| stem.to_string_lossy().to_string())
}

/// Normalize a folder path.
///
/// - `"."` or `"./"` resolves to the current working directory
/// - Other paths are returned as-is (not canonicalized)
pub fn normalize_folder(input: &str) -> PathBuf {
	if input == "." || input == "./" {
		env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
	} else {
		PathBuf::from(input)
	}
}

/// Lists all files with a given extension in a directory.
///
/// Returns file names only (no paths), sorted.
pub fn list_files<P: AsRef<Path>>(dir: P, extension: &str) -> Result<Vec<String>> {
	let dir = dir.as_ref();
	let io_error = |source: std::io::Error| Error::Io { path: dir.to_path_buf(), source };
	let mut files = Vec::new();

	for entry in fs::read_dir(dir).map_err(io_error)? {
		let path = entry.map_err(io_error)?.path();

		if path.is_file() && path.extension() == Some(std::ffi::OsStr::new(extension)) {
			if let Some(name) = path.file_name() {
				files.push(name.to_string_lossy().to_string());
			}
		}
	}

	files.sort();
	Ok(files)
}
