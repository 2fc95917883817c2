use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::io;
use super::gender::Gender;

/// Extension of corpus files in a data folder.
pub const CORPUS_EXTENSION: &str = "txt";

/// Supplies the training corpus of a gender.
///
/// Implementations return bare names (no boundary markers) in a stable
/// order. The model builder marks boundaries itself.
pub trait NameSource {
	fn read_names(&self, gender: Gender) -> Result<Vec<String>>;
}

/// Reads `<folder>/<gender>.txt`, one name per line.
#[derive(Clone, Debug)]
pub struct FileNameSource {
	folder: PathBuf,
}

impl FileNameSource {
	/// Creates a source over a data folder.
	///
	/// Both `"folder"` and `"folder/"` are accepted, `"."` is the current
	/// working directory.
	pub fn new<P: AsRef<Path>>(folder: P) -> Self {
		let folder = folder.as_ref();
		let folder = match folder.to_str() {
			Some(s) => io::normalize_folder(s),
			None => folder.to_path_buf(),
		};
		Self { folder }
	}

	pub fn folder(&self) -> &Path {
		&self.folder
	}

	/// Path of the corpus file for a gender.
	pub fn path_for(&self, gender: Gender) -> PathBuf {
		self.folder
			.join(gender.file_stem())
			.with_extension(CORPUS_EXTENSION)
	}

	/// Genders whose corpus file exists in the folder.
	pub fn available(&self) -> Result<Vec<Gender>> {
		let genders = io::list_files(&self.folder, CORPUS_EXTENSION)?
			.iter()
			.filter_map(|file| io::get_filename(file))
			.filter_map(|stem| {
				let gender = stem.parse::<Gender>().ok()?;
				(gender.file_stem() == stem).then_some(gender)
			})
			.collect();
		Ok(genders)
	}
}

impl NameSource for FileNameSource {
	fn read_names(&self, gender: Gender) -> Result<Vec<String>> {
		io::read_names(self.path_for(gender))
	}
}

/// In-memory corpus, one list per gender.
///
/// A gender without a list reads as an empty corpus.
#[derive(Clone, Debug, Default)]
pub struct MemoryNameSource {
	names: HashMap<Gender, Vec<String>>,
}

impl MemoryNameSource {
	pub fn new() -> Self {
		Self::default()
	}

	/// Sets the list of names for a gender, replacing any previous one.
	pub fn with_names<I, S>(mut self, gender: Gender, names: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.names.insert(gender, names.into_iter().map(Into::into).collect());
		self
	}
}

impl NameSource for MemoryNameSource {
	fn read_names(&self, gender: Gender) -> Result<Vec<String>> {
		Ok(self.names.get(&gender).cloned().unwrap_or_default())
	}
}
