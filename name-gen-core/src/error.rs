use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::model::gender::Gender;

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while building a model or generating names.
///
/// An unknown context during sampling is not an error: it resolves to the
/// end of the name. An impossible length range (`max_length == 0` or
/// `min_length > max_length`) is not an error either and yields an empty name.
#[derive(Debug, Error)]
pub enum Error {
	/// A parameter is outside its valid domain (ex. `order == 0`).
	#[error("invalid parameter: {0}")]
	InvalidParameter(String),

	/// Two count tables built with different orders cannot be merged.
	#[error("order mismatch: expected {expected}, found {found}")]
	OrderMismatch { expected: usize, found: usize },

	/// Every candidate was rejected and the retry cap was reached.
	#[error("no valid name after {attempts} attempts")]
	RetryExhausted { attempts: usize },

	/// The name source has no usable names for this gender.
	#[error("no names available for gender '{gender}'")]
	EmptyCorpus { gender: Gender },

	/// A corpus file could not be read.
	#[error("failed to read '{}': {source}", .path.display())]
	Io {
		path: PathBuf,
		#[source]
		source: io::Error,
	},
}
