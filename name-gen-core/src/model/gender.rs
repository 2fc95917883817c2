use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Selects which list of names a model is trained on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Gender {
	Male,
	Female,
}

impl Gender {
	pub const ALL: [Gender; 2] = [Gender::Male, Gender::Female];

	/// File stem of the corpus for this gender (`male` / `female`).
	pub fn file_stem(&self) -> &'static str {
		match self {
			Gender::Male => "male",
			Gender::Female => "female",
		}
	}
}

impl fmt::Display for Gender {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.file_stem())
	}
}

/// Parses a gender from user input.
///
/// Only the first letter matters, case-insensitive:
/// `m`, `Male`, `MALE` → `Male`; `f`, `female` → `Female`.
impl FromStr for Gender {
	type Err = Error;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.trim().chars().next().map(|c| c.to_ascii_lowercase()) {
			Some('m') => Ok(Gender::Male),
			Some('f') => Ok(Gender::Female),
			_ => Err(Error::InvalidParameter(format!(
				"unknown gender '{}', expected 'm' or 'f'",
				s.trim()
			))),
		}
	}
}

impl TryFrom<String> for Gender {
	type Error = Error;

	fn try_from(value: String) -> Result<Self, Self::Error> {
		value.parse()
	}
}

impl From<Gender> for String {
	fn from(gender: Gender) -> Self {
		gender.file_stem().to_owned()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parses_first_letter() {
		assert_eq!("m".parse::<Gender>().unwrap(), Gender::Male);
		assert_eq!("Male".parse::<Gender>().unwrap(), Gender::Male);
		assert_eq!(" FEMALE ".parse::<Gender>().unwrap(), Gender::Female);
		assert_eq!("f".parse::<Gender>().unwrap(), Gender::Female);
	}

	#[test]
	fn rejects_unknown_input() {
		assert!("".parse::<Gender>().is_err());
		assert!("x".parse::<Gender>().is_err());
	}

	#[test]
	fn file_stem_round_trips() {
		for gender in Gender::ALL {
			assert_eq!(gender.file_stem().parse::<Gender>().unwrap(), gender);
		}
	}
}
