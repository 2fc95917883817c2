use std::time::{SystemTime, UNIX_EPOCH};

use log::info;
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::error::{Error, Result};
use super::gender::Gender;
use super::generation_input::GenerationInput;
use super::generator::NameGenerator;
use super::name_source::NameSource;
use super::transition_table::{build, TransitionTable};

/// A trained name model together with its random source.
///
/// This is the surface consumers (CLI, server) work with:
/// - `initialize` reads a corpus and trains a table (expensive)
/// - `reseed` changes the random source only (cheap)
/// - `generate_name` samples as many names as needed from the same table
///
/// Re-initializing with another gender or order means building a new
/// `MarkovModel`; nothing of the previous one is reused.
#[derive(Debug)]
pub struct MarkovModel {
	gender: Gender,
	generator: NameGenerator,
	rng: StdRng,
}

impl MarkovModel {
	/// Reads the corpus of `gender` from `source` and trains an
	/// order-`order` model, seeded from the wall clock.
	///
	/// # Errors
	/// - `InvalidParameter` if `order < 1`
	/// - `EmptyCorpus` if the source has no names for this gender
	/// - any error raised by the source
	pub fn initialize<S: NameSource + ?Sized>(source: &S, gender: Gender, order: usize) -> Result<Self> {
		Self::with_seed(source, gender, order, clock_seed())
	}

	/// Same as [`MarkovModel::initialize`] with a fixed seed.
	pub fn with_seed<S: NameSource + ?Sized>(
		source: &S,
		gender: Gender,
		order: usize,
		seed: u64,
	) -> Result<Self> {
		if order < 1 {
			return Err(Error::InvalidParameter("order must be >= 1".to_owned()));
		}

		let names = source.read_names(gender)?;
		if names.is_empty() {
			return Err(Error::EmptyCorpus { gender });
		}

		let table = build(&names, order)?;
		info!(
			"trained {gender} model: order {order}, {} names, {} contexts",
			names.len(),
			table.len()
		);

		Ok(Self {
			gender,
			generator: NameGenerator::new(table, names),
			rng: StdRng::seed_from_u64(seed),
		})
	}

	/// Reseeds the random source from the wall clock.
	pub fn reseed(&mut self) {
		self.reseed_from(clock_seed());
	}

	/// Reseeds the random source with a fixed seed.
	pub fn reseed_from(&mut self, seed: u64) {
		self.rng = StdRng::seed_from_u64(seed);
	}

	/// Generates one name; see [`NameGenerator::generate`].
	pub fn generate_name(&mut self, input: &GenerationInput) -> Result<String> {
		self.generator.generate(input, &mut self.rng)
	}

	/// Generates `count` names, stopping at the first error.
	pub fn generate_names(&mut self, input: &GenerationInput, count: usize) -> Result<Vec<String>> {
		(0..count).map(|_| self.generate_name(input)).collect()
	}

	pub fn gender(&self) -> Gender {
		self.gender
	}

	pub fn order(&self) -> usize {
		self.generator.table().order()
	}

	pub fn table(&self) -> &TransitionTable {
		self.generator.table()
	}

	/// Number of distinct training names.
	pub fn corpus_len(&self) -> usize {
		self.generator.known_len()
	}
}

/// Seed derived from the current time (nanoseconds since the epoch).
fn clock_seed() -> u64 {
	SystemTime::now()
		.duration_since(UNIX_EPOCH)
		.map(|elapsed| elapsed.as_nanos() as u64)
		.unwrap_or_default()
}
