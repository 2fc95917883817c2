use std::collections::HashSet;

use log::{debug, trace};
use rand::Rng;

use crate::error::{Error, Result};
use super::generation_input::GenerationInput;
use super::symbol::Context;
use super::transition_table::TransitionTable;

/// Samples names from a transition table.
///
/// # Responsibilities
/// - Walk the Markov chain from the start boundary until an end boundary
/// - Reject candidates outside the length range or already in the corpus
/// - Capitalize accepted names
///
/// The generator never mutates its table; the only mutable state touched
/// while generating is the random source, owned by the caller.
#[derive(Clone, Debug)]
pub struct NameGenerator {
	table: TransitionTable,
	/// Training names (without boundaries), used to reject copies.
	known_names: HashSet<String>,
}

impl NameGenerator {
	/// Creates a generator from a table and the corpus it was built from.
	pub fn new<I, S>(table: TransitionTable, corpus: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		Self {
			table,
			known_names: corpus.into_iter().map(Into::into).collect(),
		}
	}

	pub fn table(&self) -> &TransitionTable {
		&self.table
	}

	/// Number of distinct training names.
	pub fn known_len(&self) -> usize {
		self.known_names.len()
	}

	/// Whether `name` is, case-sensitively, one of the training names.
	pub fn is_known(&self, name: &str) -> bool {
		self.known_names.contains(name)
	}

	/// Generates one name satisfying `input`.
	///
	/// # Returns
	/// - `Ok("")` if the length range is empty (`max_length == 0` or
	///   `min_length > max_length`)
	/// - `Ok(name)` with the first character upper-cased otherwise
	///
	/// # Errors
	/// Returns `RetryExhausted` once `input.max_attempts` candidates have
	/// been rejected. Without a cap this method may never return.
	pub fn generate<R: Rng + ?Sized>(&self, input: &GenerationInput, rng: &mut R) -> Result<String> {
		if !input.is_satisfiable() {
			return Ok(String::new());
		}

		let mut attempts = 0;
		loop {
			if input.max_attempts.is_some_and(|max| attempts >= max) {
				debug!("giving up after {attempts} rejected candidates");
				return Err(Error::RetryExhausted { attempts });
			}
			attempts += 1;

			let candidate = self.sample_candidate(rng, input.max_length);
			let length = candidate.chars().count();

			if !input.accepts_length(length) {
				trace!("rejected '{candidate}': length {length} out of range");
				continue;
			}
			// The returned form is capitalized, so both spellings must be new
			let name = capitalize(&candidate);
			if self.is_known(&candidate) || self.is_known(&name) {
				trace!("rejected '{candidate}': already in corpus");
				continue;
			}

			debug!("accepted '{name}' after {attempts} attempt(s)");
			return Ok(name);
		}
	}

	/// Walks the chain once and returns the raw (lower-case) candidate.
	///
	/// Sampling stops early once the candidate exceeds `limit` characters:
	/// such a candidate is rejected whatever comes next.
	pub fn sample_candidate<R: Rng + ?Sized>(&self, rng: &mut R, limit: usize) -> String {
		let order = self.table.order();
		let mut name = String::new();
		let mut length = 0;
		let mut context = Context::start();

		loop {
			let draw: f64 = rng.random();
			match self.table.next_symbol(&context, draw).as_char() {
				None => break,
				Some(c) => {
					name.push(c);
					length += 1;
					if length > limit {
						break;
					}
					context.push(c, order);
				}
			}
		}

		name
	}
}

/// Upper-cases the first character of `name`.
pub fn capitalize(name: &str) -> String {
	let mut chars = name.chars();
	match chars.next() {
		Some(first) => first.to_uppercase().chain(chars).collect(),
		None => String::new(),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::model::transition_table::build;
	use rand::SeedableRng;
	use rand::rngs::StdRng;

	fn generator(corpus: &[&str], order: usize) -> NameGenerator {
		let table = build(corpus, order).unwrap();
		NameGenerator::new(table, corpus.iter().copied())
	}

	#[test]
	fn capitalize_first_char_only() {
		assert_eq!(capitalize("anna"), "Anna");
		assert_eq!(capitalize("a"), "A");
		assert_eq!(capitalize(""), "");
		assert_eq!(capitalize("élodie"), "Élodie");
	}

	#[test]
	fn zero_max_length_returns_empty() {
		let generator = generator(&["ann", "amy"], 1);
		let mut rng = StdRng::seed_from_u64(7);
		for min in 0..3 {
			let name = generator.generate(&GenerationInput::new(min, 0), &mut rng).unwrap();
			assert_eq!(name, "");
		}
	}

	#[test]
	fn inverted_range_returns_empty() {
		let generator = generator(&["ann", "amy"], 1);
		let mut rng = StdRng::seed_from_u64(7);
		let name = generator.generate(&GenerationInput::new(5, 4), &mut rng);
		assert_eq!(name.unwrap(), "");
	}

	#[test]
	fn ann_amy_never_returns_corpus_names() {
		let generator = generator(&["ann", "amy"], 1);
		let mut rng = StdRng::seed_from_u64(42);
		let input = GenerationInput::new(1, 10);

		for _ in 0..200 {
			let name = generator.generate(&input, &mut rng).unwrap();
			assert_ne!(name, "Ann");
			assert_ne!(name, "Amy");
			assert!(name.starts_with('A'));
			let length = name.chars().count();
			assert!((1..=10).contains(&length), "'{name}' out of range");
		}
	}

	#[test]
	fn capitalized_corpus_names_are_not_returned() {
		// "ann" would be returned as "Ann", which is a training name
		let generator = generator(&["Ann", "anx", "xnn"], 1);
		let mut rng = StdRng::seed_from_u64(1);
		let input = GenerationInput::new(3, 3);

		for _ in 0..500 {
			let name = generator.generate(&input, &mut rng).unwrap();
			assert!(!generator.is_known(&name), "'{name}' is a training name");
			assert_eq!(name.chars().count(), 3);
		}
	}

	#[test]
	fn single_name_model_exhausts_retries() {
		// "bob" is the only path through this chain and is always rejected
		let generator = generator(&["bob"], 2);
		let mut rng = StdRng::seed_from_u64(1);
		let input = GenerationInput::new(1, 10).with_max_attempts(50);

		match generator.generate(&input, &mut rng) {
			Err(Error::RetryExhausted { attempts }) => assert_eq!(attempts, 50),
			other => panic!("unexpected result: {other:?}"),
		}
	}

	#[test]
	fn empty_table_yields_empty_candidate() {
		let corpus: [&str; 0] = [];
		let generator = generator(&corpus, 2);
		let mut rng = StdRng::seed_from_u64(3);

		assert_eq!(generator.sample_candidate(&mut rng, 10), "");
		assert_eq!(generator.generate(&GenerationInput::new(0, 5), &mut rng).unwrap(), "");
		assert!(matches!(
			generator.generate(&GenerationInput::new(1, 5).with_max_attempts(5), &mut rng),
			Err(Error::RetryExhausted { attempts: 5 })
		));
	}

	#[test]
	fn sample_candidate_stops_past_limit() {
		// "n" mostly loops on itself
		let generator = generator(&["ann", "annnnnnnnnnn"], 1);
		let mut rng = StdRng::seed_from_u64(9);
		for _ in 0..100 {
			assert!(generator.sample_candidate(&mut rng, 3).chars().count() <= 4);
		}
	}

	#[test]
	fn same_seed_same_names() {
		let generator = generator(&["emma", "olivia", "ava", "isabella", "sophia"], 1);
		let input = GenerationInput::new(2, 8);

		let mut left = StdRng::seed_from_u64(11);
		let mut right = StdRng::seed_from_u64(11);
		for _ in 0..20 {
			assert_eq!(
				generator.generate(&input, &mut left).unwrap(),
				generator.generate(&input, &mut right).unwrap()
			);
		}
	}
}
