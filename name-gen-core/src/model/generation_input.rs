/// Retry cap used when none is given explicitly.
pub const DEFAULT_MAX_ATTEMPTS: usize = 10_000;

/// Sampling parameters for one generated name.
///
/// # Responsibilities
/// - Carry the inclusive length range a name must fall in
/// - Carry the retry cap applied when candidates are rejected
///
/// # Notes
/// - `max_length == 0` or `min_length > max_length` is not an error: the
///   generator returns an empty name for such a range.
/// - `max_attempts == None` retries forever. A model that can never produce
///   an acceptable name (ex. `min_length` longer than anything it generates,
///   or a corpus of one name) then never returns.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GenerationInput {
	/// Minimum number of characters (inclusive).
	pub min_length: usize,

	/// Maximum number of characters (inclusive).
	pub max_length: usize,

	/// Number of candidates to try before giving up, `None` for no limit.
	pub max_attempts: Option<usize>,
}

impl GenerationInput {
	/// Creates an input for names of `min_length..=max_length` characters
	/// with the default retry cap.
	pub fn new(min_length: usize, max_length: usize) -> Self {
		Self {
			min_length,
			max_length,
			max_attempts: Some(DEFAULT_MAX_ATTEMPTS),
		}
	}

	/// Sets the retry cap.
	pub fn with_max_attempts(mut self, max_attempts: usize) -> Self {
		self.max_attempts = Some(max_attempts);
		self
	}

	/// Removes the retry cap.
	pub fn unbounded(mut self) -> Self {
		self.max_attempts = None;
		self
	}

	/// Whether any name can satisfy the length range.
	pub fn is_satisfiable(&self) -> bool {
		self.max_length > 0 && self.min_length <= self.max_length
	}

	/// Whether a name of `length` characters is within range.
	pub fn accepts_length(&self, length: usize) -> bool {
		(self.min_length..=self.max_length).contains(&length)
	}
}

impl Default for GenerationInput {
	fn default() -> Self {
		Self::new(1, 12)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn range_is_inclusive() {
		let input = GenerationInput::new(3, 5);
		assert!(!input.accepts_length(2));
		assert!(input.accepts_length(3));
		assert!(input.accepts_length(5));
		assert!(!input.accepts_length(6));
	}

	#[test]
	fn unsatisfiable_ranges() {
		assert!(!GenerationInput::new(0, 0).is_satisfiable());
		assert!(!GenerationInput::new(6, 5).is_satisfiable());
		assert!(GenerationInput::new(0, 1).is_satisfiable());
		assert!(GenerationInput::new(4, 4).is_satisfiable());
	}

	#[test]
	fn retry_cap_builders() {
		let input = GenerationInput::new(1, 10);
		assert_eq!(input.max_attempts, Some(DEFAULT_MAX_ATTEMPTS));
		assert_eq!(input.with_max_attempts(3).max_attempts, Some(3));
		assert_eq!(input.unbounded().max_attempts, None);
	}
}
