use std::collections::BTreeMap;

use crate::error::{Error, Result};
use super::symbol::{Context, Symbol};
use super::transition_table::Distribution;

/// Raw observations for one context of the Markov chain.
///
/// A `State` is a node of the chain during learning: it counts how many
/// times each symbol followed its `context`, and keeps the running total
/// used as the denominator when the state is turned into probabilities.
///
/// ## Responsibilities:
/// - Accumulate transition occurrences during learning
/// - Convert counts to a probability distribution (percentify)
/// - Merge with another state having the same context (parallel learning)
///
/// ## Invariants
/// - All transitions belong to the same `context`
/// - Each transition occurrence count is strictly positive
/// - `total` is the sum of all occurrence counts
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct State {
	/// Context this state conditions on.
	context: Context,
	/// Sum of every occurrence below.
	total: usize,
	/// Outgoing transitions indexed by the next symbol.
	/// Example: { 'e' => 42, 'a' => 3, Boundary => 7 }
	transitions: BTreeMap<Symbol, usize>,
}

impl State {
	/// Creates a new empty state for the given context.
	pub fn new(context: Context) -> Self {
		Self {
			context,
			total: 0,
			transitions: BTreeMap::new(),
		}
	}

	/// Records an occurrence of a transition toward `next`.
	pub fn add_transition(&mut self, next: Symbol) {
		*self.transitions.entry(next).or_insert(0) += 1;
		self.total += 1;
	}

	pub fn context(&self) -> &Context {
		&self.context
	}

	pub fn total(&self) -> usize {
		self.total
	}

	/// Number of times `next` followed this context.
	pub fn count(&self, next: Symbol) -> usize {
		self.transitions.get(&next).copied().unwrap_or(0)
	}

	/// Iterates over `(next, occurrences)` in symbol order.
	pub fn transitions(&self) -> impl Iterator<Item = (Symbol, usize)> + '_ {
		self.transitions.iter().map(|(symbol, count)| (*symbol, *count))
	}

	/// Divides every count by the state total.
	///
	/// Each probability lies in (0, 1] and they sum to 1 up to rounding.
	/// The total itself is not carried over.
	pub fn percentify(&self) -> Distribution {
		let total = self.total as f64;
		let probabilities = self
			.transitions
			.iter()
			.map(|(symbol, count)| (*symbol, *count as f64 / total))
			.collect();
		Distribution::from_probabilities(probabilities)
	}

	/// Merges another state into this one, summing occurrence counts.
	///
	/// # Errors
	/// Returns an error if the contexts do not match.
	pub fn merge(&mut self, other: &Self) -> Result<()> {
		if self.context != other.context {
			return Err(Error::InvalidParameter(format!(
				"cannot merge state '{}' into '{}'",
				other.context, self.context
			)));
		}

		for (next, occurrence) in &other.transitions {
			*self.transitions.entry(*next).or_insert(0) += *occurrence;
		}
		self.total += other.total;

		Ok(())
	}
}
