use std::collections::{BTreeMap, HashMap};
use std::sync::mpsc;
use std::thread;

use log::debug;

use crate::error::{Error, Result};
use super::state::State;
use super::symbol::{Context, Symbol};

/// Corpus size from which counting is split across worker threads.
pub const PARALLEL_THRESHOLD: usize = 4096;

/// Number of chunks per CPU when counting in parallel.
const CHUNK_FACTOR: usize = 8;

/// Raw transition counts of an order-`k` character model (learning phase).
///
/// Maps every observed context to a `State` holding the number of times each
/// symbol followed it.
///
/// # Responsibilities
/// - Mark names with boundaries and walk them with a sliding window
/// - Record the short start-of-name contexts (`order - 1` first positions)
/// - Merge with counts of the same order (parallel learning)
///
/// # Invariants
/// - `order >= 1`
/// - Every context holds between 1 and `order` symbols
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransitionCounts {
	order: usize,
	states: HashMap<Context, State>,
}

impl TransitionCounts {
	/// Creates empty counts for a model of the given order.
	///
	/// # Errors
	/// Returns `InvalidParameter` if `order < 1`.
	pub fn new(order: usize) -> Result<Self> {
		if order < 1 {
			return Err(Error::InvalidParameter("order must be >= 1".to_owned()));
		}
		Ok(Self { order, states: HashMap::new() })
	}

	pub fn order(&self) -> usize {
		self.order
	}

	/// Returns the counts recorded for a context.
	pub fn state(&self, context: &Context) -> Option<&State> {
		self.states.get(context)
	}

	pub fn len(&self) -> usize {
		self.states.len()
	}

	pub fn is_empty(&self) -> bool {
		self.states.is_empty()
	}

	/// Adds one bare name (without boundary markers) to the counts.
	///
	/// The name is walked as `[Boundary, c1, .., cn, Boundary]`:
	/// - every prefix shorter than `order` predicts the symbol after it,
	///   which is how the model learns what starts a name;
	/// - every full window of `order` symbols predicts the next one, down to
	///   the final boundary, which is how it learns where names end.
	///
	/// Empty names and names shorter than `order` only contribute the
	/// transitions they actually contain.
	pub fn add_name(&mut self, name: &str) {
		let mut marked: Vec<Symbol> = Vec::with_capacity(name.len() + 2);
		marked.push(Symbol::Boundary);
		marked.extend(name.chars().map(Symbol::from));
		marked.push(Symbol::Boundary);
		let len = marked.len();

		for i in 1..self.order.min(len) {
			self.observe(&marked[..i], marked[i]);
		}

		for j in 0..len.saturating_sub(self.order) {
			self.observe(&marked[j..j + self.order], marked[j + self.order]);
		}
	}

	fn observe(&mut self, context: &[Symbol], next: Symbol) {
		let key = Context::from_symbols(context);
		self.states
			.entry(key)
			.or_insert_with(|| State::new(Context::from_symbols(context)))
			.add_transition(next);
	}

	/// Merges another set of counts into this one.
	///
	/// # Errors
	/// Returns `OrderMismatch` if the orders differ.
	pub fn merge(&mut self, other: &Self) -> Result<()> {
		if self.order != other.order {
			return Err(Error::OrderMismatch { expected: self.order, found: other.order });
		}

		for (context, state) in &other.states {
			if let Some(existing) = self.states.get_mut(context) {
				existing.merge(state)?;
			} else {
				self.states.insert(context.clone(), state.clone());
			}
		}

		Ok(())
	}
}

/// Probability distribution over the symbols that may follow a context.
#[derive(Clone, Debug, PartialEq)]
pub struct Distribution {
	probabilities: BTreeMap<Symbol, f64>,
}

impl Distribution {
	pub(crate) fn from_probabilities(probabilities: BTreeMap<Symbol, f64>) -> Self {
		Self { probabilities }
	}

	/// Probability of `symbol`, `0.0` if it never followed the context.
	pub fn probability(&self, symbol: Symbol) -> f64 {
		self.probabilities.get(&symbol).copied().unwrap_or(0.0)
	}

	/// Sum of all probabilities (1.0 up to rounding).
	pub fn sum(&self) -> f64 {
		self.probabilities.values().sum()
	}

	/// Iterates over `(symbol, probability)` in symbol order.
	pub fn iter(&self) -> impl Iterator<Item = (Symbol, f64)> + '_ {
		self.probabilities.iter().map(|(symbol, p)| (*symbol, *p))
	}

	pub fn len(&self) -> usize {
		self.probabilities.len()
	}

	pub fn is_empty(&self) -> bool {
		self.probabilities.is_empty()
	}

	/// Selects a symbol from a uniform draw in `[0, 1)`.
	///
	/// Walks the symbols in their stable order while accumulating probability
	/// and returns the first one whose cumulative probability exceeds `draw`.
	/// If rounding leaves the cumulative sum just under `draw`, the last
	/// symbol is returned.
	pub fn sample(&self, draw: f64) -> Symbol {
		let mut cumulative = 0.0;
		let mut fallback = Symbol::Boundary;
		for (symbol, probability) in &self.probabilities {
			cumulative += probability;
			if draw < cumulative {
				return *symbol;
			}
			fallback = *symbol;
		}
		fallback
	}
}

/// Normalized order-`k` Markov model: context → next-symbol distribution.
///
/// Built once by [`build`] (or [`normalize`]) and never mutated afterwards,
/// so it can be shared freely between generators.
///
/// # Invariants
/// - For every context, probabilities sum to 1.0 (within 1e-4)
/// - Every probability lies in (0, 1]
#[derive(Clone, Debug, PartialEq)]
pub struct TransitionTable {
	order: usize,
	distributions: HashMap<Context, Distribution>,
}

impl TransitionTable {
	pub fn order(&self) -> usize {
		self.order
	}

	/// Distribution for a context, `None` if it was never observed.
	pub fn get(&self, context: &Context) -> Option<&Distribution> {
		self.distributions.get(context)
	}

	/// Iterates over every context and its distribution (arbitrary order).
	pub fn iter(&self) -> impl Iterator<Item = (&Context, &Distribution)> {
		self.distributions.iter()
	}

	pub fn len(&self) -> usize {
		self.distributions.len()
	}

	pub fn is_empty(&self) -> bool {
		self.distributions.is_empty()
	}

	/// Samples the symbol following `context`.
	///
	/// A context absent from the table ends the name.
	pub fn next_symbol(&self, context: &Context, draw: f64) -> Symbol {
		match self.distributions.get(context) {
			Some(distribution) => distribution.sample(draw),
			None => Symbol::Boundary,
		}
	}
}

/// Counts every transition of `corpus` for a model of the given order.
///
/// Large corpora are split into chunks counted on worker threads, then
/// merged. Merging only sums integers, so the result is the same as a
/// sequential scan.
///
/// # Errors
/// Returns `InvalidParameter` if `order < 1`.
pub fn accumulate<S>(corpus: &[S], order: usize) -> Result<TransitionCounts>
where
	S: AsRef<str> + Sync,
{
	let mut counts = TransitionCounts::new(order)?;

	if corpus.len() < PARALLEL_THRESHOLD {
		for name in corpus {
			counts.add_name(name.as_ref());
		}
		return Ok(counts);
	}

	let chunks = num_cpus::get() * CHUNK_FACTOR;
	let chunk_size = corpus.len().div_ceil(chunks);

	let (tx, rx) = mpsc::channel();
	thread::scope(|scope| {
		for chunk in corpus.chunks(chunk_size) {
			let tx = tx.clone();
			let mut partial = counts.clone();
			scope.spawn(move || {
				for name in chunk {
					partial.add_name(name.as_ref());
				}
				// The receiver lives until every worker has been joined
				let _ = tx.send(partial);
			});
		}
	});
	drop(tx);

	for partial in rx.iter() {
		counts.merge(&partial)?;
	}

	Ok(counts)
}

/// Converts raw counts into probabilities (percentify).
///
/// Each count is divided by the total of its context; the totals are
/// dropped from the resulting table.
pub fn normalize(counts: &TransitionCounts) -> TransitionTable {
	let distributions = counts
		.states
		.iter()
		.map(|(context, state)| (context.clone(), state.percentify()))
		.collect();

	TransitionTable { order: counts.order, distributions }
}

/// Builds the transition table of an order-`order` model from bare names.
///
/// # Errors
/// Returns `InvalidParameter` if `order < 1`. An empty corpus is not an
/// error and gives an empty table.
pub fn build<S>(corpus: &[S], order: usize) -> Result<TransitionTable>
where
	S: AsRef<str> + Sync,
{
	let counts = accumulate(corpus, order)?;
	let table = normalize(&counts);
	debug!(
		"built order-{} table: {} contexts from {} names",
		order,
		table.len(),
		corpus.len()
	);
	Ok(table)
}
