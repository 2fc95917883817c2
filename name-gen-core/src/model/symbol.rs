use std::fmt;

/// Character used to render the boundary symbol in text.
///
/// Display only: names may contain this character, it is never used
/// as a marker inside the model.
pub const BOUNDARY_CHAR: char = '_';

/// One step of a name as seen by the Markov chain.
///
/// `Boundary` marks both the start and the end of a name. Using a dedicated
/// variant instead of a reserved character means every character that appears
/// in the corpus can appear in a generated name.
///
/// The derived ordering (characters by code point, then `Boundary`) is the
/// stable key order used when sampling a distribution.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Symbol {
	Char(char),
	Boundary,
}

impl Symbol {
	/// Returns the character carried by this symbol, if any.
	pub fn as_char(&self) -> Option<char> {
		match self {
			Symbol::Char(c) => Some(*c),
			Symbol::Boundary => None,
		}
	}

	pub fn is_boundary(&self) -> bool {
		matches!(self, Symbol::Boundary)
	}
}

impl From<char> for Symbol {
	fn from(c: char) -> Self {
		Symbol::Char(c)
	}
}

impl fmt::Display for Symbol {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Symbol::Char(c) => write!(f, "{c}"),
			Symbol::Boundary => write!(f, "{BOUNDARY_CHAR}"),
		}
	}
}

/// The most recent symbols seen while walking a name.
///
/// A context holds between 1 and `order` symbols. A `Boundary` can only be
/// its first symbol, meaning "the name started here".
///
/// # Invariants
/// - Never empty once built by the model
/// - `Boundary` only at index 0
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Context {
	symbols: Vec<Symbol>,
}

impl Context {
	/// The context every generation starts from: a lone boundary.
	pub fn start() -> Self {
		Self { symbols: vec![Symbol::Boundary] }
	}

	/// Builds a context from a slice of symbols.
	pub fn from_symbols(symbols: &[Symbol]) -> Self {
		Self { symbols: symbols.to_vec() }
	}

	/// Parses the textual form used by `Display`.
	///
	/// A leading `_` is read as the boundary, every other character
	/// (including later underscores) as itself.
	///
	/// Example: `"_b"` → `[Boundary, Char('b')]`, `"bo"` → `[Char('b'), Char('o')]`
	pub fn parse(text: &str) -> Self {
		let mut symbols = Vec::with_capacity(text.len());
		for (i, c) in text.chars().enumerate() {
			if i == 0 && c == BOUNDARY_CHAR {
				symbols.push(Symbol::Boundary);
			} else {
				symbols.push(Symbol::Char(c));
			}
		}
		Self { symbols }
	}

	/// Appends a character and slides the window so at most `order`
	/// symbols remain.
	pub fn push(&mut self, c: char, order: usize) {
		self.symbols.push(Symbol::Char(c));
		if self.symbols.len() > order {
			let excess = self.symbols.len() - order;
			self.symbols.drain(..excess);
		}
	}

	pub fn symbols(&self) -> &[Symbol] {
		&self.symbols
	}

	pub fn len(&self) -> usize {
		self.symbols.len()
	}

	pub fn is_empty(&self) -> bool {
		self.symbols.is_empty()
	}
}

impl fmt::Display for Context {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		for symbol in &self.symbols {
			write!(f, "{symbol}")?;
		}
		Ok(())
	}
}
