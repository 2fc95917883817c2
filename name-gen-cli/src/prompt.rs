//! Line-based interactive session.
//!
//! Asks for a gender, a length range and a model order, prints a name,
//! then offers to generate another one with the same or new options.

use std::io::{BufRead, Write};

use anyhow::Result;
use log::debug;

use name_gen_core::Error;
use name_gen_core::model::gender::Gender;
use name_gen_core::model::generation_input::GenerationInput;
use name_gen_core::model::markov_model::MarkovModel;
use name_gen_core::model::name_source::NameSource;

const INVALID_INPUT: &str = "Sorry, that is not a valid input. Please try again.";

/// Builds the generation input for a length range, `0` attempts meaning no cap.
pub fn generation_input(min_length: usize, max_length: usize, max_attempts: usize) -> GenerationInput {
	let input = GenerationInput::new(min_length, max_length);
	match max_attempts {
		0 => input.unbounded(),
		n => input.with_max_attempts(n),
	}
}

/// Trains a model, with a fixed seed if one is given.
pub fn train<S: NameSource + ?Sized>(
	source: &S,
	gender: Gender,
	order: usize,
	seed: Option<u64>,
) -> name_gen_core::Result<MarkovModel> {
	match seed {
		Some(seed) => MarkovModel::with_seed(source, gender, order, seed),
		None => MarkovModel::initialize(source, gender, order),
	}
}

/// Settings shared by every name of a session.
#[derive(Clone, Copy, Debug)]
pub struct SessionOptions {
	pub max_attempts: usize,
	pub seed: Option<u64>,
}

/// Options picked by the user for one name.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Choices {
	gender: Gender,
	min_length: usize,
	max_length: usize,
	order: usize,
}

pub struct Session<'a, R, W, S: ?Sized> {
	input: R,
	output: W,
	source: &'a S,
	options: SessionOptions,
}

impl<'a, R, W, S> Session<'a, R, W, S>
where
	R: BufRead,
	W: Write,
	S: NameSource + ?Sized,
{
	pub fn new(input: R, output: W, source: &'a S, options: SessionOptions) -> Self {
		Self { input, output, source, options }
	}

	/// Runs the session until the user declines another name or input ends.
	pub fn run(&mut self) -> Result<()> {
		let mut current: Option<(Choices, MarkovModel)> = None;
		let mut keep_options = false;

		loop {
			let choices = match current.as_ref() {
				Some((choices, _)) if keep_options => *choices,
				_ => match self.ask_choices()? {
					Some(choices) => choices,
					None => return self.farewell(),
				},
			};

			// The table only depends on gender and order
			let reusable = current
				.take()
				.filter(|(previous, _)| previous.gender == choices.gender && previous.order == choices.order)
				.map(|(_, model)| model);

			let mut model = match reusable {
				Some(mut model) => {
					if self.options.seed.is_none() {
						model.reseed();
					}
					model
				}
				None => match train(self.source, choices.gender, choices.order, self.options.seed) {
					Ok(model) => model,
					Err(e) => {
						writeln!(self.output, "Sorry, the model could not be built: {e}")?;
						keep_options = false;
						continue;
					}
				},
			};

			writeln!(self.output, "Generating name...")?;
			let input = generation_input(choices.min_length, choices.max_length, self.options.max_attempts);
			match model.generate_name(&input) {
				Ok(name) if name.is_empty() => {
					writeln!(self.output, "No name fits between {} and {} characters.", choices.min_length, choices.max_length)?;
				}
				Ok(name) => writeln!(self.output, "Name: {name}")?,
				Err(Error::RetryExhausted { attempts }) => {
					writeln!(self.output, "No new name found after {attempts} attempts, try other options.")?;
				}
				Err(e) => return Err(e.into()),
			}
			current = Some((choices, model));

			match self.ask_yes_no("Would you like to generate another name? (y/n): ")? {
				Some(true) => (),
				_ => return self.farewell(),
			}
			keep_options = match self.ask_yes_no("Would you like to use the same options as before? (y/n): ")? {
				Some(keep) => keep,
				None => return self.farewell(),
			};
		}
	}

	/// Asks every option in turn, `None` if input ends.
	fn ask_choices(&mut self) -> Result<Option<Choices>> {
		let Some(gender) = self.ask_until("Enter the gender of the name you want to generate (m/f): ", |s| s.parse::<Gender>().ok())? else {
			return Ok(None);
		};
		let Some(min_length) = self.ask_until("Enter the minimum length of the name: ", |s| s.parse::<usize>().ok())? else {
			return Ok(None);
		};
		let Some(max_length) = self.ask_until("Enter the maximum length of the name: ", |s| s.parse::<usize>().ok())? else {
			return Ok(None);
		};
		let Some(order) = self.ask_until("Enter the order of the Markov model used to generate the names: ", |s| {
			s.parse::<usize>().ok().filter(|order| *order >= 1)
		})?
		else {
			return Ok(None);
		};

		let choices = Choices { gender, min_length, max_length, order };
		debug!("session choices: {choices:?}");
		Ok(Some(choices))
	}

	fn ask_yes_no(&mut self, question: &str) -> Result<Option<bool>> {
		self.ask_until(question, |s| match s.chars().next().map(|c| c.to_ascii_lowercase()) {
			Some('y') => Some(true),
			Some('n') => Some(false),
			_ => None,
		})
	}

	/// Repeats `question` until `parse` accepts the answer, `None` if input ends.
	fn ask_until<T>(&mut self, question: &str, parse: impl Fn(&str) -> Option<T>) -> Result<Option<T>> {
		loop {
			write!(self.output, "{question}")?;
			self.output.flush()?;

			let mut line = String::new();
			if self.input.read_line(&mut line)? == 0 {
				writeln!(self.output)?;
				return Ok(None);
			}

			match parse(line.trim()) {
				Some(value) => return Ok(Some(value)),
				None => writeln!(self.output, "{INVALID_INPUT}")?,
			}
		}
	}

	fn farewell(&mut self) -> Result<()> {
		writeln!(self.output, "Thank you for using the name generator. Good bye!")?;
		Ok(())
	}
}
