use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use env_logger::Env;
use log::LevelFilter;

use name_gen_core::model::gender::Gender;
use name_gen_core::model::generation_input::{GenerationInput, DEFAULT_MAX_ATTEMPTS};
use name_gen_core::model::name_source::FileNameSource;

mod prompt;

/// Generate new names from a Markov model trained on real ones
#[derive(Parser, Debug)]
#[command(name = "name-gen")]
#[command(author, version, about, long_about = None)]
struct Cli {
	/// Folder holding `male.txt` and `female.txt`, one name per line
	#[arg(long, env = "NAME_GEN_DATA", default_value = "./data", global = true)]
	data: PathBuf,

	/// Candidates to try per name before giving up (0 = never give up)
	#[arg(long, env = "NAME_GEN_MAX_ATTEMPTS", default_value_t = DEFAULT_MAX_ATTEMPTS, global = true)]
	max_attempts: usize,

	/// Fixed seed for reproducible output (defaults to the clock)
	#[arg(long, global = true)]
	seed: Option<u64>,

	/// Increase log verbosity (-v, -vv)
	#[arg(short, long, action = ArgAction::Count, global = true)]
	verbose: u8,

	#[command(subcommand)]
	command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
	/// Ask for options on the terminal and generate names one by one (default)
	Interactive,

	/// Generate a batch of names, one per line
	Generate {
		/// Gender of the training list (m / f)
		#[arg(short, long)]
		gender: Gender,

		/// Order of the Markov model
		#[arg(short, long, default_value_t = 3)]
		order: usize,

		/// Minimum name length
		#[arg(long, default_value_t = 3)]
		min: usize,

		/// Maximum name length
		#[arg(long, default_value_t = 10)]
		max: usize,

		/// Number of names to generate
		#[arg(short, long, default_value_t = 10)]
		count: usize,
	},
}

impl Cli {
	fn input(&self, min_length: usize, max_length: usize) -> GenerationInput {
		prompt::generation_input(min_length, max_length, self.max_attempts)
	}
}

fn main() -> Result<()> {
	let cli = Cli::parse();
	init_logging(cli.verbose);

	let source = FileNameSource::new(&cli.data);

	match &cli.command {
		None | Some(Commands::Interactive) => {
			let stdin = io::stdin();
			let stdout = io::stdout();
			let options = prompt::SessionOptions {
				max_attempts: cli.max_attempts,
				seed: cli.seed,
			};
			prompt::Session::new(stdin.lock(), stdout.lock(), &source, options).run()
		}
		Some(Commands::Generate { gender, order, min, max, count }) => {
			let mut model = prompt::train(&source, *gender, *order, cli.seed).with_context(|| {
				format!("failed to train the {gender} model from {}", source.folder().display())
			})?;
			let names = model
				.generate_names(&cli.input(*min, *max), *count)
				.context("name generation failed")?;

			let mut out = BufWriter::new(io::stdout().lock());
			for name in names {
				writeln!(out, "{name}")?;
			}
			out.flush()?;
			Ok(())
		}
	}
}

fn init_logging(verbose: u8) {
	let mut builder = env_logger::Builder::from_env(Env::default().default_filter_or("warn"));
	match verbose {
		0 => (),
		1 => {
			builder.filter_level(LevelFilter::Debug);
		}
		_ => {
			builder.filter_level(LevelFilter::Trace);
		}
	}
	builder.init();
}
