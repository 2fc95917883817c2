//! Markov-chain name generation library.
//!
//! This crate learns a character-level Markov model of order `k` from a
//! list of real names and samples new, plausible names from it:
//! - Boundary-marked transition counting and normalization
//! - Sampling with length bounds and rejection of training names
//! - An explicit, reseedable random source owned by the caller
//! - File-backed and in-memory name sources
//!
//! ```no_run
//! use name_gen_core::model::gender::Gender;
//! use name_gen_core::model::generation_input::GenerationInput;
//! use name_gen_core::model::markov_model::MarkovModel;
//! use name_gen_core::model::name_source::FileNameSource;
//!
//! let source = FileNameSource::new("./data");
//! let mut model = MarkovModel::initialize(&source, Gender::Female, 3)?;
//! let name = model.generate_name(&GenerationInput::new(4, 8))?;
//! println!("{name}");
//! # Ok::<(), name_gen_core::Error>(())
//! ```

/// Markov model, builder, generator and name sources.
pub mod model;

/// I/O utilities (corpus files, folder listing).
pub mod io;

/// Crate error type.
pub mod error;

pub use error::{Error, Result};
