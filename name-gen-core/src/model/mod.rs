//! Character-level Markov model for name generation.
//!
//! This module provides:
//! - Symbols and contexts of the chain (`Symbol`, `Context`)
//! - Per-context transition counts (`State`)
//! - The model builder (`accumulate`, `normalize`, `build`)
//! - The name generator (`NameGenerator`, `GenerationInput`)
//! - The corpus collaborator (`NameSource`) and the `MarkovModel` facade

/// Symbols (`Char` / `Boundary`) and sliding-window contexts.
pub mod symbol;

/// Transition counts for a single context.
///
/// Accumulates occurrences during learning and converts them
/// to probabilities.
pub mod state;

/// Model builder.
///
/// Two phases: `accumulate` counts transitions over a corpus,
/// `normalize` turns the counts into an immutable `TransitionTable`.
pub mod transition_table;

/// Length range and retry cap for one generated name.
pub mod generation_input;

/// Samples, validates and capitalizes names from a `TransitionTable`.
pub mod generator;

/// Gender selector of a corpus.
pub mod gender;

/// Corpus suppliers (files, memory).
pub mod name_source;

/// Trained model plus random source: `initialize`, `reseed`, `generate_name`.
pub mod markov_model;
