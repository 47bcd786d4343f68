//! One-dimensional wave function collapse for generating text from a corpus
//!
//! The system learns every window of `2r + 1` symbols from a training text,
//! then fills a fixed-length sequence one symbol at a time so that each
//! resolved window was seen in the corpus.

#![forbid(unsafe_code)]

/// Collapse engine: positions, propagation, selection and the attempt driver
pub mod algorithm;
/// Corpus preprocessing and learned pattern tables
pub mod analysis;
/// Command-line interface, configuration and error handling
pub mod io;

pub use io::error::{AlgorithmError, Contradiction, Result};
