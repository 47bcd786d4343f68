//! Command-line surface, configuration constants, errors and text output

/// Argument parsing and batch processing of corpus files
pub mod cli;
/// Default values and limits
pub mod configuration;
/// Error types for corpus loading, parameters and collapse attempts
pub mod error;
/// Terminal progress bars for batch runs
pub mod progress;
/// Text rendering of superpositions and failure reports
pub mod visualization;
