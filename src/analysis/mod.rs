//! Corpus modelling and the learned pattern table

/// Vocabulary, padding and window extraction from training text
pub mod corpus;
/// Observed windows and the arena shared by every attempt
pub mod patterns;
