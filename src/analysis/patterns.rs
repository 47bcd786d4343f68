//! Observed local windows and the shared arena that holds them

use crate::io::error::{Result, invalid_source};
use std::collections::HashMap;

/// Integer code identifying one distinct symbol of the corpus
pub type SymbolCode = usize;

/// Index of a pattern inside its [`PatternTable`]
pub type PatternId = usize;

/// One observed window of symbols around a center, with its occurrence count
///
/// The window always has length `2 * radius + 1` and holds the center at
/// index `radius`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Pattern {
    center: SymbolCode,
    window: Vec<SymbolCode>,
    radius: usize,
    frequency: usize,
}

impl Pattern {
    /// Build a pattern from its full window, deriving the radius and center
    ///
    /// # Errors
    ///
    /// Returns an error if the window is empty or of even length, or if the
    /// frequency is zero
    pub fn new(window: Vec<SymbolCode>, frequency: usize) -> Result<Self> {
        if window.len() % 2 == 0 {
            return Err(invalid_source(&format!(
                "pattern window must have odd length, got {}",
                window.len()
            )));
        }
        let radius = window.len() / 2;
        let center = window
            .get(radius)
            .copied()
            .ok_or_else(|| invalid_source(&"pattern window is empty"))?;
        Self::from_parts(center, window, radius, frequency)
    }

    /// Build a pattern from explicit parts, validating they agree
    ///
    /// # Errors
    ///
    /// Returns an error if the window length is not `2 * radius + 1`, if the
    /// center does not sit in the middle of the window, or if the frequency is zero
    pub fn from_parts(
        center: SymbolCode,
        window: Vec<SymbolCode>,
        radius: usize,
        frequency: usize,
    ) -> Result<Self> {
        if window.len() != 2 * radius + 1 {
            return Err(invalid_source(&format!(
                "window of length {} does not match radius {radius}",
                window.len()
            )));
        }
        if window.get(radius) != Some(&center) {
            return Err(invalid_source(&format!(
                "center {center} is not at the middle of window {window:?}"
            )));
        }
        if frequency == 0 {
            return Err(invalid_source(&"pattern frequency must be positive"));
        }

        Ok(Self {
            center,
            window,
            radius,
            frequency,
        })
    }

    /// Symbol at the middle of the window
    pub const fn center(&self) -> SymbolCode {
        self.center
    }

    /// Full window including the center
    pub fn window(&self) -> &[SymbolCode] {
        &self.window
    }

    /// Symbols strictly left of the center, in sequence order
    pub fn left(&self) -> &[SymbolCode] {
        self.window.get(..self.radius).unwrap_or(&[])
    }

    /// Symbols strictly right of the center, in sequence order
    pub fn right(&self) -> &[SymbolCode] {
        self.window.get(self.radius + 1..).unwrap_or(&[])
    }

    /// Number of neighbors on each side
    pub const fn radius(&self) -> usize {
        self.radius
    }

    /// Number of times this window was observed
    pub const fn frequency(&self) -> usize {
        self.frequency
    }

    /// Whether both patterns describe the same window, ignoring frequency
    pub fn same_shape(&self, other: &Self) -> bool {
        self.center == other.center && self.window == other.window
    }

    /// Overwrite the occurrence count
    pub const fn set_frequency(&mut self, frequency: usize) {
        self.frequency = frequency;
    }

    /// Add further occurrences
    pub const fn add_frequency(&mut self, increment: usize) {
        self.frequency += increment;
    }
}

/// Immutable arena of every pattern learned from a corpus
///
/// Positions refer to patterns by [`PatternId`], so one table can be shared
/// by every generation attempt without copying pattern data.
#[derive(Clone, Debug)]
pub struct PatternTable {
    patterns: Vec<Pattern>,
    radius: usize,
    symbol_count: usize,
    by_window: HashMap<Vec<SymbolCode>, PatternId>,
}

impl PatternTable {
    /// Build a table, merging same-shape patterns by summing their frequencies
    ///
    /// Patterns keep the order of their first occurrence.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The pattern list is empty
    /// - Patterns disagree on their radius
    /// - A window refers to a code outside `0..symbol_count`
    pub fn from_patterns(patterns: Vec<Pattern>, symbol_count: usize) -> Result<Self> {
        let radius = patterns
            .first()
            .map(Pattern::radius)
            .ok_or_else(|| invalid_source(&"no patterns were extracted"))?;

        let mut merged: Vec<Pattern> = Vec::with_capacity(patterns.len());
        let mut by_window: HashMap<Vec<SymbolCode>, PatternId> =
            HashMap::with_capacity(patterns.len());

        for pattern in patterns {
            if pattern.radius() != radius {
                return Err(invalid_source(&format!(
                    "pattern radius {} differs from table radius {radius}",
                    pattern.radius()
                )));
            }
            if let Some(&code) = pattern.window().iter().find(|&&code| code >= symbol_count) {
                return Err(invalid_source(&format!(
                    "symbol code {code} exceeds vocabulary of {symbol_count} symbols"
                )));
            }

            if let Some(existing) = by_window
                .get(pattern.window())
                .and_then(|&id| merged.get_mut(id))
            {
                existing.add_frequency(pattern.frequency());
            } else {
                by_window.insert(pattern.window().to_vec(), merged.len());
                merged.push(pattern);
            }
        }

        Ok(Self {
            patterns: merged,
            radius,
            symbol_count,
            by_window,
        })
    }

    /// Look up a pattern by id
    pub fn get(&self, id: PatternId) -> Option<&Pattern> {
        self.patterns.get(id)
    }

    /// Frequency of a pattern, zero for unknown ids
    pub fn frequency(&self, id: PatternId) -> usize {
        self.patterns.get(id).map_or(0, Pattern::frequency)
    }

    /// Iterate over patterns with their ids
    pub fn iter(&self) -> impl Iterator<Item = (PatternId, &Pattern)> {
        self.patterns.iter().enumerate()
    }

    /// Number of distinct patterns
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// Whether the table holds no patterns
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Shared radius of every pattern
    pub const fn radius(&self) -> usize {
        self.radius
    }

    /// Size of the symbol code space
    pub const fn symbol_count(&self) -> usize {
        self.symbol_count
    }

    /// Sum of all pattern frequencies
    pub fn total_frequency(&self) -> usize {
        self.patterns.iter().map(Pattern::frequency).sum()
    }

    /// Whether exactly this window was observed
    pub fn contains_window(&self, window: &[SymbolCode]) -> bool {
        self.by_window.contains_key(window)
    }
}
