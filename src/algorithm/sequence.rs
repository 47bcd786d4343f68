use crate::{
    algorithm::position::{Position, ResolveStrategy},
    analysis::patterns::{PatternTable, SymbolCode},
    io::configuration::MAX_SEQUENCE_SIZE,
    io::error::{Result, invalid_parameter},
};
use std::fmt;
use std::ops::Range;

/// Shape and boundary symbols of a generated sequence
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SequenceConfig {
    /// Number of non-boundary positions
    pub max_size: usize,
    /// Symbol fixed on the `radius` leftmost positions
    pub start_code: SymbolCode,
    /// Symbol fixed on the `radius` rightmost positions
    pub end_code: SymbolCode,
    /// How positions pick their symbol when collapsed
    pub strategy: ResolveStrategy,
}

impl SequenceConfig {
    /// Check the configuration against the pattern table it will be solved with
    ///
    /// # Errors
    ///
    /// Returns an error if a boundary code lies outside the table's symbol
    /// space or `max_size` exceeds [`MAX_SEQUENCE_SIZE`]
    pub fn validate(&self, patterns: &PatternTable) -> Result<()> {
        let symbol_count = patterns.symbol_count();
        if self.start_code >= symbol_count {
            return Err(invalid_parameter(
                "start_code",
                &self.start_code,
                &format!("must be below the symbol count {symbol_count}"),
            ));
        }
        if self.end_code >= symbol_count {
            return Err(invalid_parameter(
                "end_code",
                &self.end_code,
                &format!("must be below the symbol count {symbol_count}"),
            ));
        }
        if self.max_size > MAX_SEQUENCE_SIZE {
            return Err(invalid_parameter(
                "max_size",
                &self.max_size,
                &format!("must not exceed {MAX_SEQUENCE_SIZE}"),
            ));
        }
        Ok(())
    }
}

/// Fixed-length array of positions solved in one collapse attempt
///
/// The first and last `radius` positions are resolved to the boundary
/// symbols at construction and never revisited. A sequence is built fresh
/// for every attempt and only borrows the shared pattern table.
#[derive(Clone, Debug)]
pub struct Sequence<'a> {
    pub(crate) positions: Vec<Position>,
    pub(crate) patterns: &'a PatternTable,
    pub(crate) config: SequenceConfig,
}

impl<'a> Sequence<'a> {
    /// Build a sequence in full superposition with resolved boundaries
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration does not fit the pattern table
    pub fn populate(patterns: &'a PatternTable, config: SequenceConfig) -> Result<Self> {
        config.validate(patterns)?;
        Ok(Self::build(patterns, config))
    }

    /// Build a sequence from an already validated configuration
    pub(crate) fn build(patterns: &'a PatternTable, config: SequenceConfig) -> Self {
        let radius = patterns.radius();
        let length = 2 * radius + config.max_size;
        let template = Position::new(patterns);
        let mut positions = vec![template; length];

        for position in positions.iter_mut().take(radius) {
            position.resolve_to(config.start_code);
        }
        for position in positions.iter_mut().rev().take(radius) {
            position.resolve_to(config.end_code);
        }

        Self {
            positions,
            patterns,
            config,
        }
    }

    /// Total number of positions including boundaries
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Whether the sequence has no positions at all
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Number of neighbors constraining each position on either side
    pub const fn radius(&self) -> usize {
        self.patterns.radius()
    }

    /// Number of non-boundary positions
    pub const fn max_size(&self) -> usize {
        self.config.max_size
    }

    /// Configuration this sequence was built with
    pub const fn config(&self) -> &SequenceConfig {
        &self.config
    }

    /// Pattern table shared with other attempts
    pub const fn patterns(&self) -> &'a PatternTable {
        self.patterns
    }

    /// Absolute indices of the non-boundary positions
    pub const fn interior(&self) -> Range<usize> {
        let radius = self.radius();
        radius..radius + self.config.max_size
    }

    /// All positions in order
    pub fn positions(&self) -> &[Position] {
        &self.positions
    }

    /// Position at an absolute index
    pub fn position(&self, index: usize) -> Option<&Position> {
        self.positions.get(index)
    }

    /// Auto-resolve every single-candidate position and report completion
    ///
    /// Every position is visited, even after an unresolved one is found.
    pub fn is_fully_resolved(&mut self) -> bool {
        self.positions
            .iter_mut()
            .fold(true, |done, position| position.maybe_auto_resolve() && done)
    }

    /// Index of the first position without any possible symbol
    pub fn find_contradiction(&self) -> Option<usize> {
        self.positions.iter().position(Position::is_contradicted)
    }

    /// Index of the first interior position whose resolved window was never observed
    ///
    /// Unresolved interior positions are reported as well.
    pub fn find_unlearned_window(&self) -> Option<usize> {
        let radius = self.radius();
        let mut window = Vec::with_capacity(2 * radius + 1);

        self.interior().find(|&index| {
            window.clear();
            let Some(span) = self.positions.get(index - radius..=index + radius) else {
                return true;
            };
            for position in span {
                match position.value() {
                    Some(value) => window.push(value),
                    None => return true,
                }
            }
            !self.patterns.contains_window(&window)
        })
    }

    /// Resolved symbols of every position, boundaries included
    ///
    /// Returns `None` while any position is still unresolved.
    pub fn values(&self) -> Option<Vec<SymbolCode>> {
        self.positions.iter().map(Position::value).collect()
    }
}

impl fmt::Display for Sequence<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, position) in self.positions.iter().enumerate() {
            if index > 0 {
                write!(f, " ")?;
            }
            match position.value() {
                Some(value) => write!(f, "{value}")?,
                None => write!(f, "{:?}", position.possible().iter().collect::<Vec<_>>())?,
            }
        }
        Ok(())
    }
}
