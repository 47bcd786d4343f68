use crate::{
    algorithm::sequence::{Sequence, SequenceConfig},
    analysis::patterns::{PatternTable, SymbolCode},
    io::error::{Contradiction, Result},
};
use rand::Rng;
use tracing::{debug, info, warn};

/// Stage of one collapse attempt
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CollapseState {
    /// Nothing resolved besides the boundaries
    Unseeded,
    /// A random interior position was collapsed (`None` without an interior)
    Seeded {
        /// Absolute index of the seeded position
        index: Option<usize>,
    },
    /// Alternating sweeps and best-first collapses
    Converging,
    /// Every position resolved into learned windows
    Solved,
    /// The attempt reached an unsatisfiable state
    Contradicted(Contradiction),
}

impl CollapseState {
    /// Whether no further transition is possible
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Solved | Self::Contradicted(_))
    }
}

/// Drives one sequence through the collapse state machine
///
/// Seeds a random position, propagates from it, then repeatedly sweeps and
/// collapses the lowest-weight position until everything is resolved or a
/// position runs out of candidates. There is no backtracking: a contradiction
/// ends the attempt.
pub struct WaveCollapse<'s, 'a> {
    sequence: &'s mut Sequence<'a>,
    state: CollapseState,
    iteration: usize,
}

impl<'s, 'a> WaveCollapse<'s, 'a> {
    /// Start a collapse on a freshly populated sequence
    pub const fn new(sequence: &'s mut Sequence<'a>) -> Self {
        Self {
            sequence,
            state: CollapseState::Unseeded,
            iteration: 0,
        }
    }

    /// Current stage
    pub const fn state(&self) -> CollapseState {
        self.state
    }

    /// Number of transitions executed so far
    pub const fn iteration(&self) -> usize {
        self.iteration
    }

    /// Sequence being collapsed
    pub fn sequence(&self) -> &Sequence<'a> {
        self.sequence
    }

    /// Advance by one transition
    ///
    /// Returns whether the collapse should continue.
    pub fn execute_iteration<R>(&mut self, rng: &mut R) -> bool
    where
        R: Rng + ?Sized,
    {
        if self.state.is_terminal() {
            return false;
        }
        self.iteration += 1;

        self.state = match self.state {
            CollapseState::Unseeded => CollapseState::Seeded {
                index: self.sequence.seed(rng),
            },
            CollapseState::Seeded { index } => {
                if let Some(index) = index {
                    self.sequence.propagate_from(index);
                }
                CollapseState::Converging
            }
            CollapseState::Converging => self.converge_step(rng),
            terminal @ (CollapseState::Solved | CollapseState::Contradicted(_)) => terminal,
        };

        !self.state.is_terminal()
    }

    /// Run until a terminal state and return the resolved symbols
    ///
    /// # Errors
    ///
    /// Returns the contradiction that ended the attempt
    pub fn run<R>(mut self, rng: &mut R) -> std::result::Result<Vec<SymbolCode>, Contradiction>
    where
        R: Rng + ?Sized,
    {
        while self.execute_iteration(rng) {}

        match self.state {
            CollapseState::Contradicted(contradiction) => Err(contradiction),
            _ => self.sequence.values().ok_or_else(|| Contradiction::UnlearnedWindow {
                index: self.sequence.find_unlearned_window().unwrap_or_default(),
            }),
        }
    }

    fn converge_step<R>(&mut self, rng: &mut R) -> CollapseState
    where
        R: Rng + ?Sized,
    {
        if self.sequence.is_fully_resolved() || self.sequence.find_contradiction().is_some() {
            return self.finish();
        }

        self.sequence.sweep();
        if let Some(index) = self.sequence.find_contradiction() {
            return self.contradicted_at(index);
        }

        match self.sequence.pick_best(rng) {
            Some(index) => {
                self.sequence.propagate_from(index);
                CollapseState::Converging
            }
            None => self.finish(),
        }
    }

    fn finish(&mut self) -> CollapseState {
        self.sequence.sweep();
        if let Some(index) = self.sequence.find_contradiction() {
            return self.contradicted_at(index);
        }

        match self.sequence.find_unlearned_window() {
            Some(index) => {
                let contradiction = Contradiction::UnlearnedWindow { index };
                debug!(%contradiction, "collapse rejected");
                CollapseState::Contradicted(contradiction)
            }
            None => CollapseState::Solved,
        }
    }

    fn contradicted_at(&self, index: usize) -> CollapseState {
        let contradiction = Contradiction::EmptyPosition {
            index,
            iteration: self.iteration,
        };
        debug!(%contradiction, "collapse contradicted");
        CollapseState::Contradicted(contradiction)
    }
}

/// Collapse a populated sequence to definite symbols
///
/// # Errors
///
/// Returns the contradiction that ended the attempt
pub fn collapse<R>(
    sequence: &mut Sequence<'_>,
    rng: &mut R,
) -> std::result::Result<Vec<SymbolCode>, Contradiction>
where
    R: Rng + ?Sized,
{
    WaveCollapse::new(sequence).run(rng)
}

/// Outcome of one generation attempt
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Attempt {
    /// Resolved symbols of every position, boundaries included
    Solved(Vec<SymbolCode>),
    /// The attempt was discarded
    Contradicted(Contradiction),
}

/// Result of a generation run, possibly shorter than requested
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Generation {
    /// Successful sequences in the order they were produced
    pub outputs: Vec<Vec<SymbolCode>>,
    /// Attempts spent, successful or not
    pub attempts: usize,
    /// Number of outputs asked for
    pub requested: usize,
}

impl Generation {
    /// Whether the attempt cap ran out before the requested count was reached
    pub fn is_truncated(&self) -> bool {
        self.outputs.len() < self.requested
    }

    /// Attempts that ended in a contradiction
    pub fn contradictions(&self) -> usize {
        self.attempts - self.outputs.len()
    }
}

/// Repeats independent collapse attempts over one shared pattern table
pub struct Generator<'a, R> {
    patterns: &'a PatternTable,
    config: SequenceConfig,
    rng: R,
}

impl<'a, R: Rng> Generator<'a, R> {
    /// Create a generator with an injected random source
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration does not fit the pattern table
    pub fn new(patterns: &'a PatternTable, config: SequenceConfig, rng: R) -> Result<Self> {
        config.validate(patterns)?;
        Ok(Self {
            patterns,
            config,
            rng,
        })
    }

    /// Configuration every attempt is built with
    pub const fn config(&self) -> &SequenceConfig {
        &self.config
    }

    /// Build a fresh sequence and collapse it
    pub fn attempt(&mut self) -> Attempt {
        self.attempt_with(|_, _| {})
    }

    /// Build a fresh sequence, collapse it and show the final state to `inspect`
    pub fn attempt_with<F>(&mut self, inspect: F) -> Attempt
    where
        F: FnOnce(&Sequence<'_>, &Attempt),
    {
        let mut sequence = Sequence::build(self.patterns, self.config);
        let attempt = match collapse(&mut sequence, &mut self.rng) {
            Ok(values) => Attempt::Solved(values),
            Err(contradiction) => Attempt::Contradicted(contradiction),
        };
        inspect(&sequence, &attempt);
        attempt
    }

    /// Collect up to `count` solved sequences within `max_attempts` attempts
    pub fn generate(&mut self, count: usize, max_attempts: usize) -> Generation {
        self.generate_with(count, max_attempts, |_, _, _| {})
    }

    /// Like [`Self::generate`], reporting every finished attempt to `observe`
    ///
    /// The observer receives the 1-based attempt number, the final sequence
    /// state and the outcome.
    pub fn generate_with<F>(&mut self, count: usize, max_attempts: usize, mut observe: F) -> Generation
    where
        F: FnMut(usize, &Sequence<'_>, &Attempt),
    {
        let mut generation = Generation {
            outputs: Vec::with_capacity(count),
            attempts: 0,
            requested: count,
        };

        while generation.outputs.len() < count && generation.attempts < max_attempts {
            generation.attempts += 1;
            let number = generation.attempts;
            let attempt = self.attempt_with(|sequence, attempt| observe(number, sequence, attempt));
            if let Attempt::Solved(values) = attempt {
                generation.outputs.push(values);
            }
        }

        if generation.is_truncated() {
            warn!(
                produced = generation.outputs.len(),
                requested = count,
                attempts = generation.attempts,
                "attempt cap reached before the requested count"
            );
        } else {
            info!(
                produced = generation.outputs.len(),
                attempts = generation.attempts,
                "generation complete"
            );
        }

        generation
    }
}
