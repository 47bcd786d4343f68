use crate::{
    algorithm::propagation::Neighborhood,
    algorithm::symbol_set::SymbolSet,
    analysis::patterns::{Pattern, PatternId, PatternTable, SymbolCode},
};
use rand::Rng;

/// How an unresolved position picks its final symbol
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ResolveStrategy {
    /// Random draw weighted by remaining pattern frequencies
    #[default]
    Weighted,
    /// Center of the single most frequent remaining pattern
    MostFrequentPattern,
    /// Center whose remaining patterns have the largest total frequency
    MostFrequentCenter,
}

/// One slot of the output sequence, held as a superposition of patterns
///
/// Remaining patterns are grouped by center symbol and referenced by id into
/// the shared [`PatternTable`]. The weight is the summed frequency of every
/// remaining pattern and doubles as the resolution-order metric.
#[derive(Clone, Debug)]
pub struct Position {
    by_center: Vec<Vec<PatternId>>,
    possible: SymbolSet,
    weight: usize,
    value: Option<SymbolCode>,
}

impl Position {
    /// Create a position able to hold any pattern of the table
    pub fn new(patterns: &PatternTable) -> Self {
        let symbol_count = patterns.symbol_count();
        let mut by_center = vec![Vec::new(); symbol_count];
        let mut possible = SymbolSet::new(symbol_count);
        let mut weight = 0;

        for (id, pattern) in patterns.iter() {
            if let Some(bucket) = by_center.get_mut(pattern.center()) {
                bucket.push(id);
                possible.insert(pattern.center());
                weight += pattern.frequency();
            }
        }

        Self {
            by_center,
            possible,
            weight,
            value: None,
        }
    }

    /// Symbols that remain possible here
    pub const fn possible(&self) -> &SymbolSet {
        &self.possible
    }

    /// Summed frequency of remaining patterns, or 1 once resolved
    pub const fn weight(&self) -> usize {
        self.weight
    }

    /// Whether this position has collapsed to a single symbol
    pub const fn is_resolved(&self) -> bool {
        self.value.is_some()
    }

    /// The collapsed symbol, if resolved
    pub const fn value(&self) -> Option<SymbolCode> {
        self.value
    }

    /// Whether no symbol remains possible
    pub fn is_contradicted(&self) -> bool {
        self.possible.is_empty()
    }

    /// Remaining pattern ids in their fixed iteration order
    ///
    /// Patterns are visited by ascending center code, then in table order.
    pub fn remaining(&self) -> impl Iterator<Item = PatternId> + '_ {
        self.by_center.iter().flatten().copied()
    }

    /// Remove one pattern from the superposition
    ///
    /// Returns whether the pattern was still present.
    ///
    /// # Panics
    ///
    /// Panics if the position is already resolved
    pub fn remove(&mut self, patterns: &PatternTable, id: PatternId) -> bool {
        assert!(
            !self.is_resolved(),
            "removing pattern {id} from a resolved position"
        );
        let Some(pattern) = patterns.get(id) else {
            return false;
        };
        let center = pattern.center();
        let Some(bucket) = self.by_center.get_mut(center) else {
            return false;
        };
        let Some(slot) = bucket.iter().position(|&candidate| candidate == id) else {
            return false;
        };

        bucket.remove(slot);
        self.weight -= pattern.frequency();
        if bucket.is_empty() {
            self.possible.remove(center);
        }
        true
    }

    /// Drop every remaining pattern the neighborhood no longer admits
    ///
    /// Returns whether anything was removed.
    ///
    /// # Panics
    ///
    /// Panics if the position is already resolved
    pub fn prune(&mut self, patterns: &PatternTable, neighborhood: &Neighborhood<'_>) -> bool {
        assert!(!self.is_resolved(), "pruning a resolved position");

        let mut changed = false;
        for (center, bucket) in self.by_center.iter_mut().enumerate() {
            if bucket.is_empty() {
                continue;
            }

            let mut removed_weight = 0;
            bucket.retain(|&id| {
                let admitted = patterns
                    .get(id)
                    .is_some_and(|pattern| neighborhood.admits(pattern));
                if !admitted {
                    removed_weight += patterns.frequency(id);
                }
                admitted
            });

            if removed_weight > 0 {
                changed = true;
                self.weight -= removed_weight;
                if bucket.is_empty() {
                    self.possible.remove(center);
                }
            }
        }
        changed
    }

    /// Collapse to the given symbol, discarding the superposition
    ///
    /// # Panics
    ///
    /// Panics if the position is already resolved
    pub fn resolve_to(&mut self, value: SymbolCode) {
        assert!(
            !self.is_resolved(),
            "resolving an already resolved position to {value}"
        );
        self.value = Some(value);
        self.weight = 1;
        self.possible = SymbolSet::singleton(self.possible.capacity(), value);
        self.by_center = Vec::new();
    }

    /// Collapse to the center of a frequency-weighted random pattern
    ///
    /// Draws a countdown from `0..=weight` and walks the remaining patterns,
    /// subtracting frequencies until the countdown is exhausted.
    ///
    /// # Panics
    ///
    /// Panics if the position is already resolved or the draw outlasts every
    /// remaining pattern, which happens only when no pattern remains
    pub fn resolve_by_weighted_choice<R>(&mut self, patterns: &PatternTable, rng: &mut R) -> SymbolCode
    where
        R: Rng + ?Sized,
    {
        assert!(!self.is_resolved(), "weighted choice on a resolved position");

        let mut countdown = rng.random_range(0..=self.weight);
        let chosen = self.remaining().find(|&id| {
            let frequency = patterns.frequency(id);
            if frequency >= countdown {
                true
            } else {
                countdown -= frequency;
                false
            }
        });

        let center = chosen.and_then(|id| patterns.get(id)).map(Pattern::center);
        assert!(
            center.is_some(),
            "weighted choice exhausted its draw with weight {}",
            self.weight
        );
        let value = center.unwrap_or_default();
        self.resolve_to(value);
        value
    }

    /// Collapse to the center of the most frequent remaining pattern
    ///
    /// Ties go to the pattern visited last.
    ///
    /// # Panics
    ///
    /// Panics if the position is already resolved or holds no patterns
    pub fn resolve_to_most_frequent_pattern(&mut self, patterns: &PatternTable) -> SymbolCode {
        assert!(!self.is_resolved(), "max collapse on a resolved position");

        let center = self
            .remaining()
            .filter_map(|id| patterns.get(id))
            .max_by_key(|pattern| pattern.frequency())
            .map(Pattern::center);
        assert!(center.is_some(), "max collapse on a position without patterns");
        let value = center.unwrap_or_default();
        self.resolve_to(value);
        value
    }

    /// Collapse to the center carrying the most remaining frequency
    ///
    /// Ties go to the highest center code.
    ///
    /// # Panics
    ///
    /// Panics if the position is already resolved or holds no patterns
    pub fn resolve_to_most_frequent_center(&mut self, patterns: &PatternTable) -> SymbolCode {
        assert!(!self.is_resolved(), "center collapse on a resolved position");

        let center = self
            .by_center
            .iter()
            .enumerate()
            .filter(|(_, bucket)| !bucket.is_empty())
            .map(|(center, bucket)| {
                let total: usize = bucket.iter().map(|&id| patterns.frequency(id)).sum();
                (total, center)
            })
            .max()
            .map(|(_, center)| center);
        assert!(
            center.is_some(),
            "center collapse on a position without patterns"
        );
        let value = center.unwrap_or_default();
        self.resolve_to(value);
        value
    }

    /// Collapse using the given strategy
    ///
    /// # Panics
    ///
    /// Panics under the same conditions as the strategy's resolution method
    pub fn resolve_with<R>(
        &mut self,
        strategy: ResolveStrategy,
        patterns: &PatternTable,
        rng: &mut R,
    ) -> SymbolCode
    where
        R: Rng + ?Sized,
    {
        match strategy {
            ResolveStrategy::Weighted => self.resolve_by_weighted_choice(patterns, rng),
            ResolveStrategy::MostFrequentPattern => self.resolve_to_most_frequent_pattern(patterns),
            ResolveStrategy::MostFrequentCenter => self.resolve_to_most_frequent_center(patterns),
        }
    }

    /// Resolution-order metric, lower values are resolved first
    ///
    /// # Panics
    ///
    /// Panics if the position is already resolved
    pub fn quality(&self) -> usize {
        assert!(!self.is_resolved(), "quality of a resolved position");
        self.weight
    }

    /// Collapse if only one symbol remains
    ///
    /// Returns whether the position is resolved afterwards.
    pub fn maybe_auto_resolve(&mut self) -> bool {
        if self.is_resolved() {
            return true;
        }
        match self.possible.sole() {
            Some(value) => {
                self.resolve_to(value);
                true
            }
            None => false,
        }
    }
}
