use crate::algorithm::sequence::Sequence;
use rand::Rng;
use tracing::trace;

impl Sequence<'_> {
    /// Collapse a uniformly random interior position to break symmetry
    ///
    /// Returns the absolute index of the collapsed position, or `None` when
    /// the sequence has no interior.
    ///
    /// # Panics
    ///
    /// Panics if the chosen position cannot be collapsed, which indicates a
    /// pattern table without patterns
    pub fn seed<R>(&mut self, rng: &mut R) -> Option<usize>
    where
        R: Rng + ?Sized,
    {
        let interior = self.interior();
        if interior.is_empty() {
            return None;
        }

        let index = rng.random_range(interior);
        let strategy = self.config.strategy;
        let position = self.positions.get_mut(index)?;
        let value = position.resolve_with(strategy, self.patterns, rng);
        trace!(index, value, "seeded");
        Some(index)
    }

    /// Collapse the most constrained unresolved position
    ///
    /// Positions with the lowest quality are candidates, ties are broken
    /// uniformly at random. Returns the collapsed index, or `None` when every
    /// position is already resolved.
    ///
    /// # Panics
    ///
    /// Panics if the chosen position has no patterns left, which callers rule
    /// out by checking for contradictions first
    pub fn pick_best<R>(&mut self, rng: &mut R) -> Option<usize>
    where
        R: Rng + ?Sized,
    {
        let mut best_quality = usize::MAX;
        let mut candidates = Vec::new();

        for (index, position) in self.positions.iter().enumerate() {
            if position.is_resolved() {
                continue;
            }
            let quality = position.quality();
            if quality < best_quality {
                best_quality = quality;
                candidates.clear();
                candidates.push(index);
            } else if quality == best_quality {
                candidates.push(index);
            }
        }

        if candidates.is_empty() {
            return None;
        }

        let index = candidates
            .get(rng.random_range(0..candidates.len()))
            .copied()?;
        let strategy = self.config.strategy;
        let position = self.positions.get_mut(index)?;
        let value = position.resolve_with(strategy, self.patterns, rng);
        trace!(index, value, quality = best_quality, "resolved best position");
        Some(index)
    }
}
