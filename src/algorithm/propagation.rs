use crate::{
    algorithm::position::Position, algorithm::sequence::Sequence, analysis::patterns::Pattern,
};
use tracing::trace;

/// Positions surrounding one slot, excluding the slot itself
///
/// Both sides are held in sequence order, so `left` ends at the slot's
/// immediate left neighbor and `right` starts at its immediate right neighbor.
#[derive(Clone, Copy, Debug)]
pub struct Neighborhood<'a> {
    left: &'a [Position],
    right: &'a [Position],
}

impl<'a> Neighborhood<'a> {
    /// Wrap the positions on either side of a slot
    pub const fn new(left: &'a [Position], right: &'a [Position]) -> Self {
        Self { left, right }
    }

    /// Positions left of the slot, in sequence order
    pub const fn left(&self) -> &'a [Position] {
        self.left
    }

    /// Positions right of the slot, in sequence order
    pub const fn right(&self) -> &'a [Position] {
        self.right
    }

    /// Whether the pattern could still sit at the slot
    ///
    /// Only the neighbors are checked, the center is implied by the bucket the
    /// pattern is stored under.
    pub fn admits(&self, pattern: &Pattern) -> bool {
        matches(pattern, self)
    }
}

/// Local consistency test of a pattern against the possible symbols around a slot
///
/// For every offset `k` in `1..=radius` the window symbol `k` steps left of
/// the center must be possible at the left neighbor at that offset, and
/// likewise on the right. Neighborhoods narrower than the pattern never match.
pub fn matches(pattern: &Pattern, neighborhood: &Neighborhood<'_>) -> bool {
    let (left, right) = (pattern.left(), pattern.right());
    if neighborhood.left.len() != left.len() || neighborhood.right.len() != right.len() {
        return false;
    }

    left.iter()
        .zip(neighborhood.left)
        .chain(right.iter().zip(neighborhood.right))
        .all(|(&code, position)| position.possible().contains(code))
}

impl Sequence<'_> {
    /// Prune the position at `index` against its current neighborhood
    ///
    /// Returns whether anything changed. Resolved positions and positions whose
    /// window would leave the sequence are left alone.
    pub fn cull_at(&mut self, index: usize) -> bool {
        let radius = self.patterns.radius();
        if index < radius || index + radius >= self.positions.len() {
            return false;
        }

        let (before, rest) = self.positions.split_at_mut(index);
        let Some((slot, after)) = rest.split_first_mut() else {
            return false;
        };
        if slot.is_resolved() {
            return false;
        }
        let (Some(left), Some(right)) = (before.get(index - radius..), after.get(..radius)) else {
            return false;
        };

        slot.prune(self.patterns, &Neighborhood::new(left, right))
    }

    /// One left-to-right then one right-to-left culling pass over the interior
    ///
    /// Returns whether any position changed. A single call does not run to a
    /// fixed point.
    pub fn sweep(&mut self) -> bool {
        let interior = self.interior();
        let mut changed = false;

        for index in interior.clone() {
            changed |= self.cull_at(index);
        }
        for index in interior.rev() {
            changed |= self.cull_at(index);
        }

        changed
    }

    /// Cull the neighbors of a freshly resolved position, then sweep once
    pub fn propagate_from(&mut self, index: usize) {
        let radius = self.radius();
        let length = self.len();

        for offset in 1..=radius {
            let neighbors = [index.checked_add(offset), index.checked_sub(offset)];
            for neighbor in neighbors.into_iter().flatten() {
                if neighbor >= radius && neighbor + radius < length {
                    self.cull_at(neighbor);
                }
            }
        }

        let changed = self.sweep();
        trace!(index, changed, "propagated");
    }
}
