use crate::analysis::patterns::SymbolCode;
use bitvec::prelude::*;
use std::fmt;

/// Fixed-capacity set of symbol codes still possible at a position
///
/// Codes are stored directly as bit indices. Codes at or beyond the capacity
/// are never members, inserting them is a no-op.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SymbolSet {
    bits: BitVec,
}

impl SymbolSet {
    /// Create a set with no symbols present
    pub fn new(capacity: usize) -> Self {
        Self {
            bits: bitvec![0; capacity],
        }
    }

    /// Create a set containing exactly one symbol
    pub fn singleton(capacity: usize, code: SymbolCode) -> Self {
        let mut set = Self::new(capacity);
        set.insert(code);
        set
    }

    /// Number of distinct codes this set can hold
    pub fn capacity(&self) -> usize {
        self.bits.len()
    }

    /// Insert a symbol code
    pub fn insert(&mut self, code: SymbolCode) {
        if code < self.bits.len() {
            self.bits.set(code, true);
        }
    }

    /// Remove a symbol code, returning whether it was present
    pub fn remove(&mut self, code: SymbolCode) -> bool {
        let present = self.contains(code);
        if present {
            self.bits.set(code, false);
        }
        present
    }

    /// Test symbol membership
    pub fn contains(&self, code: SymbolCode) -> bool {
        self.bits.get(code).as_deref() == Some(&true)
    }

    /// Test if no symbols are present
    pub fn is_empty(&self) -> bool {
        self.bits.not_any()
    }

    /// Count symbols in the set
    pub fn len(&self) -> usize {
        self.bits.count_ones()
    }

    /// The only member, if the set holds exactly one symbol
    pub fn sole(&self) -> Option<SymbolCode> {
        let mut ones = self.bits.iter_ones();
        let first = ones.next()?;
        ones.next().is_none().then_some(first)
    }

    /// Iterate over members in ascending code order
    pub fn iter(&self) -> impl Iterator<Item = SymbolCode> + '_ {
        self.bits.iter_ones()
    }
}

impl fmt::Display for SymbolSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "SymbolSet({} symbols: {:?})",
            self.len(),
            self.iter().collect::<Vec<_>>()
        )
    }
}
