/// Collapse state machine and the multi-attempt generation driver
pub mod executor;
/// Superposition of patterns at a single output slot
pub mod position;
/// Pattern matching and culling passes over a sequence
pub mod propagation;
/// Seeding and best-first resolution order
pub mod selection;
/// Fixed-length array of positions solved in one attempt
pub mod sequence;
/// Bitset of symbols still possible at a position
pub mod symbol_set;
