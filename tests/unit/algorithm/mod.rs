pub mod sequence;
pub mod symbol_set;
