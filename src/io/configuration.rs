//! Algorithm constants and runtime configuration defaults

// Corpus model defaults
/// Number of neighbors on each side that constrain a position
pub const DEFAULT_RADIUS: usize = 2;
/// String separating training samples in a corpus
pub const DEFAULT_LINE_DELIMITER: &str = "\n";
/// Symbol padding every sample on the left
pub const DEFAULT_PADDING_LEFT: char = '+';
/// Symbol padding every sample on the right
pub const DEFAULT_PADDING_RIGHT: char = '-';

// Safety limits to prevent excessive memory allocation
/// Maximum allowed window radius
pub const MAX_RADIUS: usize = 64;
/// Maximum allowed number of generated positions
pub const MAX_SEQUENCE_SIZE: usize = 10_000;

// Default values for configurable parameters
/// Number of non-boundary positions in each generated sequence
pub const DEFAULT_MAX_SIZE: usize = 16;
/// Number of outputs requested per corpus
pub const DEFAULT_COUNT: usize = 20;
/// Collapse attempts allowed before giving up on the requested count
pub const DEFAULT_MAX_ATTEMPTS: usize = 2000;
/// Fixed seed for reproducible generation
pub const DEFAULT_SEED: u64 = 42;

// File handling
/// Extension of corpus files picked up from a directory
pub const INPUT_EXTENSION: &str = "txt";
/// Suffix added to output filenames
pub const OUTPUT_SUFFIX: &str = "_generated";

// Progress bar display settings
/// Threshold for switching to batch progress mode
pub const MAX_INDIVIDUAL_PROGRESS_BARS: usize = 5;
