//! Training text to symbol codes and learned windows

use crate::{
    algorithm::position::ResolveStrategy,
    algorithm::sequence::SequenceConfig,
    analysis::patterns::{Pattern, PatternTable, SymbolCode},
    io::configuration::{
        DEFAULT_LINE_DELIMITER, DEFAULT_PADDING_LEFT, DEFAULT_PADDING_RIGHT, DEFAULT_RADIUS,
        MAX_RADIUS,
    },
    io::error::{AlgorithmError, Result, invalid_parameter},
};
use std::collections::HashMap;
use std::path::Path;
use tracing::info;

/// Options controlling how a corpus is split, padded and windowed
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CorpusConfig {
    /// Number of neighbors on each side of a window's center
    pub radius: usize,
    /// String separating training samples
    pub line_delimiter: String,
    /// Symbol padding every sample on the left
    pub padding_left: char,
    /// Symbol padding every sample on the right
    pub padding_right: char,
    /// Whether empty samples contribute boundary-only windows
    pub keep_empty_lines: bool,
}

impl Default for CorpusConfig {
    fn default() -> Self {
        Self {
            radius: DEFAULT_RADIUS,
            line_delimiter: DEFAULT_LINE_DELIMITER.to_string(),
            padding_left: DEFAULT_PADDING_LEFT,
            padding_right: DEFAULT_PADDING_RIGHT,
            keep_empty_lines: false,
        }
    }
}

impl CorpusConfig {
    /// Default configuration with a different radius
    pub fn with_radius(radius: usize) -> Self {
        Self {
            radius,
            ..Self::default()
        }
    }

    fn validate(&self) -> Result<()> {
        if self.radius > MAX_RADIUS {
            return Err(invalid_parameter(
                "radius",
                &self.radius,
                &format!("must not exceed {MAX_RADIUS}"),
            ));
        }
        if self.line_delimiter.is_empty() {
            return Err(invalid_parameter(
                "line_delimiter",
                &"",
                &"must not be empty",
            ));
        }
        if self.padding_left == self.padding_right {
            return Err(invalid_parameter(
                "padding_right",
                &self.padding_right,
                &"must differ from the left padding symbol",
            ));
        }
        Ok(())
    }
}

/// Vocabulary, learned patterns and symbol statistics of a training text
///
/// The left and right padding symbols always receive codes 0 and 1, every
/// other symbol is numbered in order of first occurrence.
#[derive(Clone, Debug)]
pub struct CorpusModel {
    config: CorpusConfig,
    symbols: Vec<char>,
    codes: HashMap<char, SymbolCode>,
    patterns: PatternTable,
    center_counts: Vec<usize>,
    sample_count: usize,
}

impl CorpusModel {
    /// Learn a model from training text
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the text yields no
    /// samples
    pub fn from_text(text: &str, config: CorpusConfig) -> Result<Self> {
        config.validate()?;

        let mut symbols = vec![config.padding_left, config.padding_right];
        let mut codes = HashMap::from([(config.padding_left, 0), (config.padding_right, 1)]);
        let mut windows = Vec::new();
        let mut center_counts = vec![0; symbols.len()];
        let mut sample_count = 0;

        let pad = config.radius + 1;
        let width = 2 * config.radius + 1;

        for sample in split_samples(text, &config) {
            sample_count += 1;

            let mut padded = vec![0; pad];
            for symbol in sample.chars() {
                let code = *codes.entry(symbol).or_insert_with(|| {
                    symbols.push(symbol);
                    center_counts.push(0);
                    symbols.len() - 1
                });
                padded.push(code);
            }
            padded.extend(std::iter::repeat_n(1, pad));

            for window in padded.windows(width) {
                if let Some(count) = window
                    .get(config.radius)
                    .and_then(|&center| center_counts.get_mut(center))
                {
                    *count += 1;
                }
                windows.push(Pattern::new(window.to_vec(), 1)?);
            }
        }

        if sample_count == 0 {
            return Err(AlgorithmError::InvalidSourceData {
                reason: "corpus contains no samples".to_string(),
            });
        }

        let patterns = PatternTable::from_patterns(windows, symbols.len())?;

        info!(
            samples = sample_count,
            symbols = symbols.len(),
            patterns = patterns.len(),
            windows = patterns.total_frequency(),
            radius = config.radius,
            "corpus model built"
        );

        Ok(Self {
            config,
            symbols,
            codes,
            patterns,
            center_counts,
            sample_count,
        })
    }

    /// Load and learn a model from a text file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or yields no samples
    pub fn from_path<P: AsRef<Path>>(path: P, config: CorpusConfig) -> Result<Self> {
        let path_buf = path.as_ref().to_path_buf();
        let text =
            std::fs::read_to_string(&path_buf).map_err(|source| AlgorithmError::FileSystem {
                path: path_buf,
                operation: "read corpus",
                source,
            })?;
        Self::from_text(&text, config)
    }

    /// Configuration the model was learned with
    pub const fn config(&self) -> &CorpusConfig {
        &self.config
    }

    /// Learned patterns, shared by every generation attempt
    pub const fn patterns(&self) -> &PatternTable {
        &self.patterns
    }

    /// Distinct symbols indexed by code
    pub fn symbols(&self) -> &[char] {
        &self.symbols
    }

    /// Number of distinct symbols including the padding symbols
    pub fn vocabulary_size(&self) -> usize {
        self.symbols.len()
    }

    /// Code of the left padding symbol
    pub const fn start_code(&self) -> SymbolCode {
        0
    }

    /// Code of the right padding symbol
    pub const fn end_code(&self) -> SymbolCode {
        1
    }

    /// Number of samples the corpus was split into
    pub const fn sample_count(&self) -> usize {
        self.sample_count
    }

    /// How often a symbol sat at the center of a window
    pub fn center_count(&self, code: SymbolCode) -> usize {
        self.center_counts.get(code).copied().unwrap_or(0)
    }

    /// Total number of windows extracted from the corpus
    pub fn total_windows(&self) -> usize {
        self.center_counts.iter().sum()
    }

    /// Symbol for a code
    pub fn symbol(&self, code: SymbolCode) -> Option<char> {
        self.symbols.get(code).copied()
    }

    /// Code for a symbol
    pub fn code(&self, symbol: char) -> Option<SymbolCode> {
        self.codes.get(&symbol).copied()
    }

    /// Convert text to symbol codes
    ///
    /// # Errors
    ///
    /// Returns an error if the text contains a symbol absent from the corpus
    pub fn encode(&self, text: &str) -> Result<Vec<SymbolCode>> {
        text.chars()
            .map(|symbol| {
                self.code(symbol)
                    .ok_or(AlgorithmError::UnknownSymbol { symbol })
            })
            .collect()
    }

    /// Convert symbol codes to text, stripping padding from both ends
    ///
    /// # Errors
    ///
    /// Returns an error if a code lies outside the vocabulary
    pub fn decode(&self, codes: &[SymbolCode]) -> Result<String> {
        let is_padding = |code: &SymbolCode| *code == self.start_code() || *code == self.end_code();
        let start = codes.iter().position(|code| !is_padding(code));
        let end = codes.iter().rposition(|code| !is_padding(code));
        let body = match (start, end) {
            (Some(start), Some(end)) => codes.get(start..=end).unwrap_or(&[]),
            _ => &[],
        };

        body.iter()
            .map(|&code| {
                self.symbol(code).ok_or(AlgorithmError::InvalidSymbolCode {
                    code,
                    vocabulary_size: self.symbols.len(),
                })
            })
            .collect()
    }

    /// Engine configuration using this model's padding symbols
    pub const fn sequence_config(&self, max_size: usize, strategy: ResolveStrategy) -> SequenceConfig {
        SequenceConfig {
            max_size,
            start_code: self.start_code(),
            end_code: self.end_code(),
            strategy,
        }
    }
}

fn split_samples<'t>(text: &'t str, config: &CorpusConfig) -> impl Iterator<Item = &'t str> {
    let strip_carriage_return = config.line_delimiter == "\n";
    let keep_empty = config.keep_empty_lines;

    text.split(config.line_delimiter.as_str())
        .map(move |sample| {
            if strip_carriage_return {
                sample.strip_suffix('\r').unwrap_or(sample)
            } else {
                sample
            }
        })
        .filter(move |sample| keep_empty || !sample.is_empty())
}
