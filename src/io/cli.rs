//! Command-line interface for batch generation from text corpora

use crate::algorithm::executor::{Attempt, Generator};
use crate::algorithm::position::ResolveStrategy;
use crate::analysis::corpus::{CorpusConfig, CorpusModel};
use crate::io::configuration::{
    DEFAULT_COUNT, DEFAULT_MAX_ATTEMPTS, DEFAULT_MAX_SIZE, DEFAULT_RADIUS, DEFAULT_SEED,
    INPUT_EXTENSION, OUTPUT_SUFFIX,
};
use crate::io::error::{AlgorithmError, Result, invalid_parameter};
use crate::io::progress::ProgressManager;
use crate::io::visualization::FailureCapture;
use clap::{Parser, ValueEnum};
use rand::{SeedableRng, rngs::StdRng};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Resolution strategy selectable on the command line
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum StrategyArg {
    /// Frequency-weighted random choice
    #[default]
    Weighted,
    /// Most frequent remaining pattern
    MostFrequentPattern,
    /// Most frequent remaining center symbol
    MostFrequentCenter,
}

impl From<StrategyArg> for ResolveStrategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Weighted => Self::Weighted,
            StrategyArg::MostFrequentPattern => Self::MostFrequentPattern,
            StrategyArg::MostFrequentCenter => Self::MostFrequentCenter,
        }
    }
}

#[derive(Parser)]
#[command(name = "textcollapse")]
#[command(
    author,
    version,
    about = "Generate text resembling a corpus with one-dimensional wave function collapse"
)]
/// Command-line arguments for the text generation tool
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// Input text file or directory of text files to learn from
    #[arg(value_name = "TARGET")]
    pub target: PathBuf,

    /// Random seed for reproducible generation
    #[arg(short, long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Number of outputs to generate per corpus
    #[arg(short = 'n', long, default_value_t = DEFAULT_COUNT)]
    pub count: usize,

    /// Maximum collapse attempts per corpus
    #[arg(short, long, default_value_t = DEFAULT_MAX_ATTEMPTS)]
    pub attempts: usize,

    /// Maximum length of each output in symbols
    #[arg(short = 'l', long, default_value_t = DEFAULT_MAX_SIZE)]
    pub max_size: usize,

    /// Number of neighbors on each side that constrain a symbol
    #[arg(short, long, default_value_t = DEFAULT_RADIUS)]
    pub radius: usize,

    /// String separating training samples, `\n`, `\r`, `\t` and `\\` are unescaped
    #[arg(short, long, default_value = r"\n", value_parser = parse_delimiter)]
    pub delimiter: String,

    /// How positions choose their symbol when collapsed
    #[arg(long, value_enum, default_value_t = StrategyArg::Weighted)]
    pub strategy: StrategyArg,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Process corpora even if output exists
    #[arg(long)]
    pub no_skip: bool,

    /// Print outputs to stdout instead of writing files
    #[arg(short, long)]
    pub print: bool,

    /// Learn from empty samples as well
    #[arg(short, long)]
    pub keep_empty_lines: bool,

    /// Write the superposition of each contradicted attempt to <input>_failures.txt
    #[arg(short = 'f', long)]
    pub show_failures: bool,
}

impl Cli {
    /// Check if existing output files should be skipped
    pub const fn skip_existing(&self) -> bool {
        !self.no_skip && !self.print
    }

    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Corpus options derived from the arguments
    pub fn corpus_config(&self) -> CorpusConfig {
        CorpusConfig {
            radius: self.radius,
            line_delimiter: self.delimiter.clone(),
            keep_empty_lines: self.keep_empty_lines,
            ..CorpusConfig::default()
        }
    }
}

/// Generated text for one corpus
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorpusOutput {
    /// Decoded outputs in generation order
    pub lines: Vec<String>,
    /// Attempts spent
    pub attempts: usize,
    /// Whether the attempt cap cut generation short
    pub truncated: bool,
}

/// Parse a sample delimiter, resolving backslash escapes typed on the command line
///
/// Unknown escapes and a trailing backslash are kept as written.
///
/// # Errors
///
/// Returns an error if the delimiter is empty
pub fn parse_delimiter(raw: &str) -> std::result::Result<String, String> {
    if raw.is_empty() {
        return Err("delimiter must not be empty".to_string());
    }

    let mut delimiter = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(symbol) = chars.next() {
        if symbol != '\\' {
            delimiter.push(symbol);
            continue;
        }
        match chars.next() {
            Some('n') => delimiter.push('\n'),
            Some('r') => delimiter.push('\r'),
            Some('t') => delimiter.push('\t'),
            Some('\\') => delimiter.push('\\'),
            Some(other) => {
                delimiter.push('\\');
                delimiter.push(other);
            }
            None => delimiter.push('\\'),
        }
    }
    Ok(delimiter)
}

/// Orchestrates batch processing of corpus files with progress tracking
pub struct CorpusProcessor {
    cli: Cli,
    progress_manager: Option<ProgressManager>,
}

impl CorpusProcessor {
    /// Create a new processor with the given CLI arguments
    pub fn new(cli: Cli) -> Self {
        let progress_manager = cli.should_show_progress().then(ProgressManager::new);

        Self {
            cli,
            progress_manager,
        }
    }

    /// Process corpora according to CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if target validation, corpus loading or output
    /// writing fails
    pub fn process(&mut self) -> Result<()> {
        let files = self.collect_files()?;

        if files.is_empty() {
            return Ok(());
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.initialize(files.len());
        }

        for (index, file) in files.iter().enumerate() {
            self.process_file(file, index)?;
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.finish();
        }

        Ok(())
    }

    fn collect_files(&self) -> Result<Vec<PathBuf>> {
        if self.cli.target.is_file() {
            if self.should_process_file(&self.cli.target) {
                Ok(vec![self.cli.target.clone()])
            } else {
                Ok(vec![])
            }
        } else if self.cli.target.is_dir() {
            let read_error = |source| AlgorithmError::FileSystem {
                path: self.cli.target.clone(),
                operation: "read directory",
                source,
            };
            let mut files = Vec::new();
            for entry in std::fs::read_dir(&self.cli.target).map_err(read_error)? {
                let path = entry.map_err(read_error)?.path();
                if path.extension().and_then(|s| s.to_str()) == Some(INPUT_EXTENSION)
                    && !is_generated_output(&path)
                    && self.should_process_file(&path)
                {
                    files.push(path);
                }
            }
            files.sort();
            Ok(files)
        } else {
            Err(invalid_parameter(
                "target",
                &self.cli.target.display(),
                &"must be a text file or directory",
            ))
        }
    }

    fn should_process_file(&self, input_path: &Path) -> bool {
        if !self.cli.skip_existing() {
            return true;
        }

        let output_path = Self::get_output_path(input_path);
        if output_path.exists() {
            info!(input = %input_path.display(), "skipping corpus, output exists");
            false
        } else {
            true
        }
    }

    fn process_file(&mut self, input_path: &Path, index: usize) -> Result<()> {
        let model = CorpusModel::from_path(input_path, self.cli.corpus_config())?;
        let output = self.generate_for(&model, input_path, index)?;

        if output.truncated {
            warn!(
                input = %input_path.display(),
                produced = output.lines.len(),
                requested = self.cli.count,
                attempts = output.attempts,
                "attempts exhausted, output truncated"
            );
        }

        let mut text = output.lines.join("\n");
        if !text.is_empty() {
            text.push('\n');
        }

        if self.cli.print {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(text.as_bytes())?;
            stdout.flush()?;
        } else {
            let output_path = Self::get_output_path(input_path);
            std::fs::write(&output_path, text).map_err(|source| AlgorithmError::FileSystem {
                path: output_path,
                operation: "write output",
                source,
            })?;
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.complete_corpus(index);
        }

        Ok(())
    }

    /// Run the generator for one corpus, updating progress and capturing failures
    fn generate_for(
        &mut self,
        model: &CorpusModel,
        input_path: &Path,
        index: usize,
    ) -> Result<CorpusOutput> {
        let config = model.sequence_config(self.cli.max_size, self.cli.strategy.into());
        let rng = StdRng::seed_from_u64(self.cli.seed);
        let mut generator = Generator::new(model.patterns(), config, rng)?;

        if let Some(ref mut pm) = self.progress_manager {
            pm.start_corpus(index, input_path, self.cli.count, self.cli.attempts);
        }

        let mut failures = self.cli.show_failures.then(FailureCapture::new);
        let mut produced = 0;
        let progress = &mut self.progress_manager;

        let generation =
            generator.generate_with(self.cli.count, self.cli.attempts, |number, sequence, attempt| {
                match attempt {
                    Attempt::Solved(_) => produced += 1,
                    Attempt::Contradicted(contradiction) => {
                        if let Some(capture) = failures.as_mut() {
                            capture.record(number, *contradiction, sequence, model);
                        }
                    }
                }
                if let Some(pm) = progress.as_mut() {
                    pm.update_attempt(index, number, produced);
                }
            });

        if let Some(capture) = failures.filter(|capture| !capture.is_empty()) {
            capture.export(&Self::get_failures_path(input_path))?;
        }

        let lines = generation
            .outputs
            .iter()
            .map(|codes| model.decode(codes))
            .collect::<Result<Vec<_>>>()?;

        Ok(CorpusOutput {
            lines,
            attempts: generation.attempts,
            truncated: generation.is_truncated(),
        })
    }

    /// Path of the generated output for a corpus
    pub fn get_output_path(input_path: &Path) -> PathBuf {
        Self::sibling_path(input_path, &format!("{OUTPUT_SUFFIX}.{INPUT_EXTENSION}"))
    }

    /// Path of the failure report for a corpus
    pub fn get_failures_path(input_path: &Path) -> PathBuf {
        Self::sibling_path(input_path, &format!("_failures.{INPUT_EXTENSION}"))
    }

    fn sibling_path(input_path: &Path, suffix: &str) -> PathBuf {
        let stem = input_path.file_stem().unwrap_or_default();
        let name = format!("{}{suffix}", stem.to_string_lossy());

        if let Some(parent) = input_path.parent() {
            parent.join(name)
        } else {
            PathBuf::from(name)
        }
    }
}

fn is_generated_output(path: &Path) -> bool {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .is_some_and(|stem| stem.ends_with(OUTPUT_SUFFIX) || stem.ends_with("_failures"))
}
