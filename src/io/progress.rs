//! Multi-corpus progress tracking with automatic batching for large sets

use crate::io::configuration::MAX_INDIVIDUAL_PROGRESS_BARS;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::path::Path;
use std::sync::LazyLock;

/// Progress of one corpus: name, attempts made, attempt cap, outputs, outputs requested
#[derive(Clone, Debug, Default)]
struct CorpusState {
    name: String,
    attempts: usize,
    max_attempts: usize,
    produced: usize,
    requested: usize,
}

/// Coordinates progress display while corpora are processed
///
/// Shows one bar per corpus for small batches and adds a batch bar when the
/// number of corpora exceeds what fits on screen, in which case only the
/// most recent corpora keep an individual bar.
pub struct ProgressManager {
    multi_progress: MultiProgress,
    batch_bar: Option<ProgressBar>,
    corpus_bars: Vec<ProgressBar>,
    states: Vec<CorpusState>,
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new()
    }
}

static ATTEMPT_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("{msg} [{bar:30.cyan/blue}] {prefix}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

static BATCH_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("[{elapsed_precise}] Corpora: [{bar:40.cyan/blue}] {pos}/{len}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
});

impl ProgressManager {
    /// Create a new progress manager
    pub fn new() -> Self {
        Self {
            multi_progress: MultiProgress::new(),
            batch_bar: None,
            corpus_bars: Vec::new(),
            states: Vec::new(),
        }
    }

    /// Create bars for the given number of corpora
    pub fn initialize(&mut self, corpus_count: usize) {
        if corpus_count > MAX_INDIVIDUAL_PROGRESS_BARS + 1 {
            let batch_bar = ProgressBar::new(corpus_count as u64);
            batch_bar.set_style(BATCH_STYLE.clone());
            self.batch_bar = Some(self.multi_progress.add(batch_bar));
        }

        for _ in 0..corpus_count.min(MAX_INDIVIDUAL_PROGRESS_BARS) {
            let bar = ProgressBar::new(0);
            bar.set_style(ATTEMPT_STYLE.clone());
            self.corpus_bars.push(self.multi_progress.add(bar));
        }
    }

    /// Start tracking a corpus
    pub fn start_corpus(&mut self, index: usize, path: &Path, requested: usize, max_attempts: usize) {
        let name = path
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();
        if index >= self.states.len() {
            self.states.resize(index + 1, CorpusState::default());
        }
        if let Some(state) = self.states.get_mut(index) {
            *state = CorpusState {
                name,
                attempts: 0,
                max_attempts,
                produced: 0,
                requested,
            };
        }
        self.update_bars();
    }

    /// Report a finished attempt
    pub fn update_attempt(&mut self, index: usize, attempts: usize, produced: usize) {
        if let Some(state) = self.states.get_mut(index) {
            state.attempts = attempts;
            state.produced = produced;
        }
        self.update_bars();
    }

    /// Mark a corpus as done
    pub fn complete_corpus(&mut self, index: usize) {
        if let Some(ref batch_bar) = self.batch_bar {
            batch_bar.inc(1);
        }
        if let Some(state) = self.states.get_mut(index) {
            state.name = format!("✓ {}", state.name);
            state.attempts = state.max_attempts;
        }
        self.update_bars();
    }

    /// Clean up all progress displays
    pub fn finish(&self) {
        if let Some(ref batch_bar) = self.batch_bar {
            batch_bar.finish_with_message("All corpora processed");
        }
        let _ = self.multi_progress.clear();
    }

    fn update_bars(&self) {
        let active: Vec<&CorpusState> = self
            .states
            .iter()
            .filter(|state| !state.name.is_empty())
            .collect();
        let start = active.len().saturating_sub(MAX_INDIVIDUAL_PROGRESS_BARS);
        let visible = active.get(start..).unwrap_or(&[]);

        for (bar_index, state) in visible.iter().enumerate() {
            if let Some(bar) = self.corpus_bars.get(bar_index) {
                bar.set_length(state.max_attempts as u64);
                bar.set_position(state.attempts as u64);
                let width = state.requested.to_string().len();
                bar.set_message(format!("{:>width$}/{}", state.produced, state.requested));
                bar.set_prefix(state.name.clone());
            }
        }

        for bar in self.corpus_bars.iter().skip(visible.len()) {
            bar.set_length(0);
            bar.set_position(0);
            bar.set_message(String::new());
            bar.set_prefix(String::new());
        }
    }
}
