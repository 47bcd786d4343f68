//! Text rendering of sequence superpositions and capture of failed attempts

use crate::{
    algorithm::sequence::Sequence,
    analysis::corpus::CorpusModel,
    io::error::{AlgorithmError, Contradiction, Result},
};
use std::fmt::Write as _;
use std::path::Path;

/// Render one line per position as `[<possible>|<value>|<resolved>]`
///
/// The value field is only present once the position is resolved. Codes
/// missing from the model's vocabulary render as `?`.
pub fn render_superposition(sequence: &Sequence<'_>, model: &CorpusModel) -> String {
    let symbol = |code| model.symbol(code).unwrap_or('?');
    let mut out = String::new();

    for position in sequence.positions() {
        let possible: String = position.possible().iter().map(symbol).collect();
        let value = position
            .value()
            .map(|code| format!("{}|", symbol(code)))
            .unwrap_or_default();
        let _ = writeln!(out, "[{possible}|{value}{}]", position.is_resolved());
    }

    out
}

/// One recorded contradiction with the superposition it left behind
#[derive(Debug, Clone)]
pub struct FailureFrame {
    /// 1-based attempt number
    pub attempt: usize,
    /// Why the attempt was discarded
    pub contradiction: Contradiction,
    /// Rendered final superposition
    pub rendering: String,
}

/// Collects the final state of contradicted attempts for later inspection
#[derive(Debug, Clone, Default)]
pub struct FailureCapture {
    frames: Vec<FailureFrame>,
}

impl FailureCapture {
    /// Create an empty capture
    pub const fn new() -> Self {
        Self { frames: Vec::new() }
    }

    /// Record a contradicted attempt
    pub fn record(
        &mut self,
        attempt: usize,
        contradiction: Contradiction,
        sequence: &Sequence<'_>,
        model: &CorpusModel,
    ) {
        self.frames.push(FailureFrame {
            attempt,
            contradiction,
            rendering: render_superposition(sequence, model),
        });
    }

    /// Recorded frames in attempt order
    pub fn frames(&self) -> &[FailureFrame] {
        &self.frames
    }

    /// Whether nothing was recorded
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// All frames as one report
    pub fn render(&self) -> String {
        let mut out = String::new();
        for frame in &self.frames {
            let _ = writeln!(
                out,
                "attempt {}: {}\n{}",
                frame.attempt, frame.contradiction, frame.rendering
            );
        }
        out
    }

    /// Write the report to a file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written
    pub fn export(&self, output_path: &Path) -> Result<()> {
        std::fs::write(output_path, self.render()).map_err(|source| AlgorithmError::FileSystem {
            path: output_path.to_path_buf(),
            operation: "write failure report",
            source,
        })
    }
}
