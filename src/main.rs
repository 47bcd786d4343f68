//! CLI entry point for corpus-driven text generation

use clap::Parser;
use textcollapse::io::cli::{Cli, CorpusProcessor};
use tracing_subscriber::EnvFilter;

fn main() -> textcollapse::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut processor = CorpusProcessor::new(cli);
    processor.process()
}
