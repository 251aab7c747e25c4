//! Analyze command: statistics for one file or standard input.

use std::io::Write;

use anyhow::Context;
use camino::Utf8PathBuf;
use clap::Args;
use tracing::{debug, instrument};

use textstat_core::{AnalyzerSettings, compute_record};

use super::{read_input_file, read_input_stream, render};

/// Arguments for the `analyze` subcommand.
#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// File to analyze. Reads standard input when omitted or `-`.
    pub file: Option<Utf8PathBuf>,

    /// Also list every word with its count.
    #[arg(long)]
    pub full_frequency: bool,
}

impl AnalyzeArgs {
    fn source(&self) -> Option<&Utf8PathBuf> {
        self.file.as_ref().filter(|path| path.as_str() != "-")
    }
}

/// Analyze a file (or stdin) and print its statistics.
#[instrument(name = "cmd_analyze", skip_all, fields(file = ?args.file))]
pub fn cmd_analyze(
    args: AnalyzeArgs,
    global_json: bool,
    settings: &AnalyzerSettings,
    max_input_bytes: Option<usize>,
) -> anyhow::Result<()> {
    debug!(file = ?args.file, full_frequency = args.full_frequency, "executing analyze command");

    let (content, label) = match args.source() {
        Some(path) => (read_input_file(path, max_input_bytes)?, path.to_string()),
        None => (
            read_input_stream(std::io::stdin().lock(), max_input_bytes)?,
            "standard input".to_string(),
        ),
    };

    let record =
        compute_record(&content, settings).with_context(|| format!("failed to analyze {label}"))?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    if global_json {
        writeln!(out, "{}", serde_json::to_string_pretty(&record)?)?;
    } else {
        render::write_record(&mut out, &record)?;
        if args.full_frequency {
            render::write_frequency(&mut out, &record)?;
        }
    }

    debug!(words = record.word_count, "analyze command completed");
    Ok(())
}
