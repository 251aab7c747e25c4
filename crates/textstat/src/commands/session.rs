//! Session command: interactive analysis loop with history.
//!
//! Main menu: analyze text, show history, quit. Text is entered either as a
//! single line or as several lines terminated by `END` on its own line.
//! History lives as long as the session.

use std::io::{self, BufRead, Write};

use clap::Args;
use owo_colors::{OwoColorize, Stream};
use tracing::{debug, info, instrument, warn};

use textstat_core::{Analyzer, AnalyzerSettings};

use super::{ensure_within_limit, render};

/// Line that ends multi-line input (compared case-insensitively).
const END_MARKER: &str = "END";

/// Arguments for the `session` subcommand.
#[derive(Args, Debug, Default)]
pub struct SessionArgs {
    // No subcommand-specific arguments; uses global --json flag
}

/// Run an interactive session on stdin/stdout.
#[instrument(name = "cmd_session", skip_all)]
pub fn cmd_session(
    _args: SessionArgs,
    global_json: bool,
    settings: AnalyzerSettings,
    max_input_bytes: Option<usize>,
) -> anyhow::Result<()> {
    debug!(json = global_json, ?settings, "executing session command");

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut session = Session::new(
        Analyzer::with_settings(settings),
        stdin.lock(),
        stdout.lock(),
    )
    .with_json(global_json)
    .with_input_limit(max_input_bytes);

    session.run()?;
    Ok(())
}

/// An interactive session over any line reader and writer.
pub struct Session<R, W> {
    analyzer: Analyzer,
    input: R,
    output: W,
    json: bool,
    max_input_bytes: Option<usize>,
}

impl<R: BufRead, W: Write> Session<R, W> {
    /// Create a session that owns `analyzer` for its whole lifetime.
    pub const fn new(analyzer: Analyzer, input: R, output: W) -> Self {
        Self {
            analyzer,
            input,
            output,
            json: false,
            max_input_bytes: None,
        }
    }

    /// Print records and history as JSON instead of text.
    #[must_use]
    pub const fn with_json(mut self, json: bool) -> Self {
        self.json = json;
        self
    }

    /// Reject entered text larger than `max_bytes`.
    #[must_use]
    pub const fn with_input_limit(mut self, max_bytes: Option<usize>) -> Self {
        self.max_input_bytes = max_bytes;
        self
    }

    /// The analyzer and its history.
    pub const fn analyzer(&self) -> &Analyzer {
        &self.analyzer
    }

    /// Run the menu loop until the user quits or input ends.
    pub fn run(&mut self) -> anyhow::Result<()> {
        info!("session started");
        loop {
            self.write_main_menu()?;
            let Some(choice) = self.read_line()? else {
                writeln!(self.output)?;
                break;
            };

            match choice.trim() {
                "1" => self.analyze_entry()?,
                "2" => self.show_history()?,
                "3" => {
                    writeln!(self.output, "Bye")?;
                    break;
                }
                other => {
                    debug!(choice = other, "invalid menu choice");
                    writeln!(self.output, "Invalid option. Try again.")?;
                }
            }
        }
        info!(
            analyses = self.analyzer.history().len(),
            "session ended"
        );
        Ok(())
    }

    fn write_main_menu(&mut self) -> io::Result<()> {
        writeln!(self.output)?;
        writeln!(
            self.output,
            "{}",
            "Text analyzer".if_supports_color(Stream::Stdout, |t| t.bold())
        )?;
        writeln!(self.output, "1. Analyze text")?;
        writeln!(self.output, "2. View analysis history")?;
        writeln!(self.output, "3. Quit")?;
        self.prompt("Choose an option (1-3): ")
    }

    fn analyze_entry(&mut self) -> anyhow::Result<()> {
        let Some(text) = self.collect_text()? else {
            return Ok(());
        };

        if let Err(err) = ensure_within_limit(text.len(), self.max_input_bytes, "entered text") {
            self.write_error(&err)?;
            return Ok(());
        }

        let record = match self.analyzer.analyze(&text) {
            Ok(record) => record,
            Err(err) => {
                warn!(error = %err, "analysis rejected");
                self.write_error(&err)?;
                return Ok(());
            }
        };

        if self.json {
            writeln!(self.output, "{}", serde_json::to_string_pretty(&*record)?)?;
            return Ok(());
        }

        render::write_record(&mut self.output, &record)?;
        self.prompt("\nShow full word frequency? (y/n): ")?;
        if let Some(answer) = self.read_line()?
            && matches!(answer.trim().to_lowercase().as_str(), "y" | "yes" | "s" | "si")
        {
            render::write_frequency(&mut self.output, &record)?;
        }
        Ok(())
    }

    fn show_history(&mut self) -> anyhow::Result<()> {
        let history = self.analyzer.history();
        if self.json {
            writeln!(self.output, "{}", serde_json::to_string_pretty(history)?)?;
        } else {
            render::write_history(&mut self.output, history)?;
        }
        Ok(())
    }

    /// Ask how to enter text and collect it. `None` means go back.
    fn collect_text(&mut self) -> io::Result<Option<String>> {
        writeln!(self.output)?;
        writeln!(self.output, "How do you want to enter the text?")?;
        writeln!(self.output, "1. Type a single line")?;
        writeln!(
            self.output,
            "2. Type several lines (finish with '{END_MARKER}' on its own line)"
        )?;
        writeln!(self.output, "3. Back to main menu")?;
        self.prompt("Choose an option (1-3): ")?;

        let Some(choice) = self.read_line()? else {
            return Ok(None);
        };

        match choice.trim() {
            "1" => {
                self.prompt("\nType your text and press Enter:\n")?;
                self.read_line()
            }
            "2" => {
                self.prompt(&format!(
                    "\nType your text ('{END_MARKER}' on its own line to finish):\n"
                ))?;
                let mut lines = Vec::new();
                while let Some(line) = self.read_line()? {
                    if line.eq_ignore_ascii_case(END_MARKER) {
                        break;
                    }
                    lines.push(line);
                }
                Ok(Some(lines.join("\n")))
            }
            "3" => Ok(None),
            _ => {
                writeln!(self.output, "Invalid option")?;
                Ok(None)
            }
        }
    }

    fn prompt(&mut self, text: &str) -> io::Result<()> {
        write!(self.output, "{text}")?;
        self.output.flush()
    }

    fn write_error(&mut self, err: &dyn std::fmt::Display) -> io::Result<()> {
        writeln!(
            self.output,
            "{} {err}",
            "Error:".if_supports_color(Stream::Stdout, |t| t.red())
        )
    }

    /// Read one line without its terminator. `None` at end of input.
    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut buf = String::new();
        if self.input.read_line(&mut buf)? == 0 {
            return Ok(None);
        }
        let trimmed_len = buf.trim_end_matches(['\n', '\r']).len();
        buf.truncate(trimmed_len);
        Ok(Some(buf))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_script(script: &str) -> (String, Analyzer) {
        run_with(script, |session| session)
    }

    fn run_with<F>(script: &str, configure: F) -> (String, Analyzer)
    where
        F: FnOnce(Session<&[u8], Vec<u8>>) -> Session<&[u8], Vec<u8>>,
    {
        let session = Session::new(Analyzer::new(), script.as_bytes(), Vec::new());
        let mut session = configure(session);
        session.run().unwrap();
        let Session {
            analyzer, output, ..
        } = session;
        (String::from_utf8(output).unwrap(), analyzer)
    }

    #[test]
    fn quit_immediately() {
        let (out, analyzer) = run_script("3\n");
        assert!(out.contains("1. Analyze text"));
        assert!(out.contains("Bye"));
        assert!(analyzer.history().is_empty());
    }

    #[test]
    fn end_of_input_ends_session() {
        let (out, _) = run_script("");
        assert!(out.contains("Choose an option"));
        assert!(!out.contains("Bye"));
    }

    #[test]
    fn single_line_analysis() {
        let (out, analyzer) = run_script("1\n1\nHello world! Hello again.\nn\n3\n");
        assert!(out.contains("Words: 4"));
        assert!(out.contains("'hello': 2 times"));
        assert!(!out.contains("Word frequency:"));
        assert_eq!(analyzer.history().len(), 1);
    }

    #[test]
    fn multi_line_analysis_stops_at_end_marker() {
        let (out, analyzer) = run_script("1\n2\nOne.\nTwo.\nThree.\nend\ny\n3\n");
        assert!(out.contains("Lines: 3"));
        assert!(out.contains("Sentences: 3"));
        assert!(out.contains("Word frequency:"));
        let record = &analyzer.history().latest().unwrap().record;
        assert_eq!(record.text_length, "One.\nTwo.\nThree.".len());
    }

    #[test]
    fn empty_text_reports_error_and_continues() {
        let (out, analyzer) = run_script("1\n1\n   \n1\n1\nback again\nn\n3\n");
        assert!(out.contains("text cannot be empty"));
        assert!(out.contains("Words: 2"));
        assert_eq!(analyzer.history().len(), 1);
    }

    #[test]
    fn back_and_invalid_choices() {
        let (out, analyzer) = run_script("1\n3\n9\n1\n7\n3\n");
        assert!(out.contains("Invalid option. Try again."));
        assert!(out.contains("Invalid option\n"));
        assert!(analyzer.history().is_empty());
    }

    #[test]
    fn history_shows_last_five() {
        let mut script = String::new();
        for n in 1..=7 {
            script.push_str(&format!("1\n1\n{}\nn\n", "w ".repeat(n).trim_end()));
        }
        script.push_str("2\n3\n");

        let (out, analyzer) = run_script(&script);
        assert_eq!(analyzer.history().len(), 5);
        assert!(out.contains("1. Text: 5 chars, 3 words"));
        assert!(out.contains("5. Text: 13 chars, 7 words"));
        assert!(!out.contains("6. Text"));
    }

    #[test]
    fn json_mode_prints_records() {
        let (out, _) = run_with("1\n1\nalpha beta\n3\n", |s| s.with_json(true));
        assert!(out.contains("\"word_count\": 2"));
        assert!(!out.contains("Show full word frequency"));
    }

    #[test]
    fn input_limit_rejects_long_text() {
        let (out, analyzer) =
            run_with("1\n1\nthis line is too long\n3\n", |s| s.with_input_limit(Some(4)));
        assert!(out.contains("input too large"));
        assert!(analyzer.history().is_empty());
    }
}
