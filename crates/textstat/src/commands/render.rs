//! Plain-text rendering of analysis results.
//!
//! Writers are generic so the interactive session and its tests can share
//! the exact output of the one-shot command.

use std::io::{self, Write};

use owo_colors::{OwoColorize, Stream};
use textstat_core::{AnalysisRecord, BoundedHistory, HistoryEntry};

const RULE_WIDTH: usize = 50;

/// Write the full statistics block for one record.
pub fn write_record<W: Write>(out: &mut W, record: &AnalysisRecord) -> io::Result<()> {
    let rule = "=".repeat(RULE_WIDTH);
    writeln!(out)?;
    writeln!(out, "{rule}")?;
    writeln!(
        out,
        "{}",
        "TEXT ANALYSIS".if_supports_color(Stream::Stdout, |t| t.bold())
    )?;
    writeln!(out, "{rule}")?;

    writeln!(out, "Text length: {} characters", record.text_length)?;
    writeln!(out, "Characters (no whitespace): {}", record.character_count)?;
    writeln!(out, "Words: {}", record.word_count)?;
    writeln!(out, "Unique words: {}", record.unique_words())?;
    writeln!(out, "Sentences: {}", record.sentence_count)?;
    writeln!(out, "Lines: {}", record.line_count)?;
    writeln!(
        out,
        "Average word length: {} characters",
        record.average_word_length
    )?;
    writeln!(
        out,
        "Estimated reading time: {} minutes",
        record.reading_time_minutes
    )?;

    if !record.most_common_words.is_empty() {
        writeln!(out)?;
        writeln!(
            out,
            "{}",
            "Most common words:".if_supports_color(Stream::Stdout, |t| t.cyan())
        )?;
        for entry in &record.most_common_words {
            writeln!(out, "   '{}': {} {}", entry.word, entry.count, times(entry.count))?;
        }
    }

    writeln!(out, "{rule}")
}

/// Write every word with its count, most frequent first, ties alphabetical.
pub fn write_frequency<W: Write>(out: &mut W, record: &AnalysisRecord) -> io::Result<()> {
    let mut entries: Vec<(&String, &usize)> = record.word_frequency.iter().collect();
    entries.sort_by(|a, b| b.1.cmp(a.1));

    writeln!(out)?;
    writeln!(
        out,
        "{}",
        "Word frequency:".if_supports_color(Stream::Stdout, |t| t.cyan())
    )?;
    for (word, count) in entries {
        writeln!(out, "   '{word}': {count}")?;
    }
    Ok(())
}

/// Write the numbered history summaries, oldest first.
pub fn write_history<W: Write>(
    out: &mut W,
    history: &BoundedHistory<HistoryEntry>,
) -> io::Result<()> {
    writeln!(out)?;
    writeln!(
        out,
        "{}",
        "--- Analysis history ---".if_supports_color(Stream::Stdout, |t| t.bold())
    )?;
    if history.is_empty() {
        writeln!(out, "(no analyses yet)")?;
    }
    for (i, entry) in history.iter().enumerate() {
        writeln!(out, "{}. {}", i + 1, entry.summary)?;
    }
    writeln!(out, "{}", "-".repeat(24))
}

const fn times(count: usize) -> &'static str {
    if count == 1 { "time" } else { "times" }
}

#[cfg(test)]
mod tests {
    use super::*;
    use textstat_core::Analyzer;

    fn render<F>(f: F) -> String
    where
        F: FnOnce(&mut Vec<u8>) -> io::Result<()>,
    {
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn record_lists_counts_and_top_words() {
        let record = Analyzer::new().analyze("Hello world! Hello again.").unwrap();
        let text = render(|out| write_record(out, &record));

        assert!(text.contains("Text length: 25 characters"));
        assert!(text.contains("Characters (no whitespace): 22"));
        assert!(text.contains("Words: 4"));
        assert!(text.contains("Sentences: 2"));
        assert!(text.contains("Lines: 1"));
        assert!(text.contains("Estimated reading time: 0.1 minutes"));
        assert!(text.contains("'hello': 2 times"));
        assert!(text.contains("'world': 1 time\n"));
    }

    #[test]
    fn frequency_is_sorted_by_count_then_word() {
        let record = Analyzer::new().analyze("b a c a c a").unwrap();
        let text = render(|out| write_frequency(out, &record));
        let a = text.find("'a': 3").unwrap();
        let c = text.find("'c': 2").unwrap();
        let b = text.find("'b': 1").unwrap();
        assert!(a < c && c < b);
    }

    #[test]
    fn history_is_numbered_oldest_first() {
        let mut analyzer = Analyzer::new();
        analyzer.analyze("first").unwrap();
        analyzer.analyze("second one").unwrap();
        let text = render(|out| write_history(out, analyzer.history()));
        assert!(text.contains("1. Text: 5 chars, 1 words"));
        assert!(text.contains("2. Text: 10 chars, 2 words"));
    }

    #[test]
    fn empty_history_says_so() {
        let analyzer = Analyzer::new();
        let text = render(|out| write_history(out, analyzer.history()));
        assert!(text.contains("(no analyses yet)"));
    }
}
