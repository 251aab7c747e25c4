//! Text statistics and session history.
//!
//! [`Analyzer::analyze`] turns one block of text into an [`AnalysisRecord`]
//! and files it in a [`BoundedHistory`] owned by that analyzer. The
//! stateless half of the work is also available as [`compute_record`].
//!
//! # Example
//!
//! ```
//! use textstat_core::Analyzer;
//!
//! let mut analyzer = Analyzer::new();
//! let record = analyzer.analyze("Hello world! Hello again.").unwrap();
//! assert_eq!(record.word_count, 4);
//! assert_eq!(record.sentence_count, 2);
//! assert_eq!(analyzer.history().len(), 1);
//! ```

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::{AnalysisError, AnalysisResult};
use crate::history::BoundedHistory;
use crate::text;

/// Reading speed used for the reading time estimate.
pub const DEFAULT_WORDS_PER_MINUTE: u32 = 200;

/// Number of entries reported in [`AnalysisRecord::most_common_words`].
pub const DEFAULT_TOP_WORDS: usize = 5;

/// Number of analyses an [`Analyzer`] remembers.
pub const DEFAULT_HISTORY_CAPACITY: usize = 5;

/// Lower bound for [`AnalysisRecord::reading_time_minutes`].
pub const MIN_READING_TIME_MINUTES: f64 = 0.1;

/// Tunables for an [`Analyzer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyzerSettings {
    /// Reading speed for the reading time estimate. Must be non-zero.
    pub words_per_minute: u32,
    /// How many ranked words to keep in `most_common_words`.
    pub top_words: usize,
    /// How many analyses to remember.
    pub history_capacity: usize,
}

impl Default for AnalyzerSettings {
    fn default() -> Self {
        Self {
            words_per_minute: DEFAULT_WORDS_PER_MINUTE,
            top_words: DEFAULT_TOP_WORDS,
            history_capacity: DEFAULT_HISTORY_CAPACITY,
        }
    }
}

/// A word and how many times it occurred.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct WordCount {
    /// The lowercased word.
    pub word: String,
    /// Number of occurrences.
    pub count: usize,
}

/// Statistics for one analyzed text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct AnalysisRecord {
    /// Characters other than space, tab, and newline.
    pub character_count: usize,
    /// Number of words.
    pub word_count: usize,
    /// Number of non-empty sentences.
    pub sentence_count: usize,
    /// Number of newline-delimited lines.
    pub line_count: usize,
    /// Occurrences of each lowercased word.
    pub word_frequency: BTreeMap<String, usize>,
    /// Most frequent words, count descending, ties in first-occurrence order.
    pub most_common_words: Vec<WordCount>,
    /// Length of the raw input in characters, whitespace included.
    pub text_length: usize,
    /// Mean word length in characters, rounded to 2 decimals.
    pub average_word_length: f64,
    /// Estimated reading time, rounded to 1 decimal and never below 0.1.
    pub reading_time_minutes: f64,
}

impl AnalysisRecord {
    /// One-line description used for history listings.
    pub fn summary(&self) -> String {
        format!(
            "Text: {} chars, {} words",
            self.text_length, self.word_count
        )
    }

    /// Number of distinct words.
    pub fn unique_words(&self) -> usize {
        self.word_frequency.len()
    }
}

/// A remembered analysis.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoryEntry {
    /// Short summary of the record (length and word count).
    pub summary: String,
    /// The full record, shared with whoever received it from `analyze`.
    pub record: Arc<AnalysisRecord>,
}

impl HistoryEntry {
    fn new(record: Arc<AnalysisRecord>) -> Self {
        Self {
            summary: record.summary(),
            record,
        }
    }
}

/// Computes text statistics and remembers the most recent results.
///
/// Each analyzer owns its history; a fresh analyzer starts empty.
/// `analyze` takes `&mut self`, so sharing one analyzer across threads
/// requires an external lock around it.
#[derive(Debug, Clone)]
pub struct Analyzer {
    settings: AnalyzerSettings,
    history: BoundedHistory<HistoryEntry>,
}

impl Default for Analyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl Analyzer {
    /// Create an analyzer with default settings.
    pub fn new() -> Self {
        Self::with_settings(AnalyzerSettings::default())
    }

    /// Create an analyzer with custom settings.
    pub fn with_settings(settings: AnalyzerSettings) -> Self {
        Self {
            history: BoundedHistory::new(settings.history_capacity),
            settings,
        }
    }

    /// Settings this analyzer was built with.
    pub const fn settings(&self) -> &AnalyzerSettings {
        &self.settings
    }

    /// Analyze `text` and record the result in history.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::EmptyInput`] when `text` is blank after
    /// trimming. History is left untouched in that case.
    #[tracing::instrument(skip(self, text), fields(text_len = text.len()))]
    pub fn analyze(&mut self, text: &str) -> AnalysisResult<Arc<AnalysisRecord>> {
        let record = Arc::new(compute_record(text, &self.settings)?);

        if let Some(evicted) = self.history.push(HistoryEntry::new(Arc::clone(&record))) {
            tracing::debug!(evicted = %evicted.summary, "history full, dropped oldest entry");
        }
        tracing::debug!(
            words = record.word_count,
            history_len = self.history.len(),
            "analysis recorded"
        );

        Ok(record)
    }

    /// Past analyses, oldest first.
    pub const fn history(&self) -> &BoundedHistory<HistoryEntry> {
        &self.history
    }
}

/// Compute statistics for `text` without touching any history.
///
/// # Errors
///
/// Returns [`AnalysisError::EmptyInput`] when `text` is blank after trimming.
#[tracing::instrument(skip(text, settings), fields(text_len = text.len()))]
pub fn compute_record(text: &str, settings: &AnalyzerSettings) -> AnalysisResult<AnalysisRecord> {
    if text.trim().is_empty() {
        return Err(AnalysisError::EmptyInput);
    }

    let character_count = text::count_non_whitespace(text);
    let words = text::extract_words(text);
    let word_count = words.len();
    let sentence_count = text::extract_sentences(text).len();
    let line_count = text::count_lines(text);

    let tally = tally_in_scan_order(&words);
    let most_common_words = rank(&tally, settings.top_words);
    let word_frequency: BTreeMap<String, usize> = tally
        .into_iter()
        .map(|(word, count)| (word.to_string(), count))
        .collect();

    let text_length = text.chars().count();
    let average_word_length = average_word_length(text);
    let reading_time_minutes = reading_time(word_count, settings.words_per_minute);

    Ok(AnalysisRecord {
        character_count,
        word_count,
        sentence_count,
        line_count,
        word_frequency,
        most_common_words,
        text_length,
        average_word_length,
        reading_time_minutes,
    })
}

/// Count each distinct word, keeping first-occurrence order.
fn tally_in_scan_order(words: &[String]) -> Vec<(&str, usize)> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut tally: Vec<(&str, usize)> = Vec::new();

    for w in words {
        if let Some(&i) = index.get(w.as_str()) {
            tally[i].1 += 1;
        } else {
            index.insert(w.as_str(), tally.len());
            tally.push((w.as_str(), 1));
        }
    }

    tally
}

/// Top `n` words by count. The sort is stable, so ties keep scan order.
fn rank(tally: &[(&str, usize)], n: usize) -> Vec<WordCount> {
    let mut ranked = tally.to_vec();
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked.truncate(n);
    ranked
        .into_iter()
        .map(|(word, count)| WordCount {
            word: word.to_string(),
            count,
        })
        .collect()
}

fn average_word_length(text: &str) -> f64 {
    let words = text::extract_words_preserving_case(text);
    if words.is_empty() {
        return 0.0;
    }
    let total: usize = words.iter().map(|w| w.chars().count()).sum();
    round_to(total as f64 / words.len() as f64, 2)
}

fn reading_time(word_count: usize, words_per_minute: u32) -> f64 {
    let minutes = word_count as f64 / f64::from(words_per_minute.max(1));
    round_to(minutes.max(MIN_READING_TIME_MINUTES), 1)
}

/// Round `v` to `places` decimals.
///
/// Rounds the exact binary value, so `0.15` (stored just below 0.15) becomes
/// `0.1`. Exact ties go to the even digit.
fn round_to(v: f64, places: usize) -> f64 {
    format!("{v:.places$}").parse().unwrap_or(v)
}
