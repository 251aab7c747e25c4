//! Core library for textstat.
//!
//! This crate provides the text statistics engine used by the `textstat`
//! CLI and any downstream consumers.
//!
//! # Modules
//!
//! - [`text`] - Word and sentence extraction
//! - [`analyzer`] - Statistics computation and session history
//! - [`history`] - Fixed-capacity FIFO history
//! - [`config`] - Configuration loading and management
//! - [`error`] - Error types and result aliases
//!
//! # Quick Start
//!
//! ```
//! use textstat_core::{Analyzer, AnalysisError};
//!
//! let mut analyzer = Analyzer::new();
//! let record = analyzer.analyze("One.\nTwo.\nThree.").unwrap();
//! assert_eq!(record.line_count, 3);
//! assert_eq!(record.sentence_count, 3);
//!
//! assert_eq!(analyzer.analyze("   ").unwrap_err(), AnalysisError::EmptyInput);
//! ```
#![deny(unsafe_code)]

pub mod analyzer;
pub mod config;
pub mod error;
pub mod history;
pub mod text;

pub use analyzer::{
    AnalysisRecord, Analyzer, AnalyzerSettings, HistoryEntry, WordCount, compute_record,
};
pub use config::{Config, ConfigLoader, ConfigSources, DEFAULT_MAX_INPUT_BYTES, LogLevel};
pub use error::{AnalysisError, AnalysisResult, ConfigError, ConfigResult};
pub use history::BoundedHistory;
