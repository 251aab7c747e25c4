//! Logging setup.
//!
//! Human-readable logs go to stderr so stdout stays clean for reports,
//! JSON output, and the MCP transport. When a log directory or path is
//! configured, events are also appended to a JSONL file through a
//! non-blocking writer.

use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

/// Environment variable naming an explicit log file.
const LOG_PATH_ENV: &str = "TEXTSTAT_LOG_PATH";

/// Environment variable naming a log directory.
const LOG_DIR_ENV: &str = "TEXTSTAT_LOG_DIR";

/// File name used inside a log directory.
const LOG_FILE_NAME: &str = "textstat.jsonl";

/// Where file logs should be written, if anywhere.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObservabilityConfig {
    /// Full path of the JSONL log file. `None` disables file logging.
    pub log_file: Option<PathBuf>,
}

impl ObservabilityConfig {
    /// Resolve the log file from the environment, falling back to the
    /// configured log directory.
    ///
    /// Precedence: `TEXTSTAT_LOG_PATH` > `TEXTSTAT_LOG_DIR` > `config_log_dir`.
    pub fn from_env_with_overrides(config_log_dir: Option<PathBuf>) -> Self {
        let log_path = std::env::var_os(LOG_PATH_ENV).map(PathBuf::from);
        let log_dir = std::env::var_os(LOG_DIR_ENV).map(PathBuf::from);
        Self::resolve(log_path, log_dir, config_log_dir)
    }

    fn resolve(
        log_path: Option<PathBuf>,
        log_dir: Option<PathBuf>,
        config_log_dir: Option<PathBuf>,
    ) -> Self {
        let log_file = log_path.or_else(|| {
            log_dir
                .or(config_log_dir)
                .map(|dir| dir.join(LOG_FILE_NAME))
        });
        Self { log_file }
    }
}

/// Build the log filter.
///
/// `RUST_LOG` wins when set. Otherwise `--quiet` forces `error`, each
/// `--verbose` steps up from the configured level (`-v` = debug,
/// `-vv` = trace).
pub fn env_filter(quiet: bool, verbose: u8, config_level: &str) -> EnvFilter {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return filter;
    }
    EnvFilter::new(filter_directive(quiet, verbose, config_level))
}

fn filter_directive(quiet: bool, verbose: u8, config_level: &str) -> &str {
    if quiet {
        return "error";
    }
    match verbose {
        0 => config_level,
        1 => "debug",
        _ => "trace",
    }
}

/// Install the global subscriber.
///
/// The returned guard flushes the file writer on drop; keep it alive for
/// the life of the process.
pub fn init_observability(
    config: &ObservabilityConfig,
    filter: EnvFilter,
) -> anyhow::Result<Option<WorkerGuard>> {
    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact();

    let (file_layer, guard) = match config.log_file.as_deref() {
        Some(path) => {
            let (writer, guard) = file_writer(path)?;
            let layer = fmt::layer()
                .json()
                .with_ansi(false)
                .with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .context("failed to install tracing subscriber")?;

    Ok(guard)
}

fn file_writer(
    path: &Path,
) -> anyhow::Result<(tracing_appender::non_blocking::NonBlocking, WorkerGuard)> {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let file_name = path
        .file_name()
        .with_context(|| format!("log path has no file name: {}", path.display()))?;

    std::fs::create_dir_all(dir)
        .with_context(|| format!("failed to create log directory {}", dir.display()))?;

    let appender = tracing_appender::rolling::never(dir, file_name);
    Ok(tracing_appender::non_blocking(appender))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_path_wins() {
        let config = ObservabilityConfig::resolve(
            Some(PathBuf::from("/tmp/a.jsonl")),
            Some(PathBuf::from("/tmp/dir")),
            Some(PathBuf::from("/tmp/config")),
        );
        assert_eq!(config.log_file, Some(PathBuf::from("/tmp/a.jsonl")));
    }

    #[test]
    fn env_dir_beats_config_dir() {
        let config = ObservabilityConfig::resolve(
            None,
            Some(PathBuf::from("/tmp/dir")),
            Some(PathBuf::from("/tmp/config")),
        );
        assert_eq!(config.log_file, Some(PathBuf::from("/tmp/dir/textstat.jsonl")));
    }

    #[test]
    fn config_dir_used_last() {
        let config = ObservabilityConfig::resolve(None, None, Some(PathBuf::from("/var/log")));
        assert_eq!(config.log_file, Some(PathBuf::from("/var/log/textstat.jsonl")));
    }

    #[test]
    fn no_sources_disables_file_logging() {
        assert_eq!(ObservabilityConfig::resolve(None, None, None).log_file, None);
    }

    #[test]
    fn quiet_and_verbose_directives() {
        assert_eq!(filter_directive(true, 2, "info"), "error");
        assert_eq!(filter_directive(false, 0, "warn"), "warn");
        assert_eq!(filter_directive(false, 1, "warn"), "debug");
        assert_eq!(filter_directive(false, 3, "warn"), "trace");
    }
}
