//! Command implementations.

use std::io::Read;

use anyhow::Context;
use camino::Utf8Path;

pub mod analyze;
pub mod info;
pub mod render;
#[cfg(feature = "mcp")]
pub mod serve;
pub mod session;

/// Read a file and validate its size against the configured limit.
pub fn read_input_file(path: &Utf8Path, max_bytes: Option<usize>) -> anyhow::Result<String> {
    // Preflight: check file size via metadata before reading into memory.
    let metadata =
        std::fs::metadata(path.as_std_path()).with_context(|| format!("failed to read {path}"))?;
    if let Some(max) = max_bytes {
        let size = usize::try_from(metadata.len()).unwrap_or(usize::MAX);
        if size > max {
            anyhow::bail!("input too large: {path} is {size} bytes (limit: {max} bytes)");
        }
    }

    let content = std::fs::read_to_string(path.as_std_path())
        .with_context(|| format!("failed to read {path}"))?;
    Ok(content)
}

/// Read UTF-8 text from `reader`, stopping with an error once it exceeds
/// the configured limit.
pub fn read_input_stream<R: Read>(reader: R, max_bytes: Option<usize>) -> anyhow::Result<String> {
    // One byte past the limit is enough to know it was exceeded.
    let limit = max_bytes.map_or(u64::MAX, |max| {
        u64::try_from(max).unwrap_or(u64::MAX).saturating_add(1)
    });
    let mut bytes = Vec::new();
    reader
        .take(limit)
        .read_to_end(&mut bytes)
        .context("failed to read standard input")?;
    ensure_within_limit(bytes.len(), max_bytes, "standard input")?;
    String::from_utf8(bytes).context("standard input is not valid UTF-8")
}

/// Reject text whose byte length exceeds `max_bytes`.
pub fn ensure_within_limit(len: usize, max_bytes: Option<usize>, what: &str) -> anyhow::Result<()> {
    if let Some(max) = max_bytes
        && len > max
    {
        anyhow::bail!("input too large: {what} exceeds {max} bytes");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stream_within_limit_is_read_fully() {
        let text = read_input_stream("hello world".as_bytes(), Some(64)).unwrap();
        assert_eq!(text, "hello world");
    }

    #[test]
    fn stream_over_limit_fails() {
        let err = read_input_stream("hello world".as_bytes(), Some(5)).unwrap_err();
        assert!(err.to_string().contains("input too large"));
    }

    #[test]
    fn stream_without_limit() {
        let big = "x".repeat(10_000);
        assert_eq!(read_input_stream(big.as_bytes(), None).unwrap().len(), 10_000);
    }

    #[test]
    fn file_over_limit_fails() {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(tmp.path(), "twelve bytes").unwrap();
        let path = Utf8Path::from_path(tmp.path()).unwrap();
        assert!(read_input_file(path, Some(4)).is_err());
        assert_eq!(read_input_file(path, Some(12)).unwrap(), "twelve bytes");
    }
}
