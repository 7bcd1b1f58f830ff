//! Line sources: standard input or a file.

use crate::error::{Result, TintlogError};
use std::path::Path;
use tokio::io::{AsyncBufRead, BufReader};

/// Buffered, sendable line source
pub type InputReader = Box<dyn AsyncBufRead + Send + Unpin>;

/// Open `path` for reading, or standard input when no path is given.
///
/// Directories are rejected up front; any other open failure is returned as
/// [`TintlogError::InputOpen`].
pub async fn open_input(path: Option<&Path>) -> Result<InputReader> {
    let Some(path) = path else {
        return Ok(Box::new(BufReader::new(tokio::io::stdin())));
    };

    let file = tokio::fs::File::open(path)
        .await
        .map_err(|err| TintlogError::input_open(path, err))?;

    let metadata = file
        .metadata()
        .await
        .map_err(|err| TintlogError::input_open(path, err))?;
    if metadata.is_dir() {
        return Err(TintlogError::input_open(
            path,
            std::io::Error::new(std::io::ErrorKind::InvalidInput, "is a directory"),
        ));
    }

    Ok(Box::new(BufReader::new(file)))
}

/// Strip the line terminator (`\n` or `\r\n`) and decode, replacing invalid
/// UTF-8 sequences.
pub fn decode_line(raw: &[u8]) -> String {
    let raw = raw.strip_suffix(b"\n").unwrap_or(raw);
    let raw = raw.strip_suffix(b"\r").unwrap_or(raw);
    String::from_utf8_lossy(raw).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::AsyncBufReadExt;

    #[test]
    fn test_decode_strips_terminators() {
        assert_eq!(decode_line(b"plain\n"), "plain");
        assert_eq!(decode_line(b"windows\r\n"), "windows");
        assert_eq!(decode_line(b"no newline"), "no newline");
        assert_eq!(decode_line(b"\n"), "");
        assert_eq!(decode_line(b"inner\rcarriage\n"), "inner\rcarriage");
    }

    #[test]
    fn test_decode_replaces_invalid_utf8() {
        assert_eq!(decode_line(b"bad \xff byte\n"), "bad \u{fffd} byte");
    }

    #[tokio::test]
    async fn test_open_file_reads_lines() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("input.log");
        std::fs::write(&path, "one\ntwo\n").expect("write input");

        let reader = open_input(Some(path.as_path())).await.unwrap();
        let mut lines = reader.lines();
        assert_eq!(lines.next_line().await.unwrap().as_deref(), Some("one"));
        assert_eq!(lines.next_line().await.unwrap().as_deref(), Some("two"));
        assert_eq!(lines.next_line().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_open_missing_file_fails() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("missing.log");

        let err = open_input(Some(path.as_path())).await.err().expect("open must fail");
        assert!(matches!(err, TintlogError::InputOpen { .. }));
        assert!(err.to_string().contains("missing.log"));
    }

    #[tokio::test]
    async fn test_open_directory_fails() {
        let dir = tempfile::tempdir().expect("create temp dir");

        let err = open_input(Some(dir.path())).await.err().expect("open must fail");
        assert!(matches!(err, TintlogError::InputOpen { .. }));
    }
}
