//! Reading source documents.

use std::io::ErrorKind;
use std::path::Path;

use tracing::debug;

use crate::{Error, Result};

/// Read a UTF-8 document from disk.
///
/// # Errors
///
/// - [`Error::SourceNotFound`] if nothing exists at `path`.
/// - [`Error::SourceRead`] for any other failure, including invalid UTF-8.
pub fn read_document(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|source| match source.kind() {
        ErrorKind::NotFound => Error::SourceNotFound {
            path: path.to_path_buf(),
        },
        _ => Error::SourceRead {
            path: path.to_path_buf(),
            source,
        },
    })?;
    debug!(path = %path.display(), bytes = text.len(), "document read");
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file() {
        let err = read_document("/definitely/not/here.txt").unwrap_err();
        assert!(matches!(err, Error::SourceNotFound { .. }));
        assert!(err.to_string().contains("not/here.txt"));
    }

    #[test]
    fn test_invalid_utf8() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.txt");
        std::fs::write(&path, [0xff, 0xfe, 0x00]).unwrap();
        let err = read_document(&path).unwrap_err();
        assert!(matches!(err, Error::SourceRead { .. }));
    }

    #[test]
    fn test_reads_text() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.txt");
        std::fs::write(&path, "第1章 开始。").unwrap();
        assert_eq!(read_document(&path).unwrap(), "第1章 开始。");
    }
}
