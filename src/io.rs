//! I/O adapters for parameter lists and result records.
//!
//! These sit outside the core job contract: a line-oriented reader that
//! produces an ordered list of strings (typically `SimpleJob` parameters)
//! and a writer that serializes a list of structured records as JSON
//! lines.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::Result;

/// Reads a UTF-8 text file into an ordered list of lines.
///
/// Lines are trimmed; blank lines are skipped. Order is preserved.
pub struct LineReader {
    path: PathBuf,
}

impl LineReader {
    /// Create a reader for the given file path.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Load the file and return its non-empty lines in order.
    ///
    /// # Errors
    /// Fails with [`BatchError::Io`](crate::BatchError::Io) if the file
    /// cannot be read.
    pub async fn load(&self) -> Result<Vec<String>> {
        let contents = tokio::fs::read_to_string(&self.path).await?;
        let lines: Vec<String> = contents
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect();

        tracing::debug!(path = %self.path.display(), lines = lines.len(), "loaded parameter lines");
        Ok(lines)
    }
}

/// Writes a list of structured records as one JSON object per line.
pub struct JsonLinesWriter {
    path: PathBuf,
}

impl JsonLinesWriter {
    /// Create a writer for the given file path.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Serialize the records and write them, one per line, replacing any
    /// existing file.
    ///
    /// # Errors
    /// Fails with [`BatchError::Serialization`](crate::BatchError::Serialization)
    /// if a record cannot be serialized, or
    /// [`BatchError::Io`](crate::BatchError::Io) if the file cannot be
    /// written.
    pub async fn write<T: Serialize>(&self, records: &[T]) -> Result<()> {
        let mut buf = String::new();
        for record in records {
            buf.push_str(&serde_json::to_string(record)?);
            buf.push('\n');
        }
        tokio::fs::write(&self.path, buf).await?;

        tracing::debug!(path = %self.path.display(), records = records.len(), "wrote records");
        Ok(())
    }
}
