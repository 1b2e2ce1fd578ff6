//! Error types for cleave.

use std::path::PathBuf;

/// Error reported by an [`IngestionSink`](crate::IngestionSink) for a rejected chunk.
pub type SinkError = Box<dyn std::error::Error + Send + Sync>;

/// Errors that can occur around chunking.
///
/// The chunking pipeline itself never fails. Errors come from configuration,
/// from reading the source document, or from the sink chunks are handed to.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Invalid chunk size (must be > 0).
    #[error("invalid chunk size: {0} (must be > 0)")]
    InvalidChunkSize(usize),

    /// The source document does not exist.
    #[error("document not found: {}", path.display())]
    SourceNotFound {
        /// The path that was looked up.
        path: PathBuf,
    },

    /// The source document exists but could not be read as UTF-8 text.
    #[error("failed to read document {}: {source}", path.display())]
    SourceRead {
        /// The path that failed to read.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The ingestion sink rejected a chunk.
    #[error("chunk {sequence} rejected by sink: {source}")]
    Sink {
        /// 1-based sequence number of the rejected chunk.
        sequence: usize,
        /// The sink's reason.
        #[source]
        source: SinkError,
    },
}

/// Result type for cleave operations.
pub type Result<T> = std::result::Result<T, Error>;
