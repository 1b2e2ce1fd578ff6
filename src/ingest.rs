//! Handing chunks to an ingestion sink.
//!
//! The driver walks the lazy chunk sequence and submits chunks one at a time.
//! Each submission must succeed before the next chunk is even computed; the
//! first failure ends the run. There is no retry at this layer: rerun with
//! `start_from` set to the failed sequence number to resume.
//!
//! ```text
//! chunks:   1   2   3   4   5   6 ...
//!           skip    ok  ok  ✗  (never computed)
//!           start_from = 3
//! ```

use std::io::Write;

use chrono::Utc;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::{Chunk, Destination, Error, SinkError};

/// Accepts chunks for storage.
pub trait IngestionSink {
    /// Store one chunk. `sequence` is the chunk's 1-based position in the document.
    ///
    /// # Errors
    ///
    /// Any error means the chunk was not stored.
    fn submit(&mut self, chunk: &Chunk, sequence: usize) -> Result<(), SinkError>;
}

impl<S: IngestionSink + ?Sized> IngestionSink for &mut S {
    fn submit(&mut self, chunk: &Chunk, sequence: usize) -> Result<(), SinkError> {
        (**self).submit(chunk, sequence)
    }
}

/// Which part of the chunk sequence to submit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchPlan {
    /// First sequence number to submit (1-based). Earlier chunks are skipped.
    pub start_from: usize,
    /// Upper bound on submitted chunks.
    pub max_chunks: Option<usize>,
}

impl Default for BatchPlan {
    fn default() -> Self {
        Self {
            start_from: 1,
            max_chunks: None,
        }
    }
}

/// Outcome of an ingestion run.
#[derive(Debug, Default)]
pub struct IngestReport {
    /// Chunks pulled from the sequence, skipped ones included.
    pub seen: usize,
    /// Chunks skipped because they precede `start_from`.
    pub skipped: usize,
    /// Chunks handed to the sink.
    pub processed: usize,
    /// Chunks the sink accepted.
    pub succeeded: usize,
    /// Chars across all processed chunks.
    pub total_chars: usize,
    /// Whether the run stopped at `max_chunks`.
    pub limit_reached: bool,
    /// The failure that stopped the run.
    pub failure: Option<Error>,
}

impl IngestReport {
    /// Sequence number of the rejected chunk, if the run failed.
    #[must_use]
    pub fn failed_at(&self) -> Option<usize> {
        match &self.failure {
            Some(Error::Sink { sequence, .. }) => Some(*sequence),
            _ => None,
        }
    }

    /// Whether every processed chunk was accepted.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.failure.is_none()
    }
}

/// Submit `chunks` to `sink` according to `plan`, stopping at the first failure.
///
/// No chunk is pulled from `chunks` once the run has stopped, so a lazy
/// sequence is computed only as far as needed.
pub fn ingest<I, S>(chunks: I, mut sink: S, plan: &BatchPlan) -> IngestReport
where
    I: IntoIterator<Item = Chunk>,
    S: IngestionSink,
{
    let mut report = IngestReport::default();
    let mut chunks = chunks.into_iter();

    loop {
        if plan.max_chunks.is_some_and(|max| report.processed >= max) {
            info!(max = report.processed, "chunk limit reached");
            report.limit_reached = true;
            break;
        }
        let Some(chunk) = chunks.next() else {
            break;
        };
        report.seen += 1;
        let sequence = report.seen;

        if sequence < plan.start_from {
            report.skipped += 1;
            continue;
        }

        let chars = chunk.char_count();
        report.processed += 1;
        report.total_chars += chars;
        debug!(sequence, preview = %preview(&chunk.text, 100), "submitting chunk");

        match sink.submit(&chunk, sequence) {
            Ok(()) => {
                report.succeeded += 1;
                info!(sequence, chars, "chunk stored");
            }
            Err(source) => {
                warn!(sequence, error = %source, "chunk rejected, stopping");
                report.failure = Some(Error::Sink { sequence, source });
                break;
            }
        }
    }

    report
}

fn preview(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

/// One memory record, as written by [`JsonLinesSink`].
#[derive(Debug, Clone, Serialize)]
pub struct MemoryRecord<'a> {
    /// `chunk_{sequence}_{unix_millis}`.
    pub message_id: String,
    /// RFC 3339 creation time, UTC.
    pub create_time: String,
    /// Sender id.
    pub sender: &'a str,
    /// Sender display name.
    pub sender_name: &'a str,
    /// Group id.
    pub group_id: &'a str,
    /// Group display name.
    pub group_name: &'a str,
    /// The chunk text.
    pub content: &'a str,
}

/// Writes each chunk as a JSON memory record on its own line.
///
/// ```rust
/// use cleave::{Chunk, Destination, IngestionSink, JsonLinesSink};
///
/// let mut sink = JsonLinesSink::new(Vec::new(), Destination::default());
/// sink.submit(&Chunk::new("天亮了。", 0, None), 1).unwrap();
///
/// let out = String::from_utf8(sink.into_inner()).unwrap();
/// assert!(out.starts_with("{\"message_id\":\"chunk_1_"));
/// assert!(out.ends_with("\"content\":\"天亮了。\"}\n"));
/// ```
#[derive(Debug)]
pub struct JsonLinesSink<W> {
    writer: W,
    destination: Destination,
}

impl<W: Write> JsonLinesSink<W> {
    /// Write records for `destination` to `writer`.
    pub fn new(writer: W, destination: Destination) -> Self {
        Self {
            writer,
            destination,
        }
    }

    /// Recover the writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> IngestionSink for JsonLinesSink<W> {
    fn submit(&mut self, chunk: &Chunk, sequence: usize) -> Result<(), SinkError> {
        let now = Utc::now();
        let record = MemoryRecord {
            message_id: format!("chunk_{sequence}_{}", now.timestamp_millis()),
            create_time: now.to_rfc3339(),
            sender: &self.destination.sender,
            sender_name: &self.destination.sender_name,
            group_id: &self.destination.group_id,
            group_name: &self.destination.group_name,
            content: &chunk.text,
        };
        serde_json::to_writer(&mut self.writer, &record)?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preview_truncates_on_chars() {
        assert_eq!(preview("一二三", 2), "一二...");
        assert_eq!(preview("一二", 2), "一二");
    }

    #[test]
    fn test_default_plan() {
        let plan = BatchPlan::default();
        assert_eq!(plan.start_from, 1);
        assert_eq!(plan.max_chunks, None);
    }

    #[test]
    fn test_record_fields() {
        let mut sink = JsonLinesSink::new(Vec::new(), Destination::default());
        sink.submit(&Chunk::new("内容。", 4, None), 5).unwrap();
        let out = String::from_utf8(sink.into_inner()).unwrap();
        let value: serde_json::Value = serde_json::from_str(out.trim_end()).unwrap();
        assert!(value["message_id"].as_str().unwrap().starts_with("chunk_5_"));
        assert_eq!(value["group_id"], "group_123");
        assert_eq!(value["sender"], "user_001");
        assert_eq!(value["content"], "内容。");
        assert!(value["create_time"].as_str().unwrap().contains('T'));
    }
}
