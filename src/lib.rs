//! # cleave
//!
//! Sentence-aligned, chapter-aware chunking for feeding long documents into a
//! memory store one piece at a time.
//!
//! ## The Problem
//!
//! A memory store ingests text in bounded pieces. A novel or a long report
//! doesn't fit in one, so it has to be cut. Where it's cut matters:
//!
//! - A sentence split in half is two useless memories
//! - A chunk that runs from the end of one chapter into the next mixes two contexts
//! - Chunks that are too small lose the surrounding narrative
//!
//! ## The Pipeline
//!
//! Four stages, each consuming the previous one lazily:
//!
//! ```text
//! raw text
//!    │  normalize        collapse whitespace runs to one space
//!    ▼
//! normalized text
//!    │  segments         cut at every 第…章 chapter heading
//!    ▼
//! Segment*
//!    │  split_sentences  cut after 。！？, keeping the mark with its sentence
//!    ▼
//! Token*
//!    │  Chunks           accumulate until chunk_size is reached
//!    ▼
//! Chunk*
//! ```
//!
//! `chunk_size` is a *minimum*: a chunk is emitted once it reaches the size,
//! and the sentence that crosses the line stays whole. Only the last chunk of
//! a document, the chunk right before a chapter heading, and a sentence that
//! is oversized on its own break that rule.
//!
//! ## Quick Start
//!
//! ```rust
//! use cleave::chunk;
//!
//! let text = "序言。\n\n第1章 天亮了。你醒了吗？快起来！\n第2章 夜深了。";
//!
//! let chunks: Vec<_> = chunk(text, 8).map(|c| c.text).collect();
//! assert_eq!(
//!     chunks,
//!     vec!["序言。", "第1章 天亮了。你醒了吗？", "快起来！", "第2章 夜深了。"]
//! );
//! ```
//!
//! ## Ingesting
//!
//! ```rust
//! use cleave::{chunk, ingest, BatchPlan, Destination, JsonLinesSink};
//!
//! let mut sink = JsonLinesSink::new(Vec::new(), Destination::default());
//! let report = ingest(chunk("一。二。三。", 1), &mut sink, &BatchPlan::default());
//!
//! assert!(report.is_success());
//! assert_eq!(report.succeeded, 3);
//! ```

mod accumulate;
mod chapter;
mod chunk;
mod config;
mod error;
mod ingest;
mod normalize;
mod sentence;
mod size;
mod source;

pub use accumulate::{ChapterChunker, Chunks};
pub use chapter::{heading_at_start, is_chapter_heading, segments, Segment, Segments};
pub use chunk::Chunk;
pub use config::{Destination, GROUP_ID_VAR, GROUP_NAME_VAR, SENDER_NAME_VAR, SENDER_VAR};
pub use error::{Error, Result, SinkError};
pub use ingest::{ingest, BatchPlan, IngestReport, IngestionSink, JsonLinesSink, MemoryRecord};
pub use normalize::normalize;
pub use sentence::{split_sentences, Sentences, Terminator, Token};
pub use size::{ChunkSize, LengthMetric};
pub use source::read_document;

/// Lazily chunk `text`, emitting once `chunk_size` chars have accumulated.
///
/// # Panics
///
/// Panics if `chunk_size == 0`.
///
/// ```rust
/// let chunks: Vec<_> = cleave::chunk("AAA。BBB！CCC？", 5).collect();
/// assert_eq!(chunks[0].text, "AAA。BBB！");
/// assert_eq!(chunks[1].text, "CCC？");
/// ```
#[must_use]
pub fn chunk(text: &str, chunk_size: usize) -> Chunks {
    ChapterChunker::new(chunk_size).chunks(text)
}
