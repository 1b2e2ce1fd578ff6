//! Chunk size configuration.
//!
//! ## A Threshold, Not a Ceiling
//!
//! Most chunkers treat their size as an upper bound. Here it is a lower one:
//! sentences accumulate until the buffer *reaches* the threshold, and the
//! sentence that crosses it finishes the chunk.
//!
//! ```text
//! chunk_size = 5
//!
//! "AAA。"        4 chars, keep going
//! "AAA。BBB！"   8 chars, threshold reached: emit
//! "CCC？"        end of document: emit whatever is left
//! ```
//!
//! Nothing is ever split mid-sentence, so chunks routinely overshoot the
//! threshold by up to one sentence.
//!
//! ## Measuring Length
//!
//! Length is counted in Unicode scalar values by default, which is what a
//! reader means by "characters" for CJK prose. [`LengthMetric::Graphemes`]
//! counts user-perceived characters instead (UAX #29), which matters for text
//! with combining marks or emoji sequences.

use std::num::NonZeroUsize;

use unicode_segmentation::UnicodeSegmentation;

use crate::{Error, Result};

/// How the length of a chunk is measured.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum LengthMetric {
    /// Unicode scalar values (`char`s).
    #[default]
    Chars,
    /// Extended grapheme clusters.
    Graphemes,
}

impl LengthMetric {
    /// Measure `text` in this unit.
    #[must_use]
    pub fn measure(self, text: &str) -> usize {
        match self {
            Self::Chars => text.chars().count(),
            Self::Graphemes => text.graphemes(true).count(),
        }
    }
}

/// The accumulation threshold for a chunk.
///
/// # Examples
///
/// ```rust
/// use cleave::{ChunkSize, LengthMetric};
///
/// let size = ChunkSize::default();
/// assert_eq!(size.get(), 1000);
///
/// let size = ChunkSize::new(5).unwrap();
/// assert!(!size.is_reached(4));
/// assert!(size.is_reached(5));
///
/// assert!(ChunkSize::new(0).is_err());
///
/// let size = ChunkSize::new(3).unwrap().with_metric(LengthMetric::Graphemes);
/// assert_eq!(size.measure("e\u{301}e\u{301}"), 2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkSize {
    threshold: NonZeroUsize,
    metric: LengthMetric,
}

impl ChunkSize {
    /// Threshold used when none is given.
    pub const DEFAULT: usize = 1000;

    /// Create a threshold measured in chars.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidChunkSize`] if `size == 0`.
    pub fn new(size: usize) -> Result<Self> {
        NonZeroUsize::new(size)
            .map(|threshold| Self {
                threshold,
                metric: LengthMetric::Chars,
            })
            .ok_or(Error::InvalidChunkSize(size))
    }

    /// Measure length in a different unit.
    #[must_use]
    pub const fn with_metric(self, metric: LengthMetric) -> Self {
        Self { metric, ..self }
    }

    /// The threshold value.
    #[must_use]
    pub const fn get(&self) -> usize {
        self.threshold.get()
    }

    /// The unit the threshold is counted in.
    #[must_use]
    pub const fn metric(&self) -> LengthMetric {
        self.metric
    }

    /// Length of `text` in this threshold's unit.
    #[must_use]
    pub fn measure(&self, text: &str) -> usize {
        self.metric.measure(text)
    }

    /// Whether a buffer of `len` units has reached the threshold.
    #[must_use]
    pub const fn is_reached(&self, len: usize) -> bool {
        len >= self.threshold.get()
    }
}

impl Default for ChunkSize {
    fn default() -> Self {
        Self {
            threshold: NonZeroUsize::new(Self::DEFAULT).unwrap_or(NonZeroUsize::MIN),
            metric: LengthMetric::Chars,
        }
    }
}

impl TryFrom<usize> for ChunkSize {
    type Error = Error;

    fn try_from(size: usize) -> Result<Self> {
        Self::new(size)
    }
}
