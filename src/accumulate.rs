//! Chunk accumulation.
//!
//! The last pipeline stage is a small state machine over one buffer. Tokens
//! arrive in document order; the buffer grows until it reaches the threshold
//! and is then emitted as a chunk.
//!
//! ## Policy
//!
//! For each token, in order:
//!
//! 1. **Bare terminator**: append it. Emit if the threshold is now reached.
//! 2. **Oversized sentence** (the run alone reaches the threshold): emit the
//!    buffer, then emit the sentence with its terminator as a chunk of its
//!    own. Sentences are never cut.
//! 3. **Buffer + run reaches the threshold**:
//!    - with a terminator: append both, emit.
//!    - without one: emit the buffer, and the run starts the next buffer.
//! 4. **Otherwise**: append the run and its terminator.
//!
//! A chapter heading always flushes the buffer first and then seeds the new
//! buffer with itself, so a heading only ever appears at the start of a chunk:
//!
//! ```text
//! chunk_size = 6
//!
//! "序言很短。第1章 天亮了。你醒了吗？"
//!
//! ["序言很短。", "第1章 天亮了。", "你醒了吗？"]
//!    ↑ flushed short, a heading follows
//! ```
//!
//! Whatever remains at the end of the document is the final chunk, whatever
//! its size.
//!
//! ## Laziness
//!
//! [`Chunks`] pulls one segment or one token per step, so a consumer that
//! stops early (for example at the first failed submission) never pays for
//! the rest of the document.

use std::collections::VecDeque;
use std::iter::FusedIterator;
use std::ops::Range;

use tracing::{debug, trace};

use crate::chapter::next_segment;
use crate::{normalize, split_sentences, Chunk, ChunkSize, Token};

/// The stateful reducer behind [`Chunks`].
#[derive(Debug)]
struct Accumulator {
    size: ChunkSize,
    buffer: String,
    buffer_len: usize,
    chapter: Option<String>,
    ready: VecDeque<Chunk>,
    emitted: usize,
}

impl Accumulator {
    fn new(size: ChunkSize) -> Self {
        Self {
            size,
            buffer: String::new(),
            buffer_len: 0,
            chapter: None,
            ready: VecDeque::new(),
            emitted: 0,
        }
    }

    fn append(&mut self, text: &str) {
        self.buffer.push_str(text);
        self.buffer_len += self.size.measure(text);
    }

    fn append_terminator(&mut self, token: &Token<'_>) {
        if let Some(terminator) = token.terminator {
            self.buffer.push(terminator.as_char());
            self.buffer_len += 1;
        }
    }

    fn emit(&mut self, text: &str) {
        let chunk = Chunk::new(text, self.emitted, self.chapter.clone());
        trace!(index = chunk.index, chars = chunk.char_count(), "chunk ready");
        self.emitted += 1;
        self.ready.push_back(chunk);
    }

    /// Emit the buffer if it holds anything but whitespace, then clear it.
    fn flush(&mut self) {
        let buffer = std::mem::take(&mut self.buffer);
        let text = buffer.trim();
        if !text.is_empty() {
            self.emit(text);
        }
        self.buffer = buffer;
        self.buffer.clear();
        self.buffer_len = 0;
    }

    fn begin_chapter(&mut self, heading: &str, has_body: bool) {
        self.flush();
        debug!(heading, "chapter boundary");
        self.chapter = Some(heading.to_owned());
        self.append(heading);
        if has_body {
            self.append(" ");
        }
    }

    fn push(&mut self, token: Token<'_>) {
        if token.is_bare_terminator() {
            self.append_terminator(&token);
            if self.size.is_reached(self.buffer_len) {
                self.flush();
            }
            return;
        }

        let sentence = token.text.trim();
        if self.size.is_reached(self.size.measure(sentence)) {
            self.flush();
            let mut text = sentence.to_owned();
            if let Some(terminator) = token.terminator {
                text.push(terminator.as_char());
            }
            debug!(chars = self.size.measure(&text), "oversized sentence emitted whole");
            self.emit(&text);
            return;
        }

        let run = if self.buffer.is_empty() {
            token.text.trim_start()
        } else {
            token.text
        };

        if self.size.is_reached(self.buffer_len + self.size.measure(run)) {
            if token.terminator.is_some() {
                self.append(run);
                self.append_terminator(&token);
                self.flush();
            } else {
                self.flush();
                self.append(run.trim_start());
            }
        } else {
            self.append(run);
            self.append_terminator(&token);
        }
    }
}

/// Lazy sequence of chunks over one document.
///
/// Created by [`chunk`](crate::chunk) or [`ChapterChunker::chunks`]. Owns the
/// normalized text; each call to `next` does only as much work as needed to
/// produce one more chunk. Not restartable: chunk the text again to re-traverse.
#[derive(Debug)]
pub struct Chunks {
    text: String,
    cursor: usize,
    body: Range<usize>,
    acc: Accumulator,
    done: bool,
}

impl Chunks {
    pub(crate) fn new(text: &str, size: ChunkSize) -> Self {
        Self {
            text: normalize(text),
            cursor: 0,
            body: 0..0,
            acc: Accumulator::new(size),
            done: false,
        }
    }

    /// The normalized text being chunked.
    #[must_use]
    pub fn normalized(&self) -> &str {
        &self.text
    }

    /// Feed the accumulator one token, or open the next segment, or finish.
    fn step(&mut self) {
        let text = self.text.as_str();

        if !self.body.is_empty() {
            let body = &text[self.body.clone()];
            let mut sentences = split_sentences(body);
            match sentences.next() {
                Some(token) => {
                    self.body.start = self.body.end - sentences.remainder().len();
                    self.acc.push(token);
                }
                None => self.body.start = self.body.end,
            }
            return;
        }

        match next_segment(text, self.cursor) {
            Some((segment, end)) => {
                self.cursor = end;
                self.body = segment.offset..segment.offset + segment.body.len();
                if let Some(heading) = segment.heading {
                    self.acc.begin_chapter(heading, !segment.body.is_empty());
                }
            }
            None => {
                self.acc.flush();
                self.done = true;
            }
        }
    }
}

impl Iterator for Chunks {
    type Item = Chunk;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(chunk) = self.acc.ready.pop_front() {
                return Some(chunk);
            }
            if self.done {
                return None;
            }
            self.step();
        }
    }
}

impl FusedIterator for Chunks {}

/// Sentence-aligned, chapter-aware chunker.
///
/// ## Example
///
/// ```rust
/// use cleave::ChapterChunker;
///
/// let chunker = ChapterChunker::new(5);
/// let chunks = chunker.chunk("AAA。BBB！CCC？");
///
/// assert_eq!(chunks.len(), 2);
/// assert_eq!(chunks[0].text, "AAA。BBB！");
/// assert_eq!(chunks[1].text, "CCC？");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ChapterChunker {
    size: ChunkSize,
}

impl ChapterChunker {
    /// Create a chunker that emits once `chunk_size` chars have accumulated.
    ///
    /// # Panics
    ///
    /// Panics if `chunk_size == 0`. Use [`ChunkSize::new`] with
    /// [`ChapterChunker::with_size`] to validate untrusted input instead.
    #[must_use]
    pub fn new(chunk_size: usize) -> Self {
        assert!(chunk_size > 0, "chunk_size must be > 0");
        Self::with_size(ChunkSize::new(chunk_size).unwrap_or_default())
    }

    /// Create a chunker from a validated size.
    #[must_use]
    pub const fn with_size(size: ChunkSize) -> Self {
        Self { size }
    }

    /// The configured threshold.
    #[must_use]
    pub const fn size(&self) -> ChunkSize {
        self.size
    }

    /// Lazily chunk `text`.
    #[must_use]
    pub fn chunks(&self, text: &str) -> Chunks {
        Chunks::new(text, self.size)
    }

    /// Chunk `text` eagerly.
    #[must_use]
    pub fn chunk(&self, text: &str) -> Vec<Chunk> {
        self.chunks(text).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(chunk_size: usize, text: &str) -> Vec<String> {
        ChapterChunker::new(chunk_size)
            .chunks(text)
            .map(|c| c.text)
            .collect()
    }

    #[test]
    fn test_two_sentences_then_remainder() {
        assert_eq!(texts(5, "AAA。BBB！CCC？"), vec!["AAA。BBB！", "CCC？"]);
    }

    #[test]
    fn test_small_text_single_chunk() {
        assert_eq!(texts(100, "一句话。"), vec!["一句话。"]);
    }

    #[test]
    fn test_empty_text() {
        assert!(texts(10, "").is_empty());
        assert!(texts(10, " \n\t ").is_empty());
    }

    #[test]
    fn test_oversized_sentence_is_whole() {
        let long = "长".repeat(20);
        let text = format!("短。{long}。尾。");
        assert_eq!(
            texts(10, &text),
            vec!["短。".to_string(), format!("{long}。"), "尾。".to_string()]
        );
    }

    #[test]
    fn test_chapter_flushes_short_buffer() {
        let chunks = ChapterChunker::new(6).chunk("序言很短。第1章 天亮了。你醒了吗？");
        let got: Vec<_> = chunks.iter().map(|c| c.text.as_str()).collect();
        assert_eq!(got, vec!["序言很短。", "第1章 天亮了。", "你醒了吗？"]);
        assert_eq!(chunks[0].chapter, None);
        assert_eq!(chunks[1].chapter.as_deref(), Some("第1章"));
        assert!(chunks[1].starts_chapter());
        assert_eq!(chunks[2].chapter.as_deref(), Some("第1章"));
    }

    #[test]
    fn test_heading_without_body_stands_alone() {
        assert_eq!(texts(100, "第1章第2章 正文。"), vec!["第1章", "第2章 正文。"]);
    }

    #[test]
    fn test_unterminated_run_defers_to_next_chunk() {
        // "BBBB" has no terminator, so it starts a new buffer instead of closing this one.
        assert_eq!(texts(5, "AA。BBBB"), vec!["AA。", "BBBB"]);
    }

    #[test]
    fn test_bare_terminators_kept() {
        assert_eq!(texts(100, "真的？！是的。"), vec!["真的？！是的。"]);
        assert_eq!(texts(3, "真的？！好。"), vec!["真的？！", "好。"]);
    }

    #[test]
    fn test_whitespace_between_sentences_kept() {
        assert_eq!(texts(100, "One。 Two。\n\nThree。"), vec!["One。 Two。 Three。"]);
    }

    #[test]
    fn test_indices_are_sequential() {
        let chunks = ChapterChunker::new(2).chunk("一二。三四。五六。");
        for (i, chunk) in chunks.iter().enumerate() {
            assert_eq!(chunk.index, i);
        }
        assert_eq!(chunks.len(), 3);
    }

    #[test]
    fn test_laziness_stops_early() {
        let text = "句子。".repeat(10_000);
        let mut chunks = ChapterChunker::new(2).chunks(&text);
        assert_eq!(chunks.next().map(|c| c.text), Some("句子。".to_string()));
        assert_eq!(chunks.next().map(|c| c.text), Some("句子。".to_string()));
    }

    #[test]
    fn test_fused_after_end() {
        let mut chunks = ChapterChunker::new(10).chunks("一。");
        assert!(chunks.next().is_some());
        assert!(chunks.next().is_none());
        assert!(chunks.next().is_none());
    }

    #[test]
    #[should_panic]
    fn test_zero_size_panics() {
        let _ = ChapterChunker::new(0);
    }
}
