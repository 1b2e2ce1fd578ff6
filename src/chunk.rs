//! The Chunk type: one unit of text handed to an ingestion sink.

/// A chunk of sentence-aligned text.
///
/// Chunks have no identity beyond their position in the output sequence and
/// their text. The chapter is carried along so a sink can label what it
/// stores without re-scanning the text.
///
/// ```rust
/// use cleave::Chunk;
///
/// let chunk = Chunk::new("第1章 开始。", 0, Some("第1章".to_string()));
/// assert_eq!(chunk.char_count(), 7);
/// assert!(chunk.starts_chapter());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    /// The chunk text, trimmed.
    pub text: String,
    /// Zero-based index of this chunk in the sequence.
    pub index: usize,
    /// Heading of the chapter this chunk was accumulated in.
    pub chapter: Option<String>,
}

impl Chunk {
    /// Create a new chunk.
    #[must_use]
    pub fn new(text: impl Into<String>, index: usize, chapter: Option<String>) -> Self {
        Self {
            text: text.into(),
            index,
            chapter,
        }
    }

    /// The length of this chunk in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Whether this chunk is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// The length of this chunk in chars.
    #[must_use]
    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }

    /// Whether this chunk opens with its chapter's heading.
    #[must_use]
    pub fn starts_chapter(&self) -> bool {
        self.chapter
            .as_deref()
            .is_some_and(|heading| self.text.starts_with(heading))
    }

    /// 1-based position, as used for sink sequence numbers.
    #[must_use]
    pub const fn sequence(&self) -> usize {
        self.index + 1
    }
}

impl std::fmt::Display for Chunk {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Chunk {{ index: {}, chars: {}", self.index, self.char_count())?;
        if let Some(chapter) = &self.chapter {
            write!(f, ", chapter: {chapter}")?;
        }
        f.write_str(" }")
    }
}
