//! Chapter boundary detection.
//!
//! Novels and long-form CJK documents are divided by headings of the form
//! `第…章` ("chapter N"), where N is written either in Arabic digits or in
//! Chinese numerals:
//!
//! ```text
//! 第1章   第12章   第一章   第三百二十一章
//! ```
//!
//! A chunk should never straddle two chapters, so the text is cut into
//! segments at every heading before sentences are considered:
//!
//! ```text
//! "序言。第1章 开始。第2章 结束。"
//!
//! Segment { heading: None,          body: "序言。" }
//! Segment { heading: Some("第1章"), body: "开始。" }
//! Segment { heading: Some("第2章"), body: "结束。" }
//! ```
//!
//! Headings are found anywhere in the text, not only at line starts:
//! normalization has already folded the line structure away.

use std::sync::OnceLock;

use regex::Regex;

static HEADING: OnceLock<Regex> = OnceLock::new();

fn heading_regex() -> &'static Regex {
    HEADING.get_or_init(|| {
        Regex::new(r"第[一二三四五六七八九十百千万\d]+章").expect("chapter heading pattern is valid")
    })
}

/// The chapter heading `text` starts with, if any.
///
/// ```rust
/// use cleave::heading_at_start;
///
/// assert_eq!(heading_at_start("第十二章 雨夜"), Some("第十二章"));
/// assert_eq!(heading_at_start("见第1章"), None);
/// ```
#[must_use]
pub fn heading_at_start(text: &str) -> Option<&str> {
    heading_regex()
        .find(text)
        .filter(|m| m.start() == 0)
        .map(|m| m.as_str())
}

/// Whether `text`, ignoring surrounding whitespace, opens with a chapter heading.
#[must_use]
pub fn is_chapter_heading(text: &str) -> bool {
    heading_at_start(text.trim()).is_some()
}

/// A chapter-delimited run of text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment<'a> {
    /// The heading this segment opens with; `None` for text before the first heading.
    pub heading: Option<&'a str>,
    /// Everything after the heading, trimmed of leading whitespace.
    pub body: &'a str,
    /// Byte offset of `body` in the scanned text.
    pub offset: usize,
}

impl<'a> Segment<'a> {
    /// Classify a raw slice found at `start` in the scanned text.
    ///
    /// Returns `None` for blank slices. A slice that was cut at a heading
    /// match is re-checked after trimming; if that check fails the slice is
    /// treated as plain content.
    fn classify(raw: &'a str, start: usize) -> Option<Self> {
        if raw.trim().is_empty() {
            return None;
        }

        let leading = raw.len() - raw.trim_start().len();
        let trimmed = raw.trim();
        match heading_at_start(trimmed) {
            Some(heading) => {
                let rest = &trimmed[heading.len()..];
                let body = rest.trim_start();
                Some(Self {
                    heading: Some(heading),
                    body,
                    offset: start + leading + heading.len() + (rest.len() - body.len()),
                })
            }
            None => Some(Self {
                heading: None,
                body: raw,
                offset: start,
            }),
        }
    }

    /// Whether this segment opens a chapter.
    #[must_use]
    pub fn is_chapter(&self) -> bool {
        self.heading.is_some()
    }
}

/// Find the next non-blank segment at or after byte offset `start`.
///
/// Returns the segment and the byte offset where it ends.
pub(crate) fn next_segment(text: &str, mut start: usize) -> Option<(Segment<'_>, usize)> {
    let re = heading_regex();
    while start < text.len() {
        // A heading at `start` belongs to this segment; the boundary is the next one.
        let scan_from = re
            .find_at(text, start)
            .filter(|m| m.start() == start)
            .map_or(start, |m| m.end());
        let end = re.find_at(text, scan_from).map_or(text.len(), |m| m.start());

        let raw = &text[start..end];
        let at = start;
        start = end;
        if let Some(segment) = Segment::classify(raw, at) {
            return Some((segment, end));
        }
    }
    None
}

/// Lazy iterator over the [`Segment`]s of a text. Created by [`segments`].
#[derive(Debug, Clone)]
pub struct Segments<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> Iterator for Segments<'a> {
    type Item = Segment<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let (segment, end) = next_segment(self.text, self.pos)?;
        self.pos = end;
        Some(segment)
    }
}

impl std::iter::FusedIterator for Segments<'_> {}

/// Split `text` into chapter segments.
///
/// Each heading occurrence starts a new segment. Blank segments are skipped,
/// so text that opens with a heading yields no headingless segment.
///
/// ```rust
/// use cleave::segments;
///
/// let parts: Vec<_> = segments("前言。第1章 正文。").collect();
/// assert_eq!(parts.len(), 2);
/// assert_eq!(parts[0].heading, None);
/// assert_eq!(parts[1].heading, Some("第1章"));
/// assert_eq!(parts[1].body, "正文。");
/// ```
#[must_use]
pub fn segments(text: &str) -> Segments<'_> {
    Segments { text, pos: 0 }
}
