//! Whitespace normalization.
//!
//! Source documents arrive with hard line wraps, indentation, blank lines
//! between paragraphs and the occasional tab. None of it carries meaning for
//! chunking, so every run of whitespace becomes a single space:
//!
//! ```text
//! "  第一章\n\n　　天色已晚。\t他走了。  "
//!          ↓
//! "第一章 天色已晚。 他走了。"
//! ```
//!
//! "Whitespace" is the Unicode `White_Space` property, which includes the
//! ideographic space (U+3000) used for paragraph indentation in CJK text,
//! plus the information separators U+001C..=U+001F that some exported
//! documents use as record and unit breaks.

/// Collapse every whitespace run to one space and trim both ends.
///
/// Total and idempotent: whitespace-only input yields an empty string, and
/// normalizing twice changes nothing.
///
/// ```rust
/// use cleave::normalize;
///
/// assert_eq!(normalize(" a \n\n b\tc "), "a b c");
/// assert_eq!(normalize("\u{3000}\u{3000}"), "");
/// ```
#[must_use]
pub fn normalize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for word in text.split(is_space).filter(|w| !w.is_empty()) {
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(word);
    }
    out
}

fn is_space(c: char) -> bool {
    c.is_whitespace() || ('\u{1c}'..='\u{1f}').contains(&c)
}
