//! Sentence splitting on CJK terminators.
//!
//! Sentences end at one of three full-width marks:
//!
//! | Mark | Name |
//! |------|------|
//! | `。` | full stop |
//! | `！` | exclamation mark |
//! | `？` | question mark |
//!
//! ASCII `.`, `!` and `?` are deliberately not terminators. In mixed text
//! they show up in version numbers, URLs and abbreviations far more often
//! than at the end of a Chinese sentence.
//!
//! ## Tokens
//!
//! Each sentence becomes a [`Token`]: the text run plus the mark that closed
//! it. The last run of a segment may have no mark at all.
//!
//! ```text
//! "天亮了。你醒了吗？还没"
//!
//! Token { text: "天亮了", terminator: Some(FullStop) }
//! Token { text: "你醒了吗", terminator: Some(Question) }
//! Token { text: "还没", terminator: None }
//! ```
//!
//! Repeated marks ("真的？！") produce a token with a blank run, a *bare
//! terminator*, which the accumulator appends to whatever precedes it.

/// A sentence-ending mark.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Terminator {
    /// `。`
    FullStop,
    /// `！`
    Exclamation,
    /// `？`
    Question,
}

impl Terminator {
    /// Recognize a terminator character.
    #[must_use]
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            '。' => Some(Self::FullStop),
            '！' => Some(Self::Exclamation),
            '？' => Some(Self::Question),
            _ => None,
        }
    }

    /// The character this terminator is written as.
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            Self::FullStop => '。',
            Self::Exclamation => '！',
            Self::Question => '？',
        }
    }
}

/// A text run and the terminator that closed it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    /// The run, exactly as it appears in the source (surrounding whitespace included).
    pub text: &'a str,
    /// The closing mark, or `None` for a trailing unterminated run.
    pub terminator: Option<Terminator>,
}

impl Token<'_> {
    /// A terminator with no text in front of it.
    #[must_use]
    pub fn is_bare_terminator(&self) -> bool {
        self.terminator.is_some() && self.text.trim().is_empty()
    }
}

/// Lazy iterator over the [`Token`]s of a text. Created by [`split_sentences`].
#[derive(Debug, Clone)]
pub struct Sentences<'a> {
    rest: &'a str,
}

impl<'a> Sentences<'a> {
    /// The part of the text not yet split.
    #[must_use]
    pub fn remainder(&self) -> &'a str {
        self.rest
    }
}

impl<'a> Iterator for Sentences<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let rest = self.rest;
        let found = rest
            .char_indices()
            .find_map(|(i, c)| Terminator::from_char(c).map(|t| (i, c.len_utf8(), t)));

        match found {
            Some((at, width, terminator)) => {
                self.rest = &rest[at + width..];
                Some(Token {
                    text: &rest[..at],
                    terminator: Some(terminator),
                })
            }
            None => {
                self.rest = "";
                // A blank tail carries nothing.
                (!rest.trim().is_empty()).then_some(Token {
                    text: rest,
                    terminator: None,
                })
            }
        }
    }
}

impl std::iter::FusedIterator for Sentences<'_> {}

/// Split `text` into sentence tokens.
///
/// ```rust
/// use cleave::{split_sentences, Terminator};
///
/// let tokens: Vec<_> = split_sentences("你好！再见").collect();
/// assert_eq!(tokens.len(), 2);
/// assert_eq!(tokens[0].text, "你好");
/// assert_eq!(tokens[0].terminator, Some(Terminator::Exclamation));
/// assert_eq!(tokens[1].terminator, None);
/// ```
#[must_use]
pub fn split_sentences(text: &str) -> Sentences<'_> {
    Sentences { rest: text }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(text: &str) -> Vec<(&str, Option<char>)> {
        split_sentences(text)
            .map(|t| (t.text, t.terminator.map(Terminator::as_char)))
            .collect()
    }

    #[test]
    fn test_basic_sentences() {
        assert_eq!(
            texts("天亮了。你醒了吗？快起来！"),
            vec![
                ("天亮了", Some('。')),
                ("你醒了吗", Some('？')),
                ("快起来", Some('！')),
            ]
        );
    }

    #[test]
    fn test_trailing_run_without_terminator() {
        assert_eq!(texts("一。二"), vec![("一", Some('。')), ("二", None)]);
    }

    #[test]
    fn test_blank_tail_dropped() {
        assert_eq!(texts("一。 "), vec![("一", Some('。'))]);
    }

    #[test]
    fn test_repeated_marks_are_bare() {
        let tokens: Vec<_> = split_sentences("真的？！").collect();
        assert_eq!(tokens.len(), 2);
        assert!(!tokens[0].is_bare_terminator());
        assert!(tokens[1].is_bare_terminator());
    }

    #[test]
    fn test_leading_mark_is_bare() {
        let tokens: Vec<_> = split_sentences("。后面").collect();
        assert!(tokens[0].is_bare_terminator());
        assert_eq!(tokens[1].text, "后面");
    }

    #[test]
    fn test_ascii_punctuation_ignored() {
        assert_eq!(texts("v1.2 works! ok?"), vec![("v1.2 works! ok?", None)]);
    }

    #[test]
    fn test_whitespace_kept_in_runs() {
        assert_eq!(texts("一。 二。"), vec![("一", Some('。')), (" 二", Some('。'))]);
    }

    #[test]
    fn test_remainder_tracks_progress() {
        let mut sentences = split_sentences("一。二。");
        sentences.next();
        assert_eq!(sentences.remainder(), "二。");
        sentences.next();
        assert_eq!(sentences.remainder(), "");
        assert!(sentences.next().is_none());
    }

    #[test]
    fn test_empty_text() {
        assert_eq!(split_sentences("").count(), 0);
        assert_eq!(split_sentences("   ").count(), 0);
    }
}
