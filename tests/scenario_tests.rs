//! Concrete chunking scenarios.
//!
//! Each test pins the exact output for a small, hand-checked document.

use cleave::{chunk, ChapterChunker, ChunkSize, LengthMetric};

fn texts(text: &str, size: usize) -> Vec<String> {
    chunk(text, size).map(|c| c.text).collect()
}

// =============================================================================
// Threshold
// =============================================================================

#[test]
fn three_short_sentences() {
    assert_eq!(texts("AAA。BBB！CCC？", 5), vec!["AAA。BBB！", "CCC？"]);
}

#[test]
fn default_size_keeps_short_document_whole() {
    let text = "天亮了。".repeat(100); // 400 chars
    let chunks = ChapterChunker::default().chunk(&text);
    assert_eq!(chunks.len(), 1);
    assert_eq!(chunks[0].char_count(), 400);
}

#[test]
fn default_size_splits_long_document() {
    let text = "天亮了。".repeat(600); // 2400 chars
    let chunks = ChapterChunker::default().chunk(&text);
    // 250 sentences fill the buffer to exactly 1000; the 251st closes it.
    assert_eq!(chunks.len(), 3);
    assert_eq!(chunks[0].char_count(), 1004);
    assert_eq!(chunks[1].char_count(), 1004);
    assert_eq!(chunks[2].char_count(), 392);
}

#[test]
fn sentence_crossing_threshold_stays_whole() {
    // Buffer holds 8 chars; the next sentence pushes it past 10 and is kept entire.
    let chunks = texts("一二三四五六七。八九十壹贰。", 10);
    assert_eq!(chunks, vec!["一二三四五六七。八九十壹贰。"]);
}

#[test]
fn grapheme_metric_counts_clusters() {
    // Each "é" is two chars but one grapheme.
    let sentence = "e\u{301}".repeat(3);
    let text = format!("{sentence}。{sentence}。");
    let by_chars = ChapterChunker::new(6).chunk(&text);
    let by_graphemes = ChapterChunker::with_size(
        ChunkSize::new(6).unwrap().with_metric(LengthMetric::Graphemes),
    )
    .chunk(&text);

    assert_eq!(by_chars.len(), 2);
    assert_eq!(by_graphemes.len(), 1);
}

// =============================================================================
// Oversized sentences
// =============================================================================

#[test]
fn oversized_sentence_is_one_chunk() {
    let sentence = "字".repeat(2000);
    let chunks = ChapterChunker::new(1000).chunk(&sentence);
    assert_eq!(chunks.len(), 1);
    assert_eq!(chunks[0].char_count(), 2000);
    assert_eq!(chunks[0].text, sentence);
}

#[test]
fn oversized_sentence_flushes_buffer_first() {
    let long = "长".repeat(12);
    let text = format!("短句。{long}！后记。");
    assert_eq!(
        texts(&text, 10),
        vec!["短句。".to_string(), format!("{long}！"), "后记。".to_string()]
    );
}

// =============================================================================
// Chapters
// =============================================================================

#[test]
fn chapter_heading_opens_fresh_chunk() {
    let text = "前言很短。第1章 Intro text that is very long indeed。";
    let chunks = ChapterChunker::new(10).chunk(text);

    assert_eq!(chunks[0].text, "前言很短。");
    assert!(chunks[1].text.starts_with("第1章"));
    assert_eq!(chunks[1].chapter.as_deref(), Some("第1章"));
    assert!(chunks
        .iter()
        .skip(2)
        .all(|c| c.chapter.as_deref() == Some("第1章")));
}

#[test]
fn chapters_never_share_a_chunk() {
    let text = "第一章 春。\n\n第二章 夏。\n\n第三章 秋。";
    assert_eq!(
        texts(text, 1000),
        vec!["第一章 春。", "第二章 夏。", "第三章 秋。"]
    );
}

#[test]
fn chapter_labels_follow_chunks() {
    let text = "第1章 一。二。第2章 三。";
    let chunks = ChapterChunker::new(3).chunk(text);
    let labels: Vec<_> = chunks.iter().map(|c| c.chapter.as_deref()).collect();
    assert_eq!(labels, vec![Some("第1章"), Some("第1章"), Some("第2章")]);
    assert_eq!(chunks[0].text, "第1章 一。");
    assert_eq!(chunks[1].text, "二。");
    assert_eq!(chunks[2].text, "第2章 三。");
}

#[test]
fn heading_glued_to_text_gets_a_space() {
    assert_eq!(texts("第3章雨夜。", 100), vec!["第3章 雨夜。"]);
}

#[test]
fn heading_inside_sentence_still_splits() {
    assert_eq!(
        texts("他翻到第3章继续读。", 100),
        vec!["他翻到", "第3章 继续读。"]
    );
}

// =============================================================================
// Whitespace
// =============================================================================

#[test]
fn whitespace_is_collapsed() {
    let text = "\u{3000}\u{3000}天亮了。\n\n\t你醒了吗？  ";
    assert_eq!(texts(text, 100), vec!["天亮了。 你醒了吗？"]);
}

#[test]
fn empty_document() {
    assert!(texts("", 1).is_empty());
    assert!(texts("\n\n", 1000).is_empty());
}
