// UTF-8 safety tests: multibyte character handling
//
// Chunk boundaries must always fall on character boundaries, and the
// chunks of a document must cover all of its text.

use gdocs_index::core::indexer::Chunker;
use gdocs_index::core::types::TextDocument;
use std::collections::BTreeMap;

fn chunk_all(text: &str, size: usize, overlap: usize) -> Vec<gdocs_index::Chunk> {
    Chunker::new(size, overlap)
        .unwrap()
        .chunk_document(&TextDocument::new(text, BTreeMap::new()))
}

fn assert_boundaries(text: &str, size: usize, overlap: usize) {
    let chunks = chunk_all(text, size, overlap);
    assert!(!chunks.is_empty());
    for chunk in &chunks {
        assert!(text.is_char_boundary(chunk.start_offset));
        assert!(text.is_char_boundary(chunk.end_offset));
        assert_eq!(&text[chunk.start_offset..chunk.end_offset], chunk.text);
        assert!(chunk.text.chars().count() <= size);
    }
    assert_eq!(chunks.first().unwrap().start_offset, 0);
    assert_eq!(chunks.last().unwrap().end_offset, text.len());
}

#[test]
fn test_chunk_chinese_text() {
    assert_boundaries("中文注释，测试你好世界。这是一个较长的段落。", 5, 1);
}

#[test]
fn test_chunk_arabic_and_hebrew_text() {
    assert_boundaries("مرحبا بالعالم שלום עולם", 4, 2);
}

#[test]
fn test_chunk_cyrillic_text() {
    assert_boundaries("Привет мир, это русский текст", 7, 3);
}

#[test]
fn test_chunk_emoji_sequences() {
    assert_boundaries("🚀🎉👍🏽 family: 👨‍👩‍👧 flags 🇯🇵🇫🇷", 3, 1);
}

#[test]
fn test_multibyte_at_chunk_boundary() {
    let mut content = String::new();
    for i in 0..50 {
        content.push_str(&format!("line {i} 日本語テキスト émoji 🦀\n"));
    }
    assert_boundaries(&content, 16, 4);
}

#[test]
fn test_chunk_counts_characters_not_bytes() {
    // 12 characters, 36 bytes
    let chunks = chunk_all("日本語日本語日本語日本語", 6, 0);
    assert_eq!(chunks.len(), 2);
    assert_eq!(chunks[0].text, "日本語日本語");
    assert_eq!(chunks[1].start_offset, 18);
}
