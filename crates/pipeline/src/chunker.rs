//! Word-boundary text chunking for the synthesis endpoint
//!
//! The remote endpoint has a safe request-size limit (around 200 characters),
//! so longer translations are split into ordered chunks that never break a
//! word. Lengths are counted in chars, not bytes: Thai text is multi-byte
//! UTF-8 and the endpoint limit is a character limit.

use std::ops::Range;

use thai_echo_core::TextChunk;

/// Split `text` into ordered chunks of at most `max_chars` characters,
/// greedily accumulating whitespace-delimited words.
///
/// Text that already fits is returned as a single chunk, unchanged. A single
/// word longer than `max_chars` is placed alone in its own chunk rather than
/// split mid-word; that chunk may exceed the limit, which the endpoint
/// tolerates. Empty input yields no chunks.
pub fn chunk(text: &str, max_chars: usize) -> Vec<String> {
    if text.is_empty() {
        return Vec::new();
    }
    if text.chars().count() <= max_chars {
        return vec![text.to_string()];
    }

    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_chars = 0usize;

    for word in text.split_whitespace() {
        let word_chars = word.chars().count();

        if !current.is_empty() && current_chars + 1 + word_chars > max_chars {
            chunks.push(std::mem::take(&mut current));
            current_chars = 0;
        }

        if current.is_empty() {
            current.push_str(word);
            current_chars = word_chars;
        } else {
            current.push(' ');
            current.push_str(word);
            current_chars += 1 + word_chars;
        }
    }

    if !current.is_empty() {
        chunks.push(current);
    }

    chunks
}

/// Word-index ranges covered by each chunk, computed from the chunk texts.
///
/// Ranges are contiguous, non-overlapping, start at 0, and together cover
/// every token of the chunked text.
pub fn word_ranges(chunks: &[String]) -> Vec<Range<usize>> {
    let mut start = 0usize;
    chunks
        .iter()
        .map(|chunk| {
            let count = chunk.split_whitespace().count();
            let range = start..start + count;
            start += count;
            range
        })
        .collect()
}

/// Chunk `text` and pair each chunk with its word-index range.
pub fn chunk_with_ranges(text: &str, max_chars: usize) -> Vec<TextChunk> {
    let chunks = chunk(text, max_chars);
    let ranges = word_ranges(&chunks);
    chunks
        .into_iter()
        .zip(ranges)
        .map(|(text, words)| TextChunk { text, words })
        .collect()
}
