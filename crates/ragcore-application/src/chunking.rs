//! Overlapping character-window chunking (§4.3).
//!
//! Given raw text, produces an ordered, 1-based, dense list of
//! `(chunk_text, order)` pairs parameterized by `chunk_size` (characters)
//! and `overlap_size` (characters shared with the previous chunk).

use ragcore_domain::error::{Error, Result};

/// Options controlling how a passage is split into chunks.
#[derive(Debug, Clone, Copy)]
pub struct ChunkingOptions {
    /// Maximum size of a single chunk, in characters.
    pub chunk_size: usize,
    /// Characters of overlap shared with the previous chunk.
    pub overlap_size: usize,
}

impl ChunkingOptions {
    /// Build options, validating that overlap does not consume the whole
    /// chunk (which would make no forward progress).
    pub fn new(chunk_size: usize, overlap_size: usize) -> Result<Self> {
        if chunk_size == 0 {
            return Err(Error::validation("chunk_size must be greater than zero"));
        }
        if overlap_size >= chunk_size {
            return Err(Error::validation(
                "overlap_size must be smaller than chunk_size",
            ));
        }
        Ok(Self {
            chunk_size,
            overlap_size,
        })
    }
}

/// One fragment produced by [`chunk_text`], still 1-based ordered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    /// The fragment's text.
    pub text: String,
    /// 1-based order within the source passage.
    pub order: i32,
}

/// Split `text` into overlapping chunks. Splitting operates on Unicode
/// scalar values (`chars()`), not bytes, so multi-byte text is never cut
/// mid-codepoint. An empty passage yields zero chunks.
#[must_use]
pub fn chunk_text(text: &str, options: ChunkingOptions) -> Vec<Chunk> {
    let chars: Vec<char> = text.chars().collect();
    if chars.is_empty() {
        return Vec::new();
    }

    let step = options.chunk_size - options.overlap_size;
    let mut chunks = Vec::new();
    let mut start = 0usize;
    let mut order = 1i32;

    while start < chars.len() {
        let end = (start + options.chunk_size).min(chars.len());
        let text: String = chars[start..end].iter().collect();
        chunks.push(Chunk { text, order });
        order += 1;
        if end == chars.len() {
            break;
        }
        start += step;
    }

    chunks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dense_one_based_order_matches_input_order() {
        let opts = ChunkingOptions::new(4, 1).unwrap();
        let chunks = chunk_text("abcdefghij", opts);
        let orders: Vec<i32> = chunks.iter().map(|c| c.order).collect();
        assert_eq!(orders, (1..=orders.len() as i32).collect::<Vec<_>>());
    }

    #[test]
    fn overlap_is_shared_with_previous_chunk() {
        let opts = ChunkingOptions::new(5, 2).unwrap();
        let chunks = chunk_text("abcdefghij", opts);
        assert_eq!(chunks[0].text, "abcde");
        assert_eq!(chunks[1].text, "defgh");
        assert_eq!(chunks[2].text, "ghij");
    }

    #[test]
    fn scenario_three_from_spec() {
        let opts = ChunkingOptions::new(1000, 200).unwrap();
        let text_500 = "a".repeat(500);
        let text_1500 = "b".repeat(1500);
        let text_2500 = "c".repeat(2500);
        assert_eq!(chunk_text(&text_500, opts).len(), 1);
        assert_eq!(chunk_text(&text_1500, opts).len(), 2);
        assert_eq!(chunk_text(&text_2500, opts).len(), 3);
    }

    #[test]
    fn empty_text_yields_no_chunks() {
        let opts = ChunkingOptions::new(10, 2).unwrap();
        assert!(chunk_text("", opts).is_empty());
    }

    #[test]
    fn rejects_overlap_not_smaller_than_chunk_size() {
        assert!(ChunkingOptions::new(10, 10).is_err());
        assert!(ChunkingOptions::new(10, 11).is_err());
    }

    #[test]
    fn operates_on_chars_not_bytes() {
        let opts = ChunkingOptions::new(3, 1).unwrap();
        let chunks = chunk_text("héllo wörld", opts);
        for chunk in &chunks {
            assert!(chunk.text.chars().count() <= 3);
        }
    }
}
