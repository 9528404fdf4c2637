//! Fixed-size overlapping text splitting.
//!
//! Splits prefer natural boundaries (paragraph breaks first, then single
//! newlines, sentence ends, then word gaps) and only fall back to hard
//! character windows when a run of text carries no boundary at all.
//! Sizes are counted in characters, never bytes, so multi-byte input is
//! never cut mid-code-point.

use std::collections::VecDeque;

/// Boundary hierarchy, coarsest first.
const SEPARATORS: [&str; 4] = ["\n\n", "\n", ". ", " "];

/// Splits text into chunks of at most `chunk_size` characters, carrying
/// roughly `chunk_overlap` characters between consecutive chunks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextSplitter {
    chunk_size: usize,
    chunk_overlap: usize,
}

impl Default for TextSplitter {
    fn default() -> Self {
        Self::new(1000, 200)
    }
}

impl TextSplitter {
    /// Creates a splitter. `chunk_size` is at least 1 and `chunk_overlap`
    /// is clamped strictly below it.
    pub fn new(chunk_size: usize, chunk_overlap: usize) -> Self {
        let chunk_size = chunk_size.max(1);
        Self {
            chunk_size,
            chunk_overlap: chunk_overlap.min(chunk_size - 1),
        }
    }

    /// Target chunk size in characters.
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Characters shared between consecutive chunks.
    pub fn chunk_overlap(&self) -> usize {
        self.chunk_overlap
    }

    /// Splits `text` into overlapping chunks. Empty or whitespace-only
    /// input yields no chunks.
    pub fn split_text(&self, text: &str) -> Vec<String> {
        if text.trim().is_empty() {
            return Vec::new();
        }
        let mut chunks = self.split_level(text, &SEPARATORS);
        chunks.retain(|chunk| !chunk.is_empty());
        chunks
    }

    fn split_level(&self, text: &str, separators: &[&str]) -> Vec<String> {
        if char_len(text) <= self.chunk_size {
            return vec![text.trim().to_string()];
        }
        let Some((separator, finer)) = separators.split_first() else {
            return self.hard_windows(text);
        };
        let pieces = split_after(text, separator);
        if pieces.len() < 2 {
            return self.split_level(text, finer);
        }
        self.merge_pieces(&pieces, finer)
    }

    /// Greedily packs boundary-delimited pieces into chunks, retaining at
    /// most `chunk_overlap` trailing characters of one chunk as the start
    /// of the next. Pieces that alone exceed `chunk_size` are re-split at
    /// finer boundaries.
    fn merge_pieces(&self, pieces: &[&str], finer: &[&str]) -> Vec<String> {
        let mut chunks = Vec::new();
        let mut window: VecDeque<(&str, usize)> = VecDeque::new();
        let mut window_len = 0usize;

        for &piece in pieces {
            let piece_len = char_len(piece);

            if piece_len > self.chunk_size {
                if !window.is_empty() {
                    chunks.push(assemble(&window));
                    window.clear();
                    window_len = 0;
                }
                chunks.extend(self.split_level(piece, finer));
                continue;
            }

            if window_len + piece_len > self.chunk_size && !window.is_empty() {
                chunks.push(assemble(&window));
                while window_len > self.chunk_overlap
                    || (window_len + piece_len > self.chunk_size && !window.is_empty())
                {
                    let Some((_, dropped)) = window.pop_front() else {
                        break;
                    };
                    window_len -= dropped;
                }
            }

            window.push_back((piece, piece_len));
            window_len += piece_len;
        }

        if !window.is_empty() {
            chunks.push(assemble(&window));
        }
        chunks
    }

    /// Hard character cuts for boundary-free runs: windows of `chunk_size`
    /// characters advancing by `chunk_size - chunk_overlap` until every
    /// start offset below the text length has been emitted.
    fn hard_windows(&self, text: &str) -> Vec<String> {
        let stride = self.chunk_size - self.chunk_overlap;
        let mut bounds: Vec<usize> = text.char_indices().map(|(offset, _)| offset).collect();
        bounds.push(text.len());
        let total = bounds.len() - 1;

        let mut chunks = Vec::new();
        let mut start = 0;
        while start < total {
            let end = (start + self.chunk_size).min(total);
            chunks.push(text[bounds[start]..bounds[end]].to_string());
            start += stride;
        }
        chunks
    }
}

/// Splits `text` on `separator`, keeping each separator attached to the
/// piece it terminates so concatenating the pieces restores the input.
fn split_after<'a>(text: &'a str, separator: &str) -> Vec<&'a str> {
    let mut pieces = Vec::new();
    let mut start = 0;
    while let Some(found) = text[start..].find(separator) {
        let end = start + found + separator.len();
        pieces.push(&text[start..end]);
        start = end;
    }
    if start < text.len() {
        pieces.push(&text[start..]);
    }
    pieces
}

fn assemble(window: &VecDeque<(&str, usize)>) -> String {
    let joined: String = window.iter().map(|(piece, _)| *piece).collect();
    joined.trim().to_string()
}

fn char_len(text: &str) -> usize {
    text.chars().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_text_is_one_chunk() {
        let splitter = TextSplitter::default();
        let chunks = splitter.split_text("a small paragraph");
        assert_eq!(chunks, vec!["a small paragraph".to_string()]);
    }

    #[test]
    fn empty_input_yields_no_chunks() {
        let splitter = TextSplitter::default();
        assert!(splitter.split_text("").is_empty());
        assert!(splitter.split_text("   \n\n  ").is_empty());
    }

    #[test]
    fn boundary_free_2500_chars_makes_four_windows() {
        let splitter = TextSplitter::new(1000, 200);
        let text = "x".repeat(2500);
        let chunks = splitter.split_text(&text);
        assert_eq!(chunks.len(), 4);
        assert_eq!(chunks[0].len(), 1000);
        assert_eq!(chunks[1].len(), 1000);
        assert_eq!(chunks[2].len(), 900);
        assert_eq!(chunks[3].len(), 100);
    }

    #[test]
    fn hard_windows_share_exactly_the_overlap() {
        let splitter = TextSplitter::new(1000, 200);
        let text: String = (0..2500u32)
            .map(|i| char::from(b'a' + (i % 26) as u8))
            .collect();
        let chunks = splitter.split_text(&text);
        for pair in chunks.windows(2) {
            let skip = pair[0].chars().count().min(800);
            let tail: String = pair[0].chars().skip(skip).collect();
            assert!(pair[1].starts_with(&tail));
        }
    }

    #[test]
    fn hard_windows_reconstruct_the_original() {
        let splitter = TextSplitter::new(1000, 200);
        let text: String = (0..2500u32)
            .map(|i| char::from(b'a' + (i % 26) as u8))
            .collect();
        let chunks = splitter.split_text(&text);

        let mut rebuilt = chunks[0].clone();
        for chunk in &chunks[1..] {
            rebuilt.extend(chunk.chars().skip(200));
        }
        assert_eq!(rebuilt, text);
    }

    #[test]
    fn chunks_never_exceed_the_size_limit() {
        let splitter = TextSplitter::new(1000, 200);
        let paragraph = "The quarterly report covers revenue, margin and cash flow in detail. ";
        let text = paragraph.repeat(60);
        let chunks = splitter.split_text(&text);
        assert!(chunks.len() > 1);
        for chunk in &chunks {
            assert!(chunk.chars().count() <= 1000, "oversized chunk: {}", chunk.len());
        }
    }

    #[test]
    fn consecutive_chunks_overlap_on_merged_text() {
        let splitter = TextSplitter::new(100, 40);
        let sentence = "Revenue grew again this quarter. ";
        let text = sentence.repeat(20);
        let chunks = splitter.split_text(&text);
        assert!(chunks.len() > 1);
        // The retained tail of each chunk reappears at the start of the next.
        for pair in chunks.windows(2) {
            let shared: Vec<&str> = pair[1].split_inclusive(". ").take(1).collect();
            assert!(
                pair[0].ends_with(shared[0].trim_end()),
                "no carried overlap between {:?} and {:?}",
                pair[0],
                pair[1]
            );
        }
    }

    #[test]
    fn paragraph_boundaries_are_preferred() {
        let splitter = TextSplitter::new(120, 20);
        let text = format!("{}\n\n{}", "alpha ".repeat(15).trim_end(), "beta ".repeat(15).trim_end());
        let chunks = splitter.split_text(&text);
        assert_eq!(chunks.len(), 2);
        assert!(chunks[0].starts_with("alpha"));
        assert!(chunks[1].starts_with("beta"));
    }

    #[test]
    fn multibyte_text_splits_on_char_boundaries() {
        let splitter = TextSplitter::new(100, 20);
        let text = "é".repeat(250);
        let chunks = splitter.split_text(&text);
        assert!(chunks.len() > 1);
        for chunk in &chunks {
            assert!(chunk.chars().count() <= 100);
        }
    }
}
