/*!
 * Splitting documents into size-bounded chunks.
 *
 * The boundary unit is the line (each line keeps its `\n`, so `\r\n` stays intact).
 * Lines are accumulated greedily until adding the next one would push the buffer's
 * estimate over the budget. Chunks are never split inside a line: a line that is
 * over budget on its own becomes a chunk by itself.
 *
 * Concatenating the chunk texts in order always reproduces the input exactly.
 *
 * Only `\n` ends a line. A lone `\r` (classic Mac line endings) does not, so such
 * a document is a single line and therefore a single, possibly oversized, chunk.
 */

use super::estimator::{estimate_tokens, tokens_for_chars};

/// A contiguous slice of a document, sized for one translation request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    /// Position in the document, starting at 0
    pub ordinal: usize,
    /// Text of the chunk, including line terminators
    pub text: String,
    /// Estimated token cost of `text`
    pub estimated_tokens: usize,
}

impl Chunk {
    fn seal(ordinal: usize, text: String) -> Self {
        let estimated_tokens = estimate_tokens(&text);
        Self {
            ordinal,
            text,
            estimated_tokens,
        }
    }

    /// True when the chunk exceeds the budget (only possible for a single long line)
    pub fn is_oversized(&self, max_tokens: usize) -> bool {
        self.estimated_tokens > max_tokens
    }
}

/// Split `content` into ordered chunks whose estimate stays within `max_tokens`.
///
/// Empty content yields no chunks.
pub fn split_into_chunks(content: &str, max_tokens: usize) -> Vec<Chunk> {
    let mut chunks = Vec::new();
    let mut buffer = String::new();
    let mut buffer_chars = 0usize;

    for line in content.split_inclusive('\n') {
        let line_chars = line.chars().count();

        if !buffer.is_empty() && tokens_for_chars(buffer_chars + line_chars) > max_tokens {
            chunks.push(Chunk::seal(chunks.len(), std::mem::take(&mut buffer)));
            buffer_chars = 0;
        }

        buffer.push_str(line);
        buffer_chars += line_chars;
    }

    if !buffer.is_empty() {
        chunks.push(Chunk::seal(chunks.len(), buffer));
    }

    chunks
}

/// Join chunk texts back together in order
pub fn reassemble<'a, I>(texts: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    texts.into_iter().collect()
}
