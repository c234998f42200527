/*!
 * Approximate token accounting.
 *
 * The estimate is a fixed characters-per-token ratio, not the model's tokenizer.
 * Real limits enforced by the service may differ; callers treat the estimate as
 * a budget, not a guarantee.
 */

/// Characters counted as one token
pub const CHARS_PER_TOKEN: usize = 4;

/// Estimate the token cost of a text: character count divided by `CHARS_PER_TOKEN`, rounded down.
pub fn estimate_tokens(text: &str) -> usize {
    tokens_for_chars(text.chars().count())
}

/// Same estimate from a known character count
pub fn tokens_for_chars(char_count: usize) -> usize {
    char_count / CHARS_PER_TOKEN
}
