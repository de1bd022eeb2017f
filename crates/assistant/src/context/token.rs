//! Token estimation.
//!
//! Character-based heuristic: ~4 characters per token.

/// Estimate the token count for a string. Rounds up.
pub fn estimate_tokens(text: &str) -> usize {
    text.chars().count().div_ceil(4)
}
