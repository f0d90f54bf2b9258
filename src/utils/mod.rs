//! Utility functions and helpers.

pub mod http;
pub mod retry;
pub mod url;

use std::time::Duration;

use unicode_segmentation::UnicodeSegmentation;

/// Sleep unless the delay is zero.
pub async fn pause(delay: Duration) {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
}

/// Truncate to at most `max_chars` characters without splitting a grapheme.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    let mut chars = 0;
    for (idx, grapheme) in text.grapheme_indices(true) {
        chars += grapheme.chars().count();
        if chars > max_chars {
            return &text[..idx];
        }
    }
    text
}
