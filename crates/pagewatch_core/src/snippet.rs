/// Upper bound on the snippet captured from a changed page's text.
pub const SNIPPET_CAPTURE_CHARS: usize = 700;

/// Flattens extracted text to a single line and keeps the leading portion.
///
/// Newline separators become spaces so the snippet fits on one line of a
/// notification block, then the result is clipped to
/// [`SNIPPET_CAPTURE_CHARS`].
pub fn capture_snippet(text: &str) -> String {
    let flattened = text.trim().replace('\n', " ");
    clip_chars(&flattened, SNIPPET_CAPTURE_CHARS).to_string()
}

/// Clips to at most `max` characters without splitting a UTF-8 sequence.
pub fn clip_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
