/// Keep at most `max_chars` characters, never splitting a character
///
/// # Examples
/// ```
/// use stdict_mcp::utils::text::truncate_chars;
/// assert_eq!(truncate_chars("사랑합니다", 2), "사랑");
/// assert_eq!(truncate_chars("abc", 10), "abc");
/// ```
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => text[..idx].to_string(),
        None => text.to_string(),
    }
}
