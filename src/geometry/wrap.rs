//! Greedy word wrapping.

/// Wrap `text` into lines of at most `max_chars_per_line` characters.
///
/// Words are never split: a word longer than the limit gets a line of its
/// own and overflows. Runs of whitespace collapse to single spaces. Empty or
/// blank input yields no lines. Lengths are counted in `char`s.
pub fn wrap(text: &str, max_chars_per_line: usize) -> Vec<String> {
    let limit = max_chars_per_line.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_len = 0usize;

    for word in text.split_whitespace() {
        let word_len = word.chars().count();
        if current.is_empty() {
            current.push_str(word);
            current_len = word_len;
        } else if current_len + 1 + word_len <= limit {
            current.push(' ');
            current.push_str(word);
            current_len += 1 + word_len;
        } else {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
            current_len = word_len;
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

#[cfg(test)]
#[path = "../../tests/rust/test_geometry_wrap.rs"]
mod tests;
