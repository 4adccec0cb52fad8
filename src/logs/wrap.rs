//! Word wrapping for log lines

/// Wrap `text` to at most `width` characters per line.
///
/// A non-positive width disables wrapping and returns the whole string as a
/// single line. Breaks prefer the last space before the width boundary and
/// fall back to a hard break when no space exists; both halves of every
/// break are trimmed. The result always has at least one line, including for
/// an empty input.
pub fn wrap(text: &str, width: i32) -> Vec<String> {
    if width <= 0 {
        return vec![text.to_string()];
    }
    let width = width as usize;

    let mut lines: Vec<String> = Vec::new();
    let mut rest: Vec<char> = text.chars().collect();

    while rest.len() > width {
        let break_at = rest[..width]
            .iter()
            .rposition(|c| *c == ' ')
            .unwrap_or(width);
        let head: String = rest[..break_at].iter().collect();
        let head = head.trim();
        if !head.is_empty() {
            lines.push(head.to_string());
        }
        let tail: String = rest[break_at..].iter().collect();
        rest = tail.trim().chars().collect();
    }

    let tail: String = rest.into_iter().collect();
    if lines.is_empty() || !tail.is_empty() {
        lines.push(tail);
    }
    lines
}
