use std::borrow::Cow;

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Display width of a string in terminal columns (CJK and emoji count as 2).
///
/// ```
/// use chronicle::util::display_width;
///
/// assert_eq!(display_width("Hello"), 5);
/// assert_eq!(display_width("你好"), 4);
/// ```
pub fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

const ELLIPSIS: &str = "…";
const ELLIPSIS_WIDTH: usize = 1;

/// Truncate `s` to at most `max_width` columns, ending with "…" when cut.
///
/// Borrows when the string already fits.
///
/// ```
/// use chronicle::util::truncate_to_width;
///
/// assert_eq!(truncate_to_width("Short", 10), "Short");
/// assert_eq!(truncate_to_width("Hello World", 6), "Hello…");
/// assert_eq!(truncate_to_width("Test", 0), "");
/// ```
pub fn truncate_to_width(s: &str, max_width: usize) -> Cow<'_, str> {
    if display_width(s) <= max_width {
        return Cow::Borrowed(s);
    }
    if max_width == 0 {
        return Cow::Borrowed("");
    }

    let budget = max_width - ELLIPSIS_WIDTH;
    let mut used = 0;
    let mut end = 0;
    for (idx, c) in s.char_indices() {
        let w = UnicodeWidthChar::width(c).unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        end = idx + c.len_utf8();
    }
    Cow::Owned(format!("{}{}", s[..end].trim_end(), ELLIPSIS))
}

/// Remove terminal control characters and ANSI escape sequences.
///
/// Keeps tab, newline and carriage return. CSI sequences (`ESC [ ... final`)
/// and OSC sequences (`ESC ] ... BEL` or `ESC ] ... ESC \`) are dropped whole;
/// any other ESC is dropped alone. Borrows when nothing needs removing.
pub fn strip_control_chars(s: &str) -> Cow<'_, str> {
    fn is_control(c: char) -> bool {
        (c.is_ascii_control() && !matches!(c, '\t' | '\n' | '\r')) || c == '\u{7f}'
    }

    if !s.chars().any(is_control) {
        return Cow::Borrowed(s);
    }

    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '\u{1b}' {
            if !is_control(c) {
                out.push(c);
            }
            continue;
        }
        match chars.peek() {
            Some('[') => {
                chars.next();
                // Parameters and intermediates, then one final byte in 0x40..=0x7e
                for n in chars.by_ref() {
                    if ('\u{40}'..='\u{7e}').contains(&n) {
                        break;
                    }
                }
            }
            Some(']') => {
                chars.next();
                while let Some(n) = chars.next() {
                    if n == '\u{07}' {
                        break;
                    }
                    if n == '\u{1b}' && chars.peek() == Some(&'\\') {
                        chars.next();
                        break;
                    }
                }
            }
            _ => {}
        }
    }
    Cow::Owned(out)
}

/// A word with an opaque style tag, used by [`wrap_words`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyledWord<T> {
    pub text: String,
    pub style: T,
}

/// Greedy word wrap that keeps each word's style tag.
///
/// Words wider than `width` are hard-split. A `width` of 0 is treated as 1.
pub fn wrap_words<T: Clone>(words: &[StyledWord<T>], width: usize) -> Vec<Vec<StyledWord<T>>> {
    let width = width.max(1);
    let mut lines: Vec<Vec<StyledWord<T>>> = Vec::new();
    let mut current: Vec<StyledWord<T>> = Vec::new();
    let mut used = 0;

    for word in words {
        let w = display_width(&word.text);
        let sep = usize::from(!current.is_empty());

        if used + sep + w <= width {
            if sep == 1 {
                current.push(StyledWord {
                    text: " ".to_string(),
                    style: word.style.clone(),
                });
            }
            current.push(word.clone());
            used += sep + w;
            continue;
        }

        if !current.is_empty() {
            lines.push(std::mem::take(&mut current));
            used = 0;
        }

        if w <= width {
            current.push(word.clone());
            used = w;
            continue;
        }

        // Hard split an overlong word across lines
        let mut piece = String::new();
        let mut piece_width = 0;
        for c in word.text.chars() {
            let cw = UnicodeWidthChar::width(c).unwrap_or(0);
            if piece_width + cw > width && !piece.is_empty() {
                lines.push(vec![StyledWord {
                    text: std::mem::take(&mut piece),
                    style: word.style.clone(),
                }]);
                piece_width = 0;
            }
            piece.push(c);
            piece_width += cw;
        }
        if !piece.is_empty() {
            current.push(StyledWord {
                text: piece,
                style: word.style.clone(),
            });
            used = piece_width;
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain(text: &str) -> Vec<StyledWord<()>> {
        text.split_whitespace()
            .map(|w| StyledWord {
                text: w.to_string(),
                style: (),
            })
            .collect()
    }

    fn joined(lines: &[Vec<StyledWord<()>>]) -> Vec<String> {
        lines
            .iter()
            .map(|l| l.iter().map(|w| w.text.as_str()).collect())
            .collect()
    }

    #[test]
    fn test_truncate_fits_borrows() {
        assert!(matches!(truncate_to_width("Short", 10), Cow::Borrowed(_)));
        assert_eq!(truncate_to_width("Exact", 5), "Exact");
    }

    #[test]
    fn test_truncate_ascii() {
        assert_eq!(truncate_to_width("Hello World", 8), "Hello W…");
        // Trailing space before the ellipsis is trimmed
        assert_eq!(truncate_to_width("Hello World", 7), "Hello…");
    }

    #[test]
    fn test_truncate_cjk() {
        // 2 columns each; budget 4 after the ellipsis
        assert_eq!(truncate_to_width("你好世界", 5), "你好…");
    }

    #[test]
    fn test_truncate_narrow_widths() {
        assert_eq!(truncate_to_width("Test", 0), "");
        assert_eq!(truncate_to_width("Test", 1), "…");
        assert_eq!(truncate_to_width("Test", 2), "T…");
    }

    #[test]
    fn test_strip_clean_text_borrows() {
        assert!(matches!(strip_control_chars("plain text"), Cow::Borrowed(_)));
        assert_eq!(strip_control_chars("tab\tnew\nline\r"), "tab\tnew\nline\r");
    }

    #[test]
    fn test_strip_ansi_sequences() {
        assert_eq!(strip_control_chars("\x1b[31mred\x1b[0m"), "red");
        assert_eq!(strip_control_chars("\x1b[2J\x1b[Hclear"), "clear");
        assert_eq!(strip_control_chars("\x1b]0;title\x07after"), "after");
        assert_eq!(strip_control_chars("\x1b]0;title\x1b\\after"), "after");
        assert_eq!(strip_control_chars("bare\x1bq"), "bareq");
    }

    #[test]
    fn test_strip_controls_and_del() {
        assert_eq!(strip_control_chars("a\x00b\x07c\x7fd"), "abcd");
    }

    #[test]
    fn test_strip_unicode_preserved() {
        assert_eq!(strip_control_chars("héllo 世界\x1b[1m!"), "héllo 世界!");
    }

    #[test]
    fn test_wrap_words_greedy() {
        let lines = wrap_words(&plain("the quick brown fox jumps"), 10);
        assert_eq!(joined(&lines), vec!["the quick", "brown fox", "jumps"]);
    }

    #[test]
    fn test_wrap_words_hard_splits_long_word() {
        let lines = wrap_words(&plain("abcdefghij xy"), 4);
        assert_eq!(joined(&lines), vec!["abcd", "efgh", "ij", "xy"]);
    }

    #[test]
    fn test_wrap_words_zero_width_does_not_loop() {
        let lines = wrap_words(&plain("ab"), 0);
        assert_eq!(joined(&lines), vec!["a", "b"]);
    }

    #[test]
    fn test_wrap_words_empty() {
        assert!(wrap_words::<()>(&[], 10).is_empty());
    }
}
