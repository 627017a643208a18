use std::borrow::Cow;

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Ellipsis marker appended to shortened text.
pub const ELLIPSIS: &str = "...";
const ELLIPSIS_WIDTH: usize = 3;

/// Display width of a string in terminal columns (CJK and emoji count as 2).
pub fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

/// Truncate a string to fit within `max_width` terminal columns.
///
/// Appends `...` when text is cut. Widths of 3 or less have no room for the
/// marker, so as many characters as fit are returned without it.
///
/// ```
/// use trendboard::util::truncate_to_width;
///
/// assert_eq!(truncate_to_width("Short", 10), "Short");
/// assert_eq!(truncate_to_width("Hello World", 8), "Hello...");
/// assert_eq!(truncate_to_width("Test", 2), "Te");
/// ```
pub fn truncate_to_width(s: &str, max_width: usize) -> Cow<'_, str> {
    if display_width(s) <= max_width {
        return Cow::Borrowed(s);
    }

    let (budget, marker) = if max_width <= ELLIPSIS_WIDTH {
        (max_width, "")
    } else {
        (max_width - ELLIPSIS_WIDTH, ELLIPSIS)
    };

    let mut width = 0;
    let mut cut = 0;
    for (idx, c) in s.char_indices() {
        let w = UnicodeWidthChar::width(c).unwrap_or(0);
        if width + w > budget {
            break;
        }
        width += w;
        cut = idx + c.len_utf8();
    }

    Cow::Owned(format!("{}{}", &s[..cut], marker))
}

/// Keep at most `max_chars` characters, appending `...` when anything was dropped.
///
/// Counts Unicode scalar values, not bytes, so multi-byte text is never split
/// inside a character.
///
/// ```
/// use trendboard::util::truncate_chars;
///
/// assert_eq!(truncate_chars("abcdef", 4), "abcd...");
/// assert_eq!(truncate_chars("abc", 4), "abc");
/// ```
pub fn truncate_chars(s: &str, max_chars: usize) -> Cow<'_, str> {
    match s.char_indices().nth(max_chars) {
        Some((cut, _)) => Cow::Owned(format!("{}{}", &s[..cut], ELLIPSIS)),
        None => Cow::Borrowed(s),
    }
}

/// Format a count with thousands separators: `1234567` → `"1,234,567"`.
pub fn format_count(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

fn is_stripped(c: char) -> bool {
    c.is_control() && c != '\t' && c != '\n' && c != '\r'
}

/// Strip terminal control characters and ANSI escape sequences from text.
///
/// Titles and post bodies come from the backend (and ultimately from Reddit
/// and Wikipedia), so they are cleaned before reaching the terminal.
/// Tab, newline and carriage return are kept. CSI (`ESC [ ... final`) and OSC
/// (`ESC ] ... BEL` or `ESC ] ... ESC \`) sequences are removed whole.
pub fn strip_control_chars(s: &str) -> Cow<'_, str> {
    if !s.chars().any(is_stripped) {
        return Cow::Borrowed(s);
    }

    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '\x1b' {
            if !is_stripped(c) {
                out.push(c);
            }
            continue;
        }

        match chars.peek() {
            Some('[') => {
                chars.next();
                for c in chars.by_ref() {
                    if ('\x40'..='\x7e').contains(&c) {
                        break;
                    }
                }
            }
            Some(']') => {
                chars.next();
                while let Some(c) = chars.next() {
                    if c == '\x07' {
                        break;
                    }
                    if c == '\x1b' && chars.peek() == Some(&'\\') {
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

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_ascii_truncation() {
        assert_eq!(truncate_to_width("Hello World", 8), "Hello...");
        assert_eq!(truncate_to_width("Short", 10), "Short");
    }

    #[test]
    fn test_cjk_truncation() {
        // 4 chars x 2 columns = 8, budget 7 - 3 = 4 columns
        assert_eq!(truncate_to_width("你好世界", 7), "你好...");
    }

    #[test]
    fn test_narrow_widths() {
        assert_eq!(truncate_to_width("Test", 0), "");
        assert_eq!(truncate_to_width("Test", 1), "T");
        assert_eq!(truncate_to_width("Test", 3), "Tes");
    }

    #[test]
    fn test_truncate_chars_long_body() {
        let body = "x".repeat(250);
        let out = truncate_chars(&body, 200);
        assert_eq!(out.chars().count(), 203);
        assert!(out.ends_with("..."));
        assert_eq!(&out[..200], "x".repeat(200));
    }

    #[test]
    fn test_truncate_chars_short_body_untouched() {
        let body = "y".repeat(150);
        assert!(matches!(truncate_chars(&body, 200), Cow::Borrowed(_)));
    }

    #[test]
    fn test_truncate_chars_exact_length_untouched() {
        let body = "z".repeat(200);
        assert_eq!(truncate_chars(&body, 200), body);
    }

    #[test]
    fn test_truncate_chars_multibyte() {
        let body = "é".repeat(201);
        let out = truncate_chars(&body, 200);
        assert_eq!(out, format!("{}...", "é".repeat(200)));
    }

    #[test]
    fn test_format_count() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(1000), "1,000");
        assert_eq!(format_count(1234567), "1,234,567");
    }

    #[test]
    fn test_strip_clean_text_borrowed() {
        assert!(matches!(
            strip_control_chars("plain\ttext\n"),
            Cow::Borrowed(_)
        ));
    }

    #[test]
    fn test_strip_ansi_sequences() {
        assert_eq!(strip_control_chars("\x1b[31mred\x1b[0m"), "red");
        assert_eq!(
            strip_control_chars("a\x1b]0;title\x07b"),
            "ab"
        );
        assert_eq!(strip_control_chars("a\x1b]8;;x\x1b\\b"), "ab");
        assert_eq!(strip_control_chars("bell\x07\x00"), "bell");
    }

    proptest! {
        #[test]
        fn prop_truncate_chars_bounded(s in "\\PC{0,400}", max in 0usize..300) {
            let out = truncate_chars(&s, max);
            let n = s.chars().count();
            if n > max {
                prop_assert_eq!(out.chars().count(), max + 3);
            } else {
                prop_assert_eq!(out.as_ref(), s.as_str());
            }
        }

        #[test]
        fn prop_truncate_to_width_fits(s in "[a-zA-Z0-9 ]{0,80}", max in 0usize..60) {
            prop_assert!(display_width(&truncate_to_width(&s, max)) <= max);
        }
    }
}
