use std::borrow::Cow;

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Display width of a string in terminal columns.
///
/// Unicode-aware: CJK characters and emoji count as 2 columns,
/// zero-width characters as 0.
pub fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

/// Ellipsis string used for truncation
const ELLIPSIS: &str = "...";
const ELLIPSIS_WIDTH: usize = 3;

/// Truncate a string to fit within a maximum display width, appending
/// an ellipsis when anything was cut.
///
/// Never splits a wide character in half: if the next character would
/// overflow the budget, truncation happens before it.
pub fn truncate_to_width(s: &str, max_width: usize) -> Cow<'_, str> {
    if display_width(s) <= max_width {
        return Cow::Borrowed(s);
    }
    if max_width <= ELLIPSIS_WIDTH {
        return Cow::Owned(ELLIPSIS[..max_width.min(ELLIPSIS_WIDTH)].to_string());
    }

    let budget = max_width - ELLIPSIS_WIDTH;
    let mut width = 0;
    let mut end = 0;
    for (idx, ch) in s.char_indices() {
        let ch_width = UnicodeWidthChar::width(ch).unwrap_or(0);
        if width + ch_width > budget {
            break;
        }
        width += ch_width;
        end = idx + ch.len_utf8();
    }

    let mut out = String::with_capacity(end + ELLIPSIS.len());
    out.push_str(&s[..end]);
    out.push_str(ELLIPSIS);
    Cow::Owned(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_string_is_untouched() {
        assert_eq!(truncate_to_width("Heat", 10), "Heat");
    }

    #[test]
    fn long_string_gets_ellipsis() {
        let t = truncate_to_width("The Shawshank Redemption", 10);
        assert_eq!(display_width(&t), 10);
        assert!(t.ends_with("..."));
    }

    #[test]
    fn exact_fit_is_untouched() {
        assert_eq!(truncate_to_width("12345", 5), "12345");
    }

    #[test]
    fn wide_chars_are_not_split() {
        // Each CJK char is 2 columns; budget of 6 leaves 3 for text,
        // which fits one full char (2) but not half of the next.
        let t = truncate_to_width("千と千尋の神隠し", 6);
        assert!(display_width(&t) <= 6);
        assert!(t.ends_with("..."));
    }

    #[test]
    fn tiny_budget_degenerates_to_dots() {
        assert_eq!(truncate_to_width("Blade Runner", 2), "..");
    }
}
