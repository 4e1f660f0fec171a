use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Display width in terminal cells. Tabs count as 4 cells.
pub fn display_width(s: &str) -> usize {
    s.split('\t')
        .enumerate()
        .map(|(i, part)| {
            let w = UnicodeWidthStr::width(part);
            if i > 0 { w + 4 } else { w }
        })
        .sum()
}

/// Display width of a single character in terminal cells. Tabs count as 4.
pub fn char_display_width(c: char) -> usize {
    if c == '\t' {
        4
    } else {
        UnicodeWidthChar::width(c).unwrap_or(0)
    }
}

/// Truncate a string to fit within `max_cells` terminal cells, appending `…` if truncated.
pub fn truncate_to_width(s: &str, max_cells: usize) -> String {
    if max_cells == 0 {
        return String::new();
    }
    if display_width(s) <= max_cells {
        return s.to_string();
    }
    if max_cells == 1 {
        return "\u{2026}".to_string();
    }
    let budget = max_cells - 1; // reserve 1 cell for '…'
    let mut width = 0;
    let mut result = String::new();
    for c in s.chars() {
        let cw = char_display_width(c);
        if width + cw > budget {
            break;
        }
        width += cw;
        result.push(c);
    }
    result.push('\u{2026}');
    result
}

/// Drop leading chars until the text up to `byte_offset` fits in `max_cells`.
/// Returns the visible tail and the cursor column within it.
pub fn scroll_to_cursor(s: &str, byte_offset: usize, max_cells: usize) -> (&str, usize) {
    let byte_offset = byte_offset.min(s.len());
    let mut start = 0;
    let mut col = display_width(&s[..byte_offset]);
    // Keep one cell free for the cursor itself
    while col >= max_cells && start < byte_offset {
        let Some(c) = s[start..].chars().next() else {
            break;
        };
        col -= char_display_width(c);
        start += c.len_utf8();
    }
    (&s[start..], col)
}
