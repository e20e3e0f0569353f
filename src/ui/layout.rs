use unicode_width::UnicodeWidthStr;

/// Columns kept free around wrapped detail text.
pub const WRAP_MARGIN: u16 = 10;

/// Width available to detail text in a terminal `viewport_width` columns wide.
/// Never less than 1.
pub fn wrap_width(viewport_width: u16) -> usize {
    usize::from(viewport_width.saturating_sub(WRAP_MARGIN)).max(1)
}

/// Offset that centers `inner` within `outer`.
///
/// Negative when `inner` is larger; callers pass that through unchanged and
/// let the painter clip.
pub fn centered_offset(outer: u16, inner: u16) -> i32 {
    (i32::from(outer) - i32::from(inner)) / 2
}

/// Greedy word wrap measured in display columns.
///
/// Words are separated by whitespace and never split: a word wider than
/// `width` gets a row to itself. Newlines in `text` are kept as row breaks.
pub fn wrap_words(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut rows = Vec::new();

    for paragraph in text.split('\n') {
        let mut row = String::new();
        let mut row_width = 0;

        for word in paragraph.split_whitespace() {
            let word_width = word.width();
            if row.is_empty() {
                row.push_str(word);
                row_width = word_width;
            } else if row_width + 1 + word_width <= width {
                row.push(' ');
                row.push_str(word);
                row_width += 1 + word_width;
            } else {
                rows.push(std::mem::take(&mut row));
                row.push_str(word);
                row_width = word_width;
            }
        }
        rows.push(row);
    }

    rows
}
