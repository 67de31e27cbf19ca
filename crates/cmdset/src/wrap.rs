//! Greedy word wrapping for help output.

use unicode_width::UnicodeWidthStr;

/// Wraps every line of `text` so it fits within `width` display columns.
///
/// A line's leading indentation is repeated on its continuation lines.
/// Blank lines and a trailing newline survive unchanged, and a word wider
/// than the available space is kept whole on its own line. A `width` of zero
/// disables wrapping.
///
/// # Examples
///
/// ```rust,ignore
/// let wrapped = cmdset::wrap("  alpha beta gamma", 12);
/// assert_eq!(wrapped, "  alpha beta\n  gamma");
/// ```
#[must_use]
pub fn wrap(text: &str, width: usize) -> String {
    if width == 0 {
        return text.to_owned();
    }

    let mut wrapped = String::with_capacity(text.len());
    let mut lines = text.split('\n').peekable();
    while let Some(line) = lines.next() {
        wrap_line(line, width, &mut wrapped);
        if lines.peek().is_some() {
            wrapped.push('\n');
        }
    }
    wrapped
}

fn wrap_line(line: &str, width: usize, out: &mut String) {
    let body = line.trim_start();
    let (indent, _) = line.split_at(line.len() - body.len());
    if body.is_empty() || line.width() <= width {
        out.push_str(line.trim_end());
        return;
    }

    let indent_width = indent.width();
    let mut column = 0;
    for word in body.split_whitespace() {
        let word_width = word.width();
        if column == 0 {
            out.push_str(indent);
            out.push_str(word);
            column = indent_width + word_width;
        } else if column + 1 + word_width <= width {
            out.push(' ');
            out.push_str(word);
            column += 1 + word_width;
        } else {
            out.push('\n');
            out.push_str(indent);
            out.push_str(word);
            column = indent_width + word_width;
        }
    }
}
