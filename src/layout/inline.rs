//! Inline styling within a single laid-out line.
//!
//! Recognized markers: `` `code` ``, `**bold**` and `_italic_`. Markers do
//! not nest and an unclosed marker runs to the end of the line. Italic is
//! only a color change since the built-in font set has no oblique faces.

use super::markdown::{MarkdownItem, RULE_COLOR, RULE_WIDTH, TEXT_COLOR};
use crate::writer::{measure_text, Font, PageContext, TextOptions};

/// Bold runs are drawn this much larger than the surrounding text.
pub const BOLD_SCALE: f64 = 1.05;

/// Style of an inline run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpanStyle {
    /// Unstyled text in the item color
    Plain,
    /// Monospaced text between backticks
    Code,
    /// Text between `**` pairs
    Bold,
    /// Text between underscores
    Italic,
}

/// A run of text sharing one style, markers removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InlineSpan<'a> {
    /// Run style
    pub style: SpanStyle,
    /// Run text without markers
    pub text: &'a str,
}

impl<'a> InlineSpan<'a> {
    fn new(style: SpanStyle, text: &'a str) -> Self {
        Self { style, text }
    }

    /// Font, size and color used to draw this run inside `item`.
    fn appearance(&self, item: &MarkdownItem<'_>) -> (Font, f64, &'static str) {
        match self.style {
            SpanStyle::Plain => (Font::Helvetica, item.size, item.color),
            SpanStyle::Code => (Font::Courier, item.size, "#000000"),
            SpanStyle::Bold => (Font::Helvetica, item.size * BOLD_SCALE, item.color),
            SpanStyle::Italic => (Font::Helvetica, item.size, TEXT_COLOR),
        }
    }
}

/// Split `text` into styled runs. Empty runs are dropped.
pub fn scan_inline(text: &str) -> Vec<InlineSpan<'_>> {
    let bytes = text.as_bytes();
    let mut spans = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        let (style, start, end, next) = if bytes[i] == b'`' {
            let end = find(text, i + 1, "`");
            (SpanStyle::Code, i + 1, end, end + 1)
        } else if text[i..].starts_with("**") {
            let end = find(text, i + 2, "**");
            (SpanStyle::Bold, i + 2, end, end + 2)
        } else if bytes[i] == b'_' {
            let end = find(text, i + 1, "_");
            (SpanStyle::Italic, i + 1, end, end + 1)
        } else {
            let end = plain_end(bytes, i);
            (SpanStyle::Plain, i, end, end)
        };

        if end > start {
            spans.push(InlineSpan::new(style, &text[start..end]));
        }
        i = next;
    }
    spans
}

/// Byte offset of `marker` at or after `from`, or the end of `text`.
fn find(text: &str, from: usize, marker: &str) -> usize {
    text.get(from..)
        .and_then(|rest| rest.find(marker))
        .map_or(text.len(), |pos| from + pos)
}

/// End of a plain run starting at `from`.
fn plain_end(bytes: &[u8], from: usize) -> usize {
    let mut i = from;
    while i < bytes.len() {
        match bytes[i] {
            b'`' | b'_' => break,
            b'*' if bytes.get(i + 1) == Some(&b'*') => break,
            _ => i += 1,
        }
    }
    i
}

/// Draw one laid-out item with its baseline at `y`.
pub fn draw_item(ctx: &mut PageContext<'_>, item: &MarkdownItem<'_>, margin: f64, page_width: f64, y: f64) {
    if item.rule {
        ctx.line(margin, y, page_width - margin, y, RULE_COLOR, RULE_WIDTH);
        return;
    }
    if item.text.is_empty() {
        return;
    }

    let mut x = margin + item.indent;
    if !item.prefix.is_empty() {
        ctx.text(&item.prefix, x, y, item.size, &TextOptions::default());
        x += measure_text(&item.prefix, item.size, Font::Helvetica);
    }

    for span in scan_inline(item.text) {
        let (font, size, color) = span.appearance(item);
        let opts = TextOptions::new().with_font(font).with_color(color);
        ctx.text(span.text, x, y, size, &opts);
        x += measure_text(span.text, size, font);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::parse_blocks;
    use crate::writer::PdfWriter;

    fn styles(text: &str) -> Vec<(SpanStyle, &str)> {
        scan_inline(text).into_iter().map(|s| (s.style, s.text)).collect()
    }

    #[test]
    fn test_plain_only() {
        assert_eq!(styles("just words"), vec![(SpanStyle::Plain, "just words")]);
        assert!(styles("").is_empty());
    }

    #[test]
    fn test_mixed_runs() {
        assert_eq!(
            styles("Use `cargo` for **fast** and _easy_ builds"),
            vec![
                (SpanStyle::Plain, "Use "),
                (SpanStyle::Code, "cargo"),
                (SpanStyle::Plain, " for "),
                (SpanStyle::Bold, "fast"),
                (SpanStyle::Plain, " and "),
                (SpanStyle::Italic, "easy"),
                (SpanStyle::Plain, " builds"),
            ]
        );
    }

    #[test]
    fn test_unclosed_markers_run_to_end() {
        assert_eq!(styles("a `open"), vec![(SpanStyle::Plain, "a "), (SpanStyle::Code, "open")]);
        assert_eq!(styles("**bold"), vec![(SpanStyle::Bold, "bold")]);
        assert_eq!(styles("_tail"), vec![(SpanStyle::Italic, "tail")]);
    }

    #[test]
    fn test_empty_runs_skipped() {
        assert_eq!(styles("``x****y__"), vec![(SpanStyle::Plain, "x"), (SpanStyle::Plain, "y")]);
    }

    #[test]
    fn test_single_star_is_plain() {
        assert_eq!(styles("2 * 3"), vec![(SpanStyle::Plain, "2 * 3")]);
    }

    #[test]
    fn test_snake_case_becomes_italic() {
        assert_eq!(
            styles("my_var_name"),
            vec![(SpanStyle::Plain, "my"), (SpanStyle::Italic, "var"), (SpanStyle::Plain, "name")]
        );
    }

    #[test]
    fn test_multibyte_text() {
        assert_eq!(
            styles("café **naïve**"),
            vec![(SpanStyle::Plain, "café "), (SpanStyle::Bold, "naïve")]
        );
    }

    fn render(source: &str) -> String {
        let items = parse_blocks(source, 468.0);
        let mut writer = PdfWriter::new();
        let mut captured = String::new();
        writer
            .page(612.0, 792.0, |ctx| {
                for item in &items {
                    draw_item(ctx, item, 72.0, 612.0, 700.0);
                }
                captured = String::from_utf8(ctx.content().build()).unwrap();
            })
            .unwrap();
        captured
    }

    #[test]
    fn test_draw_runs_advance() {
        let out = render("ab`cd`");
        // "ab" at 11pt Helvetica is 12.232 wide
        assert!(out.contains("72.00 700.00 Td\n(ab) Tj"));
        assert!(out.contains("/F3 11.00 Tf\n84.23 700.00 Td\n(cd) Tj"));
    }

    #[test]
    fn test_code_run_advances_by_courier_width() {
        let out = render("`ab`cd");
        // 2 * 600 * 11 / 1000
        assert!(out.contains("/F3 11.00 Tf\n72.00 700.00 Td\n(ab) Tj"));
        assert!(out.contains("/F1 11.00 Tf\n85.20 700.00 Td\n(cd) Tj"));
    }

    #[test]
    fn test_bold_run_advances_by_scaled_width() {
        let out = render("**ab**cd");
        // (556 + 556) * 11.55 / 1000
        assert!(out.contains("/F1 11.55 Tf\n72.00 700.00 Td\n(ab) Tj"));
        assert!(out.contains("/F1 11.00 Tf\n84.84 700.00 Td\n(cd) Tj"));
    }

    #[test]
    fn test_draw_bold_scaled() {
        let out = render("**B**");
        assert!(out.contains("/F1 11.55 Tf"));
        assert!(out.contains("0.067 0.067 0.067 rg"));
    }

    #[test]
    fn test_draw_list_prefix_black() {
        let out = render("- item");
        assert!(out.starts_with("0.000 0.000 0.000 rg\nBT\n/F1 11.00 Tf\n84.00 700.00 Td\n(- ) Tj"));
        assert!(out.contains("(item) Tj"));
    }

    #[test]
    fn test_draw_rule_and_spacer() {
        assert_eq!(
            render("---"),
            "0.50 w\n0.878 0.878 0.878 RG\n72.00 700.00 m\n540.00 700.00 l\nS\n"
        );
        assert!(render("a\n\n").matches("Tj").count() == 1);
    }
}
