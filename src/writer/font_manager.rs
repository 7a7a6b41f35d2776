//! Font metrics for the three built-in base fonts.
//!
//! Widths are the standard PostScript metrics in units of 1/1000 em for the
//! printable ASCII range (codes 32..=126). Anything outside that range,
//! including every non-ASCII character, uses a fixed fallback advance.

/// Advance used for characters outside the printable ASCII table.
pub const FALLBACK_WIDTH: u16 = 556;

/// Line spacing multiplier used when text wraps onto several lines.
pub const LINE_SPACING: f64 = 1.2;

const FIRST_CODE: u32 = 32;
const LAST_CODE: u32 = 126;

#[rustfmt::skip]
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

#[rustfmt::skip]
const TIMES_WIDTHS: [u16; 95] = [
    250, 333, 408, 500, 500, 833, 778, 180, 333, 333, 500, 564, 250, 333, 250, 278,
    500, 500, 500, 500, 500, 500, 500, 500, 500, 500, 278, 278, 564, 564, 564, 444,
    921, 722, 667, 667, 722, 611, 556, 722, 722, 333, 389, 722, 611, 889, 722, 722,
    556, 722, 667, 556, 611, 722, 722, 944, 722, 722, 611, 333, 278, 333, 469, 500,
    333, 444, 500, 444, 500, 444, 333, 500, 500, 278, 278, 500, 278, 778, 500, 500,
    500, 500, 333, 389, 278, 500, 500, 722, 500, 500, 444, 480, 200, 480, 541,
];

const COURIER_WIDTHS: [u16; 95] = [600; 95];

/// The built-in base fonts. Each page exposes all three as `/F1`..`/F3`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Font {
    /// Helvetica (sans-serif), resource `/F1`
    #[default]
    Helvetica,
    /// Times-Roman (serif), resource `/F2`
    Times,
    /// Courier (monospace, 600 units per glyph), resource `/F3`
    Courier,
}

impl Font {
    /// All fonts in resource-slot order.
    pub const ALL: [Font; 3] = [Font::Helvetica, Font::Times, Font::Courier];

    /// Resource name used in the page's font dictionary.
    pub fn resource_name(&self) -> &'static str {
        match self {
            Font::Helvetica => "F1",
            Font::Times => "F2",
            Font::Courier => "F3",
        }
    }

    /// PostScript name written as `/BaseFont`.
    pub fn base_font(&self) -> &'static str {
        match self {
            Font::Helvetica => "Helvetica",
            Font::Times => "Times-Roman",
            Font::Courier => "Courier",
        }
    }

    fn widths(&self) -> &'static [u16; 95] {
        match self {
            Font::Helvetica => &HELVETICA_WIDTHS,
            Font::Times => &TIMES_WIDTHS,
            Font::Courier => &COURIER_WIDTHS,
        }
    }

    /// Advance width of a single character in 1/1000 em.
    pub fn char_width(&self, ch: char) -> u16 {
        let code = ch as u32;
        if (FIRST_CODE..=LAST_CODE).contains(&code) {
            self.widths()[(code - FIRST_CODE) as usize]
        } else {
            FALLBACK_WIDTH
        }
    }
}

/// Measure the width of `text` in points at `size` in `font`.
pub fn measure_text(text: &str, size: f64, font: Font) -> f64 {
    let units: u64 = text.chars().map(|c| font.char_width(c) as u64).sum();
    (units as f64 * size) / 1000.0
}

/// One line produced by word wrapping.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WrappedLine<'t> {
    /// Line text, a slice of the wrapped input
    pub text: &'t str,
    /// Measured width in points
    pub width: f64,
}

/// Greedy word wrapper shared by the drawing context and the markdown layout.
#[derive(Debug, Clone, Copy)]
pub struct TextLayout {
    font: Font,
    size: f64,
}

impl TextLayout {
    /// Create a wrapper measuring with `font` at `size`.
    pub fn new(font: Font, size: f64) -> Self {
        Self { font, size }
    }

    /// Split `text` into lines no wider than `max_width`.
    ///
    /// Words are separated by single spaces. A word wider than `max_width`
    /// still gets a line of its own; words are never broken. Empty input
    /// yields one empty line.
    pub fn wrap<'t>(&self, text: &'t str, max_width: f64) -> Vec<WrappedLine<'t>> {
        let space_width = measure_text(" ", self.size, self.font);
        let mut lines = Vec::new();
        let mut current: Option<(usize, usize)> = None;
        let mut current_width = 0.0;

        let mut pos = 0;
        while pos < text.len() {
            let end = text[pos..].find(' ').map_or(text.len(), |i| pos + i);
            let word_width = measure_text(&text[pos..end], self.size, self.font);

            match current {
                None => {
                    current = Some((pos, end));
                    current_width = word_width;
                },
                Some((start, _)) if current_width + space_width + word_width <= max_width => {
                    current = Some((start, end));
                    current_width += space_width + word_width;
                },
                Some((start, line_end)) => {
                    lines.push(WrappedLine {
                        text: &text[start..line_end],
                        width: current_width,
                    });
                    current = Some((pos, end));
                    current_width = word_width;
                },
            }
            pos = end + 1;
        }

        if let Some((start, end)) = current {
            lines.push(WrappedLine {
                text: &text[start..end],
                width: current_width,
            });
        }
        if lines.is_empty() {
            lines.push(WrappedLine {
                text: "",
                width: 0.0,
            });
        }
        lines
    }
}
