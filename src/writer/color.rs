//! RGB colors parsed from hex strings.

use log::warn;

/// RGB color with channels in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    /// Red channel (0.0 - 1.0)
    pub r: f64,
    /// Green channel (0.0 - 1.0)
    pub g: f64,
    /// Blue channel (0.0 - 1.0)
    pub b: f64,
}

impl Color {
    /// Create a new color.
    pub fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    /// Create a black color.
    pub fn black() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }

    /// Parse `#rrggbb`, `rrggbb`, `#rgb` or `rgb`.
    ///
    /// Returns `None` for empty input, `"none"`, and anything malformed; the
    /// caller skips painting in that case.
    ///
    /// ```
    /// use tinypdf::writer::Color;
    ///
    /// let c = Color::parse_hex("#aabbcc").unwrap();
    /// assert!((c.r - 170.0 / 255.0).abs() < 1e-12);
    /// assert!(Color::parse_hex("none").is_none());
    /// ```
    pub fn parse_hex(hex: &str) -> Option<Self> {
        if hex.is_empty() || hex == "none" {
            return None;
        }
        let digits: String = hex.chars().filter(|&c| c != '#').collect();
        let expanded = match digits.len() {
            3 => digits.chars().flat_map(|c| [c, c]).collect(),
            6 => digits,
            _ => {
                warn!("Ignoring malformed color {:?}", hex);
                return None;
            },
        };
        if !expanded.bytes().all(|b| b.is_ascii_hexdigit()) {
            warn!("Ignoring malformed color {:?}", hex);
            return None;
        }

        let channel = |range: std::ops::Range<usize>| {
            expanded
                .get(range)
                .and_then(|s| u8::from_str_radix(s, 16).ok())
                .map(|v| v as f64 / 255.0)
        };
        match (channel(0..2), channel(2..4), channel(4..6)) {
            (Some(r), Some(g), Some(b)) => Some(Self::new(r, g, b)),
            _ => {
                warn!("Ignoring malformed color {:?}", hex);
                None
            },
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::black()
    }
}
