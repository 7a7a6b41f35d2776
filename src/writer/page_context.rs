//! Per-page drawing context.
//!
//! A [`PageContext`] is handed to the drawing closure passed to
//! [`PdfWriter::page`](super::PdfWriter::page). It records operators into the
//! page's private content stream and registers images and links with the
//! writer. Malformed colors never fail a call; the affected paint is skipped.

use super::annotation_builder::LinkAnnotation;
use super::color::Color;
use super::content_stream::ContentStreamBuilder;
use super::font_manager::{measure_text, Font, TextLayout, LINE_SPACING};
use super::image_handler::ImageData;
use super::pdf_writer::PdfWriter;
use crate::geometry::{Point, Rect};
use crate::object::ObjectRef;
use bytes::Bytes;
use std::f64::consts::{FRAC_PI_2, TAU};

/// Control point factor for approximating a quarter circle with one cubic
/// Bezier segment.
pub const BEZIER_CIRCLE_K: f64 = 0.552_284_749_8;

/// Horizontal text alignment inside [`TextOptions::width`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TextAlign {
    /// Left-aligned text (default)
    #[default]
    Left,
    /// Center-aligned text
    Center,
    /// Right-aligned text
    Right,
}

/// Options for [`PageContext::text`].
#[derive(Debug, Clone, PartialEq)]
pub struct TextOptions {
    /// Alignment; only applies when `width` is set
    pub align: TextAlign,
    /// Wrap width. `None` draws a single unwrapped line.
    pub width: Option<f64>,
    /// Fill color as hex RGB, or `"none"` to leave the current fill
    pub color: String,
    /// Base font
    pub font: Font,
}

impl Default for TextOptions {
    fn default() -> Self {
        Self {
            align: TextAlign::Left,
            width: None,
            color: "#000000".to_string(),
            font: Font::Helvetica,
        }
    }
}

impl TextOptions {
    /// Create default options (left, unwrapped, black Helvetica).
    pub fn new() -> Self {
        Self::default()
    }

    /// Set alignment.
    pub fn with_align(mut self, align: TextAlign) -> Self {
        self.align = align;
        self
    }

    /// Set wrap width.
    pub fn with_width(mut self, width: f64) -> Self {
        self.width = Some(width);
        self
    }

    /// Set fill color.
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    /// Set font.
    pub fn with_font(mut self, font: Font) -> Self {
        self.font = font;
        self
    }
}

/// Options for [`PageContext::link`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LinkOptions {
    /// Underline color; `None` draws no underline
    pub underline: Option<String>,
}

impl LinkOptions {
    /// Create options without an underline.
    pub fn new() -> Self {
        Self::default()
    }

    /// Underline the link in `color`.
    pub fn with_underline(mut self, color: impl Into<String>) -> Self {
        self.underline = Some(color.into());
        self
    }
}

/// What a finished page hands back to the writer.
pub(crate) struct PageOutput {
    pub content: Vec<u8>,
    pub images: Vec<(String, ObjectRef)>,
    pub links: Vec<LinkAnnotation>,
}

/// Drawing context for one page.
pub struct PageContext<'a> {
    writer: &'a mut PdfWriter,
    content: ContentStreamBuilder,
    images: Vec<(String, ObjectRef)>,
    links: Vec<LinkAnnotation>,
}

impl<'a> PageContext<'a> {
    pub(crate) fn new(writer: &'a mut PdfWriter) -> Self {
        Self {
            writer,
            content: ContentStreamBuilder::new(),
            images: Vec::new(),
            links: Vec::new(),
        }
    }

    pub(crate) fn finish(self) -> PageOutput {
        PageOutput {
            content: self.content.build(),
            images: self.images,
            links: self.links,
        }
    }

    /// Content stream recorded so far.
    pub fn content(&self) -> &ContentStreamBuilder {
        &self.content
    }

    /// Draw `body` with its baseline at (`x`, `y`).
    pub fn text(&mut self, body: &str, x: f64, y: f64, size: f64, opts: &TextOptions) -> &mut Self {
        self.text_with_prefix("", body, x, y, size, opts)
    }

    /// Draw `prefix` followed by `body` as one string.
    ///
    /// With `opts.width` set, `body` is word-wrapped and each line is drawn
    /// `size * 1.2` below the previous one; the prefix is only drawn on the
    /// first line but counts towards its width when aligning.
    pub fn text_with_prefix(
        &mut self,
        prefix: &str,
        body: &str,
        x: f64,
        y: f64,
        size: f64,
        opts: &TextOptions,
    ) -> &mut Self {
        if let Some(color) = Color::parse_hex(&opts.color) {
            self.content.fill_color(color);
        }

        let width = match opts.width {
            Some(width) => width,
            None => {
                let line = format!("{}{}", prefix, body);
                self.text_line(&line, x, y, size, opts.font);
                return self;
            },
        };

        let prefix_width = measure_text(prefix, size, opts.font);
        let lines = TextLayout::new(opts.font, size).wrap(body, width);
        for (i, line) in lines.iter().enumerate() {
            let line_width = if i == 0 { prefix_width + line.width } else { line.width };
            let tx = match opts.align {
                TextAlign::Left => x,
                TextAlign::Center => x + (width - line_width) / 2.0,
                TextAlign::Right => x + width - line_width,
            };
            let ty = y - i as f64 * size * LINE_SPACING;
            if i == 0 {
                let first = format!("{}{}", prefix, line.text);
                self.text_line(&first, tx, ty, size, opts.font);
            } else {
                self.text_line(line.text, tx, ty, size, opts.font);
            }
        }
        self
    }

    fn text_line(&mut self, text: &str, x: f64, y: f64, size: f64, font: Font) {
        self.content
            .begin_text()
            .set_font(font.resource_name(), size)
            .move_text(x, y)
            .show_text(text)
            .end_text();
    }

    /// Fill a rectangle. Nothing is drawn if `fill` does not parse.
    pub fn rect(&mut self, x: f64, y: f64, w: f64, h: f64, fill: &str) -> &mut Self {
        if let Some(color) = Color::parse_hex(fill) {
            self.content.fill_color(color).rect(x, y, w, h).fill();
        }
        self
    }

    /// Stroke a straight line. Nothing is drawn if `stroke` does not parse.
    pub fn line(
        &mut self,
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        stroke: &str,
        line_width: f64,
    ) -> &mut Self {
        if let Some(color) = Color::parse_hex(stroke) {
            self.content
                .set_line_width(line_width)
                .stroke_color(color)
                .move_to(x1, y1)
                .line_to(x2, y2)
                .stroke();
        }
        self
    }

    /// Draw a full circle from four Bezier quarter arcs.
    pub fn circle(
        &mut self,
        cx: f64,
        cy: f64,
        radius: f64,
        fill: Option<&str>,
        stroke: Option<&str>,
        line_width: f64,
    ) -> &mut Self {
        let k = BEZIER_CIRCLE_K * radius;
        let r = radius;
        self.content
            .move_to(cx + r, cy)
            .curve_to(cx + r, cy + k, cx + k, cy + r, cx, cy + r)
            .curve_to(cx - k, cy + r, cx - r, cy + k, cx - r, cy)
            .curve_to(cx - r, cy - k, cx - k, cy - r, cx, cy - r)
            .curve_to(cx + k, cy - r, cx + r, cy - k, cx + r, cy);
        self.paint_path(fill, stroke, line_width);
        self
    }

    /// Draw a pie wedge from `start_deg` to `end_deg`, counter-clockwise.
    ///
    /// A negative sweep is normalized into `[0, 360)`, so `270..0` covers
    /// the last quarter and `0..-400` covers 320 degrees. Each arc segment spans at most 90 degrees.
    #[allow(clippy::too_many_arguments)]
    pub fn wedge(
        &mut self,
        cx: f64,
        cy: f64,
        radius: f64,
        start_deg: f64,
        end_deg: f64,
        fill: Option<&str>,
        stroke: Option<&str>,
        line_width: f64,
    ) -> &mut Self {
        let center = Point::new(cx, cy);
        let start = start_deg.to_radians();
        let mut sweep = end_deg.to_radians() - start;
        if sweep < 0.0 {
            sweep = sweep.rem_euclid(TAU);
        }

        let start_point = Point::on_circle(center, radius, start);
        self.content
            .move_to(cx, cy)
            .line_to(start_point.x, start_point.y);

        let segments = (sweep / FRAC_PI_2).ceil() as usize;
        if segments > 0 {
            let step = sweep / segments as f64;
            let alpha = 4.0 / 3.0 * (step / 4.0).tan();
            for i in 0..segments {
                let a1 = start + i as f64 * step;
                let a2 = start + (i + 1) as f64 * step;
                let p1 = Point::on_circle(center, radius, a1);
                let p2 = Point::on_circle(center, radius, a2);
                self.content.curve_to(
                    p1.x - alpha * radius * a1.sin(),
                    p1.y + alpha * radius * a1.cos(),
                    p2.x + alpha * radius * a2.sin(),
                    p2.y - alpha * radius * a2.cos(),
                    p2.x,
                    p2.y,
                );
            }
        }
        self.content.close_path();
        self.paint_path(fill, stroke, line_width);
        self
    }

    /// Set colors for the current path and paint it with whatever parsed.
    fn paint_path(&mut self, fill: Option<&str>, stroke: Option<&str>, line_width: f64) {
        let fill = fill.and_then(Color::parse_hex);
        let stroke = stroke.and_then(Color::parse_hex);
        if let Some(color) = fill {
            self.content.fill_color(color);
        }
        if let Some(color) = stroke {
            self.content.set_line_width(line_width).stroke_color(color);
        }
        match (fill, stroke) {
            (Some(_), Some(_)) => self.content.fill_stroke(),
            (Some(_), None) => self.content.fill(),
            (None, Some(_)) => self.content.stroke(),
            (None, None) => self.content.end_path(),
        };
    }

    /// Place a JPEG image scaled into the `w` x `h` box at (`x`, `y`).
    ///
    /// Every call embeds a new image XObject named `Im0`, `Im1`, ... within
    /// the page.
    pub fn image(&mut self, jpeg: impl Into<Bytes>, x: f64, y: f64, w: f64, h: f64) -> &mut Self {
        let image = ImageData::from_jpeg(jpeg);
        let name = format!("Im{}", self.images.len());
        let image_ref = self
            .writer
            .alloc_object(image.build_xobject_dict(), Some(image.data));
        self.images.push((name.clone(), image_ref));

        self.content
            .save_state()
            .transform(w, 0.0, 0.0, h, x, y)
            .paint_xobject(&name)
            .restore_state();
        self
    }

    /// Make the `w` x `h` box at (`x`, `y`) open `url`, optionally underlined
    /// 2pt above its bottom edge.
    pub fn link(
        &mut self,
        url: &str,
        x: f64,
        y: f64,
        w: f64,
        h: f64,
        opts: &LinkOptions,
    ) -> &mut Self {
        self.links.push(LinkAnnotation::uri(Rect::new(x, y, w, h), url));
        if let Some(color) = opts.underline.as_deref().and_then(Color::parse_hex) {
            self.content
                .set_line_width(0.75)
                .stroke_color(color)
                .move_to(x, y + 2.0)
                .line_to(x + w, y + 2.0)
                .stroke();
        }
        self
    }

    /// Measure `text` in `font` at `size`.
    pub fn measure_text(&self, text: &str, size: f64, font: Font) -> f64 {
        measure_text(text, size, font)
    }
}
