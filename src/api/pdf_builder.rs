//! High-level PDF builder and document type.
//!
//! Provides `markdown` for one-shot conversion, `Pdf` for simple operations
//! and `PdfBuilder` for customized creation.

use crate::error::Result;
use crate::layout::{draw_item, paginate, parse_blocks};
use crate::writer::{PageSize, PdfWriter, PdfWriterConfig};
use log::debug;

/// Page geometry and output settings for markdown conversion.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkdownOptions {
    /// Page width in points
    pub width: f64,
    /// Page height in points
    pub height: f64,
    /// Margin on all four sides in points
    pub margin: f64,
    /// Deflate content streams
    pub compress: bool,
}

impl Default for MarkdownOptions {
    fn default() -> Self {
        let (width, height) = PageSize::Letter.dimensions();
        Self {
            width,
            height,
            margin: 72.0, // 1 inch
            compress: true,
        }
    }
}

impl MarkdownOptions {
    /// Create default options (US Letter, 1 inch margins, compressed).
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the page size.
    pub fn with_page_size(mut self, size: PageSize) -> Self {
        let (width, height) = size.dimensions();
        self.width = width;
        self.height = height;
        self
    }

    /// Set the margin.
    pub fn with_margin(mut self, margin: f64) -> Self {
        self.margin = margin;
        self
    }

    /// Enable or disable stream compression.
    pub fn with_compress(mut self, compress: bool) -> Self {
        self.compress = compress;
        self
    }

    /// Width available to text between the side margins.
    pub fn text_width(&self) -> f64 {
        self.width - 2.0 * self.margin
    }
}

/// Convert markdown to a complete PDF document.
///
/// Supports `#` to `###` headings, `-`/`*` bullets, `1.` ordered items,
/// horizontal rules and paragraphs, with inline `` `code` ``, `**bold**`
/// and `_italic_` runs. Empty input produces a valid document with no
/// pages.
///
/// # Example
///
/// ```
/// use tinypdf::api::{markdown, MarkdownOptions};
///
/// let bytes = markdown("# Hello\n\nThis is **bold** text.", &MarkdownOptions::default())?;
/// assert!(bytes.starts_with(b"%PDF-1.4"));
/// # Ok::<(), tinypdf::Error>(())
/// ```
pub fn markdown(text: &str, opts: &MarkdownOptions) -> Result<Vec<u8>> {
    render(text, opts, PdfWriterConfig::default())
}

fn render(text: &str, opts: &MarkdownOptions, config: PdfWriterConfig) -> Result<Vec<u8>> {
    let items = parse_blocks(text, opts.text_width());
    let pages = paginate(&items, opts.height, opts.margin);
    debug!(
        "Markdown laid out: {} items on {} pages ({}x{} pt, margin {})",
        items.len(),
        pages.len(),
        opts.width,
        opts.height,
        opts.margin
    );

    let mut writer = PdfWriter::with_config(config.with_compress(opts.compress));
    for page in &pages {
        writer.page(opts.width, opts.height, |ctx| {
            for placed in page {
                draw_item(ctx, placed.item, opts.margin, opts.width, placed.y);
            }
        })?;
    }
    writer.build()
}

/// A generated PDF document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pdf {
    /// The underlying PDF bytes
    bytes: Vec<u8>,
}

impl Pdf {
    /// Create a PDF from Markdown content with default options.
    ///
    /// # Example
    ///
    /// ```
    /// use tinypdf::api::Pdf;
    ///
    /// let pdf = Pdf::from_markdown("# Hello World\n\n- one\n- two")?;
    /// assert!(pdf.as_bytes().ends_with(b"%%EOF\n"));
    /// # Ok::<(), tinypdf::Error>(())
    /// ```
    pub fn from_markdown(content: &str) -> Result<Self> {
        PdfBuilder::new().from_markdown(content)
    }

    /// Get the PDF bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Convert to PDF bytes, consuming the Pdf.
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

/// Builder for creating PDFs with custom configuration.
///
/// # Example
///
/// ```
/// use tinypdf::api::PdfBuilder;
/// use tinypdf::writer::PageSize;
///
/// let pdf = PdfBuilder::new()
///     .title("My Document")
///     .author("Jane Roe")
///     .page_size(PageSize::A4)
///     .margin(50.0)
///     .from_markdown("# Content")?;
/// assert!(pdf.as_bytes().starts_with(b"%PDF-1.4"));
/// # Ok::<(), tinypdf::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct PdfBuilder {
    options: MarkdownOptions,
    config: PdfWriterConfig,
}

impl PdfBuilder {
    /// Create a new PDF builder with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the document title.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.config = self.config.with_title(title);
        self
    }

    /// Set the document author.
    pub fn author(mut self, author: impl Into<String>) -> Self {
        self.config = self.config.with_author(author);
        self
    }

    /// Set the document subject.
    pub fn subject(mut self, subject: impl Into<String>) -> Self {
        self.config = self.config.with_subject(subject);
        self
    }

    /// Set the document keywords.
    pub fn keywords(mut self, keywords: impl Into<String>) -> Self {
        self.config = self.config.with_keywords(keywords);
        self
    }

    /// Set the page size.
    pub fn page_size(mut self, size: PageSize) -> Self {
        self.options = self.options.with_page_size(size);
        self
    }

    /// Set the margin on all sides.
    pub fn margin(mut self, margin: f64) -> Self {
        self.options.margin = margin;
        self
    }

    /// Enable or disable stream compression.
    pub fn compress(mut self, compress: bool) -> Self {
        self.options.compress = compress;
        self
    }

    /// Markdown options this builder will use.
    pub fn options(&self) -> &MarkdownOptions {
        &self.options
    }

    /// Build a PDF from Markdown content.
    pub fn from_markdown(self, content: &str) -> Result<Pdf> {
        let bytes = render(content, &self.options, self.config)?;
        Ok(Pdf { bytes })
    }
}
