//! PDF document writer.
//!
//! Assembles complete PDF documents with proper structure:
//! header, body, xref table, and trailer.
//!
//! Object ids are handed out in creation order starting at 1. Pages are
//! created through [`PdfWriter::page`], which runs a drawing closure against a
//! fresh [`PageContext`]. Page objects reference the Pages tree and the three
//! base fonts, neither of which exists until [`PdfWriter::build`]; those
//! references are resolved when the document is finalized.

use super::content_stream::fixed;
use super::font_manager::{measure_text, Font};
use super::object_serializer::ObjectSerializer;
use super::page_context::{PageContext, PageOutput};
use super::pooled_buffer::{BlockPool, PooledBuffer};
use crate::error::{Error, Result};
use crate::object::{Dictionary, IndirectObject, Object, ObjectRef};
use bytes::Bytes;
use log::{debug, trace};
use std::io::Write;
use std::sync::Arc;

/// Configuration for PDF generation.
#[derive(Debug, Clone)]
pub struct PdfWriterConfig {
    /// Whether to deflate content streams
    pub compress: bool,
    /// Document title
    pub title: Option<String>,
    /// Document author
    pub author: Option<String>,
    /// Document subject
    pub subject: Option<String>,
    /// Document keywords
    pub keywords: Option<String>,
    /// Creator application
    pub creator: Option<String>,
    /// Producer application
    pub producer: Option<String>,
}

impl Default for PdfWriterConfig {
    fn default() -> Self {
        Self {
            compress: true,
            title: None,
            author: None,
            subject: None,
            keywords: None,
            creator: None,
            producer: None,
        }
    }
}

impl PdfWriterConfig {
    /// Set document title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set document author.
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    /// Set document subject.
    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    /// Set document keywords.
    pub fn with_keywords(mut self, keywords: impl Into<String>) -> Self {
        self.keywords = Some(keywords.into());
        self
    }

    /// Set creator application.
    pub fn with_creator(mut self, creator: impl Into<String>) -> Self {
        self.creator = Some(creator.into());
        self
    }

    /// Set producer application.
    pub fn with_producer(mut self, producer: impl Into<String>) -> Self {
        self.producer = Some(producer.into());
        self
    }

    /// Enable or disable stream compression.
    ///
    /// When enabled, content streams are compressed with zlib/deflate and
    /// marked `/FlateDecode`. Streams that already declare a filter (JPEG
    /// images) are written unchanged.
    pub fn with_compress(mut self, compress: bool) -> Self {
        self.compress = compress;
        self
    }

    fn info_entries(&self) -> Vec<(&'static str, &str)> {
        [
            ("Title", &self.title),
            ("Author", &self.author),
            ("Subject", &self.subject),
            ("Keywords", &self.keywords),
            ("Creator", &self.creator),
            ("Producer", &self.producer),
        ]
        .into_iter()
        .filter_map(|(key, value)| value.as_deref().map(|v| (key, v)))
        .collect()
    }
}

/// Standard page sizes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PageSize {
    /// US Letter (8.5" x 11")
    Letter,
    /// A4 (210mm x 297mm)
    A4,
    /// Legal (8.5" x 14")
    Legal,
    /// A3 (297mm x 420mm)
    A3,
    /// Custom dimensions in points
    Custom(f64, f64),
}

impl PageSize {
    /// Get dimensions in points (1 inch = 72 points).
    pub fn dimensions(&self) -> (f64, f64) {
        match self {
            PageSize::Letter => (612.0, 792.0),
            PageSize::A4 => (595.0, 842.0),
            PageSize::Legal => (612.0, 1008.0),
            PageSize::A3 => (842.0, 1190.0),
            PageSize::Custom(w, h) => (*w, *h),
        }
    }
}

/// Compress data into a pooled buffer using zlib/deflate.
fn compress_into(data: &[u8], sink: &mut PooledBuffer) -> std::io::Result<()> {
    use flate2::write::ZlibEncoder;
    use flate2::Compression;

    let mut encoder = ZlibEncoder::new(sink, Compression::default());
    encoder.write_all(data)?;
    encoder.finish()?;
    Ok(())
}

/// A page object whose Parent and font slots are filled in at finalization.
#[derive(Debug)]
struct PendingPage {
    id: u32,
    width: f64,
    height: f64,
    contents: ObjectRef,
    xobjects: Vec<(String, ObjectRef)>,
    annots: Vec<ObjectRef>,
}

impl PendingPage {
    fn resolve(&self, finalized: &Finalized) -> Dictionary {
        let mut resources = ObjectSerializer::dictionary(vec![(
            "Font",
            Object::Dictionary(finalized.fonts.clone()),
        )]);
        if !self.xobjects.is_empty() {
            let xobjects: Dictionary = self
                .xobjects
                .iter()
                .map(|(name, r)| (name.clone(), Object::Reference(*r)))
                .collect();
            resources.insert("XObject".to_string(), Object::Dictionary(xobjects));
        }

        let mut dict = ObjectSerializer::dictionary(vec![
            ("Type", ObjectSerializer::name("Page")),
            ("Parent", ObjectSerializer::reference(finalized.pages)),
            ("MediaBox", ObjectSerializer::rect(0.0, 0.0, self.width, self.height)),
            ("Contents", ObjectSerializer::reference(self.contents)),
            ("Resources", Object::Dictionary(resources)),
        ]);
        if !self.annots.is_empty() {
            dict.insert(
                "Annots".to_string(),
                Object::Array(self.annots.iter().map(|r| Object::Reference(*r)).collect()),
            );
        }
        dict
    }
}

/// Slot in the object table.
#[derive(Debug)]
enum Slot {
    Ready(IndirectObject),
    Page(PendingPage),
}

/// Objects appended by the first `build()`.
#[derive(Debug)]
struct Finalized {
    pages: ObjectRef,
    root: ObjectRef,
    info: Option<ObjectRef>,
    /// Font resource dictionary shared by every page (`F1`..`F3`)
    fonts: Dictionary,
}

/// PDF document writer.
///
/// Builds a complete PDF document with pages, fonts, and content. One writer
/// owns its object table; it is not meant to be shared between threads while
/// pages are being added.
///
/// ```
/// use tinypdf::writer::{PdfWriter, TextOptions};
///
/// let mut writer = PdfWriter::new();
/// writer
///     .letter_page(|ctx| {
///         ctx.text("Hello World", 50.0, 700.0, 12.0, &TextOptions::default());
///     })
///     .unwrap();
/// let bytes = writer.build().unwrap();
/// assert!(bytes.starts_with(b"%PDF-1.4"));
/// ```
#[derive(Debug)]
pub struct PdfWriter {
    config: PdfWriterConfig,
    /// Object table, index = id - 1
    objects: Vec<Slot>,
    /// Page references in creation order
    pages: Vec<ObjectRef>,
    finalized: Option<Finalized>,
    pool: Arc<BlockPool>,
}

impl PdfWriter {
    /// Create a new PDF writer with default config.
    pub fn new() -> Self {
        Self::with_config(PdfWriterConfig::default())
    }

    /// Create a PDF writer with custom config.
    pub fn with_config(config: PdfWriterConfig) -> Self {
        Self {
            config,
            objects: Vec::new(),
            pages: Vec::new(),
            finalized: None,
            pool: BlockPool::shared(),
        }
    }

    /// Use `pool` for staging compressed streams and the output.
    pub fn with_pool(mut self, pool: Arc<BlockPool>) -> Self {
        self.pool = pool;
        self
    }

    /// Current configuration.
    pub fn config(&self) -> &PdfWriterConfig {
        &self.config
    }

    /// Enable or disable stream compression for subsequent builds.
    pub fn set_compress(&mut self, compress: bool) {
        self.config.compress = compress;
    }

    /// Number of pages added so far.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Number of objects allocated so far.
    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    /// Whether `build()` has finalized the object graph.
    pub fn is_finalized(&self) -> bool {
        self.finalized.is_some()
    }

    /// Allocate a new object ID.
    fn alloc_obj_id(&self) -> u32 {
        self.objects.len() as u32 + 1
    }

    pub(crate) fn alloc_object(&mut self, dict: Dictionary, stream: Option<Bytes>) -> ObjectRef {
        let id = self.alloc_obj_id();
        trace!("alloc object {} ({} keys, stream: {})", id, dict.len(), stream.is_some());
        self.objects.push(Slot::Ready(IndirectObject::new(id, dict, stream)));
        ObjectRef::new(id)
    }

    fn ensure_open(&self) -> Result<()> {
        if self.finalized.is_some() {
            return Err(Error::DocumentFinalized);
        }
        Ok(())
    }

    /// Add a custom object and return its reference.
    ///
    /// `Length` is added when the object is written; do not set it.
    pub fn add_object(&mut self, dict: Dictionary, stream: Option<Bytes>) -> Result<ObjectRef> {
        self.ensure_open()?;
        Ok(self.alloc_object(dict, stream))
    }

    /// Add a page of the given size, drawn by `draw`.
    ///
    /// `draw` runs exactly once before this returns. Its content stream is
    /// stored first, then its link annotations, then the page object itself.
    pub fn page<F>(&mut self, width: f64, height: f64, draw: F) -> Result<ObjectRef>
    where
        F: FnOnce(&mut PageContext<'_>),
    {
        self.ensure_open()?;

        let PageOutput {
            content,
            images,
            links,
        } = {
            let mut ctx = PageContext::new(self);
            draw(&mut ctx);
            ctx.finish()
        };

        let content_len = content.len();
        let contents = self.alloc_object(Dictionary::new(), Some(Bytes::from(content)));
        let annots: Vec<ObjectRef> = links
            .iter()
            .map(|link| self.alloc_object(link.build(), None))
            .collect();

        let id = self.alloc_obj_id();
        self.objects.push(Slot::Page(PendingPage {
            id,
            width,
            height,
            contents,
            xobjects: images,
            annots,
        }));
        let page_ref = ObjectRef::new(id);
        self.pages.push(page_ref);

        debug!(
            "page {} ({}x{}): object {}, {} content bytes",
            self.pages.len(),
            fixed(width, 2),
            fixed(height, 2),
            id,
            content_len
        );
        Ok(page_ref)
    }

    /// Add a US Letter page (612 x 792).
    pub fn letter_page<F>(&mut self, draw: F) -> Result<ObjectRef>
    where
        F: FnOnce(&mut PageContext<'_>),
    {
        self.page_sized(PageSize::Letter, draw)
    }

    /// Add a page of a standard size.
    pub fn page_sized<F>(&mut self, size: PageSize, draw: F) -> Result<ObjectRef>
    where
        F: FnOnce(&mut PageContext<'_>),
    {
        let (width, height) = size.dimensions();
        self.page(width, height, draw)
    }

    /// Measure `text` in `font` at `size`.
    pub fn measure_text(&self, text: &str, size: f64, font: Font) -> f64 {
        measure_text(text, size, font)
    }

    /// Append fonts, the Pages tree, the Catalog and optional Info.
    fn finalize(&mut self) -> Finalized {
        let fonts: Dictionary = Font::ALL
            .iter()
            .map(|font| {
                let font_ref = self.alloc_object(
                    ObjectSerializer::dictionary(vec![
                        ("Type", ObjectSerializer::name("Font")),
                        ("Subtype", ObjectSerializer::name("Type1")),
                        ("BaseFont", ObjectSerializer::name(font.base_font())),
                    ]),
                    None,
                );
                (font.resource_name().to_string(), Object::Reference(font_ref))
            })
            .collect();

        let kids = self.pages.iter().map(|r| Object::Reference(*r)).collect();
        let pages = self.alloc_object(
            ObjectSerializer::dictionary(vec![
                ("Type", ObjectSerializer::name("Pages")),
                ("Kids", Object::Array(kids)),
                ("Count", Object::from(self.pages.len())),
            ]),
            None,
        );

        let root = self.alloc_object(
            ObjectSerializer::dictionary(vec![
                ("Type", ObjectSerializer::name("Catalog")),
                ("Pages", ObjectSerializer::reference(pages)),
            ]),
            None,
        );

        let info_entries: Vec<(&str, Object)> = self
            .config
            .info_entries()
            .into_iter()
            .map(|(key, value)| (key, ObjectSerializer::string(value)))
            .collect();
        let info = if info_entries.is_empty() {
            None
        } else {
            Some(self.alloc_object(ObjectSerializer::dictionary(info_entries), None))
        };

        debug!(
            "finalized document: {} pages, {} objects",
            self.pages.len(),
            self.objects.len()
        );
        Finalized {
            pages,
            root,
            info,
            fonts,
        }
    }

    /// Build the complete PDF document.
    ///
    /// The first call finalizes the object graph; after that no pages or
    /// objects can be added. Later calls write the same objects again,
    /// honouring the current compression setting.
    pub fn build(&mut self) -> Result<Vec<u8>> {
        let finalized = match self.finalized.take() {
            Some(finalized) => finalized,
            None => self.finalize(),
        };
        let result = self.write_document(&finalized);
        self.finalized = Some(finalized);
        result
    }

    fn write_document(&self, finalized: &Finalized) -> Result<Vec<u8>> {
        let serializer = ObjectSerializer::new();
        let mut output = PooledBuffer::with_pool(Arc::clone(&self.pool));
        let mut xref_offsets: Vec<usize> = Vec::with_capacity(self.objects.len());

        // PDF Header
        output.write_all(b"%PDF-1.4\n")?;
        // Binary marker (recommended for binary content)
        output.write_all(b"%\xE2\xE3\xCF\xD3\n")?;

        for slot in &self.objects {
            xref_offsets.push(output.len());
            match slot {
                Slot::Page(page) => {
                    serializer.write_indirect(&mut output, page.id, &page.resolve(finalized))?;
                },
                Slot::Ready(obj) => match &obj.stream {
                    None => serializer.write_indirect(&mut output, obj.id, &obj.dict)?,
                    Some(data) => self.write_stream(&serializer, &mut output, obj, data)?,
                },
            }
        }

        // Write xref table
        let xref_start = output.len();
        writeln!(output, "xref")?;
        writeln!(output, "0 {}", self.objects.len() + 1)?;
        // Object 0 is always free
        writeln!(output, "0000000000 65535 f ")?;
        for offset in &xref_offsets {
            writeln!(output, "{:010} 00000 n ", offset)?;
        }

        // Write trailer
        let mut trailer = ObjectSerializer::dictionary(vec![
            ("Size", Object::from(self.objects.len() + 1)),
            ("Root", ObjectSerializer::reference(finalized.root)),
        ]);
        if let Some(info) = finalized.info {
            trailer.insert("Info".to_string(), ObjectSerializer::reference(info));
        }
        writeln!(output, "trailer")?;
        serializer.write_object(&mut output, &Object::Dictionary(trailer))?;
        writeln!(output)?;
        writeln!(output, "startxref")?;
        writeln!(output, "{}", xref_start)?;
        writeln!(output, "%%EOF")?;

        debug!(
            "wrote {} bytes ({} objects, compress: {})",
            output.len(),
            self.objects.len(),
            self.config.compress
        );
        Ok(output.to_vec())
    }

    fn write_stream(
        &self,
        serializer: &ObjectSerializer,
        output: &mut PooledBuffer,
        obj: &IndirectObject,
        data: &Bytes,
    ) -> Result<()> {
        if !self.config.compress || obj.dict.contains_key("Filter") {
            serializer.write_stream_object(output, obj.id, &obj.dict, None, &[&data[..]])?;
            return Ok(());
        }

        let mut staged = PooledBuffer::with_pool(Arc::clone(&self.pool));
        compress_into(data, &mut staged).map_err(|e| Error::Compression {
            id: obj.id,
            reason: e.to_string(),
        })?;
        trace!("object {}: deflated {} -> {} bytes", obj.id, data.len(), staged.len());

        let chunks: Vec<&[u8]> = staged.chunks().collect();
        serializer.write_stream_object(output, obj.id, &obj.dict, Some("FlateDecode"), &chunks)?;
        Ok(())
    }
}

impl Default for PdfWriter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::writer::TextOptions;

    fn uncompressed() -> PdfWriter {
        PdfWriter::with_config(PdfWriterConfig::default().with_compress(false))
    }

    fn as_text(bytes: &[u8]) -> String {
        String::from_utf8_lossy(bytes).to_string()
    }

    #[test]
    fn test_create_empty_pdf() {
        let mut writer = PdfWriter::new();
        let bytes = writer.build().unwrap();

        let content = as_text(&bytes);
        assert!(content.starts_with("%PDF-1.4\n"));
        assert!(content.contains("/Type /Catalog"));
        assert!(content.contains("/Type /Pages\n/Kids []\n/Count 0"));
        assert!(!content.contains("/Type /Page\n"));
        assert!(content.ends_with("%%EOF\n"));
    }

    #[test]
    fn test_pdf_with_text() {
        let mut writer = uncompressed();
        writer
            .letter_page(|ctx| {
                ctx.text("Hello World", 50.0, 700.0, 12.0, &TextOptions::default());
            })
            .unwrap();

        let content = as_text(&writer.build().unwrap());
        assert!(content.contains("/MediaBox [0 0 612 792]"));
        assert!(content.contains("/BaseFont /Helvetica"));
        assert!(content.contains("/BaseFont /Times-Roman"));
        assert!(content.contains("/BaseFont /Courier"));
        assert!(content.contains("/F1 12.00 Tf"));
        assert!(content.contains("(Hello World) Tj"));
        assert!(content.contains("xref"));
        assert!(content.contains("trailer"));
    }

    #[test]
    fn test_object_order() {
        let mut writer = uncompressed();
        let page = writer.letter_page(|_| {}).unwrap();
        // content stream is 1, page is 2
        assert_eq!(page, ObjectRef::new(2));

        let content = as_text(&writer.build().unwrap());
        assert!(content.contains("3 0 obj\n<<\n/Type /Font\n/Subtype /Type1\n/BaseFont /Helvetica\n>>"));
        assert!(content.contains("6 0 obj\n<<\n/Type /Pages\n/Kids [2 0 R]\n/Count 1\n>>"));
        assert!(content.contains("7 0 obj\n<<\n/Type /Catalog\n/Pages 6 0 R\n>>"));
        assert!(content.contains("/Parent 6 0 R"));
        assert!(content.contains("/Font <<\n/F1 3 0 R\n/F2 4 0 R\n/F3 5 0 R\n>>"));
        assert!(content.contains("trailer\n<<\n/Size 8\n/Root 7 0 R\n>>\nstartxref\n"));
        assert!(content.contains("xref\n0 8\n0000000000 65535 f \n"));
    }

    #[test]
    fn test_pdf_with_metadata() {
        let config = PdfWriterConfig::default()
            .with_title("Test Document")
            .with_author("Test Author");

        let mut writer = PdfWriter::with_config(config);
        writer.letter_page(|_| {}).unwrap();

        let content = as_text(&writer.build().unwrap());
        assert!(content.contains("/Title (Test Document)"));
        assert!(content.contains("/Author (Test Author)"));
        assert!(content.contains("/Info 8 0 R"));
    }

    #[test]
    fn test_no_info_without_metadata() {
        let mut writer = PdfWriter::new();
        let content = as_text(&writer.build().unwrap());
        assert!(!content.contains("/Info"));
    }

    #[test]
    fn test_multiple_pages() {
        let mut writer = uncompressed();
        writer.letter_page(|_| {}).unwrap();
        writer.page_sized(PageSize::A4, |_| {}).unwrap();
        writer.page(400.0, 600.0, |_| {}).unwrap();
        assert_eq!(writer.page_count(), 3);

        let content = as_text(&writer.build().unwrap());
        assert!(content.contains("/Count 3"));
        assert!(content.contains("[0 0 612 792]"));
        assert!(content.contains("[0 0 595 842]"));
        assert!(content.contains("/MediaBox [0 0 400 600]"));
    }

    #[test]
    fn test_build_is_repeatable() {
        let mut writer = uncompressed();
        writer.letter_page(|ctx| {
            ctx.rect(0.0, 0.0, 10.0, 10.0, "#000");
        })
        .unwrap();
        let first = writer.build().unwrap();
        let objects = writer.object_count();
        let second = writer.build().unwrap();
        assert_eq!(first, second);
        assert_eq!(writer.object_count(), objects);
    }

    #[test]
    fn test_mutation_after_build_fails() {
        let mut writer = PdfWriter::new();
        writer.build().unwrap();
        assert!(writer.is_finalized());
        assert!(matches!(writer.letter_page(|_| {}), Err(Error::DocumentFinalized)));
        assert!(matches!(
            writer.add_object(Dictionary::new(), None),
            Err(Error::DocumentFinalized)
        ));
    }

    #[test]
    fn test_compression_toggle() {
        let mut writer = PdfWriter::new();
        writer
            .letter_page(|ctx| {
                for i in 0..100 {
                    let y = 700.0 - i as f64;
                    ctx.text("The quick brown fox", 72.0, y, 12.0, &TextOptions::default());
                }
            })
            .unwrap();

        let compressed = writer.build().unwrap();
        writer.set_compress(false);
        let plain = writer.build().unwrap();

        assert!(as_text(&compressed).contains("/Filter /FlateDecode"));
        assert!(!as_text(&plain).contains("/FlateDecode"));
        assert!(compressed.len() < plain.len());
    }

    #[test]
    fn test_add_custom_object() {
        let mut writer = uncompressed();
        let custom = writer
            .add_object(
                ObjectSerializer::dictionary(vec![("Type", ObjectSerializer::name("Custom"))]),
                Some(Bytes::from_static(b"payload")),
            )
            .unwrap();
        assert_eq!(custom, ObjectRef::new(1));

        let content = as_text(&writer.build().unwrap());
        assert!(content.contains("1 0 obj\n<<\n/Type /Custom\n/Length 7\n>>\nstream\npayload\nendstream\nendobj\n"));
    }

    #[test]
    fn test_jpeg_stream_not_recompressed() {
        let jpeg = vec![0xFF, 0xD8, 0xFF, 0xC0, 0x00, 0x11, 0x08, 0x00, 0x10, 0x00, 0x20, 0xFF, 0xD9];
        let mut writer = PdfWriter::new();
        writer
            .letter_page(|ctx| {
                ctx.image(jpeg.clone(), 0.0, 0.0, 32.0, 16.0);
            })
            .unwrap();
        let bytes = writer.build().unwrap();
        let content = as_text(&bytes);
        assert!(content.contains("/Filter /DCTDecode\n/Length 13\n"));
        assert!(bytes.windows(jpeg.len()).any(|w| w == &jpeg[..]));
    }

    #[test]
    fn test_measure_text_delegates() {
        let writer = PdfWriter::new();
        assert!((writer.measure_text("Hello World", 12.0, Font::Helvetica) - 62.004).abs() < 1e-9);
    }
}
