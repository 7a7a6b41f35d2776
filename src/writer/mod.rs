//! PDF writing module for generating PDF files.
//!
//! ## Architecture
//!
//! ```text
//! draw closure
//!     ↓
//! [PageContext] (text, shapes, images, links)
//!     ↓
//! [ContentStreamBuilder] (operators → content stream bytes)
//!     ↓
//! [PdfWriter] (object table, fonts, pages tree, finalization)
//!     ↓
//! [ObjectSerializer] (serializes PDF objects) + [PooledBuffer] (output sink)
//!     ↓
//! PDF bytes
//! ```
//!
//! ## Example
//!
//! ```
//! use tinypdf::writer::{Font, LinkOptions, PdfWriter, TextAlign, TextOptions};
//!
//! let mut writer = PdfWriter::new();
//! writer.page(612.0, 792.0, |ctx| {
//!     let title = TextOptions::new()
//!         .with_align(TextAlign::Center)
//!         .with_width(468.0)
//!         .with_font(Font::Times);
//!     ctx.text("Quarterly Report", 72.0, 720.0, 24.0, &title)
//!         .rect(72.0, 700.0, 468.0, 2.0, "#336699")
//!         .link("https://example.com", 72.0, 680.0, 120.0, 12.0,
//!               &LinkOptions::new().with_underline("#0000ff"));
//! })?;
//! let bytes = writer.build()?;
//! assert!(bytes.ends_with(b"%%EOF\n"));
//! # Ok::<(), tinypdf::Error>(())
//! ```

mod annotation_builder;
mod color;
mod content_stream;
mod font_manager;
mod image_handler;
mod object_serializer;
mod page_context;
mod pdf_writer;
mod pooled_buffer;

pub use annotation_builder::LinkAnnotation;
pub use color::Color;
pub use content_stream::{ContentStreamBuilder, ContentStreamOp};
pub use font_manager::{measure_text, Font, TextLayout, WrappedLine, FALLBACK_WIDTH, LINE_SPACING};
pub use image_handler::{parse_jpeg_header, ImageData};
pub use object_serializer::{escape_text, ObjectSerializer};
pub use page_context::{LinkOptions, PageContext, TextAlign, TextOptions, BEZIER_CIRCLE_K};
pub use pdf_writer::{PageSize, PdfWriter, PdfWriterConfig};
pub use pooled_buffer::{BlockPool, PooledBuffer, DEFAULT_BLOCK_SIZE};
