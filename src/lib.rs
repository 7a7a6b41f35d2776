// Allow some clippy lints that are too pedantic for this project
#![allow(clippy::too_many_arguments)]
#![allow(clippy::wrong_self_convention)]
#![allow(clippy::should_implement_trait)]

//! # TinyPdf
//!
//! Small, dependency-light PDF 1.4 generator.
//!
//! ## Core Features
//!
//! - **Drawing API**: text with alignment and wrapping, rectangles, lines,
//!   circles, pie wedges, JPEG images and URI links through a per-page
//!   [`PageContext`](writer::PageContext)
//! - **Base-14 Fonts**: Helvetica, Times-Roman and Courier with built-in
//!   width tables; nothing is embedded
//! - **Markdown → PDF**: headings, lists, rules and paragraphs with inline
//!   `code`, **bold** and _italic_, paginated automatically
//! - **Compact Output**: deflate-compressed content streams, exact
//!   cross-reference offsets, pooled output buffers
//!
//! ## Architecture
//!
//! ```text
//! markdown text ─→ [layout] parse → paginate → draw_item
//!                                                  ↓
//! draw closure ──────────────────────────→ [writer::PageContext]
//!                                                  ↓
//!                     [writer::PdfWriter] object table → build() → bytes
//! ```
//!
//! ## Quick Start
//!
//! ```
//! use tinypdf::writer::{PdfWriter, TextOptions};
//!
//! let mut pdf = PdfWriter::new();
//! pdf.letter_page(|ctx| {
//!     ctx.text("Hello World", 50.0, 700.0, 24.0, &TextOptions::default());
//! })?;
//! let bytes = pdf.build()?;
//! assert!(bytes.starts_with(b"%PDF-1.4"));
//! # Ok::<(), tinypdf::Error>(())
//! ```
//!
//! ```
//! use tinypdf::{markdown, MarkdownOptions};
//!
//! let bytes = markdown("# Report\n\n- first\n- second", &MarkdownOptions::default())?;
//! # Ok::<(), tinypdf::Error>(())
//! ```

#![warn(missing_docs)]

// Error handling
pub mod error;

// Core PDF objects
pub mod object;

// Points and rectangles in user space
pub mod geometry;

// PDF writing/creation
pub mod writer;

// Markdown layout
pub mod layout;

// High-level API
pub mod api;

// Re-exports
pub use api::{markdown, MarkdownOptions, Pdf, PdfBuilder};
pub use error::{Error, Result};
pub use object::{Dictionary, Object, ObjectRef};
pub use writer::{Font, PageContext, PageSize, PdfWriter, PdfWriterConfig, TextAlign, TextOptions};
