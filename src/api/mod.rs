//! High-level PDF API for simple document creation.
//!
//! ## Quick Start
//!
//! ```
//! use tinypdf::api::Pdf;
//!
//! let pdf = Pdf::from_markdown("# Hello World\n\nThis is a PDF.")?;
//! assert!(pdf.as_bytes().starts_with(b"%PDF-"));
//! # Ok::<(), tinypdf::Error>(())
//! ```
//!
//! ## Builder Pattern
//!
//! For more control, use the `PdfBuilder`:
//!
//! ```
//! use tinypdf::api::PdfBuilder;
//! use tinypdf::writer::PageSize;
//!
//! let pdf = PdfBuilder::new()
//!     .title("My Document")
//!     .page_size(PageSize::Legal)
//!     .margin(54.0)
//!     .compress(false)
//!     .from_markdown("# Content")?;
//! # Ok::<(), tinypdf::Error>(())
//! ```

mod pdf_builder;

pub use pdf_builder::{markdown, MarkdownOptions, Pdf, PdfBuilder};
