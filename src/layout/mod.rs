//! Markdown layout engine.
//!
//! Turns markdown text into positioned, styled lines in three passes:
//! - [`parse_blocks`]: classify each source line and word-wrap it into
//!   [`MarkdownItem`]s
//! - [`paginate`]: assign each item a baseline and split items into pages
//! - [`draw_item`]: render an item through a [`PageContext`](crate::writer::PageContext),
//!   applying inline `code`, **bold** and _italic_ runs

pub mod inline;
pub mod markdown;
pub mod paginate;

// Re-export main types
pub use inline::{draw_item, scan_inline, InlineSpan, SpanStyle, BOLD_SCALE};
pub use markdown::{parse_blocks, MarkdownItem, BODY_SIZE, HEADING_SIZES, LIST_INDENT, TEXT_COLOR};
pub use paginate::{paginate, PlacedItem};
