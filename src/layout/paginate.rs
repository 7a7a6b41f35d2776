//! Vertical placement of laid-out items onto fixed-size pages.

use super::markdown::MarkdownItem;

/// An item with its baseline position on the page.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedItem<'i, 'a> {
    /// The laid-out item
    pub item: &'i MarkdownItem<'a>,
    /// Baseline, in points from the page bottom
    pub y: f64,
}

/// Flow `items` top-down between the margins of pages `page_height` tall.
///
/// An item moves to a fresh page when its full height (space before, size
/// and space after) would cross the bottom margin. An item taller than the
/// usable area still lands on the current page if that page is empty, so
/// pagination always terminates. Empty input yields no pages.
pub fn paginate<'i, 'a>(
    items: &'i [MarkdownItem<'a>],
    page_height: f64,
    margin: f64,
) -> Vec<Vec<PlacedItem<'i, 'a>>> {
    let top = page_height - margin;
    let mut pages = Vec::new();
    let mut current: Vec<PlacedItem<'i, 'a>> = Vec::new();
    let mut y = top;

    for item in items {
        if y - item.height() < margin && !current.is_empty() {
            pages.push(std::mem::take(&mut current));
            y = top;
        }
        y -= item.space_before;
        current.push(PlacedItem { item, y });
        y -= item.size + item.space_after;
    }
    if !current.is_empty() {
        pages.push(current);
    }
    pages
}
