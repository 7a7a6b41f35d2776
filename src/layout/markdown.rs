//! Line-oriented parser for a small markdown subset.
//!
//! Each source line is classified on its own, in priority order: ATX heading
//! (`#` to `###`), bullet item (`-`/`*`), ordered item (`1.`), horizontal
//! rule, blank line, paragraph. There is no cross-line state beyond the kind
//! of the previous block, which decides heading spacing and blank-line
//! collapsing. Block text is word-wrapped here, so one source line can
//! produce several [`MarkdownItem`]s.

use crate::writer::{Font, TextLayout};
use std::borrow::Cow;

/// Body text size in points.
pub const BODY_SIZE: f64 = 11.0;

/// Sizes for heading levels 1 to 3.
pub const HEADING_SIZES: [f64; 3] = [22.0, 16.0, 13.0];

/// Space above a heading that does not start the document.
const HEADING_SPACE_BEFORE: [f64; 3] = [14.0, 12.0, 10.0];

/// Text color for headings, paragraphs and list items.
pub const TEXT_COLOR: &str = "#111111";

/// Left indent of list item bodies.
pub const LIST_INDENT: f64 = 12.0;

/// Stroke color of horizontal rules.
pub const RULE_COLOR: &str = "#e0e0e0";

/// Stroke width of horizontal rules.
pub const RULE_WIDTH: f64 = 0.5;

/// Lists wrap this much narrower than the text column.
const LIST_WRAP_INSET: f64 = 18.0;

const BULLET_PREFIX: &str = "- ";
const BULLET_CONTINUATION: &str = "  ";

const BLOCK_SPACE_AFTER: f64 = 4.0;
const LIST_SPACE_AFTER: f64 = 2.0;
const RULE_SPACING: f64 = 8.0;

/// One laid-out unit: a wrapped line of a block, a rule or a spacer.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkdownItem<'a> {
    /// List marker or continuation padding, drawn before the text
    pub prefix: Cow<'a, str>,
    /// Body text, still carrying inline markers
    pub text: &'a str,
    /// Font size
    pub size: f64,
    /// Left indent relative to the margin
    pub indent: f64,
    /// Space above the item
    pub space_before: f64,
    /// Space below the item
    pub space_after: f64,
    /// Horizontal rule
    pub rule: bool,
    /// Text color
    pub color: &'static str,
}

impl<'a> MarkdownItem<'a> {
    fn text(text: &'a str, size: f64) -> Self {
        Self {
            prefix: Cow::Borrowed(""),
            text,
            size,
            indent: 0.0,
            space_before: 0.0,
            space_after: BLOCK_SPACE_AFTER,
            rule: false,
            color: TEXT_COLOR,
        }
    }

    fn list_line(prefix: Cow<'a, str>, text: &'a str) -> Self {
        Self {
            prefix,
            indent: LIST_INDENT,
            space_after: LIST_SPACE_AFTER,
            ..Self::text(text, BODY_SIZE)
        }
    }

    fn rule() -> Self {
        Self {
            space_before: RULE_SPACING,
            space_after: RULE_SPACING,
            rule: true,
            ..Self::text("", BODY_SIZE)
        }
    }

    fn spacer() -> Self {
        Self::text("", BODY_SIZE)
    }

    /// Vertical space the item consumes.
    pub fn height(&self) -> f64 {
        self.space_before + self.size + self.space_after
    }

    /// Whether the item draws nothing.
    pub fn is_spacer(&self) -> bool {
        !self.rule && self.text.is_empty()
    }
}

/// Kind of the previous block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BlockKind {
    Start,
    Heading,
    List,
    Rule,
    Blank,
    Paragraph,
}

/// Parse `source` into items wrapped to `text_width`.
pub fn parse_blocks(source: &str, text_width: f64) -> Vec<MarkdownItem<'_>> {
    let mut items = Vec::new();
    let mut prev = BlockKind::Start;

    for raw in source.split('\n') {
        let raw = raw.strip_suffix('\r').unwrap_or(raw);
        let line = raw.trim_end();
        let trimmed = line.trim_start();

        prev = if let Some((level, title)) = heading(trimmed) {
            push_heading(&mut items, level, title, prev, text_width);
            BlockKind::Heading
        } else if let Some(body) = bullet(trimmed) {
            push_list(&mut items, Cow::Borrowed(BULLET_PREFIX), BULLET_CONTINUATION.into(), body, text_width);
            BlockKind::List
        } else if let Some((marker, body)) = ordered(trimmed) {
            let padding = " ".repeat(marker.len());
            push_list(&mut items, Cow::Borrowed(marker), padding.into(), body, text_width);
            BlockKind::List
        } else if is_rule(trimmed) {
            items.push(MarkdownItem::rule());
            BlockKind::Rule
        } else if line.is_empty() {
            if !matches!(prev, BlockKind::Start | BlockKind::Blank) {
                items.push(MarkdownItem::spacer());
            }
            BlockKind::Blank
        } else {
            for wrapped in TextLayout::new(Font::Helvetica, BODY_SIZE).wrap(line, text_width) {
                items.push(MarkdownItem::text(wrapped.text, BODY_SIZE));
            }
            BlockKind::Paragraph
        };
    }
    items
}

/// `#`, `##` or `###` followed by whitespace or end of line.
fn heading(line: &str) -> Option<(usize, &str)> {
    let level = line.bytes().take_while(|&b| b == b'#').count();
    if !(1..=3).contains(&level) {
        return None;
    }
    let rest = &line[level..];
    if rest.is_empty() || rest.starts_with(char::is_whitespace) {
        Some((level, rest.trim_start()))
    } else {
        None
    }
}

/// `-` or `*` followed by whitespace; returns the body.
fn bullet(line: &str) -> Option<&str> {
    let mut chars = line.chars();
    match (chars.next(), chars.next()) {
        (Some('-' | '*'), Some(c)) if c.is_whitespace() => Some(chars.as_str().trim_start()),
        _ => None,
    }
}

/// Digits, `.`, one whitespace character and some content. Returns the
/// marker including that whitespace, and the body.
fn ordered(line: &str) -> Option<(&str, &str)> {
    let digits = line.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }
    let rest = line[digits..].strip_prefix('.')?;
    let space = rest.chars().next().filter(|c| c.is_whitespace())?;
    let marker_len = digits + 1 + space.len_utf8();
    if marker_len >= line.len() {
        return None;
    }
    Some((&line[..marker_len], line[marker_len..].trim_start()))
}

/// Three or more of the same character from `-`, `*`, `_`.
fn is_rule(line: &str) -> bool {
    let bytes = line.as_bytes();
    match bytes.first() {
        Some(&c @ (b'-' | b'*' | b'_')) => bytes.len() >= 3 && bytes.iter().all(|&b| b == c),
        _ => false,
    }
}

fn push_heading<'a>(
    items: &mut Vec<MarkdownItem<'a>>,
    level: usize,
    text: &'a str,
    prev: BlockKind,
    text_width: f64,
) {
    let size = HEADING_SIZES[level - 1];
    let space_before = if prev == BlockKind::Start {
        0.0
    } else {
        HEADING_SPACE_BEFORE[level - 1]
    };
    for (i, wrapped) in TextLayout::new(Font::Helvetica, size)
        .wrap(text, text_width)
        .into_iter()
        .enumerate()
    {
        let mut item = MarkdownItem::text(wrapped.text, size);
        if i == 0 {
            item.space_before = space_before;
        }
        items.push(item);
    }
}

fn push_list<'a>(
    items: &mut Vec<MarkdownItem<'a>>,
    first: Cow<'a, str>,
    continuation: Cow<'a, str>,
    body: &'a str,
    text_width: f64,
) {
    let lines = TextLayout::new(Font::Helvetica, BODY_SIZE).wrap(body, text_width - LIST_WRAP_INSET);
    for (i, wrapped) in lines.into_iter().enumerate() {
        let prefix = if i == 0 { first.clone() } else { continuation.clone() };
        items.push(MarkdownItem::list_line(prefix, wrapped.text));
    }
}
