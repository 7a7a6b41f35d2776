//! Link annotations.
//!
//! Links are collected while a page is drawn, written as indirect objects
//! and referenced from the page's `/Annots` array.

use super::object_serializer::ObjectSerializer;
use crate::geometry::Rect;
use crate::object::{Dictionary, Object};

/// A rectangular hotspot opening a URI.
#[derive(Debug, Clone, PartialEq)]
pub struct LinkAnnotation {
    /// Clickable area
    pub rect: Rect,
    /// Target URI
    pub uri: String,
}

impl LinkAnnotation {
    /// Create a URI link over `rect`.
    pub fn uri(rect: Rect, uri: impl Into<String>) -> Self {
        Self {
            rect,
            uri: uri.into(),
        }
    }

    /// Build the annotation dictionary (borderless, URI action).
    pub fn build(&self) -> Dictionary {
        let action = ObjectSerializer::dict(vec![
            ("Type", ObjectSerializer::name("Action")),
            ("S", ObjectSerializer::name("URI")),
            ("URI", ObjectSerializer::string(&self.uri)),
        ]);
        ObjectSerializer::dictionary(vec![
            ("Type", ObjectSerializer::name("Annot")),
            ("Subtype", ObjectSerializer::name("Link")),
            (
                "Rect",
                ObjectSerializer::rect(self.rect.x, self.rect.y, self.rect.width, self.rect.height),
            ),
            (
                "Border",
                ObjectSerializer::array(vec![Object::Integer(0), Object::Integer(0), Object::Integer(0)]),
            ),
            ("A", action),
        ])
    }
}
